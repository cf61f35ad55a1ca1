//! Recursive-descent parser
//!
//! Grammar, lowest to highest precedence:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-')? atom
//! atom    := NUMBER | IDENT | '(' expr ')' | IDENT '(' expr (',' expr)* ')'
//! ```
//!
//! The parser is a pure text-to-tree transform: no evaluation, no layout.
//! Numerals are validated here, so a malformed literal is a syntax error
//! rather than a latent evaluation failure.

use tracing::trace;

use crate::ast::{BinaryOp, Expr, Func, UnaryOp};
use crate::SyntaxError;

/// Parse `input` into an expression tree.
pub fn parse(input: &str) -> Result<Expr, SyntaxError> {
    trace!(input, "parsing expression");
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, at: 0 };
    let expr = parser.expr()?;
    if let Some((at, tok)) = parser.peek() {
        if matches!(tok, Token::RParen) {
            return Err(SyntaxError::UnbalancedParen { at });
        }
        return Err(SyntaxError::TrailingInput { at });
    }
    Ok(expr)
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Number(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(t) | Token::Ident(t) => t.clone(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::Comma => ",".into(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, SyntaxError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let start = pos;
        match bytes[pos] {
            b' ' | b'\t' | b'\n' | b'\r' => {
                pos += 1;
            }
            b'+' => {
                tokens.push((start, Token::Plus));
                pos += 1;
            }
            b'-' => {
                tokens.push((start, Token::Minus));
                pos += 1;
            }
            b'*' => {
                tokens.push((start, Token::Star));
                pos += 1;
            }
            b'/' => {
                tokens.push((start, Token::Slash));
                pos += 1;
            }
            b'(' => {
                tokens.push((start, Token::LParen));
                pos += 1;
            }
            b')' => {
                tokens.push((start, Token::RParen));
                pos += 1;
            }
            b',' => {
                tokens.push((start, Token::Comma));
                pos += 1;
            }
            b'0'..=b'9' => {
                while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    pos += 1;
                }
                if pos < bytes.len() && bytes[pos] == b'.' {
                    pos += 1;
                    if pos >= bytes.len() || !bytes[pos].is_ascii_digit() {
                        return Err(SyntaxError::MalformedNumber {
                            text: input[start..pos].into(),
                            at: start,
                        });
                    }
                    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                        pos += 1;
                    }
                }
                // A second decimal point glues to the numeral: "1.2.3" is
                // one malformed literal, not a literal and stray dots.
                if pos < bytes.len() && bytes[pos] == b'.' {
                    while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
                        pos += 1;
                    }
                    return Err(SyntaxError::MalformedNumber {
                        text: input[start..pos].into(),
                        at: start,
                    });
                }
                let text = &input[start..pos];
                if text.parse::<f64>().is_err() {
                    return Err(SyntaxError::MalformedNumber {
                        text: text.into(),
                        at: start,
                    });
                }
                tokens.push((start, Token::Number(text.into())));
            }
            c if c.is_ascii_alphabetic() => {
                while pos < bytes.len()
                    && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_')
                {
                    pos += 1;
                }
                tokens.push((start, Token::Ident(input[start..pos].into())));
            }
            _ => {
                let ch = input[pos..].chars().next().unwrap_or('\u{FFFD}');
                return Err(SyntaxError::UnexpectedChar { ch, at: pos });
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    at: usize,
}

impl Parser {
    fn peek(&self) -> Option<(usize, &Token)> {
        self.tokens.get(self.at).map(|(pos, tok)| (*pos, tok))
    }

    fn bump(&mut self) -> Option<(usize, Token)> {
        let tok = self.tokens.get(self.at).cloned();
        if tok.is_some() {
            self.at += 1;
        }
        tok
    }

    fn expect_rparen(&mut self, open_at: usize) -> Result<(), SyntaxError> {
        match self.bump() {
            Some((_, Token::RParen)) => Ok(()),
            Some((at, tok)) => Err(SyntaxError::UnexpectedToken {
                expected: "`)`",
                found: tok.describe(),
                at,
            }),
            None => Err(SyntaxError::UnbalancedParen { at: open_at }),
        }
    }

    fn expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some((_, Token::Plus)) => BinaryOp::Add,
                Some((_, Token::Minus)) => BinaryOp::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some((_, Token::Star)) => BinaryOp::Mul,
                Some((_, Token::Slash)) => BinaryOp::Div,
                _ => break,
            };
            self.bump();
            let rhs = self.unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, SyntaxError> {
        let op = match self.peek() {
            Some((_, Token::Plus)) => Some(UnaryOp::Plus),
            Some((_, Token::Minus)) => Some(UnaryOp::Minus),
            _ => None,
        };
        if let Some(op) = op {
            self.bump();
            let operand = self.atom()?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Expr, SyntaxError> {
        match self.bump() {
            Some((_, Token::Number(text))) => Ok(Expr::Number(text)),
            Some((at, Token::Ident(name))) => match self.peek() {
                Some((open_at, Token::LParen)) => {
                    self.bump();
                    self.call(name, at, open_at)
                }
                _ => Ok(Expr::Var(name)),
            },
            Some((at, Token::LParen)) => {
                let inner = self.expr()?;
                self.expect_rparen(at)?;
                Ok(inner)
            }
            Some((at, tok)) => Err(SyntaxError::UnexpectedToken {
                expected: "a number, variable, function call, or `(`",
                found: tok.describe(),
                at,
            }),
            None => Err(SyntaxError::UnexpectedEnd),
        }
    }

    fn call(&mut self, name: String, at: usize, open_at: usize) -> Result<Expr, SyntaxError> {
        let func = Func::from_name(&name)
            .ok_or_else(|| SyntaxError::UnknownFunction { name: name.clone(), at })?;
        let mut args = vec![self.expr()?];
        while matches!(self.peek(), Some((_, Token::Comma))) {
            self.bump();
            args.push(self.expr()?);
        }
        self.expect_rparen(open_at)?;
        if args.len() != func.arity() {
            return Err(SyntaxError::WrongArity {
                name: func.name(),
                expected: func.arity(),
                found: args.len(),
                at,
            });
        }
        Ok(Expr::Call { func, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_canonical_text() {
        let cases = [
            ("x", "x"),
            ("3.14", "3.14"),
            ("-(x)", "-x"),
            ("-(x+1)", "-(x+1)"),
            ("x+y", "x+y"),
            ("(x+y)*(x-y)", "(x+y)*(x-y)"),
            ("x+y*x-y", "x+y*x-y"),
            ("x+-(y*y+1)*x", "x+-(y*y+1)*x"),
            ("sin(x+y*x)", "sin(x+y*x)"),
            ("sin(x/pow(y,2))", "sin(x/pow(y,2))"),
            (
                "sin(-x)*pow(1.5,-sqrt(x*x+y*y))",
                "sin(-x)*pow(1.5,-sqrt(x*x+y*y))",
            ),
            (
                "pow(2,sin(y))*pow(2,sin(x))/12",
                "pow(2,sin(y))*pow(2,sin(x))/12",
            ),
            ("sin(x*y/10)/10", "sin(x*y/10)/10"),
        ];
        for (input, want) in cases {
            let expr = parse(input).unwrap_or_else(|e| panic!("parse {input:?}: {e}"));
            assert_eq!(expr.to_string(), want, "input {input:?}");
        }
    }

    #[test]
    fn whitespace_is_insignificant() {
        let a = parse("x + y * 2").unwrap();
        let b = parse("x+y*2").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unary_plus_is_dropped_from_canonical_form() {
        assert_eq!(parse("+x").unwrap().to_string(), "x");
        assert_eq!(parse("x*+y").unwrap().to_string(), "x*y");
    }

    #[test]
    fn rejects_empty_and_truncated_input() {
        assert_eq!(parse("").unwrap_err(), SyntaxError::UnexpectedEnd);
        assert_eq!(parse("x+").unwrap_err(), SyntaxError::UnexpectedEnd);
        assert!(matches!(
            parse("(x"),
            Err(SyntaxError::UnbalancedParen { at: 0 })
        ));
    }

    #[test]
    fn rejects_trailing_input() {
        assert!(matches!(
            parse("x y"),
            Err(SyntaxError::TrailingInput { at: 2 })
        ));
        assert!(matches!(
            parse("x)"),
            Err(SyntaxError::UnbalancedParen { at: 1 })
        ));
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(
            parse("x $ y").unwrap_err(),
            SyntaxError::UnexpectedChar { ch: '$', at: 2 }
        );
    }

    #[test]
    fn rejects_malformed_numerals_at_parse_time() {
        assert!(matches!(
            parse("1."),
            Err(SyntaxError::MalformedNumber { .. })
        ));
        assert!(matches!(
            parse("1.2.3"),
            Err(SyntaxError::MalformedNumber { ref text, at: 0 }) if text == "1.2.3"
        ));
    }

    #[test]
    fn validates_function_names_and_arity() {
        assert!(matches!(
            parse("log(x)"),
            Err(SyntaxError::UnknownFunction { ref name, at: 0 }) if name == "log"
        ));
        assert!(matches!(
            parse("pow(x)"),
            Err(SyntaxError::WrongArity {
                name: "pow",
                expected: 2,
                found: 1,
                ..
            })
        ));
        assert!(matches!(
            parse("sin(x,y)"),
            Err(SyntaxError::WrongArity {
                name: "sin",
                expected: 1,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn known_function_name_without_call_is_a_variable() {
        assert_eq!(parse("sin").unwrap(), Expr::Var("sin".into()));
    }

    #[test]
    fn left_associativity() {
        // (x-y)-z, not x-(y-z)
        let expr = parse("x-y-z").unwrap();
        let Expr::Binary { op: BinaryOp::Sub, lhs, .. } = &expr else {
            panic!("expected top-level subtraction, got {expr:?}");
        };
        assert!(matches!(**lhs, Expr::Binary { op: BinaryOp::Sub, .. }));
    }

    #[test]
    fn unary_sign_binds_tighter_than_binary() {
        // -x*y parses as (-x)*y
        let expr = parse("-x*y").unwrap();
        assert!(matches!(expr, Expr::Binary { op: BinaryOp::Mul, .. }));
    }
}
