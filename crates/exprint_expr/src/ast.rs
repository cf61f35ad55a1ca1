//! Abstract syntax tree
//!
//! One node per source construct, children exclusively owned. Trees are
//! immutable once the parser hands them out.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::paren::{needs_parens, ParenSite};
use crate::EvalError;

/// Unary sign operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }
}

/// Binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    /// True for the `+`/`-` tier.
    pub fn is_additive(self) -> bool {
        matches!(self, BinaryOp::Add | BinaryOp::Sub)
    }
}

/// The closed set of callable functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Func {
    Pow,
    Sin,
    Cos,
    Tan,
    Sqrt,
}

impl Func {
    pub fn from_name(name: &str) -> Option<Func> {
        match name {
            "pow" => Some(Func::Pow),
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "sqrt" => Some(Func::Sqrt),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Func::Pow => "pow",
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Sqrt => "sqrt",
        }
    }

    /// Number of arguments the call site must supply.
    pub fn arity(self) -> usize {
        match self {
            Func::Pow => 2,
            _ => 1,
        }
    }
}

/// An expression tree node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Free variable, evaluated by environment lookup.
    Var(String),
    /// Decimal numeral. The source text is kept verbatim so serialization
    /// reproduces it exactly.
    Number(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        func: Func,
        args: Vec<Expr>,
    },
}

/// Shallow variant tag of an [`Expr`] node.
///
/// Parenthesization is decided entirely from these tags (see
/// [`crate::paren`]), never by inspecting a node's concrete shape at the
/// decision site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Var,
    Number,
    Unary(UnaryOp),
    Binary(BinaryOp),
    Call(Func),
}

impl Expr {
    pub fn kind(&self) -> ExprKind {
        match self {
            Expr::Var(_) => ExprKind::Var,
            Expr::Number(_) => ExprKind::Number,
            Expr::Unary { op, .. } => ExprKind::Unary(*op),
            Expr::Binary { op, .. } => ExprKind::Binary(*op),
            Expr::Call { func, .. } => ExprKind::Call(*func),
        }
    }

    /// Evaluate against `env`.
    ///
    /// Arithmetic follows IEEE-754: division by zero yields an infinity or
    /// NaN rather than an error. An unbound variable fails; a malformed
    /// numeral fails too, though parser-built trees cannot contain one.
    pub fn eval(&self, env: &Env) -> Result<f64, EvalError> {
        match self {
            Expr::Var(name) => env
                .get(name)
                .ok_or_else(|| EvalError::UnboundVariable(name.clone())),
            Expr::Number(text) => text
                .parse::<f64>()
                .map_err(|_| EvalError::MalformedNumber(text.clone())),
            Expr::Unary { op, operand } => {
                let v = operand.eval(env)?;
                Ok(match op {
                    UnaryOp::Plus => v,
                    UnaryOp::Minus => -v,
                })
            }
            Expr::Binary { op, lhs, rhs } => {
                let l = lhs.eval(env)?;
                let r = rhs.eval(env)?;
                Ok(match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                })
            }
            Expr::Call { func, args } => match func {
                Func::Pow => {
                    let base = args[0].eval(env)?;
                    let exp = args[1].eval(env)?;
                    Ok(base.powf(exp))
                }
                Func::Sin => Ok(args[0].eval(env)?.sin()),
                Func::Cos => Ok(args[0].eval(env)?.cos()),
                Func::Tan => Ok(args[0].eval(env)?.tan()),
                Func::Sqrt => Ok(args[0].eval(env)?.sqrt()),
            },
        }
    }
}

/// Canonical serialization: source text with the minimal parentheses that
/// preserve meaning under the grammar's precedence.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(name) => f.write_str(name),
            Expr::Number(text) => f.write_str(text),
            Expr::Unary { op, operand } => match op {
                // A leading plus carries no meaning; the canonical form
                // drops it.
                UnaryOp::Plus => write!(f, "{operand}"),
                UnaryOp::Minus => {
                    if needs_parens(operand.kind(), ParenSite::NegatedOperand) {
                        write!(f, "-({operand})")
                    } else {
                        write!(f, "-{operand}")
                    }
                }
            },
            Expr::Binary { op, lhs, rhs } => {
                if op.is_additive() {
                    write!(f, "{lhs}{}{rhs}", op.symbol())
                } else {
                    fmt_factor(f, lhs)?;
                    f.write_str(op.symbol())?;
                    fmt_factor(f, rhs)
                }
            }
            Expr::Call { func, args } => {
                write!(f, "{}(", func.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

fn fmt_factor(f: &mut fmt::Formatter<'_>, operand: &Expr) -> fmt::Result {
    if needs_parens(operand.kind(), ParenSite::FactorOperand) {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

/// Variable environment for evaluation. Lookups have no default.
#[derive(Clone, Debug, Default)]
pub struct Env {
    vars: FxHashMap<String, f64>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.vars.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }
}
