//! Expression parsing and representation
//!
//! This crate turns algebraic expression text into an abstract syntax tree
//! and gives that tree its three operations:
//!
//! - evaluation against a variable environment
//! - canonical minimal-parenthesization serialization (via `Display`)
//! - variant tags ([`ast::ExprKind`]) that drive every parenthesization
//!   decision, both here and in the layout engine
//!
//! The grammar is fixed: `+`/`-` below `*`/`/`, both tiers
//! left-associative, unary sign binding tighter than any binary operator,
//! and calls to a closed set of named functions. Operator and function
//! symbols are closed enums built only by the parser, so an invalid symbol
//! cannot exist inside a tree.

pub mod ast;
pub mod paren;
pub mod parser;

pub use ast::{BinaryOp, Env, Expr, ExprKind, Func, UnaryOp};
pub use paren::{needs_parens, ParenSite};
pub use parser::parse;

use thiserror::Error;

/// Parse-time failures. Every variant carries the byte offset of the
/// offending input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected character {ch:?} at byte {at}")]
    UnexpectedChar { ch: char, at: usize },

    #[error("malformed number {text:?} at byte {at}")]
    MalformedNumber { text: String, at: usize },

    #[error("expected {expected}, found {found:?} at byte {at}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        at: usize,
    },

    #[error("unbalanced parenthesis at byte {at}")]
    UnbalancedParen { at: usize },

    #[error("unknown function {name:?} at byte {at}")]
    UnknownFunction { name: String, at: usize },

    #[error("{name} takes {expected} argument(s), found {found} at byte {at}")]
    WrongArity {
        name: &'static str,
        expected: usize,
        found: usize,
        at: usize,
    },

    #[error("trailing input at byte {at}")]
    TrailingInput { at: usize },

    #[error("unexpected end of input")]
    UnexpectedEnd,
}

/// Evaluation-time failures. Layout and serialization never evaluate, so
/// these only surface from [`ast::Expr::eval`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("variable {0:?} is not bound in the environment")]
    UnboundVariable(String),

    #[error("literal {0:?} is not a valid number")]
    MalformedNumber(String),
}
