//! Parenthesization table
//!
//! Whether a sub-expression needs wrapping depends only on its shallow
//! variant tag and on where it sits in its parent. Both the serializer and
//! the layout boxes consult this one table, so drawn output and serialized
//! text can never disagree about grouping.

use crate::ast::{ExprKind, UnaryOp};

/// The position a child occupies inside its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParenSite {
    /// Operand of `*` or `/` in serialized text (and of a drawn `*`).
    FactorOperand,
    /// Operand of a unary minus.
    NegatedOperand,
    /// Base of a power.
    PowerBase,
}

/// True when a child of kind `child` must be wrapped in parentheses at
/// `site` to keep its meaning.
pub fn needs_parens(child: ExprKind, site: ParenSite) -> bool {
    match site {
        // x*(y+1): only the looser additive tier is ambiguous here.
        ParenSite::FactorOperand | ParenSite::NegatedOperand => {
            matches!(child, ExprKind::Binary(op) if op.is_additive())
        }
        // The exponent's scope over the base is ambiguous for anything
        // that is not a single atom: (-x)^2, (x+y)^2, (x/y)^2, (x^y)^2,
        // (sin(x))^2 all need the grouping; x^2 and 3.5^2 do not.
        ParenSite::PowerBase => !matches!(
            child,
            ExprKind::Var | ExprKind::Number | ExprKind::Unary(UnaryOp::Plus)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Func};

    #[test]
    fn factor_operand_wraps_only_additive() {
        for op in [BinaryOp::Add, BinaryOp::Sub] {
            assert!(needs_parens(ExprKind::Binary(op), ParenSite::FactorOperand));
        }
        for kind in [
            ExprKind::Var,
            ExprKind::Number,
            ExprKind::Binary(BinaryOp::Mul),
            ExprKind::Binary(BinaryOp::Div),
            ExprKind::Unary(UnaryOp::Minus),
            ExprKind::Call(Func::Sin),
        ] {
            assert!(!needs_parens(kind, ParenSite::FactorOperand));
        }
    }

    #[test]
    fn negated_operand_wraps_only_additive() {
        assert!(needs_parens(
            ExprKind::Binary(BinaryOp::Add),
            ParenSite::NegatedOperand
        ));
        assert!(!needs_parens(
            ExprKind::Binary(BinaryOp::Mul),
            ParenSite::NegatedOperand
        ));
        assert!(!needs_parens(ExprKind::Var, ParenSite::NegatedOperand));
    }

    #[test]
    fn power_base_wraps_everything_but_atoms() {
        for kind in [
            ExprKind::Unary(UnaryOp::Minus),
            ExprKind::Binary(BinaryOp::Add),
            ExprKind::Binary(BinaryOp::Sub),
            ExprKind::Binary(BinaryOp::Mul),
            ExprKind::Binary(BinaryOp::Div),
            ExprKind::Call(Func::Pow),
            ExprKind::Call(Func::Sin),
            ExprKind::Call(Func::Sqrt),
        ] {
            assert!(needs_parens(kind, ParenSite::PowerBase), "{kind:?}");
        }
        for kind in [
            ExprKind::Var,
            ExprKind::Number,
            ExprKind::Unary(UnaryOp::Plus),
        ] {
            assert!(!needs_parens(kind, ParenSite::PowerBase), "{kind:?}");
        }
    }
}
