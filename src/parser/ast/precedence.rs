//! Operator precedence table for Zeek expressions.
//!
//! Binding powers are the grammar tier multiplied by ten. A left-associative
//! operator binds its right operand one step tighter than itself; the
//! right-associative assignments bind it one step looser. Postfix forms of
//! tier 7 (indexing, `$field`, `?$field` and calls) are handled directly by
//! the Pratt loop and are absent here.

use crate::SyntaxKind;

use super::{AssignOp, BinaryOp, UnaryOp};

/// What an infix token builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Infix {
    Binary(BinaryOp),
    Assign(AssignOp),
    /// `e as T`
    Cast,
    /// `e is T`
    TypeTest,
    /// `c ? a : b`
    Ternary,
}

#[derive(Debug, Clone, Copy)]
struct PrefixEntry {
    bp: u8,
    op: UnaryOp,
}

#[derive(Debug, Clone, Copy)]
struct InfixEntry {
    l_bp: u8,
    r_bp: u8,
    op: Infix,
}

/// Operand binding power of the tier-6 prefix operators. It sits above
/// `as`/`is` so that `-x as int` casts the negation.
pub(crate) const PREFIX_BP: u8 = 61;

const PREFIX_TABLE: &[(SyntaxKind, PrefixEntry)] = &[
    (SyntaxKind::T_MINUS, PrefixEntry { bp: PREFIX_BP, op: UnaryOp::Neg }),
    (SyntaxKind::T_PLUS, PrefixEntry { bp: PREFIX_BP, op: UnaryOp::Plus }),
    (SyntaxKind::T_BANG, PrefixEntry { bp: PREFIX_BP, op: UnaryOp::Not }),
    (SyntaxKind::T_TILDE, PrefixEntry { bp: PREFIX_BP, op: UnaryOp::BitNot }),
    (SyntaxKind::T_PLUSPLUS, PrefixEntry { bp: PREFIX_BP, op: UnaryOp::Incr }),
    (SyntaxKind::T_MINUSMINUS, PrefixEntry { bp: PREFIX_BP, op: UnaryOp::Decr }),
];

const fn left(tier: u8, op: Infix) -> InfixEntry {
    InfixEntry {
        l_bp: tier * 10,
        r_bp: tier * 10 + 1,
        op,
    }
}

const fn right(tier: u8, op: Infix) -> InfixEntry {
    InfixEntry {
        l_bp: tier * 10,
        r_bp: tier * 10 - 1,
        op,
    }
}

const INFIX_TABLE: &[(SyntaxKind, InfixEntry)] = &[
    (SyntaxKind::K_AS, left(6, Infix::Cast)),
    (SyntaxKind::K_IS, left(6, Infix::TypeTest)),
    (SyntaxKind::T_STAR, left(5, Infix::Binary(BinaryOp::Mul))),
    (SyntaxKind::T_SLASH, left(5, Infix::Binary(BinaryOp::Div))),
    (SyntaxKind::T_PERCENT, left(5, Infix::Binary(BinaryOp::Mod))),
    (SyntaxKind::T_PLUS, left(4, Infix::Binary(BinaryOp::Add))),
    (SyntaxKind::T_MINUS, left(4, Infix::Binary(BinaryOp::Sub))),
    (SyntaxKind::T_LT, left(4, Infix::Binary(BinaryOp::Lt))),
    (SyntaxKind::T_LTE, left(4, Infix::Binary(BinaryOp::Le))),
    (SyntaxKind::T_GT, left(4, Infix::Binary(BinaryOp::Gt))),
    (SyntaxKind::T_GTE, left(4, Infix::Binary(BinaryOp::Ge))),
    (SyntaxKind::T_EQEQ, left(4, Infix::Binary(BinaryOp::Eq))),
    (SyntaxKind::T_NEQ, left(4, Infix::Binary(BinaryOp::Ne))),
    (SyntaxKind::T_AMP, left(4, Infix::Binary(BinaryOp::BitAnd))),
    (SyntaxKind::T_CARET, left(4, Infix::Binary(BinaryOp::BitXor))),
    (SyntaxKind::T_PIPE, left(4, Infix::Binary(BinaryOp::BitOr))),
    (SyntaxKind::T_AMPAMP, left(4, Infix::Binary(BinaryOp::And))),
    (SyntaxKind::T_PIPEPIPE, left(4, Infix::Binary(BinaryOp::Or))),
    (SyntaxKind::K_IN, left(4, Infix::Binary(BinaryOp::In))),
    // `!in`; the parser checks that `in` follows the `!`.
    (SyntaxKind::T_BANG, left(4, Infix::Binary(BinaryOp::NotIn))),
    (SyntaxKind::T_QUESTION, right(4, Infix::Ternary)),
    (SyntaxKind::T_EQ, right(3, Infix::Assign(AssignOp::Assign))),
    (SyntaxKind::T_PLUS_EQ, right(3, Infix::Assign(AssignOp::AddAssign))),
    (SyntaxKind::T_MINUS_EQ, right(3, Infix::Assign(AssignOp::SubAssign))),
];

/// Lookup the binding power and [`UnaryOp`] for a prefix operator.
pub(crate) fn prefix_binding_power(kind: SyntaxKind) -> Option<(u8, UnaryOp)> {
    PREFIX_TABLE
        .iter()
        .find_map(|(k, entry)| (kind == *k).then_some((entry.bp, entry.op)))
}

/// Lookup the binding power and [`Infix`] action for an infix operator.
///
/// Returns the left and right binding powers along with the operator.
pub(crate) fn infix_binding_power(kind: SyntaxKind) -> Option<(u8, u8, Infix)> {
    INFIX_TABLE
        .iter()
        .find_map(|(k, entry)| (kind == *k).then_some((entry.l_bp, entry.r_bp, entry.op)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SyntaxKind::T_STAR, SyntaxKind::T_PLUS)]
    #[case(SyntaxKind::T_PLUS, SyntaxKind::T_EQ)]
    #[case(SyntaxKind::K_AS, SyntaxKind::T_STAR)]
    fn tighter_tiers_bind_harder(#[case] tight: SyntaxKind, #[case] loose: SyntaxKind) {
        let (t, _, _) = infix_binding_power(tight).unwrap_or((0, 0, Infix::Ternary));
        let (l, _, _) = infix_binding_power(loose).unwrap_or((u8::MAX, 0, Infix::Ternary));
        assert!(t > l);
    }

    #[test]
    fn assignment_is_right_associative() {
        let Some((l, r, op)) = infix_binding_power(SyntaxKind::T_EQ) else {
            panic!("missing '=' entry");
        };
        assert!(r < l);
        assert_eq!(op, Infix::Assign(AssignOp::Assign));
    }

    #[test]
    fn prefix_operators_share_a_tier() {
        for kind in [SyntaxKind::T_MINUS, SyntaxKind::T_BANG, SyntaxKind::T_PLUSPLUS] {
            assert_eq!(prefix_binding_power(kind).map(|(bp, _)| bp), Some(PREFIX_BP));
        }
    }
}
