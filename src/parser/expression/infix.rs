//! Infix operator handling for the Pratt parser.

use crate::SyntaxKind;
use crate::parser::Parser;
use crate::parser::ast::{BinaryOp, Expr, ExprId, Infix, infix_binding_power};

impl Parser<'_> {
    pub(super) fn infix(&mut self, start: usize, mut lhs: ExprId, min_bp: u8) -> Option<ExprId> {
        loop {
            let op_kind = self.ts.kind();
            if op_kind == SyntaxKind::T_PIPE && self.restrictions.no_pipe {
                break;
            }
            let Some((l_bp, r_bp, op)) = infix_binding_power(op_kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            // A `!` is only infix as the first half of `!in`.
            if op == Infix::Binary(BinaryOp::NotIn) && self.ts.nth(1) != SyntaxKind::K_IN {
                break;
            }
            self.ts.bump();
            if op == Infix::Binary(BinaryOp::NotIn) {
                self.ts.bump();
            }
            let kind = match op {
                Infix::Cast => Expr::Cast {
                    expr: lhs,
                    ty: self.ty()?,
                },
                Infix::TypeTest => Expr::TypeTest {
                    expr: lhs,
                    ty: self.ty()?,
                },
                Infix::Ternary => {
                    let then = self.expr()?;
                    if !self.ts.expect(SyntaxKind::T_COLON, "conditional expression") {
                        return None;
                    }
                    Expr::Ternary {
                        cond: lhs,
                        then,
                        otherwise: self.expr_bp(r_bp)?,
                    }
                }
                Infix::Assign(op) => Expr::Assign {
                    op,
                    target: lhs,
                    value: self.expr_bp(r_bp)?,
                },
                Infix::Binary(op) => Expr::Binary {
                    op,
                    lhs,
                    rhs: self.expr_bp(r_bp)?,
                },
            };
            lhs = self.alloc_expr(kind, start);
        }
        Some(lhs)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_util::expr_sexpr;
    use crate::parse_expression;
    use rstest::rstest;

    #[rstest]
    #[case("a + b * c", "(+ a (* b c))")]
    #[case("a - b - c", "(- (- a b) c)")]
    #[case("a = b = c", "(= a (= b c))")]
    #[case("x += 1", "(+= x 1)")]
    #[case("a && b || c", "(|| (&& a b) c)")]
    #[case("a in s", "(in a s)")]
    #[case("a !in s", "(!in a s)")]
    #[case("-x as int", "(as (- x) int)")]
    #[case("x is string", "(is x string)")]
    #[case("c ? a : b", "(? c a b)")]
    #[case("c ? a : d ? e : f", "(? c a (? d e f))")]
    #[case("a + f(x)", "(+ a (call f x))")]
    #[case("!r?$f", "(! (?$ r f))")]
    #[case("a / b", "(/ a b)")]
    #[case("x = /re/", "(= x /re/)")]
    #[case("a < b == c", "(== (< a b) c)")]
    fn precedence_and_associativity(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(expr_sexpr(src), expected);
    }

    #[test]
    fn missing_right_operand_is_an_error() {
        assert!(parse_expression("a +").is_err());
    }
}
