//! Core Pratt loop and entry point.
//!
//! Postfix forms (`[...]`, `$field`, `?$field` and calls) bind tighter than
//! any prefix or infix operator and are folded here, before infix operators
//! are considered.

use crate::SyntaxKind;
use crate::parser::ast::{Ast, Expr, ExprId};
use crate::parser::errors::{ParseError, merge_errors};
use crate::parser::{ParseOptions, Parser, Restrictions};

/// Parse a single expression.
///
/// The whole input must be consumed. On success the returned [`Ast`] owns
/// every node of the expression and the id names its root.
///
/// # Errors
/// Returns every lexical and syntax error found.
#[must_use = "discarding the Result will ignore parse errors"]
pub fn parse_expression(src: &str) -> Result<(Ast, ExprId), Vec<ParseError>> {
    let mut parser = Parser::new(src, &ParseOptions::default());
    let expr = parser.expr();
    if expr.is_some() && !parser.ts.at(SyntaxKind::T_EOF) {
        parser.ts.error_expected(&[SyntaxKind::T_EOF], "expression");
    }
    let Parser { ts, ast, .. } = parser;
    let done = ts.finish();
    let errors = merge_errors(done.lex_errors, done.errors);
    match expr {
        Some(id) if errors.is_empty() => Ok((ast, id)),
        _ => Err(errors),
    }
}

impl Parser<'_> {
    pub(in crate::parser) fn expr(&mut self) -> Option<ExprId> {
        self.expr_bp(0)
    }

    /// Parse an expression whose operators bind at least as tightly as
    /// `min_bp`.
    pub(in crate::parser) fn expr_bp(&mut self, min_bp: u8) -> Option<ExprId> {
        self.nested(|p| {
            let start = p.ts.peek_value().1.start;
            let lhs = p.prefix()?;
            let lhs = p.postfix(start, lhs)?;
            p.infix(start, lhs, min_bp)
        })
    }

    pub(in crate::parser) fn alloc_expr(&mut self, kind: Expr, start: usize) -> ExprId {
        let span = self.ts.span_from(start);
        self.ast.exprs.alloc(kind, span)
    }

    pub(super) fn postfix(&mut self, start: usize, mut lhs: ExprId) -> Option<ExprId> {
        loop {
            let kind = match self.ts.kind() {
                SyntaxKind::T_LBRACKET => self.index_postfix(lhs)?,
                SyntaxKind::T_DOLLAR => {
                    self.ts.bump();
                    let field = self.ident("field access")?;
                    Expr::Field { base: lhs, field }
                }
                SyntaxKind::T_HAS_FIELD => {
                    self.ts.bump();
                    let field = self.ident("field test")?;
                    Expr::HasField { base: lhs, field }
                }
                SyntaxKind::T_LPAREN => {
                    self.ts.bump();
                    let args = self.unrestricted(|p| p.expr_list(SyntaxKind::T_RPAREN))?;
                    if !self.ts.expect(SyntaxKind::T_RPAREN, "call") {
                        return None;
                    }
                    Expr::Call { callee: lhs, args }
                }
                _ => break,
            };
            lhs = self.alloc_expr(kind, start);
        }
        Some(lhs)
    }

    /// `e[i, ...]` or the slice forms `e[lo:hi]`, `e[:hi]`, `e[lo:]`.
    fn index_postfix(&mut self, base: ExprId) -> Option<Expr> {
        self.ts.bump();
        self.unrestricted(|p| {
            let low = if p.ts.at(SyntaxKind::T_COLON) {
                None
            } else {
                Some(p.expr()?)
            };
            let kind = if p.ts.eat(SyntaxKind::T_COLON) {
                let high = if p.ts.at(SyntaxKind::T_RBRACKET) {
                    None
                } else {
                    Some(p.expr()?)
                };
                Expr::Slice { base, low, high }
            } else {
                let mut indices: Vec<ExprId> = low.into_iter().collect();
                while p.ts.eat(SyntaxKind::T_COMMA) {
                    indices.push(p.expr()?);
                }
                Expr::Index { base, indices }
            };
            p.ts.expect(SyntaxKind::T_RBRACKET, "index").then_some(kind)
        })
    }

    /// Run `f` with every restriction lifted, as inside brackets.
    pub(in crate::parser) fn unrestricted<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.restricted(Restrictions::default(), f)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_util::expr_sexpr;
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a[1]", "(index a 1)")]
    #[case("a[1, 2]", "(index a 1 2)")]
    #[case("a[1:2]", "(slice a 1 2)")]
    #[case("a[:2]", "(slice a _ 2)")]
    #[case("a[1:]", "(slice a 1 _)")]
    #[case("r$f$g", "($ ($ r f) g)")]
    #[case("r?$f", "(?$ r f)")]
    #[case("f(1)(2)", "(call (call f 1) 2)")]
    #[case("f()", "(call f)")]
    fn postfix_forms(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(expr_sexpr(src), expected);
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert!(parse_expression("a b").is_err());
    }

    #[test]
    fn empty_input_is_an_error() {
        let Err(errors) = parse_expression("") else {
            panic!("empty input parsed");
        };
        assert_eq!(errors.len(), 1);
    }
}
