//! Atoms, constructors and prefix operators.

use crate::SyntaxKind;
use crate::parser::ast::{
    Capture, EventHdr, Expr, ExprId, NonEmpty, PREFIX_BP, prefix_binding_power,
};
use crate::parser::list::Trailing;
use crate::parser::{Parser, Restrictions};

use super::constants;

/// Tokens that can begin an expression in value position.
const EXPR_START: &[SyntaxKind] = &[
    SyntaxKind::T_IDENT,
    SyntaxKind::T_INTEGER,
    SyntaxKind::T_FLOAT,
    SyntaxKind::T_HEX,
    SyntaxKind::T_PORT,
    SyntaxKind::T_INTERVAL,
    SyntaxKind::T_STRING,
    SyntaxKind::T_IPV4,
    SyntaxKind::T_IPV6,
    SyntaxKind::T_HOSTNAME,
    SyntaxKind::K_T,
    SyntaxKind::K_F,
    SyntaxKind::T_PATTERN,
    SyntaxKind::T_LPAREN,
    SyntaxKind::T_LBRACKET,
    SyntaxKind::T_PIPE,
    SyntaxKind::T_DOLLAR,
    SyntaxKind::T_MINUS,
    SyntaxKind::T_PLUS,
    SyntaxKind::T_BANG,
    SyntaxKind::T_TILDE,
    SyntaxKind::T_PLUSPLUS,
    SyntaxKind::T_MINUSMINUS,
    SyntaxKind::K_RECORD,
    SyntaxKind::K_TABLE,
    SyntaxKind::K_SET,
    SyntaxKind::K_VECTOR,
    SyntaxKind::K_LOCAL,
    SyntaxKind::K_COPY,
    SyntaxKind::K_HOOK,
    SyntaxKind::K_SCHEDULE,
    SyntaxKind::K_FUNCTION,
];

/// Whether `kind` can begin an expression in value position.
pub(in crate::parser) fn starts_expr(kind: SyntaxKind) -> bool {
    EXPR_START.contains(&kind)
}

impl Parser<'_> {
    pub(super) fn prefix(&mut self) -> Option<ExprId> {
        let (kind, span) = self.ts.peek_value();
        let start = span.start;
        if kind.is_constant() {
            return self.constant(kind, &span);
        }
        let expr = match kind {
            SyntaxKind::T_IDENT => {
                self.ts.bump();
                Expr::Name(crate::parser::ast::Ident {
                    name: self.ts.slice(&span).to_string(),
                    span,
                })
            }
            SyntaxKind::T_PATTERN => {
                self.ts.bump();
                let (regex, case_insensitive) = constants::pattern(self.ts.slice(&span));
                Expr::Pattern {
                    regex,
                    case_insensitive,
                }
            }
            SyntaxKind::T_LPAREN => {
                self.ts.bump();
                let inner = self.unrestricted(Self::expr)?;
                if !self.ts.expect(SyntaxKind::T_RPAREN, "parenthesised expression") {
                    return None;
                }
                Expr::Paren(inner)
            }
            SyntaxKind::T_LBRACKET => {
                self.ts.bump();
                let items = self.unrestricted(|p| p.expr_list(SyntaxKind::T_RBRACKET))?;
                if !self.ts.expect(SyntaxKind::T_RBRACKET, "list") {
                    return None;
                }
                Expr::ListLiteral(items)
            }
            SyntaxKind::T_PIPE => {
                self.ts.bump();
                let restrictions = Restrictions {
                    no_pipe: true,
                    ..Restrictions::default()
                };
                let inner = self.restricted(restrictions, Self::expr)?;
                if !self.ts.expect(SyntaxKind::T_PIPE, "cardinality") {
                    return None;
                }
                Expr::Cardinality(inner)
            }
            SyntaxKind::T_DOLLAR => self.field_assign()?,
            SyntaxKind::K_RECORD => {
                self.ts.bump();
                let args = self.ctor_args(true)?;
                Expr::RecordCtor(args)
            }
            SyntaxKind::K_TABLE | SyntaxKind::K_SET => {
                self.ts.bump();
                let args = self.ctor_args(false)?;
                let attrs = if self.restrictions.no_ctor_attrs {
                    None
                } else {
                    NonEmpty::from_vec(self.attrs()?)
                };
                if kind == SyntaxKind::K_TABLE {
                    Expr::TableCtor { args, attrs }
                } else {
                    Expr::SetCtor { args, attrs }
                }
            }
            SyntaxKind::K_VECTOR => {
                self.ts.bump();
                Expr::VectorCtor(self.ctor_args(false)?)
            }
            SyntaxKind::K_LOCAL => {
                self.ts.bump();
                let name = self.ident("local binding")?;
                if !self.ts.expect(SyntaxKind::T_EQ, "local binding") {
                    return None;
                }
                Expr::LocalBinding {
                    name,
                    value: self.expr()?,
                }
            }
            SyntaxKind::K_COPY => {
                self.ts.bump();
                if !self.ts.expect(SyntaxKind::T_LPAREN, "copy") {
                    return None;
                }
                let inner = self.unrestricted(Self::expr)?;
                if !self.ts.expect(SyntaxKind::T_RPAREN, "copy") {
                    return None;
                }
                Expr::Copy(inner)
            }
            SyntaxKind::K_HOOK => {
                self.ts.bump();
                Expr::Hook(self.expr_bp(PREFIX_BP)?)
            }
            SyntaxKind::K_SCHEDULE => {
                self.ts.bump();
                let delay = self.expr()?;
                if !self.ts.expect(SyntaxKind::T_LBRACE, "schedule") {
                    return None;
                }
                let event = self.event_hdr()?;
                if !self.ts.expect(SyntaxKind::T_RBRACE, "schedule") {
                    return None;
                }
                Expr::Schedule { delay, event }
            }
            SyntaxKind::K_FUNCTION => {
                self.ts.bump();
                self.lambda(None)?
            }
            _ => {
                let Some((bp, op)) = prefix_binding_power(kind) else {
                    self.ts.error_expected(EXPR_START, "expression");
                    return None;
                };
                self.ts.bump();
                Expr::Unary {
                    op,
                    operand: self.expr_bp(bp)?,
                }
            }
        };
        Some(self.alloc_expr(expr, start))
    }

    /// `( args )` of a constructor. `record(...)` needs at least one
    /// argument.
    fn ctor_args(&mut self, required: bool) -> Option<Vec<ExprId>> {
        if !self.ts.expect(SyntaxKind::T_LPAREN, "constructor") {
            return None;
        }
        if required && self.ts.at(SyntaxKind::T_RPAREN) {
            self.ts.error_expected(EXPR_START, "constructor");
            return None;
        }
        let args = self.unrestricted(|p| p.expr_list(SyntaxKind::T_RPAREN))?;
        self.ts
            .expect(SyntaxKind::T_RPAREN, "constructor")
            .then_some(args)
    }

    /// `$field = value` or the method form `$field(params) = { body }`.
    fn field_assign(&mut self) -> Option<Expr> {
        self.ts.bump();
        let field = self.ident("field assignment")?;
        let value = if matches!(self.ts.kind(), SyntaxKind::T_LPAREN | SyntaxKind::T_LBRACKET) {
            let start = self.ts.start();
            let lambda = self.lambda(Some(SyntaxKind::T_EQ))?;
            self.alloc_expr(lambda, start)
        } else {
            if !self.ts.expect(SyntaxKind::T_EQ, "field assignment") {
                return None;
            }
            self.expr()?
        };
        Some(Expr::FieldAssign { field, value })
    }

    /// `name(args)` of an event statement or `schedule`.
    pub(in crate::parser) fn event_hdr(&mut self) -> Option<EventHdr> {
        let name = self.ident("event")?;
        if !self.ts.expect(SyntaxKind::T_LPAREN, "event") {
            return None;
        }
        let args = self.unrestricted(|p| p.expr_list(SyntaxKind::T_RPAREN))?;
        self.ts
            .expect(SyntaxKind::T_RPAREN, "event")
            .then_some(EventHdr { name, args })
    }

    /// Captures, parameters and body of a lambda after `function`. The
    /// method form of a field assignment has `=` before the body.
    fn lambda(&mut self, before_body: Option<SyntaxKind>) -> Option<Expr> {
        let captures = if self.ts.at(SyntaxKind::T_LBRACKET) {
            self.captures()?
        } else {
            Vec::new()
        };
        let params = self.func_params()?;
        if let Some(kind) = before_body {
            if !self.ts.expect(kind, "field assignment") {
                return None;
            }
        }
        let body = self.unrestricted(Self::body)?;
        Some(Expr::Lambda {
            captures,
            params,
            body,
        })
    }

    /// `[a, copy b]`
    pub(in crate::parser) fn captures(&mut self) -> Option<Vec<Capture>> {
        self.ts.bump();
        let captures = self.list1(
            "capture list",
            &[SyntaxKind::T_COMMA],
            SyntaxKind::T_RBRACKET,
            Trailing::Rejected,
            |p| {
                let by_copy = p.ts.eat(SyntaxKind::K_COPY);
                let name = p.ident("capture")?;
                Some(Capture { by_copy, name })
            },
        )?;
        self.ts
            .expect(SyntaxKind::T_RBRACKET, "capture list")
            .then(|| captures.iter().cloned().collect())
    }
}
