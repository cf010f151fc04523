//! Statements.
//!
//! A statement that fails to parse is replaced by [`Stmt::Error`] after
//! skipping to the next resynchronisation point, so the enclosing block
//! keeps going.

use log::debug;

use crate::SyntaxKind;

use super::Parser;
use super::ast::{
    AddDelete, AssignOp, Case, CaseLabel, Expr, ExprId, Ident, LoopControl, NonEmpty, Stmt, StmtId, Timeout, TypeCase,
};
use super::list::Trailing;

enum LoopKeys {
    Single(Ident),
    /// `[k1, k2]`
    Destructured(NonEmpty<Ident>),
}

impl Parser<'_> {
    /// Parse one statement, recovering on error.
    pub(super) fn statement(&mut self) -> StmtId {
        let start = self.ts.start();
        if self.skip_unknown_directive() {
            return self.alloc_stmt(Stmt::Error, start);
        }
        if let Some(id) = self.nested(|p| p.stmt_inner(start)) {
            return id;
        }
        let scope = self.recovery_scope();
        self.ts.recover(scope);
        let span = self.ts.span_from(start);
        self.ast.stmts.alloc(Stmt::Error, span)
    }

    fn alloc_stmt(&mut self, stmt: Stmt, start: usize) -> StmtId {
        let span = self.ts.span_from(start);
        self.ast.stmts.alloc(stmt, span)
    }

    /// Consume `;` or fail.
    fn semi(&mut self) -> Option<()> {
        self.ts.expect(SyntaxKind::T_SEMI, "statement").then_some(())
    }

    fn stmt_inner(&mut self, start: usize) -> Option<StmtId> {
        let (kind, _) = self.ts.peek_value();
        let stmt = match kind {
            SyntaxKind::T_LBRACE => return self.body(),
            SyntaxKind::K_PRINT => {
                self.ts.bump();
                let exprs = self.list1(
                    "print",
                    &[SyntaxKind::T_COMMA],
                    SyntaxKind::T_SEMI,
                    Trailing::Rejected,
                    Self::expr,
                )?;
                self.semi()?;
                Stmt::Print(exprs)
            }
            SyntaxKind::K_EVENT => {
                self.ts.bump();
                let hdr = self.event_hdr()?;
                self.semi()?;
                Stmt::EventFire(hdr)
            }
            SyntaxKind::K_IF => self.if_stmt()?,
            SyntaxKind::K_SWITCH => self.switch_stmt()?,
            SyntaxKind::K_FOR => self.for_stmt()?,
            SyntaxKind::K_WHILE => {
                self.ts.bump();
                let cond = self.paren_cond("while")?;
                Stmt::While {
                    cond,
                    body: self.statement(),
                }
            }
            SyntaxKind::K_NEXT | SyntaxKind::K_BREAK | SyntaxKind::K_FALLTHROUGH => {
                self.ts.bump();
                self.semi()?;
                Stmt::LoopControl(match kind {
                    SyntaxKind::K_NEXT => LoopControl::Next,
                    SyntaxKind::K_BREAK => LoopControl::Break,
                    _ => LoopControl::Fallthrough,
                })
            }
            SyntaxKind::K_RETURN if self.ts.nth(1) == SyntaxKind::K_WHEN => {
                self.ts.bump();
                self.when_stmt(true)?
            }
            SyntaxKind::K_RETURN => {
                self.ts.bump();
                let value = if self.ts.at(SyntaxKind::T_SEMI) {
                    None
                } else {
                    Some(self.expr()?)
                };
                self.semi()?;
                Stmt::Return(value)
            }
            SyntaxKind::K_ADD | SyntaxKind::K_DELETE => {
                self.ts.bump();
                let target = self.expr()?;
                self.semi()?;
                let op = if kind == SyntaxKind::K_ADD {
                    AddDelete::Add
                } else {
                    AddDelete::Delete
                };
                Stmt::AddDelete { op, target }
            }
            SyntaxKind::K_LOCAL => {
                self.ts.bump();
                Stmt::LocalDecl(self.var_decl()?)
            }
            SyntaxKind::K_CONST => {
                self.ts.bump();
                Stmt::ConstDecl(self.var_decl()?)
            }
            SyntaxKind::K_WHEN => self.when_stmt(false)?,
            SyntaxKind::T_SEMI => {
                self.ts.bump();
                Stmt::Empty
            }
            SyntaxKind::T_DIRECTIVE => Stmt::Preproc(self.preproc()?),
            _ => self.expr_stmt()?,
        };
        Some(self.alloc_stmt(stmt, start))
    }

    /// `{ stmts }`
    pub(super) fn body(&mut self) -> Option<StmtId> {
        let start = self.ts.start();
        if !self.ts.expect(SyntaxKind::T_LBRACE, "block") {
            return None;
        }
        let stmts = self.braced(|p| p.stmts_until(&[SyntaxKind::T_RBRACE]));
        if !self.ts.expect(SyntaxKind::T_RBRACE, "block") {
            return None;
        }
        Some(self.alloc_stmt(Stmt::Block(stmts), start))
    }

    /// Statements up to one of `stops` or end of input.
    fn stmts_until(&mut self, stops: &[SyntaxKind]) -> Vec<StmtId> {
        let mut stmts = Vec::new();
        loop {
            let kind = self.ts.kind();
            if kind == SyntaxKind::T_EOF || stops.contains(&kind) {
                break;
            }
            stmts.push(self.statement());
        }
        stmts
    }

    fn paren_cond(&mut self, label: &'static str) -> Option<ExprId> {
        if !self.ts.expect(SyntaxKind::T_LPAREN, label) {
            return None;
        }
        let cond = self.unrestricted(Self::expr)?;
        self.ts.expect(SyntaxKind::T_RPAREN, label).then_some(cond)
    }

    fn if_stmt(&mut self) -> Option<Stmt> {
        self.ts.bump();
        let cond = self.paren_cond("if")?;
        let then = self.statement();
        let otherwise = self.ts.eat(SyntaxKind::K_ELSE).then(|| self.statement());
        Some(Stmt::If {
            cond,
            then,
            otherwise,
        })
    }

    fn switch_stmt(&mut self) -> Option<Stmt> {
        self.ts.bump();
        let subject = self.expr()?;
        if !self.ts.expect(SyntaxKind::T_LBRACE, "switch") {
            return None;
        }
        let cases = self.braced(|p| {
            let mut cases = Vec::new();
            loop {
                match p.ts.kind() {
                    SyntaxKind::T_RBRACE | SyntaxKind::T_EOF => break,
                    SyntaxKind::K_CASE | SyntaxKind::K_DEFAULT => {
                        if let Some(case) = p.case() {
                            cases.push(case);
                        } else {
                            p.skip_to_case();
                        }
                    }
                    _ => {
                        p.ts.error_expected(&[SyntaxKind::K_CASE, SyntaxKind::K_DEFAULT], "switch");
                        p.skip_to_case();
                    }
                }
            }
            cases
        });
        self.ts
            .expect(SyntaxKind::T_RBRACE, "switch")
            .then_some(Stmt::Switch { subject, cases })
    }

    /// Skip a malformed case up to the next `case`, `default` or the
    /// closing brace of the switch.
    fn skip_to_case(&mut self) {
        let start = self.ts.start();
        let mut depth = 0usize;
        loop {
            match self.ts.kind() {
                SyntaxKind::T_EOF => break,
                SyntaxKind::K_CASE | SyntaxKind::K_DEFAULT | SyntaxKind::T_RBRACE if depth == 0 => {
                    break;
                }
                SyntaxKind::T_LBRACE => depth += 1,
                SyntaxKind::T_RBRACE => depth -= 1,
                _ => {}
            }
            self.ts.bump();
        }
        debug!("skipped malformed case {:?}", self.ts.span_from(start));
    }

    fn case(&mut self) -> Option<Case> {
        let start = self.ts.start();
        let label = if self.ts.eat(SyntaxKind::K_DEFAULT) {
            CaseLabel::Default
        } else {
            self.ts.bump();
            if self.ts.at(SyntaxKind::K_TYPE) {
                CaseLabel::Types(self.type_cases()?)
            } else {
                CaseLabel::Exprs(self.list1(
                    "case",
                    &[SyntaxKind::T_COMMA],
                    SyntaxKind::T_COLON,
                    Trailing::Rejected,
                    Self::expr,
                )?)
            }
        };
        if !self.ts.expect(SyntaxKind::T_COLON, "case") {
            return None;
        }
        let body = self.stmts_until(&[
            SyntaxKind::K_CASE,
            SyntaxKind::K_DEFAULT,
            SyntaxKind::T_RBRACE,
        ]);
        Some(Case {
            label,
            body,
            span: self.ts.span_from(start),
        })
    }

    /// `type T [as id] [,] type U ...`
    fn type_cases(&mut self) -> Option<NonEmpty<TypeCase>> {
        let mut cases = Vec::new();
        while self.ts.eat(SyntaxKind::K_TYPE) {
            let ty = self.ty()?;
            let binding = if self.ts.eat(SyntaxKind::K_AS) {
                Some(self.ident("type case")?)
            } else {
                None
            };
            cases.push(TypeCase { ty, binding });
            self.ts.eat(SyntaxKind::T_COMMA);
        }
        NonEmpty::from_vec(cases)
    }

    fn for_stmt(&mut self) -> Option<Stmt> {
        self.ts.bump();
        if !self.ts.expect(SyntaxKind::T_LPAREN, "for") {
            return None;
        }
        let keys = if self.ts.eat(SyntaxKind::T_LBRACKET) {
            let keys = self.list1(
                "for",
                &[SyntaxKind::T_COMMA],
                SyntaxKind::T_RBRACKET,
                Trailing::Rejected,
                |p| p.ident("loop variable"),
            )?;
            if !self.ts.expect(SyntaxKind::T_RBRACKET, "for") {
                return None;
            }
            LoopKeys::Destructured(keys)
        } else {
            LoopKeys::Single(self.ident("loop variable")?)
        };
        let value = if self.ts.eat(SyntaxKind::T_COMMA) {
            Some(self.ident("loop variable")?)
        } else {
            None
        };
        if !self.ts.expect(SyntaxKind::K_IN, "for") {
            return None;
        }
        let iterable = self.unrestricted(Self::expr)?;
        if !self.ts.expect(SyntaxKind::T_RPAREN, "for") {
            return None;
        }
        let body = self.statement();
        Some(match keys {
            LoopKeys::Single(key) => Stmt::ForIn {
                key,
                value,
                iterable,
                body,
            },
            LoopKeys::Destructured(keys) => Stmt::ForInDestructured {
                keys,
                value,
                iterable,
                body,
            },
        })
    }

    /// `[return] when [captures] (cond) stmt [timeout delay { stmts }]`,
    /// positioned at `when`.
    fn when_stmt(&mut self, is_return: bool) -> Option<Stmt> {
        self.ts.bump();
        let captures = if self.ts.at(SyntaxKind::T_LBRACKET) {
            self.captures()?
        } else {
            Vec::new()
        };
        let cond = self.paren_cond("when")?;
        let body = self.statement();
        let timeout = if self.ts.eat(SyntaxKind::K_TIMEOUT) {
            let delay = self.expr()?;
            if !self.ts.expect(SyntaxKind::T_LBRACE, "timeout") {
                return None;
            }
            let stmts = self.braced(|p| p.stmts_until(&[SyntaxKind::T_RBRACE]));
            if !self.ts.expect(SyntaxKind::T_RBRACE, "timeout") {
                return None;
            }
            Some(Timeout { delay, body: stmts })
        } else {
            None
        };
        Some(Stmt::When {
            is_return,
            captures,
            cond,
            body,
            timeout,
        })
    }

    /// Expression statement, or the slice assignment `t[lo:hi] = v;`.
    fn expr_stmt(&mut self) -> Option<Stmt> {
        let expr = self.expr()?;
        if let Expr::Assign {
            op: AssignOp::Assign,
            target,
            value,
        } = self.ast[expr].kind
        {
            if let Expr::Slice { base, low, high } = self.ast[target].kind {
                self.semi()?;
                return Some(Stmt::IndexAssign {
                    target: base,
                    low,
                    high,
                    value,
                });
            }
        }
        self.ts.eat(SyntaxKind::T_SEMI);
        Some(Stmt::Expr(expr))
    }
}
