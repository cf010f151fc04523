//! Statement nodes.

use super::{Capture, EventHdr, ExprId, Ident, NonEmpty, Preproc, StmtId, TypeId, VarDecl};
use crate::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopControl {
    Next,
    Break,
    Fallthrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddDelete {
    Add,
    Delete,
}

/// `type T [as id]` inside a type-switch case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCase {
    pub ty: TypeId,
    pub binding: Option<Ident>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseLabel {
    Exprs(NonEmpty<ExprId>),
    Types(NonEmpty<TypeCase>),
    Default,
}

/// One arm of a `switch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub label: CaseLabel,
    pub body: Vec<StmtId>,
    pub span: Span,
}

/// `timeout delay { stmts }` clause of a `when`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeout {
    pub delay: ExprId,
    pub body: Vec<StmtId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Text skipped while recovering from a syntax error.
    Error,
    Block(Vec<StmtId>),
    Print(NonEmpty<ExprId>),
    EventFire(EventHdr),
    If {
        cond: ExprId,
        then: StmtId,
        otherwise: Option<StmtId>,
    },
    Switch {
        subject: ExprId,
        cases: Vec<Case>,
    },
    ForIn {
        key: Ident,
        value: Option<Ident>,
        iterable: ExprId,
        body: StmtId,
    },
    /// `for ([k1, k2], v in t) body`
    ForInDestructured {
        keys: NonEmpty<Ident>,
        value: Option<Ident>,
        iterable: ExprId,
        body: StmtId,
    },
    While {
        cond: ExprId,
        body: StmtId,
    },
    LoopControl(LoopControl),
    Return(Option<ExprId>),
    AddDelete {
        op: AddDelete,
        target: ExprId,
    },
    LocalDecl(VarDecl),
    ConstDecl(VarDecl),
    When {
        is_return: bool,
        captures: Vec<Capture>,
        cond: ExprId,
        body: StmtId,
        timeout: Option<Timeout>,
    },
    /// `target[low:high] = value;`
    IndexAssign {
        target: ExprId,
        low: Option<ExprId>,
        high: Option<ExprId>,
        value: ExprId,
    },
    Expr(ExprId),
    /// A lone `;`.
    Empty,
    Preproc(Preproc),
}
