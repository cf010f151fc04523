//! Generic traversal over the four node categories.

use super::{
    Ast, Attr, AttrValue, CaseLabel, Decl, DeclId, Expr, ExprId, FormalArgs, FuncParams, Init,
    NonEmpty, Preproc, Stmt, StmtId, Type, TypeId, TypeSpec, VarDecl,
};
use crate::Span;

/// Handle to a node of any category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    Decl(DeclId),
    Stmt(StmtId),
    Expr(ExprId),
    Type(TypeId),
}

impl Ast {
    /// Source span of `node`.
    #[must_use]
    pub fn span(&self, node: NodeId) -> Span {
        match node {
            NodeId::Decl(id) => self[id].span.clone(),
            NodeId::Stmt(id) => self[id].span.clone(),
            NodeId::Expr(id) => self[id].span.clone(),
            NodeId::Type(id) => self[id].span.clone(),
        }
    }

    /// Direct children of `node`, in no particular order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Children::default();
        match node {
            NodeId::Decl(id) => out.decl(&self[id].kind),
            NodeId::Stmt(id) => out.stmt(&self[id].kind),
            NodeId::Expr(id) => out.expr(&self[id].kind),
            NodeId::Type(id) => out.ty(&self[id].kind),
        }
        out.nodes
    }

    /// Every node reachable from the source file root in pre-order, paired
    /// with its depth below the root.
    ///
    /// Nodes allocated during a parse attempt that was later abandoned are
    /// not reachable and so are not listed.
    #[must_use]
    pub fn descendants(&self) -> Vec<(NodeId, usize)> {
        let root = &self.source_file;
        let mut stack: Vec<(NodeId, usize)> = root
            .stmts
            .iter()
            .rev()
            .map(|id| (NodeId::Stmt(*id), 0))
            .chain(root.decls.iter().rev().map(|id| (NodeId::Decl(*id), 0)))
            .collect();
        let mut out = Vec::new();
        while let Some((node, depth)) = stack.pop() {
            out.push((node, depth));
            stack.extend(
                self.children(node)
                    .into_iter()
                    .rev()
                    .map(|child| (child, depth + 1)),
            );
        }
        out
    }
}

#[derive(Default)]
struct Children {
    nodes: Vec<NodeId>,
}

impl Children {
    fn e(&mut self, id: ExprId) {
        self.nodes.push(NodeId::Expr(id));
    }

    fn s(&mut self, id: StmtId) {
        self.nodes.push(NodeId::Stmt(id));
    }

    fn t(&mut self, id: TypeId) {
        self.nodes.push(NodeId::Type(id));
    }

    fn d(&mut self, id: DeclId) {
        self.nodes.push(NodeId::Decl(id));
    }

    fn exprs<'a>(&mut self, ids: impl IntoIterator<Item = &'a ExprId>) {
        for id in ids {
            self.e(*id);
        }
    }

    fn stmts<'a>(&mut self, ids: impl IntoIterator<Item = &'a StmtId>) {
        for id in ids {
            self.s(*id);
        }
    }

    fn attrs(&mut self, attrs: Option<&NonEmpty<Attr>>) {
        for attr in attrs.into_iter().flatten() {
            if let Some(AttrValue::Expr(id)) = attr.value {
                self.e(id);
            }
        }
    }

    fn args(&mut self, args: Option<&FormalArgs>) {
        for param in args.into_iter().flatten() {
            self.t(param.ty);
            self.attrs(param.attrs.as_ref());
        }
    }

    fn params(&mut self, params: &FuncParams) {
        self.args(params.args.as_ref());
        if let Some(ret) = params.ret {
            self.t(ret);
        }
    }

    fn fields(&mut self, fields: &[TypeSpec]) {
        for field in fields {
            self.t(field.ty);
            self.attrs(field.attrs.as_ref());
        }
    }

    fn var(&mut self, var: &VarDecl) {
        if let Some(ty) = var.ty {
            self.t(ty);
        }
        match var.init.as_ref().map(|init| &init.value) {
            Some(Init::Braced(items)) => self.exprs(items),
            Some(Init::Expr(id)) => self.e(*id),
            None => {}
        }
        self.attrs(var.attrs.as_ref());
    }

    fn preproc(&mut self, preproc: &Preproc) {
        if let Preproc::If(cond) = preproc {
            self.e(*cond);
        }
    }

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Error | Decl::Module(_) => {}
            Decl::Export(decls) => {
                for id in decls {
                    self.d(*id);
                }
            }
            Decl::Global(var) | Decl::Option(var) | Decl::Const(var) | Decl::Redef(var) => {
                self.var(var);
            }
            Decl::RedefEnum { items, .. } => {
                for item in items {
                    if let Some(value) = item.value {
                        self.e(value);
                    }
                }
            }
            Decl::RedefRecord { fields, attrs, .. } => {
                self.fields(fields);
                self.attrs(attrs.as_ref());
            }
            Decl::TypeDef { ty, attrs, .. } => {
                self.t(*ty);
                self.attrs(attrs.as_ref());
            }
            Decl::FuncHdr(func) => {
                self.params(&func.params);
                self.attrs(func.attrs.as_ref());
                for id in &func.preprocs {
                    self.d(*id);
                }
                self.s(func.body);
            }
            Decl::Preproc(preproc) => self.preproc(preproc),
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Error | Stmt::LoopControl(_) | Stmt::Empty | Stmt::Return(None) => {}
            Stmt::Block(stmts) => self.stmts(stmts),
            Stmt::Print(exprs) => self.exprs(exprs),
            Stmt::EventFire(hdr) => self.exprs(&hdr.args),
            Stmt::If {
                cond,
                then,
                otherwise,
            } => {
                self.e(*cond);
                self.s(*then);
                self.stmts(otherwise);
            }
            Stmt::Switch { subject, cases } => {
                self.e(*subject);
                for case in cases {
                    match &case.label {
                        CaseLabel::Exprs(exprs) => self.exprs(exprs),
                        CaseLabel::Types(types) => {
                            for case in types {
                                self.t(case.ty);
                            }
                        }
                        CaseLabel::Default => {}
                    }
                    self.stmts(&case.body);
                }
            }
            Stmt::ForIn { iterable, body, .. } | Stmt::ForInDestructured { iterable, body, .. } => {
                self.e(*iterable);
                self.s(*body);
            }
            Stmt::While { cond, body } => {
                self.e(*cond);
                self.s(*body);
            }
            Stmt::Return(Some(expr)) | Stmt::AddDelete { target: expr, .. } | Stmt::Expr(expr) => {
                self.e(*expr);
            }
            Stmt::LocalDecl(var) | Stmt::ConstDecl(var) => self.var(var),
            Stmt::When {
                cond,
                body,
                timeout,
                ..
            } => {
                self.e(*cond);
                self.s(*body);
                if let Some(timeout) = timeout {
                    self.e(timeout.delay);
                    self.stmts(&timeout.body);
                }
            }
            Stmt::IndexAssign {
                target,
                low,
                high,
                value,
            } => {
                self.e(*target);
                self.exprs(low);
                self.exprs(high);
                self.e(*value);
            }
            Stmt::Preproc(preproc) => self.preproc(preproc),
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Name(_) | Expr::Constant(_) | Expr::Pattern { .. } => {}
            Expr::Paren(inner)
            | Expr::Cardinality(inner)
            | Expr::Copy(inner)
            | Expr::Hook(inner)
            | Expr::Unary { operand: inner, .. }
            | Expr::Field { base: inner, .. }
            | Expr::HasField { base: inner, .. }
            | Expr::FieldAssign { value: inner, .. }
            | Expr::LocalBinding { value: inner, .. } => self.e(*inner),
            Expr::Index { base, indices } => {
                self.e(*base);
                self.exprs(indices);
            }
            Expr::Slice { base, low, high } => {
                self.e(*base);
                self.exprs(low);
                self.exprs(high);
            }
            Expr::Cast { expr, ty } | Expr::TypeTest { expr, ty } => {
                self.e(*expr);
                self.t(*ty);
            }
            Expr::Binary { lhs, rhs, .. } => {
                self.e(*lhs);
                self.e(*rhs);
            }
            Expr::Ternary {
                cond,
                then,
                otherwise,
            } => {
                self.e(*cond);
                self.e(*then);
                self.e(*otherwise);
            }
            Expr::Assign { target, value, .. } => {
                self.e(*target);
                self.e(*value);
            }
            Expr::ListLiteral(items) | Expr::RecordCtor(items) | Expr::VectorCtor(items) => {
                self.exprs(items);
            }
            Expr::TableCtor { args, attrs } | Expr::SetCtor { args, attrs } => {
                self.exprs(args);
                self.attrs(attrs.as_ref());
            }
            Expr::Call { callee, args } => {
                self.e(*callee);
                self.exprs(args);
            }
            Expr::Schedule { delay, event } => {
                self.e(*delay);
                self.exprs(&event.args);
            }
            Expr::Lambda { params, body, .. } => {
                self.params(params);
                self.s(*body);
            }
        }
    }

    fn ty(&mut self, ty: &Type) {
        match ty {
            Type::Primitive(_)
            | Type::Opaque(_)
            | Type::Named(_)
            | Type::List(None)
            | Type::File(None) => {}
            Type::Table { keys, value } => {
                for key in keys {
                    self.t(*key);
                }
                self.t(*value);
            }
            Type::Set(types) | Type::Union(types) => {
                for id in types {
                    self.t(*id);
                }
            }
            Type::Record(fields) => self.fields(fields),
            Type::Enum(items) => {
                for item in items {
                    if let Some(value) = item.value {
                        self.e(value);
                    }
                }
            }
            Type::List(Some(inner)) | Type::Vector(inner) | Type::File(Some(inner)) => {
                self.t(*inner);
            }
            Type::Function(params) => self.params(params),
            Type::Event(args) | Type::Hook(args) => self.args(args.as_ref()),
        }
    }
}
