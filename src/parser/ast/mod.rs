//! Typed syntax tree for Zeek scripts.
//!
//! Nodes live in per-category arenas owned by [`Ast`] and refer to their
//! children through copyable [`Id`] handles. The tree is built once by the
//! parser and never mutated afterwards; dropping the [`Ast`] frees every node
//! at once. Each node records the byte span it was parsed from.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Index;

use crate::Span;

mod decl;
mod expr;
mod precedence;
mod sexpr;
mod stmt;
mod types;
mod walk;

pub use decl::{
    Attr, AttrName, AttrValue, Decl, Deprecation, Directive, EnumItem, FormalArgs, FuncDecl,
    FuncFlavor, FuncParams, Init, InitClass, Initializer, LoadKind, Param, Preproc, TypeSpec,
    VarDecl,
};
pub use expr::{
    AssignOp, BinaryOp, Capture, Constant, EventHdr, Expr, Protocol, TimeUnit, UnaryOp,
};
pub(crate) use decl::AttrArity;
pub(crate) use precedence::{Infix, PREFIX_BP, infix_binding_power, prefix_binding_power};
pub use stmt::{AddDelete, Case, CaseLabel, LoopControl, Stmt, Timeout, TypeCase};
pub use types::{Primitive, Type};
pub use walk::NodeId;

/// Typed index of a node inside an [`Arena`].
pub struct Id<T> {
    raw: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    fn new(index: usize) -> Self {
        Self {
            raw: u32::try_from(index).unwrap_or(u32::MAX),
            _marker: PhantomData,
        }
    }

    /// Position of the node in its arena.
    #[must_use]
    pub fn index(self) -> usize {
        usize::try_from(self.raw).unwrap_or(usize::MAX)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.raw)
    }
}

pub type DeclId = Id<Decl>;
pub type StmtId = Id<Stmt>;
pub type ExprId = Id<Expr>;
pub type TypeId = Id<Type>;

/// A node payload paired with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    pub kind: T,
    pub span: Span,
}

/// Contiguous storage for nodes of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Arena<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T> Arena<T> {
    pub(crate) fn alloc(&mut self, kind: T, span: Span) -> Id<T> {
        let id = Id::new(self.nodes.len());
        self.nodes.push(Node { kind, span });
        id
    }

    #[must_use]
    pub fn get(&self, id: Id<T>) -> Option<&Node<T>> {
        self.nodes.get(id.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Id<T>, &Node<T>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (Id::new(i), node))
    }
}

impl<T> Index<Id<T>> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, id: Id<T>) -> &Self::Output {
        self.get(id)
            .unwrap_or_else(|| panic!("node id {id:?} does not belong to this arena"))
    }
}

/// An identifier with its span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A list with at least one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmpty<T> {
    first: T,
    rest: Vec<T>,
}

impl<T> NonEmpty<T> {
    #[must_use]
    pub fn new(first: T) -> Self {
        Self {
            first,
            rest: Vec::new(),
        }
    }

    /// Build from a vector, returning `None` when it is empty.
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Option<Self> {
        let mut iter = items.into_iter();
        let first = iter.next()?;
        Some(Self {
            first,
            rest: iter.collect(),
        })
    }

    pub fn push(&mut self, item: T) {
        self.rest.push(item);
    }

    #[must_use]
    pub fn first(&self) -> &T {
        &self.first
    }

    #[must_use]
    pub fn last(&self) -> &T {
        self.rest.last().unwrap_or(&self.first)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }
}

impl<'a, T> IntoIterator for &'a NonEmpty<T> {
    type Item = &'a T;
    type IntoIter = std::iter::Chain<std::iter::Once<&'a T>, std::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(&self.first).chain(self.rest.iter())
    }
}

/// Root of a parsed script: declarations followed by statements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFile {
    pub decls: Vec<DeclId>,
    pub stmts: Vec<StmtId>,
    pub span: Span,
}

/// Owner of every node produced by one parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ast {
    pub(crate) decls: Arena<Decl>,
    pub(crate) stmts: Arena<Stmt>,
    pub(crate) exprs: Arena<Expr>,
    pub(crate) types: Arena<Type>,
    pub(crate) source_file: SourceFile,
}

impl Ast {
    #[must_use]
    pub fn source_file(&self) -> &SourceFile {
        &self.source_file
    }

    #[must_use]
    pub fn decls(&self) -> &Arena<Decl> {
        &self.decls
    }

    #[must_use]
    pub fn stmts(&self) -> &Arena<Stmt> {
        &self.stmts
    }

    #[must_use]
    pub fn exprs(&self) -> &Arena<Expr> {
        &self.exprs
    }

    #[must_use]
    pub fn types(&self) -> &Arena<Type> {
        &self.types
    }
}

impl Index<DeclId> for Ast {
    type Output = Node<Decl>;

    fn index(&self, id: DeclId) -> &Self::Output {
        &self.decls[id]
    }
}

impl Index<StmtId> for Ast {
    type Output = Node<Stmt>;

    fn index(&self, id: StmtId) -> &Self::Output {
        &self.stmts[id]
    }
}

impl Index<ExprId> for Ast {
    type Output = Node<Expr>;

    fn index(&self, id: ExprId) -> &Self::Output {
        &self.exprs[id]
    }
}

impl Index<TypeId> for Ast {
    type Output = Node<Type>;

    fn index(&self, id: TypeId) -> &Self::Output {
        &self.types[id]
    }
}
