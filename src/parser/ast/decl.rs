//! Declarations, attributes and preprocessor directives.

use phf::phf_map;

use super::{DeclId, ExprId, Ident, NonEmpty, StmtId, TypeId};
use crate::Span;

/// Names of the `&attribute` vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrName {
    AddFunc,
    Backend,
    BrokerStore,
    BrokerStoreAllowComplexType,
    CreateExpire,
    Default,
    DelFunc,
    Deprecated,
    ErrorHandler,
    ExpireFunc,
    IsAssigned,
    IsUsed,
    Log,
    OnChange,
    Optional,
    Priority,
    RawOutput,
    ReadExpire,
    Redef,
    TypeColumn,
    WriteExpire,
}

static ATTRIBUTES: phf::Map<&'static str, AttrName> = phf_map! {
    "add_func" => AttrName::AddFunc,
    "backend" => AttrName::Backend,
    "broker_store" => AttrName::BrokerStore,
    "broker_store_allow_complex_type" => AttrName::BrokerStoreAllowComplexType,
    "create_expire" => AttrName::CreateExpire,
    "default" => AttrName::Default,
    "del_func" => AttrName::DelFunc,
    "deprecated" => AttrName::Deprecated,
    "error_handler" => AttrName::ErrorHandler,
    "expire_func" => AttrName::ExpireFunc,
    "is_assigned" => AttrName::IsAssigned,
    "is_used" => AttrName::IsUsed,
    "log" => AttrName::Log,
    "on_change" => AttrName::OnChange,
    "optional" => AttrName::Optional,
    "priority" => AttrName::Priority,
    "raw_output" => AttrName::RawOutput,
    "read_expire" => AttrName::ReadExpire,
    "redef" => AttrName::Redef,
    "type_column" => AttrName::TypeColumn,
    "write_expire" => AttrName::WriteExpire,
};

/// How an attribute takes its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttrArity {
    Bare,
    Expr,
    /// `&deprecated` with an optional `= "message"`.
    OptionalString,
}

impl AttrName {
    /// Look up an attribute by its name without the leading `&`.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        ATTRIBUTES.get(word).copied()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        ATTRIBUTES
            .entries()
            .find_map(|(name, attr)| (*attr == self).then_some(*name))
            .unwrap_or_default()
    }

    pub(crate) fn arity(self) -> AttrArity {
        match self {
            Self::Deprecated => AttrArity::OptionalString,
            Self::BrokerStoreAllowComplexType
            | Self::ErrorHandler
            | Self::IsAssigned
            | Self::IsUsed
            | Self::Log
            | Self::Optional
            | Self::RawOutput
            | Self::Redef => AttrArity::Bare,
            _ => AttrArity::Expr,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Expr(ExprId),
    /// Message of `&deprecated = "..."`, without quotes.
    Message(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: AttrName,
    pub value: Option<AttrValue>,
    pub span: Span,
}

/// `&deprecated [= "message"]` on an enum item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deprecation {
    pub message: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumItem {
    pub name: Ident,
    pub value: Option<ExprId>,
    pub deprecated: Option<Deprecation>,
}

/// `name: type [attrs]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Ident,
    pub ty: TypeId,
    pub attrs: Option<NonEmpty<Attr>>,
}

/// One or more formal arguments.
pub type FormalArgs = NonEmpty<Param>;

/// `(args) [: ret]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncParams {
    pub args: Option<FormalArgs>,
    pub ret: Option<TypeId>,
}

/// Record field `name: type [attrs];`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: Ident,
    pub ty: TypeId,
    pub attrs: Option<NonEmpty<Attr>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitClass {
    Assign,
    Add,
    Remove,
}

impl InitClass {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Add => "+=",
            Self::Remove => "-=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Init {
    /// `{ e, ... }`, possibly empty.
    Braced(Vec<ExprId>),
    Expr(ExprId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initializer {
    pub class: Option<InitClass>,
    pub value: Init,
}

/// Shared shape of `global`, `option`, `const`, `redef` and `local`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub name: Ident,
    pub ty: Option<TypeId>,
    pub init: Option<Initializer>,
    pub attrs: Option<NonEmpty<Attr>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuncFlavor {
    Function,
    Hook,
    Event,
}

impl FuncFlavor {
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Hook => "hook",
            Self::Event => "event",
        }
    }
}

/// Function, hook or event handler definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub flavor: FuncFlavor,
    /// `redef event ...`
    pub is_redef: bool,
    pub name: Ident,
    pub params: FuncParams,
    pub attrs: Option<NonEmpty<Attr>>,
    /// Directives between the header and the body.
    pub preprocs: Vec<DeclId>,
    pub body: StmtId,
}

/// Recognised `@directive` words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Deprecated,
    Load,
    LoadSigs,
    LoadPlugin,
    Unload,
    Prefixes,
    If,
    Ifdef,
    Ifndef,
    Else,
    Endif,
}

static DIRECTIVES: phf::Map<&'static str, Directive> = phf_map! {
    "@deprecated" => Directive::Deprecated,
    "@load" => Directive::Load,
    "@load-sigs" => Directive::LoadSigs,
    "@load-plugin" => Directive::LoadPlugin,
    "@unload" => Directive::Unload,
    "@prefixes" => Directive::Prefixes,
    "@if" => Directive::If,
    "@ifdef" => Directive::Ifdef,
    "@ifndef" => Directive::Ifndef,
    "@else" => Directive::Else,
    "@endif" => Directive::Endif,
};

impl Directive {
    /// Look up a directive by its spelling including the `@`.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        DIRECTIVES.get(word).copied()
    }

    /// Whether a raw file name follows the directive.
    #[must_use]
    pub fn takes_file(self) -> bool {
        self.as_load().is_some()
    }

    pub(crate) fn as_load(self) -> Option<LoadKind> {
        Some(match self {
            Self::Load => LoadKind::Load,
            Self::LoadSigs => LoadKind::LoadSigs,
            Self::LoadPlugin => LoadKind::LoadPlugin,
            Self::Unload => LoadKind::Unload,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadKind {
    Load,
    LoadSigs,
    LoadPlugin,
    Unload,
}

impl LoadKind {
    #[must_use]
    pub fn directive(self) -> &'static str {
        match self {
            Self::Load => "@load",
            Self::LoadSigs => "@load-sigs",
            Self::LoadPlugin => "@load-plugin",
            Self::Unload => "@unload",
        }
    }
}

/// A preprocessor line. Script loading is recorded, never followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preproc {
    Deprecated(Option<String>),
    Load { kind: LoadKind, file: String },
    /// `@prefixes = id` or `@prefixes += id`
    Prefixes { append: bool, prefix: Ident },
    If(ExprId),
    Ifdef(Ident),
    Ifndef(Ident),
    Else,
    Endif,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    /// Text skipped while recovering from a syntax error.
    Error,
    Module(Ident),
    Export(Vec<DeclId>),
    Global(VarDecl),
    Option(VarDecl),
    Const(VarDecl),
    Redef(VarDecl),
    RedefEnum {
        name: Ident,
        items: NonEmpty<EnumItem>,
    },
    RedefRecord {
        name: Ident,
        fields: Vec<TypeSpec>,
        attrs: Option<NonEmpty<Attr>>,
    },
    TypeDef {
        name: Ident,
        ty: TypeId,
        attrs: Option<NonEmpty<Attr>>,
    },
    FuncHdr(FuncDecl),
    Preproc(Preproc),
}
