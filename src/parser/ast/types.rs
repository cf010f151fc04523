//! Type expressions.

use super::{EnumItem, FormalArgs, FuncParams, Ident, NonEmpty, TypeId, TypeSpec};

/// Built-in scalar types. Their names are contextual: outside type position
/// they are ordinary identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Addr,
    Any,
    Bool,
    Count,
    Double,
    Int,
    Interval,
    String,
    Subnet,
    Pattern,
    Port,
    Time,
    Timer,
}

impl Primitive {
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "addr" => Self::Addr,
            "any" => Self::Any,
            "bool" => Self::Bool,
            "count" => Self::Count,
            "double" => Self::Double,
            "int" => Self::Int,
            "interval" => Self::Interval,
            "string" => Self::String,
            "subnet" => Self::Subnet,
            "pattern" => Self::Pattern,
            "port" => Self::Port,
            "time" => Self::Time,
            "timer" => Self::Timer,
            _ => return None,
        })
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Addr => "addr",
            Self::Any => "any",
            Self::Bool => "bool",
            Self::Count => "count",
            Self::Double => "double",
            Self::Int => "int",
            Self::Interval => "interval",
            Self::String => "string",
            Self::Subnet => "subnet",
            Self::Pattern => "pattern",
            Self::Port => "port",
            Self::Time => "time",
            Self::Timer => "timer",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Primitive(Primitive),
    /// `table[K, ...] of V`
    Table {
        keys: NonEmpty<TypeId>,
        value: TypeId,
    },
    /// `set[K, ...]`
    Set(NonEmpty<TypeId>),
    Record(Vec<TypeSpec>),
    Union(NonEmpty<TypeId>),
    Enum(NonEmpty<EnumItem>),
    /// `list` or `list of T`
    List(Option<TypeId>),
    Vector(TypeId),
    Function(FuncParams),
    Event(Option<FormalArgs>),
    Hook(Option<FormalArgs>),
    /// `file` or `file of T`
    File(Option<TypeId>),
    Opaque(Ident),
    /// Reference to a user-defined type.
    Named(Ident),
}
