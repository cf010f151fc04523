//! Expression nodes.

use super::{ExprId, FuncParams, Ident, NonEmpty, StmtId, TypeId};
use super::decl::Attr;

/// Constant literal values.
///
/// Numbers keep their source text; no range checks are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    Bool(bool),
    Integer(String),
    Float(String),
    Hex(String),
    Port { number: String, protocol: Protocol },
    Interval { amount: String, unit: TimeUnit },
    /// String contents without the surrounding quotes, escapes untouched.
    String(String),
    Ipv4 { addr: String, prefix: Option<u8> },
    Ipv6 { addr: String, prefix: Option<u8> },
    Hostname(String),
}

/// Transport protocol of a port literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
    Icmp,
    Unknown,
}

impl Protocol {
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "tcp" => Self::Tcp,
            "udp" => Self::Udp,
            "icmp" => Self::Icmp,
            "unknown" => Self::Unknown,
            _ => return None,
        })
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
            Self::Icmp => "icmp",
            Self::Unknown => "unknown",
        }
    }
}

/// Unit suffix of an interval literal. A plural `s` is accepted and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Day,
    Hr,
    Min,
    Sec,
    Msec,
    Usec,
}

impl TimeUnit {
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word.strip_suffix('s').unwrap_or(word) {
            "day" => Self::Day,
            "hr" => Self::Hr,
            "min" => Self::Min,
            "sec" => Self::Sec,
            "msec" => Self::Msec,
            "usec" => Self::Usec,
            _ => return None,
        })
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Hr => "hr",
            Self::Min => "min",
            Self::Sec => "sec",
            Self::Msec => "msec",
            Self::Usec => "usec",
        }
    }
}

/// Prefix operators of tier 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    BitNot,
    Incr,
    Decr,
}

impl UnaryOp {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::Incr => "++",
            Self::Decr => "--",
        }
    }
}

/// Binary operators of tiers 4 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Or,
    In,
    NotIn,
}

impl BinaryOp {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitOr => "|",
            Self::And => "&&",
            Self::Or => "||",
            Self::In => "in",
            Self::NotIn => "!in",
        }
    }
}

/// Assignment operators of tier 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
}

impl AssignOp {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
        }
    }
}

/// A variable captured by a lambda or `when` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub by_copy: bool,
    pub name: Ident,
}

/// `name(args)` as used by `event` statements and `schedule`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventHdr {
    pub name: Ident,
    pub args: Vec<ExprId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Name(Ident),
    Constant(Constant),
    Pattern {
        regex: String,
        case_insensitive: bool,
    },
    Paren(ExprId),
    Index {
        base: ExprId,
        indices: Vec<ExprId>,
    },
    Slice {
        base: ExprId,
        low: Option<ExprId>,
        high: Option<ExprId>,
    },
    Field {
        base: ExprId,
        field: Ident,
    },
    HasField {
        base: ExprId,
        field: Ident,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    /// `|x|`
    Cardinality(ExprId),
    Cast {
        expr: ExprId,
        ty: TypeId,
    },
    TypeTest {
        expr: ExprId,
        ty: TypeId,
    },
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    Ternary {
        cond: ExprId,
        then: ExprId,
        otherwise: ExprId,
    },
    Assign {
        op: AssignOp,
        target: ExprId,
        value: ExprId,
    },
    /// `$field = value`; the lambda-valued form stores an [`Expr::Lambda`].
    FieldAssign {
        field: Ident,
        value: ExprId,
    },
    ListLiteral(Vec<ExprId>),
    RecordCtor(Vec<ExprId>),
    TableCtor {
        args: Vec<ExprId>,
        attrs: Option<NonEmpty<Attr>>,
    },
    SetCtor {
        args: Vec<ExprId>,
        attrs: Option<NonEmpty<Attr>>,
    },
    VectorCtor(Vec<ExprId>),
    Call {
        callee: ExprId,
        args: Vec<ExprId>,
    },
    LocalBinding {
        name: Ident,
        value: ExprId,
    },
    Copy(ExprId),
    Hook(ExprId),
    Schedule {
        delay: ExprId,
        event: EventHdr,
    },
    Lambda {
        captures: Vec<Capture>,
        params: FuncParams,
        body: StmtId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("sec", Some(TimeUnit::Sec))]
    #[case("secs", Some(TimeUnit::Sec))]
    #[case("msec", Some(TimeUnit::Msec))]
    #[case("usecs", Some(TimeUnit::Usec))]
    #[case("days", Some(TimeUnit::Day))]
    #[case("s", None)]
    #[case("week", None)]
    fn time_units(#[case] word: &str, #[case] expected: Option<TimeUnit>) {
        assert_eq!(TimeUnit::from_word(word), expected);
    }
}
