//! `rowan` integration and Zeek syntax kinds.
//!
//! This module defines the `SyntaxKind` enum covering all tokens and
//! node categories produced while parsing Zeek scripts. The enumeration is
//! used by `rowan` to tag elements of the lossless syntax tree, by the lexer
//! to classify tokens and by diagnostics to name what was found or expected.
//! The `ZeekLanguage` newtype implements `rowan::Language` using conversions
//! provided by `num_derive`.

use std::fmt;

use num_derive::{FromPrimitive as FromPrimitiveDerive, ToPrimitive as ToPrimitiveDerive};
use num_traits::{FromPrimitive, ToPrimitive};
use rowan::Language as RowanLanguage;
use rowan::SyntaxKind as RowanSyntaxKind;

/// Every possible token or node in the Zeek syntax tree.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitiveDerive, ToPrimitiveDerive,
)]
#[repr(u16)]
#[expect(non_camel_case_types, reason = "kinds use the T_, K_ and N_ prefix convention")]
pub enum SyntaxKind {
    // Trivia
    T_WHITESPACE,
    T_COMMENT,
    T_ZEEKYGEN,
    // Literals and words
    T_IDENT,
    T_INTEGER,
    T_FLOAT,
    T_HEX,
    T_PORT,
    T_INTERVAL,
    T_STRING,
    T_PATTERN,
    T_IPV4,
    T_IPV6,
    T_HOSTNAME,
    T_FILE,
    T_ATTR,
    T_DIRECTIVE,
    // Punctuation
    T_LPAREN,
    T_RPAREN,
    T_LBRACE,
    T_RBRACE,
    T_LBRACKET,
    T_RBRACKET,
    T_SEMI,
    T_COMMA,
    T_COLON,
    T_DOLLAR,
    T_HAS_FIELD,
    T_QUESTION,
    T_EQ,
    T_PLUS_EQ,
    T_MINUS_EQ,
    T_PLUS,
    T_MINUS,
    T_STAR,
    T_SLASH,
    T_PERCENT,
    T_PLUSPLUS,
    T_MINUSMINUS,
    T_BANG,
    T_TILDE,
    T_LT,
    T_LTE,
    T_GT,
    T_GTE,
    T_EQEQ,
    T_NEQ,
    T_AMP,
    T_CARET,
    T_PIPE,
    T_AMPAMP,
    T_PIPEPIPE,
    T_EOF,
    // Keywords
    K_ADD,
    K_AS,
    K_BREAK,
    K_CASE,
    K_CONST,
    K_COPY,
    K_DEFAULT,
    K_DELETE,
    K_ELSE,
    K_ENUM,
    K_EVENT,
    K_EXPORT,
    K_F,
    K_FALLTHROUGH,
    K_FILE,
    K_FOR,
    K_FUNCTION,
    K_GLOBAL,
    K_HOOK,
    K_IF,
    K_IN,
    K_IS,
    K_LIST,
    K_LOCAL,
    K_MODULE,
    K_NEXT,
    K_OF,
    K_OPAQUE,
    K_OPTION,
    K_PRINT,
    K_RECORD,
    K_REDEF,
    K_RETURN,
    K_SCHEDULE,
    K_SET,
    K_SWITCH,
    K_T,
    K_TABLE,
    K_TIMEOUT,
    K_TYPE,
    K_UNION,
    K_VECTOR,
    K_WHEN,
    K_WHILE,
    // Nodes
    N_SOURCE_FILE,
    N_DECL,
    N_STMT,
    N_EXPR,
    N_TYPE,
    // Special
    N_ERROR,
}

impl SyntaxKind {
    /// Whitespace and both comment kinds.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::T_WHITESPACE | Self::T_COMMENT | Self::T_ZEEKYGEN)
    }

    /// Reserved words recognised by the keyword table.
    #[must_use]
    pub fn is_keyword(self) -> bool {
        (Self::K_ADD..=Self::K_WHILE).contains(&self)
    }

    /// Tokens that form a constant on their own.
    #[must_use]
    pub fn is_constant(self) -> bool {
        matches!(
            self,
            Self::T_INTEGER
                | Self::T_FLOAT
                | Self::T_HEX
                | Self::T_PORT
                | Self::T_INTERVAL
                | Self::T_STRING
                | Self::T_IPV4
                | Self::T_IPV6
                | Self::T_HOSTNAME
                | Self::K_T
                | Self::K_F
        )
    }

    /// Whether an expression value (rather than an operator) may follow a
    /// token of this kind.
    ///
    /// Values end with identifiers, constants and closing delimiters; after
    /// anything else a `/` opens a pattern literal. The parser knows the
    /// exact position kind and does not rely on this; the standalone
    /// tokenizer does.
    #[must_use]
    pub fn expects_value_after(self) -> bool {
        !(self.is_constant()
            || matches!(
                self,
                Self::T_IDENT | Self::T_PATTERN | Self::T_RPAREN | Self::T_RBRACKET
            ))
    }

    /// Human readable rendering used by diagnostics.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::T_WHITESPACE => "whitespace",
            Self::T_COMMENT => "comment",
            Self::T_ZEEKYGEN => "zeekygen comment",
            Self::T_IDENT => "identifier",
            Self::T_INTEGER => "integer",
            Self::T_FLOAT => "floating point number",
            Self::T_HEX => "hex number",
            Self::T_PORT => "port",
            Self::T_INTERVAL => "interval",
            Self::T_STRING => "string",
            Self::T_PATTERN => "pattern",
            Self::T_IPV4 => "IPv4 address",
            Self::T_IPV6 => "IPv6 address",
            Self::T_HOSTNAME => "hostname",
            Self::T_FILE => "file name",
            Self::T_ATTR => "attribute",
            Self::T_DIRECTIVE => "directive",
            Self::T_LPAREN => "'('",
            Self::T_RPAREN => "')'",
            Self::T_LBRACE => "'{'",
            Self::T_RBRACE => "'}'",
            Self::T_LBRACKET => "'['",
            Self::T_RBRACKET => "']'",
            Self::T_SEMI => "';'",
            Self::T_COMMA => "','",
            Self::T_COLON => "':'",
            Self::T_DOLLAR => "'$'",
            Self::T_HAS_FIELD => "'?$'",
            Self::T_QUESTION => "'?'",
            Self::T_EQ => "'='",
            Self::T_PLUS_EQ => "'+='",
            Self::T_MINUS_EQ => "'-='",
            Self::T_PLUS => "'+'",
            Self::T_MINUS => "'-'",
            Self::T_STAR => "'*'",
            Self::T_SLASH => "'/'",
            Self::T_PERCENT => "'%'",
            Self::T_PLUSPLUS => "'++'",
            Self::T_MINUSMINUS => "'--'",
            Self::T_BANG => "'!'",
            Self::T_TILDE => "'~'",
            Self::T_LT => "'<'",
            Self::T_LTE => "'<='",
            Self::T_GT => "'>'",
            Self::T_GTE => "'>='",
            Self::T_EQEQ => "'=='",
            Self::T_NEQ => "'!='",
            Self::T_AMP => "'&'",
            Self::T_CARET => "'^'",
            Self::T_PIPE => "'|'",
            Self::T_AMPAMP => "'&&'",
            Self::T_PIPEPIPE => "'||'",
            Self::T_EOF => "end of input",
            Self::K_ADD => "'add'",
            Self::K_AS => "'as'",
            Self::K_BREAK => "'break'",
            Self::K_CASE => "'case'",
            Self::K_CONST => "'const'",
            Self::K_COPY => "'copy'",
            Self::K_DEFAULT => "'default'",
            Self::K_DELETE => "'delete'",
            Self::K_ELSE => "'else'",
            Self::K_ENUM => "'enum'",
            Self::K_EVENT => "'event'",
            Self::K_EXPORT => "'export'",
            Self::K_F => "'F'",
            Self::K_FALLTHROUGH => "'fallthrough'",
            Self::K_FILE => "'file'",
            Self::K_FOR => "'for'",
            Self::K_FUNCTION => "'function'",
            Self::K_GLOBAL => "'global'",
            Self::K_HOOK => "'hook'",
            Self::K_IF => "'if'",
            Self::K_IN => "'in'",
            Self::K_IS => "'is'",
            Self::K_LIST => "'list'",
            Self::K_LOCAL => "'local'",
            Self::K_MODULE => "'module'",
            Self::K_NEXT => "'next'",
            Self::K_OF => "'of'",
            Self::K_OPAQUE => "'opaque'",
            Self::K_OPTION => "'option'",
            Self::K_PRINT => "'print'",
            Self::K_RECORD => "'record'",
            Self::K_REDEF => "'redef'",
            Self::K_RETURN => "'return'",
            Self::K_SCHEDULE => "'schedule'",
            Self::K_SET => "'set'",
            Self::K_SWITCH => "'switch'",
            Self::K_T => "'T'",
            Self::K_TABLE => "'table'",
            Self::K_TIMEOUT => "'timeout'",
            Self::K_TYPE => "'type'",
            Self::K_UNION => "'union'",
            Self::K_VECTOR => "'vector'",
            Self::K_WHEN => "'when'",
            Self::K_WHILE => "'while'",
            Self::N_SOURCE_FILE => "source file",
            Self::N_DECL => "declaration",
            Self::N_STMT => "statement",
            Self::N_EXPR => "expression",
            Self::N_TYPE => "type",
            Self::N_ERROR => "invalid input",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Newtype wrapper allowing `rowan` to store `SyntaxKind` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZeekLanguage;

impl RowanLanguage for ZeekLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: RowanSyntaxKind) -> Self::Kind {
        SyntaxKind::from_u16(raw.0).unwrap_or(SyntaxKind::N_ERROR)
    }

    fn kind_to_raw(kind: Self::Kind) -> RowanSyntaxKind {
        RowanSyntaxKind(
            kind.to_u16()
                .unwrap_or_else(|| unreachable!("all SyntaxKind variants map to u16")),
        )
    }
}

/// Syntax node of the lossless tree.
pub type SyntaxNode = rowan::SyntaxNode<ZeekLanguage>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SyntaxKind::T_IDENT)]
    #[case(SyntaxKind::K_WHILE)]
    #[case(SyntaxKind::N_ERROR)]
    fn raw_kind_round_trips(#[case] kind: SyntaxKind) {
        let raw = ZeekLanguage::kind_to_raw(kind);
        assert_eq!(ZeekLanguage::kind_from_raw(raw), kind);
    }

    #[test]
    fn keyword_range_is_closed() {
        assert!(SyntaxKind::K_ADD.is_keyword());
        assert!(SyntaxKind::K_WHILE.is_keyword());
        assert!(!SyntaxKind::T_EOF.is_keyword());
        assert!(!SyntaxKind::N_SOURCE_FILE.is_keyword());
    }

    #[rstest]
    #[case(SyntaxKind::T_EQ, true)]
    #[case(SyntaxKind::T_LPAREN, true)]
    #[case(SyntaxKind::K_RETURN, true)]
    #[case(SyntaxKind::T_IDENT, false)]
    #[case(SyntaxKind::T_RPAREN, false)]
    #[case(SyntaxKind::T_INTEGER, false)]
    fn value_expectation(#[case] kind: SyntaxKind, #[case] expected: bool) {
        assert_eq!(kind.expects_value_after(), expected);
    }
}
