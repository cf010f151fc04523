//! Lexical analysis for Zeek source.
//!
//! The parser drives a [`Lexer`] one token at a time, telling it through a
//! [`LexMode`] whether an expression value is expected at the current
//! position. That is the only way to tell a pattern literal `/re/` apart from
//! the division operator. The standalone `tokenize_with_trivia` and
//! `tokenize_without_trivia` functions guess the mode from the previous
//! significant token so that tools can tokenise without parsing.
//!
//! Fixed punctuation, strings, comments, attributes and directives are
//! recognised by `logos`. The overlapping literal family (identifiers,
//! numbers, ports, intervals, addresses and hostnames) is scanned by hand in
//! [`literals`] so that the longest candidate wins.

use logos::Logos;
use phf::phf_map;

use crate::SyntaxKind;
use crate::parser::ast::{AttrName, Directive};
use crate::parser::{LexicalError, LexicalErrorKind};

mod literals;

/// Byte range for a token within the source.
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,
    #[regex(r"#[^\n]*")]
    Comment,
    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*""#)]
    String,
    #[regex(r"&[A-Za-z_]+")]
    AttrWord,
    #[regex(r"@[A-Za-z][A-Za-z-]*")]
    DirectiveWord,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("$")]
    Dollar,
    #[token("?$")]
    HasField,
    #[token("?")]
    Question,
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("<")]
    Lt,
    #[token("<=")]
    Lte,
    #[token(">")]
    Gt,
    #[token(">=")]
    Gte,
    #[token("==")]
    EqEq,
    #[token("!=")]
    Neq,
    #[token("&")]
    Amp,
    #[token("^")]
    Caret,
    #[token("|")]
    Pipe,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
}

impl Token {
    fn punctuation_kind(self) -> Option<SyntaxKind> {
        use SyntaxKind as K;
        Some(match self {
            Self::LParen => K::T_LPAREN,
            Self::RParen => K::T_RPAREN,
            Self::LBrace => K::T_LBRACE,
            Self::RBrace => K::T_RBRACE,
            Self::LBracket => K::T_LBRACKET,
            Self::RBracket => K::T_RBRACKET,
            Self::Semi => K::T_SEMI,
            Self::Comma => K::T_COMMA,
            Self::Colon => K::T_COLON,
            Self::Dollar => K::T_DOLLAR,
            Self::HasField => K::T_HAS_FIELD,
            Self::Question => K::T_QUESTION,
            Self::Eq => K::T_EQ,
            Self::PlusEq => K::T_PLUS_EQ,
            Self::MinusEq => K::T_MINUS_EQ,
            Self::Plus => K::T_PLUS,
            Self::Minus => K::T_MINUS,
            Self::Star => K::T_STAR,
            Self::Slash => K::T_SLASH,
            Self::Percent => K::T_PERCENT,
            Self::PlusPlus => K::T_PLUSPLUS,
            Self::MinusMinus => K::T_MINUSMINUS,
            Self::Bang => K::T_BANG,
            Self::Tilde => K::T_TILDE,
            Self::Lt => K::T_LT,
            Self::Lte => K::T_LTE,
            Self::Gt => K::T_GT,
            Self::Gte => K::T_GTE,
            Self::EqEq => K::T_EQEQ,
            Self::Neq => K::T_NEQ,
            Self::Amp => K::T_AMP,
            Self::Caret => K::T_CARET,
            Self::Pipe => K::T_PIPE,
            Self::AmpAmp => K::T_AMPAMP,
            Self::PipePipe => K::T_PIPEPIPE,
            Self::Whitespace
            | Self::Comment
            | Self::String
            | Self::AttrWord
            | Self::DirectiveWord => return None,
        })
    }
}

/// Maps reserved words to their keyword `SyntaxKind`.
///
/// Primitive type names such as `count` or `addr` are deliberately absent:
/// they lex as identifiers and only become types in type position.
static KEYWORDS: phf::Map<&'static str, SyntaxKind> = phf_map! {
    "add" => SyntaxKind::K_ADD,
    "as" => SyntaxKind::K_AS,
    "break" => SyntaxKind::K_BREAK,
    "case" => SyntaxKind::K_CASE,
    "const" => SyntaxKind::K_CONST,
    "copy" => SyntaxKind::K_COPY,
    "default" => SyntaxKind::K_DEFAULT,
    "delete" => SyntaxKind::K_DELETE,
    "else" => SyntaxKind::K_ELSE,
    "enum" => SyntaxKind::K_ENUM,
    "event" => SyntaxKind::K_EVENT,
    "export" => SyntaxKind::K_EXPORT,
    "F" => SyntaxKind::K_F,
    "fallthrough" => SyntaxKind::K_FALLTHROUGH,
    "file" => SyntaxKind::K_FILE,
    "for" => SyntaxKind::K_FOR,
    "function" => SyntaxKind::K_FUNCTION,
    "global" => SyntaxKind::K_GLOBAL,
    "hook" => SyntaxKind::K_HOOK,
    "if" => SyntaxKind::K_IF,
    "in" => SyntaxKind::K_IN,
    "is" => SyntaxKind::K_IS,
    "list" => SyntaxKind::K_LIST,
    "local" => SyntaxKind::K_LOCAL,
    "module" => SyntaxKind::K_MODULE,
    "next" => SyntaxKind::K_NEXT,
    "of" => SyntaxKind::K_OF,
    "opaque" => SyntaxKind::K_OPAQUE,
    "option" => SyntaxKind::K_OPTION,
    "print" => SyntaxKind::K_PRINT,
    "record" => SyntaxKind::K_RECORD,
    "redef" => SyntaxKind::K_REDEF,
    "return" => SyntaxKind::K_RETURN,
    "schedule" => SyntaxKind::K_SCHEDULE,
    "set" => SyntaxKind::K_SET,
    "switch" => SyntaxKind::K_SWITCH,
    "T" => SyntaxKind::K_T,
    "table" => SyntaxKind::K_TABLE,
    "timeout" => SyntaxKind::K_TIMEOUT,
    "type" => SyntaxKind::K_TYPE,
    "union" => SyntaxKind::K_UNION,
    "vector" => SyntaxKind::K_VECTOR,
    "when" => SyntaxKind::K_WHEN,
    "while" => SyntaxKind::K_WHILE,
};

/// What the parser expects at the position being lexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexMode {
    /// An operator may follow; `/` is division.
    Operator,
    /// An expression value is expected; `/` opens a pattern literal.
    Value,
    /// The raw file argument of a `@load`-style directive.
    FilePath,
}

/// One significant token together with the trivia that precedes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexed {
    /// Whitespace, comments and unrecognised characters before the token.
    pub trivia: Vec<(SyntaxKind, Span)>,
    pub kind: SyntaxKind,
    pub span: Span,
    /// Lexical errors raised while producing this token and its trivia.
    pub errors: Vec<LexicalError>,
}

/// Position-driven lexer over a source buffer.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'a> {
    src: &'a str,
}

enum Step {
    Trivia(SyntaxKind, usize),
    Skip(usize, LexicalErrorKind),
    Token(SyntaxKind, usize, Option<LexicalErrorKind>),
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Self { src }
    }

    /// Lex the next significant token starting at byte offset `pos`.
    ///
    /// At the end of input the returned token is `T_EOF` with an empty span.
    #[must_use]
    pub fn lex(&self, pos: usize, mode: LexMode) -> Lexed {
        let mut pos = pos.min(self.src.len());
        let mut trivia = Vec::new();
        let mut errors = Vec::new();
        loop {
            let rest = self.src.get(pos..).unwrap_or_default();
            if rest.is_empty() {
                return Lexed {
                    trivia,
                    kind: SyntaxKind::T_EOF,
                    span: pos..pos,
                    errors,
                };
            }
            match step(rest, mode) {
                Step::Trivia(kind, len) => {
                    trivia.push((kind, pos..pos + len));
                    pos += len;
                }
                Step::Skip(len, err) => {
                    trivia.push((SyntaxKind::N_ERROR, pos..pos + len));
                    errors.push(LexicalError::new(err, pos..pos + len));
                    pos += len;
                }
                Step::Token(kind, len, err) => {
                    let span = pos..pos + len;
                    if let Some(err) = err {
                        errors.push(LexicalError::new(err, span.clone()));
                    }
                    return Lexed {
                        trivia,
                        kind,
                        span,
                        errors,
                    };
                }
            }
        }
    }

    /// Source text covered by `span`, or an empty string when out of range.
    #[must_use]
    pub fn slice(&self, span: &Span) -> &'a str {
        self.src.get(span.clone()).unwrap_or_default()
    }
}

fn step(rest: &str, mode: LexMode) -> Step {
    let mut lex = Token::lexer(rest);
    let tok = lex.next();
    let len = lex.span().end;
    match tok {
        Some(Ok(Token::Whitespace)) => return Step::Trivia(SyntaxKind::T_WHITESPACE, len),
        Some(Ok(Token::Comment)) => {
            let kind = if rest.starts_with("##") {
                SyntaxKind::T_ZEEKYGEN
            } else {
                SyntaxKind::T_COMMENT
            };
            return Step::Trivia(kind, len);
        }
        _ => {}
    }

    if mode == LexMode::FilePath {
        let end = rest.find([' ', '\t', '\r', '\n']).unwrap_or(rest.len());
        return Step::Token(SyntaxKind::T_FILE, end, None);
    }
    if mode == LexMode::Value && rest.starts_with('/') {
        return pattern(rest);
    }
    if let Some((kind, len)) = literals::scan(rest) {
        let kind = if kind == SyntaxKind::T_IDENT {
            rest.get(..len)
                .and_then(|word| KEYWORDS.get(word))
                .copied()
                .unwrap_or(kind)
        } else {
            kind
        };
        return Step::Token(kind, len, None);
    }

    match tok {
        Some(Ok(Token::String)) => Step::Token(SyntaxKind::T_STRING, len, None),
        Some(Ok(Token::AttrWord)) => {
            let known = rest
                .get(1..len)
                .is_some_and(|word| AttrName::from_word(word).is_some());
            if known {
                Step::Token(SyntaxKind::T_ATTR, len, None)
            } else {
                Step::Token(SyntaxKind::T_AMP, 1, None)
            }
        }
        Some(Ok(Token::DirectiveWord)) => {
            let known = rest.get(..len).and_then(Directive::from_word).is_some();
            let err = (!known).then_some(LexicalErrorKind::UnknownDirective);
            Step::Token(SyntaxKind::T_DIRECTIVE, len, err)
        }
        Some(Ok(other)) => match other.punctuation_kind() {
            Some(kind) => Step::Token(kind, len, None),
            None => unrecognised(rest),
        },
        Some(Err(())) | None => unrecognised(rest),
    }
}

fn unrecognised(rest: &str) -> Step {
    if rest.starts_with('"') {
        let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
        return Step::Token(
            SyntaxKind::T_STRING,
            end,
            Some(LexicalErrorKind::UnterminatedString),
        );
    }
    let len = rest.chars().next().map_or(1, char::len_utf8);
    Step::Skip(len, LexicalErrorKind::UnrecognizedCharacter)
}

/// Scan `/regex/` with an optional `i` suffix. Backslash escapes the next
/// character; a pattern never spans a line break.
fn pattern(rest: &str) -> Step {
    let bytes = rest.as_bytes();
    let mut i = 1;
    loop {
        match bytes.get(i) {
            Some(b'\\') if !matches!(bytes.get(i + 1), None | Some(b'\r' | b'\n')) => i += 2,
            Some(b'/') => {
                i += 1;
                if bytes.get(i) == Some(&b'i') {
                    i += 1;
                }
                return Step::Token(SyntaxKind::T_PATTERN, i, None);
            }
            None | Some(b'\r' | b'\n') => {
                return Step::Token(
                    SyntaxKind::T_PATTERN,
                    i,
                    Some(LexicalErrorKind::UnterminatedPattern),
                );
            }
            Some(_) => i += 1,
        }
    }
}

/// Mode for the token following `kind`, guessed without a parser.
fn mode_after(kind: SyntaxKind, text: &str) -> LexMode {
    if kind == SyntaxKind::T_DIRECTIVE && Directive::from_word(text).is_some_and(Directive::takes_file) {
        LexMode::FilePath
    } else if kind.expects_value_after() {
        LexMode::Value
    } else {
        LexMode::Operator
    }
}

/// Tokenize the entire source, keeping whitespace, comments and
/// unrecognised characters (as `N_ERROR`).
#[must_use]
pub fn tokenize_with_trivia(src: &str) -> Vec<(SyntaxKind, Span)> {
    let lexer = Lexer::new(src);
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut mode = LexMode::Value;
    loop {
        let lexed = lexer.lex(pos, mode);
        tokens.extend(lexed.trivia);
        if lexed.kind == SyntaxKind::T_EOF {
            break;
        }
        mode = mode_after(lexed.kind, lexer.slice(&lexed.span));
        pos = lexed.span.end;
        tokens.push((lexed.kind, lexed.span));
    }
    tokens
}

/// Tokenize the source, dropping whitespace and both comment kinds.
#[must_use]
pub fn tokenize_without_trivia(src: &str) -> Vec<(SyntaxKind, Span)> {
    tokenize_with_trivia(src)
        .into_iter()
        .filter(|(kind, _)| !kind.is_trivia())
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::test_util::token_kinds;
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("x / y", vec![SyntaxKind::T_IDENT, SyntaxKind::T_SLASH, SyntaxKind::T_IDENT])]
    #[case("x = /ab*c/i", vec![SyntaxKind::T_IDENT, SyntaxKind::T_EQ, SyntaxKind::T_PATTERN])]
    #[case("f(/a\\/b/)", vec![SyntaxKind::T_IDENT, SyntaxKind::T_LPAREN, SyntaxKind::T_PATTERN, SyntaxKind::T_RPAREN])]
    #[case("(a) / 2", vec![SyntaxKind::T_LPAREN, SyntaxKind::T_IDENT, SyntaxKind::T_RPAREN, SyntaxKind::T_SLASH, SyntaxKind::T_INTEGER])]
    fn pattern_or_division(#[case] src: &str, #[case] expected: Vec<SyntaxKind>) {
        assert_eq!(token_kinds(src), expected);
    }

    #[rstest]
    #[case("&log", SyntaxKind::T_ATTR)]
    #[case("&default", SyntaxKind::T_ATTR)]
    #[case("&bogus", SyntaxKind::T_AMP)]
    #[case("&&", SyntaxKind::T_AMPAMP)]
    #[case("?$", SyntaxKind::T_HAS_FIELD)]
    #[case("redef", SyntaxKind::K_REDEF)]
    #[case("count", SyntaxKind::T_IDENT)]
    #[case("Site::local_nets", SyntaxKind::T_IDENT)]
    #[case("\"a\\\"b\"", SyntaxKind::T_STRING)]
    fn first_token_kind(#[case] src: &str, #[case] expected: SyntaxKind) {
        assert_eq!(token_kinds(src).first(), Some(&expected));
    }

    #[test]
    fn comments_are_split_by_kind() {
        let toks = tokenize_with_trivia("# one\n## two\nx");
        let trivia: Vec<_> = toks.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            trivia,
            vec![
                SyntaxKind::T_COMMENT,
                SyntaxKind::T_WHITESPACE,
                SyntaxKind::T_ZEEKYGEN,
                SyntaxKind::T_WHITESPACE,
                SyntaxKind::T_IDENT,
            ]
        );
    }

    #[test]
    fn load_takes_raw_file() {
        let toks = tokenize_without_trivia("@load base/frameworks/notice\nx");
        assert_eq!(
            toks,
            vec![
                (SyntaxKind::T_DIRECTIVE, 0..5),
                (SyntaxKind::T_FILE, 6..28),
                (SyntaxKind::T_IDENT, 29..30),
            ]
        );
    }

    #[test]
    fn unrecognised_character_is_skipped_with_error() {
        let lexer = Lexer::new("` x");
        let lexed = lexer.lex(0, LexMode::Value);
        assert_eq!(lexed.kind, SyntaxKind::T_IDENT);
        assert_eq!(lexed.trivia.first(), Some(&(SyntaxKind::N_ERROR, 0..1)));
        assert_eq!(
            lexed.errors,
            vec![LexicalError::new(LexicalErrorKind::UnrecognizedCharacter, 0..1)]
        );
    }

    #[rstest]
    #[case("\"abc\nx", SyntaxKind::T_STRING, 0..4, LexicalErrorKind::UnterminatedString)]
    #[case("/abc\nx", SyntaxKind::T_PATTERN, 0..4, LexicalErrorKind::UnterminatedPattern)]
    #[case("@loud", SyntaxKind::T_DIRECTIVE, 0..5, LexicalErrorKind::UnknownDirective)]
    fn recoverable_lexical_errors(
        #[case] src: &str,
        #[case] kind: SyntaxKind,
        #[case] span: Span,
        #[case] err: LexicalErrorKind,
    ) {
        let lexed = Lexer::new(src).lex(0, LexMode::Value);
        assert_eq!(lexed.kind, kind);
        assert_eq!(lexed.span, span.clone());
        assert_eq!(lexed.errors, vec![LexicalError::new(err, span)]);
    }

    #[test]
    fn end_of_input_is_empty_eof() {
        let lexed = Lexer::new("  ").lex(0, LexMode::Operator);
        assert_eq!(lexed.kind, SyntaxKind::T_EOF);
        assert_eq!(lexed.span, 2..2);
        assert_eq!(lexed.trivia, vec![(SyntaxKind::T_WHITESPACE, 0..2)]);
    }
}
