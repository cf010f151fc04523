//! Diagnostics produced while lexing and parsing.
//!
//! Lexical problems carry a [`LexicalErrorKind`] and the offending span.
//! Syntax problems reuse `chumsky`'s [`Simple`] error so each diagnostic
//! records the token found, the token kinds that would have been accepted and
//! a label naming the production being parsed.

use chumsky::error::{Simple, SimpleReason};
use thiserror::Error;

use crate::{Span, SyntaxKind};

/// Category of a lexical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum LexicalErrorKind {
    /// A character that cannot start any token.
    #[error("unrecognised character")]
    UnrecognizedCharacter,
    /// A string literal without its closing quote on the same line.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// A pattern literal without its closing slash on the same line.
    #[error("unterminated pattern literal")]
    UnterminatedPattern,
    /// An `@word` that is not a known directive.
    #[error("unknown directive")]
    UnknownDirective,
}

/// Lexical error with the span of the offending text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("{kind}")]
pub struct LexicalError {
    kind: LexicalErrorKind,
    span: Span,
}

impl LexicalError {
    #[must_use]
    pub fn new(kind: LexicalErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    #[must_use]
    pub fn kind(&self) -> LexicalErrorKind {
        self.kind
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Any diagnostic reported by [`parse`](crate::parse).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error("{}", syntax_message(.0))]
    Syntax(Simple<SyntaxKind>),
}

impl ParseError {
    /// Byte range the diagnostic refers to.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Lexical(err) => err.span(),
            Self::Syntax(err) => err.span(),
        }
    }

    /// The syntax error, if this is one.
    #[must_use]
    pub fn as_syntax(&self) -> Option<&Simple<SyntaxKind>> {
        match self {
            Self::Syntax(err) => Some(err),
            Self::Lexical(_) => None,
        }
    }

    /// The lexical error, if this is one.
    #[must_use]
    pub fn as_lexical(&self) -> Option<&LexicalError> {
        match self {
            Self::Lexical(err) => Some(err),
            Self::Syntax(_) => None,
        }
    }
}

impl From<Simple<SyntaxKind>> for ParseError {
    fn from(err: Simple<SyntaxKind>) -> Self {
        Self::Syntax(err)
    }
}

fn describe(token: Option<&SyntaxKind>) -> &'static str {
    token.map_or("end of input", |kind| kind.describe())
}

/// Render a syntax error as `unexpected X while parsing Y, expected A or B`.
fn syntax_message(err: &Simple<SyntaxKind>) -> String {
    match err.reason() {
        SimpleReason::Custom(msg) => msg.clone(),
        SimpleReason::Unclosed { delimiter, .. } => format!("unclosed {}", delimiter.describe()),
        SimpleReason::Unexpected => {
            let mut msg = format!("unexpected {}", describe(err.found()));
            if let Some(label) = err.label() {
                msg.push_str(" while parsing ");
                msg.push_str(label);
            }
            let mut expected: Vec<_> = err.expected().map(Option::as_ref).map(describe).collect();
            expected.sort_unstable();
            expected.dedup();
            if let Some((last, rest)) = expected.split_last() {
                msg.push_str(", expected ");
                if !rest.is_empty() {
                    msg.push_str(&rest.join(", "));
                    msg.push_str(" or ");
                }
                msg.push_str(last);
            }
            msg
        }
    }
}

/// Merge lexical and syntax errors into one list ordered by start offset.
///
/// Lexical errors come first when both start at the same offset.
pub(crate) fn merge_errors(
    lexical: impl IntoIterator<Item = LexicalError>,
    syntax: impl IntoIterator<Item = Simple<SyntaxKind>>,
) -> Vec<ParseError> {
    let mut all: Vec<ParseError> = lexical
        .into_iter()
        .map(ParseError::Lexical)
        .chain(syntax.into_iter().map(ParseError::Syntax))
        .collect();
    all.sort_by_key(|err| err.span().start);
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use chumsky::Error as _;
    use rstest::rstest;

    #[rstest]
    #[case(LexicalErrorKind::UnrecognizedCharacter, "unrecognised character")]
    #[case(LexicalErrorKind::UnterminatedString, "unterminated string literal")]
    #[case(LexicalErrorKind::UnknownDirective, "unknown directive")]
    fn lexical_errors_render(#[case] kind: LexicalErrorKind, #[case] expected: &str) {
        let err = ParseError::from(LexicalError::new(kind, 0..1));
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn syntax_errors_render_found_label_and_expected() {
        let err: ParseError = Simple::expected_input_found(
            0..1,
            [Some(SyntaxKind::T_SEMI), Some(SyntaxKind::T_COMMA)],
            Some(SyntaxKind::T_IDENT),
        )
        .with_label("statement")
        .into();
        assert_eq!(
            err.to_string(),
            "unexpected identifier while parsing statement, expected ',' or ';'"
        );
        let eof: ParseError = Simple::expected_input_found(3..3, [Some(SyntaxKind::T_RPAREN)], None).into();
        assert_eq!(eof.to_string(), "unexpected end of input, expected ')'");
        let custom: ParseError = Simple::custom(0..1, "nesting too deep").into();
        assert_eq!(custom.to_string(), "nesting too deep");
    }

    #[test]
    fn merged_errors_are_sorted() {
        let lexical = vec![LexicalError::new(LexicalErrorKind::UnterminatedString, 10..12)];
        let syntax = vec![
            Simple::expected_input_found(20..21, [Some(SyntaxKind::T_SEMI)], None),
            Simple::custom(3..4, "boom"),
        ];
        let merged = merge_errors(lexical, syntax);
        let starts: Vec<_> = merged.iter().map(|e| e.span().start).collect();
        assert_eq!(starts, vec![3, 10, 20]);
        assert!(merged.get(1).and_then(ParseError::as_lexical).is_some());
    }
}
