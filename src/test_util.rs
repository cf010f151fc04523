//! Helpers for rendering parse results and asserting diagnostics in tests.
//!
//! These functions reduce boilerplate when comparing parsed scripts against
//! their S-expression form and when checking that a failure surfaces the
//! expected message at the expected span.

use crate::{ParseError, Parsed, Span, SyntaxKind, parse, parse_expression, tokenize_without_trivia};

/// Significant token kinds of `src`.
///
/// # Examples
///
/// ```rust,no_run
/// # #[cfg(feature = "test-support")]
/// # {
/// use zeek_syntax::{SyntaxKind, test_util::token_kinds};
/// assert_eq!(token_kinds("x;"), vec![SyntaxKind::T_IDENT, SyntaxKind::T_SEMI]);
/// # }
/// ```
#[must_use]
pub fn token_kinds(src: &str) -> Vec<SyntaxKind> {
    tokenize_without_trivia(src)
        .into_iter()
        .map(|(kind, _)| kind)
        .collect()
}

/// Parse `src` as a script and render it, panicking on any diagnostic.
///
/// # Panics
/// Panics if parsing reports errors.
#[track_caller]
#[must_use]
pub fn script_sexpr(src: &str) -> String {
    let parsed = parse(src);
    assert_no_parse_errors(parsed.errors());
    parsed.ast().sexpr()
}

/// Parse `src` as one expression and render it.
///
/// # Panics
/// Panics if parsing fails.
#[track_caller]
#[must_use]
pub fn expr_sexpr(src: &str) -> String {
    match parse_expression(src) {
        Ok((ast, id)) => ast.sexpr_expr(id),
        Err(errors) => panic!("{src}: {errors:?}"),
    }
}

/// Rendered messages of every diagnostic, in order.
#[must_use]
pub fn messages(parsed: &Parsed) -> Vec<String> {
    parsed.errors().iter().map(ToString::to_string).collect()
}

/// Common error message patterns for parser assertions.
#[derive(Debug, Clone)]
pub enum ErrorPattern {
    /// The whole message.
    Exact(String),
    /// A fragment of the message.
    Contains(String),
}

impl ErrorPattern {
    fn matches(&self, rendered: &str) -> bool {
        match self {
            Self::Exact(msg) => rendered == msg,
            Self::Contains(msg) => rendered.contains(msg.as_str()),
        }
    }
}

impl From<&str> for ErrorPattern {
    fn from(s: &str) -> Self {
        Self::Exact(s.to_string())
    }
}

/// Assert that a parser produced no errors.
///
/// # Panics
/// Panics if `errors` is not empty.
#[track_caller]
pub fn assert_no_parse_errors<E: std::fmt::Debug>(errors: &[E]) {
    assert!(errors.is_empty(), "Parse errors: {errors:?}");
}

/// Assert that exactly one error was reported, matching `expected_pattern`
/// and covering `span`.
///
/// # Examples
///
/// ```rust,no_run
/// # #[cfg(feature = "test-support")]
/// # {
/// use zeek_syntax::{parse, test_util::assert_parse_error};
/// let parsed = parse("global x = 1 &log = 2;");
/// assert_parse_error(parsed.errors(), "attribute &log takes no value", 18..19);
/// # }
/// ```
///
/// # Panics
/// Panics if there is not exactly one error, or if its message or span do
/// not match.
#[track_caller]
pub fn assert_parse_error(errors: &[ParseError], expected_pattern: impl Into<ErrorPattern>, span: Span) {
    let pattern: ErrorPattern = expected_pattern.into();
    let [error] = errors else {
        panic!("expected one error, got {errors:?}");
    };
    let rendered = error.to_string();
    assert!(
        pattern.matches(&rendered),
        "expected error matching '{pattern:?}', got '{rendered}'",
    );
    assert_eq!(error.span(), span);
}

/// Assert that some error matches `expected_pattern`.
///
/// # Panics
/// Panics if no error matches.
#[track_caller]
pub fn assert_has_error(errors: &[ParseError], expected_pattern: impl Into<ErrorPattern>) {
    let pattern: ErrorPattern = expected_pattern.into();
    assert!(
        errors.iter().any(|e| pattern.matches(&e.to_string())),
        "no error matching '{pattern:?}' in {errors:?}",
    );
}
