//! Shared test utilities for integration tests.
//!
//! These helpers render parse results and assert over diagnostics. They
//! mirror a subset of the `zeek_syntax::test_util` module without requiring
//! the `test-support` feature.

#![expect(
    dead_code,
    reason = "helpers are reused across multiple tests so some may be unused"
)]

use zeek_syntax::{Parsed, parse, parse_expression};

/// Parse a script that must be free of diagnostics and render it.
///
/// # Panics
/// Panics if parsing reports errors.
#[track_caller]
#[must_use]
pub fn script_sexpr(src: &str) -> String {
    let parsed = parse(src);
    assert!(parsed.errors().is_empty(), "{src}: {:?}", parsed.errors());
    parsed.ast().sexpr()
}

/// Parse one expression and render it.
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

/// Rendered messages of every diagnostic.
#[must_use]
pub fn messages(parsed: &Parsed) -> Vec<String> {
    parsed.errors().iter().map(ToString::to_string).collect()
}

/// Assert that some diagnostic contains `fragment`.
///
/// # Panics
/// Panics if none does.
#[track_caller]
pub fn assert_error_contains(parsed: &Parsed, fragment: &str) {
    let all = messages(parsed);
    assert!(
        all.iter().any(|m| m.contains(fragment)),
        "no error containing '{fragment}' in {all:?}"
    );
}
