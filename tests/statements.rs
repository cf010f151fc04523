//! Integration tests for statements inside function bodies.

use rstest::rstest;

mod test_util;
use test_util::script_sexpr;

/// Wrap `body` in a function and render only the body block.
fn body_sexpr(body: &str) -> String {
    let rendered = script_sexpr(&format!("function f() {{ {body} }}"));
    rendered
        .strip_prefix("(function f (params) ")
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(&rendered)
        .to_string()
}

#[rstest]
#[case("local n = |s|;", "(block (local n (= (card s))))")]
#[case("const k = 3;", "(block (const k (= 3)))")]
#[case(
    "for ( i in v ) if ( i > 2 ) break;",
    "(block (for (i) v (if (> i 2) (break))))"
)]
#[case(
    "while ( n > 0 ) --n;",
    "(block (while (> n 0) (expr (-- n))))"
)]
#[case("return x ? 1 : 2;", "(block (return (? x 1 2)))")]
#[case(
    "schedule 1 min { tick() };",
    "(block (expr (schedule 1min (event tick))))"
)]
#[case("hook h(1);", "(block (expr (hook (call h 1))))")]
#[case("event e(1, 2);", "(block (event e 1 2))")]
#[case("s[2:] = \"x\";", "(block (index-assign s 2 _ \"x\"))")]
#[case("delete r$f;", "(block (delete ($ r f)))")]
fn body_statements(#[case] body: &str, #[case] expected: &str) {
    assert_eq!(body_sexpr(body), expected);
}

#[test]
fn switch_with_all_case_forms() {
    let body = concat!(
        "switch ( v ) {\n",
        "case 1, 2: print \"small\"; break;\n",
        "case type count as c: print c;\n",
        "default: fallthrough;\n",
        "}"
    );
    assert_eq!(
        body_sexpr(body),
        concat!(
            "(block (switch (paren v) ",
            "(case (1 2) (print \"small\") (break)) ",
            "(case (types (as count c)) (print c)) ",
            "(default (fallthrough))))"
        )
    );
}

#[test]
fn dangling_else_binds_to_nearest_if() {
    assert_eq!(
        body_sexpr("if ( a ) if ( b ) print 1; else print 2;"),
        "(block (if a (if b (print 1) (print 2))))"
    );
}

#[test]
fn when_with_captures_and_timeout() {
    assert_eq!(
        body_sexpr("when [h] ( lookup(h) ) { print h; } timeout 10 sec { print \"slow\"; }"),
        concat!(
            "(block (when (capture h) (call lookup h) (block (print h)) ",
            "(timeout 10sec (print \"slow\"))))"
        )
    );
}

#[test]
fn nested_blocks() {
    assert_eq!(
        body_sexpr("{ { ; } print 1; }"),
        "(block (block (block (empty)) (print 1)))"
    );
}
