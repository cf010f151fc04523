//! Error recovery: a broken construct must not hide the rest of the file.

use rstest::rstest;
use zeek_syntax::{ParseError, parse};

mod test_util;
use test_util::messages;

#[test]
fn broken_declaration_is_skipped_to_semicolon() {
    let parsed = parse("global x: = 1;\nglobal y = 2;\n");
    assert_eq!(parsed.errors().len(), 1);
    assert_eq!(parsed.ast().sexpr(), "<error>\n(global y (= 2))");
}

#[test]
fn broken_handler_body_keeps_later_handlers() {
    let src = "event a() { print ; }\nevent b() { print 2; }\n";
    let parsed = parse(src);
    assert_eq!(parsed.errors().len(), 1, "{:?}", messages(&parsed));
    assert_eq!(
        parsed.ast().sexpr(),
        "(event a (params) (block <error>))\n(event b (params) (block (print 2)))"
    );
}

#[test]
fn braces_are_balanced_while_skipping() {
    let src = "global t = { 1, , 2 };\nglobal ok = 1;\n";
    let parsed = parse(src);
    assert_eq!(parsed.errors().len(), 1, "{:?}", messages(&parsed));
    assert!(parsed.ast().sexpr().contains("(global ok (= 1))"));
}

#[test]
fn stray_closing_brace_at_top_level() {
    let parsed = parse("}\nprint 1;\n");
    assert_eq!(parsed.errors().len(), 1);
    assert_eq!(parsed.ast().sexpr(), "<error>\n(print 1)");
}

#[test]
fn lexical_and_syntax_errors_are_merged_in_order() {
    let parsed = parse("print \"open\nprint ;\n");
    let kinds: Vec<_> = parsed
        .errors()
        .iter()
        .map(|e| matches!(e, ParseError::Lexical(_)))
        .collect();
    assert_eq!(kinds, vec![true, false]);
    let starts: Vec<_> = parsed.errors().iter().map(|e| e.span().start).collect();
    assert!(starts.windows(2).all(|w| matches!(w, [a, b] if a <= b)));
}

#[rstest]
#[case("print 1")]
#[case("event e(")]
#[case("function f() {")]
#[case("switch ( x ) { case")]
#[case("global t: table[")]
#[case("\u{0}\u{1}")]
fn truncated_input_still_yields_a_tree(#[case] src: &str) {
    let parsed = parse(src);
    assert_eq!(parsed.syntax().text().to_string(), src);
}

#[test]
fn unclosed_block_reports_once_at_end() {
    let parsed = parse("function f() { print 1;");
    assert_eq!(
        messages(&parsed),
        vec!["unexpected end of input while parsing block, expected '}'".to_string()]
    );
}
