//! Integration tests for the lossless concrete syntax tree.

use rstest::rstest;
use zeek_syntax::{SyntaxKind, SyntaxNode, parse};

fn kinds_of(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.descendants().map(|n| n.kind()).collect()
}

#[rstest]
#[case("@load base/frameworks/notice\nmodule M;\n")]
#[case("event e(c: connection) {\n  # body\n  print c$uid;\n}\n")]
#[case("global t: table[addr] of set[port] = {} &redef;")]
#[case("redef enum Notice::Type += { Scan, };")]
#[case("switch ( x ) { case 1: break; }")]
#[case("global = ;\n}}\nprint 1")]
fn node_text_matches_source_range(#[case] src: &str) {
    let parsed = parse(src);
    assert_eq!(parsed.syntax().text().to_string(), src);
    for node in parsed.syntax().descendants() {
        let range = node.text_range();
        let slice = src.get(usize::from(range.start())..usize::from(range.end()));
        assert_eq!(Some(node.text().to_string().as_str()), slice);
    }
}

#[test]
fn handler_contains_statement_and_expression_nodes() {
    let parsed = parse("event e(c: connection) { print c$uid; }");
    let kinds = kinds_of(&parsed.syntax());
    assert_eq!(kinds.first(), Some(&SyntaxKind::N_SOURCE_FILE));
    for expected in [
        SyntaxKind::N_DECL,
        SyntaxKind::N_TYPE,
        SyntaxKind::N_STMT,
        SyntaxKind::N_EXPR,
    ] {
        assert!(kinds.contains(&expected), "missing {expected:?} in {kinds:?}");
    }
    assert!(!kinds.contains(&SyntaxKind::N_ERROR));
}

#[test]
fn error_nodes_mark_skipped_input() {
    let parsed = parse("global x: = 1;\nglobal y = 2;\n");
    let top: Vec<_> = parsed.syntax().children().map(|n| n.kind()).collect();
    assert_eq!(top, vec![SyntaxKind::N_ERROR, SyntaxKind::N_DECL]);
    let error_text = parsed
        .syntax()
        .first_child()
        .map(|n| n.text().to_string())
        .unwrap_or_default();
    assert_eq!(error_text, "global x: = 1;");
}

#[test]
fn comments_inside_a_handler_are_found_by_span() {
    let src = "# before\nevent e() {\n  # inside\n  print 1;\n}\n# after\n";
    let parsed = parse(src);
    let Some(handler) = parsed.syntax().first_child() else {
        panic!("expected the handler node");
    };
    let range = handler.text_range();
    let span = usize::from(range.start())..usize::from(range.end());
    let bodies: Vec<_> = parsed
        .comments_in(&span)
        .map(|c| c.body(parsed.source()))
        .collect();
    assert_eq!(bodies, vec!["inside"]);
    assert_eq!(parsed.comments().len(), 3);
}
