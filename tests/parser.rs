//! Integration tests for whole-script parsing.
//!
//! These tests exercise a realistic script end to end: the typed tree, the
//! lossless CST, the comment channel and the option surface.

use rstest::{fixture, rstest};
use zeek_syntax::{
    CommentKind, LineIndex, ParseOptions, SyntaxKind, ast::Decl, ast::FuncFlavor, parse, parse_with,
};

mod test_util;
use test_util::{messages, script_sexpr};

#[fixture]
fn script() -> &'static str {
    concat!(
        "##! Tracks SSH logins.\n",
        "@load base/protocols/ssh\n",
        "\n",
        "module SSHTrack;\n",
        "\n",
        "export {\n",
        "    ## Hosts seen so far.\n",
        "    global seen: set[addr] &redef;\n",
        "    type Info: record {\n",
        "        host: addr &log;\n",
        "        tries: count &default=0;\n",
        "    };\n",
        "}\n",
        "\n",
        "event ssh_auth_failed(c: connection) # counted below\n",
        "    {\n",
        "    local h = c$id$orig_h;\n",
        "    if ( h !in seen )\n",
        "        add seen[h];\n",
        "    }\n",
    )
}

#[rstest]
fn script_has_expected_shape(script: &str) {
    let parsed = parse(script);
    assert!(parsed.errors().is_empty(), "{:?}", messages(&parsed));
    let root = parsed.ast().source_file();
    assert_eq!(root.decls.len(), 4);
    assert!(root.stmts.is_empty());
    let handler = root.decls.last().map(|id| &parsed.ast()[*id].kind);
    assert!(matches!(
        handler,
        Some(Decl::FuncHdr(f)) if f.flavor == FuncFlavor::Event && f.name.name == "ssh_auth_failed"
    ));
}

#[rstest]
fn script_round_trips(script: &str) {
    let parsed = parse(script);
    assert_eq!(parsed.syntax().text().to_string(), script);
    assert_eq!(parsed.syntax().kind(), SyntaxKind::N_SOURCE_FILE);
}

#[rstest]
fn comments_are_collected(script: &str) {
    let parsed = parse(script);
    let kinds: Vec<_> = parsed.comments().iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![CommentKind::Zeekygen, CommentKind::Zeekygen, CommentKind::Minor]
    );
    let bodies: Vec<_> = parsed
        .comments()
        .iter()
        .map(|c| c.body(parsed.source()))
        .collect();
    assert_eq!(
        bodies,
        vec!["Tracks SSH logins.", "Hosts seen so far.", "counted below"]
    );
}

#[rstest]
fn doc_comment_attaches_to_following_declaration(script: &str) {
    let parsed = parse(script);
    let Some(Decl::Export(inner)) = parsed
        .ast()
        .source_file()
        .decls
        .get(2)
        .map(|id| &parsed.ast()[*id].kind)
    else {
        panic!("third declaration should be the export block");
    };
    let span = inner
        .first()
        .map(|id| parsed.ast()[*id].span.clone())
        .unwrap_or_default();
    let docs: Vec<_> = parsed
        .doc_comments(&span)
        .into_iter()
        .map(|c| c.body(parsed.source()))
        .collect();
    assert_eq!(docs, vec!["Hosts seen so far."]);
}

#[test]
fn statements_follow_declarations() {
    assert_eq!(
        script_sexpr("global n = 0;\nn += 1;\nprint n;\n"),
        "(global n (= 0))\n(expr (+= n 1))\n(print n)"
    );
}

#[test]
fn diagnostics_map_to_lines() {
    let src = "global x = 1;\n\nprint x +;\n";
    let parsed = parse(src);
    let index = LineIndex::new(src);
    let positions: Vec<_> = parsed
        .errors()
        .iter()
        .map(|e| index.line_col(e.span().start))
        .collect();
    assert_eq!(positions, vec![(3, 10)]);
}

#[rstest]
#[case(4, false)]
#[case(64, true)]
fn max_depth_is_configurable(#[case] max_depth: usize, #[case] ok: bool) {
    let src = "print ((((((1))))));";
    let parsed = parse_with(src, &ParseOptions::new().with_max_depth(max_depth));
    assert_eq!(parsed.errors().is_empty(), ok, "{:?}", messages(&parsed));
    assert_eq!(parsed.syntax().text().to_string(), src);
}

#[rstest]
fn reparsing_is_deterministic(script: &str) {
    let first = parse(script);
    let second = parse(script);
    assert_eq!(first.ast(), second.ast());
    assert_eq!(first.green(), second.green());
    assert_eq!(messages(&first), messages(&second));
}
