//! Integration tests for the tokenizer entry points.

use rstest::{fixture, rstest};
use zeek_syntax::{
    LexicalErrorKind, Span, SyntaxKind, parse, tokenize_with_trivia, tokenize_without_trivia,
};

#[fixture]
fn handler() -> &'static str {
    "## Logs new connections.\nevent new_connection(c: connection) &priority=5\n\t{\n\tprint c$id;\n\t}\n"
}

fn kinds(src: &str) -> Vec<SyntaxKind> {
    tokenize_without_trivia(src)
        .into_iter()
        .map(|(k, _)| k)
        .collect()
}

#[rstest]
#[case("global", vec![SyntaxKind::K_GLOBAL])]
#[case("Site::local_nets", vec![SyntaxKind::T_IDENT])]
#[case("10.0.0.0/8", vec![SyntaxKind::T_IPV4, SyntaxKind::T_SLASH, SyntaxKind::T_INTEGER])]
#[case("22/tcp", vec![SyntaxKind::T_PORT])]
#[case("30 secs", vec![SyntaxKind::T_INTERVAL])]
#[case("0xdeadbeef", vec![SyntaxKind::T_HEX])]
#[case("2001:db8::1", vec![SyntaxKind::T_IPV6])]
#[case("T F", vec![SyntaxKind::K_T, SyntaxKind::K_F])]
#[case("&optional &log", vec![SyntaxKind::T_ATTR, SyntaxKind::T_ATTR])]
#[case("a?$b", vec![SyntaxKind::T_IDENT, SyntaxKind::T_HAS_FIELD, SyntaxKind::T_IDENT])]
#[case("x -= 1", vec![SyntaxKind::T_IDENT, SyntaxKind::T_MINUS_EQ, SyntaxKind::T_INTEGER])]
fn token_kinds(#[case] src: &str, #[case] expected: Vec<SyntaxKind>) {
    assert_eq!(kinds(src), expected);
}

#[rstest]
fn trivia_tokens_cover_the_input(handler: &str) {
    let tokens = tokenize_with_trivia(handler);
    let mut expected_start = 0;
    for (_, span) in &tokens {
        assert_eq!(span.start, expected_start);
        expected_start = span.end;
    }
    assert_eq!(expected_start, handler.len());
    let text: String = tokens
        .iter()
        .filter_map(|(_, span)| handler.get(span.clone()))
        .collect();
    assert_eq!(text, handler);
}

#[rstest]
fn zeekygen_comment_leads_the_handler(handler: &str) {
    let tokens = tokenize_with_trivia(handler);
    assert_eq!(tokens.first().map(|(k, _)| *k), Some(SyntaxKind::T_ZEEKYGEN));
    assert!(!kinds(handler).contains(&SyntaxKind::T_ZEEKYGEN));
}

#[test]
fn load_path_is_one_token() {
    let src = "@load ./main.zeek";
    let tokens = tokenize_without_trivia(src);
    let expected: Vec<(SyntaxKind, Span)> =
        vec![(SyntaxKind::T_DIRECTIVE, 0..5), (SyntaxKind::T_FILE, 6..17)];
    assert_eq!(tokens, expected);
}

#[rstest]
#[case("/^GET /", SyntaxKind::T_PATTERN)]
#[case("x / 2", SyntaxKind::T_SLASH)]
fn slash_depends_on_position(#[case] src: &str, #[case] expected: SyntaxKind) {
    assert!(kinds(src).contains(&expected));
}

#[rstest]
#[case("x = \"open\n;", LexicalErrorKind::UnterminatedString, 4)]
#[case("@bogus\nx;", LexicalErrorKind::UnknownDirective, 0)]
#[case("x;\u{7}", LexicalErrorKind::UnrecognizedCharacter, 2)]
fn lexical_errors_reach_the_diagnostics(
    #[case] src: &str,
    #[case] kind: LexicalErrorKind,
    #[case] start: usize,
) {
    let parsed = parse(src);
    let lexical: Vec<_> = parsed
        .errors()
        .iter()
        .filter_map(|e| e.as_lexical())
        .map(|e| (e.kind(), e.span().start))
        .collect();
    assert_eq!(lexical, vec![(kind, start)]);
}
