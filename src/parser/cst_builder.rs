//! CST construction.
//!
//! The green tree is built from the token log of the [`TokenStream`] and
//! the spans of the AST nodes reachable from the root. Every logged token,
//! trivia included, becomes a leaf, so the tree text always equals the
//! source. Nodes are opened at the first significant token of their span
//! and closed before the first token that starts at or after its end, so
//! trivia between two nodes belongs to their common parent.
//!
//! [`TokenStream`]: super::token_stream::TokenStream

use std::cmp::Reverse;

use log::warn;
use rowan::{GreenNode, GreenNodeBuilder, Language};

use crate::{Span, SyntaxKind, ZeekLanguage};

use super::ast::{Ast, Decl, NodeId, Stmt};

/// Tree kind of an AST node.
fn node_kind(ast: &Ast, node: NodeId) -> SyntaxKind {
    match node {
        NodeId::Decl(id) if matches!(ast[id].kind, Decl::Error) => SyntaxKind::N_ERROR,
        NodeId::Stmt(id) if matches!(ast[id].kind, Stmt::Error) => SyntaxKind::N_ERROR,
        NodeId::Decl(_) => SyntaxKind::N_DECL,
        NodeId::Stmt(_) => SyntaxKind::N_STMT,
        NodeId::Expr(_) => SyntaxKind::N_EXPR,
        NodeId::Type(_) => SyntaxKind::N_TYPE,
    }
}

/// Node spans in opening order: by start, outer before inner.
fn node_spans(ast: &Ast) -> Vec<(Span, SyntaxKind)> {
    let mut nodes: Vec<_> = ast
        .descendants()
        .into_iter()
        .filter_map(|(node, depth)| {
            let span = ast.span(node);
            (!span.is_empty()).then(|| (span, node_kind(ast, node), depth))
        })
        .collect();
    nodes.sort_by_key(|(span, _, depth)| (span.start, Reverse(span.end), *depth));
    nodes
        .into_iter()
        .map(|(span, kind, _)| (span, kind))
        .collect()
}

/// Construct the lossless tree rooted at `N_SOURCE_FILE`.
pub(super) fn build_green_tree(log: &[(SyntaxKind, Span)], ast: &Ast, src: &str) -> GreenNode {
    let nodes = node_spans(ast);
    let mut pending = nodes.iter().peekable();
    let mut open: Vec<usize> = Vec::new();
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(ZeekLanguage::kind_to_raw(SyntaxKind::N_SOURCE_FILE));

    for (kind, span) in log {
        while open.last().is_some_and(|&end| end <= span.start) {
            builder.finish_node();
            open.pop();
        }
        if !kind.is_trivia() && *kind != SyntaxKind::N_ERROR {
            while let Some((node_span, node_kind)) = pending.next_if(|(s, _)| s.start <= span.start) {
                if node_span.start < span.start {
                    warn!("node {node_span:?} does not start at a token boundary");
                    continue;
                }
                if open.last().is_some_and(|&end| node_span.end > end) {
                    warn!("node {node_span:?} crosses its parent");
                    continue;
                }
                builder.start_node(ZeekLanguage::kind_to_raw(*node_kind));
                open.push(node_span.end);
            }
        }
        push_token(&mut builder, *kind, span, src);
    }

    for _ in open.drain(..) {
        builder.finish_node();
    }
    builder.finish_node();
    builder.finish()
}

fn push_token(builder: &mut GreenNodeBuilder, kind: SyntaxKind, span: &Span, src: &str) {
    let text = src.get(span.clone()).map_or_else(
        || {
            warn!(
                "token span {:?} out of bounds for source of length {}",
                span,
                src.len()
            );
            ""
        },
        |t| t,
    );

    let raw = ZeekLanguage::kind_to_raw(kind);
    if kind == SyntaxKind::N_ERROR {
        builder.start_node(ZeekLanguage::kind_to_raw(SyntaxKind::N_ERROR));
    }
    builder.token(raw, text);
    if kind == SyntaxKind::N_ERROR {
        builder.finish_node();
    }
}

#[cfg(test)]
mod tests {
    use crate::{SyntaxKind, SyntaxNode, parse};
    use rstest::rstest;

    fn child_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
        node.children().map(|c| c.kind()).collect()
    }

    #[rstest]
    #[case("global x: count = 1;\n")]
    #[case("# lead\nevent e() { print 1; } # trail\n")]
    #[case("x = $ ;\n\u{7}print 2;")]
    #[case("")]
    fn text_round_trips(#[case] src: &str) {
        let parsed = parse(src);
        assert_eq!(parsed.syntax().text().to_string(), src);
    }

    #[test]
    fn nodes_nest_by_span() {
        let parsed = parse("global x: count = 1 + 2;");
        let root = parsed.syntax();
        assert_eq!(child_kinds(&root), vec![SyntaxKind::N_DECL]);
        let decl = root.first_child();
        let kinds = decl.as_ref().map(child_kinds).unwrap_or_default();
        assert_eq!(kinds, vec![SyntaxKind::N_TYPE, SyntaxKind::N_EXPR]);
        let sum = decl.and_then(|d| d.last_child());
        let operands = sum.as_ref().map(child_kinds).unwrap_or_default();
        assert_eq!(operands, vec![SyntaxKind::N_EXPR, SyntaxKind::N_EXPR]);
    }

    #[test]
    fn comments_between_items_belong_to_root() {
        let parsed = parse("print 1;\n# note\nprint 2;\n");
        let root = parsed.syntax();
        let comment = root
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::T_COMMENT);
        assert!(comment.is_some());
    }

    #[test]
    fn skipped_statement_is_an_error_node() {
        let parsed = parse("print ;\nprint 2;\n");
        let kinds = child_kinds(&parsed.syntax());
        assert_eq!(kinds, vec![SyntaxKind::N_ERROR, SyntaxKind::N_STMT]);
    }

    #[test]
    fn unrecognised_characters_are_wrapped() {
        let parsed = parse("\u{7}print 1;");
        let kinds = child_kinds(&parsed.syntax());
        assert_eq!(kinds, vec![SyntaxKind::N_ERROR, SyntaxKind::N_STMT]);
    }
}
