//! Comment channel.
//!
//! Comments never appear in the typed tree. The parser collects them in
//! source order so that documentation tooling can look them up by position.
//! Ordinary `#` comments and `##` zeekygen comments are kept apart.

use crate::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `# ...`
    Minor,
    /// `## ...`, including the `##!` and `##<` forms.
    Zeekygen,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comment {
    pub kind: CommentKind,
    pub span: Span,
}

impl Comment {
    /// Comment text without its leading hashes and marker.
    ///
    /// `text` must be the source the comment was lexed from.
    #[must_use]
    pub fn body<'a>(&self, text: &'a str) -> &'a str {
        let raw = text.get(self.span.clone()).unwrap_or_default();
        let raw = raw.trim_start_matches('#');
        raw.strip_prefix(['!', '<']).unwrap_or(raw).trim()
    }
}

/// Comments whose spans lie entirely within `span`.
pub(crate) fn comments_in<'c>(comments: &'c [Comment], span: &Span) -> impl Iterator<Item = &'c Comment> {
    let start = comments.partition_point(|c| c.span.start < span.start);
    comments
        .get(start..)
        .unwrap_or_default()
        .iter()
        .take_while(move |c| c.span.end <= span.end)
}

fn starts_with(src: &str, comment: &Comment, prefix: &str) -> bool {
    src.get(comment.span.clone())
        .is_some_and(|text| text.starts_with(prefix))
}

fn only_whitespace(src: &str, from: usize, to: usize) -> bool {
    src.get(from..to)
        .is_some_and(|gap| gap.chars().all(char::is_whitespace))
}

/// Zeekygen comments documenting the node spanning `span`.
///
/// These are the contiguous `##` block directly above the node, separated
/// from it by whitespace only, followed by any `##<` comments that start on
/// the node's last line. `##!` script summaries and `##<` comments belonging
/// to earlier nodes never form part of the leading block.
pub(crate) fn doc_comments<'c>(comments: &'c [Comment], src: &str, span: &Span) -> Vec<&'c Comment> {
    let before = comments.partition_point(|c| c.span.end <= span.start);
    let leading = comments.get(..before).unwrap_or_default();

    let mut block = Vec::new();
    let mut gap_end = span.start;
    for comment in leading.iter().rev() {
        let is_doc = comment.kind == CommentKind::Zeekygen
            && !starts_with(src, comment, "##!")
            && !starts_with(src, comment, "##<");
        if !is_doc || !only_whitespace(src, comment.span.end, gap_end) {
            break;
        }
        block.push(comment);
        gap_end = comment.span.start;
    }
    block.reverse();

    let after = comments.partition_point(|c| c.span.start < span.end);
    let trailing = comments.get(after..).unwrap_or_default();
    let line_end = src
        .get(span.end..)
        .and_then(|rest| rest.find('\n'))
        .map_or(src.len(), |n| span.end + n);
    block.extend(trailing.iter().take_while(|c| {
        c.span.start <= line_end && c.kind == CommentKind::Zeekygen && starts_with(src, c, "##<")
    }));
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(kind: CommentKind, span: Span) -> Comment {
        Comment { kind, span }
    }

    #[test]
    fn body_strips_markers() {
        let src = "##< the port";
        let c = comment(CommentKind::Zeekygen, 0..src.len());
        assert_eq!(c.body(src), "the port");
    }

    #[test]
    fn leading_block_stops_at_code() {
        let src = "## old\nx;\n## one\n## two\nglobal y: count;";
        let comments = vec![
            comment(CommentKind::Zeekygen, 0..6),
            comment(CommentKind::Zeekygen, 10..16),
            comment(CommentKind::Zeekygen, 17..23),
        ];
        let start = 24;
        let docs = doc_comments(&comments, src, &(start..src.len()));
        let spans: Vec<_> = docs.iter().map(|c| c.span.clone()).collect();
        assert_eq!(spans, vec![10..16, 17..23]);
    }

    #[test]
    fn trailing_comment_on_same_line() {
        let src = "a: count; ##< doc\n## next";
        let comments = vec![
            comment(CommentKind::Zeekygen, 10..17),
            comment(CommentKind::Zeekygen, 18..25),
        ];
        let docs = doc_comments(&comments, src, &(0..9));
        assert_eq!(docs.len(), 1);
        assert_eq!(docs.first().map(|c| c.span.clone()), Some(10..17));
    }

    #[test]
    fn minor_comments_are_not_docs() {
        let src = "# note\nx";
        let comments = vec![comment(CommentKind::Minor, 0..6)];
        assert!(doc_comments(&comments, src, &(7..8)).is_empty());
        assert_eq!(comments_in(&comments, &(0..8)).count(), 1);
    }
}
