//! Lazily lexed token stream with error tracking.
//!
//! The stream asks the [`Lexer`] for one token at a time using the
//! [`LexMode`] requested by the parser, so a `/` can be read as a pattern
//! where a value is expected and as division elsewhere. Consumed tokens and
//! their trivia are logged for building the lossless tree, comments are
//! filed into the comment channel and lexical errors are recorded once per
//! position.

use std::collections::BTreeMap;

use chumsky::Error as _;
use chumsky::error::Simple;
use log::debug;

use crate::tokenizer::{LexMode, Lexed, Lexer};
use crate::trivia::{Comment, CommentKind};
use crate::{Span, SyntaxKind};

use super::errors::LexicalError;

/// Where error recovery stops skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecoveryScope {
    /// Top level: a stray `}` is skipped too.
    TopLevel,
    /// Inside braces: an unmatched `}` ends the skip and is left for the
    /// enclosing block.
    Block,
}

pub(crate) struct TokenStream<'a> {
    lexer: Lexer<'a>,
    pos: usize,
    last_end: usize,
    cache: Option<(LexMode, Lexed)>,
    log: Vec<(SyntaxKind, Span)>,
    comments: Vec<Comment>,
    lex_errors: BTreeMap<usize, LexicalError>,
    pub(super) errors: Vec<Simple<SyntaxKind>>,
}

impl<'a> TokenStream<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            lexer: Lexer::new(src),
            pos: 0,
            last_end: 0,
            cache: None,
            log: Vec::new(),
            comments: Vec::new(),
            lex_errors: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    fn lexed(&mut self, mode: LexMode) -> &Lexed {
        if !matches!(&self.cache, Some((m, _)) if *m == mode) {
            self.cache = None;
        }
        let (lexer, pos) = (&self.lexer, self.pos);
        let (_, lexed) = self
            .cache
            .get_or_insert_with(|| (mode, lexer.lex(pos, mode)));
        lexed
    }

    /// Next token when an operator may follow.
    pub(crate) fn peek(&mut self) -> (SyntaxKind, Span) {
        self.peek_in(LexMode::Operator)
    }

    /// Next token when an expression value is expected.
    pub(crate) fn peek_value(&mut self) -> (SyntaxKind, Span) {
        self.peek_in(LexMode::Value)
    }

    pub(crate) fn peek_in(&mut self, mode: LexMode) -> (SyntaxKind, Span) {
        let lexed = self.lexed(mode);
        (lexed.kind, lexed.span.clone())
    }

    pub(crate) fn kind(&mut self) -> SyntaxKind {
        self.peek().0
    }

    pub(crate) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.kind() == kind
    }

    /// Kind of the significant token `n` places ahead (0 is the next one).
    ///
    /// The value-or-operator mode of each look-ahead token is guessed from
    /// the token before it.
    pub(crate) fn nth(&mut self, n: usize) -> SyntaxKind {
        let mut pos = self.pos;
        let mut mode = LexMode::Operator;
        let mut kind = SyntaxKind::T_EOF;
        for _ in 0..=n {
            let lexed = self.lexer.lex(pos, mode);
            kind = lexed.kind;
            if kind == SyntaxKind::T_EOF {
                break;
            }
            mode = if kind.expects_value_after() {
                LexMode::Value
            } else {
                LexMode::Operator
            };
            pos = lexed.span.end;
        }
        kind
    }

    /// Whether the parenthesised group starting at the next token is
    /// followed by `follow`.
    ///
    /// Returns `false` when the next token is not `(` or the group is
    /// unbalanced.
    pub(crate) fn paren_group_followed_by(&mut self, skip: usize, follow: SyntaxKind) -> bool {
        let mut pos = self.pos;
        let mut mode = LexMode::Operator;
        let mut depth = 0usize;
        let mut index = 0usize;
        loop {
            let lexed = self.lexer.lex(pos, mode);
            let kind = lexed.kind;
            if kind == SyntaxKind::T_EOF {
                return false;
            }
            if index == skip && kind != SyntaxKind::T_LPAREN {
                return false;
            }
            if index > skip && depth == 0 {
                return kind == follow;
            }
            if index >= skip {
                match kind {
                    SyntaxKind::T_LPAREN => depth += 1,
                    SyntaxKind::T_RPAREN => depth = depth.saturating_sub(1),
                    _ => {}
                }
            }
            mode = if kind.expects_value_after() {
                LexMode::Value
            } else {
                LexMode::Operator
            };
            pos = lexed.span.end;
            index += 1;
        }
    }

    /// Consume the next token.
    ///
    /// The token lexed by the most recent peek is consumed; without one the
    /// token is lexed in operator mode. Trivia before it is logged and
    /// comments are filed. At end of input only the trailing trivia is
    /// consumed.
    pub(crate) fn bump(&mut self) -> (SyntaxKind, Span) {
        let lexed = match self.cache.take() {
            Some((_, lexed)) => lexed,
            None => self.lexer.lex(self.pos, LexMode::Operator),
        };
        self.consume(lexed)
    }

    pub(crate) fn bump_in(&mut self, mode: LexMode) -> (SyntaxKind, Span) {
        self.lexed(mode);
        self.bump()
    }

    fn consume(&mut self, lexed: Lexed) -> (SyntaxKind, Span) {
        let Lexed {
            trivia,
            kind,
            span,
            errors,
        } = lexed;
        for (trivia_kind, trivia_span) in trivia {
            let comment_kind = match trivia_kind {
                SyntaxKind::T_COMMENT => Some(CommentKind::Minor),
                SyntaxKind::T_ZEEKYGEN => Some(CommentKind::Zeekygen),
                _ => None,
            };
            if let Some(kind) = comment_kind {
                self.comments.push(Comment {
                    kind,
                    span: trivia_span.clone(),
                });
            }
            self.log.push((trivia_kind, trivia_span));
        }
        for err in errors {
            self.lex_errors.entry(err.span().start).or_insert(err);
        }
        self.pos = span.end;
        if kind != SyntaxKind::T_EOF {
            self.last_end = span.end;
            self.log.push((kind, span.clone()));
        }
        (kind, span)
    }

    /// Consume the next token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or record an error labelled with `label`.
    pub(crate) fn expect(&mut self, kind: SyntaxKind, label: &'static str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error_expected(&[kind], label);
            false
        }
    }

    /// Record that one of `expected` was wanted at the next token.
    pub(crate) fn error_expected(&mut self, expected: &[SyntaxKind], label: &'static str) {
        let (found, span) = self.peek();
        let found = (found != SyntaxKind::T_EOF).then_some(found);
        self.errors.push(
            Simple::expected_input_found(span, expected.iter().copied().map(Some), found)
                .with_label(label),
        );
    }

    pub(crate) fn push_error(&mut self, span: Span, msg: impl Into<String>) {
        self.errors.push(Simple::custom(span, msg.into()));
    }

    /// Start offset of the next significant token.
    pub(crate) fn start(&mut self) -> usize {
        self.peek().1.start
    }

    /// End offset of the last consumed significant token.
    pub(crate) fn last_end(&self) -> usize {
        self.last_end
    }

    /// Span from `start` to the end of the last consumed token.
    pub(crate) fn span_from(&self, start: usize) -> Span {
        start..self.last_end.max(start)
    }

    pub(crate) fn slice(&self, span: &Span) -> &'a str {
        self.lexer.slice(span)
    }

    /// Skip tokens after a syntax error.
    ///
    /// Skipping ends after a `;` outside braces, after the `}` that closes a
    /// brace opened during the skip, before an unmatched `}` in
    /// [`RecoveryScope::Block`], or at end of input. At least one token is
    /// consumed unless the next token ends the skip outright.
    pub(crate) fn recover(&mut self, scope: RecoveryScope) {
        let start = self.start();
        let mut depth = 0usize;
        loop {
            match self.kind() {
                SyntaxKind::T_EOF => break,
                SyntaxKind::T_RBRACE if depth == 0 && scope == RecoveryScope::Block => break,
                SyntaxKind::T_SEMI if depth == 0 => {
                    self.bump();
                    break;
                }
                SyntaxKind::T_LBRACE => {
                    depth += 1;
                    self.bump();
                }
                SyntaxKind::T_RBRACE => {
                    self.bump();
                    if depth <= 1 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {
                    self.bump();
                }
            }
        }
        debug!("recovered by skipping {:?}", self.span_from(start));
    }

    /// Consume trailing trivia at end of input and hand over the results.
    pub(crate) fn finish(mut self) -> Finished {
        while self.kind() != SyntaxKind::T_EOF {
            self.bump();
        }
        self.bump();
        Finished {
            log: self.log,
            comments: self.comments,
            lex_errors: self.lex_errors.into_values().collect(),
            errors: self.errors,
        }
    }
}

/// Everything the stream collected during a parse.
pub(crate) struct Finished {
    pub(crate) log: Vec<(SyntaxKind, Span)>,
    pub(crate) comments: Vec<Comment>,
    pub(crate) lex_errors: Vec<LexicalError>,
    pub(crate) errors: Vec<Simple<SyntaxKind>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_mode_decides_slash() {
        let mut ts = TokenStream::new("/a/ x");
        assert_eq!(ts.peek().0, SyntaxKind::T_SLASH);
        assert_eq!(ts.peek_value().0, SyntaxKind::T_PATTERN);
        assert_eq!(ts.bump(), (SyntaxKind::T_PATTERN, 0..3));
        assert_eq!(ts.bump(), (SyntaxKind::T_IDENT, 4..5));
    }

    #[test]
    fn switching_modes_relexes_the_same_position() {
        let mut ts = TokenStream::new("/a/");
        assert_eq!(ts.peek_value(), (SyntaxKind::T_PATTERN, 0..3));
        assert_eq!(ts.peek(), (SyntaxKind::T_SLASH, 0..1));
        assert_eq!(ts.peek(), (SyntaxKind::T_SLASH, 0..1));
        assert_eq!(ts.peek_value(), (SyntaxKind::T_PATTERN, 0..3));
    }

    #[test]
    fn nth_looks_past_trivia() {
        let mut ts = TokenStream::new("redef # c\n enum Foo");
        assert_eq!(ts.nth(0), SyntaxKind::K_REDEF);
        assert_eq!(ts.nth(1), SyntaxKind::K_ENUM);
        assert_eq!(ts.nth(2), SyntaxKind::T_IDENT);
        assert_eq!(ts.nth(3), SyntaxKind::T_EOF);
    }

    #[test]
    fn paren_group_lookahead() {
        let mut ts = TokenStream::new("event foo(a, (b));");
        assert!(ts.paren_group_followed_by(2, SyntaxKind::T_SEMI));
        assert!(!ts.paren_group_followed_by(2, SyntaxKind::T_LBRACE));
        assert!(!ts.paren_group_followed_by(1, SyntaxKind::T_SEMI));
    }

    #[test]
    fn expect_records_found_and_label() {
        let mut ts = TokenStream::new("x");
        assert!(!ts.expect(SyntaxKind::T_SEMI, "statement"));
        let err = ts.errors.first().cloned();
        let Some(err) = err else {
            panic!("missing error");
        };
        assert_eq!(err.found(), Some(&SyntaxKind::T_IDENT));
        assert_eq!(err.label(), Some("statement"));
        assert_eq!(err.span(), 0..1);
    }

    #[test]
    fn recover_stops_after_semicolon() {
        let mut ts = TokenStream::new("a b c; d");
        ts.recover(RecoveryScope::TopLevel);
        assert_eq!(ts.peek(), (SyntaxKind::T_IDENT, 7..8));
    }

    #[test]
    fn recover_stops_after_closing_brace() {
        let mut ts = TokenStream::new("a { c; } d; e");
        ts.recover(RecoveryScope::TopLevel);
        assert_eq!(ts.peek(), (SyntaxKind::T_IDENT, 9..10));
    }

    #[test]
    fn recover_leaves_unmatched_brace_in_block() {
        let mut ts = TokenStream::new("a b } c");
        ts.recover(RecoveryScope::Block);
        assert_eq!(ts.peek().0, SyntaxKind::T_RBRACE);
    }

    #[test]
    fn finish_logs_everything() {
        let mut ts = TokenStream::new("x # c\n");
        ts.bump();
        let done = ts.finish();
        let kinds: Vec<_> = done.log.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::T_IDENT,
                SyntaxKind::T_WHITESPACE,
                SyntaxKind::T_COMMENT,
                SyntaxKind::T_WHITESPACE,
            ]
        );
        assert_eq!(done.comments.len(), 1);
    }
}
