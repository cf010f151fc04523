//! Parser for Zeek scripts.
//!
//! A hand-written recursive descent parser drives a lazily lexed
//! [`TokenStream`], with a Pratt loop for expressions. It produces three
//! views of the input:
//!
//! - a typed [`Ast`] held in arenas,
//! - a lossless `rowan` green tree whose text equals the source,
//! - a comment channel for documentation tooling.
//!
//! Syntax errors never abort the parse. A failing declaration or statement
//! is skipped up to a resynchronisation point and replaced by an error node.

use rowan::GreenNode;

use crate::trivia::{self, Comment};
use crate::{Span, SyntaxNode};

pub mod ast;
mod attributes;
mod cst_builder;
mod declaration;
mod errors;
mod expression;
mod list;
mod preproc;
mod statement;
mod token_stream;
mod types;

pub use errors::{LexicalError, LexicalErrorKind, ParseError};
pub use expression::parse_expression;

use ast::{Ast, DeclId, StmtId};
use token_stream::{RecoveryScope, TokenStream};

/// Nesting limit used by [`parse`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tunables for a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound on recursive nesting of expressions, statements and types.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Result of parsing a script.
#[derive(Debug, Clone)]
pub struct Parsed {
    green: GreenNode,
    ast: Ast,
    errors: Vec<ParseError>,
    comments: Vec<Comment>,
    src: String,
}

impl Parsed {
    /// Lossless green tree of the whole input.
    #[must_use]
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Red tree over [`Self::green`], rooted at `N_SOURCE_FILE`.
    #[must_use]
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    #[must_use]
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// Lexical and syntax diagnostics, sorted by start offset.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Every comment in source order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Comments lying entirely inside `span`.
    pub fn comments_in(&self, span: &Span) -> impl Iterator<Item = &Comment> {
        trivia::comments_in(&self.comments, span)
    }

    /// Zeekygen comments documenting the node that spans `span`.
    #[must_use]
    pub fn doc_comments(&self, span: &Span) -> Vec<&Comment> {
        trivia::doc_comments(&self.comments, &self.src, span)
    }

    /// The parsed source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.src
    }
}

/// Parse a script with default [`ParseOptions`].
#[must_use]
pub fn parse(src: &str) -> Parsed {
    parse_with(src, &ParseOptions::default())
}

/// Parse a script.
///
/// Always returns a tree; problems are reported through
/// [`Parsed::errors`].
#[must_use]
pub fn parse_with(src: &str, options: &ParseOptions) -> Parsed {
    let mut parser = Parser::new(src, options);
    parser.source_file();
    parser.finish()
}

/// Context flags that change how expressions are parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Restrictions {
    /// Inside `|...|`: a `|` closes the cardinality instead of being
    /// bitwise or.
    no_pipe: bool,
    /// The expression is a declaration initializer, so trailing attributes
    /// belong to the declaration rather than a `table()`/`set()`
    /// constructor.
    no_ctor_attrs: bool,
}

pub(crate) struct Parser<'a> {
    src: &'a str,
    ts: TokenStream<'a>,
    ast: Ast,
    restrictions: Restrictions,
    depth: usize,
    max_depth: usize,
    /// Open braces of blocks, bodies and `export`, for recovery.
    brace_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, options: &ParseOptions) -> Self {
        Self {
            src,
            ts: TokenStream::new(src),
            ast: Ast::default(),
            restrictions: Restrictions::default(),
            depth: 0,
            max_depth: options.max_depth(),
            brace_depth: 0,
        }
    }

    fn finish(self) -> Parsed {
        let Self { src, ts, ast, .. } = self;
        let done = ts.finish();
        let green = cst_builder::build_green_tree(&done.log, &ast, src);
        Parsed {
            green,
            ast,
            errors: errors::merge_errors(done.lex_errors, done.errors),
            comments: done.comments,
            src: src.to_string(),
        }
    }

    /// Run `f` one nesting level deeper, failing once the limit is hit.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if self.depth >= self.max_depth {
            let (_, span) = self.ts.peek();
            self.ts.push_error(span, "nesting too deep");
            return None;
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    /// Run `f` under `restrictions`, restoring the previous set afterwards.
    fn restricted<T>(&mut self, restrictions: Restrictions, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.restrictions, restrictions);
        let out = f(self);
        self.restrictions = saved;
        out
    }

    /// Parse a braced region, tracking depth for recovery.
    fn braced<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.brace_depth += 1;
        let out = f(self);
        self.brace_depth -= 1;
        out
    }

    fn recovery_scope(&self) -> RecoveryScope {
        if self.brace_depth == 0 {
            RecoveryScope::TopLevel
        } else {
            RecoveryScope::Block
        }
    }

    fn ident(&mut self, label: &'static str) -> Option<ast::Ident> {
        let (kind, span) = self.ts.peek();
        if kind != crate::SyntaxKind::T_IDENT {
            self.ts.error_expected(&[crate::SyntaxKind::T_IDENT], label);
            return None;
        }
        self.ts.bump();
        Some(ast::Ident {
            name: self.ts.slice(&span).to_string(),
            span,
        })
    }

    fn source_file(&mut self) {
        let mut decls: Vec<DeclId> = Vec::new();
        let mut stmts: Vec<StmtId> = Vec::new();
        let mut statements_started = false;
        while !self.ts.at(crate::SyntaxKind::T_EOF) {
            if self.starts_declaration(statements_started) {
                let decl = self.declaration();
                if statements_started {
                    let span = self.ast[decl].span.clone();
                    self.ts.push_error(span, "declaration after statements");
                }
                decls.push(decl);
            } else {
                let stmt = self.statement();
                if !matches!(self.ast[stmt].kind, ast::Stmt::Error | ast::Stmt::Empty) {
                    statements_started = true;
                }
                stmts.push(stmt);
            }
        }
        self.ast.source_file = ast::SourceFile {
            decls,
            stmts,
            span: 0..self.src.len(),
        };
    }
}

#[cfg(test)]
mod tests {
    use crate::test_util::{ErrorPattern, assert_has_error, messages};
    use super::*;
    use crate::SyntaxKind;

    #[test]
    fn options_builder() {
        let opts = ParseOptions::new().with_max_depth(8);
        assert_eq!(opts.max_depth(), 8);
        assert_eq!(ParseOptions::default().max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn tree_text_round_trips() {
        let src = "# c\nglobal x: count = 1; @\nprint x;\n";
        let parsed = parse(src);
        assert_eq!(parsed.syntax().text().to_string(), src);
        assert_eq!(parsed.syntax().kind(), SyntaxKind::N_SOURCE_FILE);
    }

    #[test]
    fn depth_limit_is_reported() {
        let src = format!("print {}1{};", "(".repeat(20), ")".repeat(20));
        let parsed = parse_with(&src, &ParseOptions::new().with_max_depth(10));
        assert_has_error(
            parsed.errors(),
            ErrorPattern::Contains("nesting too deep".into()),
        );
        assert_eq!(parsed.ast().source_file().stmts.len(), 1);
    }

    #[test]
    fn declarations_after_statements_are_flagged() {
        let parsed = parse("print 1;\nglobal x = 1;\n");
        assert_eq!(parsed.ast().source_file().decls.len(), 1);
        assert_eq!(messages(&parsed), vec!["declaration after statements".to_string()]);
    }
}
