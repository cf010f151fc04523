//! Library crate for zeek-syntax.
//!
//! Parses Zeek scripts into a typed AST and a lossless `rowan` tree,
//! collecting diagnostics instead of stopping at the first error.

#![forbid(unsafe_code)]

pub mod language;
pub mod line_index;
pub mod parser;
pub mod tokenizer;
pub mod trivia;

// Only expose test utilities to tests and opt-in consumers.
#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_util;

pub use language::{SyntaxKind, SyntaxNode, ZeekLanguage};
pub use line_index::LineIndex;
pub use parser::{
    LexicalError, LexicalErrorKind, ParseError, ParseOptions, Parsed, ast, parse,
    parse_expression, parse_with,
};
pub use tokenizer::{Span, tokenize_with_trivia, tokenize_without_trivia};
pub use trivia::{Comment, CommentKind};
