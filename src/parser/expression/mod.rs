//! Pratt parser for Zeek expressions.
//!
//! [`pratt`] hosts the entry points and postfix forms, [`prefix`] handles
//! atoms, constructors and prefix operators, [`infix`] folds binary,
//! assignment, cast and ternary operators and [`constants`] decodes literal
//! tokens.

mod constants;
mod infix;
mod pratt;
mod prefix;

pub use pratt::parse_expression;
pub(super) use prefix::starts_expr;
