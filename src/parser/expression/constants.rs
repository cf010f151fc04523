//! Decoding of constant and pattern tokens.

use log::debug;

use crate::parser::Parser;
use crate::parser::ast::{Constant, Expr, ExprId, Protocol, TimeUnit};
use crate::{Span, SyntaxKind};

/// Split an interval such as `1.5 hrs` into amount and unit.
fn interval(text: &str) -> Option<Constant> {
    let split = text.find(|c: char| !(c.is_ascii_digit() || c == '.'))?;
    let (amount, unit) = text.split_at_checked(split)?;
    let unit = TimeUnit::from_word(unit.trim_start_matches([' ', '\t']))?;
    Some(Constant::Interval {
        amount: amount.to_string(),
        unit,
    })
}

fn port(text: &str) -> Option<Constant> {
    let (number, protocol) = text.split_once('/')?;
    Some(Constant::Port {
        number: number.to_string(),
        protocol: Protocol::from_word(protocol)?,
    })
}

/// Contents of a string literal. An unterminated literal has no closing
/// quote to strip.
fn string(text: &str) -> String {
    let body = text.strip_prefix('"').unwrap_or(text);
    body.strip_suffix('"').unwrap_or(body).to_string()
}

/// Regex text and case-insensitivity of a `/.../` or `/.../i` literal.
pub(super) fn pattern(text: &str) -> (String, bool) {
    let body = text.strip_prefix('/').unwrap_or(text);
    if let Some(regex) = body.strip_suffix("/i") {
        (regex.to_string(), true)
    } else {
        (body.strip_suffix('/').unwrap_or(body).to_string(), false)
    }
}

/// Largest subnet prefix length for the address family.
fn max_prefix(kind: SyntaxKind) -> u8 {
    if kind == SyntaxKind::T_IPV4 { 32 } else { 128 }
}

impl Parser<'_> {
    /// Parse the constant token `kind` at `span`, folding a following
    /// `/len` onto addresses.
    pub(super) fn constant(&mut self, kind: SyntaxKind, span: &Span) -> Option<ExprId> {
        self.ts.bump();
        let text = self.ts.slice(span);
        let constant = match kind {
            SyntaxKind::K_T => Some(Constant::Bool(true)),
            SyntaxKind::K_F => Some(Constant::Bool(false)),
            SyntaxKind::T_INTEGER => Some(Constant::Integer(text.to_string())),
            SyntaxKind::T_FLOAT => Some(Constant::Float(text.to_string())),
            SyntaxKind::T_HEX => Some(Constant::Hex(text.to_string())),
            SyntaxKind::T_HOSTNAME => Some(Constant::Hostname(text.to_string())),
            SyntaxKind::T_STRING => Some(Constant::String(string(text))),
            SyntaxKind::T_PORT => port(text),
            SyntaxKind::T_INTERVAL => interval(text),
            SyntaxKind::T_IPV4 | SyntaxKind::T_IPV6 => {
                let addr = text.to_string();
                let prefix = self.subnet_prefix(kind);
                Some(if kind == SyntaxKind::T_IPV4 {
                    Constant::Ipv4 { addr, prefix }
                } else {
                    Constant::Ipv6 { addr, prefix }
                })
            }
            _ => None,
        };
        let Some(constant) = constant else {
            self.ts
                .push_error(span.clone(), format!("malformed {}", kind.describe()));
            return None;
        };
        Some(self.alloc_expr(Expr::Constant(constant), span.start))
    }

    /// Consume `/ integer` after an address literal, if present.
    fn subnet_prefix(&mut self, kind: SyntaxKind) -> Option<u8> {
        if self.ts.nth(0) != SyntaxKind::T_SLASH || self.ts.nth(1) != SyntaxKind::T_INTEGER {
            return None;
        }
        self.ts.bump();
        let (_, span) = self.ts.bump_in(crate::tokenizer::LexMode::Value);
        debug!("folded subnet prefix at {span:?}");
        let len = self
            .ts
            .slice(&span)
            .parse::<u8>()
            .ok()
            .filter(|len| *len <= max_prefix(kind));
        if len.is_none() {
            self.ts
                .push_error(span, "subnet prefix length out of range");
        }
        len
    }
}
