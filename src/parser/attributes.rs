//! `&attribute` lists.

use crate::SyntaxKind;

use super::Parser;
use super::ast::{Attr, AttrArity, AttrName, AttrValue};

impl Parser<'_> {
    /// Zero or more attributes.
    pub(super) fn attrs(&mut self) -> Option<Vec<Attr>> {
        let mut attrs = Vec::new();
        while self.ts.at(SyntaxKind::T_ATTR) {
            attrs.push(self.attr()?);
        }
        Some(attrs)
    }

    /// One attribute with the argument its name calls for.
    pub(super) fn attr(&mut self) -> Option<Attr> {
        let (_, span) = self.ts.bump();
        let word = self.ts.slice(&span);
        let Some(name) = word.strip_prefix('&').and_then(AttrName::from_word) else {
            self.ts.push_error(span, format!("unknown attribute {word}"));
            return None;
        };
        let value = match name.arity() {
            AttrArity::Bare => {
                if self.ts.at(SyntaxKind::T_EQ) {
                    let (_, eq) = self.ts.peek();
                    self.ts
                        .push_error(eq, format!("attribute &{} takes no value", name.as_str()));
                    return None;
                }
                None
            }
            AttrArity::Expr => {
                if !self.ts.expect(SyntaxKind::T_EQ, "attribute") {
                    return None;
                }
                Some(AttrValue::Expr(self.unrestricted(Self::expr)?))
            }
            AttrArity::OptionalString => {
                if self.ts.eat(SyntaxKind::T_EQ) {
                    let (kind, text) = self.ts.peek_value();
                    if kind != SyntaxKind::T_STRING {
                        self.ts.error_expected(&[SyntaxKind::T_STRING], "attribute");
                        return None;
                    }
                    self.ts.bump();
                    let msg = self.ts.slice(&text);
                    let msg = msg.strip_prefix('"').unwrap_or(msg);
                    Some(AttrValue::Message(msg.strip_suffix('"').unwrap_or(msg).to_string()))
                } else {
                    None
                }
            }
        };
        Some(Attr {
            name,
            value,
            span: self.ts.span_from(span.start),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_util::assert_has_error;
    use crate::parse;
    use rstest::rstest;

    #[rstest]
    #[case("global x: count &redef;", "(global x (: count) &redef)")]
    #[case(
        "global t: table[count] of string &default=\"\" &create_expire=5 min;",
        "(global t (: (table [count] string)) &default=\"\" &create_expire=5min)"
    )]
    #[case(
        "global x = 1 &deprecated=\"gone\";",
        "(global x (= 1) &deprecated=\"gone\")"
    )]
    #[case("global x = 1 &deprecated;", "(global x (= 1) &deprecated)")]
    #[case(
        "global f: function() &priority=-5;",
        "(global f (: (function (params))) &priority=(- 5))"
    )]
    fn attribute_forms(#[case] src: &str, #[case] expected: &str) {
        let parsed = parse(src);
        assert!(parsed.errors().is_empty(), "{:?}", parsed.errors());
        assert_eq!(parsed.ast().sexpr(), expected);
    }

    #[test]
    fn bare_attribute_rejects_value() {
        let parsed = parse("global x: count &log = 1;");
        assert_has_error(parsed.errors(), "attribute &log takes no value");
    }
}
