//! Type expressions, formal parameters and record fields.

use crate::SyntaxKind;

use super::Parser;
use super::ast::{
    AttrName, AttrValue, Deprecation, EnumItem, FormalArgs, FuncParams, NonEmpty, Param, Primitive, Type, TypeId,
    TypeSpec,
};
use super::list::Trailing;

const TYPE_START: &[SyntaxKind] = &[
    SyntaxKind::T_IDENT,
    SyntaxKind::K_TABLE,
    SyntaxKind::K_SET,
    SyntaxKind::K_RECORD,
    SyntaxKind::K_UNION,
    SyntaxKind::K_ENUM,
    SyntaxKind::K_LIST,
    SyntaxKind::K_VECTOR,
    SyntaxKind::K_FUNCTION,
    SyntaxKind::K_EVENT,
    SyntaxKind::K_HOOK,
    SyntaxKind::K_FILE,
    SyntaxKind::K_OPAQUE,
];

impl Parser<'_> {
    pub(super) fn ty(&mut self) -> Option<TypeId> {
        self.nested(|p| {
            let (kind, span) = p.ts.peek();
            let start = span.start;
            let ty = match kind {
                SyntaxKind::T_IDENT => {
                    let ident = p.ident("type")?;
                    Primitive::from_word(&ident.name)
                        .map_or_else(|| Type::Named(ident), Type::Primitive)
                }
                SyntaxKind::K_TABLE => {
                    p.ts.bump();
                    let keys = p.bracketed_types("table")?;
                    if !p.ts.expect(SyntaxKind::K_OF, "table type") {
                        return None;
                    }
                    Type::Table {
                        keys,
                        value: p.ty()?,
                    }
                }
                SyntaxKind::K_SET => {
                    p.ts.bump();
                    Type::Set(p.bracketed_types("set")?)
                }
                SyntaxKind::K_RECORD => {
                    p.ts.bump();
                    Type::Record(p.record_body()?)
                }
                SyntaxKind::K_UNION => {
                    p.ts.bump();
                    if !p.ts.expect(SyntaxKind::T_LBRACE, "union type") {
                        return None;
                    }
                    let members = p.list1(
                        "union type",
                        &[SyntaxKind::T_COMMA],
                        SyntaxKind::T_RBRACE,
                        Trailing::Rejected,
                        Self::ty,
                    )?;
                    if !p.ts.expect(SyntaxKind::T_RBRACE, "union type") {
                        return None;
                    }
                    Type::Union(members)
                }
                SyntaxKind::K_ENUM => {
                    p.ts.bump();
                    Type::Enum(p.enum_body()?)
                }
                SyntaxKind::K_LIST => {
                    p.ts.bump();
                    Type::List(p.of_type()?)
                }
                SyntaxKind::K_FILE => {
                    p.ts.bump();
                    Type::File(p.of_type()?)
                }
                SyntaxKind::K_VECTOR => {
                    p.ts.bump();
                    if !p.ts.expect(SyntaxKind::K_OF, "vector type") {
                        return None;
                    }
                    Type::Vector(p.ty()?)
                }
                SyntaxKind::K_FUNCTION => {
                    p.ts.bump();
                    Type::Function(p.func_params()?)
                }
                SyntaxKind::K_EVENT | SyntaxKind::K_HOOK => {
                    p.ts.bump();
                    let args = p.paren_args()?;
                    if kind == SyntaxKind::K_EVENT {
                        Type::Event(args)
                    } else {
                        Type::Hook(args)
                    }
                }
                SyntaxKind::K_OPAQUE => {
                    p.ts.bump();
                    if !p.ts.expect(SyntaxKind::K_OF, "opaque type") {
                        return None;
                    }
                    Type::Opaque(p.ident("opaque type")?)
                }
                _ => {
                    p.ts.error_expected(TYPE_START, "type");
                    return None;
                }
            };
            let span = p.ts.span_from(start);
            Some(p.ast.types.alloc(ty, span))
        })
    }

    /// Optional `of T` after `list` and `file`.
    fn of_type(&mut self) -> Option<Option<TypeId>> {
        if self.ts.eat(SyntaxKind::K_OF) {
            Some(Some(self.ty()?))
        } else {
            Some(None)
        }
    }

    /// `[T, ...]` of `table` and `set`.
    fn bracketed_types(&mut self, label: &'static str) -> Option<NonEmpty<TypeId>> {
        if !self.ts.expect(SyntaxKind::T_LBRACKET, label) {
            return None;
        }
        let types = self.list1(
            label,
            &[SyntaxKind::T_COMMA],
            SyntaxKind::T_RBRACKET,
            Trailing::Rejected,
            Self::ty,
        )?;
        self.ts.expect(SyntaxKind::T_RBRACKET, label).then_some(types)
    }

    /// `{ field: T [attrs]; ... }`
    pub(super) fn record_body(&mut self) -> Option<Vec<TypeSpec>> {
        if !self.ts.expect(SyntaxKind::T_LBRACE, "record type") {
            return None;
        }
        let mut fields = Vec::new();
        while !matches!(self.ts.kind(), SyntaxKind::T_RBRACE | SyntaxKind::T_EOF) {
            fields.push(self.type_spec()?);
        }
        self.ts
            .expect(SyntaxKind::T_RBRACE, "record type")
            .then_some(fields)
    }

    fn type_spec(&mut self) -> Option<TypeSpec> {
        let start = self.ts.start();
        let name = self.ident("record field")?;
        if !self.ts.expect(SyntaxKind::T_COLON, "record field") {
            return None;
        }
        let ty = self.ty()?;
        let attrs = NonEmpty::from_vec(self.attrs()?);
        if !self.ts.expect(SyntaxKind::T_SEMI, "record field") {
            return None;
        }
        Some(TypeSpec {
            name,
            ty,
            attrs,
            span: self.ts.span_from(start),
        })
    }

    /// `{ A [= v] [&deprecated], ... }` with an optional trailing comma.
    pub(super) fn enum_body(&mut self) -> Option<NonEmpty<EnumItem>> {
        if !self.ts.expect(SyntaxKind::T_LBRACE, "enum") {
            return None;
        }
        let items = self.list1(
            "enum",
            &[SyntaxKind::T_COMMA],
            SyntaxKind::T_RBRACE,
            Trailing::Allowed,
            Self::enum_item,
        )?;
        self.ts.expect(SyntaxKind::T_RBRACE, "enum").then_some(items)
    }

    fn enum_item(&mut self) -> Option<EnumItem> {
        let name = self.ident("enum item")?;
        let value = if self.ts.eat(SyntaxKind::T_EQ) {
            Some(self.expr()?)
        } else {
            None
        };
        let deprecated = if self.ts.at(SyntaxKind::T_ATTR) {
            let attr = self.attr()?;
            if attr.name != AttrName::Deprecated {
                self.ts
                    .push_error(attr.span, "only &deprecated may follow an enum item");
                return None;
            }
            let message = match attr.value {
                Some(AttrValue::Message(msg)) => Some(msg),
                _ => None,
            };
            Some(Deprecation {
                message,
                span: attr.span,
            })
        } else {
            None
        };
        Some(EnumItem {
            name,
            value,
            deprecated,
        })
    }

    /// `( [args] ) [: ret]`
    pub(super) fn func_params(&mut self) -> Option<FuncParams> {
        let args = self.paren_args()?;
        let ret = if self.ts.eat(SyntaxKind::T_COLON) {
            Some(self.ty()?)
        } else {
            None
        };
        Some(FuncParams { args, ret })
    }

    /// `( name: T [attrs] ; ... )`. Either `;` or `,` separates arguments
    /// and a dangling separator is rejected.
    fn paren_args(&mut self) -> Option<Option<FormalArgs>> {
        if !self.ts.expect(SyntaxKind::T_LPAREN, "parameters") {
            return None;
        }
        let args = if self.ts.at(SyntaxKind::T_RPAREN) {
            None
        } else {
            Some(self.list1(
                "parameters",
                &[SyntaxKind::T_SEMI, SyntaxKind::T_COMMA],
                SyntaxKind::T_RPAREN,
                Trailing::Rejected,
                Self::param,
            )?)
        };
        self.ts
            .expect(SyntaxKind::T_RPAREN, "parameters")
            .then_some(args)
    }

    fn param(&mut self) -> Option<Param> {
        let name = self.ident("parameter")?;
        if !self.ts.expect(SyntaxKind::T_COLON, "parameter") {
            return None;
        }
        let ty = self.ty()?;
        let attrs = NonEmpty::from_vec(self.attrs()?);
        Some(Param { name, ty, attrs })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_util::{assert_has_error, script_sexpr};
    use crate::parse;
    use rstest::rstest;

    #[rstest]
    #[case("type t: count;", "(type t count)")]
    #[case("type t: Conn::Info;", "(type t Conn::Info)")]
    #[case("type t: table[addr, port] of string;", "(type t (table [addr port] string))")]
    #[case("type t: set[subnet];", "(type t (set subnet))")]
    #[case("type t: vector of vector of int;", "(type t (vector (vector int)))")]
    #[case("type t: list;", "(type t list)")]
    #[case("type t: file of string;", "(type t (file string))")]
    #[case("type t: opaque of md5;", "(type t (opaque md5))")]
    #[case("type t: union { count, string };", "(type t (union count string))")]
    #[case("type t: enum { A, B = 2, C, };", "(type t (enum A (B 2) C))")]
    #[case("type t: event(c: connection);", "(type t (event (params (c connection))))")]
    #[case("type t: hook();", "(type t (hook (params)))")]
    #[case(
        "type t: function(a: count; b: string &optional): bool;",
        "(type t (function (params (a count) (b string &optional)) (-> bool)))"
    )]
    #[case(
        "type t: record { a: count &log; b: string &optional; };",
        "(type t (record (a count &log) (b string &optional)))"
    )]
    fn type_forms(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(script_sexpr(src), expected);
    }

    #[test]
    fn deprecated_enum_items() {
        assert_eq!(
            script_sexpr("type t: enum { A &deprecated=\"use B\", B };"),
            "(type t (enum (A &deprecated=\"use B\") B))"
        );
    }

    #[test]
    fn dangling_parameter_separator() {
        let parsed = parse("type t: function(a: count;);");
        assert_has_error(parsed.errors(), "dangling ';' in parameters");
    }
}
