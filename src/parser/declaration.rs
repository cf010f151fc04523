//! Declarations: `module`, `export`, variables, `redef` forms, `type` and
//! function, hook and event definitions.

use log::debug;

use crate::SyntaxKind;

use super::ast::{
    Decl, DeclId, FuncDecl, FuncFlavor, Init, InitClass, Initializer, NonEmpty, VarDecl,
};
use super::expression::starts_expr;
use super::list::Trailing;
use super::{Parser, Restrictions};

/// Tokens that can begin a declaration, for diagnostics.
const DECL_START: &[SyntaxKind] = &[
    SyntaxKind::K_MODULE,
    SyntaxKind::K_EXPORT,
    SyntaxKind::K_GLOBAL,
    SyntaxKind::K_OPTION,
    SyntaxKind::K_CONST,
    SyntaxKind::K_REDEF,
    SyntaxKind::K_TYPE,
    SyntaxKind::K_FUNCTION,
    SyntaxKind::K_HOOK,
    SyntaxKind::K_EVENT,
    SyntaxKind::T_DIRECTIVE,
];

impl Parser<'_> {
    /// Whether the next tokens begin a declaration rather than a statement.
    ///
    /// `const` and directives count as declarations only before the first
    /// statement. `function` and `hook` followed by a name define one, and
    /// so does `event name(...)` unless a `;` follows the argument list,
    /// which makes it an event statement.
    pub(super) fn starts_declaration(&mut self, statements_started: bool) -> bool {
        match self.ts.kind() {
            SyntaxKind::K_MODULE
            | SyntaxKind::K_EXPORT
            | SyntaxKind::K_GLOBAL
            | SyntaxKind::K_OPTION
            | SyntaxKind::K_TYPE
            | SyntaxKind::K_REDEF => true,
            SyntaxKind::K_CONST | SyntaxKind::T_DIRECTIVE => !statements_started,
            SyntaxKind::K_FUNCTION | SyntaxKind::K_HOOK => self.ts.nth(1) == SyntaxKind::T_IDENT,
            SyntaxKind::K_EVENT => {
                if self.ts.nth(1) != SyntaxKind::T_IDENT {
                    return false;
                }
                let fired = self.ts.paren_group_followed_by(2, SyntaxKind::T_SEMI);
                debug!(
                    "event at {} read as {}",
                    self.ts.start(),
                    if fired { "statement" } else { "handler" }
                );
                !fired
            }
            _ => false,
        }
    }

    /// Parse one declaration, recovering on error.
    pub(super) fn declaration(&mut self) -> DeclId {
        let start = self.ts.start();
        if self.skip_unknown_directive() {
            return self.alloc_decl(Decl::Error, start);
        }
        if let Some(id) = self.nested(|p| p.decl_inner(start)) {
            return id;
        }
        let scope = self.recovery_scope();
        self.ts.recover(scope);
        self.alloc_decl(Decl::Error, start)
    }

    fn alloc_decl(&mut self, decl: Decl, start: usize) -> DeclId {
        let span = self.ts.span_from(start);
        self.ast.decls.alloc(decl, span)
    }

    fn decl_semi(&mut self) -> Option<()> {
        self.ts
            .expect(SyntaxKind::T_SEMI, "declaration")
            .then_some(())
    }

    fn decl_inner(&mut self, start: usize) -> Option<DeclId> {
        let kind = self.ts.kind();
        let decl = match kind {
            SyntaxKind::K_MODULE => {
                self.ts.bump();
                let name = self.ident("module")?;
                self.decl_semi()?;
                Decl::Module(name)
            }
            SyntaxKind::K_EXPORT => {
                self.ts.bump();
                Decl::Export(self.export_body()?)
            }
            SyntaxKind::K_GLOBAL => {
                self.ts.bump();
                Decl::Global(self.var_decl()?)
            }
            SyntaxKind::K_OPTION => {
                self.ts.bump();
                Decl::Option(self.var_decl()?)
            }
            SyntaxKind::K_CONST => {
                self.ts.bump();
                Decl::Const(self.var_decl()?)
            }
            SyntaxKind::K_REDEF => {
                self.ts.bump();
                self.redef()?
            }
            SyntaxKind::K_TYPE => {
                self.ts.bump();
                let name = self.ident("type declaration")?;
                if !self.ts.expect(SyntaxKind::T_COLON, "type declaration") {
                    return None;
                }
                let ty = self.ty()?;
                let attrs = NonEmpty::from_vec(self.attrs()?);
                self.decl_semi()?;
                Decl::TypeDef { name, ty, attrs }
            }
            SyntaxKind::K_FUNCTION | SyntaxKind::K_HOOK | SyntaxKind::K_EVENT => {
                self.ts.bump();
                let flavor = match kind {
                    SyntaxKind::K_FUNCTION => FuncFlavor::Function,
                    SyntaxKind::K_HOOK => FuncFlavor::Hook,
                    _ => FuncFlavor::Event,
                };
                Decl::FuncHdr(self.func_decl(flavor, false)?)
            }
            SyntaxKind::T_DIRECTIVE => Decl::Preproc(self.preproc()?),
            _ => {
                self.ts.error_expected(DECL_START, "declaration");
                return None;
            }
        };
        Some(self.alloc_decl(decl, start))
    }

    /// `{ decls }` of an `export` block.
    fn export_body(&mut self) -> Option<Vec<DeclId>> {
        if !self.ts.expect(SyntaxKind::T_LBRACE, "export") {
            return None;
        }
        let decls = self.braced(|p| {
            let mut decls = Vec::new();
            while !matches!(p.ts.kind(), SyntaxKind::T_RBRACE | SyntaxKind::T_EOF) {
                if p.starts_declaration(false) {
                    decls.push(p.declaration());
                } else {
                    let start = p.ts.start();
                    p.ts.error_expected(DECL_START, "export");
                    let scope = p.recovery_scope();
                    p.ts.recover(scope);
                    decls.push(p.alloc_decl(Decl::Error, start));
                }
            }
            decls
        });
        self.ts
            .expect(SyntaxKind::T_RBRACE, "export")
            .then_some(decls)
    }

    /// Everything after `redef`.
    fn redef(&mut self) -> Option<Decl> {
        match self.ts.kind() {
            SyntaxKind::K_ENUM => {
                self.ts.bump();
                let name = self.ident("redef enum")?;
                if !self.ts.expect(SyntaxKind::T_PLUS_EQ, "redef enum") {
                    return None;
                }
                let items = self.enum_body()?;
                self.decl_semi()?;
                Some(Decl::RedefEnum { name, items })
            }
            SyntaxKind::K_RECORD => {
                self.ts.bump();
                let name = self.ident("redef record")?;
                if !self.ts.expect(SyntaxKind::T_PLUS_EQ, "redef record") {
                    return None;
                }
                let fields = self.record_body()?;
                let attrs = NonEmpty::from_vec(self.attrs()?);
                self.decl_semi()?;
                Some(Decl::RedefRecord {
                    name,
                    fields,
                    attrs,
                })
            }
            SyntaxKind::K_EVENT => {
                self.ts.bump();
                Some(Decl::FuncHdr(self.func_decl(FuncFlavor::Event, true)?))
            }
            _ => Some(Decl::Redef(self.var_decl()?)),
        }
    }

    /// Name, parameters, attributes, interleaved directives and body of a
    /// function, hook or event handler.
    fn func_decl(&mut self, flavor: FuncFlavor, is_redef: bool) -> Option<FuncDecl> {
        let name = self.ident(flavor.keyword())?;
        let params = self.func_params()?;
        let attrs = NonEmpty::from_vec(self.attrs()?);
        let mut preprocs = Vec::new();
        while self.ts.at(SyntaxKind::T_DIRECTIVE) {
            let start = self.ts.start();
            let preproc = self.preproc()?;
            preprocs.push(self.alloc_decl(Decl::Preproc(preproc), start));
        }
        let body = self.body()?;
        Some(FuncDecl {
            flavor,
            is_redef,
            name,
            params,
            attrs,
            preprocs,
            body,
        })
    }

    /// `name [: type] [class init] [attrs] ;`, shared by `global`,
    /// `option`, `const`, `redef` and `local`.
    pub(super) fn var_decl(&mut self) -> Option<VarDecl> {
        let name = self.ident("declaration")?;
        let ty = if self.ts.eat(SyntaxKind::T_COLON) {
            Some(self.ty()?)
        } else {
            None
        };
        let class = match self.ts.kind() {
            SyntaxKind::T_EQ => Some(InitClass::Assign),
            SyntaxKind::T_PLUS_EQ => Some(InitClass::Add),
            SyntaxKind::T_MINUS_EQ => Some(InitClass::Remove),
            _ => None,
        };
        let init = if let Some(class) = class {
            self.ts.bump();
            Some(Initializer {
                class: Some(class),
                value: self.init_value()?,
            })
        } else if self.ts.at(SyntaxKind::T_LBRACE) || starts_expr(self.ts.peek_value().0) {
            Some(Initializer {
                class: None,
                value: self.init_value()?,
            })
        } else {
            None
        };
        let attrs = NonEmpty::from_vec(self.attrs()?);
        self.decl_semi()?;
        Some(VarDecl {
            name,
            ty,
            init,
            attrs,
        })
    }

    /// `{ e, ... }` with an optional trailing comma, or one expression.
    fn init_value(&mut self) -> Option<Init> {
        if !self.ts.eat(SyntaxKind::T_LBRACE) {
            let restrictions = Restrictions {
                no_ctor_attrs: true,
                ..Restrictions::default()
            };
            return Some(Init::Expr(self.restricted(restrictions, Self::expr)?));
        }
        let items = if self.ts.at(SyntaxKind::T_RBRACE) {
            Vec::new()
        } else {
            let items = self.unrestricted(|p| {
                p.list1(
                    "initializer",
                    &[SyntaxKind::T_COMMA],
                    SyntaxKind::T_RBRACE,
                    Trailing::Allowed,
                    Self::expr,
                )
            })?;
            items.iter().copied().collect()
        };
        self.ts
            .expect(SyntaxKind::T_RBRACE, "initializer")
            .then_some(Init::Braced(items))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_util::script_sexpr;
    use crate::parse;
    use rstest::rstest;

    #[rstest]
    #[case("module Foo;", "(module Foo)")]
    #[case("global x: count;", "(global x (: count))")]
    #[case("global x = 1;", "(global x (= 1))")]
    #[case("option y: bool = T &redef;", "(option y (: bool) (= T) &redef)")]
    #[case("const z = 5 sec;", "(const z (= 5sec))")]
    #[case("redef x += 2;", "(redef x (+= 2))")]
    #[case("redef s -= { 1, 2, };", "(redef s (-= (braced 1 2)))")]
    #[case("global s: set[count] = {};", "(global s (: (set count)) (= (braced)))")]
    #[case("global s: set[count] { 1 };", "(global s (: (set count)) (init (braced 1)))")]
    #[case(
        "global t = table() &default=0;",
        "(global t (= (table)) &default=0)"
    )]
    #[case("redef enum Log::ID += { LOG };", "(redef-enum Log::ID LOG)")]
    #[case(
        "redef record Conn::Info += { x: count &optional; } &log;",
        "(redef-record Conn::Info (x count &optional) &log)"
    )]
    #[case("type R: record { a: int; };", "(type R (record (a int)))")]
    fn declaration_forms(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(script_sexpr(src), expected);
    }

    #[test]
    fn export_block() {
        assert_eq!(
            script_sexpr("export { global a: count; type S: string; }"),
            "(export (global a (: count)) (type S string))"
        );
    }

    #[test]
    fn statement_inside_export_is_an_error() {
        let parsed = parse("export { print 1; global a = 1; }");
        assert_eq!(parsed.errors().len(), 1);
        assert_eq!(parsed.ast().sexpr(), "(export <error> (global a (= 1)))");
    }

    #[rstest]
    #[case(
        "function f(x: count): count { return x; }",
        "(function f (params (x count)) (-> count) (block (return x)))"
    )]
    #[case(
        "event zeek_init() &priority=10 { }",
        "(event zeek_init (params) &priority=10 (block))"
    )]
    #[case("hook h() { break; }", "(hook h (params) (block (break)))")]
    #[case(
        "redef event e(c: connection) { }",
        "(redef event e (params (c connection)) (block))"
    )]
    #[case(
        "event e()\n@if ( T )\n{ }",
        "(event e (params) (@if T) (block))"
    )]
    fn function_definitions(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(script_sexpr(src), expected);
    }

    #[rstest]
    #[case("event e(1);", false)]
    #[case("event e(c: connection) { }", true)]
    #[case("function f() { }", true)]
    #[case("f(1);", false)]
    fn event_statement_or_handler(#[case] src: &str, #[case] is_decl: bool) {
        let parsed = parse(src);
        assert!(parsed.errors().is_empty(), "{:?}", parsed.errors());
        let root = parsed.ast().source_file();
        assert_eq!(root.decls.len() == 1, is_decl);
        assert_eq!(root.stmts.len() == 1, !is_decl);
    }

    #[test]
    fn malformed_declaration_recovers() {
        let parsed = parse("global = 1;\nglobal y = 2;\n");
        assert_eq!(parsed.errors().len(), 1);
        assert_eq!(parsed.ast().sexpr(), "<error>\n(global y (= 2))");
    }
}
