//! Compact S-expression rendering of the typed tree.
//!
//! Used by tests and the command line tool to show tree structure at a
//! glance. Operators render as their symbol in head position, e.g.
//! `a + b * c` becomes `(+ a (* b c))`; optional parts that are absent in
//! positional slots render as `_`.

use super::{
    AddDelete, Ast, Attr, AttrValue, Capture, CaseLabel, Constant, Decl, DeclId, EnumItem, EventHdr, Expr,
    ExprId, FormalArgs, FuncDecl, FuncParams, Init, LoopControl, NonEmpty, Preproc, Stmt, StmtId, Type, TypeId,
    TypeSpec, VarDecl,
};

fn list(head: &str, items: impl IntoIterator<Item = String>) -> String {
    let mut out = format!("({head}");
    for item in items {
        out.push(' ');
        out.push_str(&item);
    }
    out.push(')');
    out
}

/// `(a b c)` without a head.
fn group(items: impl IntoIterator<Item = String>) -> String {
    format!("({})", items.into_iter().collect::<Vec<_>>().join(" "))
}

fn attr(ast: &Ast, attr: &Attr) -> String {
    let name = attr.name.as_str();
    match &attr.value {
        None => format!("&{name}"),
        Some(AttrValue::Expr(id)) => format!("&{name}={}", ast.sexpr_expr(*id)),
        Some(AttrValue::Message(msg)) => format!("&{name}=\"{msg}\""),
    }
}

fn attrs<'a>(ast: &'a Ast, attrs: Option<&'a NonEmpty<Attr>>) -> impl Iterator<Item = String> + 'a {
    attrs.into_iter().flatten().map(move |a| attr(ast, a))
}

fn formal_args(ast: &Ast, args: Option<&FormalArgs>) -> String {
    list(
        "params",
        args.into_iter().flatten().map(|param| {
            let head = format!("{} {}", param.name, ast.sexpr_type(param.ty));
            list(&head, attrs(ast, param.attrs.as_ref()))
        }),
    )
}

fn func_params(ast: &Ast, params: &FuncParams) -> Vec<String> {
    let mut out = vec![formal_args(ast, params.args.as_ref())];
    if let Some(ret) = params.ret {
        out.push(list("->", [ast.sexpr_type(ret)]));
    }
    out
}

fn captures(captures: &[Capture]) -> Option<String> {
    (!captures.is_empty()).then(|| {
        list(
            "capture",
            captures.iter().map(|c| {
                if c.by_copy {
                    list("copy", [c.name.to_string()])
                } else {
                    c.name.to_string()
                }
            }),
        )
    })
}

fn event_hdr(ast: &Ast, hdr: &EventHdr) -> String {
    list(
        "event",
        std::iter::once(hdr.name.to_string()).chain(hdr.args.iter().map(|a| ast.sexpr_expr(*a))),
    )
}

fn field(ast: &Ast, spec: &TypeSpec) -> String {
    list(
        &spec.name.name,
        std::iter::once(ast.sexpr_type(spec.ty)).chain(attrs(ast, spec.attrs.as_ref())),
    )
}

fn enum_item(ast: &Ast, item: &EnumItem) -> String {
    let mut parts = Vec::new();
    if let Some(value) = item.value {
        parts.push(ast.sexpr_expr(value));
    }
    if let Some(dep) = &item.deprecated {
        parts.push(dep.message.as_ref().map_or_else(
            || "&deprecated".to_string(),
            |msg| format!("&deprecated=\"{msg}\""),
        ));
    }
    if parts.is_empty() {
        item.name.to_string()
    } else {
        list(&item.name.name, parts)
    }
}

fn var_decl(ast: &Ast, head: &str, var: &VarDecl) -> String {
    let mut parts = vec![var.name.to_string()];
    if let Some(ty) = var.ty {
        parts.push(list(":", [ast.sexpr_type(ty)]));
    }
    if let Some(init) = &var.init {
        let value = match &init.value {
            Init::Braced(items) => list("braced", items.iter().map(|e| ast.sexpr_expr(*e))),
            Init::Expr(id) => ast.sexpr_expr(*id),
        };
        let class = init.class.map_or("init", |c| c.symbol());
        parts.push(list(class, [value]));
    }
    parts.extend(attrs(ast, var.attrs.as_ref()));
    list(head, parts)
}

fn func_decl(ast: &Ast, func: &FuncDecl) -> String {
    let head = if func.is_redef {
        format!("redef {}", func.flavor.keyword())
    } else {
        func.flavor.keyword().to_string()
    };
    let mut parts = vec![func.name.to_string()];
    parts.extend(func_params(ast, &func.params));
    parts.extend(attrs(ast, func.attrs.as_ref()));
    parts.extend(func.preprocs.iter().map(|d| ast.sexpr_decl(*d)));
    parts.push(ast.sexpr_stmt(func.body));
    list(&head, parts)
}

fn preproc(ast: &Ast, preproc: &Preproc) -> String {
    match preproc {
        Preproc::Deprecated(None) => list("@deprecated", []),
        Preproc::Deprecated(Some(msg)) => list("@deprecated", [format!("\"{msg}\"")]),
        Preproc::Load { kind, file } => list(kind.directive(), [file.clone()]),
        Preproc::Prefixes { append, prefix } => {
            let op = if *append { "+=" } else { "=" };
            list("@prefixes", [op.to_string(), prefix.to_string()])
        }
        Preproc::If(cond) => list("@if", [ast.sexpr_expr(*cond)]),
        Preproc::Ifdef(name) => list("@ifdef", [name.to_string()]),
        Preproc::Ifndef(name) => list("@ifndef", [name.to_string()]),
        Preproc::Else => list("@else", []),
        Preproc::Endif => list("@endif", []),
    }
}

fn constant(c: &Constant) -> String {
    match c {
        Constant::Bool(true) => "T".to_string(),
        Constant::Bool(false) => "F".to_string(),
        Constant::Integer(text)
        | Constant::Float(text)
        | Constant::Hex(text)
        | Constant::Hostname(text) => text.clone(),
        Constant::Port { number, protocol } => format!("{number}/{}", protocol.as_str()),
        Constant::Interval { amount, unit } => format!("{amount}{}", unit.as_str()),
        Constant::String(text) => format!("\"{text}\""),
        Constant::Ipv4 { addr, prefix } | Constant::Ipv6 { addr, prefix } => match prefix {
            Some(len) => format!("{addr}/{len}"),
            None => addr.clone(),
        },
    }
}

fn opt(ast: &Ast, id: Option<ExprId>) -> String {
    id.map_or_else(|| "_".to_string(), |id| ast.sexpr_expr(id))
}

impl Ast {
    /// Render the whole file, one top-level item per line.
    #[must_use]
    pub fn sexpr(&self) -> String {
        let root = &self.source_file;
        root.decls
            .iter()
            .map(|d| self.sexpr_decl(*d))
            .chain(root.stmts.iter().map(|s| self.sexpr_stmt(*s)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[must_use]
    pub fn sexpr_expr(&self, id: ExprId) -> String {
        let exprs = |ids: &[ExprId]| ids.iter().map(|e| self.sexpr_expr(*e)).collect::<Vec<_>>();
        match &self[id].kind {
            Expr::Name(name) => name.to_string(),
            Expr::Constant(c) => constant(c),
            Expr::Pattern {
                regex,
                case_insensitive,
            } => format!("/{regex}/{}", if *case_insensitive { "i" } else { "" }),
            Expr::Paren(inner) => list("paren", [self.sexpr_expr(*inner)]),
            Expr::Index { base, indices } => list(
                "index",
                std::iter::once(self.sexpr_expr(*base)).chain(exprs(indices)),
            ),
            Expr::Slice { base, low, high } => list(
                "slice",
                [self.sexpr_expr(*base), opt(self, *low), opt(self, *high)],
            ),
            Expr::Field { base, field } => list("$", [self.sexpr_expr(*base), field.to_string()]),
            Expr::HasField { base, field } => {
                list("?$", [self.sexpr_expr(*base), field.to_string()])
            }
            Expr::Unary { op, operand } => list(op.symbol(), [self.sexpr_expr(*operand)]),
            Expr::Cardinality(inner) => list("card", [self.sexpr_expr(*inner)]),
            Expr::Cast { expr, ty } => list("as", [self.sexpr_expr(*expr), self.sexpr_type(*ty)]),
            Expr::TypeTest { expr, ty } => {
                list("is", [self.sexpr_expr(*expr), self.sexpr_type(*ty)])
            }
            Expr::Binary { op, lhs, rhs } => {
                list(op.symbol(), [self.sexpr_expr(*lhs), self.sexpr_expr(*rhs)])
            }
            Expr::Ternary {
                cond,
                then,
                otherwise,
            } => list(
                "?",
                [
                    self.sexpr_expr(*cond),
                    self.sexpr_expr(*then),
                    self.sexpr_expr(*otherwise),
                ],
            ),
            Expr::Assign { op, target, value } => {
                list(op.symbol(), [self.sexpr_expr(*target), self.sexpr_expr(*value)])
            }
            Expr::FieldAssign { field, value } => {
                list("$=", [field.to_string(), self.sexpr_expr(*value)])
            }
            Expr::ListLiteral(items) => list("list", exprs(items)),
            Expr::RecordCtor(items) => list("record", exprs(items)),
            Expr::TableCtor { args, attrs: a } => {
                list("table", exprs(args).into_iter().chain(attrs(self, a.as_ref())))
            }
            Expr::SetCtor { args, attrs: a } => {
                list("set", exprs(args).into_iter().chain(attrs(self, a.as_ref())))
            }
            Expr::VectorCtor(items) => list("vector", exprs(items)),
            Expr::Call { callee, args } => list(
                "call",
                std::iter::once(self.sexpr_expr(*callee)).chain(exprs(args)),
            ),
            Expr::LocalBinding { name, value } => {
                list("local", [name.to_string(), self.sexpr_expr(*value)])
            }
            Expr::Copy(inner) => list("copy", [self.sexpr_expr(*inner)]),
            Expr::Hook(inner) => list("hook", [self.sexpr_expr(*inner)]),
            Expr::Schedule { delay, event } => {
                list("schedule", [self.sexpr_expr(*delay), event_hdr(self, event)])
            }
            Expr::Lambda {
                captures: caps,
                params,
                body,
            } => list(
                "lambda",
                captures(caps)
                    .into_iter()
                    .chain(func_params(self, params))
                    .chain([self.sexpr_stmt(*body)]),
            ),
        }
    }

    #[must_use]
    pub fn sexpr_stmt(&self, id: StmtId) -> String {
        let stmts = |ids: &[StmtId]| ids.iter().map(|s| self.sexpr_stmt(*s)).collect::<Vec<_>>();
        match &self[id].kind {
            Stmt::Error => "<error>".to_string(),
            Stmt::Block(body) => list("block", stmts(body)),
            Stmt::Print(exprs) => list("print", exprs.iter().map(|e| self.sexpr_expr(*e))),
            Stmt::EventFire(hdr) => event_hdr(self, hdr),
            Stmt::If {
                cond,
                then,
                otherwise,
            } => list(
                "if",
                [self.sexpr_expr(*cond), self.sexpr_stmt(*then)]
                    .into_iter()
                    .chain(otherwise.map(|s| self.sexpr_stmt(s))),
            ),
            Stmt::Switch { subject, cases } => list(
                "switch",
                std::iter::once(self.sexpr_expr(*subject)).chain(cases.iter().map(|case| {
                    let body = stmts(&case.body);
                    match &case.label {
                        CaseLabel::Default => list("default", body),
                        CaseLabel::Exprs(exprs) => {
                            let label = group(exprs.iter().map(|e| self.sexpr_expr(*e)));
                            list("case", std::iter::once(label).chain(body))
                        }
                        CaseLabel::Types(types) => {
                            let label = list(
                                "types",
                                types.iter().map(|tc| {
                                    let ty = self.sexpr_type(tc.ty);
                                    match &tc.binding {
                                        Some(name) => list("as", [ty, name.to_string()]),
                                        None => ty,
                                    }
                                }),
                            );
                            list("case", std::iter::once(label).chain(body))
                        }
                    }
                })),
            ),
            Stmt::ForIn {
                key,
                value,
                iterable,
                body,
            } => {
                let vars = list(&key.name, value.iter().map(ToString::to_string));
                list(
                    "for",
                    [vars, self.sexpr_expr(*iterable), self.sexpr_stmt(*body)],
                )
            }
            Stmt::ForInDestructured {
                keys,
                value,
                iterable,
                body,
            } => {
                let keys = format!(
                    "[{}]",
                    keys.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
                );
                let vars = list(&keys, value.iter().map(ToString::to_string));
                list(
                    "for",
                    [vars, self.sexpr_expr(*iterable), self.sexpr_stmt(*body)],
                )
            }
            Stmt::While { cond, body } => {
                list("while", [self.sexpr_expr(*cond), self.sexpr_stmt(*body)])
            }
            Stmt::LoopControl(ctl) => list(
                match ctl {
                    LoopControl::Next => "next",
                    LoopControl::Break => "break",
                    LoopControl::Fallthrough => "fallthrough",
                },
                [],
            ),
            Stmt::Return(value) => list("return", value.map(|e| self.sexpr_expr(e))),
            Stmt::AddDelete { op, target } => list(
                match op {
                    AddDelete::Add => "add",
                    AddDelete::Delete => "delete",
                },
                [self.sexpr_expr(*target)],
            ),
            Stmt::LocalDecl(var) => var_decl(self, "local", var),
            Stmt::ConstDecl(var) => var_decl(self, "const", var),
            Stmt::When {
                is_return,
                captures: caps,
                cond,
                body,
                timeout,
            } => {
                let head = if *is_return { "return-when" } else { "when" };
                let timeout = timeout.as_ref().map(|t| {
                    list(
                        "timeout",
                        std::iter::once(self.sexpr_expr(t.delay)).chain(stmts(&t.body)),
                    )
                });
                list(
                    head,
                    captures(caps)
                        .into_iter()
                        .chain([self.sexpr_expr(*cond), self.sexpr_stmt(*body)])
                        .chain(timeout),
                )
            }
            Stmt::IndexAssign {
                target,
                low,
                high,
                value,
            } => list(
                "index-assign",
                [
                    self.sexpr_expr(*target),
                    opt(self, *low),
                    opt(self, *high),
                    self.sexpr_expr(*value),
                ],
            ),
            Stmt::Expr(expr) => list("expr", [self.sexpr_expr(*expr)]),
            Stmt::Empty => list("empty", []),
            Stmt::Preproc(p) => preproc(self, p),
        }
    }

    #[must_use]
    pub fn sexpr_decl(&self, id: DeclId) -> String {
        match &self[id].kind {
            Decl::Error => "<error>".to_string(),
            Decl::Module(name) => list("module", [name.to_string()]),
            Decl::Export(decls) => list("export", decls.iter().map(|d| self.sexpr_decl(*d))),
            Decl::Global(var) => var_decl(self, "global", var),
            Decl::Option(var) => var_decl(self, "option", var),
            Decl::Const(var) => var_decl(self, "const", var),
            Decl::Redef(var) => var_decl(self, "redef", var),
            Decl::RedefEnum { name, items } => list(
                "redef-enum",
                std::iter::once(name.to_string()).chain(items.iter().map(|i| enum_item(self, i))),
            ),
            Decl::RedefRecord {
                name,
                fields,
                attrs: a,
            } => list(
                "redef-record",
                std::iter::once(name.to_string())
                    .chain(fields.iter().map(|f| field(self, f)))
                    .chain(attrs(self, a.as_ref())),
            ),
            Decl::TypeDef { name, ty, attrs: a } => list(
                "type",
                [name.to_string(), self.sexpr_type(*ty)]
                    .into_iter()
                    .chain(attrs(self, a.as_ref())),
            ),
            Decl::FuncHdr(func) => func_decl(self, func),
            Decl::Preproc(p) => preproc(self, p),
        }
    }

    #[must_use]
    pub fn sexpr_type(&self, id: TypeId) -> String {
        let types = |ids: &NonEmpty<TypeId>| ids.iter().map(|t| self.sexpr_type(*t)).collect::<Vec<_>>();
        match &self[id].kind {
            Type::Primitive(p) => p.as_str().to_string(),
            Type::Named(name) => name.to_string(),
            Type::Table { keys, value } => {
                list("table", [format!("[{}]", types(keys).join(" ")), self.sexpr_type(*value)])
            }
            Type::Set(keys) => list("set", types(keys)),
            Type::Record(fields) => list("record", fields.iter().map(|f| field(self, f))),
            Type::Union(members) => list("union", types(members)),
            Type::Enum(items) => list("enum", items.iter().map(|i| enum_item(self, i))),
            Type::List(None) => "list".to_string(),
            Type::List(Some(inner)) => list("list", [self.sexpr_type(*inner)]),
            Type::Vector(inner) => list("vector", [self.sexpr_type(*inner)]),
            Type::Function(params) => list("function", func_params(self, params)),
            Type::Event(args) => list("event", [formal_args(self, args.as_ref())]),
            Type::Hook(args) => list("hook", [formal_args(self, args.as_ref())]),
            Type::File(None) => "file".to_string(),
            Type::File(Some(inner)) => list("file", [self.sexpr_type(*inner)]),
            Type::Opaque(name) => list("opaque", [name.to_string()]),
        }
    }
}
