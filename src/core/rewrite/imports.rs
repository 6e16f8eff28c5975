use swc_ecma_ast::{Decl, ImportSpecifier, Module, ModuleDecl, ModuleItem, Pat, Stmt};

use crate::core::parsers::source::SourceText;
use crate::core::utils::{TranslateFn, is_str_lit, quote_js_string};

/// Insertion bringing the translation function's root binding into scope.
///
/// Returns `None` when the module already binds it. The import goes after
/// the last top-level import, or after any leading directives, or at the top.
pub fn import_edit(
    module: &Module,
    source: SourceText<'_>,
    translate_fn: &TranslateFn,
    import_source: &str,
) -> Option<(usize, String)> {
    let root = translate_fn.root();
    if binds_name(module, root) {
        return None;
    }

    let statement = format!(
        "import {{ {} }} from {};",
        root,
        quote_js_string(import_source, '"')
    );

    let last_import = module.body.iter().rev().find_map(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) => Some(decl.span),
        _ => None,
    });
    if let Some(span) = last_import {
        return Some((source.offset(span.hi), format!("\n{}", statement)));
    }

    let last_directive = module
        .body
        .iter()
        .map_while(|item| match item {
            ModuleItem::Stmt(Stmt::Expr(stmt)) if is_str_lit(&stmt.expr) => Some(stmt.span),
            _ => None,
        })
        .last();
    match last_directive {
        Some(span) => Some((source.offset(span.hi), format!("\n{}", statement))),
        None => Some((0, format!("{}\n", statement))),
    }
}

/// Whether `name` is bound at the top level by an import or declaration.
pub fn binds_name(module: &Module, name: &str) -> bool {
    module.body.iter().any(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) => {
            decl.specifiers.iter().any(|spec| {
                let local = match spec {
                    ImportSpecifier::Named(s) => &s.local,
                    ImportSpecifier::Default(s) => &s.local,
                    ImportSpecifier::Namespace(s) => &s.local,
                };
                &*local.sym == name
            })
        }
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => decl_binds(&export.decl, name),
        ModuleItem::Stmt(Stmt::Decl(decl)) => decl_binds(decl, name),
        _ => false,
    })
}

fn decl_binds(decl: &Decl, name: &str) -> bool {
    match decl {
        Decl::Fn(f) => &*f.ident.sym == name,
        Decl::Class(c) => &*c.ident.sym == name,
        Decl::Var(var) => var
            .decls
            .iter()
            .any(|d| matches!(&d.name, Pat::Ident(ident) if &*ident.id.sym == name)),
        _ => false,
    }
}
