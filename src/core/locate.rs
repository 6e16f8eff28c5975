//! Literal site locator.
//!
//! Walks one module depth-first (pre-order, left to right) and reports every
//! syntactic position that holds a string literal eligible for translation
//! wrapping. The locator itself never changes the tree: each position is
//! handed to a [`SiteHandler`], which decides what to do with it.
//!
//! | Kind | Position |
//! |------|----------|
//! | `PlainLiteral` | conditional branch, arrow expression body, parenthesized literal |
//! | `KeyOfPair` | string key of an object property |
//! | `ValueOfPair` | value of an object property |
//! | `AssignmentRhs` | `x = "..."`, `const x = "..."`, class field `x = "..."` |
//! | `CompositeElement` | array literal element |
//! | `ReturnValue` | `return "..."` |
//! | `BinaryOperand` | operand of `+`, `&&`, `\|\|`, `??` |
//! | `IndexKey` | computed member key `obj["key"]` |
//! | `CallArgument` | argument of a call, optional call or `new` expression |
//!
//! Calls to the translation function are never reported; only their
//! arguments that are themselves calls are walked. Statement-level strings
//! (directives), `require(...)`/`import(...)` arguments and comparison
//! operands are not sites.

use std::fmt;

use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    ArrayLit, ArrowExpr, AssignExpr, BinExpr, BinaryOp, BlockStmtOrExpr, CallExpr, Callee,
    ClassProp, CondExpr, Expr, ExprOrSpread, ExprStmt, KeyValueProp, MemberExpr, MemberProp,
    Module, NewExpr, OptCall, ParenExpr, PrivateProp, PropName, ReturnStmt, Str, VarDeclarator,
};
use swc_ecma_visit::{VisitMut, VisitMutWith};

use crate::core::utils::{TranslateFn, as_str_lit, is_require_callee, is_str_lit};

/// Syntactic position of a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteKind {
    PlainLiteral,
    KeyOfPair,
    ValueOfPair,
    AssignmentRhs,
    CompositeElement,
    ReturnValue,
    BinaryOperand,
    IndexKey,
    CallArgument,
}

impl SiteKind {
    /// Whether literals at this position may be wrapped.
    ///
    /// Object keys and index keys are structural, not user-facing text.
    pub fn is_candidate(self) -> bool {
        !matches!(self, SiteKind::KeyOfPair | SiteKind::IndexKey)
    }
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SiteKind::PlainLiteral => "plain-literal",
            SiteKind::KeyOfPair => "key-of-pair",
            SiteKind::ValueOfPair => "value-of-pair",
            SiteKind::AssignmentRhs => "assignment-rhs",
            SiteKind::CompositeElement => "composite-element",
            SiteKind::ReturnValue => "return-value",
            SiteKind::BinaryOperand => "binary-operand",
            SiteKind::IndexKey => "index-key",
            SiteKind::CallArgument => "call-argument",
        };
        write!(f, "{}", name)
    }
}

/// Where the literal of a site lives.
pub enum SiteSlot<'a> {
    /// An expression slot whose current value is the literal.
    Expr(&'a mut Expr),
    /// An object key. Keys are never rewritten, so the slot is read-only.
    Key(&'a Str),
    /// Argument `index` of a call; `args[index + 1..]` are its sibling arguments.
    Args {
        args: &'a mut Vec<ExprOrSpread>,
        index: usize,
    },
}

/// One syntactic position holding a string literal.
pub struct LiteralSite<'a> {
    pub kind: SiteKind,
    pub slot: SiteSlot<'a>,
}

impl LiteralSite<'_> {
    /// The literal at this site.
    pub fn literal(&self) -> Option<&Str> {
        match &self.slot {
            SiteSlot::Expr(expr) => as_str_lit(expr),
            SiteSlot::Key(s) => Some(s),
            SiteSlot::Args { args, index } => args.get(*index).and_then(|a| as_str_lit(&a.expr)),
        }
    }

    pub fn span(&self) -> Span {
        self.literal().map(|s| s.span).unwrap_or_default()
    }

    /// Number of arguments following the literal in its call.
    pub fn sibling_count(&self) -> usize {
        match &self.slot {
            SiteSlot::Args { args, index } => args.len().saturating_sub(index + 1),
            SiteSlot::Expr(_) | SiteSlot::Key(_) => 0,
        }
    }
}

/// Receives the sites found by a [`Locator`].
///
/// `on_site` gets the whole locator so that a handler can walk
/// sub-expressions it takes over (for instance the arguments it folds into
/// a named-argument object) through [`Locator::walk_expr`].
pub trait SiteHandler: Sized {
    fn on_site(locator: &mut Locator<Self>, site: LiteralSite<'_>);

    /// Stop the traversal, e.g. after a fatal error.
    fn aborted(&self) -> bool {
        false
    }
}

/// Depth-first traversal reporting literal sites to a handler.
pub struct Locator<H> {
    pub handler: H,
    translate_fn: TranslateFn,
}

impl<H: SiteHandler> Locator<H> {
    pub fn new(handler: H, translate_fn: TranslateFn) -> Self {
        Self {
            handler,
            translate_fn,
        }
    }

    pub fn translate_fn(&self) -> &TranslateFn {
        &self.translate_fn
    }

    /// Walk a whole module.
    pub fn locate(&mut self, module: &mut Module) {
        module.visit_mut_with(self);
    }

    /// Walk an expression that is not itself a site.
    pub fn walk_expr(&mut self, expr: &mut Expr) {
        expr.visit_mut_with(self);
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    fn emit(&mut self, kind: SiteKind, slot: SiteSlot<'_>) {
        H::on_site(self, LiteralSite { kind, slot });
    }

    /// Report `expr` as a site of `kind` when it is a literal, walk it otherwise.
    fn expr_slot(&mut self, kind: SiteKind, expr: &mut Expr) {
        if is_str_lit(expr) {
            self.emit(kind, SiteSlot::Expr(expr));
        } else {
            expr.visit_mut_with(self);
        }
    }

    /// Walk a call's argument list left to right.
    ///
    /// The handler may fold the siblings of a literal into that literal's
    /// slot, shrinking `args`; the loop then ends at the folded argument.
    fn call_args(&mut self, args: &mut Vec<ExprOrSpread>) {
        let mut index = 0;
        while index < args.len() {
            if self.handler.aborted() {
                return;
            }
            if args[index].spread.is_none() && is_str_lit(&args[index].expr) {
                self.emit(
                    SiteKind::CallArgument,
                    SiteSlot::Args {
                        args: &mut *args,
                        index,
                    },
                );
            } else {
                args[index].expr.visit_mut_with(self);
            }
            index += 1;
        }
    }
}

fn is_operand_site(op: BinaryOp) -> bool {
    matches!(
        op,
        BinaryOp::Add | BinaryOp::LogicalAnd | BinaryOp::LogicalOr | BinaryOp::NullishCoalescing
    )
}

impl<H: SiteHandler> VisitMut for Locator<H> {
    fn visit_mut_expr(&mut self, n: &mut Expr) {
        if self.handler.aborted() {
            return;
        }
        n.visit_mut_children_with(self);
    }

    fn visit_mut_expr_stmt(&mut self, n: &mut ExprStmt) {
        // `"use client";` and friends.
        if is_str_lit(&n.expr) {
            return;
        }
        n.visit_mut_children_with(self);
    }

    fn visit_mut_call_expr(&mut self, n: &mut CallExpr) {
        if self.handler.aborted() {
            return;
        }
        if matches!(n.callee, Callee::Import(_)) || is_require_callee(&n.callee) {
            return;
        }
        if self.translate_fn.matches_callee(&n.callee) {
            for arg in &mut n.args {
                if matches!(&*arg.expr, Expr::Call(_)) {
                    arg.expr.visit_mut_with(self);
                }
            }
            return;
        }
        n.callee.visit_mut_with(self);
        self.call_args(&mut n.args);
    }

    fn visit_mut_opt_call(&mut self, n: &mut OptCall) {
        if self.handler.aborted() || self.translate_fn.matches_expr(&n.callee) {
            return;
        }
        n.callee.visit_mut_with(self);
        self.call_args(&mut n.args);
    }

    fn visit_mut_new_expr(&mut self, n: &mut NewExpr) {
        if self.handler.aborted() {
            return;
        }
        n.callee.visit_mut_with(self);
        if let Some(args) = &mut n.args {
            self.call_args(args);
        }
    }

    fn visit_mut_key_value_prop(&mut self, n: &mut KeyValueProp) {
        match &mut n.key {
            PropName::Str(key) => self.emit(SiteKind::KeyOfPair, SiteSlot::Key(key)),
            PropName::Computed(computed) => computed.visit_mut_with(self),
            _ => {}
        }
        self.expr_slot(SiteKind::ValueOfPair, &mut n.value);
    }

    fn visit_mut_var_declarator(&mut self, n: &mut VarDeclarator) {
        n.name.visit_mut_with(self);
        if let Some(init) = &mut n.init {
            self.expr_slot(SiteKind::AssignmentRhs, init);
        }
    }

    fn visit_mut_class_prop(&mut self, n: &mut ClassProp) {
        n.decorators.visit_mut_with(self);
        n.key.visit_mut_with(self);
        if let Some(value) = &mut n.value {
            self.expr_slot(SiteKind::AssignmentRhs, value);
        }
    }

    fn visit_mut_private_prop(&mut self, n: &mut PrivateProp) {
        n.decorators.visit_mut_with(self);
        if let Some(value) = &mut n.value {
            self.expr_slot(SiteKind::AssignmentRhs, value);
        }
    }

    fn visit_mut_assign_expr(&mut self, n: &mut AssignExpr) {
        n.left.visit_mut_with(self);
        self.expr_slot(SiteKind::AssignmentRhs, &mut n.right);
    }

    fn visit_mut_array_lit(&mut self, n: &mut ArrayLit) {
        for elem in n.elems.iter_mut().flatten() {
            if self.handler.aborted() {
                return;
            }
            if elem.spread.is_none() {
                self.expr_slot(SiteKind::CompositeElement, &mut elem.expr);
            } else {
                elem.expr.visit_mut_with(self);
            }
        }
    }

    fn visit_mut_return_stmt(&mut self, n: &mut ReturnStmt) {
        if let Some(arg) = &mut n.arg {
            self.expr_slot(SiteKind::ReturnValue, arg);
        }
    }

    fn visit_mut_bin_expr(&mut self, n: &mut BinExpr) {
        if !is_operand_site(n.op) {
            n.visit_mut_children_with(self);
            return;
        }
        self.expr_slot(SiteKind::BinaryOperand, &mut n.left);
        self.expr_slot(SiteKind::BinaryOperand, &mut n.right);
    }

    fn visit_mut_member_expr(&mut self, n: &mut MemberExpr) {
        n.obj.visit_mut_with(self);
        if let MemberProp::Computed(computed) = &mut n.prop {
            self.expr_slot(SiteKind::IndexKey, &mut computed.expr);
        }
    }

    fn visit_mut_cond_expr(&mut self, n: &mut CondExpr) {
        n.test.visit_mut_with(self);
        self.expr_slot(SiteKind::PlainLiteral, &mut n.cons);
        self.expr_slot(SiteKind::PlainLiteral, &mut n.alt);
    }

    fn visit_mut_arrow_expr(&mut self, n: &mut ArrowExpr) {
        n.params.visit_mut_with(self);
        match &mut *n.body {
            BlockStmtOrExpr::Expr(body) => self.expr_slot(SiteKind::PlainLiteral, body),
            BlockStmtOrExpr::BlockStmt(block) => block.visit_mut_with(self),
        }
    }

    fn visit_mut_paren_expr(&mut self, n: &mut ParenExpr) {
        self.expr_slot(SiteKind::PlainLiteral, &mut n.expr);
    }
}

/// Span of an argument including a spread operator.
pub fn arg_span(arg: &ExprOrSpread) -> Span {
    match arg.spread {
        Some(spread) => spread.with_hi(arg.expr.span().hi),
        None => arg.expr.span(),
    }
}
