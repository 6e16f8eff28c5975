//! Wrap decisions and in-place tree rewriting.
//!
//! [`Rewriter`] is the [`SiteHandler`] that turns candidate literals into
//! translation calls. Every slot write on the AST is mirrored by a text
//! edit on the original source so the file can be written back without a
//! code generator.

use swc_common::{DUMMY_SP, Span, SyntaxContext};
use swc_ecma_ast::{
    CallExpr, Callee, Expr, ExprOrSpread, Invalid, KeyValueProp, Lit, ObjectLit, Prop, PropName,
    PropOrSpread, Str,
};
use tracing::{debug, warn};

use crate::core::locate::{LiteralSite, Locator, SiteHandler, SiteSlot, arg_span};
use crate::core::parsers::source::SourceText;
use crate::core::rewrite::edits::EditList;
use crate::core::template::{FormatStyle, classify_format, placeholder_names, to_templated};
use crate::core::utils::{TranslateFn, as_str_lit, literal_source, quote_char, quote_js_string};
use crate::core::{RenameOutcome, RewriteError, RewriteWarning, WorkingRegistry};

/// Site handler performing the rewrite of one file.
pub struct Rewriter<'a> {
    source: SourceText<'a>,
    registry: &'a mut WorkingRegistry,
    translate_fn: TranslateFn,
    edits: EditList,
    rewritten: usize,
    warnings: Vec<RewriteWarning>,
    error: Option<RewriteError>,
}

/// What a [`Rewriter`] produced once traversal has finished.
pub struct RewriteOutcome {
    pub edits: EditList,
    pub rewritten: usize,
    pub warnings: Vec<RewriteWarning>,
}

impl<'a> Rewriter<'a> {
    pub fn new(
        source: SourceText<'a>,
        registry: &'a mut WorkingRegistry,
        translate_fn: TranslateFn,
    ) -> Self {
        Self {
            source,
            registry,
            translate_fn,
            edits: EditList::new(),
            rewritten: 0,
            warnings: Vec::new(),
            error: None,
        }
    }

    /// Finish the traversal, surfacing a fatal error if one occurred.
    pub fn finish(self) -> Result<RewriteOutcome, RewriteError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(RewriteOutcome {
            edits: self.edits,
            rewritten: self.rewritten,
            warnings: self.warnings,
        })
    }

    /// Semantic value of a literal, or a fatal error if it is not valid text.
    fn decode(&mut self, lit: &Str) -> Option<String> {
        match lit.value.as_str() {
            Some(value) => Some(value.to_string()),
            None => {
                let raw = lit
                    .raw
                    .as_ref()
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| {
                        let (lo, hi) = self.source.range(lit.span);
                        self.source.code[lo..hi].to_string()
                    });
                self.error = Some(RewriteError::LiteralDecode {
                    context: self.source.context(lit.span.lo),
                    raw,
                });
                None
            }
        }
    }

    fn call(&self, span: Span, args: Vec<Expr>) -> Expr {
        Expr::Call(CallExpr {
            span,
            ctxt: SyntaxContext::empty(),
            callee: Callee::Expr(Box::new(self.translate_fn.to_expr())),
            args: args
                .into_iter()
                .map(|expr| ExprOrSpread {
                    spread: None,
                    expr: Box::new(expr),
                })
                .collect(),
            type_args: None,
        })
    }

    /// Replace the literal in `slot` with `T(<literal>)`.
    fn wrap_single(&mut self, slot: &mut Expr, value: &str) {
        let Expr::Lit(Lit::Str(lit)) = &*slot else {
            return;
        };
        let span = lit.span;
        let text = format!("{}({})", self.translate_fn, literal_source(lit, value));

        let literal = std::mem::replace(slot, Expr::Invalid(Invalid { span: DUMMY_SP }));
        *slot = self.call(span, vec![literal]);

        let (lo, hi) = self.source.range(span);
        self.edits.replace(lo, hi, text);
        self.registry.record(value);
        self.rewritten += 1;
        debug!(
            file = self.source.file_path,
            line = self.source.context(span.lo).line(),
            "wrapped {:?}",
            value
        );
    }

    /// Decode and, if it qualifies, single-wrap the literal in `slot`.
    fn wrap_if_candidate(&mut self, slot: &mut Expr) {
        let Some(lit) = as_str_lit(slot) else {
            return;
        };
        let Some(value) = self.decode(lit) else {
            return;
        };
        if self.registry.should_wrap(&value) {
            self.wrap_single(slot, &value);
        }
    }

    fn format_mismatch(&mut self, lit_span: Span, literal: String, reason: String) {
        let warning = RewriteWarning::FormatMismatch {
            context: self.source.context(lit_span.lo),
            literal,
            reason,
        };
        warn!(file = self.source.file_path, "{}", warning);
        self.warnings.push(warning);
    }

    /// A call argument followed by `args[index + 1..]`.
    fn call_argument(locator: &mut Locator<Self>, args: &mut Vec<ExprOrSpread>, index: usize) {
        let this = &mut locator.handler;
        let Some(lit) = as_str_lit(&args[index].expr) else {
            return;
        };
        let Some(value) = this.decode(lit) else {
            return;
        };
        if !this.registry.should_wrap(&value) {
            return;
        }
        let siblings = args.len() - index - 1;
        if siblings == 0 {
            this.wrap_single(&mut args[index].expr, &value);
            return;
        }

        let lit_span = lit.span;
        let raw = literal_source(lit, &value);
        let spread_sibling = args[index + 1..].iter().any(|a| a.spread.is_some());

        match classify_format(&value) {
            FormatStyle::Plain => this.wrap_single(&mut args[index].expr, &value),
            FormatStyle::Templated => {
                let names = placeholder_names(&value);
                if spread_sibling {
                    this.format_mismatch(lit_span, raw, "spread argument".to_string());
                } else if names.len() != siblings {
                    let reason = format!(
                        "{} placeholder(s) but {} argument(s) were supplied",
                        names.len(),
                        siblings
                    );
                    this.format_mismatch(lit_span, raw, reason);
                } else {
                    Self::wrap_with_arguments(locator, args, index, &value, None, names);
                }
            }
            FormatStyle::Interpolated => {
                if spread_sibling {
                    this.format_mismatch(lit_span, raw, "spread argument".to_string());
                    return;
                }
                let templated = match to_templated(&value, siblings) {
                    Ok(templated) => templated,
                    Err(err) => {
                        this.format_mismatch(lit_span, raw, err.to_string());
                        return;
                    }
                };
                if let RenameOutcome::Collision { .. } =
                    this.registry.rename(&value, &templated.text)
                {
                    let warning = RewriteWarning::RenameCollision {
                        context: this.source.context(lit_span.lo),
                        old_id: value.clone(),
                        new_id: templated.text.clone(),
                    };
                    warn!(file = this.source.file_path, "{}", warning);
                    this.warnings.push(warning);
                }
                Self::wrap_with_arguments(
                    locator,
                    args,
                    index,
                    &templated.text,
                    Some(quote_char(Some(&raw))),
                    templated.names,
                );
            }
        }
    }

    /// Replace `args[index..]` with `T(<literal>, { Name: arg, ... })`.
    ///
    /// `requote` is set when the literal text changed and must be re-spelled
    /// with that quote character.
    fn wrap_with_arguments(
        locator: &mut Locator<Self>,
        args: &mut Vec<ExprOrSpread>,
        index: usize,
        id: &str,
        requote: Option<char>,
        names: Vec<String>,
    ) {
        // Sibling arguments are rewritten before they are folded away.
        for sibling in &mut args[index + 1..] {
            if locator.handler.aborted() {
                return;
            }
            if as_str_lit(&sibling.expr).is_some() {
                locator.handler.wrap_if_candidate(&mut sibling.expr);
            } else {
                locator.walk_expr(&mut sibling.expr);
            }
        }
        if locator.handler.aborted() {
            return;
        }

        let this = &mut locator.handler;
        let Some(lit) = as_str_lit(&args[index].expr) else {
            return;
        };
        let lit_span = lit.span;
        let quote = quote_char(lit.raw.as_deref());
        let literal_text = match requote {
            Some(q) => quote_js_string(id, q),
            None => literal_source(lit, id),
        };
        let literal = match requote {
            Some(_) => Expr::Lit(Lit::Str(Str {
                span: lit_span,
                value: id.into(),
                raw: Some(literal_text.as_str().into()),
            })),
            None => std::mem::replace(
                &mut *args[index].expr,
                Expr::Invalid(Invalid { span: DUMMY_SP }),
            ),
        };

        let last_hi = args.last().map(|a| arg_span(a).hi).unwrap_or(lit_span.hi);
        let folded: Vec<ExprOrSpread> = args.drain(index + 1..).collect();

        let code = this.source.code;
        let mut prev = this.source.offset(lit_span.hi);
        let mut entries = Vec::with_capacity(names.len());
        let mut props = Vec::with_capacity(names.len());
        for (name, arg) in names.into_iter().zip(folded) {
            let (lo, hi) = this.source.range(arg_span(&arg));
            // Comments around the separating comma stay with the argument.
            let leading = without_separator(code, prev, lo);
            let arg_text = this.edits.render_range(code, lo, hi);
            entries.push(format!(
                "{}: {}{}",
                quote_js_string(&name, quote),
                leading.trim_start(),
                arg_text
            ));
            props.push(PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
                key: PropName::Str(Str {
                    span: DUMMY_SP,
                    value: name.as_str().into(),
                    raw: None,
                }),
                value: arg.expr,
            }))));
            prev = hi;
        }

        // A trailing comma is folded into the call as well.
        let mut end = prev;
        let next = skip_trivia(code, prev);
        if code.as_bytes().get(next) == Some(&b',') {
            let comment = code[prev..next].trim();
            if let Some(last) = entries.last_mut()
                && !comment.is_empty()
            {
                last.push(' ');
                last.push_str(comment);
            }
            end = next + 1;
            while matches!(code.as_bytes().get(end), Some(b' ' | b'\t')) {
                end += 1;
            }
        }

        let object = Expr::Object(ObjectLit {
            span: DUMMY_SP,
            props,
        });
        *args[index].expr = this.call(lit_span.with_hi(last_hi), vec![literal, object]);

        let lo = this.source.offset(lit_span.lo);
        let hi = end;
        // Drop whatever edits remain between the folded arguments.
        this.edits.render_range(code, lo, hi);
        let text = format!(
            "{}({}, {{ {} }})",
            this.translate_fn,
            literal_text,
            entries.join(", ")
        );
        this.edits.replace(lo, hi, text);
        this.registry.record(id);
        this.rewritten += 1;
        debug!(
            file = this.source.file_path,
            line = this.source.context(lit_span.lo).line(),
            "wrapped {:?} with {} argument(s)",
            id,
            entries.len()
        );
    }
}

/// Offset of the first byte at or after `from` that is neither whitespace
/// nor part of a comment.
fn skip_trivia(code: &str, mut from: usize) -> usize {
    let bytes = code.as_bytes();
    while let Some(&byte) = bytes.get(from) {
        match (byte, bytes.get(from + 1)) {
            (b' ' | b'\t' | b'\n' | b'\r', _) => from += 1,
            (b'/', Some(b'*')) => {
                from = code[from + 2..]
                    .find("*/")
                    .map_or(bytes.len(), |i| from + 2 + i + 2);
            }
            (b'/', Some(b'/')) => {
                from = code[from..].find('\n').map_or(bytes.len(), |i| from + i);
            }
            _ => break,
        }
    }
    from
}

/// Text between two arguments, `code[start..end]`, without the comma that
/// separates them.
fn without_separator(code: &str, start: usize, end: usize) -> String {
    let comma = skip_trivia(code, start);
    if comma < end && code.as_bytes()[comma] == b',' {
        format!("{}{}", &code[start..comma], &code[comma + 1..end])
    } else {
        code[start..end].to_string()
    }
}

impl SiteHandler for Rewriter<'_> {
    fn on_site(locator: &mut Locator<Self>, site: LiteralSite<'_>) {
        if locator.handler.aborted() || !site.kind.is_candidate() {
            return;
        }
        match site.slot {
            SiteSlot::Expr(expr) => locator.handler.wrap_if_candidate(expr),
            SiteSlot::Args { args, index } => Self::call_argument(locator, args, index),
            SiteSlot::Key(_) => {}
        }
    }

    fn aborted(&self) -> bool {
        self.error.is_some()
    }
}
