//! Collection of translation function calls, used by `checkup` and `fixup`.

use swc_ecma_ast::{CallExpr, Module};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::parsers::source::SourceText;
use crate::core::utils::{TranslateFn, as_str_lit};
use crate::core::{RewriteError, SourceContext};

/// A translation call whose first argument is a string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUsage {
    pub id: String,
    pub context: SourceContext,
}

struct UsageCollector<'a> {
    source: SourceText<'a>,
    translate_fn: &'a TranslateFn,
    usages: Vec<TranslationUsage>,
    error: Option<RewriteError>,
}

impl Visit for UsageCollector<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.error.is_some() {
            return;
        }
        if self.translate_fn.matches_callee(&node.callee)
            && let Some(first) = node.args.first()
            && first.spread.is_none()
            && let Some(lit) = as_str_lit(&first.expr)
        {
            match lit.value.as_str() {
                Some(id) => self.usages.push(TranslationUsage {
                    id: id.to_string(),
                    context: self.source.context(lit.span.lo),
                }),
                None => {
                    self.error = Some(RewriteError::LiteralDecode {
                        context: self.source.context(lit.span.lo),
                        raw: lit.raw.as_deref().unwrap_or_default().to_string(),
                    });
                    return;
                }
            }
        }
        node.visit_children_with(self);
    }
}

/// Every literal id passed to the translation function, in source order.
///
/// Calls with a computed first argument are not reported.
pub fn collect_usages(
    module: &Module,
    source: SourceText<'_>,
    translate_fn: &TranslateFn,
) -> Result<Vec<TranslationUsage>, RewriteError> {
    let mut collector = UsageCollector {
        source,
        translate_fn,
        usages: Vec::new(),
        error: None,
    };
    module.visit_with(&mut collector);
    match collector.error {
        Some(err) => Err(err),
        None => Ok(collector.usages),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::parsers::source::parse_source;

    fn usages(code: &str, translate_fn: &str) -> Vec<(String, usize)> {
        let parsed = parse_source(code.to_string(), "a.tsx", Arc::default()).unwrap();
        collect_usages(
            &parsed.module,
            parsed.text(),
            &TranslateFn::parse(translate_fn).unwrap(),
        )
        .unwrap()
        .into_iter()
        .map(|u| (u.id, u.context.line()))
        .collect()
    }

    #[test]
    fn test_collects_literal_ids() {
        let code = "T(\"Hello\");\nconst x = T('Hi {{.Arg0}}', { Arg0: T(\"nested\") });\nT(key);\nt(\"other\");";
        assert_eq!(
            usages(code, "T"),
            vec![
                ("Hello".to_string(), 1),
                ("Hi {{.Arg0}}".to_string(), 2),
                ("nested".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_member_translate_function() {
        let code = "i18n.T(\"Hello\"); T(\"plain\"); <p>{i18n.T(\"jsx\")}</p>;";
        assert_eq!(
            usages(code, "i18n.T"),
            vec![("Hello".to_string(), 1), ("jsx".to_string(), 1)]
        );
    }
}
