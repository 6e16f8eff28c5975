//! Registry seeding from the literals a rewrite would consider.

use tracing::debug;

use crate::core::locate::{LiteralSite, Locator, SiteHandler};
use crate::core::parsers::source::{ParsedSource, SourceText};
use crate::core::utils::TranslateFn;
use crate::core::{Registry, RegistryEntry, RewriteError, SourceContext};

/// A literal found at a candidate site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLiteral {
    pub value: String,
    pub context: SourceContext,
}

struct Extractor<'a> {
    source: SourceText<'a>,
    literals: Vec<ExtractedLiteral>,
    error: Option<RewriteError>,
}

impl SiteHandler for Extractor<'_> {
    fn on_site(locator: &mut Locator<Self>, site: LiteralSite<'_>) {
        let this = &mut locator.handler;
        if this.error.is_some() || !site.kind.is_candidate() {
            return;
        }
        let Some(lit) = site.literal() else {
            return;
        };
        let Some(value) = lit.value.as_str() else {
            this.error = Some(RewriteError::LiteralDecode {
                context: this.source.context(lit.span.lo),
                raw: lit.raw.as_deref().unwrap_or_default().to_string(),
            });
            return;
        };
        if !has_text(value) {
            return;
        }
        this.literals.push(ExtractedLiteral {
            value: value.to_string(),
            context: this.source.context(lit.span.lo),
        });
    }

    fn aborted(&self) -> bool {
        self.error.is_some()
    }
}

/// At least one alphabetic character, in any script.
fn has_text(value: &str) -> bool {
    value.chars().any(char::is_alphabetic)
}

/// Candidate literals of a file that contain alphabetic text, in source order.
///
/// The module is walked but not modified.
pub fn extract_literals(
    parsed: &mut ParsedSource,
    translate_fn: &TranslateFn,
) -> Result<Vec<ExtractedLiteral>, RewriteError> {
    let (module, source) = parsed.split();
    let extractor = Extractor {
        source,
        literals: Vec::new(),
        error: None,
    };
    let mut locator = Locator::new(extractor, translate_fn.clone());
    locator.locate(module);
    let extractor = locator.into_handler();
    if let Some(err) = extractor.error {
        return Err(err);
    }
    debug!(
        file = source.file_path,
        count = extractor.literals.len(),
        "extracted literals"
    );
    Ok(extractor.literals)
}

/// Add every literal missing from `registry` as an untranslated entry.
///
/// Existing entries are left untouched. Returns the number of entries added.
pub fn merge_literals(registry: &mut Registry, literals: &[ExtractedLiteral]) -> usize {
    let mut added = 0;
    for literal in literals {
        if !registry.contains(&literal.value) {
            registry.insert(RegistryEntry::untranslated(literal.value.as_str()));
            added += 1;
        }
    }
    added
}
