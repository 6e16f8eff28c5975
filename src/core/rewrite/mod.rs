//! Rewrite of one source file.
//!
//! ## Module Structure
//!
//! - `transform`: the site handler deciding and performing each wrap
//! - `edits`: byte-range edits used to print the rewritten file
//! - `imports`: optional import of the translation function

pub mod edits;
pub mod imports;
pub mod transform;


use std::sync::Arc;

use swc_common::SourceMap;
use swc_ecma_ast::Module;
use tracing::debug;

use crate::core::locate::Locator;
use crate::core::parsers::source::{ParsedSource, SourceText, parse_source};
use crate::core::utils::TranslateFn;
use crate::core::{RewriteError, RewriteWarning, WorkingRegistry};

pub use transform::{RewriteOutcome, Rewriter};

/// Settings shared by every file of a run.
#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    pub translate_fn: TranslateFn,
    /// Module to import the translation function from, if it should be imported.
    pub import_source: Option<String>,
}

/// Result of rewriting one file.
#[derive(Debug)]
pub struct FileRewrite {
    pub output: String,
    /// Number of literals wrapped.
    pub rewritten: usize,
    pub registry: WorkingRegistry,
    pub warnings: Vec<RewriteWarning>,
}

impl FileRewrite {
    pub fn source_changed(&self) -> bool {
        self.rewritten > 0
    }

    pub fn registry_changed(&self) -> bool {
        self.registry.is_dirty()
    }
}

/// Parse and rewrite `code`.
///
/// # Errors
///
/// Returns [`RewriteError`] when the file does not parse or holds a string
/// literal that cannot be decoded. Nothing of the file should be written then.
pub fn rewrite_source(
    code: String,
    file_path: &str,
    registry: WorkingRegistry,
    options: &RewriteOptions,
) -> Result<FileRewrite, RewriteError> {
    let mut parsed = parse_source(code, file_path, Arc::<SourceMap>::default())?;
    rewrite_parsed(&mut parsed, registry, options)
}

/// Rewrite an already parsed file. The module is updated in place.
pub fn rewrite_parsed(
    parsed: &mut ParsedSource,
    mut registry: WorkingRegistry,
    options: &RewriteOptions,
) -> Result<FileRewrite, RewriteError> {
    let (module, source) = parsed.split();
    let outcome = rewrite_module(module, source, &mut registry, &options.translate_fn)?;

    let RewriteOutcome {
        mut edits,
        rewritten,
        warnings,
    } = outcome;

    if rewritten > 0
        && let Some(import_source) = &options.import_source
        && let Some((at, text)) =
            imports::import_edit(module, source, &options.translate_fn, import_source)
    {
        edits.insert(at, text);
    }

    debug!(
        file = source.file_path,
        rewritten,
        warnings = warnings.len(),
        "rewrite finished"
    );

    Ok(FileRewrite {
        output: edits.apply(source.code),
        rewritten,
        registry,
        warnings,
    })
}

/// Run the rewrite over `module`, mutating it in place.
///
/// Running it again on the same module finds nothing left to wrap.
pub fn rewrite_module(
    module: &mut Module,
    source: SourceText<'_>,
    registry: &mut WorkingRegistry,
    translate_fn: &TranslateFn,
) -> Result<RewriteOutcome, RewriteError> {
    let rewriter = Rewriter::new(source, registry, translate_fn.clone());
    let mut locator = Locator::new(rewriter, translate_fn.clone());
    locator.locate(module);
    locator.into_handler().finish()
}
