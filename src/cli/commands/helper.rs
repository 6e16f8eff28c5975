use std::{fs, path::Path, sync::Arc};

use anyhow::{Context, Result};
use swc_common::SourceMap;

use super::super::exit_status::ExitStatus;
use crate::{
    core::{
        RewriteError,
        parsers::source::{ParsedSource, parse_source},
    },
    issues::{Issue, Rule},
};

pub fn read_source(file_path: &str) -> Result<String> {
    fs::read_to_string(file_path).with_context(|| format!("Failed to read file: {}", file_path))
}

/// Read and parse a source file.
///
/// The outer error is an I/O failure; the inner one a file that cannot be
/// processed and should be reported as an issue.
pub fn parse_file(file_path: &str) -> Result<Result<ParsedSource, RewriteError>> {
    let code = read_source(file_path)?;
    Ok(parse_source(code, file_path, Arc::<SourceMap>::default()))
}

pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Files that could not be processed at all.
pub fn fatal_count(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter(|i| matches!(i.rule(), Rule::ParseError | Rule::LiteralDecode))
        .count()
}

/// In dry-run mode, pending work is considered "Failure" (exit 1) to signal
/// that there's work to be done.
pub fn exit_status(issues: &[Issue], has_pending: bool, apply: bool) -> ExitStatus {
    ExitStatus::for_run(fatal_count(issues), has_pending, apply)
}
