use std::fmt;

use crate::core::SourceContext;

/// Fatal errors that abort processing of one source file.
///
/// Nothing is written back for a file that fails with one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// The file is not valid JS/TS.
    Parse {
        file: String,
        line: usize,
        col: usize,
        message: String,
    },
    /// A string literal holds text that is not valid Unicode (e.g. a lone surrogate escape).
    LiteralDecode { context: SourceContext, raw: String },
}

impl RewriteError {
    pub fn file_path(&self) -> &str {
        match self {
            RewriteError::Parse { file, .. } => file,
            RewriteError::LiteralDecode { context, .. } => context.file_path(),
        }
    }
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteError::Parse {
                file,
                line,
                col,
                message,
            } => write!(f, "{}:{}:{}: parse error: {}", file, line, col, message),
            RewriteError::LiteralDecode { context, raw } => write!(
                f,
                "{}:{}:{}: cannot decode string literal {}",
                context.file_path(),
                context.line(),
                context.col(),
                raw
            ),
        }
    }
}

impl std::error::Error for RewriteError {}

/// Non-fatal problems found while rewriting; the affected site is left as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteWarning {
    /// A format literal's markers or placeholders do not line up with its arguments.
    FormatMismatch {
        context: SourceContext,
        literal: String,
        reason: String,
    },
    /// Renaming an interpolated id hit an id that already exists.
    RenameCollision {
        context: SourceContext,
        old_id: String,
        new_id: String,
    },
}

impl RewriteWarning {
    pub fn context(&self) -> &SourceContext {
        match self {
            RewriteWarning::FormatMismatch { context, .. }
            | RewriteWarning::RenameCollision { context, .. } => context,
        }
    }
}

impl fmt::Display for RewriteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteWarning::FormatMismatch {
                literal, reason, ..
            } => write!(f, "format literal {} left unchanged: {}", literal, reason),
            RewriteWarning::RenameCollision { old_id, new_id, .. } => write!(
                f,
                "\"{}\" already exists, dropped the entry for \"{}\"",
                new_id, old_id
            ),
        }
    }
}
