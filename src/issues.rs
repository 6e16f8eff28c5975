//! Issue types reported to users.
//!
//! Each issue is self-contained with all information the reporter needs to
//! display it. Engine errors and warnings are converted into issues at the
//! command layer.

use enum_dispatch::enum_dispatch;

use crate::core::{RewriteError, RewriteWarning, SourceContext};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ParseError,
    LiteralDecode,
    FormatMismatch,
    RenameCollision,
    MissingString,
    UnusedString,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ParseError => write!(f, "parse-error"),
            Rule::LiteralDecode => write!(f, "literal-decode"),
            Rule::FormatMismatch => write!(f, "format-mismatch"),
            Rule::RenameCollision => write!(f, "rename-collision"),
            Rule::MissingString => write!(f, "missing-string"),
            Rule::UnusedString => write!(f, "unused-string"),
        }
    }
}

// ============================================================
// Issue Types - Source Code (SourceContext)
// ============================================================

/// String literal that is not valid Unicode text; the file is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralDecodeIssue {
    pub context: SourceContext,
    /// Raw spelling of the literal.
    pub raw: String,
}

impl LiteralDecodeIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::LiteralDecode
    }
}

/// Format literal whose markers or placeholders do not match its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatMismatchIssue {
    pub context: SourceContext,
    pub literal: String,
    pub reason: String,
}

impl FormatMismatchIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::FormatMismatch
    }
}

/// Templated id already present with a different translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameCollisionIssue {
    pub context: SourceContext,
    pub old_id: String,
    pub new_id: String,
}

impl RenameCollisionIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::RenameCollision
    }
}

/// Id passed to the translation function but absent from the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingStringIssue {
    pub context: SourceContext,
    pub id: String,
    /// Registry file that was expected to hold the id.
    pub registry_path: String,
}

impl MissingStringIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingString
    }
}

// ============================================================
// Issue Types - Registry Files
// ============================================================

/// Registry id never passed to the translation function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedStringIssue {
    pub registry_path: String,
    pub id: String,
    /// Source file the registry belongs to.
    pub source_path: String,
}

impl UnusedStringIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnusedString
    }
}

// ============================================================
// Special Issue Types
// ============================================================

/// File could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ParseError(ParseErrorIssue),
    LiteralDecode(LiteralDecodeIssue),
    FormatMismatch(FormatMismatchIssue),
    RenameCollision(RenameCollisionIssue),
    MissingString(MissingStringIssue),
    UnusedString(UnusedStringIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

impl From<RewriteError> for Issue {
    fn from(err: RewriteError) -> Self {
        match err {
            RewriteError::Parse {
                file,
                line,
                col,
                message,
            } => Issue::ParseError(ParseErrorIssue {
                file_path: file,
                error: format!("{} (line {}, column {})", message, line, col),
            }),
            RewriteError::LiteralDecode { context, raw } => {
                Issue::LiteralDecode(LiteralDecodeIssue { context, raw })
            }
        }
    }
}

impl From<RewriteWarning> for Issue {
    fn from(warning: RewriteWarning) -> Self {
        match warning {
            RewriteWarning::FormatMismatch {
                context,
                literal,
                reason,
            } => Issue::FormatMismatch(FormatMismatchIssue {
                context,
                literal,
                reason,
            }),
            RewriteWarning::RenameCollision {
                context,
                old_id,
                new_id,
            } => Issue::RenameCollision(RenameCollisionIssue {
                context,
                old_id,
                new_id,
            }),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only (registry entries, parse errors).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for LiteralDecodeIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.raw.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("literal is not valid Unicode text; file left unchanged".to_string())
    }
}

impl Report for FormatMismatchIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.literal.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.reason.clone())
    }
}

impl Report for RenameCollisionIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.new_id.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "kept the existing translation, dropped the one of \"{}\"",
            self.old_id
        ))
    }
}

impl Report for MissingStringIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.id.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("not in {}", self.registry_path))
    }

    fn hint(&self) -> Option<&str> {
        Some("run `intlwrap fixup` to reconcile the registry")
    }
}

impl Report for UnusedStringIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.registry_path,
        }
    }

    fn message(&self) -> String {
        self.id.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("not used in {}", self.source_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceLocation;

    fn context() -> SourceContext {
        SourceContext::new(SourceLocation::new("./src/app.ts", 3, 9), "f(\"Hello %s\");")
    }

    #[test]
    fn test_issue_from_rewrite_error() {
        let issue: Issue = RewriteError::Parse {
            file: "./src/app.ts".to_string(),
            line: 1,
            col: 5,
            message: "Unexpected token".to_string(),
        }
        .into();
        assert_eq!(issue.rule(), Rule::ParseError);
        assert_eq!(issue.severity(), Severity::Error);
        assert_eq!(issue.message(), "Unexpected token (line 1, column 5)");
        assert!(matches!(
            issue.location(),
            ReportLocation::File { path } if path == "./src/app.ts"
        ));
    }

    #[test]
    fn test_issue_from_rewrite_warning() {
        let issue: Issue = RewriteWarning::FormatMismatch {
            context: context(),
            literal: "\"Hello %s\"".to_string(),
            reason: "spread argument".to_string(),
        }
        .into();
        assert_eq!(issue.rule(), Rule::FormatMismatch);
        assert_eq!(issue.severity(), Severity::Warning);
        assert_eq!(issue.details().as_deref(), Some("spread argument"));
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(Rule::MissingString.to_string(), "missing-string");
        assert_eq!(Rule::UnusedString.to_string(), "unused-string");
        assert_eq!(Rule::RenameCollision.to_string(), "rename-collision");
    }
}
