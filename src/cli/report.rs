//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format.
//! Separate from core logic to allow intlwrap to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
///
/// Issues are sorted and displayed with severity, location, source context,
/// and details.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(source_files: usize) {
    print_success_to(source_files, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(source_files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} source {} - no issues found",
            source_files,
            plural(source_files, "file", "files")
        )
        .green()
    );
}

/// Print the "nothing to do" message of a dry-run or apply.
pub fn print_nothing_to_do(source_files: usize, what: &str) {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} source {} - no {}",
            source_files,
            plural(source_files, "file", "files"),
            what
        )
        .green()
    );
}

/// Print the hint shown at the end of a dry-run.
pub fn print_apply_hint(what: &str) {
    println!("Run with {} to {}.", "--apply".cyan(), what);
}

pub fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // File-level issues have no position.
    if line == 0 {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    } else {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    }

    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // col is 1-based
        let prefix = if col > 1 {
            source_line.chars().take(col - 1).collect::<String>()
        } else {
            String::new()
        };
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            plural(total_problems, "problem", "problems"),
            total_errors,
            plural(total_errors, "error", "errors").red(),
            total_warnings,
            plural(total_warnings, "warning", "warnings").yellow()
        );
    }
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            Some(&ctx.source_line),
        ),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    let a_loc = a.location();
    let b_loc = b.location();
    let (a_path, a_line, a_col, _) = extract_location_info(&a_loc);
    let (b_path, b_line, b_col, _) = extract_location_info(&b_loc);

    a_path
        .cmp(b_path)
        .then_with(|| a_line.cmp(&b_line))
        .then_with(|| a_col.cmp(&b_col))
        .then_with(|| a.rule().cmp(&b.rule()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SourceContext, SourceLocation};
    use crate::issues::{
        FormatMismatchIssue, MissingStringIssue, ParseErrorIssue, UnusedStringIssue,
    };

    fn strip_ansi(s: &str) -> String {
        let mut result = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    fn render(issues: &[Issue]) -> String {
        let mut output = Vec::new();
        report_to(issues, &mut output);
        strip_ansi(&String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_report_empty() {
        let mut output = Vec::new();
        report_to(&[], &mut output);
        assert!(output.is_empty());
    }

    #[test]
    fn test_report_missing_string() {
        let loc = SourceLocation::new("./src/app.ts", 10, 5);
        let ctx = SourceContext::new(loc, "    T(\"Hello\");");
        let issue = Issue::MissingString(MissingStringIssue {
            context: ctx,
            id: "Hello".to_string(),
            registry_path: "./i18n/src/app.ts.en.json".to_string(),
        });

        let stripped = render(&[issue]);

        assert!(stripped.contains("error: \"Hello\"  missing-string"));
        assert!(stripped.contains("--> ./src/app.ts:10:5"));
        assert!(stripped.contains("10 |     T(\"Hello\");"));
        assert!(stripped.contains("note: not in ./i18n/src/app.ts.en.json"));
        assert!(stripped.contains("hint:"));
    }

    #[test]
    fn test_report_caret_position() {
        let loc = SourceLocation::new("./src/app.ts", 3, 7);
        let ctx = SourceContext::new(loc, "fmt(\"%s and %s\", a);");
        let issue = Issue::FormatMismatch(FormatMismatchIssue {
            context: ctx,
            literal: "%s and %s".to_string(),
            reason: "2 markers for 1 argument".to_string(),
        });

        let stripped = render(&[issue]);
        let caret_line = stripped
            .lines()
            .find(|line| line.ends_with('^'))
            .unwrap();

        assert_eq!(caret_line, "  |       ^");
        assert!(stripped.contains("warning:"));
    }

    #[test]
    fn test_report_file_level_issue() {
        let issue = Issue::UnusedString(UnusedStringIssue {
            registry_path: "./i18n/a.ts.en.json".to_string(),
            id: "Old".to_string(),
            source_path: "./a.ts".to_string(),
        });

        let stripped = render(&[issue]);

        assert!(stripped.contains("warning: \"Old\"  unused-string"));
        assert!(stripped.contains("--> ./i18n/a.ts.en.json\n"));
        assert!(!stripped.contains('|'));
    }

    #[test]
    fn test_report_summary() {
        let issues = vec![
            Issue::ParseError(ParseErrorIssue {
                file_path: "./b.ts".to_string(),
                error: "Unexpected token".to_string(),
            }),
            Issue::UnusedString(UnusedStringIssue {
                registry_path: "./i18n/a.ts.en.json".to_string(),
                id: "Old".to_string(),
                source_path: "./a.ts".to_string(),
            }),
            Issue::UnusedString(UnusedStringIssue {
                registry_path: "./i18n/a.ts.en.json".to_string(),
                id: "Older".to_string(),
                source_path: "./a.ts".to_string(),
            }),
        ];

        let stripped = render(&issues);

        assert!(stripped.contains("3 problems (1 error, 2 warnings)"));
        let first = stripped.find("./b.ts").unwrap();
        let second = stripped.find("./i18n/a.ts.en.json").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_print_success() {
        let mut output = Vec::new();
        print_success_to(1, &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());
        assert!(stripped.contains("Checked 1 source file - no issues found"));
    }
}
