//! Format-string classification and conversion.
//!
//! A string literal can be written in one of three styles:
//!
//! - **Plain**: no formatting at all (`"Hello world"`)
//! - **Templated**: named placeholders (`"Hello {{.Name}}"`)
//! - **Interpolated**: positional printf-style markers (`"Hello %s"`)
//!
//! Interpolated strings are converted to templated form so that translators
//! can reorder arguments. The synthesized placeholder names are `Arg0`,
//! `Arg1`, ... in marker order.
//!
//! Nothing in this module knows about syntax trees.

use std::{fmt, sync::LazyLock};

use regex::Regex;

/// Named placeholder: `{{.Name}}` where `Name` is an identifier.
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\.([A-Za-z_][A-Za-z0-9_]*)\}\}").expect("placeholder regex is valid")
});

/// Positional marker or an escaped percent sign.
///
/// `%%` is matched as a whole so that `find_iter` never treats the second
/// percent sign as the start of a marker. The space flag is not accepted:
/// prose such as "50% off" must stay plain.
static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%%|%[-+#0]*(?:\d+|\*)?(?:\.(?:\d+|\*))?[bcdeEfFgGioOpqsStTuvxX]")
        .expect("marker regex is valid")
});

/// Prefix of synthesized placeholder names.
pub const SYNTHETIC_ARG_PREFIX: &str = "Arg";

/// Formatting style of a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStyle {
    /// No placeholders and no positional markers.
    Plain,
    /// Contains at least one `{{.Name}}` placeholder.
    Templated,
    /// Contains at least one positional marker such as `%s` or `%d`.
    Interpolated,
}

impl fmt::Display for FormatStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatStyle::Plain => write!(f, "plain"),
            FormatStyle::Templated => write!(f, "templated"),
            FormatStyle::Interpolated => write!(f, "interpolated"),
        }
    }
}

/// A string in templated form together with its argument names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatedString {
    pub text: String,
    /// Distinct placeholder names in order of first appearance.
    pub names: Vec<String>,
}

/// Conversion failure from interpolated to templated form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The number of positional markers differs from the number of arguments.
    MarkerCountMismatch { markers: usize, args: usize },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::MarkerCountMismatch { markers, args } => write!(
                f,
                "format string has {} positional marker(s) but {} argument(s) were supplied",
                markers, args
            ),
        }
    }
}

impl std::error::Error for TemplateError {}

/// Classify the formatting style of `s`.
///
/// Placeholders are checked first, so a string containing both
/// `{{.Name}}` and `%s` is [`FormatStyle::Templated`].
pub fn classify_format(s: &str) -> FormatStyle {
    if PLACEHOLDER_REGEX.is_match(s) {
        FormatStyle::Templated
    } else if marker_count(s) > 0 {
        FormatStyle::Interpolated
    } else {
        FormatStyle::Plain
    }
}

/// Placeholder names of a templated string, deduplicated, in first-appearance order.
///
/// Returns an empty vector for strings without placeholders.
pub fn placeholder_names(s: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_REGEX.captures_iter(s) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Number of positional markers in `s` (escaped `%%` excluded).
pub fn marker_count(s: &str) -> usize {
    MARKER_REGEX
        .find_iter(s)
        .filter(|m| m.as_str() != "%%")
        .count()
}

/// Convert an interpolated string to templated form.
///
/// The K-th positional marker becomes `{{.ArgK}}`. Escaped `%%` sequences are
/// kept verbatim.
///
/// # Errors
///
/// Returns [`TemplateError::MarkerCountMismatch`] if the number of markers
/// differs from `arg_count`.
pub fn to_templated(s: &str, arg_count: usize) -> Result<TemplatedString, TemplateError> {
    let markers = marker_count(s);
    if markers != arg_count {
        return Err(TemplateError::MarkerCountMismatch {
            markers,
            args: arg_count,
        });
    }

    let mut text = String::with_capacity(s.len() + arg_count * 8);
    let mut names = Vec::with_capacity(arg_count);
    let mut last = 0;

    for m in MARKER_REGEX.find_iter(s) {
        if m.as_str() == "%%" {
            continue;
        }
        let name = synthetic_name(names.len());
        text.push_str(&s[last..m.start()]);
        text.push_str("{{.");
        text.push_str(&name);
        text.push_str("}}");
        names.push(name);
        last = m.end();
    }
    text.push_str(&s[last..]);

    Ok(TemplatedString { text, names })
}

/// Placeholder name for the argument at `index`.
pub fn synthetic_name(index: usize) -> String {
    format!("{}{}", SYNTHETIC_ARG_PREFIX, index)
}
