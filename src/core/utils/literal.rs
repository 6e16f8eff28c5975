use swc_ecma_ast::{Expr, Lit, Str};

/// The string literal held by `expr`, if any.
pub fn as_str_lit(expr: &Expr) -> Option<&Str> {
    match expr {
        Expr::Lit(Lit::Str(s)) => Some(s),
        _ => None,
    }
}

pub fn is_str_lit(expr: &Expr) -> bool {
    as_str_lit(expr).is_some()
}

/// Quote character used by a raw literal, defaulting to `"`.
pub fn quote_char(raw: Option<&str>) -> char {
    match raw.and_then(|r| r.chars().next()) {
        Some('\'') => '\'',
        _ => '"',
    }
}

/// Render `value` as a JS string literal delimited by `quote`.
pub fn quote_js_string(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Source spelling of a literal: its raw text when available, re-quoted otherwise.
pub fn literal_source(s: &Str, value: &str) -> String {
    match &s.raw {
        Some(raw) => raw.to_string(),
        None => quote_js_string(value, '"'),
    }
}
