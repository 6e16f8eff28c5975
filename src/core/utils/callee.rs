use std::fmt;

use anyhow::{Result, bail};
use swc_common::{DUMMY_SP, SyntaxContext};
use swc_ecma_ast::{Callee, Expr, Ident, IdentName, MemberExpr, MemberProp};

/// Dotted path of the translation function, e.g. `T` or `i18n.T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateFn {
    segments: Vec<String>,
}

impl TranslateFn {
    /// Parse a dotted identifier path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty or a segment is not an identifier.
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        for segment in &segments {
            if !is_identifier(segment) {
                bail!("Invalid translation function name: \"{}\"", path);
            }
        }
        Ok(Self { segments })
    }

    /// First segment, the binding that must be in scope (`i18n` for `i18n.T`).
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    /// Whether `expr` spells exactly this path.
    pub fn matches_expr(&self, expr: &Expr) -> bool {
        expr_path(expr).is_some_and(|path| path == self.segments)
    }

    /// Whether a call's callee is this function.
    pub fn matches_callee(&self, callee: &Callee) -> bool {
        match callee {
            Callee::Expr(expr) => self.matches_expr(expr),
            Callee::Super(_) | Callee::Import(_) => false,
        }
    }

    /// Build the callee expression for a synthesized call.
    pub fn to_expr(&self) -> Expr {
        let mut expr = Expr::Ident(Ident {
            span: DUMMY_SP,
            ctxt: SyntaxContext::empty(),
            sym: self.segments[0].as_str().into(),
            optional: false,
        });
        for segment in &self.segments[1..] {
            expr = Expr::Member(MemberExpr {
                span: DUMMY_SP,
                obj: Box::new(expr),
                prop: MemberProp::Ident(IdentName {
                    span: DUMMY_SP,
                    sym: segment.as_str().into(),
                }),
            });
        }
        expr
    }
}

impl Default for TranslateFn {
    fn default() -> Self {
        Self {
            segments: vec!["T".to_string()],
        }
    }
}

impl fmt::Display for TranslateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Identifier/member chain of an expression: `a.b.c` -> `["a", "b", "c"]`.
///
/// Returns `None` for anything else (computed members, calls, ...).
pub fn expr_path(expr: &Expr) -> Option<Vec<String>> {
    match expr {
        Expr::Ident(ident) => Some(vec![ident.sym.to_string()]),
        Expr::Member(member) => {
            let MemberProp::Ident(prop) = &member.prop else {
                return None;
            };
            let mut path = expr_path(&member.obj)?;
            path.push(prop.sym.to_string());
            Some(path)
        }
        Expr::Paren(paren) => expr_path(&paren.expr),
        _ => None,
    }
}

/// Whether a call's callee is CommonJS `require`.
pub fn is_require_callee(callee: &Callee) -> bool {
    matches!(callee, Callee::Expr(expr) if matches!(&**expr, Expr::Ident(ident) if &*ident.sym == "require"))
}

/// ASCII identifier check used for translation function segments and object keys.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translate_fn() {
        assert_eq!(TranslateFn::parse("T").unwrap().to_string(), "T");
        assert_eq!(TranslateFn::parse("i18n.T").unwrap().root(), "i18n");
        assert!(TranslateFn::parse("").is_err());
        assert!(TranslateFn::parse("i18n..T").is_err());
        assert!(TranslateFn::parse("t()").is_err());
    }

    #[test]
    fn test_to_expr_round_trips_through_expr_path() {
        let f = TranslateFn::parse("app.i18n.T").unwrap();
        assert!(f.matches_expr(&f.to_expr()));
        assert_eq!(
            expr_path(&f.to_expr()),
            Some(vec!["app".to_string(), "i18n".to_string(), "T".to_string()])
        );
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Arg0"));
        assert!(is_identifier("_name"));
        assert!(is_identifier("$t"));
        assert!(!is_identifier("0Arg"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));
    }
}
