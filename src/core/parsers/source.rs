use std::{path::Path, sync::Arc};

use swc_common::{
    BytePos, FileName, Globals, SourceFile, SourceMap, Span, Spanned,
    comments::SingleThreadedComments,
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::core::{RewriteError, SourceContext, SourceLocation};

/// A parsed JS/TS source file.
///
/// Keeps the original text next to the AST: rewrites are emitted as edits
/// against byte ranges of `code`, so anything the rewrite does not touch is
/// written back exactly as it was read.
pub struct ParsedSource {
    pub file_path: String,
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub source_file: Arc<SourceFile>,
    pub code: String,
}

impl ParsedSource {
    /// Read-only view of the source text.
    pub fn text(&self) -> SourceText<'_> {
        SourceText {
            file_path: &self.file_path,
            code: &self.code,
            source_map: &self.source_map,
            start: self.source_file.start_pos,
        }
    }

    /// Borrow the AST mutably alongside a view of the source text.
    pub fn split(&mut self) -> (&mut Module, SourceText<'_>) {
        let text = SourceText {
            file_path: &self.file_path,
            code: &self.code,
            source_map: &self.source_map,
            start: self.source_file.start_pos,
        };
        (&mut self.module, text)
    }
}

/// Source text of one file plus position lookups.
#[derive(Clone, Copy)]
pub struct SourceText<'a> {
    pub file_path: &'a str,
    pub code: &'a str,
    source_map: &'a SourceMap,
    start: BytePos,
}

impl SourceText<'_> {
    /// Byte offset of `pos` within `code`.
    pub fn offset(&self, pos: BytePos) -> usize {
        (pos.0 - self.start.0) as usize
    }

    /// Byte range of `span` within `code`.
    pub fn range(&self, span: Span) -> (usize, usize) {
        (self.offset(span.lo), self.offset(span.hi))
    }

    /// Location of `pos` with the text of its line.
    pub fn context(&self, pos: BytePos) -> SourceContext {
        let loc = self.source_map.lookup_char_pos(pos);
        let source_line = loc
            .file
            .get_line(loc.line - 1)
            .map(|cow| cow.to_string())
            .unwrap_or_default();
        SourceContext::new(
            SourceLocation::new(self.file_path, loc.line, loc.col_display + 1),
            source_line,
        )
    }
}

/// Syntax used for a file, chosen by extension.
///
/// Plain JavaScript goes through the TypeScript parser with JSX enabled,
/// which accepts every construct of the JS grammar; `.ts` files disable JSX
/// so that `<Type>value` assertions parse.
fn syntax_for(file_path: &str) -> Syntax {
    let ext = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    Syntax::Typescript(TsSyntax {
        tsx: !matches!(ext, "ts" | "mts" | "cts"),
        ..Default::default()
    })
}

/// Parse JS/TS source code into an AST.
pub fn parse_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource, RewriteError> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code.clone());

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            syntax_for(file_path),
            StringInput::from(&*source_file),
            Some(&comments),
        );

        let module = parser.parse_module().map_err(|e| {
            let loc = source_map.lookup_char_pos(e.span().lo);
            RewriteError::Parse {
                file: file_path.to_string(),
                line: loc.line,
                col: loc.col_display + 1,
                message: e.kind().msg().to_string(),
            }
        })?;

        Ok(ParsedSource {
            file_path: file_path.to_string(),
            module,
            source_map: source_map.clone(),
            source_file,
            code,
        })
    })
}
