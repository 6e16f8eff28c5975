//! Byte-range edits against the original source text.

/// Replace `code[start..end]` with `text`. An empty range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Pending edits of one file.
///
/// Edits never overlap: a replacement that covers earlier edits is built
/// from [`EditList::render_range`], which consumes them.
#[derive(Debug, Default)]
pub struct EditList {
    edits: Vec<TextEdit>,
}

impl EditList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn replace(&mut self, start: usize, end: usize, text: impl Into<String>) {
        debug_assert!(start <= end);
        self.edits.push(TextEdit {
            start,
            end,
            text: text.into(),
        });
    }

    pub fn insert(&mut self, at: usize, text: impl Into<String>) {
        self.replace(at, at, text);
    }

    /// Text of `code[start..end]` with every edit inside that range applied.
    ///
    /// The applied edits are removed from the list.
    pub fn render_range(&mut self, code: &str, start: usize, end: usize) -> String {
        let (mut inside, outside): (Vec<TextEdit>, Vec<TextEdit>) = self
            .edits
            .drain(..)
            .partition(|e| e.start >= start && e.end <= end);
        self.edits = outside;
        inside.sort_by_key(|e| (e.start, e.end));

        let mut out = String::with_capacity(end - start);
        let mut cursor = start;
        for edit in inside {
            debug_assert!(edit.start >= cursor, "overlapping edits");
            out.push_str(&code[cursor..edit.start]);
            out.push_str(&edit.text);
            cursor = edit.end;
        }
        out.push_str(&code[cursor..end]);
        out
    }

    /// Apply every edit to `code`.
    pub fn apply(mut self, code: &str) -> String {
        self.render_range(code, 0, code.len())
    }
}
