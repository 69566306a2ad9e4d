//! Server-side mirror of the documents open in the editor.

mod change;
#[cfg(test)]
mod tests;

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
pub use line_index::{LineCol, LineIndex};
use line_index::{WideEncoding, WideLineCol};
pub use text_size::{TextRange, TextSize};

pub use crate::change::{ContentChange, Edit};

/// Opaque key of an open document, as handed out by the host.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Zero-based line and UTF-16 code unit, the way editors count.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

#[derive(Debug)]
pub struct Document {
    path: Utf8PathBuf,
    text: String,
    line_index: LineIndex,
}

impl Document {
    pub fn new(path: impl Into<Utf8PathBuf>, text: String) -> Self {
        let line_index = LineIndex::new(&text);
        Self { path: path.into(), text, line_index }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn len(&self) -> TextSize {
        TextSize::of(self.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_text(&mut self, text: String) {
        self.line_index = LineIndex::new(&text);
        self.text = text;
    }

    /// Byte offset of `position`. Columns past the end of a line clamp to the
    /// line end; lines past the end of the text clamp to the text end. A
    /// column inside a surrogate pair snaps back to the start of its char.
    pub fn offset(&self, position: Position) -> TextSize {
        let wide = WideLineCol { line: position.line, col: position.character };
        let Some(line_col) = self.line_index.to_utf8(WideEncoding::Utf16, wide) else {
            return self.len();
        };
        let Some(line_range) = self.line_index.line(line_col.line) else {
            return self.len();
        };

        let line_text = &self.text[line_range];
        let content = line_text.trim_end_matches(['\n', '\r']);
        let mut col = (line_col.col as usize).min(content.len());
        while !content.is_char_boundary(col) {
            col -= 1;
        }
        line_range.start() + TextSize::try_from(col).unwrap_or_default()
    }

    pub fn position(&self, offset: TextSize) -> Position {
        let line_col = self.line_index.line_col(offset.min(self.len()));
        let character = self
            .line_index
            .to_wide(WideEncoding::Utf16, line_col)
            .map_or(line_col.col, |wide| wide.col);

        Position { line: line_col.line, character }
    }

    pub fn range(&self, range: TextRange) -> Range {
        Range { start: self.position(range.start()), end: self.position(range.end()) }
    }
}
