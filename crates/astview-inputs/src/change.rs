use line_index::{LineCol, LineIndex};
use text_size::TextSize;

use crate::{Document, Range};

/// One entry of an editor change notification.
///
/// A change without a range replaces the whole document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContentChange {
    pub range: Option<Range>,
    pub text: String,
}

impl ContentChange {
    pub fn replace(range: Range, text: impl Into<String>) -> Self {
        Self { range: Some(range), text: text.into() }
    }

    pub fn full(text: impl Into<String>) -> Self {
        Self { range: None, text: text.into() }
    }
}

/// A span edit in byte offsets, with the matching line/column points
/// before (`start`, `old_end`) and after (`new_end`) the edit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Edit {
    pub start: TextSize,
    pub old_end: TextSize,
    pub new_end: TextSize,
    pub start_point: LineCol,
    pub old_end_point: LineCol,
    pub new_end_point: LineCol,
}

impl Document {
    /// Applies `change` to the text.
    ///
    /// Returns the span edit that was applied, or `None` when the change
    /// replaced the whole document.
    pub fn apply_change(&mut self, change: ContentChange) -> Option<Edit> {
        let ContentChange { range, text } = change;
        let Some(range) = range else {
            self.set_text(text);
            return None;
        };

        let start = self.offset(range.start);
        let old_end = self.offset(range.end).max(start);
        let start_point = self.line_index.line_col(start);
        let old_end_point = self.line_index.line_col(old_end);
        let new_end = start + TextSize::of(text.as_str());

        self.text.replace_range(usize::from(start)..usize::from(old_end), &text);
        self.line_index = LineIndex::new(&self.text);
        let new_end_point = self.line_index.line_col(new_end);

        Some(Edit { start, old_end, new_end, start_point, old_end_point, new_end_point })
    }
}
