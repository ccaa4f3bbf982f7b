//! The host text editor the region rules are enforced against.
//!
//! The session only needs a narrow view of the host: line queries, the cursor, the
//! ability to set the whole text, undo/redo, and two kinds of visual markup (disabled
//! lines, highlighted editable ranges). [`RopeHost`] is a complete in-memory host used by
//! the CLI and the tests.

mod history;
mod rope;

use std::borrow::Cow;
use std::ops::Range;

use crate::region::{Position, TextChange};

pub use history::{EditHistory, EditRecord};
pub use rope::RopeHost;

/// What the editing session needs from a text-editor widget.
pub trait HostEditor {
    /// Number of lines (always >= 1)
    fn line_count(&self) -> usize;

    /// Line content without its trailing newline
    fn line(&self, line: usize) -> Option<Cow<'_, str>>;

    /// Length of a line in characters (0 for lines past the end)
    fn line_length(&self, line: usize) -> usize {
        self.line(line).map_or(0, |text| text.chars().count())
    }

    /// Full document text
    fn value(&self) -> String;

    fn cursor(&self) -> Position;

    fn set_cursor(&mut self, pos: Position);

    /// Replace the whole document. Not routed through the before-change hook.
    fn set_value(&mut self, text: &str);

    /// Apply an already-judged change and record it in history.
    fn commit(&mut self, change: &TextChange);

    /// Revert the last committed change. Returns the change as applied, tagged `Undo`.
    fn undo(&mut self) -> Option<TextChange>;

    /// Re-apply the last undone change. Returns the change as applied, tagged `Redo`.
    fn redo(&mut self) -> Option<TextChange>;

    fn clear_history(&mut self);

    /// Give a line the visual "disabled" attribute.
    fn mark_line_disabled(&mut self, line: usize);

    fn clear_line_marks(&mut self);

    /// Give a column range on a line the visual "editable" attribute.
    fn highlight_editable(&mut self, line: usize, columns: Range<usize>);

    fn clear_highlights(&mut self);
}
