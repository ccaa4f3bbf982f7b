//! In-memory host editor backed by `ropey::Rope`.

use ropey::Rope;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::ops::Range;

use super::history::{EditHistory, EditRecord};
use super::HostEditor;
use crate::region::{split_lines, Origin, Position, TextChange};

/// Host editor over a rope, with cursor, undo/redo history and visual markup state.
#[derive(Debug, Clone)]
pub struct RopeHost {
    rope: Rope,
    cursor: Position,
    history: EditHistory,
    disabled: BTreeSet<usize>,
    highlights: Vec<(usize, Range<usize>)>,
}

impl RopeHost {
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Create a host holding `s`
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
            cursor: Position::zero(),
            history: EditHistory::new(),
            disabled: BTreeSet::new(),
            highlights: Vec::new(),
        }
    }

    /// Access the underlying Rope
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Lines currently carrying the "disabled" attribute
    pub fn disabled_lines(&self) -> &BTreeSet<usize> {
        &self.disabled
    }

    /// Ranges currently carrying the "editable" attribute
    pub fn highlights(&self) -> &[(usize, Range<usize>)] {
        &self.highlights
    }

    /// Convert (line, column) to char offset, clamping to the document
    fn position_to_offset(&self, pos: Position) -> usize {
        if pos.line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(pos.line) + pos.column.min(self.line_length(pos.line))
    }

    /// Replace `change.from..change.to` with the change text. Returns the replaced lines.
    fn splice(&mut self, change: &TextChange) -> Vec<String> {
        let start = self.position_to_offset(change.from);
        let end = self.position_to_offset(change.to).max(start);
        let removed = self.rope.slice(start..end).to_string();
        if start < end {
            self.rope.remove(start..end);
        }
        self.rope.insert(start, &change.joined_text());
        self.cursor = change.end_after_commit();
        split_lines(&removed)
    }

    fn replay(&mut self, record: EditRecord, origin: Origin) -> TextChange {
        let change = record.inverse().to_change(origin);
        self.splice(&change);
        change
    }
}

impl Default for RopeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEditor for RopeHost {
    fn line_count(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        Some(Cow::Owned(text))
    }

    fn line_length(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(line);
        let len = slice.len_chars();
        // Exclude trailing newline if present
        if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    fn value(&self) -> String {
        self.rope.to_string()
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, pos: Position) {
        let line = pos.line.min(self.line_count() - 1);
        self.cursor = Position::new(line, pos.column.min(self.line_length(line)));
    }

    fn set_value(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = Position::zero();
        self.disabled.clear();
        self.highlights.clear();
    }

    fn commit(&mut self, change: &TextChange) {
        let removed = self.splice(change);
        self.history
            .push(EditRecord::new(change.from, removed, change.text.clone()));
    }

    fn undo(&mut self) -> Option<TextChange> {
        let record = self.history.pop_undo()?;
        Some(self.replay(record, Origin::Undo))
    }

    fn redo(&mut self) -> Option<TextChange> {
        let record = self.history.pop_redo()?;
        Some(self.replay(record, Origin::Redo))
    }

    fn clear_history(&mut self) {
        self.history.clear();
    }

    fn mark_line_disabled(&mut self, line: usize) {
        self.disabled.insert(line);
    }

    fn clear_line_marks(&mut self) {
        self.disabled.clear();
    }

    fn highlight_editable(&mut self, line: usize, columns: Range<usize>) {
        self.highlights.push((line, columns));
    }

    fn clear_highlights(&mut self) {
        self.highlights.clear();
    }
}
