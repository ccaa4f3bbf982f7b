//! Position and change types shared by the gatekeeper, the synchronizer and hosts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the document (line and column, both 0-indexed, columns in chars).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }

    /// Position just past `lines` when they are inserted at `self`.
    pub fn advanced_by(&self, lines: &[String]) -> Position {
        match lines {
            [] => *self,
            [only] => Position::new(self.line, self.column + only.chars().count()),
            [.., last] => Position::new(self.line + lines.len() - 1, last.chars().count()),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Where an edit came from. Mirrors the origin tags a host widget attaches to changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Typed input
    #[default]
    #[serde(rename = "+input")]
    Input,
    /// Clipboard paste
    #[serde(rename = "paste")]
    Paste,
    /// Clipboard cut
    #[serde(rename = "cut")]
    Cut,
    /// Backspace / Delete
    #[serde(rename = "+delete")]
    Delete,
    /// Replayed by the host's history
    #[serde(rename = "undo")]
    Undo,
    /// Replayed by the host's history
    #[serde(rename = "redo")]
    Redo,
    /// Whole-document replacement
    #[serde(rename = "setValue")]
    SetValue,
    /// Programmatic edit (line rewrites, tooling)
    #[serde(other, rename = "api")]
    Api,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Input => "+input",
            Origin::Paste => "paste",
            Origin::Cut => "cut",
            Origin::Delete => "+delete",
            Origin::Undo => "undo",
            Origin::Redo => "redo",
            Origin::SetValue => "setValue",
            Origin::Api => "api",
        }
    }

    /// Undo and redo are applied by the host directly, bypassing the before-change hook.
    pub fn is_history(&self) -> bool {
        matches!(self, Origin::Undo | Origin::Redo)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single localized edit: replace `from..to` with `text` (one entry per line).
///
/// The same shape is used for proposed edits (before commit, where the gatekeeper may
/// rewrite `text`) and for committed edits (after commit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChange {
    #[serde(default)]
    pub origin: Origin,
    pub from: Position,
    pub to: Position,
    #[serde(default = "empty_text")]
    pub text: Vec<String>,
}

fn empty_text() -> Vec<String> {
    vec![String::new()]
}

impl TextChange {
    pub fn new(origin: Origin, from: Position, to: Position, text: Vec<String>) -> Self {
        let text = if text.is_empty() { empty_text() } else { text };
        Self {
            origin,
            from,
            to,
            text,
        }
    }

    /// Insert `text` at `at`, splitting it into lines.
    pub fn insertion(origin: Origin, at: Position, text: &str) -> Self {
        Self::new(origin, at, at, split_lines(text))
    }

    /// Delete `from..to` without inserting anything.
    pub fn deletion(origin: Origin, from: Position, to: Position) -> Self {
        Self::new(origin, from, to, empty_text())
    }

    /// Lines removed by this change (the `to` line collapses onto the `from` line).
    pub fn removed_line_count(&self) -> usize {
        self.to.line.saturating_sub(self.from.line)
    }

    /// Lines added by this change beyond the first replacement line.
    pub fn added_line_count(&self) -> usize {
        self.text.len().saturating_sub(1)
    }

    /// True when the change spans or creates more than one line.
    pub fn is_multi_line(&self) -> bool {
        self.removed_line_count() > 0 || self.added_line_count() > 0
    }

    /// First replacement line (the one spliced into the `from` line).
    pub fn first_line(&self) -> &str {
        self.text.first().map(String::as_str).unwrap_or("")
    }

    /// Replacement text joined back into one string.
    pub fn joined_text(&self) -> String {
        self.text.join("\n")
    }

    /// Position just past the inserted text once committed.
    pub fn end_after_commit(&self) -> Position {
        self.from.advanced_by(&self.text)
    }
}

impl fmt::Display for TextChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}..{} ({} line{})",
            self.origin,
            self.from,
            self.to,
            self.text.len(),
            if self.text.len() == 1 { "" } else { "s" }
        )
    }
}

/// Split text into lines the way a host widget reports replacement text.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        let a = Position::new(0, 5);
        let b = Position::new(1, 0);
        let c = Position::new(1, 3);

        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
    }

    #[test]
    fn test_advanced_by_single_line() {
        let pos = Position::new(2, 4);
        assert_eq!(pos.advanced_by(&["héllo".to_string()]), Position::new(2, 9));
    }

    #[test]
    fn test_advanced_by_multi_line() {
        let pos = Position::new(2, 4);
        let lines = split_lines("ab\ncd\nxyz");
        assert_eq!(pos.advanced_by(&lines), Position::new(4, 3));
    }

    #[test]
    fn test_line_counts() {
        let paste = TextChange::insertion(Origin::Paste, Position::new(1, 0), "a\nb\nc");
        assert_eq!(paste.added_line_count(), 2);
        assert_eq!(paste.removed_line_count(), 0);
        assert!(paste.is_multi_line());

        let del = TextChange::deletion(Origin::Delete, Position::new(1, 3), Position::new(3, 0));
        assert_eq!(del.removed_line_count(), 2);
        assert_eq!(del.added_line_count(), 0);
        assert_eq!(del.text, vec![String::new()]);
    }

    #[test]
    fn test_empty_text_is_normalized() {
        let change = TextChange::new(Origin::Api, Position::zero(), Position::zero(), vec![]);
        assert_eq!(change.first_line(), "");
        assert!(!change.is_multi_line());
    }

    #[test]
    fn test_origin_serde_tags() {
        let json = serde_json::to_string(&Origin::Delete).unwrap();
        assert_eq!(json, "\"+delete\"");
        let parsed: Origin = serde_json::from_str("\"redo\"").unwrap();
        assert!(parsed.is_history());
        let unknown: Origin = serde_json::from_str("\"drag\"").unwrap();
        assert_eq!(unknown, Origin::Api);
    }

    #[test]
    fn test_change_deserializes_with_default_text() {
        let change: TextChange = serde_json::from_str(
            r#"{"origin": "+delete", "from": {"line": 0, "column": 1}, "to": {"line": 0, "column": 2}}"#,
        )
        .unwrap();
        assert_eq!(change.text, vec![String::new()]);
        assert_eq!(change.origin, Origin::Delete);
    }
}
