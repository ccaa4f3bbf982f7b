//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use editlock::config::EditorConfig;
use editlock::region::{Origin, Position, TextChange};
use editlock::{GuardedEditor, HostEditor};
use std::collections::BTreeSet;

/// First scenario document: a two-line block followed by a locked line
pub const TWO_LINE_BLOCK: &str = "#BEGIN_EDITABLE#\nfoo\nbar\n#END_EDITABLE#\nbaz";

/// Two blocks separated by locked lines: editable lines {0, 1, 5}
pub const TWO_BLOCKS: &str = "#BEGIN_EDITABLE#\nfoo\nbar\n#END_EDITABLE#\nl2\nl3\nl4\n\
#BEGIN_EDITABLE#\nq\n#END_EDITABLE#\ntail";

/// Create an editor with default config and `source` loaded
pub fn editor(source: &str) -> GuardedEditor {
    editor_with(source, EditorConfig::default())
}

/// Create an editor with `config` and `source` loaded
pub fn editor_with(source: &str, config: EditorConfig) -> GuardedEditor {
    let mut editor = GuardedEditor::new(&config);
    editor.load(source).expect("test source should load");
    editor
}

pub fn pos(line: usize, column: usize) -> Position {
    Position::new(line, column)
}

pub fn lines(indices: &[usize]) -> BTreeSet<usize> {
    indices.iter().copied().collect()
}

/// Text of one line in the editor's host
pub fn line(editor: &GuardedEditor, index: usize) -> String {
    editor.host().line(index).unwrap_or_default().into_owned()
}

/// Editable lines of the editor's current region model
pub fn editable(editor: &GuardedEditor) -> BTreeSet<usize> {
    editor.session().regions().editable_lines().clone()
}

/// A typed or pasted change replacing `from..to` with `text`
pub fn replace(origin: Origin, from: Position, to: Position, text: &str) -> TextChange {
    TextChange::new(origin, from, to, editlock::region::split_lines(text))
}
