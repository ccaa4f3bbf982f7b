//! GuardedEditor - a host editor wired to an edit session.
//!
//! Dispatches events in the order a host widget does: every proposed edit goes through
//! the before-change hook, is committed only if admitted, then the after-change hook
//! runs. Undo and redo bypass the before-change hook and are reconciled afterwards.

use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::host::{HostEditor, RopeHost};
use crate::markup::MarkupError;
use crate::persistence::{SavedState, StateStore, StoreError};
use crate::region::{Origin, Position, TextChange, Verdict};
use crate::session::EditSession;

/// Host plus session, with region rules enforced on every edit
#[derive(Debug, Clone)]
pub struct GuardedEditor<H: HostEditor = RopeHost> {
    host: H,
    session: EditSession,
}

impl GuardedEditor<RopeHost> {
    /// Editor over an empty in-memory host
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_host(RopeHost::new(), config)
    }
}

impl Default for GuardedEditor<RopeHost> {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl<H: HostEditor> GuardedEditor<H> {
    pub fn with_host(host: H, config: &EditorConfig) -> Self {
        Self {
            host,
            session: EditSession::new(config),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Load annotated text into the host
    pub fn load(&mut self, annotated: &str) -> Result<(), MarkupError> {
        self.session.load(&mut self.host, annotated)
    }

    pub fn text(&self) -> String {
        self.host.value()
    }

    pub fn cursor(&self) -> Position {
        self.host.cursor()
    }

    pub fn set_cursor(&mut self, pos: Position) {
        self.host.set_cursor(pos);
    }

    /// Propose `change`. It is committed (possibly truncated) unless rejected.
    pub fn apply(&mut self, mut change: TextChange) -> Verdict {
        let verdict = self.session.before_change(&self.host, &mut change);
        if verdict.is_rejected() {
            return verdict;
        }
        self.host.commit(&change);
        self.session.after_change(&mut self.host, &change);
        verdict
    }

    /// Type or paste `text` at `at`
    pub fn insert(&mut self, at: Position, text: &str) -> Verdict {
        let origin = if text.contains('\n') {
            Origin::Paste
        } else {
            Origin::Input
        };
        self.apply(TextChange::insertion(origin, at, text))
    }

    /// Delete the range `from..to`
    pub fn delete(&mut self, from: Position, to: Position) -> Verdict {
        self.apply(TextChange::deletion(Origin::Delete, from, to))
    }

    /// Undo the last committed edit. Returns the replayed change, if any.
    pub fn undo(&mut self) -> Option<TextChange> {
        let change = self.host.undo()?;
        self.session.after_change(&mut self.host, &change);
        Some(change)
    }

    /// Redo the last undone edit. Returns the replayed change, if any.
    pub fn redo(&mut self) -> Option<TextChange> {
        let change = self.host.redo()?;
        self.session.after_change(&mut self.host, &change);
        Some(change)
    }

    /// Enter key.
    ///
    /// Inside an editable block the block never grows: the lines below the cursor move
    /// down into the nearest blank line of the block, and the cursor line is split at the
    /// cursor with the remainder indented to the cursor column. Without a blank line
    /// nothing is edited. The cursor always moves to the next line.
    pub fn enter(&mut self) -> Position {
        let cursor = self.host.cursor();

        if self.session.regions().is_line_editable(cursor.line) {
            if let Some(blank) = self.blank_line_below(cursor.line) {
                for line in (cursor.line + 1..=blank).rev() {
                    let above = self.line_text(line - 1);
                    self.replace_line(line, &above);
                }

                let text = self.line_text(cursor.line);
                let split = text
                    .char_indices()
                    .nth(cursor.column)
                    .map_or(text.len(), |(i, _)| i);
                let (head, tail) = text.split_at(split);
                let indented = format!("{}{}", " ".repeat(cursor.column), tail);
                self.replace_line(cursor.line, head);
                self.replace_line(cursor.line + 1, &indented);
            }
        }

        self.host
            .set_cursor(Position::new(cursor.line + 1, cursor.column));
        self.host.cursor()
    }

    /// Whether the host should auto-indent the cursor line now
    pub fn wants_auto_indent(&self) -> bool {
        self.session.wants_auto_indent(&self.host)
    }

    pub fn export_for_execution(&self) -> String {
        self.session.export_for_execution(&self.host)
    }

    pub fn export_for_storage(&self) -> String {
        self.session.export_for_storage(&self.host)
    }

    pub fn export_player_contributions(&self) -> String {
        self.session.export_player_contributions(&self.host)
    }

    pub fn restore_code(&mut self, code: &str) {
        self.session.restore_code(&mut self.host, code);
    }

    pub fn save_state(&self) -> SavedState {
        self.session.save_state(&self.host)
    }

    pub fn restore_state(&mut self, state: &SavedState) {
        self.session.restore_state(&mut self.host, state);
    }

    /// Snapshot the session into `store` under `level`
    pub fn save_to(&self, store: &StateStore, level: u32) -> Result<PathBuf, StoreError> {
        store.save(level, &self.save_state())
    }

    /// Reinstate the session stored in `store` under `level`
    pub fn restore_from(&mut self, store: &StateStore, level: u32) -> Result<(), StoreError> {
        let state = store.load(level)?;
        self.restore_state(&state);
        Ok(())
    }

    /// First blank line of the block below `line`, if any
    fn blank_line_below(&self, line: usize) -> Option<usize> {
        let regions = self.session.regions();
        (line + 1..self.host.line_count())
            .take_while(|&candidate| regions.is_line_editable(candidate))
            .find(|&candidate| self.line_text(candidate).trim().is_empty())
    }

    fn line_text(&self, line: usize) -> String {
        self.host.line(line).unwrap_or_default().into_owned()
    }

    /// Replace a whole line through the guarded path.
    fn replace_line(&mut self, line: usize, text: &str) -> Verdict {
        let change = TextChange::new(
            Origin::Api,
            Position::new(line, 0),
            Position::new(line, self.host.line_length(line)),
            vec![text.to_string()],
        );
        self.apply(change)
    }
}
