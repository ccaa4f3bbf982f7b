//! Edit history (undo/redo) for the reference host.

use crate::region::{Origin, Position, TextChange};

/// A committed edit that can be undone/redone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRecord {
    /// Where the edit started
    pub from: Position,
    /// Lines that were replaced (a single empty line for pure inserts)
    pub removed: Vec<String>,
    /// Lines that were inserted (a single empty line for pure deletes)
    pub inserted: Vec<String>,
}

impl EditRecord {
    pub fn new(from: Position, removed: Vec<String>, inserted: Vec<String>) -> Self {
        Self {
            from,
            removed,
            inserted,
        }
    }

    /// Get the inverse record for undo
    pub fn inverse(&self) -> Self {
        Self {
            from: self.from,
            removed: self.inserted.clone(),
            inserted: self.removed.clone(),
        }
    }

    /// The change that re-applies this record to the document it was recorded against.
    pub fn to_change(&self, origin: Origin) -> TextChange {
        TextChange::new(
            origin,
            self.from,
            self.from.advanced_by(&self.removed),
            self.inserted.clone(),
        )
    }
}

/// Edit history with undo/redo stacks.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    undo_stack: Vec<EditRecord>,
    redo_stack: Vec<EditRecord>,
    max_size: usize,
}

impl EditHistory {
    /// Create a new edit history with default max size
    pub fn new() -> Self {
        Self::with_max_size(1000)
    }

    /// Create a new edit history with specified max size
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Push a record onto the undo stack (clears redo stack)
    pub fn push(&mut self, record: EditRecord) {
        self.redo_stack.clear();
        self.undo_stack.push(record);

        while self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
    }

    /// Pop a record from the undo stack (its inverse moves to the redo stack).
    /// Apply the returned record's inverse to undo it.
    pub fn pop_undo(&mut self) -> Option<EditRecord> {
        let record = self.undo_stack.pop()?;
        self.redo_stack.push(record.inverse());
        Some(record)
    }

    /// Pop a record from the redo stack (its inverse moves back to the undo stack).
    /// Apply the returned record's inverse to redo.
    pub fn pop_redo(&mut self) -> Option<EditRecord> {
        let record = self.redo_stack.pop()?;
        self.undo_stack.push(record.inverse());
        Some(record)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
