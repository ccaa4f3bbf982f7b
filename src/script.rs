//! Replay scripts: a JSON array of editor events run against a [`GuardedEditor`].
//!
//! ```json
//! [
//!   {"cursor": {"line": 1, "column": 3}},
//!   {"edit": {"origin": "+input", "from": {"line": 1, "column": 3},
//!             "to": {"line": 1, "column": 3}, "text": ["x"]}},
//!   "undo",
//!   "redo",
//!   "enter"
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::editor::GuardedEditor;
use crate::host::HostEditor;
use crate::region::{Position, TextChange, Verdict};

/// One editor event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Propose an edit through the before-change hook
    Edit(TextChange),
    /// Move the cursor
    Cursor(Position),
    Undo,
    Redo,
    /// Enter key at the cursor
    Enter,
}

/// What a step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepReport {
    Edit(Verdict),
    /// Undo or redo; the replayed change, or `None` with nothing to replay
    History(Option<TextChange>),
    /// Cursor position after a cursor move or Enter
    Cursor(Position),
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepReport::Edit(verdict) => write!(f, "{}", verdict),
            StepReport::History(Some(change)) => write!(f, "replayed {}", change),
            StepReport::History(None) => write!(f, "nothing to replay"),
            StepReport::Cursor(pos) => write!(f, "cursor at {}", pos),
        }
    }
}

/// Parse a replay script
pub fn parse(json: &str) -> Result<Vec<Step>, serde_json::Error> {
    serde_json::from_str(json)
}

impl<H: HostEditor> GuardedEditor<H> {
    /// Run one step
    pub fn play(&mut self, step: &Step) -> StepReport {
        tracing::debug!(?step, "replaying step");
        match step {
            Step::Edit(change) => StepReport::Edit(self.apply(change.clone())),
            Step::Cursor(pos) => {
                self.set_cursor(*pos);
                StepReport::Cursor(self.cursor())
            }
            Step::Undo => StepReport::History(self.undo()),
            Step::Redo => StepReport::History(self.redo()),
            Step::Enter => StepReport::Cursor(self.enter()),
        }
    }

    /// Run every step in order
    pub fn play_all(&mut self, steps: &[Step]) -> Vec<StepReport> {
        steps.iter().map(|step| self.play(step)).collect()
    }
}
