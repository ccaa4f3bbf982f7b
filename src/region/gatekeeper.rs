//! Change gatekeeper: judges every proposed edit before the host commits it.
//!
//! A proposed edit is rejected, accepted, or accepted with its first replacement line
//! truncated to the line-length limit. Accepted edits update the region model in place so
//! it stays consistent with whatever text the host ends up committing.

use std::fmt;

use super::change::TextChange;
use super::model::RegionModel;
use super::shift::{reshape, LineDelta};

/// Default maximum line length, in characters.
pub const DEFAULT_CHAR_LIMIT: usize = 80;

/// Why a proposed edit was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The `to` position is neither on an editable line nor strictly inside a section.
    OutsideEditableRegion,
    /// A multi-line edit landed on a line that is only editable through a section.
    MultiLineInSection,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutsideEditableRegion => write!(f, "outside editable region"),
            Self::MultiLineInSection => write!(f, "multi-line edit inside an inline section"),
        }
    }
}

/// Outcome of judging one proposed edit. Rejection is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The edit goes through unchanged.
    Accepted { lines: LineDelta },
    /// The edit goes through with `dropped` characters cut from its first line.
    Truncated { lines: LineDelta, dropped: usize },
    /// The edit must not be committed.
    Rejected(RejectReason),
}

impl Verdict {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Verdict::Rejected(_))
    }

    pub fn is_accepted(&self) -> bool {
        !self.is_rejected()
    }

    /// How the edit changed the line structure, if it was let through.
    pub fn line_delta(&self) -> Option<LineDelta> {
        match self {
            Verdict::Accepted { lines } | Verdict::Truncated { lines, .. } => Some(*lines),
            Verdict::Rejected(_) => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted { .. } => write!(f, "accepted"),
            Verdict::Truncated { dropped, .. } => {
                write!(f, "truncated ({} char{} dropped)", dropped, plural(*dropped))
            }
            Verdict::Rejected(reason) => write!(f, "rejected: {}", reason),
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// How an edit was admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admission {
    Line,
    Section,
}

/// Limits applied to admitted edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gatekeeper {
    /// Maximum line length in characters
    pub char_limit: usize,
    /// Move section-map keys along with editable lines when line counts change
    pub shift_sections: bool,
}

impl Default for Gatekeeper {
    fn default() -> Self {
        Self {
            char_limit: DEFAULT_CHAR_LIMIT,
            shift_sections: true,
        }
    }
}

impl Gatekeeper {
    pub fn new(char_limit: usize, shift_sections: bool) -> Self {
        Self {
            char_limit,
            shift_sections,
        }
    }

    /// Judge `change` against `model`, mutating both on acceptance.
    ///
    /// `line_length` is the current length in characters of the line at `change.to.line`.
    /// The replacement text may be truncated in place; the caller commits whatever is
    /// left in `change.text`.
    pub fn judge(
        &self,
        model: &mut RegionModel,
        change: &mut TextChange,
        line_length: usize,
    ) -> Verdict {
        tracing::debug!(
            origin = %change.origin,
            lines = change.text.len(),
            from = change.from.line,
            to = change.to.line,
            "editor input (before change)"
        );

        let admission = match admit(model, change) {
            Some(admission) => admission,
            None => return reject(change, RejectReason::OutsideEditableRegion),
        };

        if admission == Admission::Section && change.is_multi_line() {
            return reject(change, RejectReason::MultiLineInSection);
        }

        let lines = reshape(model, change, self.shift_sections);
        if change.to.line != change.from.line {
            return Verdict::Accepted { lines };
        }

        let dropped = self.enforce_line_length(change, line_length);

        if admission == Admission::Section {
            self.adjust_sections(model, change);
        }

        if dropped > 0 {
            Verdict::Truncated { lines, dropped }
        } else {
            Verdict::Accepted { lines }
        }
    }

    /// Truncate the first replacement line so the edited line stays within the limit.
    /// Returns the number of characters dropped.
    fn enforce_line_length(&self, change: &mut TextChange, line_length: usize) -> usize {
        let replaced = change.to.column.saturating_sub(change.from.column);
        let remaining = line_length.saturating_sub(replaced);
        let allowed = self.char_limit.saturating_sub(remaining);

        let Some(first) = change.text.first_mut() else {
            return 0;
        };
        let inserted = first.chars().count();
        if inserted <= allowed {
            return 0;
        }

        let cut = first
            .char_indices()
            .nth(allowed)
            .map(|(i, _)| i)
            .unwrap_or(first.len());
        first.truncate(cut);
        tracing::debug!(
            line = change.to.line,
            limit = self.char_limit,
            allowed,
            "truncating input to line length limit"
        );
        inserted - allowed
    }

    /// Move section boundaries right of the edit by the net length change.
    fn adjust_sections(&self, model: &mut RegionModel, change: &TextChange) {
        let Some(sections) = model.sections_on_mut(change.to.line) else {
            return;
        };
        let inserted = change.first_line().chars().count() as isize;
        let replaced = change.to.column.saturating_sub(change.from.column) as isize;
        let delta = inserted - replaced;
        if delta == 0 {
            return;
        }
        for section in sections.iter_mut() {
            section.shift_boundaries(change.to.column, delta);
        }
    }
}

/// Admissibility: the `to` line is editable, or both columns sit strictly inside one of
/// the `to` line's sections.
fn admit(model: &RegionModel, change: &TextChange) -> Option<Admission> {
    let line = change.to.line;
    if model.is_line_editable(line) {
        return Some(Admission::Line);
    }
    let sections = model.sections_on(line)?;
    sections
        .iter()
        .any(|s| s.admits(change.from.column, change.to.column))
        .then_some(Admission::Section)
}

fn reject(change: &TextChange, reason: RejectReason) -> Verdict {
    tracing::debug!(change = %change, %reason, "rejecting edit");
    Verdict::Rejected(reason)
}
