//! The region model: which lines and inline ranges a player may edit.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use super::change::Position;
use super::segment::find_segment_end;
use super::shift::{shift_keys, shift_lines};

/// A half-open editable character range `[start, end)` inside an otherwise locked line.
///
/// Serialized as a `[start, end]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Section {
    pub start: usize,
    pub end: usize,
}

impl Section {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Strict interior containment: an edit touching either boundary is outside.
    pub const fn admits(&self, from_column: usize, to_column: usize) -> bool {
        from_column > self.start
            && to_column > self.start
            && from_column < self.end
            && to_column < self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Move every boundary strictly right of `column` by `delta`.
    pub fn shift_boundaries(&mut self, column: usize, delta: isize) {
        if column < self.end {
            self.end = offset(self.end, delta);
        }
        if column < self.start {
            self.start = offset(self.start, delta);
        }
    }
}

impl From<[usize; 2]> for Section {
    fn from([start, end]: [usize; 2]) -> Self {
        Self { start, end }
    }
}

impl From<Section> for [usize; 2] {
    fn from(section: Section) -> Self {
        [section.start, section.end]
    }
}

/// Editable sections keyed by (locked) line index, in ascending `start` order per line.
pub type SectionMap = BTreeMap<usize, Vec<Section>>;

/// Apply a signed delta to an index, flooring at zero.
pub(crate) fn offset(index: usize, delta: isize) -> usize {
    index.checked_add_signed(delta).unwrap_or(0)
}

/// Editable lines, editable sections and the start-level-end insertion index for one
/// editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionModel {
    lines: BTreeSet<usize>,
    sections: SectionMap,
    start_level_end: Option<usize>,
}

impl RegionModel {
    pub fn new(
        lines: BTreeSet<usize>,
        sections: SectionMap,
        start_level_end: Option<usize>,
    ) -> Self {
        Self {
            lines,
            sections,
            start_level_end,
        }
    }

    pub fn editable_lines(&self) -> &BTreeSet<usize> {
        &self.lines
    }

    pub fn sections(&self) -> &SectionMap {
        &self.sections
    }

    pub fn sections_on(&self, line: usize) -> Option<&[Section]> {
        self.sections.get(&line).map(Vec::as_slice)
    }

    pub fn sections_on_mut(&mut self, line: usize) -> Option<&mut Vec<Section>> {
        self.sections.get_mut(&line)
    }

    pub fn start_level_end(&self) -> Option<usize> {
        self.start_level_end
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.sections.is_empty()
    }

    pub fn is_line_editable(&self, line: usize) -> bool {
        self.lines.contains(&line)
    }

    /// Whether a caret at `pos` may edit: the line is editable, or the column lies strictly
    /// inside one of the line's sections.
    pub fn is_editable(&self, pos: Position) -> bool {
        self.is_line_editable(pos.line)
            || self
                .sections_on(pos.line)
                .is_some_and(|sections| sections.iter().any(|s| s.admits(pos.column, pos.column)))
    }

    /// Last line of the editable segment containing `line`.
    pub fn segment_end(&self, line: usize) -> usize {
        find_segment_end(&self.lines, line)
    }

    /// Shift every editable line strictly after `pivot` by `delta`.
    pub fn shift_lines_after(&mut self, pivot: usize, delta: isize) {
        self.lines = shift_lines(&self.lines, pivot, delta);
    }

    /// Shift every section key strictly after `pivot` by `delta`.
    pub fn shift_sections_after(&mut self, pivot: usize, delta: isize) {
        self.sections = shift_keys(std::mem::take(&mut self.sections), pivot, delta);
    }

    /// Drop the sections registered on lines in `lines`.
    pub fn drop_sections_in(&mut self, lines: Range<usize>) {
        self.sections.retain(|line, _| !lines.contains(line));
    }

    pub fn remove_line(&mut self, line: usize) -> bool {
        self.lines.remove(&line)
    }

    /// Mark `count` lines immediately after `after` as editable.
    pub fn insert_lines(&mut self, after: usize, count: usize) {
        self.lines.extend(after + 1..=after + count);
    }
}
