//! Line-index shifting shared by the gatekeeper and the undo/redo synchronizer.
//!
//! Both call sites go through [`reshape`], so a committed edit and its replay from history
//! always produce the same region delta.

use std::collections::{BTreeMap, BTreeSet};

use super::change::TextChange;
use super::model::{offset, RegionModel};

/// Shift every line index strictly greater than `pivot` by `delta`.
pub fn shift_lines(lines: &BTreeSet<usize>, pivot: usize, delta: isize) -> BTreeSet<usize> {
    lines
        .iter()
        .map(|&line| {
            if line > pivot {
                let shifted = offset(line, delta);
                tracing::trace!(from = line, to = shifted, "shifting editable line");
                shifted
            } else {
                line
            }
        })
        .collect()
}

/// Shift every key strictly greater than `pivot` by `delta`.
pub fn shift_keys<V>(map: BTreeMap<usize, V>, pivot: usize, delta: isize) -> BTreeMap<usize, V> {
    map.into_iter()
        .map(|(line, value)| {
            if line > pivot {
                (offset(line, delta), value)
            } else {
                (line, value)
            }
        })
        .collect()
}

/// How an edit changed the line structure of the region model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDelta {
    /// The edit stayed on one line.
    Unchanged,
    /// `count` lines were removed at the end of the segment ending at `segment_end`.
    Removed { count: usize, segment_end: usize },
    /// `count` lines were appended after `segment_end`.
    Inserted { count: usize, segment_end: usize },
}

/// Re-derive the editable line set (and, when `shift_sections` is set, the section keys)
/// after `change` alters the number of lines.
///
/// Deletions remove lines from the end of the segment holding `change.to.line` and pull
/// later lines up; insertions push later lines down and extend that segment.
pub fn reshape(model: &mut RegionModel, change: &TextChange, shift_sections: bool) -> LineDelta {
    if change.to.line != change.from.line {
        let count = change.removed_line_count();
        let segment_end = model.segment_end(change.to.line);
        let first_removed = (segment_end + 1).saturating_sub(count);
        for line in (first_removed..=segment_end).rev() {
            if model.remove_line(line) {
                tracing::debug!(line, "removing editable line");
            }
        }
        model.shift_lines_after(segment_end, -(count as isize));

        if shift_sections {
            model.drop_sections_in(change.from.line + 1..change.to.line + 1);
            model.shift_sections_after(change.to.line, -(count as isize));
        }

        return LineDelta::Removed { count, segment_end };
    }

    let count = change.added_line_count();
    if count == 0 {
        return LineDelta::Unchanged;
    }

    let segment_end = model.segment_end(change.to.line);
    model.shift_lines_after(segment_end, count as isize);
    if shift_sections {
        model.shift_sections_after(change.to.line, count as isize);
    }
    model.insert_lines(segment_end, count);

    LineDelta::Inserted { count, segment_end }
}
