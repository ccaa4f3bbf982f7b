//! Segment resolution: the extent of a run of contiguous editable lines.

use std::collections::BTreeSet;

/// Last line of the contiguous editable run that starts at `line` and extends downward.
///
/// Returns `line` itself when `line + 1` is not editable. `line` does not have to be
/// editable.
pub fn find_segment_end(lines: &BTreeSet<usize>, line: usize) -> usize {
    let mut end = line;
    while lines.contains(&(end + 1)) {
        end += 1;
    }
    end
}
