//! Undo/redo synchronizer.
//!
//! Hosts apply undo and redo directly, without the before-change hook, so the region
//! model is brought back in line after the fact. The same [`reshape`] the gatekeeper uses
//! is replayed; there is no admissibility check and no section-boundary adjustment.

use super::change::TextChange;
use super::model::RegionModel;
use super::shift::{reshape, LineDelta};

/// Replay the line-structure effect of a committed undo/redo change.
///
/// Returns `None` (and leaves the model untouched) for any other origin.
pub fn synchronize(
    model: &mut RegionModel,
    change: &TextChange,
    shift_sections: bool,
) -> Option<LineDelta> {
    if !change.origin.is_history() {
        return None;
    }

    tracing::debug!(
        origin = %change.origin,
        lines = change.text.len(),
        from = change.from.line,
        to = change.to.line,
        "editor input (change)"
    );

    let delta = reshape(model, change, shift_sections);
    tracing::debug!(editable = ?model.editable_lines(), "editable lines after history replay");
    Some(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::change::{Origin, Position};
    use crate::region::gatekeeper::Gatekeeper;
    use crate::region::model::SectionMap;
    use std::collections::BTreeSet;

    fn model(lines: &[usize]) -> RegionModel {
        RegionModel::new(lines.iter().copied().collect(), SectionMap::new(), None)
    }

    #[test]
    fn test_ignores_regular_edits() {
        let mut m = model(&[0]);
        let change = TextChange::insertion(Origin::Paste, Position::new(0, 0), "a\nb");
        assert_eq!(synchronize(&mut m, &change, true), None);
        assert_eq!(m, model(&[0]));
    }

    #[test]
    fn test_undo_of_paste_restores_lines() {
        let gk = Gatekeeper::default();
        let mut m = model(&[0, 1, 6]);

        let mut paste = TextChange::insertion(Origin::Paste, Position::new(1, 2), "x\ny\nz");
        assert!(gk.judge(&mut m, &mut paste, 4).is_accepted());
        assert_eq!(m, model(&[0, 1, 2, 3, 8]));

        // The host's undo removes the pasted lines: 1:2 .. 3:1 collapses back to one line.
        let undo = TextChange::deletion(Origin::Undo, Position::new(1, 2), Position::new(3, 1));
        synchronize(&mut m, &undo, true);
        assert_eq!(m, model(&[0, 1, 6]));

        // Redo re-inserts them.
        let redo = TextChange::insertion(Origin::Redo, Position::new(1, 2), "x\ny\nz");
        synchronize(&mut m, &redo, true);
        assert_eq!(m.editable_lines(), &[0, 1, 2, 3, 8].into_iter().collect::<BTreeSet<_>>());
    }

    #[test]
    fn test_undo_skips_admissibility() {
        // A history replay on a locked line still reshapes; the host already committed it.
        let mut m = model(&[4]);
        let undo = TextChange::insertion(Origin::Undo, Position::new(1, 0), "a\nb");
        assert_eq!(
            synchronize(&mut m, &undo, true),
            Some(LineDelta::Inserted {
                count: 1,
                segment_end: 1
            })
        );
        assert_eq!(m, model(&[2, 5]));
    }
}
