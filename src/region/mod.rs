//! Editable region model and the edit-time rules that maintain it.
//!
//! # Architecture
//!
//! - [`RegionModel`]: editable line set, editable section map, start-level-end index
//! - [`find_segment_end`]: extent of a run of contiguous editable lines
//! - [`reshape`]: the single line-shift routine used on every line-count change
//! - [`Gatekeeper`]: admits, truncates or rejects proposed edits (before commit)
//! - [`synchronize`]: replays [`reshape`] for undo/redo (after commit)
//!
//! # Example
//!
//! ```
//! use editlock::region::{Gatekeeper, Origin, Position, RegionModel, TextChange};
//!
//! let mut model = RegionModel::new([0, 1].into_iter().collect(), Default::default(), None);
//! let mut paste = TextChange::insertion(Origin::Paste, Position::new(1, 0), "a\nb\nc");
//!
//! let verdict = Gatekeeper::default().judge(&mut model, &mut paste, 0);
//! assert!(verdict.is_accepted());
//! assert_eq!(model.editable_lines().len(), 4);
//! ```

mod change;
mod gatekeeper;
mod model;
mod segment;
mod shift;
mod sync;

pub use change::{split_lines, Origin, Position, TextChange};
pub use gatekeeper::{Gatekeeper, RejectReason, Verdict, DEFAULT_CHAR_LIMIT};
pub use model::{RegionModel, Section, SectionMap};
pub use segment::find_segment_end;
pub use shift::{reshape, shift_keys, shift_lines, LineDelta};
pub use sync::synchronize;
