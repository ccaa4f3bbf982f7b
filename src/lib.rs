//! editlock - region-locked editing for annotated source files
//!
//! Source text carries markers that declare which lines and inline character ranges a
//! player may edit. This crate strips the markers into a region model, judges every
//! proposed edit against it, keeps it consistent as lines are inserted and removed (undo
//! and redo included), and exports the result.
//!
//! ```
//! use editlock::region::Position;
//! use editlock::GuardedEditor;
//!
//! let mut editor = GuardedEditor::default();
//! editor
//!     .load("locked();\n#BEGIN_EDITABLE#\n\n#END_EDITABLE#\nalsoLocked();")
//!     .unwrap();
//!
//! assert!(editor.insert(Position::new(1, 0), "move();").is_accepted());
//! assert!(editor.insert(Position::new(0, 0), "x").is_rejected());
//! assert_eq!(editor.export_player_contributions(), "move();\n");
//! ```

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editor;
pub mod host;
pub mod markup;
pub mod persistence;
pub mod region;
pub mod script;
pub mod session;
pub mod tracing;

// Re-export commonly used types
pub use config::EditorConfig;
pub use editor::GuardedEditor;
pub use host::{HostEditor, RopeHost};
pub use markup::{preprocess, MarkupError};
pub use persistence::{SavedState, StateStore, StoreError};
pub use region::{Gatekeeper, Position, RegionModel, TextChange, Verdict};
pub use session::EditSession;
