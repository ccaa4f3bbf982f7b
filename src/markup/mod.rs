//! Marker parser for annotated source.
//!
//! Five marker forms are recognised:
//!
//! - `#BEGIN_EDITABLE#` / `#END_EDITABLE#` (line start): a block of fully editable lines
//! - `#{#` / `#}#` (anywhere in a locked line): an inline editable section
//! - `#BEGIN_PROPERTIES#` / `#END_PROPERTIES#` (line start): a JSON properties block
//! - `#END_OF_START_LEVEL#` (line start): where the start-level-end sentinel goes on export
//!
//! ```
//! let pre = editlock::markup::preprocess("x = #{#5#}#;").unwrap();
//! assert_eq!(pre.text, "x = 5;");
//! ```

mod error;
mod parser;
pub mod symbols;

pub use error::{MarkupError, MarkupIssue};
pub use parser::{preprocess, Preprocessed};
