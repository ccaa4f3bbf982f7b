//! Saved level state
//!
//! A snapshot of one editing session, keyed by level number and stored as JSON
//! (`level<N>.lastGoodState.json`) in the state directory.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::region::SectionMap;

/// The persisted record of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedState {
    /// Document text as exported for execution
    pub code: String,
    /// Concatenated contents of every editable line and section
    pub player_code: String,
    /// Editable line indices, ascending
    pub editable_lines: Vec<usize>,
    /// Editable sections by line, each as a `[start, end]` pair
    #[serde(default)]
    pub editable_sections: SectionMap,
}

/// Errors from reading or writing saved state
#[derive(Debug)]
pub enum StoreError {
    /// No state stored for this level
    NotFound { level: u32 },
    /// Reading or writing the file failed
    Io { path: PathBuf, source: std::io::Error },
    /// The file is not a valid saved state
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { level } => write!(f, "no saved state for level {}", level),
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Serialize { path, source } => {
                write!(f, "invalid saved state {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Io { source, .. } => Some(source),
            Self::Serialize { source, .. } => Some(source),
        }
    }
}

/// Directory-backed store of saved states
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under `~/.config/editlock/state`
    pub fn default_location() -> Option<Self> {
        crate::config_paths::state_dir().map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the state for `level`
    pub fn path_for(&self, level: u32) -> PathBuf {
        self.dir.join(format!("level{}.lastGoodState.json", level))
    }

    /// Write `state` for `level`, replacing any earlier one
    pub fn save(&self, level: u32, state: &SavedState) -> Result<PathBuf, StoreError> {
        let path = self.path_for(level);
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let contents =
            serde_json::to_string_pretty(state).map_err(|source| StoreError::Serialize {
                path: path.clone(),
                source,
            })?;
        std::fs::write(&path, contents).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(level, "Saved level state to {}", path.display());
        Ok(path)
    }

    /// Read the state for `level`
    pub fn load(&self, level: u32) -> Result<SavedState, StoreError> {
        let path = self.path_for(level);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound { level })
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&contents).map_err(|source| StoreError::Serialize { path, source })
    }

    /// Delete the state for `level`. Returns whether anything was removed.
    pub fn remove(&self, level: u32) -> Result<bool, StoreError> {
        let path = self.path_for(level);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Section;

    #[test]
    fn test_json_shape() {
        let mut sections = SectionMap::new();
        sections.insert(3, vec![Section::new(4, 5)]);
        let state = SavedState {
            code: "x".to_string(),
            player_code: "5\n".to_string(),
            editable_lines: vec![0, 1],
            editable_sections: sections,
        };

        let json: serde_json::Value = serde_json::to_value(&state).unwrap();
        assert_eq!(json["playerCode"], "5\n");
        assert_eq!(json["editableLines"], serde_json::json!([0, 1]));
        assert_eq!(json["editableSections"]["3"], serde_json::json!([[4, 5]]));
    }

    #[test]
    fn test_path_for_level() {
        let store = StateStore::new("/tmp/states");
        assert_eq!(
            store.path_for(7),
            PathBuf::from("/tmp/states/level7.lastGoodState.json")
        );
    }
}
