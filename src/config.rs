//! Configuration persistence
//!
//! Stores preferences in `~/.config/editlock/config.yaml`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::region::{Gatekeeper, DEFAULT_CHAR_LIMIT};

/// Statement re-inserted at the start-level-end index when exporting for execution
pub const DEFAULT_SENTINEL: &str = "map._game._endOfStartLevelReached = true;";

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Maximum line length, in characters, for player edits
    #[serde(default = "default_char_limit")]
    pub char_limit: usize,

    /// Sentinel statement for `export_for_execution`
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    /// Move inline-section line keys along with editable lines when line counts change.
    /// `false` keeps sections pinned to their load-time line numbers.
    #[serde(default = "default_shift_sections")]
    pub shift_sections: bool,

    /// Where saved level states are kept (defaults to `~/.config/editlock/state`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

fn default_char_limit() -> usize {
    DEFAULT_CHAR_LIMIT
}

fn default_sentinel() -> String {
    DEFAULT_SENTINEL.to_string()
}

fn default_shift_sections() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            char_limit: default_char_limit(),
            sentinel: default_sentinel(),
            shift_sections: default_shift_sections(),
            state_dir: None,
        }
    }
}

impl EditorConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        match crate::config_paths::config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("No config directory available, using defaults");
                Self::default()
            }
        }
    }

    /// Load config from `path`. Missing or unreadable files give defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::read(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config.validated()
            }
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))
    }

    /// Replace values no session can work with by their defaults
    fn validated(mut self) -> Self {
        if self.char_limit == 0 {
            tracing::warn!("char_limit 0 would lock every line, using {}", DEFAULT_CHAR_LIMIT);
            self.char_limit = DEFAULT_CHAR_LIMIT;
        }
        if self.sentinel.trim().is_empty() || self.sentinel.contains('\n') {
            tracing::warn!("sentinel must be a single non-blank line, using the default");
            self.sentinel = default_sentinel();
        }
        self
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;
        }
        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Gatekeeper limits derived from this config
    pub fn gatekeeper(&self) -> Gatekeeper {
        Gatekeeper::new(self.char_limit, self.shift_sections)
    }

    /// Saved-state directory: the override if set, else the default location
    pub fn resolved_state_dir(&self) -> Option<PathBuf> {
        self.state_dir.clone().or_else(crate::config_paths::state_dir)
    }
}
