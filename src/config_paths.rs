//! Where editlock keeps its files
//!
//! Everything lives under one directory:
//! - `$EDITLOCK_CONFIG_DIR` if set
//! - Unix/macOS: `$XDG_CONFIG_HOME/editlock`, else `~/.config/editlock`
//! - Windows: `%APPDATA%\editlock`
//!
//! ```text
//! editlock/
//! ├── config.yaml
//! ├── state/level<N>.lastGoodState.json
//! └── logs/editlock.log.<date>
//! ```

use std::{env, fs, path::PathBuf};

const APP_DIR: &str = "editlock";

/// Overrides the whole directory (tests, CI, portable installs)
pub const CONFIG_DIR_ENV: &str = "EDITLOCK_CONFIG_DIR";

/// Base directory for config, saved states and logs
pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    platform_config_home().map(|home| home.join(APP_DIR))
}

#[cfg(target_os = "windows")]
fn platform_config_home() -> Option<PathBuf> {
    env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(not(target_os = "windows"))]
fn platform_config_home() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

fn within(name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(name))
}

/// `config.yaml`
pub fn config_file() -> Option<PathBuf> {
    within("config.yaml")
}

/// `state/`, one JSON file per level
pub fn state_dir() -> Option<PathBuf> {
    within("state")
}

/// `logs/`
pub fn logs_dir() -> Option<PathBuf> {
    within("logs")
}

/// Create `dir` (and parents) if missing, returning it
fn ensure(dir: Option<PathBuf>) -> Result<PathBuf, String> {
    let dir = dir.ok_or_else(|| "No config directory available".to_string())?;
    fs::create_dir_all(&dir)
        .map_err(|e| format!("Failed to create directory {}: {}", dir.display(), e))?;
    Ok(dir)
}

pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    ensure(logs_dir())
}
