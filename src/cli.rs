//! Command-line argument parsing
//!
//! Supports:
//! - Loading an annotated file and showing its editable regions
//! - Exporting in execution, storage or player-contribution form
//! - Replaying a script of edits against a file
//! - Inspecting saved level states

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::tracing::LogOptions;

/// Region-locked editing for annotated source files
#[derive(Parser, Debug)]
#[command(
    name = "editlock",
    version,
    about = "Region-locked editing for annotated source files"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Maximum line length for edits (overrides config)
    #[arg(long, global = true, value_name = "N")]
    pub char_limit: Option<usize>,

    /// Config file to use instead of ~/.config/editlock/config.yaml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for saved level states (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Do not write the rolling log file under ~/.config/editlock/logs
    #[arg(long, global = true)]
    pub no_log_file: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Strip markers and print the clean text with its editable regions
    Load {
        /// Annotated source file
        file: PathBuf,
        /// Print a JSON document instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the document in an export form
    Export {
        /// Annotated source file
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = ExportMode::Execution)]
        mode: ExportMode,
    },
    /// Replay a JSON script of edits against a file
    Replay {
        /// Annotated source file
        file: PathBuf,
        /// JSON array of steps
        script: PathBuf,
        /// Print a JSON document instead of text
        #[arg(long)]
        json: bool,
        /// Save the resulting state for level N
        #[arg(long, value_name = "N")]
        save_level: Option<u32>,
    },
    /// Print the saved state for a level
    State {
        level: u32,
    },
}

/// Export form
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Text with the start-level sentinel re-inserted
    Execution,
    /// Text verbatim
    Storage,
    /// Editable lines and sections only
    Player,
}

impl CliArgs {
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            verbose: self.verbose,
            file: !self.no_log_file,
        }
    }

    /// Config file values with command-line overrides applied
    pub fn resolve_config(&self) -> EditorConfig {
        let mut config = match &self.config {
            Some(path) => EditorConfig::load_from(path),
            None => EditorConfig::load(),
        };
        if let Some(limit) = self.char_limit {
            config.char_limit = limit;
        }
        if let Some(dir) = &self.state_dir {
            config.state_dir = Some(dir.clone());
        }
        config
    }
}
