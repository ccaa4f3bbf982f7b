//! Logging setup for the editlock binary
//!
//! The library only emits events; this module installs the subscriber.
//!
//! - `RUST_LOG=debug` shows every proposed edit, rejection and removed line
//! - `RUST_LOG=editlock::region=trace` adds each shifted line index
//!
//! Besides the console, a debug-level log rolls daily in the config directory's `logs/`
//! folder unless file logging is turned off.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "editlock.log";

/// What to log and where
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOptions {
    /// Show debug events on stderr when RUST_LOG is unset
    pub verbose: bool,
    /// Also write a debug log under `logs/`
    pub file: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            file: true,
        }
    }
}

/// RUST_LOG if set, else `debug` or `warn` by verbosity
fn console_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }))
}

/// Install the global subscriber. Stdout stays free for command output.
pub fn init(options: LogOptions) {
    let console = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter(options.verbose));

    let file = if options.file {
        match crate::config_paths::ensure_logs_dir() {
            Ok(dir) => Some(
                fmt::layer()
                    .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
                    .with_ansi(false)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            ),
            Err(e) => {
                eprintln!("Warning: file logging disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry().with(console).with(file).init();
}
