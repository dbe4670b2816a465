//! Logging configuration using the tracing ecosystem.
//!
//! This module configures structured logging with:
//! - File-based output (to avoid TUI corruption)
//! - Daily log rotation
//! - Environment-based log level configuration

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "tagbox=info,warn";

/// Initialize the logging system.
///
/// `log_dir` overrides the default directory. Sets up tracing with:
/// - Daily rotating file appender
/// - Log level configuration via `RUST_LOG` environment variable
/// - Structured output with file/line numbers and thread IDs
///
/// # Log Directory
///
/// Logs are stored in the platform-specific local data directory:
/// - Linux: `~/.local/share/tagbox/logs/`
/// - macOS: `~/Library/Application Support/tagbox/logs/`
///
/// # Log Levels
///
/// Configure via `RUST_LOG` environment variable:
/// - `RUST_LOG=tagbox=debug` - Tag commits and removals
/// - `RUST_LOG=tagbox=trace` - Every key, click and filter pass
///
/// # Errors
///
/// Returns an error if:
/// - The log directory cannot be determined or created
/// - The tracing subscriber cannot be set
///
/// # Example
///
/// ```no_run
/// tagbox::logging::init(None).expect("Failed to initialize logging");
/// ```
pub fn init(log_dir: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let log_dir = match log_dir {
        Some(dir) => dir,
        None => get_log_directory()?,
    };
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "tagbox.log");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "tagbox starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(log_dir)
}

/// Get the log directory path.
///
/// Returns the platform-specific local data directory with `tagbox/logs` appended.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("tagbox").join("logs"))
}

/// Log application shutdown with the final tag count.
pub fn shutdown(tag_count: usize) {
    tracing::info!(tags = tag_count, "tagbox shutting down");
}
