//! Structured Logger
//!
//! Wraps `tracing` to provide JSON-formatted file output with daily rotation
//! and environment-based level control.

use std::path::Path;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix of the rolling log.
pub const LOG_FILE_NAME: &str = "handle.log";

/// Where log lines may go besides the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// File only. Used while the interactive screen owns the terminal.
    FileOnly,
    /// File plus human-readable stderr.
    FileAndConsole,
}

/// Build the level filter, letting `RUST_LOG` win over the configured level.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize the global structured logger.
///
/// Calling it twice is harmless; the second call leaves the first subscriber
/// in place. Fails only if the log directory cannot be created.
pub fn init_logger<P: AsRef<Path>>(
    log_dir: P,
    level: &str,
    target: LogTarget,
) -> Result<(), InitError> {
    // Rolling file appender: writes NDJSON to `handle.log.YYYY-MM-DD`
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)?;

    let file_layer = fmt::layer()
        .json()
        .with_writer(file_appender)
        .with_ansi(false);

    let console_layer = (target == LogTarget::FileAndConsole).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(file_layer)
        .with(console_layer)
        .try_init();
    Ok(())
}
