//! Structured logging for the handle binaries.
//!
//! JSON lines go to a daily-rotated file; a human-readable stderr layer is
//! available for commands that do not take over the terminal.

pub mod logger;

pub use logger::{LOG_FILE_NAME, LogTarget, init_logger};
