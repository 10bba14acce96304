//! Typed error variants for logging setup and sink operations.
//!
//! Internal modules return [`LogError`] directly; callers at application
//! boundaries convert to `anyhow`-style errors via the standard `?`
//! operator. Missing console color capability is deliberately **not** an
//! error anywhere in this crate: it degrades the logger to plain output.

use thiserror::Error;

/// Errors that arise from logging setup and sink operations.
#[derive(Error, Debug)]
pub enum LogError {
    /// The log sink file could not be created or opened.
    #[error("failed to open log sink {path}: {source}")]
    Io {
        /// Path to the file that could not be opened.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A global tracing subscriber has already been installed.
    #[error("a global logging subscriber is already installed")]
    SubscriberInstalled,
}
