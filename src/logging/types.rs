//! Core logging types: severity levels and the [`Log`] trait.
use std::fmt;

/// Severity of a log message.
///
/// Ordered from least to most severe; `Success` sits between `Info` and
/// `Warning` so that per-URL outcome lines can be filtered with the
/// ordinary level comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Internal detail, suppressed on the console unless verbose.
    Debug,
    /// General progress information.
    Info,
    /// A unit of crawl work completed successfully.
    Success,
    /// A recoverable or noteworthy condition.
    Warning,
    /// A failure that requires attention.
    Error,
}

impl LogLevel {
    /// Uppercase name used by plain file sinks.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    /// ANSI color applied to the tag and icon on capable consoles.
    pub(super) const fn color(self) -> &'static str {
        match self {
            Self::Debug => "\x1b[90m",
            Self::Info => "\x1b[36m",
            Self::Success => "\x1b[32m",
            Self::Warning => "\x1b[33m",
            Self::Error => "\x1b[31m",
        }
    }

    /// Single-character marker shown between the tag and the message.
    pub(super) const fn icon(self) -> &'static str {
        match self {
            Self::Debug => "⋯",
            Self::Info => "ℹ",
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "×",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstraction over logging backends.
///
/// Both [`Logger`](super::logger::Logger) (colorized console output routed
/// through `tracing`) and [`FileLogger`](super::file_logger::FileLogger)
/// (plain append-only file sink) implement this trait, allowing crawl code
/// to log without knowing where the output lands.
pub trait Log: Send + Sync {
    /// Log an internal detail message.
    fn debug(&self, msg: &str, tag: &str);
    /// Log a progress message.
    fn info(&self, msg: &str, tag: &str);
    /// Log a completed unit of work.
    fn success(&self, msg: &str, tag: &str);
    /// Log a recoverable condition.
    fn warning(&self, msg: &str, tag: &str);
    /// Log a failure.
    fn error(&self, msg: &str, tag: &str);
    /// Log the outcome of fetching a single URL with its elapsed time.
    fn url_status(&self, url: &str, ok: bool, elapsed_secs: f64, tag: &str);
    /// Log a failed URL together with the error description.
    fn error_status(&self, url: &str, error: &str, tag: &str);
}
