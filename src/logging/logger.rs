//! Colorized console logger for crawl pipelines.
use std::path::PathBuf;

use crate::platform::Os;

use super::rewrap::{ColorMode, RewrapGuard};
use super::types::{Log, LogLevel};
use super::utils::{ellipsize, log_file_path, pad_tag, url_display_width};

/// Characters reserved for the `[TAG]...` column.
const DEFAULT_TAG_WIDTH: usize = 10;

/// Implement the level methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
///
/// `url_status` and `error_status` are **not** included because their
/// signatures differ from the `fn(&self, &str, &str)` pattern shared by the
/// level methods.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str, tag: &str) {
                self.$method(msg, tag);
            }
        )+
    };
}

/// Colorized console logger for crawl pipelines.
///
/// Every log call first ticks the [`RewrapGuard`], then formats the line as
/// `[TAG]...... <icon> <message>` and emits it as a `tracing` event. The
/// console and file rendering of those events is set up by
/// [`init_subscriber`](super::subscriber::init_subscriber); constructing a
/// `Logger` alone produces no output.
#[derive(Debug)]
pub struct Logger {
    tag_width: usize,
    mode: ColorMode,
    guard: RewrapGuard,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for the detected platform and console capability.
    ///
    /// `component` names the log file under the cache directory (see
    /// [`init_subscriber`](super::subscriber::init_subscriber)).
    #[must_use]
    pub fn new(component: &str) -> Self {
        Self::for_platform(component, Os::detect(), ColorMode::detect())
    }

    /// Create a logger with an explicit platform and color capability.
    ///
    /// Lets test harnesses exercise the Windows console path, or pin plain
    /// output, without environment patching.
    #[must_use]
    pub fn for_platform(component: &str, os: Os, mode: ColorMode) -> Self {
        Self {
            tag_width: DEFAULT_TAG_WIDTH,
            mode,
            guard: RewrapGuard::new(os, mode),
            log_file: log_file_path(component),
        }
    }

    /// Set the width of the `[TAG]...` column.
    #[must_use]
    pub const fn with_tag_width(mut self, width: usize) -> Self {
        self.tag_width = width;
        self
    }

    /// The console rewrap guard ticked by every log call.
    ///
    /// Exposed so callers can observe the operation count.
    #[must_use]
    pub const fn guard(&self) -> &RewrapGuard {
        &self.guard
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub(crate) const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Format a full console line for `level`, `msg`, and `tag`.
    fn format_line(&self, level: LogLevel, msg: &str, tag: &str) -> String {
        let padded = pad_tag(tag, self.tag_width);
        if self.mode.is_ansi() {
            format!(
                "{color}{padded} {icon}\x1b[0m {msg}",
                color = level.color(),
                icon = level.icon(),
            )
        } else {
            format!("{padded} {icon} {msg}", icon = level.icon())
        }
    }

    /// Tick the guard and emit one formatted line as a `tracing` event.
    ///
    /// The guard runs before emission so that the operation count covers
    /// every log call, including those the console filter later drops.
    fn emit(&self, level: LogLevel, msg: &str, tag: &str) {
        self.guard.check();
        let line = self.format_line(level, msg, tag);
        match level {
            LogLevel::Error => tracing::error!("{line}"),
            LogLevel::Warning => tracing::warn!("{line}"),
            LogLevel::Success => tracing::info!(target: "crawler_log::success", "{line}"),
            LogLevel::Info => tracing::info!("{line}"),
            LogLevel::Debug => tracing::debug!("{line}"),
        }
    }

    /// Log an internal detail message (suppressed on the console unless
    /// verbose; always written to the log file).
    pub fn debug(&self, msg: &str, tag: &str) {
        self.emit(LogLevel::Debug, msg, tag);
    }

    /// Log a progress message.
    pub fn info(&self, msg: &str, tag: &str) {
        self.emit(LogLevel::Info, msg, tag);
    }

    /// Log a completed unit of work.
    pub fn success(&self, msg: &str, tag: &str) {
        self.emit(LogLevel::Success, msg, tag);
    }

    /// Log a recoverable condition.
    pub fn warning(&self, msg: &str, tag: &str) {
        self.emit(LogLevel::Warning, msg, tag);
    }

    /// Log a failure.
    pub fn error(&self, msg: &str, tag: &str) {
        self.emit(LogLevel::Error, msg, tag);
    }

    /// Log the outcome of fetching a single URL.
    ///
    /// The URL is truncated to the terminal width; `ok` selects the
    /// `Success` or `Error` level and the ✓/✗ marker.
    pub fn url_status(&self, url: &str, ok: bool, elapsed_secs: f64, tag: &str) {
        let level = if ok { LogLevel::Success } else { LogLevel::Error };
        let status = if ok { "✓" } else { "✗" };
        let url = ellipsize(url, url_display_width());
        self.emit(
            level,
            &format!("{url} | {status} | ⏱ {elapsed_secs:.2}s"),
            tag,
        );
    }

    /// Log a failed URL together with the error description.
    pub fn error_status(&self, url: &str, error: &str, tag: &str) {
        let url = ellipsize(url, url_display_width());
        self.emit(LogLevel::Error, &format!("{url} | {error}"), tag);
    }
}

impl Log for Logger {
    forward_log_methods!(debug, info, success, warning, error);

    fn url_status(&self, url: &str, ok: bool, elapsed_secs: f64, tag: &str) {
        self.url_status(url, ok, elapsed_secs, tag);
    }

    fn error_status(&self, url: &str, error: &str, tag: &str) {
        self.error_status(url, error, tag);
    }
}
