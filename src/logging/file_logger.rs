//! Plain append-only file backend.
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::LogError;

use super::types::{Log, LogLevel};
use super::utils::{ellipsize, format_utc_datetime, url_display_width};

/// Implement the level methods of [`Log`] by writing each message to the
/// sink at the corresponding [`LogLevel`].
macro_rules! sink_log_methods {
    ($($method:ident => $level:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str, tag: &str) {
                self.write(LogLevel::$level, msg, tag);
            }
        )+
    };
}

/// Plain file-only logging backend.
///
/// Appends `[timestamp] [LEVEL] [TAG] message` lines to a caller-chosen
/// file. Emits no color and never touches the console, so it carries no
/// rewrap guard. Useful for crawl workers whose console output is owned
/// by a supervisor process.
#[derive(Debug)]
pub struct FileLogger {
    file: Mutex<fs::File>,
    path: PathBuf,
}

impl FileLogger {
    /// Open `path` for appending, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Io`] when the file cannot be created or opened.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, LogError> {
        let path = path.into();
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LogError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self {
            file: Mutex::new(file),
            path,
        })
    }

    /// Path of the sink file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line to the sink. Write failures are dropped: a full
    /// disk must not abort the crawl.
    fn write(&self, level: LogLevel, msg: &str, tag: &str) {
        let ts = format_utc_datetime();
        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "[{ts}] [{level}] [{tag}] {msg}").ok();
        }
    }
}

impl Log for FileLogger {
    sink_log_methods! {
        debug   => Debug,
        info    => Info,
        success => Success,
        warning => Warning,
        error   => Error,
    }

    fn url_status(&self, url: &str, ok: bool, elapsed_secs: f64, tag: &str) {
        let level = if ok { LogLevel::Success } else { LogLevel::Error };
        let status = if ok { "OK" } else { "FAILED" };
        let url = ellipsize(url, url_display_width());
        self.write(
            level,
            &format!("{url} | {status} | {elapsed_secs:.2}s"),
            tag,
        );
    }

    fn error_status(&self, url: &str, error: &str, tag: &str) {
        let url = ellipsize(url, url_display_width());
        self.write(LogLevel::Error, &format!("{url} | {error}"), tag);
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    fn sink() -> (FileLogger, tempfile::TempDir) {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let log = FileLogger::create(tmp.path().join("crawl.log")).expect("create sink");
        (log, tmp)
    }

    #[test]
    fn create_makes_the_file() {
        let (log, _tmp) = sink();
        assert!(log.path().exists());
    }

    #[test]
    fn create_fails_for_missing_directory() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let result = FileLogger::create(tmp.path().join("no-such-dir").join("crawl.log"));
        assert!(matches!(result, Err(LogError::Io { .. })));
    }

    #[test]
    fn lines_carry_level_and_tag() {
        let (log, _tmp) = sink();
        log.info("fetching seed list", "INIT");
        log.error("fetch failed", "FETCH");
        let contents = fs::read_to_string(log.path()).unwrap();
        assert!(contents.contains("[INFO] [INIT] fetching seed list"));
        assert!(contents.contains("[ERROR] [FETCH] fetch failed"));
    }

    #[test]
    fn lines_are_appended_in_order() {
        let (log, _tmp) = sink();
        log.info("first", "T");
        log.warning("second", "T");
        log.success("third", "T");
        let contents = fs::read_to_string(log.path()).unwrap();
        let first = contents.find("first").expect("first in log");
        let second = contents.find("second").expect("second in log");
        let third = contents.find("third").expect("third in log");
        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn url_status_uses_words_not_icons() {
        let (log, _tmp) = sink();
        log.url_status("https://example.com", true, 2.0, "FETCH");
        log.url_status("https://example.com/missing", false, 0.4, "FETCH");
        let contents = fs::read_to_string(log.path()).unwrap();
        assert!(contents.contains("| OK |"));
        assert!(contents.contains("| FAILED |"));
        assert!(!contents.contains('✓'), "plain sink should not use icons");
    }

    #[test]
    fn error_status_includes_description() {
        let (log, _tmp) = sink();
        log.error_status("https://example.com", "dns lookup failed", "ERROR");
        let contents = fs::read_to_string(log.path()).unwrap();
        assert!(contents.contains("dns lookup failed"));
    }

    #[test]
    fn dispatches_through_log_trait() {
        let (log, _tmp) = sink();
        let log_ref: &dyn Log = &log;
        log_ref.debug("trait dispatch", "TEST");
        let contents = fs::read_to_string(log.path()).unwrap();
        assert!(contents.contains("[DEBUG] [TEST] trait dispatch"));
    }
}
