//! Utility functions for path resolution, ANSI stripping, and formatting.
use std::fs;
use std::path::PathBuf;

/// Strip ANSI escape sequences from a string.
///
/// Handles CSI sequences (terminated by a final byte in `@`..`~`, covering
/// SGR color, cursor movement, and erase) and two-byte escapes, without
/// consuming unrelated text.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'[') {
            chars.next();
            for inner in chars.by_ref() {
                if ('@'..='~').contains(&inner) {
                    break;
                }
            }
        } else {
            chars.next();
        }
    }
    out
}

/// Return the terminal width in columns.
///
/// Queries the attached terminal, then the `COLUMNS` environment variable,
/// falling back to 80 when neither yields a positive value.
pub(super) fn terminal_columns() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        return usize::from(w);
    }
    std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(80)
}

/// Return the `$XDG_CACHE_HOME/crawler-log/` directory, creating it if needed.
pub(super) fn cache_dir() -> Option<PathBuf> {
    let base = std::env::var("XDG_CACHE_HOME").map_or_else(
        |_| {
            std::env::var("HOME")
                .or_else(|_| std::env::var("USERPROFILE"))
                .map_or_else(|_| PathBuf::from("."), PathBuf::from)
                .join(".cache")
        },
        PathBuf::from,
    );
    let dir = base.join("crawler-log");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Return the log file path for `component` under the cache directory.
pub(super) fn log_file_path(component: &str) -> Option<PathBuf> {
    Some(cache_dir()?.join(format!("{component}.log")))
}

/// Format the current UTC time as `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the current UTC time as `HH:MM:SS`.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}

/// Render `tag` as `[TAG]` padded with periods to `width` characters.
///
/// Tags longer than `width` are not truncated.
pub(super) fn pad_tag(tag: &str, width: usize) -> String {
    let mut out = format!("[{tag}]");
    let mut len = out.chars().count();
    while len < width {
        out.push('.');
        len += 1;
    }
    out
}

/// Truncate `s` to at most `max` characters, appending `…` when shortened.
pub(super) fn ellipsize(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Display width for URLs in status lines: bounded by the terminal width
/// minus the fixed status overhead, clamped to 16..=50 characters.
pub(super) fn url_display_width() -> usize {
    terminal_columns().saturating_sub(30).clamp(16, 50)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn strip_ansi_removes_colors() {
        assert_eq!(strip_ansi("\x1b[31m×\x1b[0m failed"), "× failed");
        assert_eq!(strip_ansi("no codes here"), "no codes here");
        assert_eq!(
            strip_ansi("\x1b[36m[FETCH]...\x1b[0m \x1b[32mok\x1b[0m"),
            "[FETCH]... ok"
        );
    }

    #[test]
    fn strip_ansi_handles_csi_sequences() {
        assert_eq!(strip_ansi("\x1b[2;5Htext"), "text");
        assert_eq!(strip_ansi("\x1b[2Jhello"), "hello");
        assert_eq!(strip_ansi("\x1b[Kworld"), "world");
        assert_eq!(strip_ansi("\x1bMtext"), "text");
        assert_eq!(strip_ansi("\x1b7text"), "text");
    }

    #[test]
    fn strip_ansi_empty_string() {
        assert_eq!(strip_ansi(""), "");
    }

    #[test]
    fn terminal_columns_returns_positive() {
        assert!(terminal_columns() > 0);
    }

    #[test]
    fn pad_tag_pads_with_periods() {
        assert_eq!(pad_tag("INIT", 10), "[INIT]....");
        assert_eq!(pad_tag("FETCH", 10), "[FETCH]...");
        assert_eq!(pad_tag("COMPLETE", 10), "[COMPLETE]");
    }

    #[test]
    fn pad_tag_never_truncates() {
        assert_eq!(pad_tag("STRESS_TEST", 10), "[STRESS_TEST]");
    }

    #[test]
    fn ellipsize_short_string_unchanged() {
        assert_eq!(ellipsize("https://a.example", 50), "https://a.example");
    }

    #[test]
    fn ellipsize_truncates_with_marker() {
        let long = "x".repeat(80);
        let out = ellipsize(&long, 50);
        assert_eq!(out.chars().count(), 50);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn url_display_width_is_clamped() {
        let w = url_display_width();
        assert!((16..=50).contains(&w));
    }

    #[test]
    fn format_utc_time_has_correct_format() {
        let s = format_utc_time();
        assert_eq!(s.len(), 8, "HH:MM:SS should be 8 chars");
        assert_eq!(&s[2..3], ":");
        assert_eq!(&s[5..6], ":");
    }

    #[test]
    fn format_utc_datetime_has_correct_format() {
        let s = format_utc_datetime();
        assert_eq!(s.len(), 19, "YYYY-MM-DD HH:MM:SS should be 19 chars");
        assert_eq!(&s[4..5], "-");
        assert_eq!(&s[10..11], " ");
    }
}
