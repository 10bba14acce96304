//! Windows console rewrap protection.
//!
//! Windows console handles carry per-process ANSI/VT state that colorized
//! writers re-initialise when they wrap `stdout`/`stderr`. Re-applying that
//! wrapping on every log call nests wrapper state without bound and
//! eventually fails with a recursion-depth error on high-volume runs. The
//! [`RewrapGuard`] breaks the cycle: it counts operations and, once
//! [`REWRAP_LIMIT`] operations have accumulated since the last reset,
//! re-primes the console exactly once instead of letting each write do it.
//!
//! On non-Windows hosts the guard only counts; the console is never touched.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::platform::Os;

/// Operations between corrective wrap-state resets on Windows.
pub const REWRAP_LIMIT: u64 = 200;

/// Console color capability, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// ANSI sequences are emitted; the console accepted VT enablement.
    Ansi,
    /// Plain text only: `NO_COLOR` is set or VT enablement failed.
    Plain,
}

impl ColorMode {
    /// Resolve the color capability of the current console.
    ///
    /// Honors `NO_COLOR` and attempts VT enablement on Windows (a no-op
    /// elsewhere). A console that refuses VT enablement yields `Plain`;
    /// this is never an error.
    #[must_use]
    pub fn detect() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            return Self::Plain;
        }
        if enable_ansi_support::enable_ansi_support().is_ok() {
            Self::Ansi
        } else {
            Self::Plain
        }
    }

    /// Whether ANSI sequences should be emitted.
    #[must_use]
    pub const fn is_ansi(self) -> bool {
        matches!(self, Self::Ansi)
    }
}

/// Counter-gated protection against recursive console re-wrapping.
///
/// Owned by a [`Logger`](super::logger::Logger) and ticked by
/// [`check`](Self::check) once per log call. Counters are `Relaxed`
/// atomics: callers that log from multiple threads get safe counts, but
/// the trigger point may shift by a few operations under contention.
///
/// [`check`](Self::check) never panics and never recurses, for any call
/// volume; the counters grow but allocate nothing.
#[derive(Debug)]
pub struct RewrapGuard {
    os: Os,
    mode: ColorMode,
    operations: AtomicU64,
    since_reset: AtomicU64,
    resets: AtomicU64,
}

impl RewrapGuard {
    /// Create a guard for an explicit platform and color capability.
    ///
    /// Public so that test harnesses can simulate the Windows console
    /// path without running on Windows.
    #[must_use]
    pub const fn new(os: Os, mode: ColorMode) -> Self {
        Self {
            os,
            mode,
            operations: AtomicU64::new(0),
            since_reset: AtomicU64::new(0),
            resets: AtomicU64::new(0),
        }
    }

    /// Create a guard for the detected platform and console.
    #[must_use]
    pub fn for_host() -> Self {
        Self::new(Os::detect(), ColorMode::detect())
    }

    /// Count one logging operation and reset the console wrap state when
    /// [`REWRAP_LIMIT`] operations have accumulated since the last reset.
    ///
    /// On non-Windows hosts this only increments the operation counter.
    /// With [`ColorMode::Plain`] there is no wrapping to guard, so the
    /// reset skips the console call and only rearms the counter.
    pub fn check(&self) {
        self.operations.fetch_add(1, Ordering::Relaxed);
        if !self.os.is_windows() {
            return;
        }
        let since = self.since_reset.fetch_add(1, Ordering::Relaxed) + 1;
        if since < REWRAP_LIMIT {
            return;
        }
        self.since_reset.store(0, Ordering::Relaxed);
        if self.mode.is_ansi() {
            // One fresh enablement replaces the per-write re-initialisation
            // that nests wrapper state. The result is deliberately ignored:
            // a console that stops accepting VT enablement degrades to
            // whatever state it is in, it does not fail the log call.
            let _ = enable_ansi_support::enable_ansi_support();
        }
        self.resets.fetch_add(1, Ordering::Relaxed);
    }

    /// Total operations counted since construction. Monotonically
    /// non-decreasing; never reset.
    #[must_use]
    pub fn operations(&self) -> u64 {
        self.operations.load(Ordering::Relaxed)
    }

    /// Corrective wrap-state resets performed. Stays 0 on non-Windows
    /// hosts for any number of operations.
    #[must_use]
    pub fn resets(&self) -> u64 {
        self.resets.load(Ordering::Relaxed)
    }

    /// The color capability this guard was built with.
    #[must_use]
    pub const fn mode(&self) -> ColorMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_increments_by_exactly_one() {
        let guard = RewrapGuard::new(Os::Other, ColorMode::Plain);
        let before = guard.operations();
        guard.check();
        assert_eq!(guard.operations(), before + 1);
    }

    #[test]
    fn operations_track_call_count() {
        let guard = RewrapGuard::new(Os::Windows, ColorMode::Plain);
        for _ in 0..37 {
            guard.check();
        }
        assert_eq!(guard.operations(), 37);
    }

    #[test]
    fn non_windows_never_resets() {
        let guard = RewrapGuard::new(Os::Other, ColorMode::Ansi);
        for _ in 0..1000 {
            guard.check();
        }
        assert_eq!(guard.resets(), 0);
        assert_eq!(guard.operations(), 1000);
    }

    #[test]
    fn windows_resets_at_limit() {
        let guard = RewrapGuard::new(Os::Windows, ColorMode::Plain);
        for _ in 0..REWRAP_LIMIT - 1 {
            guard.check();
        }
        assert_eq!(guard.resets(), 0, "no reset before the limit");
        guard.check();
        assert_eq!(guard.resets(), 1, "reset exactly at the limit");
    }

    #[test]
    fn windows_rearms_after_reset() {
        let guard = RewrapGuard::new(Os::Windows, ColorMode::Plain);
        for _ in 0..REWRAP_LIMIT * 3 {
            guard.check();
        }
        assert_eq!(guard.resets(), 3);
        assert_eq!(guard.operations(), REWRAP_LIMIT * 3);
    }

    #[test]
    fn plain_mode_tolerates_sustained_load() {
        let guard = RewrapGuard::new(Os::Windows, ColorMode::Plain);
        for _ in 0..250 {
            guard.check();
        }
        assert_eq!(guard.operations(), 250);
        assert_eq!(guard.resets(), 1);
    }

    #[test]
    fn mode_is_preserved() {
        let guard = RewrapGuard::new(Os::Other, ColorMode::Ansi);
        assert_eq!(guard.mode(), ColorMode::Ansi);
        assert!(guard.mode().is_ansi());
        assert!(!ColorMode::Plain.is_ansi());
    }
}
