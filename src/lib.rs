//! Console logging engine for crawler runtimes.
//!
//! Structured, colorized console output for high-volume crawl pipelines:
//! tagged level methods (`debug` through `error`), per-URL status lines,
//! and a persistent plain-text log file. Includes protection against the
//! Windows console's tendency to degrade when ANSI stream wrapping is
//! re-initialised on every write.
//!
//! The public API is organised into three layers:
//!
//! - **[`platform`]** — host operating system detection
//! - **[`logging`]** — the [`Log`] backends ([`Logger`], [`FileLogger`]),
//!   the [`RewrapGuard`] console protection primitive, and the tracing
//!   subscriber setup
//! - **[`error`]** — typed failures for sink and subscriber setup
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod error;
pub mod logging;
pub mod platform;

pub use error::LogError;
pub use logging::{
    ColorMode, FileLogger, Log, LogLevel, Logger, REWRAP_LIMIT, RewrapGuard, init_subscriber,
};
pub use platform::Os;
