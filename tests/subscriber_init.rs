//! Global subscriber initialisation semantics.
//!
//! Kept to a single test: `init_subscriber` installs process-global state,
//! so repeated installs can only be observed from one place.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use crawler_log::{LogError, init_subscriber};

#[test]
fn second_init_reports_installed_subscriber() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    // SAFETY: This is the only test in this binary; nothing else reads the
    // environment concurrently.
    #[allow(unsafe_code)]
    unsafe {
        std::env::set_var("XDG_CACHE_HOME", tmp.path());
    }

    init_subscriber(true, "init-test").expect("first init should succeed");
    let second = init_subscriber(true, "init-test");
    assert!(matches!(second, Err(LogError::SubscriberInstalled)));

    // The file layer should have written its run header.
    let path = tmp.path().join("crawler-log").join("init-test.log");
    let contents = std::fs::read_to_string(path).expect("log file should exist");
    assert!(contents.contains("crawler-log"));
}
