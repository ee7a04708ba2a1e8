//! Tests for the shared warning registry and URL classification.

use sieve_common::net::is_remote;
use sieve_common::warning::{clear_warnings, has_warned, set_warnings_enabled, warn_once};

#[test]
fn test_warning_is_recorded_once_and_cleared() {
    set_warnings_enabled(false);
    warn_once("Test", "recorded warning");
    warn_once("Test", "recorded warning");
    assert!(has_warned("Test", "recorded warning"));
    assert!(!has_warned("Other", "recorded warning"));

    clear_warnings();
    assert!(!has_warned("Test", "recorded warning"));
}

#[test]
fn test_is_remote() {
    assert!(is_remote("https://example.com/"));
    assert!(is_remote("http://example.com/index.html"));
    assert!(!is_remote("./page.html"));
    assert!(!is_remote("/tmp/http.html"));
}
