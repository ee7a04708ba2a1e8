//! Scraper warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! The parser reports every recovery it performs on malformed markup through
//! here (stray closing tags, skipped attribute garbage, suppressed subtrees).

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already seen (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Whether warnings are printed at all. Recording happens either way.
static ENABLED: AtomicBool = AtomicBool::new(true);

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about recovered input (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Parser", "recovered stray closing tag </span>");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let is_new = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if is_new && ENABLED.load(Ordering::Relaxed) {
        eprintln!("{YELLOW}[Sieve {component}] ⚠ {message}{RESET}");
    }
}

/// Returns true if this exact warning has been recorded since the last clear.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Turn printing of warnings on or off (the CLI's `--quiet`).
pub fn set_warnings_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

/// Clear all recorded warnings (call before loading a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
