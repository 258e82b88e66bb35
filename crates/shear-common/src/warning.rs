//! Minifier warnings with colored terminal output.
//!
//! Provides deduplication so a document full of the same stray tag does not
//! spam stderr. Used by the scanner, the rewriter, and the collaborator
//! minifiers to report input they tolerated rather than rejected.
//!
//! Warnings never affect output. They are diagnostics only.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about tolerated input (prints once per unique message)
///
/// Returns `true` if this call printed the warning, `false` if an identical
/// warning was already printed.
///
/// # Example
/// ```ignore
/// warn_once("HTML", "unmatched end tag </div> ignored");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[shear {component}] ⚠ {message}").yellow());
    }
    should_print
}

/// Clear all recorded warnings (call before minifying an unrelated document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_warning_prints_once() {
        let message = "duplicate warning 7f3a";
        let first = warn_once("TEST", message);
        let second = warn_once("TEST", message);
        assert!(first);
        assert!(!second);
    }

    #[test]
    fn test_component_is_part_of_key() {
        let message = "component key 91c2";
        assert!(warn_once("A", message));
        assert!(warn_once("B", message));
    }
}
