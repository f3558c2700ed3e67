//! Deduplicated analysis warnings.
//!
//! Email markup is full of malformed colors, unknown units and broken tags.
//! Each distinct problem is reported once through the `log` facade so a
//! batch run over thousands of documents does not drown the operator.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a malformed or unsupported construct (logged once per unique message)
///
/// The `component` becomes the log target, so `RUST_LOG=css=off` silences a
/// single component.
///
/// # Example
/// ```ignore
/// warn_once("css", "unrecognized font-size 'larger', using 16px");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let first_time = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if first_time {
        log::warn!(target: component, "{message}");
    }
}

/// Returns true if this exact warning has already been emitted.
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}
