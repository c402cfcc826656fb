//! Thin wrappers over `window.location` and `window.history`
//!
//! Outside a browser (unit tests) every function degrades to a no-op or an
//! empty value.

use wasm_bindgen::JsValue;
use web_sys::window;

/// Base URL of the backend: the page's host on port 3000
///
/// Empty string if window is not available
pub fn api_base() -> String {
    let Some(w) = window() else {
        return String::new();
    };
    let location = w.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Current `location.search`, including the leading `?` when not empty
pub fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Replaces the current history entry without adding a new one
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

impl BrowserHistory {
    pub fn replace_search(&self, search: &str) {
        // Only update URL if it actually changed
        if current_search() == search {
            return;
        }
        let Some(w) = window() else {
            return;
        };
        let pathname = w.location().pathname().unwrap_or_default();
        let url = format!("{}{}", pathname, search);
        match w.history() {
            Ok(history) => {
                if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
                    log::warn!("Failed to replace URL with '{}': {:?}", url, e);
                }
            }
            Err(e) => log::warn!("History is not available: {:?}", e),
        }
    }
}
