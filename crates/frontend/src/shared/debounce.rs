use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Runs `callback` only once calls have stopped for `delay_ms`; the last
/// value wins.
pub struct Debounced<T: 'static> {
    timeout: StoredValue<Option<i32>>,
    delay_ms: i32,
    callback: Callback<T>,
}

impl<T: 'static> Clone for Debounced<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Debounced<T> {}

impl<T: 'static> Debounced<T> {
    pub fn new(delay_ms: i32, callback: Callback<T>) -> Self {
        Self {
            timeout: StoredValue::new(None),
            delay_ms,
            callback,
        }
    }

    pub fn run(&self, value: T) {
        let Some(window) = web_sys::window() else {
            self.callback.run(value);
            return;
        };

        // Cancel the pending call, if any
        if let Some(timeout_id) = self.timeout.get_value() {
            window.clear_timeout_with_handle(timeout_id);
        }

        let callback = self.callback;
        let timeout = self.timeout;
        let handler = Closure::once_into_js(move || {
            timeout.set_value(None);
            callback.run(value);
        });

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            handler.unchecked_ref::<js_sys::Function>(),
            self.delay_ms,
        ) {
            Ok(timeout_id) => self.timeout.set_value(Some(timeout_id)),
            Err(e) => log::warn!("setTimeout failed: {:?}", e),
        }
    }
}
