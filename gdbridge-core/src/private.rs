/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Support machinery for FFI callbacks; not part of the public API.

use std::panic::UnwindSafe;

pub use crate::storage::as_storage;

use crate::log;

/// Panic payload from a caught unwind, downcast to something printable.
pub struct PanicPayload {
    message: String,
}

impl PanicPayload {
    pub fn new(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            format!("(panic of type ID {:?})", payload.type_id())
        };

        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Executes `code`. If a panic is thrown, it is caught and an error message is printed to Godot.
///
/// Returns `None` if a panic occurred, and `Some(result)` with the result of `code` otherwise.
///
/// Every `extern "C"` callback the bridge hands to the engine runs its body through this
/// function; unwinding across the C boundary is undefined behavior.
pub fn handle_panic<E, F, R, S>(error_context: E, code: F) -> Option<R>
where
    E: FnOnce() -> S,
    F: FnOnce() -> R + UnwindSafe,
    S: std::fmt::Display,
{
    match std::panic::catch_unwind(code) {
        Ok(result) => Some(result),
        Err(payload) => {
            let payload = PanicPayload::new(payload);
            report_panic(&error_context(), &payload);
            None
        }
    }
}

fn report_panic(context: &dyn std::fmt::Display, payload: &PanicPayload) {
    // If the message contains newlines, print all of the lines after a line break, and indent them.
    let lbegin = "\n  ";
    let indented = payload.message().replace('\n', lbegin);

    if crate::sys::is_initialized() {
        log::godot_error!("Rust function panicked: {context}{lbegin}{indented}");
    } else {
        // Before init or in engine-free tests, the engine print entry points are unavailable.
        eprintln!("Rust function panicked: {context}{lbegin}{indented}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_panic_returns_result() {
        let result = handle_panic(|| "ctx", || 42);
        assert_eq!(result, Some(42));
    }

    #[test]
    fn handle_panic_catches_unwind() {
        let result: Option<i32> = handle_panic(|| "ctx", || panic!("boom"));
        assert_eq!(result, None);
    }

    #[test]
    fn panic_payload_extracts_string() {
        let payload = PanicPayload::new(Box::new("static message"));
        assert_eq!(payload.message(), "static message");

        let payload = PanicPayload::new(Box::new(String::from("owned message")));
        assert_eq!(payload.message(), "owned message");
    }
}
