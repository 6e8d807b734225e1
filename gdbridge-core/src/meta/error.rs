/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Error types surfaced at bridge call sites.
//!
//! ABI mismatches (a method bind that cannot be resolved) are not represented here; they are
//! fatal and panic at resolution time with the offending `(class, method)` pair.

use std::error::Error;
use std::fmt;

use crate::sys;

/// Call-site context, carried in errors and diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CallContext {
    pub class_name: &'static str,
    pub function_name: &'static str,
}

impl CallContext {
    pub const fn new(class_name: &'static str, function_name: &'static str) -> Self {
        Self {
            class_name,
            function_name,
        }
    }
}

impl fmt::Display for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.class_name, self.function_name)
    }
}

// ----------------------------------------------------------------------------------------------------------------------------------------------

/// Why a bridged call did not complete.
#[derive(Clone, PartialEq, Debug)]
pub enum CallFailure {
    /// A value container was used after its generation was ended.
    OwnershipViolation,
    /// The call was issued on the null wrapper.
    NullReceiver,
    /// The receiver's engine instance has been destroyed; the call was not issued.
    StaleInstanceId,
    /// The engine reported a non-success status after a variant call.
    Engine { code: u32, message: String },
    /// A value could not be converted at the boundary.
    Convert(ConvertError),
}

/// Error from a bridged engine call.
#[derive(Clone, PartialEq, Debug)]
pub struct CallError {
    context: CallContext,
    failure: CallFailure,
}

impl CallError {
    pub fn new(context: CallContext, failure: CallFailure) -> Self {
        Self { context, failure }
    }

    pub fn failure(&self) -> &CallFailure {
        &self.failure
    }

    pub fn context(&self) -> CallContext {
        self.context
    }

    /// Translates the engine's call-error record, valid only for non-success codes.
    pub(crate) fn from_engine(
        context: CallContext,
        err: &sys::GDExtensionCallError,
        arg_count: usize,
    ) -> Self {
        debug_assert_ne!(err.error, sys::GDEXTENSION_CALL_OK);

        let message = match err.error {
            sys::GDEXTENSION_CALL_ERROR_INVALID_METHOD => "method not found".to_string(),
            sys::GDEXTENSION_CALL_ERROR_INVALID_ARGUMENT => {
                format!(
                    "cannot convert argument #{} to {:?}",
                    err.argument + 1,
                    sys::VariantType::from_sys(err.expected as sys::GDExtensionVariantType)
                )
            }
            sys::GDEXTENSION_CALL_ERROR_TOO_MANY_ARGUMENTS => {
                format!(
                    "too many arguments; expected {}, but called with {arg_count}",
                    err.argument
                )
            }
            sys::GDEXTENSION_CALL_ERROR_TOO_FEW_ARGUMENTS => {
                format!(
                    "too few arguments; expected {}, but called with {arg_count}",
                    err.argument
                )
            }
            sys::GDEXTENSION_CALL_ERROR_INSTANCE_IS_NULL => "instance is null".to_string(),
            sys::GDEXTENSION_CALL_ERROR_METHOD_NOT_CONST => "method is not const".to_string(),
            other => format!("unknown reason (error code {other})"),
        };

        Self::new(
            context,
            CallFailure::Engine {
                code: err.error,
                message,
            },
        )
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "call failed: {} -- ", self.context)?;

        match &self.failure {
            CallFailure::OwnershipViolation => write!(f, "value used after end of its lifetime"),
            CallFailure::NullReceiver => write!(f, "receiver is the null wrapper"),
            CallFailure::StaleInstanceId => write!(f, "instance has been destroyed"),
            CallFailure::Engine { message, .. } => write!(f, "{message}"),
            CallFailure::Convert(c) => write!(f, "{c}"),
        }
    }
}

impl Error for CallError {}

// ----------------------------------------------------------------------------------------------------------------------------------------------

/// Error while converting a value between a variant and a concrete type.
#[derive(Clone, PartialEq, Debug)]
pub struct ConvertError {
    from: sys::VariantType,
    to: sys::VariantType,
}

impl ConvertError {
    pub fn new(from: sys::VariantType, to: sys::VariantType) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot convert {:?} to {:?}", self.from, self.to)
    }
}

impl Error for ConvertError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_translation() {
        let context = CallContext::new("Node", "add_child");
        let err = sys::GDExtensionCallError {
            error: sys::GDEXTENSION_CALL_ERROR_TOO_FEW_ARGUMENTS,
            argument: 2,
            expected: -1,
        };

        let call_error = CallError::from_engine(context, &err, 1);
        let text = call_error.to_string();

        assert!(text.contains("Node::add_child"));
        assert!(text.contains("too few arguments"));
        assert!(text.contains("expected 2"));
    }

    #[test]
    fn convert_error_display() {
        let err = ConvertError::new(sys::VariantType::String, sys::VariantType::Int);
        assert_eq!(err.to_string(), "cannot convert String to Int");
    }
}
