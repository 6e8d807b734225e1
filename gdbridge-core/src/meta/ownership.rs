/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Per-method ownership labels for object values crossing the call boundary.
//!
//! The engine's API description annotates methods with transfer semantics; class bindings
//! register the relevant ones here when their method table is loaded. The method bridge and the
//! virtual trampolines consult the table when wrapping returned or incoming handles.

use std::collections::HashMap;

use crate::sys::Global;

/// Transfer discipline of one object-typed return or parameter.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum OwnershipLabel {
    /// At call exit, the receiving side owns one reference.
    Transferred,
    /// The value lives as long as a named parent object; the receiver must not outlive it.
    BoundToParent,
    /// Borrowed for the duration of one call.
    TemporaryReference,
    /// The handle must be liveness-checked through the instance-ID registry before every use.
    AssertInstanceId,
}

impl OwnershipLabel {
    /// Parses an annotation string from the engine's API description.
    ///
    /// # Panics
    /// On an unrecognized label. The annotation set is part of the ABI contract; guessing a
    /// discipline risks leaks or double frees, so registration fails loudly instead.
    pub fn parse(label: &str, class: &str, method: &str) -> Self {
        match label {
            "ownership_transferred" => Self::Transferred,
            "lifetime_bound_to_class" => Self::BoundToParent,
            "is_temporary_reference" => Self::TemporaryReference,
            "must_assert_instance_id" => Self::AssertInstanceId,
            other => panic!("unknown ownership label `{other}` on {class}::{method}"),
        }
    }
}

type MethodKey = (&'static str, &'static str);

static RETURN_LABELS: Global<HashMap<MethodKey, OwnershipLabel>> = Global::default();

/// Registers the return-side label of `class::method`. Idempotent for identical labels.
///
/// # Panics
/// If the method was registered before with a different label.
pub fn register_return_label(class: &'static str, method: &'static str, label: OwnershipLabel) {
    let mut table = RETURN_LABELS.lock();

    if let Some(existing) = table.insert((class, method), label) {
        assert_eq!(
            existing, label,
            "conflicting ownership labels for {class}::{method}"
        );
    }
}

/// Return-side label of `class::method`, if the binding registered one.
///
/// Methods without an entry fall back to the discipline implied by the return type's memory
/// kind: ref-counted classes transfer one reference, manually managed classes are borrowed.
pub fn return_label(class: &str, method: &str) -> Option<OwnershipLabel> {
    RETURN_LABELS.lock().get(&(class, method)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_labels() {
        assert_eq!(
            OwnershipLabel::parse("ownership_transferred", "Node", "duplicate"),
            OwnershipLabel::Transferred
        );
        assert_eq!(
            OwnershipLabel::parse("must_assert_instance_id", "Node", "get_parent"),
            OwnershipLabel::AssertInstanceId
        );
    }

    #[test]
    #[should_panic(expected = "unknown ownership label")]
    fn parse_unknown_label_panics() {
        let _ = OwnershipLabel::parse("takes_ownership_sometimes", "Node", "get_child");
    }

    #[test]
    fn register_and_lookup() {
        register_return_label("TestClassA", "get_thing", OwnershipLabel::AssertInstanceId);

        assert_eq!(
            return_label("TestClassA", "get_thing"),
            Some(OwnershipLabel::AssertInstanceId)
        );
        assert_eq!(return_label("TestClassA", "other_method"), None);

        // Re-registration with the same label is fine.
        register_return_label("TestClassA", "get_thing", OwnershipLabel::AssertInstanceId);
    }
}
