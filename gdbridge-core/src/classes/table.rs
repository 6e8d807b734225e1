/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Per-class method-bind tables.
//!
//! A class's table is loaded lazily, on the first call into any of its methods; within a class,
//! every declared method resolves in that one pass, together with its return-ownership label.
//! An ABI mismatch between bridge and engine build therefore surfaces at first touch of the
//! class, not arbitrarily deep into a session, and panics with the offending
//! `(class, method)` pair.

use std::collections::HashMap;

use crate::builtin::StringName;
use crate::meta::ownership::{register_return_label, OwnershipLabel};
use crate::sys;

/// One entry of a class's method list: name, signature hash, and the return-side ownership
/// label where the API description carries one.
pub(crate) struct MethodInit {
    pub name: &'static str,
    pub hash: i64,
    pub return_label: Option<OwnershipLabel>,
}

impl MethodInit {
    pub const fn new(name: &'static str, hash: i64) -> Self {
        Self {
            name,
            hash,
            return_label: None,
        }
    }

    pub const fn returning(name: &'static str, hash: i64, label: OwnershipLabel) -> Self {
        Self {
            name,
            hash,
            return_label: Some(label),
        }
    }
}

fn method_list(class: &'static str) -> &'static [MethodInit] {
    match class {
        "Object" => super::object::METHODS,
        "RefCounted" => super::ref_counted::METHODS,
        "Node" => super::node::METHODS,
        "Node3D" => super::node3d::METHODS,
        "Resource" => super::resource::METHODS,
        other => panic!("no method table declared for class {other}"),
    }
}

// Bind pointers are stable for the engine session; stored as usize to keep the map Send.
type ClassBinds = HashMap<&'static str, usize>;

static RESOLVED_CLASSES: sys::Global<HashMap<&'static str, ClassBinds>> = sys::Global::default();

/// Bind pointer for `class::method`, loading the class's whole table on first touch.
///
/// # Panics
/// If `method` is not in the class's declared list, or the engine does not know any declared
/// method of the class under its hash.
pub(crate) fn method_bind(
    class: &'static str,
    method: &'static str,
) -> sys::GDExtensionMethodBindPtr {
    let mut classes = RESOLVED_CLASSES.lock();
    let binds = classes.entry(class).or_insert_with(|| load_class(class));

    let bind = binds
        .get(method)
        .unwrap_or_else(|| panic!("method {class}::{method} not in the class method table"));
    *bind as sys::GDExtensionMethodBindPtr
}

fn load_class(class: &'static str) -> ClassBinds {
    let class_sn = StringName::from(class);

    method_list(class)
        .iter()
        .map(|init| {
            if let Some(label) = init.return_label {
                register_return_label(class, init.name, label);
            }

            let method_sn = StringName::from(init.name);
            // SAFETY: resolution query with engine-owned name copies.
            let bind = unsafe {
                sys::interface_fn!(classdb_get_method_bind)(
                    class_sn.string_name_sys_const(),
                    method_sn.string_name_sys_const(),
                    init.hash,
                )
            };

            assert!(
                !bind.is_null(),
                "method bind {}::{} (hash {}) not found in engine",
                class,
                init.name,
                init.hash
            );

            (init.name, bind as usize)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const CLASSES: [&str; 5] = ["Object", "RefCounted", "Node", "Node3D", "Resource"];

    #[test]
    fn every_class_declares_a_method_list() {
        for class in CLASSES {
            let methods = method_list(class);
            assert!(!methods.is_empty(), "{class} has no methods declared");

            let mut names = HashSet::new();
            for init in methods {
                assert!(
                    names.insert(init.name),
                    "{class}::{} declared twice",
                    init.name
                );
            }
        }
    }

    #[test]
    #[should_panic(expected = "no method table declared")]
    fn unknown_class_panics() {
        let _ = method_list("Camera3D");
    }

    #[test]
    fn object_returning_methods_carry_labels() {
        let get_parent = method_list("Node")
            .iter()
            .find(|m| m.name == "get_parent")
            .unwrap();
        assert_eq!(
            get_parent.return_label,
            Some(OwnershipLabel::AssertInstanceId)
        );

        let duplicate = method_list("Resource")
            .iter()
            .find(|m| m.name == "duplicate")
            .unwrap();
        assert_eq!(duplicate.return_label, Some(OwnershipLabel::Transferred));
    }
}
