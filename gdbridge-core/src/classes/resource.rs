/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::builtin::GString;
use crate::classes::table::{self, MethodInit};
use crate::classes::{Object, RefCounted};
use crate::meta::ownership::OwnershipLabel;
use crate::meta::signature::{check_return_ownership, out_class_ptrcall};
use crate::meta::{CallContext, CallFrame};
use crate::obj::{bounds, Gd, Inherits, RawGd};

// Signature-based method hashes from the engine's API description (4.2).
pub(crate) const METHODS: &[MethodInit] = &[
    MethodInit::new("get_path", 201670096),
    MethodInit::returning("duplicate", 482882304, OwnershipLabel::Transferred),
];

engine_class! {
    /// Ref-counted data container that can be saved, loaded and shared between objects.
    Resource,
    base: RefCounted,
    name: "Resource",
    memory: bounds::MemRefCounted,
    dyn_memory: bounds::MemRefCounted,
}

class_deref!(Resource => RefCounted);

// SAFETY: engine hierarchy.
unsafe impl Inherits<RefCounted> for Resource {}
unsafe impl Inherits<Object> for Resource {}

impl Resource {
    /// Filesystem path the resource was loaded from; empty for in-memory resources.
    pub fn get_path(&self) -> GString {
        const CONTEXT: CallContext = CallContext::new("Resource", "get_path");

        let frame = CallFrame::new();
        // SAFETY: frame matches get_path() -> String.
        unsafe {
            out_class_ptrcall(
                table::method_bind("Resource", "get_path"),
                &CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        }
    }

    /// Copies the resource; ownership of the copy transfers to the caller.
    pub fn duplicate(&self, subresources: bool) -> Option<Gd<Resource>> {
        const CONTEXT: CallContext = CallContext::new("Resource", "duplicate");

        let mut frame = CallFrame::new();
        frame.push_value(subresources);

        // SAFETY: frame matches duplicate(bool) -> Resource.
        let mut copy: RawGd<Resource> = unsafe {
            out_class_ptrcall(
                table::method_bind("Resource", "duplicate"),
                &CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        };

        check_return_ownership(&mut copy, &CONTEXT);

        if copy.is_null() {
            None
        } else {
            // Ownership transferred: take over the reference the engine handed out.
            // SAFETY: non-null pointer with one reference owed to us.
            Some(unsafe { Gd::from_obj_sys_weak(copy.obj_sys()) })
        }
    }
}
