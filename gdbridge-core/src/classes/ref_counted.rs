/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::classes::table::{self, MethodInit};
use crate::classes::Object;
use crate::meta::signature::out_class_ptrcall;
use crate::meta::{CallContext, CallFrame};
use crate::obj::{bounds, Inherits};

// Signature-based method hashes from the engine's API description (4.2). The three refcount
// operations share a signature and therefore a hash.
pub(crate) const METHODS: &[MethodInit] = &[
    MethodInit::new("init_ref", 2240911060),
    MethodInit::new("reference", 2240911060),
    MethodInit::new("unreference", 2240911060),
    MethodInit::new("get_reference_count", 3905245786),
];

engine_class! {
    /// Base of all reference-counted classes; instances free themselves when the last reference
    /// drops.
    RefCounted,
    base: Object,
    name: "RefCounted",
    memory: bounds::MemRefCounted,
    dyn_memory: bounds::MemRefCounted,
}

class_deref!(RefCounted => Object);

// SAFETY: engine hierarchy.
unsafe impl Inherits<Object> for RefCounted {}

impl RefCounted {
    /// Initializes the reference count of a freshly constructed instance. Returns `false` if it
    /// was already initialized.
    pub fn init_ref(&mut self) -> bool {
        self.ref_op("init_ref")
    }

    /// Increments the reference count. Returns `false` on failure.
    pub fn reference(&mut self) -> bool {
        self.ref_op("reference")
    }

    /// Decrements the reference count. Returns `true` if this was the last reference and the
    /// caller must destroy the object.
    pub fn unreference(&mut self) -> bool {
        self.ref_op("unreference")
    }

    /// Current number of references.
    pub fn get_reference_count(&self) -> i64 {
        const CONTEXT: CallContext = CallContext::new("RefCounted", "get_reference_count");

        let frame = CallFrame::new();
        // SAFETY: frame matches get_reference_count() -> int.
        unsafe {
            out_class_ptrcall(
                table::method_bind("RefCounted", "get_reference_count"),
                &CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        }
    }

    fn ref_op(&mut self, method: &'static str) -> bool {
        let context = CallContext::new("RefCounted", method);

        let frame = CallFrame::new();
        // SAFETY: frame matches the shared () -> bool signature.
        unsafe {
            out_class_ptrcall(
                table::method_bind("RefCounted", method),
                &context,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        }
    }
}
