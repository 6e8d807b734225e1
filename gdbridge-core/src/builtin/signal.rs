/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::builtin::{builtin_method, Callable, StringName, Variant};
use crate::classes::Object;
use crate::obj::{Gd, GodotClass, RawGd};
use crate::registry::handles::{self, GenTicket};
use crate::sys;
use sys::{GodotAbi, PtrcallKind, VariantType};

// Signature-based method hashes from the engine's API description (4.2).
const GET_OBJECT_HASH: i64 = 4008621426;
const GET_NAME_HASH: i64 = 2737447660;

/// Reference to a named signal on a specific object.
///
/// Emission and connection are delegated to the source object; a signal whose object has been
/// destroyed emits to nobody and fails connection.
#[repr(C)]
pub struct Signal {
    opaque: sys::types::OpaqueSignal,
    ticket: GenTicket,
}

impl Signal {
    fn from_opaque(opaque: sys::types::OpaqueSignal) -> Self {
        Self {
            opaque,
            ticket: handles::register(),
        }
    }

    /// Signal `name` on `object`.
    pub fn from_object_signal<T: GodotClass, S: Into<StringName>>(
        object: &Gd<T>,
        name: S,
    ) -> Self {
        let name = name.into();

        // SAFETY: dedicated engine constructor taking (Object, StringName).
        unsafe {
            Self::from_abi_init(|self_ptr| {
                let ctor = sys::builtin_fn!(signal_from_object_signal);
                let args = [object.raw().abi_const(), name.abi_const()];
                ctor(self_ptr, args.as_ptr());
            })
        }
    }

    /// The source object, if still alive.
    pub fn object(&self) -> Option<Gd<Object>> {
        self.ensure_live();

        // SAFETY: get_object() writes an object pointer (null for freed sources).
        let raw = unsafe {
            RawGd::<Object>::from_abi_init(|type_ptr| {
                let method = builtin_method(VariantType::Signal, "get_object", GET_OBJECT_HASH);
                method(self.abi(), std::ptr::null(), type_ptr as sys::GDExtensionTypePtr, 0);
            })
        };

        if raw.is_null() || !raw.is_instance_valid() {
            return None;
        }
        // SAFETY: pointer resolved from a live signal source.
        Some(unsafe { Gd::from_obj_sys_inc(raw.obj_sys()) })
    }

    /// Name of the signal.
    pub fn name(&self) -> StringName {
        self.ensure_live();

        // SAFETY: get_name() writes a string name.
        unsafe {
            StringName::from_abi_init(|type_ptr| {
                let method = builtin_method(VariantType::Signal, "get_name", GET_NAME_HASH);
                method(self.abi(), std::ptr::null(), type_ptr as sys::GDExtensionTypePtr, 0);
            })
        }
    }

    /// Emits the signal with `args`, delivering to all connected callables in connection order.
    ///
    /// Emitting on a destroyed source is a no-op.
    pub fn emit(&self, args: &[Variant]) {
        let Some(mut object) = self.object() else {
            return;
        };

        object.emit_signal(&self.name(), args);
    }

    /// Connects `callable`; delivery starts with the next emission.
    ///
    /// Returns the engine error code (0 for success, including the destroyed-source case where
    /// the connection is simply dropped).
    pub fn connect(&self, callable: &Callable) -> i64 {
        let Some(mut object) = self.object() else {
            return 0;
        };

        object.connect(&self.name(), callable)
    }
}

// SAFETY: stores the engine blob in `opaque`; the blob's address is the ABI pointer.
unsafe impl GodotAbi for Signal {
    fn variant_type() -> VariantType {
        VariantType::Signal
    }

    sys::abi_methods! {
        type sys::GDExtensionTypePtr = *mut Opaque;
        fn from_abi;
        fn from_abi_init;
        fn abi;
        fn move_return_ptr;
    }

    unsafe fn from_abi_init_default(init_fn: impl FnOnce(sys::GDExtensionTypePtr)) -> Self {
        let mut result = Self::default();
        init_fn(result.abi_mut());
        result
    }

    unsafe fn from_arg_ptr(ptr: sys::GDExtensionTypePtr, _kind: PtrcallKind) -> Self {
        Self::from_abi_init(|self_ptr| {
            let ctor = sys::builtin_fn!(signal_construct_copy);
            let args = [ptr as sys::GDExtensionConstTypePtr];
            ctor(self_ptr, args.as_ptr());
        })
    }
}

impl_builtin_traits! {
    for Signal {
        Default => signal_construct_default;
        Clone => signal_construct_copy;
        Drop => signal_destroy;
        PartialEq => signal_operator_equal;
    }
}

impl_builtin_release!(Signal, sys::types::OpaqueSignal => signal_destroy);
impl_variant_conversions!(Signal, live);

impl fmt::Debug for Signal {
    fmt_via_stringify!();
}
