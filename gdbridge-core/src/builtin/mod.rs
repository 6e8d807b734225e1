/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Wrappers for the engine's builtin (value) types.
//!
//! Every wrapper owning engine-side storage carries a generation ticket; see
//! [`crate::registry::handles`]. The storage is released at drop or through the wrapper's
//! `end()` method, whichever comes first.

#[macro_use]
mod macros;

mod array;
mod callable;
mod color;
mod dictionary;
mod node_path;
mod packed_array;
mod rid;
mod signal;
mod string;
mod string_name;
mod variant;
mod vectors;

pub use array::{TypedArray, VariantArray};
pub use callable::Callable;
pub use color::Color;
pub use dictionary::Dictionary;
pub use node_path::NodePath;
pub use packed_array::{
    PackedByteArray, PackedColorArray, PackedFloat32Array, PackedFloat64Array, PackedInt32Array,
    PackedInt64Array, PackedStringArray, PackedVector2Array, PackedVector3Array,
    PackedVector4Array,
};
pub use rid::Rid;
pub use signal::Signal;
pub use string::GString;
pub use string_name::StringName;
pub use variant::{FromVariant, ToVariant, Variant};
pub use vectors::{Vector2, Vector3, Vector4};

use std::collections::HashMap;

use crate::sys;

type BuiltinMethodFn = unsafe extern "C" fn(
    sys::GDExtensionTypePtr,
    *const sys::GDExtensionConstTypePtr,
    sys::GDExtensionTypePtr,
    std::ffi::c_int,
);

static RESOLVED_METHODS: sys::Global<HashMap<(u32, &'static str), BuiltinMethodFn>> =
    sys::Global::default();

/// Resolves a named builtin method, caching the function pointer.
///
/// # Panics
/// If the engine does not know the method under this hash; that is an ABI mismatch between the
/// bridge and the engine build, and no call must be attempted.
pub(crate) fn builtin_method(
    variant_type: sys::VariantType,
    name: &'static str,
    hash: i64,
) -> BuiltinMethodFn {
    let key = (variant_type.sys(), name);

    if let Some(method) = RESOLVED_METHODS.lock().get(&key) {
        return *method;
    }

    let name_sn = StringName::from(name);
    // SAFETY: resolution query; the hash pins the exact signature revision.
    let method = unsafe {
        sys::interface_fn!(variant_get_ptr_builtin_method)(
            variant_type.sys(),
            name_sn.string_name_sys_const(),
            hash,
        )
    };

    let method = method.unwrap_or_else(|| {
        panic!("builtin method {variant_type:?}::{name} (hash {hash}) not found in engine")
    });

    RESOLVED_METHODS.lock().insert(key, method);
    method
}
