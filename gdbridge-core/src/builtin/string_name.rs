/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::ffi::c_char;
use std::fmt;

use crate::builtin::GString;
use crate::registry::handles::{self, GenTicket};
use crate::sys;
use sys::types::OpaqueStringName;
use sys::{GodotAbi, PtrcallKind};

/// Interned string, used by the engine for identifiers (class, method and signal names).
///
/// Comparisons are cheap engine-side (pointer identity on the interned pool); construction from
/// a Rust string pays the interning cost once per call.
#[repr(C)]
pub struct StringName {
    opaque: OpaqueStringName,
    ticket: GenTicket,
}

impl StringName {
    fn from_opaque(opaque: OpaqueStringName) -> Self {
        Self {
            opaque,
            ticket: handles::register(),
        }
    }

    /// Copy-constructs from an engine-owned string name, e.g. a callback argument.
    ///
    /// # Safety
    /// `ptr` must point to a live engine string name.
    pub(crate) unsafe fn clone_from_sys(ptr: sys::GDExtensionConstStringNamePtr) -> Self {
        Self::from_abi_init(|self_ptr| {
            let ctor = sys::builtin_fn!(string_name_construct_copy);
            let args = [ptr as sys::GDExtensionConstTypePtr];
            ctor(self_ptr, args.as_ptr());
        })
    }

    #[doc(hidden)]
    pub fn string_name_sys(&self) -> sys::GDExtensionStringNamePtr {
        self.abi() as sys::GDExtensionStringNamePtr
    }

    #[doc(hidden)]
    pub fn string_name_sys_const(&self) -> sys::GDExtensionConstStringNamePtr {
        self.abi_const() as sys::GDExtensionConstStringNamePtr
    }
}

// SAFETY: stores the engine blob in `opaque`; the blob's address is the ABI pointer.
unsafe impl GodotAbi for StringName {
    fn variant_type() -> sys::VariantType {
        sys::VariantType::StringName
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
        Self::clone_from_sys(ptr as sys::GDExtensionConstStringNamePtr)
    }
}

impl_builtin_traits! {
    for StringName {
        Default => string_name_construct_default;
        Clone => string_name_construct_copy;
        Drop => string_name_destroy;
        Eq => string_name_operator_equal;
    }
}

impl_builtin_release!(StringName, OpaqueStringName => string_name_destroy);
impl_variant_conversions!(StringName, live);

impl<S: AsRef<str>> From<S> for StringName {
    fn from(string: S) -> Self {
        let bytes = string.as_ref().as_bytes();

        // SAFETY: the engine constructor transcodes, interns and copies the buffer.
        unsafe {
            Self::from_abi_init(|string_ptr| {
                let ctor = sys::interface_fn!(string_name_new_with_utf8_chars_and_len);
                ctor(
                    string_ptr as sys::GDExtensionUninitializedStringNamePtr,
                    bytes.as_ptr() as *const c_char,
                    bytes.len() as i64,
                );
            })
        }
    }
}

impl From<&StringName> for String {
    fn from(name: &StringName) -> Self {
        GString::from(name).to_string()
    }
}

impl From<&StringName> for GString {
    fn from(name: &StringName) -> Self {
        use crate::builtin::ToVariant;

        // No direct converter exposed; round-trip through a variant.
        name.to_variant().stringify()
    }
}

impl fmt::Display for StringName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from(self))
    }
}

impl fmt::Debug for StringName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "&\"{self}\"")
    }
}
