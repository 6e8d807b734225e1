/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::ffi::c_char;
use std::fmt;

use crate::registry::handles::{self, GenTicket};
use crate::sys;
use sys::types::OpaqueString;
use sys::{GodotAbi, PtrcallKind};

/// The engine's copy-on-write UTF-32 string.
///
/// Conversions from and to Rust strings transcode UTF-8 at the boundary. Like every value
/// container, the wrapper releases its engine storage at drop, or earlier through
/// [`end()`][Self::end].
#[repr(C)]
pub struct GString {
    opaque: OpaqueString,
    ticket: GenTicket,
}

impl GString {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_opaque(opaque: OpaqueString) -> Self {
        Self {
            opaque,
            ticket: handles::register(),
        }
    }

    /// Number of UTF-8 bytes of the content (excluding any terminator).
    pub fn utf8_len(&self) -> usize {
        self.ensure_live();

        // SAFETY: length query with a null buffer is the documented "measure" call.
        let len = unsafe {
            sys::interface_fn!(string_to_utf8_chars)(
                self.string_sys_const(),
                std::ptr::null_mut(),
                0,
            )
        };
        len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.utf8_len() == 0
    }

    #[doc(hidden)]
    pub fn string_sys(&self) -> sys::GDExtensionStringPtr {
        self.abi() as sys::GDExtensionStringPtr
    }

    #[doc(hidden)]
    pub fn string_sys_const(&self) -> sys::GDExtensionConstStringPtr {
        self.abi_const() as sys::GDExtensionConstStringPtr
    }
}

// SAFETY: stores the engine blob in `opaque`; the blob's address is the ABI pointer.
unsafe impl GodotAbi for GString {
    fn variant_type() -> sys::VariantType {
        sys::VariantType::String
    }

    sys::abi_methods! {
        type sys::GDExtensionTypePtr = *mut Opaque;
        fn from_abi;
        fn from_abi_init;
        fn abi;
        fn move_return_ptr;
    }

    unsafe fn from_abi_init_default(init_fn: impl FnOnce(sys::GDExtensionTypePtr)) -> Self {
        // Entry points like stringify expect a pre-initialized destination.
        let mut result = Self::default();
        init_fn(result.abi_mut());
        result
    }

    unsafe fn from_arg_ptr(ptr: sys::GDExtensionTypePtr, _kind: PtrcallKind) -> Self {
        // Argument slots stay owned by the caller; take a copy.
        Self::from_abi_init(|self_ptr| {
            let ctor = sys::builtin_fn!(string_construct_copy);
            let args = [ptr as sys::GDExtensionConstTypePtr];
            ctor(self_ptr, args.as_ptr());
        })
    }
}

impl_builtin_traits! {
    for GString {
        Default => string_construct_default;
        Clone => string_construct_copy;
        Drop => string_destroy;
        Eq => string_operator_equal;
        Ord => string_operator_less;
    }
}

impl_builtin_release!(GString, OpaqueString => string_destroy);
impl_variant_conversions!(GString, live);

impl<S: AsRef<str>> From<S> for GString {
    fn from(string: S) -> Self {
        let bytes = string.as_ref().as_bytes();

        // SAFETY: the engine constructor transcodes and copies the buffer.
        unsafe {
            Self::from_abi_init(|string_ptr| {
                let ctor = sys::interface_fn!(string_new_with_utf8_chars_and_len);
                ctor(
                    string_ptr as sys::GDExtensionUninitializedStringPtr,
                    bytes.as_ptr() as *const c_char,
                    bytes.len() as i64,
                );
            })
        }
    }
}

impl From<&GString> for String {
    fn from(string: &GString) -> Self {
        string.ensure_live();

        // SAFETY: first call measures, second call fills a buffer of exactly that size.
        unsafe {
            let to_utf8 = sys::interface_fn!(string_to_utf8_chars);
            let len = to_utf8(string.string_sys_const(), std::ptr::null_mut(), 0);
            debug_assert!(len >= 0);

            let mut buffer = vec![0u8; len as usize];
            to_utf8(
                string.string_sys_const(),
                buffer.as_mut_ptr() as *mut c_char,
                len,
            );

            // Engine strings hold valid Unicode; the transcoded bytes are valid UTF-8.
            String::from_utf8_unchecked(buffer)
        }
    }
}

impl fmt::Display for GString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from(self))
    }
}

impl fmt::Debug for GString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}
