/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

mod impls;

pub use impls::{FromVariant, ToVariant};

use std::fmt;

use crate::builtin::GString;
use crate::registry::handles::{self, GenTicket};
use crate::sys;
use sys::{GodotAbi, PtrcallKind, VariantType};

/// The engine's tagged union, able to hold a value of any [`VariantType`].
///
/// Variants own their payload: dropping (or [`end()`][Self::end]-ing) a variant releases the
/// held value. Conversions from and to concrete types go through [`ToVariant`]/[`FromVariant`].
#[repr(C)]
pub struct Variant {
    opaque: sys::types::OpaqueVariant,
    ticket: GenTicket,
}

impl Variant {
    /// The nil variant.
    pub fn nil() -> Self {
        // SAFETY: variant_new_nil fully initializes the slot.
        unsafe {
            Self::from_abi_init(|variant_ptr| {
                sys::interface_fn!(variant_new_nil)(
                    variant_ptr as sys::GDExtensionUninitializedVariantPtr,
                );
            })
        }
    }

    pub fn is_nil(&self) -> bool {
        self.get_type() == VariantType::Nil
    }

    /// Kind tag of the held value.
    pub fn get_type(&self) -> VariantType {
        self.ensure_live();

        // SAFETY: read-only query on a live variant.
        let sys_type = unsafe { sys::interface_fn!(variant_get_type)(self.variant_sys_const()) };
        VariantType::from_sys(sys_type)
    }

    /// Engine string representation of the held value.
    pub fn stringify(&self) -> GString {
        self.ensure_live();

        // SAFETY: writes a fresh string into the destination.
        unsafe {
            GString::from_abi_init(|string_ptr| {
                sys::interface_fn!(variant_stringify)(
                    self.variant_sys_const(),
                    string_ptr as sys::GDExtensionUninitializedStringPtr,
                );
            })
        }
    }

    /// Truthiness of the held value, under the engine's conversion rules.
    pub fn booleanize(&self) -> bool {
        self.ensure_live();

        // SAFETY: read-only query on a live variant.
        unsafe { sys::interface_fn!(variant_booleanize)(self.variant_sys_const()) != 0 }
    }

    /// Engine hash of the held value.
    pub fn hash_value(&self) -> i64 {
        self.ensure_live();

        // SAFETY: read-only query on a live variant.
        unsafe { sys::interface_fn!(variant_hash)(self.variant_sys_const()) }
    }

    fn from_opaque(opaque: sys::types::OpaqueVariant) -> Self {
        Self {
            opaque,
            ticket: handles::register(),
        }
    }

    /// Copy-constructs from an engine-owned variant, e.g. a varcall argument.
    ///
    /// # Safety
    /// `ptr` must point to a live engine variant.
    pub(crate) unsafe fn clone_from_sys(ptr: sys::GDExtensionConstVariantPtr) -> Self {
        Self::from_abi_init(|variant_ptr| {
            sys::interface_fn!(variant_new_copy)(
                variant_ptr as sys::GDExtensionUninitializedVariantPtr,
                ptr,
            );
        })
    }

    #[doc(hidden)]
    pub fn variant_sys(&self) -> sys::GDExtensionVariantPtr {
        self.abi() as sys::GDExtensionVariantPtr
    }

    #[doc(hidden)]
    pub fn variant_sys_const(&self) -> sys::GDExtensionConstVariantPtr {
        self.abi_const() as sys::GDExtensionConstVariantPtr
    }
}

// SAFETY: stores the engine blob in `opaque`; the blob's address is the ABI pointer. Variants
// have no kind of their own, Nil stands in where one is demanded.
unsafe impl GodotAbi for Variant {
    fn variant_type() -> VariantType {
        VariantType::Nil
    }

    sys::abi_methods! {
        type sys::GDExtensionTypePtr = *mut Opaque;
        fn from_abi;
        fn from_abi_init;
        fn abi;
        fn move_return_ptr;
    }

    unsafe fn from_abi_init_default(init_fn: impl FnOnce(sys::GDExtensionTypePtr)) -> Self {
        let mut result = Self::nil();
        init_fn(result.abi_mut());
        result
    }

    unsafe fn from_arg_ptr(ptr: sys::GDExtensionTypePtr, _kind: PtrcallKind) -> Self {
        Self::clone_from_sys(ptr as sys::GDExtensionConstVariantPtr)
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self::nil()
    }
}

impl Clone for Variant {
    fn clone(&self) -> Self {
        self.ensure_live();

        // SAFETY: copy constructor over a live source.
        unsafe { Self::clone_from_sys(self.variant_sys_const()) }
    }
}

impl Drop for Variant {
    fn drop(&mut self) {
        if !handles::invalidate(self.ticket) {
            return;
        }

        // SAFETY: ticket was live, so the engine-side payload still exists.
        unsafe { sys::interface_fn!(variant_destroy)(self.variant_sys()) };
    }
}

impl Variant {
    /// Releases the held value now instead of at drop.
    pub fn end(&mut self) {
        if !handles::invalidate(self.ticket) {
            sys::out!("double end of Variant ignored");
            return;
        }

        // SAFETY: generation was live, so the payload exists exactly once.
        unsafe { sys::interface_fn!(variant_destroy)(self.variant_sys()) };
        self.opaque = sys::types::OpaqueVariant::zeroed();
    }

    /// Whether the engine-side payload is still live (not yet released).
    pub fn is_live(&self) -> bool {
        handles::is_live(self.ticket)
    }

    #[inline]
    pub(crate) fn ensure_live(&self) {
        assert!(self.is_live(), "Variant used after end()");
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stringify())
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variant({:?}: {})", self.get_type(), self.stringify())
    }
}
