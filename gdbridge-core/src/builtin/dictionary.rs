/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::builtin::{builtin_method, Variant};
use crate::registry::handles::{self, GenTicket};
use crate::sys;
use sys::types::OpaqueDictionary;
use sys::{GodotAbi, PtrcallKind, VariantType};

// Signature-based method hashes from the engine's API description (4.2).
const SIZE_HASH: i64 = 3173160232;
const HAS_HASH: i64 = 3680194679;
const ERASE_HASH: i64 = 1776646889;
const CLEAR_HASH: i64 = 3218959716;

/// Reference-counted dictionary with variant keys and values.
#[repr(C)]
pub struct Dictionary {
    opaque: OpaqueDictionary,
    ticket: GenTicket,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_opaque(opaque: OpaqueDictionary) -> Self {
        Self {
            opaque,
            ticket: handles::register(),
        }
    }

    pub fn len(&self) -> usize {
        self.ensure_live();

        let mut result = 0i64;
        // SAFETY: size() takes no arguments and writes an int.
        unsafe {
            let method = builtin_method(VariantType::Dictionary, "size", SIZE_HASH);
            method(self.abi(), std::ptr::null(), result.abi_mut(), 0);
        }
        result as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &Variant) -> bool {
        self.ensure_live();
        key.ensure_live();

        let mut result = false;
        // SAFETY: has(Variant) writes a bool.
        unsafe {
            let method = builtin_method(VariantType::Dictionary, "has", HAS_HASH);
            let args = [key.variant_sys_const() as sys::GDExtensionConstTypePtr];
            method(self.abi(), args.as_ptr(), result.abi_mut(), 1);
        }
        result
    }

    /// Returns a copy of the value under `key`, or `None` if absent.
    pub fn get(&self, key: &Variant) -> Option<Variant> {
        self.ensure_live();
        key.ensure_live();

        // SAFETY: the const index operator returns null for missing keys instead of inserting.
        unsafe {
            let slot = sys::interface_fn!(dictionary_operator_index_const)(
                self.abi_const(),
                key.variant_sys_const(),
            );

            if slot.is_null() {
                None
            } else {
                Some(Variant::clone_from_sys(slot as sys::GDExtensionConstVariantPtr))
            }
        }
    }

    /// Inserts or overwrites the value under `key` with a copy of `value`.
    pub fn insert(&mut self, key: &Variant, value: &Variant) {
        self.ensure_live();
        key.ensure_live();
        value.ensure_live();

        // SAFETY: the mutable index operator creates the slot if missing; the slot then holds a
        // live (possibly nil) variant which is destroyed before the copy.
        unsafe {
            let slot =
                sys::interface_fn!(dictionary_operator_index)(self.abi_mut(), key.variant_sys_const());
            sys::interface_fn!(variant_destroy)(slot);
            sys::interface_fn!(variant_new_copy)(
                slot as sys::GDExtensionUninitializedVariantPtr,
                value.variant_sys_const(),
            );
        }
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove(&mut self, key: &Variant) -> bool {
        self.ensure_live();
        key.ensure_live();

        let mut result = false;
        // SAFETY: erase(Variant) writes a bool.
        unsafe {
            let method = builtin_method(VariantType::Dictionary, "erase", ERASE_HASH);
            let args = [key.variant_sys_const() as sys::GDExtensionConstTypePtr];
            method(self.abi_mut(), args.as_ptr(), result.abi_mut(), 1);
        }
        result
    }

    pub fn clear(&mut self) {
        self.ensure_live();

        // SAFETY: clear() takes no arguments and returns nothing.
        unsafe {
            let method = builtin_method(VariantType::Dictionary, "clear", CLEAR_HASH);
            method(self.abi_mut(), std::ptr::null(), std::ptr::null_mut(), 0);
        }
    }
}

// SAFETY: stores the engine blob in `opaque`; the blob's address is the ABI pointer.
unsafe impl GodotAbi for Dictionary {
    fn variant_type() -> VariantType {
        VariantType::Dictionary
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
            let ctor = sys::builtin_fn!(dictionary_construct_copy);
            let args = [ptr as sys::GDExtensionConstTypePtr];
            ctor(self_ptr, args.as_ptr());
        })
    }
}

impl_builtin_traits! {
    for Dictionary {
        Default => dictionary_construct_default;
        Clone => dictionary_construct_copy;
        Drop => dictionary_destroy;
        PartialEq => dictionary_operator_equal;
    }
}

impl_builtin_release!(Dictionary, OpaqueDictionary => dictionary_destroy);
impl_variant_conversions!(Dictionary, live);

impl fmt::Debug for Dictionary {
    fmt_via_stringify!();
}
