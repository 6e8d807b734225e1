/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;
use std::marker::PhantomData;

use crate::builtin::{builtin_method, FromVariant, StringName, ToVariant, Variant};
use crate::registry::handles::{self, GenTicket};
use crate::sys;
use sys::types::OpaqueArray;
use sys::{GodotAbi, PtrcallKind, VariantType};

// Signature-based method hashes from the engine's API description (4.2).
const SIZE_HASH: i64 = 3173160232;
const PUSH_BACK_HASH: i64 = 3316032543;
const CLEAR_HASH: i64 = 3218959716;

/// Untyped, reference-counted array of variants.
///
/// Cloning creates a new host-side identity but shares the engine-side storage (copy-on-write
/// at the engine's discretion).
#[repr(C)]
pub struct VariantArray {
    opaque: OpaqueArray,
    ticket: GenTicket,
}

impl VariantArray {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_opaque(opaque: OpaqueArray) -> Self {
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
            let method = builtin_method(VariantType::Array, "size", SIZE_HASH);
            method(self.abi(), std::ptr::null(), result.abi_mut(), 0);
        }
        result as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a copy of `value`.
    pub fn push(&mut self, value: &Variant) {
        self.ensure_live();
        value.ensure_live();

        // SAFETY: push_back(Variant) returns nothing.
        unsafe {
            let method = builtin_method(VariantType::Array, "push_back", PUSH_BACK_HASH);
            let args = [value.variant_sys_const() as sys::GDExtensionConstTypePtr];
            method(self.abi_mut(), args.as_ptr(), std::ptr::null_mut(), 1);
        }
    }

    pub fn clear(&mut self) {
        self.ensure_live();

        // SAFETY: clear() takes no arguments and returns nothing.
        unsafe {
            let method = builtin_method(VariantType::Array, "clear", CLEAR_HASH);
            method(self.abi_mut(), std::ptr::null(), std::ptr::null_mut(), 0);
        }
    }

    /// Returns a copy of the element at `index`.
    ///
    /// # Panics
    /// If `index` is out of bounds.
    pub fn get(&self, index: usize) -> Variant {
        self.check_bounds(index);

        // SAFETY: bounds checked; operator_index_const yields a pointer to the slot.
        unsafe {
            let slot = sys::interface_fn!(array_operator_index_const)(
                self.abi_const(),
                index as i64,
            );
            Variant::clone_from_sys(slot as sys::GDExtensionConstVariantPtr)
        }
    }

    /// Overwrites the element at `index` with a copy of `value`.
    ///
    /// # Panics
    /// If `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: &Variant) {
        self.check_bounds(index);
        value.ensure_live();

        // SAFETY: the slot holds a live variant; destroy it before copying in the new value.
        unsafe {
            let slot = sys::interface_fn!(array_operator_index)(self.abi_mut(), index as i64);
            sys::interface_fn!(variant_destroy)(slot);
            sys::interface_fn!(variant_new_copy)(
                slot as sys::GDExtensionUninitializedVariantPtr,
                value.variant_sys_const(),
            );
        }
    }

    fn check_bounds(&self, index: usize) {
        let len = self.len();
        assert!(len > index, "array index {index} out of bounds (len {len})");
    }
}

// SAFETY: stores the engine blob in `opaque`; the blob's address is the ABI pointer.
unsafe impl GodotAbi for VariantArray {
    fn variant_type() -> VariantType {
        VariantType::Array
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
            let ctor = sys::builtin_fn!(array_construct_copy);
            let args = [ptr as sys::GDExtensionConstTypePtr];
            ctor(self_ptr, args.as_ptr());
        })
    }
}

impl_builtin_traits! {
    for VariantArray {
        Default => array_construct_default;
        Clone => array_construct_copy;
        Drop => array_destroy;
        PartialEq => array_operator_equal;
    }
}

impl_builtin_release!(VariantArray, OpaqueArray => array_destroy);
impl_variant_conversions!(VariantArray, live);

impl fmt::Debug for VariantArray {
    fmt_via_stringify!();
}

// ----------------------------------------------------------------------------------------------------------------------------------------------

/// Array with an element-type constraint, enforced by the engine on insertion.
pub struct TypedArray<T> {
    array: VariantArray,
    _marker: PhantomData<fn() -> T>,
}

impl<T: GodotAbi + ToVariant + FromVariant> TypedArray<T> {
    pub fn new() -> Self {
        let array = VariantArray::new();

        // SAFETY: fresh, empty array; typing must be set before first insertion.
        unsafe {
            sys::interface_fn!(array_set_typed)(
                array.abi(),
                T::variant_type().sys(),
                StringName::default().string_name_sys_const(),
                Variant::nil().variant_sys_const(),
            );
        }

        Self {
            array,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    pub fn push(&mut self, value: &T) {
        self.array.push(&value.to_variant());
    }

    /// # Panics
    /// If `index` is out of bounds.
    pub fn get(&self, index: usize) -> T {
        T::from_variant(&self.array.get(index))
    }

    /// # Panics
    /// If `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: &T) {
        self.array.set(index, &value.to_variant());
    }

    /// View as the untyped array sharing the same storage.
    pub fn as_untyped(&self) -> &VariantArray {
        &self.array
    }
}

impl<T: GodotAbi + ToVariant + FromVariant> Default for TypedArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypedArray<T> {
    fn clone(&self) -> Self {
        Self {
            array: self.array.clone(),
            _marker: PhantomData,
        }
    }
}
