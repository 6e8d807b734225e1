/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Packed arrays: contiguous engine-side storage of one element type.
//!
//! Numeric and math element types expose slice views onto the engine buffer; the string variant
//! has no slice view (its elements are engine strings, not plain data) and goes through per-index
//! access instead.
//!
//! Note on pointer calls: the engine widens small scalars in method arguments, so `push` routes
//! byte/int32 elements through an `i64` slot and float32 through `f64`. Element storage itself
//! is the narrow type, which is what the index operators and slice views expose.

use std::fmt;

use crate::builtin::{builtin_method, Color, GString, Vector2, Vector3, Vector4};
use crate::registry::handles::{self, GenTicket};
use crate::sys;
use sys::types::OpaquePackedArray;
use sys::{GodotAbi, PtrcallKind, VariantType};

// Signature-based method hashes from the engine's API description (4.2); shared across element
// types where the signature matches.
const SIZE_HASH: i64 = 3173160232;
const RESIZE_HASH: i64 = 848867239;
const PUSH_INT_HASH: i64 = 3694822916;
const PUSH_FLOAT_HASH: i64 = 3135753539;
const PUSH_VECTOR2_HASH: i64 = 3351846707;
const PUSH_VECTOR3_HASH: i64 = 1931480043;
const PUSH_VECTOR4_HASH: i64 = 2435372830;
const PUSH_COLOR_HASH: i64 = 3757976155;
const PUSH_STRING_HASH: i64 = 816187996;

macro_rules! impl_packed_array_base {
    (
        $PackedTy:ident, $variant:ident, $doc_elem:literal,
        ctor_copy = $ctor_copy:ident,
        traits = { $($Trait:ident => $gd_method:ident;)* } $(,)?
    ) => {
        #[doc = concat!("Packed array of ", $doc_elem, " elements.")]
        #[repr(C)]
        pub struct $PackedTy {
            opaque: OpaquePackedArray,
            ticket: GenTicket,
        }

        impl $PackedTy {
            pub fn new() -> Self {
                Self::default()
            }

            fn from_opaque(opaque: OpaquePackedArray) -> Self {
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
                    let method = builtin_method(VariantType::$variant, "size", SIZE_HASH);
                    method(self.abi(), std::ptr::null(), result.abi_mut(), 0);
                }
                result as usize
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Grows or shrinks to exactly `new_len` elements; new slots are zero-initialized.
            pub fn resize(&mut self, new_len: usize) {
                self.ensure_live();

                let new_len = new_len as i64;
                let mut error_code = 0i64;
                // SAFETY: resize(int) writes an error int.
                unsafe {
                    let method = builtin_method(VariantType::$variant, "resize", RESIZE_HASH);
                    let args = [new_len.as_arg_ptr()];
                    method(self.abi_mut(), args.as_ptr(), error_code.abi_mut(), 1);
                }
                assert_eq!(error_code, 0, "packed array resize failed");
            }

            fn check_bounds(&self, index: usize) {
                let len = self.len();
                assert!(len > index, "packed array index {index} out of bounds (len {len})");
            }
        }

        // SAFETY: stores the engine blob in `opaque`; the blob's address is the ABI pointer.
        unsafe impl GodotAbi for $PackedTy {
            fn variant_type() -> VariantType {
                VariantType::$variant
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
                    let ctor = sys::builtin_fn!($ctor_copy);
                    let args = [ptr as sys::GDExtensionConstTypePtr];
                    ctor(self_ptr, args.as_ptr());
                })
            }
        }

        impl_builtin_traits! {
            for $PackedTy {
                $( $Trait => $gd_method; )*
            }
        }

        impl_variant_conversions!($PackedTy, live);

        impl fmt::Debug for $PackedTy {
            fmt_via_stringify!();
        }
    };
}

macro_rules! impl_packed_array {
    (
        $PackedTy:ident, $Elem:ty, $variant:ident, $doc_elem:literal,
        ctor_default = $ctor_default:ident,
        ctor_copy = $ctor_copy:ident,
        dtor = $dtor:ident,
        op_eq = $op_eq:ident,
        index = $index_fn:ident,
        index_const = $index_const_fn:ident,
        push_via = $PushVia:ty,
        push_hash = $push_hash:expr $(,)?
    ) => {
        impl_packed_array_base! {
            $PackedTy, $variant, $doc_elem,
            ctor_copy = $ctor_copy,
            traits = {
                Default => $ctor_default;
                Clone => $ctor_copy;
                Drop => $dtor;
                PartialEq => $op_eq;
            },
        }

        impl_builtin_release!($PackedTy, OpaquePackedArray => $dtor);

        impl $PackedTy {
            /// Appends one element.
            pub fn push(&mut self, value: $Elem) {
                self.ensure_live();

                let widened: $PushVia = value.into();
                let mut appended = false;
                // SAFETY: push_back takes one widened element and writes a bool.
                unsafe {
                    let method =
                        builtin_method(VariantType::$variant, "push_back", $push_hash);
                    let args = [widened.as_arg_ptr()];
                    method(self.abi_mut(), args.as_ptr(), appended.abi_mut(), 1);
                }
            }

            /// # Panics
            /// If `index` is out of bounds.
            pub fn get(&self, index: usize) -> $Elem {
                self.check_bounds(index);

                // SAFETY: bounds checked; the index operator yields a typed element pointer.
                unsafe {
                    let elem_ptr =
                        sys::interface_fn!($index_const_fn)(self.abi_const(), index as i64);
                    *(elem_ptr as *const $Elem)
                }
            }

            /// # Panics
            /// If `index` is out of bounds.
            pub fn set(&mut self, index: usize, value: $Elem) {
                self.check_bounds(index);

                // SAFETY: bounds checked; plain-data element, overwrite in place.
                unsafe {
                    let elem_ptr = sys::interface_fn!($index_fn)(self.abi_mut(), index as i64);
                    *(elem_ptr as *mut $Elem) = value;
                }
            }

            /// Borrowed view of the element buffer.
            ///
            /// The view is valid as long as the array is not resized; the shared borrow keeps
            /// this wrapper from doing so.
            pub fn as_slice(&self) -> &[$Elem] {
                let len = self.len();
                if len == 0 {
                    return &[];
                }

                // SAFETY: packed storage is contiguous; len elements starting at index 0.
                unsafe {
                    let base =
                        sys::interface_fn!($index_const_fn)(self.abi_const(), 0) as *const $Elem;
                    std::slice::from_raw_parts(base, len)
                }
            }
        }

        impl From<&[$Elem]> for $PackedTy {
            fn from(slice: &[$Elem]) -> Self {
                let mut array = Self::new();
                array.resize(slice.len());

                if !slice.is_empty() {
                    // SAFETY: freshly resized to exactly slice.len() plain-data elements.
                    unsafe {
                        let base =
                            sys::interface_fn!($index_fn)(array.abi_mut(), 0) as *mut $Elem;
                        std::ptr::copy_nonoverlapping(slice.as_ptr(), base, slice.len());
                    }
                }
                array
            }
        }
    };
}

impl_packed_array!(
    PackedByteArray, u8, PackedByteArray, "byte",
    ctor_default = packed_byte_array_construct_default,
    ctor_copy = packed_byte_array_construct_copy,
    dtor = packed_byte_array_destroy,
    op_eq = packed_byte_array_operator_equal,
    index = packed_byte_array_operator_index,
    index_const = packed_byte_array_operator_index_const,
    push_via = i64,
    push_hash = PUSH_INT_HASH,
);

impl_packed_array!(
    PackedInt32Array, i32, PackedInt32Array, "32-bit integer",
    ctor_default = packed_int32_array_construct_default,
    ctor_copy = packed_int32_array_construct_copy,
    dtor = packed_int32_array_destroy,
    op_eq = packed_int32_array_operator_equal,
    index = packed_int32_array_operator_index,
    index_const = packed_int32_array_operator_index_const,
    push_via = i64,
    push_hash = PUSH_INT_HASH,
);

impl_packed_array!(
    PackedInt64Array, i64, PackedInt64Array, "64-bit integer",
    ctor_default = packed_int64_array_construct_default,
    ctor_copy = packed_int64_array_construct_copy,
    dtor = packed_int64_array_destroy,
    op_eq = packed_int64_array_operator_equal,
    index = packed_int64_array_operator_index,
    index_const = packed_int64_array_operator_index_const,
    push_via = i64,
    push_hash = PUSH_INT_HASH,
);

impl_packed_array!(
    PackedFloat32Array, f32, PackedFloat32Array, "32-bit float",
    ctor_default = packed_float32_array_construct_default,
    ctor_copy = packed_float32_array_construct_copy,
    dtor = packed_float32_array_destroy,
    op_eq = packed_float32_array_operator_equal,
    index = packed_float32_array_operator_index,
    index_const = packed_float32_array_operator_index_const,
    push_via = f64,
    push_hash = PUSH_FLOAT_HASH,
);

impl_packed_array!(
    PackedFloat64Array, f64, PackedFloat64Array, "64-bit float",
    ctor_default = packed_float64_array_construct_default,
    ctor_copy = packed_float64_array_construct_copy,
    dtor = packed_float64_array_destroy,
    op_eq = packed_float64_array_operator_equal,
    index = packed_float64_array_operator_index,
    index_const = packed_float64_array_operator_index_const,
    push_via = f64,
    push_hash = PUSH_FLOAT_HASH,
);

impl_packed_array!(
    PackedVector2Array, Vector2, PackedVector2Array, "Vector2",
    ctor_default = packed_vector2_array_construct_default,
    ctor_copy = packed_vector2_array_construct_copy,
    dtor = packed_vector2_array_destroy,
    op_eq = packed_vector2_array_operator_equal,
    index = packed_vector2_array_operator_index,
    index_const = packed_vector2_array_operator_index_const,
    push_via = Vector2,
    push_hash = PUSH_VECTOR2_HASH,
);

impl_packed_array!(
    PackedVector3Array, Vector3, PackedVector3Array, "Vector3",
    ctor_default = packed_vector3_array_construct_default,
    ctor_copy = packed_vector3_array_construct_copy,
    dtor = packed_vector3_array_destroy,
    op_eq = packed_vector3_array_operator_equal,
    index = packed_vector3_array_operator_index,
    index_const = packed_vector3_array_operator_index_const,
    push_via = Vector3,
    push_hash = PUSH_VECTOR3_HASH,
);

impl_packed_array!(
    PackedVector4Array, Vector4, PackedVector4Array, "Vector4",
    ctor_default = packed_vector4_array_construct_default,
    ctor_copy = packed_vector4_array_construct_copy,
    dtor = packed_vector4_array_destroy,
    op_eq = packed_vector4_array_operator_equal,
    index = packed_vector4_array_operator_index,
    index_const = packed_vector4_array_operator_index_const,
    push_via = Vector4,
    push_hash = PUSH_VECTOR4_HASH,
);

impl_packed_array!(
    PackedColorArray, Color, PackedColorArray, "Color",
    ctor_default = packed_color_array_construct_default,
    ctor_copy = packed_color_array_construct_copy,
    dtor = packed_color_array_destroy,
    op_eq = packed_color_array_operator_equal,
    index = packed_color_array_operator_index,
    index_const = packed_color_array_operator_index_const,
    push_via = Color,
    push_hash = PUSH_COLOR_HASH,
);

// ----------------------------------------------------------------------------------------------------------------------------------------------
// PackedStringArray: elements are engine strings, no slice view.

impl_packed_array_base! {
    PackedStringArray, PackedStringArray, "string",
    ctor_copy = packed_string_array_construct_copy,
    traits = {
        Default => packed_string_array_construct_default;
        Clone => packed_string_array_construct_copy;
        Drop => packed_string_array_destroy;
        PartialEq => packed_string_array_operator_equal;
    },
}

impl_builtin_release!(PackedStringArray, OpaquePackedArray => packed_string_array_destroy);

impl PackedStringArray {
    /// Appends a copy of `value`.
    pub fn push(&mut self, value: &GString) {
        self.ensure_live();
        value.ensure_live();

        let mut appended = false;
        // SAFETY: push_back(String) writes a bool.
        unsafe {
            let method = builtin_method(
                VariantType::PackedStringArray,
                "push_back",
                PUSH_STRING_HASH,
            );
            let args = [value.abi_const()];
            method(self.abi_mut(), args.as_ptr(), appended.abi_mut(), 1);
        }
    }

    /// Returns a copy of the element at `index`.
    ///
    /// # Panics
    /// If `index` is out of bounds.
    pub fn get(&self, index: usize) -> GString {
        self.check_bounds(index);

        // SAFETY: bounds checked; the slot holds a live engine string to copy from.
        unsafe {
            let elem_ptr =
                sys::interface_fn!(packed_string_array_operator_index_const)(
                    self.abi_const(),
                    index as i64,
                );
            GString::from_abi_init(|self_ptr| {
                let ctor = sys::builtin_fn!(string_construct_copy);
                let args = [elem_ptr as sys::GDExtensionConstTypePtr];
                ctor(self_ptr, args.as_ptr());
            })
        }
    }

    /// Overwrites the element at `index` with a copy of `value`.
    ///
    /// # Panics
    /// If `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: &GString) {
        self.check_bounds(index);
        value.ensure_live();

        // SAFETY: the slot holds a live engine string; destroy it before copying in the new one.
        unsafe {
            let elem_ptr = sys::interface_fn!(packed_string_array_operator_index)(
                self.abi_mut(),
                index as i64,
            );
            let dtor = sys::builtin_fn!(string_destroy);
            dtor(elem_ptr as sys::GDExtensionTypePtr);

            let ctor = sys::builtin_fn!(string_construct_copy);
            let args = [value.abi_const()];
            ctor(elem_ptr as sys::GDExtensionUninitializedTypePtr, args.as_ptr());
        }
    }
}
