/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Central type declarations: per-builtin opaque sizes and the variant kind/operator enums.
//!
//! Sizes correspond to a 64-bit, single-precision engine build; the engine documents per-type
//! slot sizes in its extension API description.

use crate::{GDExtensionVariantOperator, GDExtensionVariantType, GodotAbi};

pub mod types {
    pub type OpaqueNil = crate::opaque::Opaque<0usize>;
    pub type OpaqueBool = crate::opaque::Opaque<1usize>;
    pub type OpaqueInt = crate::opaque::Opaque<8usize>;
    pub type OpaqueFloat = crate::opaque::Opaque<8usize>;
    pub type OpaqueString = crate::opaque::Opaque<8usize>;
    pub type OpaqueVector2 = crate::opaque::Opaque<8usize>;
    pub type OpaqueVector3 = crate::opaque::Opaque<12usize>;
    pub type OpaqueVector4 = crate::opaque::Opaque<16usize>;
    pub type OpaqueColor = crate::opaque::Opaque<16usize>;
    pub type OpaqueStringName = crate::opaque::Opaque<8usize>;
    pub type OpaqueNodePath = crate::opaque::Opaque<8usize>;
    pub type OpaqueRid = crate::opaque::Opaque<8usize>;
    pub type OpaqueObject = crate::opaque::Opaque<8usize>;
    pub type OpaqueCallable = crate::opaque::Opaque<16usize>;
    pub type OpaqueSignal = crate::opaque::Opaque<16usize>;
    pub type OpaqueDictionary = crate::opaque::Opaque<8usize>;
    pub type OpaqueArray = crate::opaque::Opaque<8usize>;
    pub type OpaquePackedArray = crate::opaque::Opaque<16usize>;
    pub type OpaqueVariant = crate::opaque::Opaque<24usize>;
}

/// Kind tag of a [`Variant`](https://docs.godotengine.org/en/stable/classes/class_variant.html).
///
/// Enumerator ordinals must match `GDEXTENSION_VARIANT_TYPE_*` in the engine header.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(u32)]
pub enum VariantType {
    Nil = 0,
    Bool = 1,
    Int = 2,
    Float = 3,
    String = 4,
    Vector2 = 5,
    Vector2i = 6,
    Rect2 = 7,
    Rect2i = 8,
    Vector3 = 9,
    Vector3i = 10,
    Transform2D = 11,
    Vector4 = 12,
    Vector4i = 13,
    Plane = 14,
    Quaternion = 15,
    Aabb = 16,
    Basis = 17,
    Transform3D = 18,
    Projection = 19,
    Color = 20,
    StringName = 21,
    NodePath = 22,
    Rid = 23,
    Object = 24,
    Callable = 25,
    Signal = 26,
    Dictionary = 27,
    Array = 28,
    PackedByteArray = 29,
    PackedInt32Array = 30,
    PackedInt64Array = 31,
    PackedFloat32Array = 32,
    PackedFloat64Array = 33,
    PackedStringArray = 34,
    PackedVector2Array = 35,
    PackedVector3Array = 36,
    PackedColorArray = 37,
    PackedVector4Array = 38,
}

impl VariantType {
    /// Number of enumerators, including `Nil`.
    pub const COUNT: usize = 39;

    #[doc(hidden)]
    pub fn from_sys(enumerator: GDExtensionVariantType) -> Self {
        assert!(
            enumerator < Self::COUNT as GDExtensionVariantType,
            "invalid variant type {enumerator}"
        );

        // SAFETY: repr(u32) with contiguous ordinals 0..COUNT, checked above.
        unsafe { std::mem::transmute::<u32, VariantType>(enumerator) }
    }

    #[doc(hidden)]
    pub fn sys(self) -> GDExtensionVariantType {
        self as GDExtensionVariantType
    }
}

// SAFETY: passed as its 32-bit ordinal in ptrcalls that take a variant type directly.
unsafe impl GodotAbi for VariantType {
    fn variant_type() -> VariantType {
        VariantType::Int
    }

    crate::abi_methods! { type crate::GDExtensionTypePtr = *mut Self; .. }
}

/// Operator defined on variant operands, as understood by the engine's evaluator.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(u32)]
pub enum VariantOperator {
    Equal = 0,
    NotEqual = 1,
    Less = 2,
    LessEqual = 3,
    Greater = 4,
    GreaterEqual = 5,
    Add = 6,
    Subtract = 7,
    Multiply = 8,
    Divide = 9,
    Negate = 10,
    Positive = 11,
    Module = 12,
    Power = 13,
    ShiftLeft = 14,
    ShiftRight = 15,
    BitAnd = 16,
    BitOr = 17,
    BitXor = 18,
    BitNegate = 19,
    And = 20,
    Or = 21,
    Xor = 22,
    Not = 23,
    In = 24,
}

impl VariantOperator {
    #[doc(hidden)]
    pub fn sys(self) -> GDExtensionVariantOperator {
        self as GDExtensionVariantOperator
    }
}

#[cfg(test)]
mod tests {
    use super::VariantType;

    #[test]
    fn variant_type_roundtrip() {
        for ord in 0..VariantType::COUNT as u32 {
            let ty = VariantType::from_sys(ord);
            assert_eq!(ty.sys(), ord);
        }
    }

    #[test]
    #[should_panic]
    fn variant_type_out_of_range() {
        let _ = VariantType::from_sys(VariantType::COUNT as u32);
    }
}
