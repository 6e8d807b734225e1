/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Variant lifecycle function table, resolved once at initialization.
//!
//! The engine hands out per-kind encoder/decoder functions (variant <-> concrete type) through
//! `get_variant_from_type_constructor` / `get_variant_to_type_constructor`. They are queried
//! eagerly for every kind here, so later calls never pay the lookup.

use crate::{
    GDExtensionInterface, GDExtensionTypeFromVariantConstructorFunc,
    GDExtensionVariantFromTypeConstructorFunc, VariantType,
};

type FromTypeFn = unsafe extern "C" fn(crate::GDExtensionUninitializedVariantPtr, crate::GDExtensionTypePtr);
type ToTypeFn = unsafe extern "C" fn(crate::GDExtensionUninitializedTypePtr, crate::GDExtensionVariantPtr);

pub struct BuiltinLifecycleTable {
    // Index 0 (Nil) stays None; the engine has no encoder for it.
    from_type: [GDExtensionVariantFromTypeConstructorFunc; VariantType::COUNT],
    to_type: [GDExtensionTypeFromVariantConstructorFunc; VariantType::COUNT],
}

impl BuiltinLifecycleTable {
    /// # Safety
    /// `interface` must be fully loaded.
    pub(crate) unsafe fn load(interface: &GDExtensionInterface) -> Self {
        let get_from = interface
            .get_variant_from_type_constructor
            .expect("get_variant_from_type_constructor not loaded");
        let get_to = interface
            .get_variant_to_type_constructor
            .expect("get_variant_to_type_constructor not loaded");

        let mut from_type: [GDExtensionVariantFromTypeConstructorFunc; VariantType::COUNT] =
            [None; VariantType::COUNT];
        let mut to_type: [GDExtensionTypeFromVariantConstructorFunc; VariantType::COUNT] =
            [None; VariantType::COUNT];

        for ord in 1..VariantType::COUNT as u32 {
            from_type[ord as usize] = get_from(ord);
            to_type[ord as usize] = get_to(ord);

            assert!(
                from_type[ord as usize].is_some() && to_type[ord as usize].is_some(),
                "engine did not supply variant converters for kind {ord}"
            );
        }

        Self { from_type, to_type }
    }

    /// Encoder writing a concrete value of kind `ty` into an uninitialized variant slot.
    ///
    /// # Panics
    /// For [`VariantType::Nil`]; nil variants are created via `variant_new_nil`.
    #[inline]
    pub fn variant_from_type(&self, ty: VariantType) -> FromTypeFn {
        self.from_type[ty as usize]
            .unwrap_or_else(|| panic!("no variant encoder for kind {ty:?}"))
    }

    /// Decoder writing the payload of a variant of kind `ty` into an uninitialized type slot.
    ///
    /// # Panics
    /// For [`VariantType::Nil`].
    #[inline]
    pub fn variant_to_type(&self, ty: VariantType) -> ToTypeFn {
        self.to_type[ty as usize]
            .unwrap_or_else(|| panic!("no variant decoder for kind {ty:?}"))
    }
}
