/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::builtin::{GString, Variant};
use crate::meta::ConvertError;
use crate::obj::bounds::DynMemory;
use crate::obj::{Gd, GodotClass, InstanceId, RawGd};
use crate::sys;
use sys::{GodotAbi, VariantType};

/// Conversion into a [`Variant`].
pub trait ToVariant {
    fn to_variant(&self) -> Variant;
}

/// Fallible conversion out of a [`Variant`].
pub trait FromVariant: Sized {
    fn try_from_variant(variant: &Variant) -> Result<Self, ConvertError>;

    /// Infallible flavor; panics where [`try_from_variant`][Self::try_from_variant] would error.
    fn from_variant(variant: &Variant) -> Self {
        Self::try_from_variant(variant)
            .unwrap_or_else(|err| panic!("variant conversion failed: {err}"))
    }
}

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Scalars

impl_variant_conversions!(bool);
impl_variant_conversions!(i64);
impl_variant_conversions!(f64);

// Narrower numeric types travel through the engine's 8-byte int/float slots.
macro_rules! impl_variant_via_i64 {
    ( $( $T:ty ),* ) => {
        $(
            impl ToVariant for $T {
                fn to_variant(&self) -> Variant {
                    i64::from(*self).to_variant()
                }
            }

            impl FromVariant for $T {
                fn try_from_variant(variant: &Variant) -> Result<Self, ConvertError> {
                    let wide = i64::try_from_variant(variant)?;
                    <$T>::try_from(wide)
                        .map_err(|_| ConvertError::new(VariantType::Int, VariantType::Int))
                }
            }
        )*
    };
}

impl_variant_via_i64!(i8, i16, i32, u8, u16, u32);

impl ToVariant for f32 {
    fn to_variant(&self) -> Variant {
        f64::from(*self).to_variant()
    }
}

impl FromVariant for f32 {
    fn try_from_variant(variant: &Variant) -> Result<Self, ConvertError> {
        f64::try_from_variant(variant).map(|wide| wide as f32)
    }
}

impl ToVariant for () {
    fn to_variant(&self) -> Variant {
        Variant::nil()
    }
}

impl FromVariant for () {
    fn try_from_variant(variant: &Variant) -> Result<Self, ConvertError> {
        if variant.is_nil() {
            Ok(())
        } else {
            Err(ConvertError::new(variant.get_type(), VariantType::Nil))
        }
    }
}

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Strings

impl ToVariant for &str {
    fn to_variant(&self) -> Variant {
        GString::from(*self).to_variant()
    }
}

impl ToVariant for String {
    fn to_variant(&self) -> Variant {
        GString::from(self).to_variant()
    }
}

impl FromVariant for String {
    fn try_from_variant(variant: &Variant) -> Result<Self, ConvertError> {
        GString::try_from_variant(variant).map(|s| String::from(&s))
    }
}

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Identity and IDs

impl ToVariant for Variant {
    fn to_variant(&self) -> Variant {
        self.clone()
    }
}

impl FromVariant for Variant {
    fn try_from_variant(variant: &Variant) -> Result<Self, ConvertError> {
        Ok(variant.clone())
    }
}

impl ToVariant for InstanceId {
    fn to_variant(&self) -> Variant {
        self.to_i64().to_variant()
    }
}

impl FromVariant for InstanceId {
    fn try_from_variant(variant: &Variant) -> Result<Self, ConvertError> {
        let id = i64::try_from_variant(variant)?;
        Self::try_from_i64(id).ok_or(ConvertError::new(VariantType::Int, VariantType::Int))
    }
}

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Objects

impl<T: GodotClass> ToVariant for Gd<T> {
    fn to_variant(&self) -> Variant {
        // SAFETY: encoder for the object kind copies the pointer and takes the variant's own
        // reference where the class is ref-counted.
        unsafe {
            Variant::from_abi_init(|variant_ptr| {
                let converter = sys::lifecycle_table().variant_from_type(VariantType::Object);
                converter(
                    variant_ptr as sys::GDExtensionUninitializedVariantPtr,
                    self.raw().abi(),
                );
            })
        }
    }
}

impl<T: GodotClass> FromVariant for Gd<T> {
    fn try_from_variant(variant: &Variant) -> Result<Self, ConvertError> {
        let found = variant.get_type();
        let object_err = ConvertError::new(found, VariantType::Object);

        if found != VariantType::Object {
            return Err(object_err);
        }

        // SAFETY: kind checked; the decoder writes the object pointer without ref transfer.
        let untyped = unsafe {
            RawGd::<T>::from_abi_init(|type_ptr| {
                let converter = sys::lifecycle_table().variant_to_type(VariantType::Object);
                converter(
                    type_ptr as sys::GDExtensionUninitializedTypePtr,
                    variant.variant_sys(),
                );
            })
        };

        // Null, destroyed-behind-variant and wrong-class cases all fail the conversion.
        if untyped.is_null() || !untyped.is_instance_valid() {
            return Err(object_err);
        }
        let raw = untyped.ffi_cast::<T>().ok_or(object_err)?;

        T::DynMemory::maybe_inc_ref(&raw);
        Ok(Gd::from_raw(raw))
    }
}

impl<T: GodotClass> ToVariant for Option<Gd<T>> {
    fn to_variant(&self) -> Variant {
        match self {
            Some(gd) => gd.to_variant(),
            None => Variant::nil(),
        }
    }
}

impl<T: GodotClass> FromVariant for Option<Gd<T>> {
    fn try_from_variant(variant: &Variant) -> Result<Self, ConvertError> {
        if variant.is_nil() {
            Ok(None)
        } else {
            Gd::try_from_variant(variant).map(Some)
        }
    }
}
