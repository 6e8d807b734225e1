/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Vector types, laid out exactly as the engine's single-precision build expects.
//!
//! Math goes through `glam`; the public fields keep the engine's component names.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::sys;
use sys::GodotAbi;

macro_rules! impl_vector {
    (
        $Vector:ident, $GlamVec:ty, $variant:ident, ($($comp:ident),+)
    ) => {
        #[derive(Default, Copy, Clone, PartialEq, Debug)]
        #[repr(C)]
        pub struct $Vector {
            $( pub $comp: f32, )+
        }

        impl $Vector {
            pub const ZERO: Self = Self::splat(0.0);
            pub const ONE: Self = Self::splat(1.0);

            #[inline]
            pub const fn new($($comp: f32),+) -> Self {
                Self { $($comp),+ }
            }

            #[inline]
            pub const fn splat(v: f32) -> Self {
                Self { $($comp: v),+ }
            }

            #[inline]
            pub fn length(self) -> f32 {
                self.to_glam().length()
            }

            #[inline]
            pub fn length_squared(self) -> f32 {
                self.to_glam().length_squared()
            }

            #[inline]
            pub fn normalized(self) -> Self {
                Self::from_glam(self.to_glam().normalize())
            }

            #[inline]
            pub fn dot(self, with: Self) -> f32 {
                self.to_glam().dot(with.to_glam())
            }

            #[inline]
            pub fn lerp(self, to: Self, weight: f32) -> Self {
                Self::from_glam(self.to_glam().lerp(to.to_glam(), weight))
            }

            #[inline]
            pub fn to_glam(self) -> $GlamVec {
                <$GlamVec>::new($(self.$comp),+)
            }

            #[inline]
            pub fn from_glam(v: $GlamVec) -> Self {
                Self { $($comp: v.$comp),+ }
            }
        }

        impl From<$GlamVec> for $Vector {
            fn from(v: $GlamVec) -> Self {
                Self::from_glam(v)
            }
        }

        impl From<$Vector> for $GlamVec {
            fn from(v: $Vector) -> Self {
                v.to_glam()
            }
        }

        impl Add for $Vector {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self::from_glam(self.to_glam() + rhs.to_glam())
            }
        }

        impl AddAssign for $Vector {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl Sub for $Vector {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self::from_glam(self.to_glam() - rhs.to_glam())
            }
        }

        impl SubAssign for $Vector {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl Mul<f32> for $Vector {
            type Output = Self;
            fn mul(self, rhs: f32) -> Self {
                Self::from_glam(self.to_glam() * rhs)
            }
        }

        impl MulAssign<f32> for $Vector {
            fn mul_assign(&mut self, rhs: f32) {
                *self = *self * rhs;
            }
        }

        impl Neg for $Vector {
            type Output = Self;
            fn neg(self) -> Self {
                Self::from_glam(-self.to_glam())
            }
        }

        impl fmt::Display for $Vector {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "(")?;
                let mut first = true;
                $(
                    if !first { write!(f, ", ")?; }
                    first = false;
                    write!(f, "{}", self.$comp)?;
                )+
                let _ = first;
                write!(f, ")")
            }
        }

        // SAFETY: repr(C) struct of f32 fields, matching the engine's layout for this kind.
        unsafe impl GodotAbi for $Vector {
            fn variant_type() -> sys::VariantType {
                sys::VariantType::$variant
            }

            sys::abi_methods! { type sys::GDExtensionTypePtr = *mut Self; .. }
        }
    };
}

impl_vector!(Vector2, glam::Vec2, Vector2, (x, y));
impl_vector!(Vector3, glam::Vec3, Vector3, (x, y, z));
impl_vector!(Vector4, glam::Vec4, Vector4, (x, y, z, w));

impl_variant_conversions!(Vector2);
impl_variant_conversions!(Vector3);
impl_variant_conversions!(Vector4);

impl Vector3 {
    #[inline]
    pub fn cross(self, with: Self) -> Self {
        Self::from_glam(self.to_glam().cross(with.to_glam()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_arithmetic() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn glam_roundtrip() {
        let v = Vector2::new(3.0, 4.0);
        let g: glam::Vec2 = v.into();

        assert_eq!(g.length(), 5.0);
        assert_eq!(Vector2::from(g), v);
    }

    #[test]
    fn layout_matches_engine_slots() {
        assert_eq!(std::mem::size_of::<Vector2>(), 8);
        assert_eq!(std::mem::size_of::<Vector3>(), 12);
        assert_eq!(std::mem::size_of::<Vector4>(), 16);
    }
}
