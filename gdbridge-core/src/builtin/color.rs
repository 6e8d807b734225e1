/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::sys;
use sys::GodotAbi;

/// RGBA color with `f32` components, matching the engine's layout.
#[derive(Copy, Clone, PartialEq, Debug)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);

    #[inline]
    pub const fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub fn lerp(self, to: Self, weight: f32) -> Self {
        let a = glam::Vec4::new(self.r, self.g, self.b, self.a);
        let b = glam::Vec4::new(to.r, to.g, to.b, to.a);
        let l = a.lerp(b, weight);
        Self::from_rgba(l.x, l.y, l.z, l.w)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_rgba(0.0, 0.0, 0.0, 1.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

// SAFETY: repr(C) struct of four f32 fields, matching the engine's 16-byte color slot.
unsafe impl GodotAbi for Color {
    fn variant_type() -> sys::VariantType {
        sys::VariantType::Color
    }

    sys::abi_methods! { type sys::GDExtensionTypePtr = *mut Self; .. }
}

impl_variant_conversions!(Color);

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn defaults_to_opaque_black() {
        let c = Color::default();
        assert_eq!(c, Color::from_rgba(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn lerp_midpoint() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert_eq!(mid, Color::from_rgba(0.5, 0.5, 0.5, 1.0));
    }
}
