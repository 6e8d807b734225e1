/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::sys;
use sys::GodotAbi;

/// Resource ID handed out by the engine's low-level servers.
///
/// A plain 64-bit handle; it does not own anything and performs no bookkeeping. Zero is the
/// invalid RID, which is also the default.
#[derive(Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct Rid {
    id: u64,
}

impl Rid {
    /// The invalid RID, compared against by server APIs to signal absence.
    pub const INVALID: Self = Self { id: 0 };

    /// Wraps a raw ID as received from a server API.
    pub const fn new(id: u64) -> Self {
        Self { id }
    }

    pub const fn to_u64(self) -> u64 {
        self.id
    }

    pub const fn is_valid(self) -> bool {
        self.id != 0
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RID({})", self.id)
    }
}

// SAFETY: repr(transparent) over u64, the engine's RID slot layout.
unsafe impl GodotAbi for Rid {
    fn variant_type() -> sys::VariantType {
        sys::VariantType::Rid
    }

    sys::abi_methods! { type sys::GDExtensionTypePtr = *mut Self; .. }
}

impl_variant_conversions!(Rid);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_invalid() {
        assert_eq!(Rid::default(), Rid::INVALID);
        assert!(!Rid::INVALID.is_valid());
    }

    #[test]
    fn nonzero_is_valid() {
        let rid = Rid::new(42);
        assert!(rid.is_valid());
        assert_eq!(rid.to_u64(), 42);
        assert_eq!(rid.to_string(), "RID(42)");
    }
}
