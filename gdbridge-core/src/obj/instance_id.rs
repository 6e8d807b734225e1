/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;
use std::num::NonZeroU64;

use crate::registry::handles;

/// Unique identifier of an engine object instance.
///
/// Stable for the lifetime of the object and never reused afterwards, unlike the object's
/// address. This makes it the right key for weak references: resolving an ID either yields the
/// live object or nothing, never a dangling pointer.
///
/// The engine encodes whether the instance is ref-counted in bit 63 of the ID.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct InstanceId {
    // Paradoxically, a value of 0 is used for `Option<InstanceId>::None` in the engine.
    value: NonZeroU64,
}

impl InstanceId {
    /// Constructs from an engine-provided `i64`, returning `None` for the sentinel 0.
    pub fn try_from_i64(id: i64) -> Option<Self> {
        Self::try_from_u64(id as u64)
    }

    pub(crate) fn try_from_u64(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(|value| Self { value })
    }

    pub(crate) fn from_nonzero(value: NonZeroU64) -> Self {
        Self { value }
    }

    pub fn to_i64(self) -> i64 {
        self.value.get() as i64
    }

    pub(crate) fn to_u64(self) -> u64 {
        self.value.get()
    }

    /// Whether the object this ID refers to inherits the ref-counted base class.
    ///
    /// Works purely on the ID; the instance does not need to be alive.
    pub fn is_ref_counted(self) -> bool {
        self.value.get() & (1u64 << 63) != 0
    }

    /// Checks with the engine whether the instance is still alive.
    pub fn lookup_validity(self) -> bool {
        handles::lookup_object(self).is_some()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceId({})", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::InstanceId;

    #[test]
    fn zero_is_none() {
        assert_eq!(InstanceId::try_from_i64(0), None);
    }

    #[test]
    fn roundtrip_i64() {
        let id = InstanceId::try_from_i64(0x1234_5678).unwrap();
        assert_eq!(id.to_i64(), 0x1234_5678);
        assert!(!id.is_ref_counted());
    }

    #[test]
    fn ref_counted_bit() {
        let id = InstanceId::try_from_u64((1u64 << 63) | 42).unwrap();
        assert!(id.is_ref_counted());
        assert_eq!(id.to_u64() & !(1u64 << 63), 42);
    }
}
