/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::builtin::StringName;

/// Name of a class registered in the engine's class database.
///
/// Cheap to copy and compare; the engine-facing `StringName` is constructed at the boundary
/// crossing, without internal caching.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ClassName {
    name: &'static str,
}

impl ClassName {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Sentinel for the root of the hierarchy (the base "class" of `Object`).
    pub const fn none() -> Self {
        Self { name: "" }
    }

    pub fn is_none(&self) -> bool {
        self.name.is_empty()
    }

    pub fn as_str(&self) -> &'static str {
        self.name
    }

    /// Engine-facing name. Requires an initialized engine binding.
    pub fn to_string_name(&self) -> StringName {
        StringName::from(self.name)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::ClassName;

    #[test]
    fn class_name_identity() {
        let a = ClassName::new("Node3D");
        let b = ClassName::new("Node3D");
        let c = ClassName::new("Node");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str(), "Node3D");
        assert!(!a.is_none());
        assert!(ClassName::none().is_none());
    }
}
