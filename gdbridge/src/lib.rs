/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Rust object bridge for the Godot engine, on top of the GDExtension ABI.
//!
//! Most users only need the [`prelude`]. The module structure mirrors the internal crate:
//! [`builtin`] for value types, [`obj`] for object smart pointers, [`classes`] for engine class
//! bindings, [`registry`] for registering Rust classes, [`init`] for the extension entry point.

pub use gdbridge_core::{builtin, classes, init, log, meta, obj, registry};

pub use gdbridge_core::sys;

pub use gdbridge_core::{entry_point, godot_error, godot_warn};

#[doc(hidden)]
pub mod private {
    pub use gdbridge_core::private::*;
}

/// The commonly needed surface, for glob import.
pub mod prelude {
    pub use super::builtin::{
        Callable, Color, Dictionary, FromVariant, GString, NodePath, PackedByteArray,
        PackedFloat32Array, PackedInt32Array, PackedStringArray, Rid, Signal, StringName, ToVariant,
        TypedArray, Variant, VariantArray, Vector2, Vector3, Vector4,
    };
    pub use super::classes::{Node, Node3D, Object, RefCounted, Resource};
    pub use super::init::{ExtensionLibrary, InitLevel};
    pub use super::obj::{cap::GodotDefault, Base, Gd, GodotClass, GodotHooks, Inherits, InstanceId};
    pub use super::registry::register_class;
    pub use super::{entry_point, godot_error, godot_warn};
}
