/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Bindings for the engine classes the bridge exposes.
//!
//! Each binding is a `repr(transparent)` wrapper over its own [`RawGd`][crate::obj::RawGd];
//! dereferencing to a superclass view is a pointer reinterpretation, no engine round trip.
//! Methods resolve their bind lazily through [`table`] and dispatch via
//! [`crate::meta::signature`].

// Declares the class struct, its hierarchy traits and its management bounds.
macro_rules! engine_class {
    (
        $(#[$attr:meta])*
        $Class:ident,
        base: $Base:ty,
        name: $name:literal,
        memory: $Memory:ty,
        dyn_memory: $DynMemory:ty $(,)?
    ) => {
        $(#[$attr])*
        #[repr(transparent)]
        pub struct $Class {
            raw: crate::obj::RawGd<$Class>,
        }

        impl $Class {
            /// Strong handle to this instance, usable beyond the borrow.
            pub fn to_gd(&self) -> crate::obj::Gd<$Class> {
                use crate::obj::bounds::DynMemory as _;

                <$Class as crate::obj::Bounds>::DynMemory::maybe_inc_ref(&self.raw);
                crate::obj::Gd::from_raw(self.raw.clone())
            }
        }

        impl crate::obj::GodotClass for $Class {
            type Base = $Base;

            fn class_name() -> crate::meta::ClassName {
                crate::meta::ClassName::new($name)
            }
        }

        // SAFETY: management kinds match the engine's declaration of this class.
        unsafe impl crate::obj::Bounds for $Class {
            type Memory = $Memory;
            type DynMemory = $DynMemory;
            type Declarer = crate::obj::bounds::DeclEngine;
        }
    };
}

// Zero-cost superclass view: same layout, reinterpreted pointer.
macro_rules! class_deref {
    ($Class:ident => $Target:ty) => {
        impl std::ops::Deref for $Class {
            type Target = $Target;

            fn deref(&self) -> &Self::Target {
                // SAFETY: all class bindings share the RawGd layout.
                unsafe { &*(self as *const $Class as *const Self::Target) }
            }
        }

        impl std::ops::DerefMut for $Class {
            fn deref_mut(&mut self) -> &mut Self::Target {
                // SAFETY: as in Deref.
                unsafe { &mut *(self as *mut $Class as *mut Self::Target) }
            }
        }
    };
}

mod node;
mod node3d;
mod object;
mod ref_counted;
mod resource;

pub(crate) mod table;

pub use node::Node;
pub use node3d::Node3D;
pub use object::Object;
pub use ref_counted::RefCounted;
pub use resource::Resource;

use crate::obj::{Gd, GodotClass};
use crate::sys;

/// Fetches an engine singleton by its class name.
///
/// # Panics
/// If no singleton of that name exists (wrong class, or the owning initialization level has not
/// been reached yet).
pub fn singleton<T: GodotClass>() -> Gd<T> {
    let name = T::class_name().to_string_name();

    // SAFETY: lookup by name; singletons are engine-owned and outlive the extension.
    let object_ptr =
        unsafe { sys::interface_fn!(global_get_singleton)(name.string_name_sys_const()) };

    assert!(
        !object_ptr.is_null(),
        "singleton {} not found",
        T::class_name()
    );

    // SAFETY: live engine object of the requested class.
    unsafe { Gd::from_obj_sys_inc(object_ptr) }
}
