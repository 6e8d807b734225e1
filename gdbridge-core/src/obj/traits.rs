/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::builtin::GString;
use crate::init::InitLevel;
use crate::meta::ClassName;
use crate::obj::bounds::{self, Bounds};
use crate::sys;

/// Makes a type usable as a class in the engine's object hierarchy.
///
/// Implemented for all engine class bindings in [`crate::classes`], and by hand for user classes
/// registered through [`crate::registry::register_class`].
pub trait GodotClass: Bounds + 'static
where
    Self: Sized,
{
    /// The immediate superclass. `()` for the hierarchy root.
    type Base: GodotClass;

    /// Name under which the class is (or will be) known to the engine's class database.
    fn class_name() -> ClassName;

    /// Initialization level at which the class becomes available.
    const INIT_LEVEL: InitLevel = InitLevel::Scene;

    /// Whether `Self` is `U` or a transitive subclass of it.
    fn inherits_class<U: GodotClass>() -> bool {
        if Self::class_name() == U::class_name() {
            true
        } else if Self::Base::class_name().is_none() {
            false
        } else {
            Self::Base::inherits_class::<U>()
        }
    }
}

/// Terminator of the class hierarchy; base "class" of `Object`.
pub enum NoBase {}

impl GodotClass for NoBase {
    type Base = NoBase;

    fn class_name() -> ClassName {
        ClassName::none()
    }

    const INIT_LEVEL: InitLevel = InitLevel::Core; // arbitrary; never registered
}

unsafe impl Bounds for NoBase {
    type Memory = bounds::MemManual;
    type DynMemory = bounds::MemManual;
    type Declarer = bounds::DeclEngine;
}

/// Derived-to-base relationship in the class hierarchy, including the reflexive case.
///
/// Powers `Gd::upcast()` and argument passing of derived objects where a base is expected.
///
/// # Safety
/// May only be implemented when `Base` truly is a superclass of `Self` in the engine hierarchy,
/// so that reinterpreting the object pointer as `Base` is valid.
pub unsafe trait Inherits<Base: GodotClass>: GodotClass {}

unsafe impl<T: GodotClass> Inherits<T> for T {}

// ----------------------------------------------------------------------------------------------------------------------------------------------

/// Capability traits. Separated from [`GodotClass`] so the registration machinery can require
/// exactly the abilities it wires up.
pub mod cap {
    use super::*;
    use crate::obj::Base;

    /// Class that can be constructed by the engine (scene instantiation, `ClassDB` construction).
    pub trait GodotDefault: GodotClass + Bounds<Declarer = bounds::DeclUser> {
        #[doc(hidden)]
        fn __godot_user_init(base: Base<Self::Base>) -> Self;
    }
}

/// Overridable engine entry points of a user class.
///
/// All methods have no-op defaults; override the ones the class cares about. The engine resolves
/// them by name at class registration: an override is found through [`Self::__virtual_call`],
/// everything else falls through to the engine default.
#[allow(unused_variables)]
pub trait GodotHooks: GodotClass + Bounds<Declarer = bounds::DeclUser> {
    /// Called when the node and its children have entered the scene tree.
    fn ready(&mut self) {}

    /// Called every frame with the elapsed time since the previous frame.
    fn process(&mut self, delta: f64) {}

    /// Engine notification (see the engine's `NOTIFICATION_*` constants).
    fn on_notification(&mut self, what: i32) {}

    /// String representation, used by the engine's print functions.
    fn to_godot_string(&self) -> GString {
        GString::from(Self::class_name().as_str())
    }

    #[doc(hidden)]
    fn __virtual_call(name: &str) -> sys::GDExtensionClassCallVirtual {
        crate::registry::callbacks::default_virtual_dispatch::<Self>(name)
    }
}
