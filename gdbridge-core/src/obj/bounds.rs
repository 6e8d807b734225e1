/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Compile-time bounds describing how a class is managed and where it is declared.
//!
//! Every class carries three markers: its [`Memory`] (ref-counted or manual), its [`DynMemory`]
//! (the runtime dispatch strategy for reference bookkeeping) and its [`Declarer`] (engine-provided
//! or declared by this library's user). Smart pointers branch on these instead of runtime flags.

use crate::obj::{Gd, GodotClass, RawGd};
use crate::{classes, out, sys};

/// Implemented for every class, providing its management bounds.
///
/// # Safety
/// The associated types must truthfully describe the class: claiming `MemManual` for a
/// ref-counted class (or vice versa) breaks reference bookkeeping.
pub unsafe trait Bounds {
    /// Statically known memory management.
    type Memory: Memory;

    /// Memory management dispatched at runtime where the static kind is not known (`Object`
    /// itself can hold both kinds).
    type DynMemory: DynMemory;

    /// Who declared the class.
    type Declarer: Declarer;
}

use private::Sealed;
mod private {
    pub trait Sealed {}

    impl Sealed for super::MemRefCounted {}
    impl Sealed for super::MemDynamic {}
    impl Sealed for super::MemManual {}
    impl Sealed for super::DeclEngine {}
    impl Sealed for super::DeclUser {}
}

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Memory bounds

/// Static marker for memory management. See [`MemRefCounted`] and [`MemManual`].
pub trait Memory: Sealed {
    #[doc(hidden)]
    const IS_REF_COUNTED: bool;
}

/// Runtime reference bookkeeping.
pub trait DynMemory: Sealed {
    /// Initializes the reference count for a freshly constructed instance.
    fn maybe_init_ref<T: GodotClass>(obj: &RawGd<T>);

    /// Increments the reference count, if the instance is ref-counted.
    fn maybe_inc_ref<T: GodotClass>(obj: &RawGd<T>);

    /// Decrements the reference count, if the instance is ref-counted.
    ///
    /// Returns `true` if this was the last reference and the object should be destroyed.
    ///
    /// # Safety
    /// The instance must be alive, and the caller must own the reference being released.
    unsafe fn maybe_dec_ref<T: GodotClass>(obj: &RawGd<T>) -> bool;

    /// `Some(is_ref_counted)` if statically known, `None` if it depends on the instance.
    fn is_ref_counted<T: GodotClass>(obj: &RawGd<T>) -> Option<bool>;

    /// Whether object values of this kind travel as `Ref<T>*` in the given pointer-call flavor.
    fn pass_as_ref(_kind: sys::PtrcallKind) -> bool {
        false
    }
}

/// Ref-counted class (inherits the engine's ref-counted base).
pub enum MemRefCounted {}

impl Memory for MemRefCounted {
    const IS_REF_COUNTED: bool = true;
}

impl DynMemory for MemRefCounted {
    fn maybe_init_ref<T: GodotClass>(obj: &RawGd<T>) {
        out!("  MemRefc::init  <{}>", std::any::type_name::<T>());

        let success = obj.with_ref_counted(|refc| refc.init_ref());
        assert!(success, "init_ref() failed");
    }

    fn maybe_inc_ref<T: GodotClass>(obj: &RawGd<T>) {
        out!("  MemRefc::inc   <{}>", std::any::type_name::<T>());

        let success = obj.with_ref_counted(|refc| refc.reference());
        assert!(success, "reference() failed");
    }

    unsafe fn maybe_dec_ref<T: GodotClass>(obj: &RawGd<T>) -> bool {
        out!("  MemRefc::dec   <{}>", std::any::type_name::<T>());

        obj.with_ref_counted(|refc| refc.unreference())
    }

    fn is_ref_counted<T: GodotClass>(_obj: &RawGd<T>) -> Option<bool> {
        Some(true)
    }

    fn pass_as_ref(kind: sys::PtrcallKind) -> bool {
        kind == sys::PtrcallKind::Virtual
    }
}

/// Memory management determined per instance; used for `Object`, which can hold either kind.
pub enum MemDynamic {}

impl DynMemory for MemDynamic {
    fn maybe_init_ref<T: GodotClass>(obj: &RawGd<T>) {
        if Self::instance_is_ref_counted(obj) {
            MemRefCounted::maybe_init_ref(obj);
        }
    }

    fn maybe_inc_ref<T: GodotClass>(obj: &RawGd<T>) {
        if Self::instance_is_ref_counted(obj) {
            MemRefCounted::maybe_inc_ref(obj);
        }
    }

    unsafe fn maybe_dec_ref<T: GodotClass>(obj: &RawGd<T>) -> bool {
        if Self::instance_is_ref_counted(obj) {
            MemRefCounted::maybe_dec_ref(obj)
        } else {
            false
        }
    }

    fn is_ref_counted<T: GodotClass>(obj: &RawGd<T>) -> Option<bool> {
        if obj.is_null() {
            None
        } else {
            Some(Self::instance_is_ref_counted(obj))
        }
    }
}

impl MemDynamic {
    // Bit 63 of the instance ID encodes the kind; works even for dead instances.
    fn instance_is_ref_counted<T: GodotClass>(obj: &RawGd<T>) -> bool {
        obj.instance_id_unchecked()
            .is_some_and(|id| id.is_ref_counted())
    }
}

/// Manually managed class; the user is responsible for an eventual `free()`.
pub enum MemManual {}

impl Memory for MemManual {
    const IS_REF_COUNTED: bool = false;
}

impl DynMemory for MemManual {
    fn maybe_init_ref<T: GodotClass>(_obj: &RawGd<T>) {}

    fn maybe_inc_ref<T: GodotClass>(_obj: &RawGd<T>) {}

    unsafe fn maybe_dec_ref<T: GodotClass>(_obj: &RawGd<T>) -> bool {
        false
    }

    fn is_ref_counted<T: GodotClass>(_obj: &RawGd<T>) -> Option<bool> {
        Some(false)
    }
}

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Declarer bounds

/// Who declared a class: the engine or the user of this library.
pub trait Declarer: Sealed {
    /// The type smart pointers dereference to: the class itself for engine classes, the base
    /// view for user classes.
    type DerefTarget<T: GodotClass>: GodotClass;

    #[doc(hidden)]
    fn create_gd<T>() -> Gd<T>
    where
        T: GodotClass + Bounds<Declarer = Self>;
}

/// Class provided by the engine's class database.
pub enum DeclEngine {}

impl Declarer for DeclEngine {
    type DerefTarget<T: GodotClass> = T;

    fn create_gd<T>() -> Gd<T>
    where
        T: GodotClass + Bounds<Declarer = Self>,
    {
        unsafe {
            let object_ptr = sys::interface_fn!(classdb_construct_object)(
                T::class_name().to_string_name().string_name_sys_const(),
            );
            Gd::from_obj_sys(object_ptr)
        }
    }
}

/// Class declared by the user and registered with the engine at initialization.
pub enum DeclUser {}

impl Declarer for DeclUser {
    type DerefTarget<T: GodotClass> = T::Base;

    fn create_gd<T>() -> Gd<T>
    where
        T: GodotClass + Bounds<Declarer = Self>,
    {
        // Registered extension classes route through the library's create callback, which
        // builds the instance storage and runs the user's constructor.
        unsafe {
            let object_ptr = sys::interface_fn!(classdb_construct_object)(
                T::class_name().to_string_name().string_name_sys_const(),
            );
            Gd::from_obj_sys(object_ptr)
        }
    }
}

// ----------------------------------------------------------------------------------------------------------------------------------------------

impl<T: GodotClass> RawGd<T> {
    /// Runs `apply` on a ref-counted view of this object.
    ///
    /// Panics if the object does not inherit the ref-counted base.
    pub(crate) fn with_ref_counted<R>(
        &self,
        apply: impl FnOnce(&mut classes::RefCounted) -> R,
    ) -> R {
        debug_assert!(!self.is_null(), "refcount operation on null object");

        // Weak view; no Drop bookkeeping on RawGd, so no balancing needed.
        let mut view = unsafe { RawGd::<classes::RefCounted>::from_obj_sys_weak(self.obj_sys()) };
        apply(view.as_target_mut())
    }
}
