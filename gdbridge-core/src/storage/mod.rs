/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Backing storage for Rust-defined class instances.
//!
//! The engine object holds one opaque instance pointer per extension; for this bridge it points
//! to an [`InstanceStorage`]. The storage owns the user struct and the weak handle to the base
//! object, and tracks how many references the engine itself holds on ref-counted instances.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::obj::{Base, GodotClass};
use crate::sys;

pub struct InstanceStorage<T: GodotClass> {
    user_instance: RwLock<T>,
    base: Base<T::Base>,
    // References the engine holds on this instance (ref-counted classes only).
    godot_ref_count: AtomicU32,
}

impl<T: GodotClass> InstanceStorage<T> {
    pub fn construct(user_instance: T, base: Base<T::Base>) -> Self {
        Self {
            user_instance: RwLock::new(user_instance),
            base,
            godot_ref_count: AtomicU32::new(1),
        }
    }

    /// Moves the storage to the heap and leaks it; ownership passes to the engine object, which
    /// hands the pointer back in every callback until the free callback reclaims it.
    pub fn into_raw(self) -> *mut Self {
        Box::into_raw(Box::new(self))
    }

    /// Shared borrow of the user instance.
    ///
    /// # Panics
    /// If the instance is currently bound mutably. Virtual dispatch can re-enter the same
    /// object; a shared/exclusive conflict is a bug in the user class, reported by class name.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.user_instance.try_read().unwrap_or_else(|_| {
            panic!(
                "cannot borrow {}: instance is already bound mutably",
                T::class_name()
            )
        })
    }

    /// Exclusive borrow of the user instance.
    ///
    /// # Panics
    /// If the instance is currently bound in any way.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.user_instance.try_write().unwrap_or_else(|_| {
            panic!(
                "cannot borrow {} mutably: instance is already bound",
                T::class_name()
            )
        })
    }

    /// The weak handle to the engine-side base object.
    pub fn base(&self) -> &Base<T::Base> {
        &self.base
    }

    pub(crate) fn on_inc_ref(&self) {
        let refc = self.godot_ref_count.fetch_add(1, Ordering::Relaxed) + 1;
        sys::out!(
            "    Storage::on_inc_ref (rc={refc})  <{}>",
            T::class_name()
        );
    }

    pub(crate) fn on_dec_ref(&self) {
        let refc = self.godot_ref_count.fetch_sub(1, Ordering::Relaxed) - 1;
        sys::out!(
            "    Storage::on_dec_ref (rc={refc})  <{}>",
            T::class_name()
        );
    }

    pub(crate) fn godot_ref_count(&self) -> u32 {
        self.godot_ref_count.load(Ordering::Relaxed)
    }
}

/// Interprets an engine-provided instance pointer as a storage reference.
///
/// # Safety relies on the registration invariant
/// The pointer must originate from this extension's create callback for class `T` and the free
/// callback must not have run yet. Both are guaranteed by the engine for instance pointers it
/// passes into class callbacks.
pub fn as_storage<'a, T: GodotClass>(
    instance_ptr: sys::GDExtensionClassInstancePtr,
) -> &'a InstanceStorage<T> {
    debug_assert!(!instance_ptr.is_null());

    // SAFETY: see above.
    unsafe { &*(instance_ptr as *mut InstanceStorage<T>) }
}

/// Reclaims and drops the storage. Called exactly once, from the free callback.
///
/// # Safety
/// `instance_ptr` must be the pointer produced by [`InstanceStorage::into_raw`] for class `T`,
/// and no borrow of the storage may be live.
pub unsafe fn destroy_storage<T: GodotClass>(instance_ptr: sys::GDExtensionClassInstancePtr) {
    drop(Box::from_raw(instance_ptr as *mut InstanceStorage<T>));
}

/// Instance-binding callbacks that do nothing. The engine retains the pointer, so this must be
/// a static.
///
/// The bridge keeps its per-instance state in [`InstanceStorage`]; the binding slot only serves
/// to tell the engine this extension knows the object.
pub(crate) static NOP_INSTANCE_CALLBACKS: sys::GDExtensionInstanceBindingCallbacks =
    sys::GDExtensionInstanceBindingCallbacks {
        create_callback: None,
        free_callback: None,
        reference_callback: None,
    };
