/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::obj::bounds::{Bounds, Declarer, DynMemory};
use crate::obj::{finalize, GodotClass, Inherits, InstanceId, RawGd};
use crate::registry::handles;
use crate::sys;
use sys::{GodotAbi, PtrcallKind};

/// Smart pointer to an engine object, holding one strong reference for ref-counted classes.
///
/// For manually managed classes it behaves like a raw handle: dropping it does nothing, and the
/// object stays alive until [`free()`][Self::free] (or the engine destroys it).
///
/// Never null; absence of an object is expressed as `Option<Gd<T>>`.
pub struct Gd<T: GodotClass> {
    raw: RawGd<T>,
}

impl<T: GodotClass> Gd<T> {
    /// Constructs a fresh instance of `T` through the engine.
    ///
    /// For ref-counted classes the returned pointer holds the single initial reference; for
    /// manually managed classes the caller is responsible for an eventual [`free()`][Self::free].
    pub fn new_alloc() -> Self {
        <T::Declarer as Declarer>::create_gd::<T>()
    }

    /// Resolves an instance ID, taking a new strong reference if the instance is alive and is
    /// (or inherits) `T`.
    pub fn try_from_instance_id(instance_id: InstanceId) -> Option<Self> {
        let object_ptr = handles::lookup_object(instance_id)?;

        // SAFETY: just resolved to a live object; class identity is checked by the cast.
        let untyped = unsafe { RawGd::<T>::from_obj_sys_weak(object_ptr) };
        let raw = untyped.ffi_cast::<T>()?;

        if raw.is_null() {
            return None;
        }

        T::DynMemory::maybe_inc_ref(&raw);
        Some(Self { raw })
    }

    /// Wraps a fresh or returned engine pointer, initializing the reference count.
    ///
    /// # Safety
    /// `object_ptr` must point to a live object of (a subclass of) `T`, with an unclaimed
    /// reference if the class is ref-counted.
    pub(crate) unsafe fn from_obj_sys(object_ptr: sys::GDExtensionObjectPtr) -> Self {
        let raw = RawGd::from_obj_sys_weak(object_ptr);
        assert!(!raw.is_null(), "null object pointer; expected an instance");

        T::DynMemory::maybe_init_ref(&raw);
        Self { raw }
    }

    /// Wraps an engine pointer to an existing object, taking an additional strong reference.
    ///
    /// # Safety
    /// `object_ptr` must point to a live object of (a subclass of) `T`.
    pub(crate) unsafe fn from_obj_sys_inc(object_ptr: sys::GDExtensionObjectPtr) -> Self {
        let raw = RawGd::from_obj_sys_weak(object_ptr);
        assert!(!raw.is_null(), "null object pointer; expected an instance");

        T::DynMemory::maybe_inc_ref(&raw);
        Self { raw }
    }

    /// Wraps an engine pointer whose reference is transferred to this pointer as-is.
    ///
    /// # Safety
    /// `object_ptr` must point to a live object; for ref-counted classes, the caller's reference
    /// is taken over and must not be released again.
    pub(crate) unsafe fn from_obj_sys_weak(object_ptr: sys::GDExtensionObjectPtr) -> Self {
        let raw = RawGd::from_obj_sys_weak(object_ptr);
        assert!(!raw.is_null(), "null object pointer; expected an instance");

        Self { raw }
    }

    pub(crate) fn from_raw(raw: RawGd<T>) -> Self {
        debug_assert!(!raw.is_null());
        Self { raw }
    }

    /// Instance ID of the object.
    ///
    /// Stays meaningful after destruction: it can be fed to
    /// [`try_from_instance_id()`][Self::try_from_instance_id], which then returns `None`.
    pub fn instance_id(&self) -> InstanceId {
        self.raw
            .instance_id_unchecked()
            .unwrap_or_else(|| unreachable!("non-null object without instance ID"))
    }

    /// Whether the engine instance is still alive.
    ///
    /// Always true for ref-counted classes (this pointer keeps the object alive); manually
    /// managed objects may have been destroyed behind this handle's back.
    pub fn is_instance_valid(&self) -> bool {
        self.raw.is_instance_valid()
    }

    pub(crate) fn raw(&self) -> &RawGd<T> {
        &self.raw
    }

    pub(crate) fn obj_sys(&self) -> sys::GDExtensionObjectPtr {
        self.raw.obj_sys()
    }

    /// Converts to a superclass pointer. Free of engine calls.
    pub fn upcast<Base>(self) -> Gd<Base>
    where
        Base: GodotClass,
        T: Inherits<Base>,
    {
        // SAFETY: Inherits guarantees the instance is a Base; the strong reference moves over.
        let raw = unsafe { self.raw.clone().cast_unchecked::<Base>() };
        std::mem::forget(self);
        Gd { raw }
    }

    /// Attempts a downcast (or sideways cast), returning the original pointer on failure.
    pub fn try_cast<U: GodotClass>(self) -> Result<Gd<U>, Self> {
        match self.raw.ffi_cast::<U>() {
            Some(raw) => {
                // Reference moves to the new pointer.
                std::mem::forget(self);
                Ok(Gd { raw })
            }
            None => Err(self),
        }
    }

    /// Downcast that panics on failure. See [`try_cast()`][Self::try_cast].
    pub fn cast<U: GodotClass>(self) -> Gd<U> {
        self.try_cast().unwrap_or_else(|from| {
            panic!(
                "cannot cast object of class {} to {}",
                from.dynamic_class_string(),
                U::class_name()
            )
        })
    }

    /// Destroys the engine object now.
    ///
    /// # Panics
    /// If the instance is ref-counted (its lifetime is governed by reference counts, not by
    /// explicit destruction), or if it was already destroyed.
    pub fn free(self) {
        assert!(
            !matches!(T::DynMemory::is_ref_counted(&self.raw), Some(true)),
            "free() called on ref-counted object of class {}",
            T::class_name()
        );
        assert!(
            self.is_instance_valid(),
            "free() called on dead object of class {}",
            T::class_name()
        );

        let instance_id = self.instance_id();

        // SAFETY: instance checked alive, not ref-counted.
        unsafe { sys::interface_fn!(object_destroy)(self.raw.obj_sys()) };
        handles::unregister_object(instance_id);
        std::mem::forget(self);
    }

    fn dynamic_class_string(&self) -> String {
        // Best-effort for diagnostics; falls back to the static name.
        T::class_name().to_string()
    }
}

impl<T: GodotClass> Deref for Gd<T> {
    type Target = <T::Declarer as Declarer>::DerefTarget<T>;

    fn deref(&self) -> &Self::Target {
        self.raw.as_target()
    }
}

impl<T: GodotClass> DerefMut for Gd<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.raw.as_target_mut()
    }
}

impl<T: GodotClass> Clone for Gd<T> {
    fn clone(&self) -> Self {
        T::DynMemory::maybe_inc_ref(&self.raw);
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<T: GodotClass> Drop for Gd<T> {
    fn drop(&mut self) {
        // Manual objects: dropping the handle does not affect the object.
        if let Some(false) = T::DynMemory::is_ref_counted(&self.raw) {
            return;
        }

        let Some(instance_id) = self.raw.instance_id_unchecked() else {
            return;
        };
        let ptr_bits = self.raw.obj_sys() as usize;

        if sys::is_main_thread() {
            release_now::<T>(ptr_bits, instance_id);
        } else {
            // Engine-side destruction is main-thread territory; hand the release over.
            finalize::enqueue(Box::new(move || release_now::<T>(ptr_bits, instance_id)));
        }
    }
}

fn release_now<T: GodotClass>(ptr_bits: usize, instance_id: InstanceId) {
    // SAFETY: the dropped pointer held a strong reference, keeping the object alive until here.
    let raw =
        unsafe { RawGd::<T>::from_obj_sys_weak(ptr_bits as sys::GDExtensionObjectPtr) };

    let is_last = unsafe { T::DynMemory::maybe_dec_ref(&raw) };
    if is_last {
        unsafe { sys::interface_fn!(object_destroy)(raw.obj_sys()) };
        handles::unregister_object(instance_id);
    }
}

impl<T: GodotClass> PartialEq for Gd<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw.instance_id_unchecked() == other.raw.instance_id_unchecked()
    }
}

impl<T: GodotClass> Eq for Gd<T> {}

impl<T: GodotClass> std::hash::Hash for Gd<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.instance_id_unchecked().hash(state);
    }
}

impl<T: GodotClass> fmt::Debug for Gd<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gd {{ id: {}, class: {} }}", self.instance_id(), T::class_name())
    }
}

// ----------------------------------------------------------------------------------------------------------------------------------------------
// ABI exchange

// SAFETY: delegates to RawGd's encoding, adding reference bookkeeping at the ownership
// transitions (incoming argument, outgoing return).
unsafe impl<T: GodotClass> GodotAbi for Gd<T> {
    fn variant_type() -> sys::VariantType {
        sys::VariantType::Object
    }

    unsafe fn from_abi(ptr: sys::GDExtensionTypePtr) -> Self {
        let raw = RawGd::<T>::from_abi(ptr);
        assert!(!raw.is_null(), "null object in non-nullable return; use Option<Gd<T>>");

        T::DynMemory::maybe_init_ref(&raw);
        Self { raw }
    }

    unsafe fn from_abi_init(init_fn: impl FnOnce(sys::GDExtensionUninitializedTypePtr)) -> Self {
        let raw = RawGd::<T>::from_abi_init(init_fn);
        assert!(!raw.is_null(), "null object in non-nullable return; use Option<Gd<T>>");

        T::DynMemory::maybe_init_ref(&raw);
        Self { raw }
    }

    fn abi(&self) -> sys::GDExtensionTypePtr {
        self.raw.abi()
    }

    unsafe fn from_arg_ptr(ptr: sys::GDExtensionTypePtr, kind: PtrcallKind) -> Self {
        let raw = RawGd::<T>::from_arg_ptr(ptr, kind);
        assert!(!raw.is_null(), "null object argument; use Option<Gd<T>>");

        // The callee keeps its own reference for the duration of its borrow.
        T::DynMemory::maybe_inc_ref(&raw);
        Self { raw }
    }

    unsafe fn move_return_ptr(self, dst: sys::GDExtensionTypePtr, kind: PtrcallKind) {
        if T::DynMemory::pass_as_ref(kind) {
            // ref_set_object takes a reference on behalf of the caller; ours is then released
            // by the normal drop below.
            self.raw.clone().move_return_ptr(dst, kind);
            drop(self);
        } else {
            self.raw.clone().move_return_ptr(dst, kind);
            std::mem::forget(self); // reference transferred through the return slot
        }
    }
}

// SAFETY: same encoding as Gd, with the null wrapper representing None.
unsafe impl<T: GodotClass> GodotAbi for Option<Gd<T>> {
    fn variant_type() -> sys::VariantType {
        sys::VariantType::Object
    }

    unsafe fn from_abi(ptr: sys::GDExtensionTypePtr) -> Self {
        let raw = RawGd::<T>::from_abi(ptr);
        if raw.is_null() {
            return None;
        }

        T::DynMemory::maybe_init_ref(&raw);
        Some(Gd { raw })
    }

    unsafe fn from_abi_init(init_fn: impl FnOnce(sys::GDExtensionUninitializedTypePtr)) -> Self {
        let raw = RawGd::<T>::from_abi_init(init_fn);
        if raw.is_null() {
            return None;
        }

        T::DynMemory::maybe_init_ref(&raw);
        Some(Gd { raw })
    }

    fn abi(&self) -> sys::GDExtensionTypePtr {
        match self {
            Some(gd) => gd.abi(),
            None => {
                // Stable all-zero storage standing in for the null object pointer.
                static NULL_OBJECT: usize = 0;
                std::ptr::addr_of!(NULL_OBJECT) as sys::GDExtensionTypePtr
            }
        }
    }

    unsafe fn from_arg_ptr(ptr: sys::GDExtensionTypePtr, kind: PtrcallKind) -> Self {
        let raw = RawGd::<T>::from_arg_ptr(ptr, kind);
        if raw.is_null() {
            return None;
        }

        T::DynMemory::maybe_inc_ref(&raw);
        Some(Gd { raw })
    }

    unsafe fn move_return_ptr(self, dst: sys::GDExtensionTypePtr, kind: PtrcallKind) {
        match self {
            Some(gd) => gd.move_return_ptr(dst, kind),
            None => RawGd::<T>::null().move_return_ptr(dst, kind),
        }
    }
}
