/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::marker::PhantomData;
use std::ptr;

use crate::obj::bounds::{Bounds, Declarer, DynMemory};
use crate::obj::{GodotClass, InstanceId};
use crate::registry::handles;
use crate::sys;
use sys::{GodotAbi, GodotNullableAbi, PtrcallKind};

/// Identity of the engine instance behind an object wrapper.
///
/// Cached at wrapper construction; the instance ID outlives the object and is the only safe way
/// to re-check liveness later.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[repr(C)]
pub(crate) struct ObjectRtti {
    pub instance_id: InstanceId,
}

/// Low-level object pointer with cached identity; no reference bookkeeping of its own.
///
/// Class bindings in [`crate::classes`] are `repr(transparent)` wrappers around `RawGd<Self>`,
/// and user classes share the same layout through their base field. This is what makes
/// inheritance views free: a reference to `RawGd<T>` can be reinterpreted as a reference to the
/// class struct (or any superclass view) without touching the engine.
#[repr(C)]
pub struct RawGd<T: GodotClass> {
    object_ptr: sys::GDExtensionObjectPtr,
    rtti: Option<ObjectRtti>,
    _marker: PhantomData<*const T>,
}

impl<T: GodotClass> RawGd<T> {
    /// The null wrapper, representing the absence of an object.
    pub(crate) fn null() -> Self {
        Self {
            object_ptr: ptr::null_mut(),
            rtti: None,
            _marker: PhantomData,
        }
    }

    /// Wraps an engine object pointer without touching reference counts.
    ///
    /// # Safety
    /// `object_ptr` must be null or point to a live engine object that is (or inherits) `T`.
    pub(crate) unsafe fn from_obj_sys_weak(object_ptr: sys::GDExtensionObjectPtr) -> Self {
        if object_ptr.is_null() {
            return Self::null();
        }

        let raw_id = sys::interface_fn!(object_get_instance_id)(object_ptr);
        let instance_id = InstanceId::try_from_u64(raw_id)
            .unwrap_or_else(|| panic!("engine object without instance ID"));

        handles::register_object(instance_id, object_ptr);

        Self {
            object_ptr,
            rtti: Some(ObjectRtti { instance_id }),
            _marker: PhantomData,
        }
    }

    pub(crate) fn is_null(&self) -> bool {
        self.object_ptr.is_null()
    }

    pub(crate) fn obj_sys(&self) -> sys::GDExtensionObjectPtr {
        self.object_ptr
    }

    /// Instance ID as cached at construction; does not check liveness.
    pub(crate) fn instance_id_unchecked(&self) -> Option<InstanceId> {
        self.rtti.map(|rtti| rtti.instance_id)
    }

    /// Whether the engine instance is still alive.
    pub(crate) fn is_instance_valid(&self) -> bool {
        match self.rtti {
            Some(rtti) => rtti.instance_id.lookup_validity(),
            None => false,
        }
    }

    /// Borrowed view as the type smart pointers dereference to.
    pub(crate) fn as_target(&self) -> &<T::Declarer as Declarer>::DerefTarget<T> {
        // SAFETY: class structs are layout-compatible with RawGd (repr(transparent) over their
        // own RawGd, or over the base's for user classes).
        unsafe { &*(self as *const Self).cast() }
    }

    pub(crate) fn as_target_mut(&mut self) -> &mut <T::Declarer as Declarer>::DerefTarget<T> {
        // SAFETY: as in as_target().
        unsafe { &mut *(self as *mut Self).cast() }
    }

    /// Sideways/downward cast through the engine's dynamic class check.
    ///
    /// Returns `None` if the instance is not a `U`. The null wrapper casts to every class.
    pub(crate) fn ffi_cast<U: GodotClass>(&self) -> Option<RawGd<U>> {
        if self.is_null() {
            return Some(RawGd::null());
        }

        // SAFETY: tag lookup and cast are read-only engine queries on a live object.
        unsafe {
            let tag = sys::interface_fn!(classdb_get_class_tag)(
                U::class_name().to_string_name().string_name_sys_const(),
            );
            let cast_ptr = sys::interface_fn!(object_cast_to)(
                self.object_ptr as sys::GDExtensionConstObjectPtr,
                tag,
            );

            (!cast_ptr.is_null()).then(|| RawGd::from_obj_sys_weak(cast_ptr))
        }
    }

    /// Reinterprets as a wrapper of a related class, without an engine check.
    ///
    /// # Safety
    /// The instance must be a `U` (upcasts always qualify).
    pub(crate) unsafe fn cast_unchecked<U: GodotClass>(self) -> RawGd<U> {
        RawGd {
            object_ptr: self.object_ptr,
            rtti: self.rtti,
            _marker: PhantomData,
        }
    }
}

// Shallow copy; no reference bookkeeping. Kept off the public surface, `Gd` exposes a `Clone`
// with proper bookkeeping.
impl<T: GodotClass> Clone for RawGd<T> {
    fn clone(&self) -> Self {
        Self {
            object_ptr: self.object_ptr,
            rtti: self.rtti,
            _marker: PhantomData,
        }
    }
}

// SAFETY: objects travel as a pointer-sized address in pointer calls; virtual calls pass
// ref-counted instances as `Ref<T>*` instead, handled via ref_get_object/ref_set_object.
unsafe impl<T: GodotClass> GodotAbi for RawGd<T> {
    fn variant_type() -> sys::VariantType {
        sys::VariantType::Object
    }

    unsafe fn from_abi(ptr: sys::GDExtensionTypePtr) -> Self {
        let object_ptr = *(ptr as *mut sys::GDExtensionObjectPtr);
        Self::from_obj_sys_weak(object_ptr)
    }

    unsafe fn from_abi_init(init_fn: impl FnOnce(sys::GDExtensionUninitializedTypePtr)) -> Self {
        let mut object_ptr: sys::GDExtensionObjectPtr = ptr::null_mut();
        init_fn(ptr::addr_of_mut!(object_ptr) as sys::GDExtensionUninitializedTypePtr);
        Self::from_obj_sys_weak(object_ptr)
    }

    fn abi(&self) -> sys::GDExtensionTypePtr {
        ptr::addr_of!(self.object_ptr) as sys::GDExtensionTypePtr
    }

    unsafe fn from_arg_ptr(ptr: sys::GDExtensionTypePtr, kind: PtrcallKind) -> Self {
        let object_ptr = if T::DynMemory::pass_as_ref(kind) {
            sys::interface_fn!(ref_get_object)(ptr as sys::GDExtensionConstRefPtr)
        } else {
            *(ptr as *mut sys::GDExtensionObjectPtr)
        };

        Self::from_obj_sys_weak(object_ptr)
    }

    unsafe fn move_return_ptr(self, dst: sys::GDExtensionTypePtr, kind: PtrcallKind) {
        if T::DynMemory::pass_as_ref(kind) {
            // ref_set_object takes its own reference on behalf of the caller.
            sys::interface_fn!(ref_set_object)(dst as sys::GDExtensionRefPtr, self.object_ptr);
        } else {
            *(dst as *mut sys::GDExtensionObjectPtr) = self.object_ptr;
        }
    }
}

impl<T: GodotClass> GodotNullableAbi for RawGd<T> {
    fn null() -> Self {
        Self::null()
    }

    fn is_null(&self) -> bool {
        self.is_null()
    }
}

impl<T: GodotClass> Default for RawGd<T> {
    fn default() -> Self {
        Self::null()
    }
}
