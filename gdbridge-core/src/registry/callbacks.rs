/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! `extern "C"` callbacks handed to the engine at class registration.
//!
//! Every body runs through [`handle_panic`]; unwinding across the C boundary is undefined
//! behavior, so a panicking user class logs an error and the callback returns a neutral value.

use std::ffi::c_void;
use std::panic::AssertUnwindSafe;

use crate::builtin::StringName;
use crate::obj::{cap, Base, GodotClass, GodotHooks};
use crate::private::handle_panic;
use crate::storage::{as_storage, destroy_storage, InstanceStorage, NOP_INSTANCE_CALLBACKS};
use crate::sys;
use sys::GodotAbi;

/// Engine requests a new instance of `T`.
///
/// Constructs the engine-side base object first, then the user struct around a weak handle to
/// it, and attaches the storage to the object under this extension's class tag.
pub unsafe extern "C" fn create<T: cap::GodotDefault>(
    _class_userdata: *mut c_void,
) -> sys::GDExtensionObjectPtr {
    let outcome = handle_panic(
        || format!("create instance of {}", T::class_name()),
        AssertUnwindSafe(|| {
            let base_name = T::Base::class_name().to_string_name();
            let base_ptr =
                sys::interface_fn!(classdb_construct_object)(base_name.string_name_sys_const());
            assert!(
                !base_ptr.is_null(),
                "engine failed to construct base class {}",
                T::Base::class_name()
            );

            let base = Base::from_obj_sys(base_ptr);
            let user_instance = T::__godot_user_init(base);

            let base = Base::from_obj_sys(base_ptr);
            let instance_ptr = InstanceStorage::construct(user_instance, base).into_raw()
                as sys::GDExtensionClassInstancePtr;

            let class_name = T::class_name().to_string_name();
            sys::interface_fn!(object_set_instance)(
                base_ptr,
                class_name.string_name_sys_const(),
                instance_ptr,
            );
            sys::interface_fn!(object_set_instance_binding)(
                base_ptr,
                sys::get_library(),
                instance_ptr,
                &NOP_INSTANCE_CALLBACKS,
            );

            sys::out!("  create  <{}>", T::class_name());
            base_ptr
        }),
    );

    outcome.unwrap_or(std::ptr::null_mut())
}

/// Engine destroys an instance of `T`. Runs after the engine object's own teardown began; the
/// storage pointer is consumed exactly once.
pub unsafe extern "C" fn free<T: GodotHooks>(
    _class_userdata: *mut c_void,
    instance: sys::GDExtensionClassInstancePtr,
) {
    let _ = handle_panic(
        || format!("free instance of {}", T::class_name()),
        AssertUnwindSafe(|| {
            sys::out!("  free  <{}>", T::class_name());
            destroy_storage::<T>(instance);
        }),
    );
}

/// Engine queries whether `T` overrides the virtual method `name`.
///
/// Resolution happens per class load, not per call; the returned trampoline is cached engine-
/// side.
pub unsafe extern "C" fn get_virtual<T: GodotHooks>(
    _class_userdata: *mut c_void,
    name: sys::GDExtensionConstStringNamePtr,
) -> sys::GDExtensionClassCallVirtual {
    let outcome = handle_panic(
        || format!("resolve virtual method on {}", T::class_name()),
        AssertUnwindSafe(|| {
            let name = String::from(&StringName::clone_from_sys(name));
            T::__virtual_call(name.as_str())
        }),
    );

    outcome.flatten()
}

/// Engine took a reference on a ref-counted instance of `T`.
pub unsafe extern "C" fn reference<T: GodotHooks>(instance: sys::GDExtensionClassInstancePtr) {
    let _ = handle_panic(
        || format!("reference {}", T::class_name()),
        AssertUnwindSafe(|| {
            as_storage::<T>(instance).on_inc_ref();
        }),
    );
}

/// Engine dropped a reference on a ref-counted instance of `T`.
pub unsafe extern "C" fn unreference<T: GodotHooks>(instance: sys::GDExtensionClassInstancePtr) {
    let _ = handle_panic(
        || format!("unreference {}", T::class_name()),
        AssertUnwindSafe(|| {
            as_storage::<T>(instance).on_dec_ref();
        }),
    );
}

/// Engine stringifies an instance of `T` (e.g. for `print`).
pub unsafe extern "C" fn to_string<T: GodotHooks>(
    instance: sys::GDExtensionClassInstancePtr,
    r_is_valid: *mut sys::GDExtensionBool,
    r_out: sys::GDExtensionStringPtr,
) {
    let outcome = handle_panic(
        || format!("to_string of {}", T::class_name()),
        AssertUnwindSafe(|| {
            let string = as_storage::<T>(instance).get().to_godot_string();
            string.move_return_ptr(r_out as sys::GDExtensionTypePtr, sys::PtrcallKind::Virtual);
        }),
    );

    *r_is_valid = sys::GDExtensionBool::from(outcome.is_some());
}

/// Engine delivers a notification to an instance of `T`.
pub unsafe extern "C" fn on_notification<T: GodotHooks>(
    instance: sys::GDExtensionClassInstancePtr,
    what: i32,
    _reversed: sys::GDExtensionBool,
) {
    let _ = handle_panic(
        || format!("notification {what} on {}", T::class_name()),
        AssertUnwindSafe(|| {
            as_storage::<T>(instance).get_mut().on_notification(what);
        }),
    );
}

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Virtual trampolines

/// Maps a virtual method name to its trampoline for classes using the default hook set.
///
/// Classes with custom virtual surfaces override
/// [`GodotHooks::__virtual_call`] and fall back to this for the hooks they keep.
pub fn default_virtual_dispatch<T: GodotHooks>(name: &str) -> sys::GDExtensionClassCallVirtual {
    match name {
        "_ready" => Some(virtual_ready::<T>),
        "_process" => Some(virtual_process::<T>),
        _ => None,
    }
}

unsafe extern "C" fn virtual_ready<T: GodotHooks>(
    instance: sys::GDExtensionClassInstancePtr,
    _args: *const sys::GDExtensionConstTypePtr,
    _ret: sys::GDExtensionTypePtr,
) {
    let _ = handle_panic(
        || format!("{}::ready", T::class_name()),
        AssertUnwindSafe(|| {
            as_storage::<T>(instance).get_mut().ready();
        }),
    );
}

unsafe extern "C" fn virtual_process<T: GodotHooks>(
    instance: sys::GDExtensionClassInstancePtr,
    args: *const sys::GDExtensionConstTypePtr,
    _ret: sys::GDExtensionTypePtr,
) {
    let _ = handle_panic(
        || format!("{}::process", T::class_name()),
        AssertUnwindSafe(|| {
            let delta = f64::from_arg_ptr(*args as sys::GDExtensionTypePtr, sys::PtrcallKind::Virtual);
            as_storage::<T>(instance).get_mut().process(delta);
        }),
    );
}
