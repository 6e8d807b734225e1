/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Registration of Rust-defined classes in the engine's class database.

use crate::init::InitLevel;
use crate::meta::ClassName;
use crate::obj::bounds::Memory;
use crate::obj::{cap, Bounds, GodotClass, GodotHooks};
use crate::registry::callbacks;
use crate::sys;

/// Classes currently registered, in registration order.
static REGISTERED: sys::Global<Vec<(ClassName, InitLevel)>> = sys::Global::default();

/// Registers `T` in the engine's class database under [`GodotClass::class_name`].
///
/// After this call the class is visible engine-side: the engine can construct instances (which
/// run `T`'s init function), dispatch its virtual methods, and stringify it. Must be called
/// during the init callback of `T::INIT_LEVEL` or later; the class is unregistered again when
/// that level is torn down.
///
/// # Panics
/// If a class of the same name was already registered.
pub fn register_class<T>()
where
    T: cap::GodotDefault + GodotHooks,
{
    let class_name = T::class_name();
    sys::out!("register class  <{class_name}>");

    {
        let mut registered = REGISTERED.lock();
        assert!(
            !registered.iter().any(|(name, _)| *name == class_name),
            "class {class_name} registered twice"
        );
        registered.push((class_name, T::INIT_LEVEL));
    }

    let is_refcounted = <T as Bounds>::Memory::IS_REF_COUNTED;

    let info = sys::GDExtensionClassCreationInfo2 {
        is_virtual: 0,
        is_abstract: 0,
        is_exposed: 1,
        set_func: None,
        get_func: None,
        get_property_list_func: None,
        free_property_list_func: None,
        property_can_revert_func: None,
        property_get_revert_func: None,
        notification_func: Some(callbacks::on_notification::<T>),
        to_string_func: Some(callbacks::to_string::<T>),
        reference_func: if is_refcounted {
            Some(callbacks::reference::<T>)
        } else {
            None
        },
        unreference_func: if is_refcounted {
            Some(callbacks::unreference::<T>)
        } else {
            None
        },
        create_instance_func: Some(callbacks::create::<T>),
        free_instance_func: Some(callbacks::free::<T>),
        recreate_instance_func: None,
        get_virtual_func: Some(callbacks::get_virtual::<T>),
        get_virtual_call_data_func: None,
        call_virtual_with_data_func: None,
        get_rid_func: None,
        class_userdata: std::ptr::null_mut(),
    };

    let class_name_sn = class_name.to_string_name();
    let base_name_sn = T::Base::class_name().to_string_name();

    // SAFETY: both names outlive the call; the engine copies the descriptor.
    unsafe {
        sys::interface_fn!(classdb_register_extension_class2)(
            sys::get_library(),
            class_name_sn.string_name_sys_const(),
            base_name_sn.string_name_sys_const(),
            &info,
        );
    }
}

/// Unregisters every class registered at `level`, in reverse registration order (derived
/// classes before their bases).
pub(crate) fn unregister_classes(level: InitLevel) {
    let to_remove: Vec<ClassName> = {
        let mut registered = REGISTERED.lock();
        let (remove, keep): (Vec<_>, Vec<_>) = registered
            .drain(..)
            .partition(|(_, class_level)| *class_level == level);
        *registered = keep;
        remove.into_iter().rev().map(|(name, _)| name).collect()
    };

    for class_name in to_remove {
        sys::out!("unregister class  <{class_name}>");
        let class_name_sn = class_name.to_string_name();

        // SAFETY: the class was registered at this level and no instances survive level teardown.
        unsafe {
            sys::interface_fn!(classdb_unregister_extension_class)(
                sys::get_library(),
                class_name_sn.string_name_sys_const(),
            );
        }
    }
}
