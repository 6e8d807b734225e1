/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::ffi::c_void;
use std::fmt;
use std::panic::AssertUnwindSafe;

use crate::builtin::{GString, StringName, Variant};
use crate::obj::{Gd, GodotClass};
use crate::registry::handles::{self, GenTicket};
use crate::sys;
use sys::{GodotAbi, PtrcallKind};

/// First-class reference to a callable unit: an object method, or a host-side function wrapped
/// via [`from_fn`][Self::from_fn].
///
/// Invocation happens engine-side (signal delivery, deferred calls); the bridge only creates,
/// copies and compares callables.
#[repr(C)]
pub struct Callable {
    opaque: sys::types::OpaqueCallable,
    ticket: GenTicket,
}

impl Callable {
    fn from_opaque(opaque: sys::types::OpaqueCallable) -> Self {
        Self {
            opaque,
            ticket: handles::register(),
        }
    }

    /// Callable invoking `method` on `object`.
    pub fn from_object_method<T: GodotClass, S: Into<StringName>>(
        object: &Gd<T>,
        method: S,
    ) -> Self {
        let method = method.into();

        // SAFETY: dedicated engine constructor taking (Object, StringName).
        unsafe {
            Self::from_abi_init(|self_ptr| {
                let ctor = sys::builtin_fn!(callable_from_object_method);
                let args = [object.raw().abi_const(), method.abi_const()];
                ctor(self_ptr, args.as_ptr());
            })
        }
    }

    /// Callable backed by a host function.
    ///
    /// `name` is what the engine displays for the callable. The function receives copies of the
    /// call arguments and must be callable from any thread the engine invokes it on.
    pub fn from_fn<S, F>(name: S, rust_function: F) -> Self
    where
        S: Into<GString>,
        F: FnMut(&[Variant]) -> Variant + 'static + Send + Sync,
    {
        let userdata = Box::new(FnWrapper {
            function: rust_function,
            name: name.into().to_string(),
        });

        let mut info = sys::GDExtensionCallableCustomInfo {
            callable_userdata: Box::into_raw(userdata) as *mut c_void,
            token: std::ptr::null_mut(),
            object_id: 0,
            call_func: Some(rust_callable_call::<F>),
            is_valid_func: None, // default is "always valid"
            free_func: Some(rust_callable_free::<F>),
            hash_func: None,
            equal_func: None,
            less_than_func: None,
            to_string_func: Some(rust_callable_to_string::<F>),
        };

        // SAFETY: info outlives the call; the engine copies what it needs.
        unsafe {
            Self::from_abi_init(|self_ptr| {
                sys::interface_fn!(callable_custom_create)(
                    self_ptr as sys::GDExtensionUninitializedTypePtr,
                    &mut info,
                );
            })
        }
    }
}

struct FnWrapper<F> {
    function: F,
    name: String,
}

unsafe extern "C" fn rust_callable_call<F>(
    userdata: *mut c_void,
    args: *const sys::GDExtensionConstVariantPtr,
    arg_count: sys::GDExtensionInt,
    r_return: sys::GDExtensionVariantPtr,
    r_error: *mut sys::GDExtensionCallError,
) where
    F: FnMut(&[Variant]) -> Variant + 'static + Send + Sync,
{
    let outcome = crate::private::handle_panic(
        || "custom callable invocation",
        AssertUnwindSafe(|| {
            let wrapper = &mut *(userdata as *mut FnWrapper<F>);

            // Arguments are engine-owned; take copies for the host function.
            let arg_values: Vec<Variant> = (0..arg_count as usize)
                .map(|i| Variant::clone_from_sys(*args.add(i)))
                .collect();

            let result = (wrapper.function)(&arg_values);
            result.move_return_ptr(r_return as sys::GDExtensionTypePtr, PtrcallKind::Standard);
        }),
    );

    (*r_error).error = if outcome.is_some() {
        sys::GDEXTENSION_CALL_OK
    } else {
        sys::GDEXTENSION_CALL_ERROR_INVALID_METHOD
    };
}

unsafe extern "C" fn rust_callable_free<F>(userdata: *mut c_void)
where
    F: FnMut(&[Variant]) -> Variant + 'static + Send + Sync,
{
    let _ = crate::private::handle_panic(
        || "custom callable teardown",
        AssertUnwindSafe(|| {
            drop(Box::from_raw(userdata as *mut FnWrapper<F>));
        }),
    );
}

unsafe extern "C" fn rust_callable_to_string<F>(
    userdata: *mut c_void,
    r_is_valid: *mut sys::GDExtensionBool,
    r_out: sys::GDExtensionStringPtr,
) where
    F: FnMut(&[Variant]) -> Variant + 'static + Send + Sync,
{
    let outcome = crate::private::handle_panic(
        || "custom callable to_string",
        AssertUnwindSafe(|| {
            let wrapper = &*(userdata as *const FnWrapper<F>);
            let name = GString::from(&wrapper.name);
            name.move_return_ptr(r_out as sys::GDExtensionTypePtr, PtrcallKind::Standard);
        }),
    );

    *r_is_valid = sys::GDExtensionBool::from(outcome.is_some());
}

// SAFETY: stores the engine blob in `opaque`; the blob's address is the ABI pointer.
unsafe impl GodotAbi for Callable {
    fn variant_type() -> sys::VariantType {
        sys::VariantType::Callable
    }

    sys::abi_methods! {
        type sys::GDExtensionTypePtr = *mut Opaque;
        fn from_abi;
        fn from_abi_init;
        fn abi;
        fn move_return_ptr;
    }

    unsafe fn from_abi_init_default(init_fn: impl FnOnce(sys::GDExtensionTypePtr)) -> Self {
        let mut result = Self::default();
        init_fn(result.abi_mut());
        result
    }

    unsafe fn from_arg_ptr(ptr: sys::GDExtensionTypePtr, _kind: PtrcallKind) -> Self {
        Self::from_abi_init(|self_ptr| {
            let ctor = sys::builtin_fn!(callable_construct_copy);
            let args = [ptr as sys::GDExtensionConstTypePtr];
            ctor(self_ptr, args.as_ptr());
        })
    }
}

impl_builtin_traits! {
    for Callable {
        Default => callable_construct_default;
        Clone => callable_construct_copy;
        Drop => callable_destroy;
        PartialEq => callable_operator_equal;
    }
}

impl_builtin_release!(Callable, sys::types::OpaqueCallable => callable_destroy);
impl_variant_conversions!(Callable, live);

impl fmt::Debug for Callable {
    fmt_via_stringify!();
}
