/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Outbound call plumbing: pointer calls for fixed-signature methods, variant calls for
//! variadic ones.
//!
//! Class bindings assemble a [`CallFrame`], then dispatch through the helpers here. Receiver
//! liveness is checked before the engine is entered; on a null or destroyed receiver the call
//! is not issued, and the declared zero value (pointer calls) or an error (variant calls) comes
//! back instead. A stale handle never crosses the ABI.

use crate::builtin::Variant;
use crate::meta::ownership::{return_label, OwnershipLabel};
use crate::meta::{CallContext, CallError, CallFailure, CallFrame};
use crate::obj::{GodotClass, InstanceId, RawGd};
use crate::sys;
use sys::GodotAbi;

/// Issues a pointer call to an engine method with a fixed signature.
///
/// `receiver` is the cached instance ID of the receiver, or `None` for the null wrapper. When
/// the receiver is null or no longer alive, the call is skipped and `R::default()` is returned.
///
/// # Safety
/// `method_bind` must match the engine method whose parameters were pushed onto `frame`, in
/// order, and whose return type is `R`. `object_ptr` must be the receiver's object pointer.
pub(crate) unsafe fn out_class_ptrcall<R: GodotAbi + Default>(
    method_bind: sys::GDExtensionMethodBindPtr,
    context: &CallContext,
    receiver: Option<InstanceId>,
    object_ptr: sys::GDExtensionObjectPtr,
    frame: &CallFrame,
) -> R {
    if !receiver_is_live(receiver) {
        sys::out!("skipped call {context}: receiver is null or destroyed");
        return R::default();
    }

    R::from_abi_init_default(|return_ptr| {
        sys::interface_fn!(object_method_bind_ptrcall)(
            method_bind,
            object_ptr,
            frame.args_ptr(),
            return_ptr,
        );
    })
}

/// Issues a variant call to a variadic engine method.
///
/// All arguments travel as variant pointers through one [`CallFrame`]; the engine validates
/// count and types and reports failures through the call-error record, translated here into a
/// [`CallError`]. A null or destroyed receiver is reported the same way, without entering the
/// engine.
///
/// # Safety
/// `method_bind` must belong to a variadic method on the class of `object_ptr`.
pub(crate) unsafe fn out_class_varcall(
    method_bind: sys::GDExtensionMethodBindPtr,
    context: CallContext,
    receiver: Option<InstanceId>,
    object_ptr: sys::GDExtensionObjectPtr,
    explicit_args: &[&Variant],
    varargs: &[Variant],
) -> Result<Variant, CallError> {
    match receiver {
        None => return Err(CallError::new(context, CallFailure::NullReceiver)),
        Some(id) if !id.lookup_validity() => {
            return Err(CallError::new(context, CallFailure::StaleInstanceId));
        }
        Some(_) => {}
    }

    let mut frame = CallFrame::new();
    for arg in explicit_args {
        arg.ensure_live();
        frame.push_raw_entry(arg.variant_sys_const());
    }
    for arg in varargs {
        arg.ensure_live();
        frame.push_raw_entry(arg.variant_sys_const());
    }

    let mut call_error = sys::default_call_error();
    let result = Variant::from_abi_init(|variant_ptr| {
        sys::interface_fn!(object_method_bind_call)(
            method_bind,
            object_ptr,
            frame.variant_args_ptr(),
            frame.arg_count() as i64,
            variant_ptr as sys::GDExtensionUninitializedVariantPtr,
            &mut call_error,
        );
    });

    if call_error.error == sys::GDEXTENSION_CALL_OK {
        Ok(result)
    } else {
        Err(CallError::from_engine(context, &call_error, frame.arg_count()))
    }
}

fn receiver_is_live(instance_id: Option<InstanceId>) -> bool {
    instance_id.is_some_and(InstanceId::lookup_validity)
}

/// Enforces the registered return-ownership discipline for an object-returning method.
///
/// For the instance-ID-asserting label, the returned handle is resolved through the registry;
/// a stale handle is replaced by the null wrapper. The transfer and borrow labels are honored
/// by the reference bookkeeping in the decode path itself.
pub(crate) fn check_return_ownership<T: GodotClass>(raw: &mut RawGd<T>, context: &CallContext) {
    let label = return_label(context.class_name, context.function_name);
    if !needs_liveness_check(label, raw.is_null()) {
        return;
    }

    if !raw.is_instance_valid() {
        sys::out!("nulled return of {context}: instance was already destroyed");
        *raw = RawGd::null();
    }
}

fn needs_liveness_check(label: Option<OwnershipLabel>, is_null: bool) -> bool {
    label == Some(OwnershipLabel::AssertInstanceId) && !is_null
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_id_asserting_returns_are_liveness_checked() {
        for label in [
            None,
            Some(OwnershipLabel::Transferred),
            Some(OwnershipLabel::BoundToParent),
            Some(OwnershipLabel::TemporaryReference),
        ] {
            assert!(!needs_liveness_check(label, false));
        }

        assert!(needs_liveness_check(
            Some(OwnershipLabel::AssertInstanceId),
            false
        ));
    }

    #[test]
    fn null_returns_skip_the_liveness_check() {
        assert!(!needs_liveness_check(
            Some(OwnershipLabel::AssertInstanceId),
            true
        ));
    }
}
