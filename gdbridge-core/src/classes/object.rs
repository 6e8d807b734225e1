/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::builtin::{Callable, GString, StringName, ToVariant, Variant};
use crate::classes::table::{self, MethodInit};
use crate::log;
use crate::meta::signature::{out_class_ptrcall, out_class_varcall};
use crate::meta::{CallContext, CallError, CallFrame};
use crate::obj::{bounds, NoBase};

// Signature-based method hashes from the engine's API description (4.2).
pub(crate) const METHODS: &[MethodInit] = &[
    MethodInit::new("emit_signal", 4047867050),
    MethodInit::new("call", 3400424181),
    MethodInit::new("connect", 1518946055),
    MethodInit::new("get_class", 201670096),
];

engine_class! {
    /// Root of the engine's class hierarchy.
    Object,
    base: NoBase,
    name: "Object",
    memory: bounds::MemManual,
    dyn_memory: bounds::MemDynamic,
}

impl Object {
    /// Emits the named signal, delivering `varargs` to every connected callable in connection
    /// order.
    ///
    /// An engine-side failure (unknown signal, argument mismatch) is logged, not propagated;
    /// emission is fire-and-forget.
    pub fn emit_signal(&mut self, signal: &StringName, varargs: &[Variant]) {
        const CONTEXT: CallContext = CallContext::new("Object", "emit_signal");

        let signal = signal.to_variant();
        // SAFETY: emit_signal is variadic by declaration.
        let result = unsafe {
            out_class_varcall(
                table::method_bind("Object", "emit_signal"),
                CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &[&signal],
                varargs,
            )
        };

        if let Err(call_error) = result {
            log::godot_error!("{call_error}");
        }
    }

    /// Calls the named method dynamically, with arguments and return value as variants.
    ///
    /// # Panics
    /// On engine-side call failure; see [`try_call`][Self::try_call] for the fallible form.
    pub fn call(&mut self, method: &StringName, varargs: &[Variant]) -> Variant {
        self.try_call(method, varargs)
            .unwrap_or_else(|call_error| panic!("{call_error}"))
    }

    /// Fallible counterpart of [`call`][Self::call].
    pub fn try_call(
        &mut self,
        method: &StringName,
        varargs: &[Variant],
    ) -> Result<Variant, CallError> {
        const CONTEXT: CallContext = CallContext::new("Object", "call");

        let method = method.to_variant();
        // SAFETY: call() is variadic by declaration.
        unsafe {
            out_class_varcall(
                table::method_bind("Object", "call"),
                CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &[&method],
                varargs,
            )
        }
    }

    /// Connects `callable` to the named signal. Returns the engine error code (0 on success).
    pub fn connect(&mut self, signal: &StringName, callable: &Callable) -> i64 {
        const CONTEXT: CallContext = CallContext::new("Object", "connect");

        let mut frame = CallFrame::new();
        frame.push_arg(signal);
        frame.push_arg(callable);
        frame.push_value(0_i64);

        // SAFETY: frame matches connect(StringName, Callable, int) -> int.
        unsafe {
            out_class_ptrcall(
                table::method_bind("Object", "connect"),
                &CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        }
    }

    /// Name of the instance's most derived class.
    pub fn get_class(&self) -> GString {
        const CONTEXT: CallContext = CallContext::new("Object", "get_class");

        let frame = CallFrame::new();
        // SAFETY: frame matches get_class() -> String.
        unsafe {
            out_class_ptrcall(
                table::method_bind("Object", "get_class"),
                &CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        }
    }

    /// Instance ID of this object, as an integer.
    pub fn get_instance_id(&self) -> i64 {
        self.raw
            .instance_id_unchecked()
            .map(|id| id.to_i64())
            .unwrap_or(0)
    }
}
