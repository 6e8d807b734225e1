/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::builtin::Vector3;
use crate::classes::table::{self, MethodInit};
use crate::classes::{Node, Object};
use crate::meta::signature::out_class_ptrcall;
use crate::meta::{CallContext, CallFrame};
use crate::obj::{bounds, Inherits};

// Signature-based method hashes from the engine's API description (4.2). set_position and
// translate share a signature and therefore a hash.
pub(crate) const METHODS: &[MethodInit] = &[
    MethodInit::new("set_position", 3460891852),
    MethodInit::new("get_position", 3360562783),
    MethodInit::new("translate", 3460891852),
];

engine_class! {
    /// Node with a 3D transform.
    Node3D,
    base: Node,
    name: "Node3D",
    memory: bounds::MemManual,
    dyn_memory: bounds::MemManual,
}

class_deref!(Node3D => Node);

// SAFETY: engine hierarchy.
unsafe impl Inherits<Node> for Node3D {}
unsafe impl Inherits<Object> for Node3D {}

impl Node3D {
    /// Position relative to the parent node.
    pub fn set_position(&mut self, position: Vector3) {
        const CONTEXT: CallContext = CallContext::new("Node3D", "set_position");

        let mut frame = CallFrame::new();
        frame.push_value(position);

        // SAFETY: frame matches set_position(Vector3).
        let _: () = unsafe {
            out_class_ptrcall(
                table::method_bind("Node3D", "set_position"),
                &CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        };
    }

    pub fn get_position(&self) -> Vector3 {
        const CONTEXT: CallContext = CallContext::new("Node3D", "get_position");

        let frame = CallFrame::new();
        // SAFETY: frame matches get_position() -> Vector3.
        unsafe {
            out_class_ptrcall(
                table::method_bind("Node3D", "get_position"),
                &CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        }
    }

    /// Moves the node by `offset` in local space.
    pub fn translate(&mut self, offset: Vector3) {
        const CONTEXT: CallContext = CallContext::new("Node3D", "translate");

        let mut frame = CallFrame::new();
        frame.push_value(offset);

        // SAFETY: frame matches translate(Vector3).
        let _: () = unsafe {
            out_class_ptrcall(
                table::method_bind("Node3D", "translate"),
                &CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        };
    }
}
