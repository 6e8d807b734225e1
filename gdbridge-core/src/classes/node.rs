/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::builtin::StringName;
use crate::classes::table::{self, MethodInit};
use crate::classes::Object;
use crate::meta::ownership::OwnershipLabel;
use crate::meta::signature::{check_return_ownership, out_class_ptrcall};
use crate::meta::{CallContext, CallFrame};
use crate::obj::{bounds, Gd, Inherits, RawGd};

// Signature-based method hashes from the engine's API description (4.2). queue_free and
// is_inside_tree share their signatures with other zero-argument methods.
pub(crate) const METHODS: &[MethodInit] = &[
    MethodInit::new("add_child", 3863233950),
    MethodInit::returning("get_parent", 3160264692, OwnershipLabel::AssertInstanceId),
    MethodInit::new("get_child_count", 894402966),
    MethodInit::new("get_name", 2002593661),
    MethodInit::new("set_name", 83702148),
    MethodInit::new("queue_free", 3218959716),
    MethodInit::new("is_inside_tree", 2240911060),
];

engine_class! {
    /// Base of everything living in the scene tree.
    Node,
    base: Object,
    name: "Node",
    memory: bounds::MemManual,
    dyn_memory: bounds::MemManual,
}

class_deref!(Node => Object);

// SAFETY: engine hierarchy.
unsafe impl Inherits<Object> for Node {}

impl Node {
    /// Adds `child` below this node. The child's lifetime is bound to the tree from here on;
    /// the engine frees it with its parent unless it is removed first.
    pub fn add_child(&mut self, child: &Gd<Node>) {
        const CONTEXT: CallContext = CallContext::new("Node", "add_child");

        let mut frame = CallFrame::new();
        frame.push_arg(child.raw());
        frame.push_value(false);
        frame.push_value(0_i64);

        // SAFETY: frame matches add_child(Node, bool, int).
        let _: () = unsafe {
            out_class_ptrcall(
                table::method_bind("Node", "add_child"),
                &CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        };
    }

    /// The parent node, or `None` at the tree root (or outside the tree).
    ///
    /// The returned handle is not owning; its liveness is re-checked against the instance-ID
    /// registry, and a parent the engine has already freed comes back as `None`.
    pub fn get_parent(&self) -> Option<Gd<Node>> {
        const CONTEXT: CallContext = CallContext::new("Node", "get_parent");

        let frame = CallFrame::new();
        // SAFETY: frame matches get_parent() -> Node.
        let mut parent: RawGd<Node> = unsafe {
            out_class_ptrcall(
                table::method_bind("Node", "get_parent"),
                &CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        };

        check_return_ownership(&mut parent, &CONTEXT);

        if parent.is_null() {
            None
        } else {
            // SAFETY: pointer checked live against the registry just above.
            Some(unsafe { Gd::from_obj_sys_inc(parent.obj_sys()) })
        }
    }

    /// Number of direct children.
    pub fn get_child_count(&self) -> i64 {
        const CONTEXT: CallContext = CallContext::new("Node", "get_child_count");

        let mut frame = CallFrame::new();
        frame.push_value(false);

        // SAFETY: frame matches get_child_count(bool) -> int.
        unsafe {
            out_class_ptrcall(
                table::method_bind("Node", "get_child_count"),
                &CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        }
    }

    pub fn get_name(&self) -> StringName {
        const CONTEXT: CallContext = CallContext::new("Node", "get_name");

        let frame = CallFrame::new();
        // SAFETY: frame matches get_name() -> StringName.
        unsafe {
            out_class_ptrcall(
                table::method_bind("Node", "get_name"),
                &CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        }
    }

    pub fn set_name<S: Into<StringName>>(&mut self, name: S) {
        const CONTEXT: CallContext = CallContext::new("Node", "set_name");

        let name = name.into();
        let mut frame = CallFrame::new();
        frame.push_arg(&name);

        // SAFETY: frame matches set_name(StringName).
        let _: () = unsafe {
            out_class_ptrcall(
                table::method_bind("Node", "set_name"),
                &CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        };
    }

    /// Schedules this node for destruction at the end of the current frame. Safer than an
    /// immediate free while engine code may still reference the node.
    pub fn queue_free(&mut self) {
        const CONTEXT: CallContext = CallContext::new("Node", "queue_free");

        let frame = CallFrame::new();
        // SAFETY: frame matches queue_free().
        let _: () = unsafe {
            out_class_ptrcall(
                table::method_bind("Node", "queue_free"),
                &CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        };
    }

    pub fn is_inside_tree(&self) -> bool {
        const CONTEXT: CallContext = CallContext::new("Node", "is_inside_tree");

        let frame = CallFrame::new();
        // SAFETY: frame matches is_inside_tree() -> bool.
        unsafe {
            out_class_ptrcall(
                table::method_bind("Node", "is_inside_tree"),
                &CONTEXT,
                self.raw.instance_id_unchecked(),
                self.raw.obj_sys(),
                &frame,
            )
        }
    }
}
