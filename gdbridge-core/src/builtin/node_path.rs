/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::builtin::GString;
use crate::registry::handles::{self, GenTicket};
use crate::sys;
use sys::types::OpaqueNodePath;
use sys::{GodotAbi, PtrcallKind};

/// Pre-parsed scene-tree path ("/root/Level/Player").
#[repr(C)]
pub struct NodePath {
    opaque: OpaqueNodePath,
    ticket: GenTicket,
}

impl NodePath {
    fn from_opaque(opaque: OpaqueNodePath) -> Self {
        Self {
            opaque,
            ticket: handles::register(),
        }
    }

    #[doc(hidden)]
    pub fn node_path_sys_const(&self) -> sys::GDExtensionConstTypePtr {
        self.abi_const()
    }
}

// SAFETY: stores the engine blob in `opaque`; the blob's address is the ABI pointer.
unsafe impl GodotAbi for NodePath {
    fn variant_type() -> sys::VariantType {
        sys::VariantType::NodePath
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
            let ctor = sys::builtin_fn!(node_path_construct_copy);
            let args = [ptr as sys::GDExtensionConstTypePtr];
            ctor(self_ptr, args.as_ptr());
        })
    }
}

impl_builtin_traits! {
    for NodePath {
        Default => node_path_construct_default;
        Clone => node_path_construct_copy;
        Drop => node_path_destroy;
        Eq => node_path_operator_equal;
    }
}

impl_builtin_release!(NodePath, OpaqueNodePath => node_path_destroy);
impl_variant_conversions!(NodePath, live);

impl From<&GString> for NodePath {
    fn from(string: &GString) -> Self {
        string.ensure_live();

        // SAFETY: dedicated engine constructor taking one String argument.
        unsafe {
            Self::from_abi_init(|self_ptr| {
                let ctor = sys::builtin_fn!(node_path_from_string);
                let args = [string.abi_const()];
                ctor(self_ptr, args.as_ptr());
            })
        }
    }
}

impl<S: AsRef<str>> From<S> for NodePath {
    fn from(path: S) -> Self {
        Self::from(&GString::from(path.as_ref()))
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::builtin::ToVariant;
        write!(f, "{}", self.to_variant().stringify())
    }
}

impl fmt::Debug for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "^\"{self}\"")
    }
}
