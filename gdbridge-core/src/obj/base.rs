/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::obj::bounds::{Declarer, DynMemory};
use crate::obj::{Bounds, Gd, GodotClass, RawGd};
use crate::sys;

/// Restricted pointer from a user class to its own base object.
///
/// Handed to the user's constructor and stored as a field. Deliberately weak: the base object
/// owns the user instance, so a strong reference here would form a cycle.
pub struct Base<T: GodotClass> {
    raw: RawGd<T>,
}

impl<T: GodotClass> Base<T> {
    /// # Safety
    /// `object_ptr` must point to the live base object that owns the user instance under
    /// construction.
    pub(crate) unsafe fn from_obj_sys(object_ptr: sys::GDExtensionObjectPtr) -> Self {
        let raw = RawGd::from_obj_sys_weak(object_ptr);
        debug_assert!(!raw.is_null());

        Self { raw }
    }

    /// Full-fledged pointer to the base object, with its own strong reference.
    pub fn to_gd(&self) -> Gd<T> {
        T::DynMemory::maybe_inc_ref(&self.raw);
        Gd::from_raw(self.raw.clone())
    }
}

impl<T: GodotClass> Deref for Base<T> {
    type Target = <T::Declarer as Declarer>::DerefTarget<T>;

    fn deref(&self) -> &Self::Target {
        self.raw.as_target()
    }
}

impl<T: GodotClass> DerefMut for Base<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.raw.as_target_mut()
    }
}

impl<T: GodotClass> fmt::Debug for Base<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.raw.instance_id_unchecked() {
            Some(id) => write!(f, "Base {{ id: {id} }}"),
            None => write!(f, "Base {{ null }}"),
        }
    }
}
