/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::ffi::c_void;
use std::marker::PhantomData;

use crate::sys;
use sys::GodotAbi;

/// Maximum number of argument slots in one frame. Variadic calls beyond this are caller bugs.
pub const MAX_FRAME_ARGS: usize = 32;

/// Backing store capacity, in bytes. Shared between pushed argument values (from the front) and
/// the return slot (from the back); sized generously above the largest engine blob (a variant is
/// 24 bytes).
pub const MAX_FRAME_BYTES: usize = 256;

/// Stack-resident argument/return buffer for a single engine pointer call.
///
/// A frame records one pointer per argument in a contiguous array the engine consumes as
/// `&pointers[0]`. Argument values enter in one of two ways:
///
/// - [`push_value`][Self::push_value] copies a trivially copyable value (scalar, small
///   aggregate, object handle) into the frame's backing store and records the slot address;
/// - [`push_arg`][Self::push_arg] records the address of a value that lives outside the frame
///   (engine-owned container blobs); the caller keeps it alive until dispatch.
///
/// The frame is a plain stack value; unwinding on any exit path drops it, so release is
/// guaranteed. Pushed values are trivially copyable and need no destructor of their own.
pub struct CallFrame {
    // u128 elements force 16-byte alignment of the backing store, covering every engine blob.
    storage: [u128; MAX_FRAME_BYTES / 16],
    ptrs: [sys::GDExtensionConstTypePtr; MAX_FRAME_ARGS],
    arg_count: usize,
    // Bump offset for pushed values; grows from the front.
    value_bytes: usize,
    // Return slot size; carved from the back.
    ret_bytes: usize,
    has_ret: bool,
    // Pointers into self; moving the frame after pushing a value or reserving the return slot
    // would invalidate them.
    _pin: PhantomData<*const ()>,
}

impl CallFrame {
    pub fn new() -> Self {
        Self {
            storage: [0; MAX_FRAME_BYTES / 16],
            ptrs: [std::ptr::null(); MAX_FRAME_ARGS],
            arg_count: 0,
            value_bytes: 0,
            ret_bytes: 0,
            has_ret: false,
            _pin: PhantomData,
        }
    }

    /// Copies `value` into the frame's backing store and records the slot address as the next
    /// argument.
    ///
    /// # Panics
    /// When the frame already holds [`MAX_FRAME_ARGS`] arguments, or the backing store is
    /// exhausted.
    pub fn push_value<T: GodotAbi + Copy>(&mut self, value: T) {
        let size = std::mem::size_of::<T>();
        // Word alignment satisfies every trivially copyable argument type.
        let offset = (self.value_bytes + 7) & !7;

        assert!(
            offset + size <= MAX_FRAME_BYTES - self.ret_bytes,
            "call frame overflow: backing store exhausted"
        );

        // SAFETY: offset stays inside storage; alignment is at least word-sized.
        let slot = unsafe { (self.storage.as_mut_ptr() as *mut u8).add(offset) as *mut T };
        unsafe { slot.write_unaligned(value) };

        self.value_bytes = offset + size;
        self.push_raw_entry(slot as *const c_void);
    }

    /// Records the ABI pointer of `value` as the next argument slot, without copying. The caller
    /// must keep `value` alive until dispatch.
    ///
    /// # Panics
    /// When the frame already holds [`MAX_FRAME_ARGS`] arguments.
    pub fn push_arg<T: GodotAbi>(&mut self, value: &T) {
        self.push_raw_entry(value.as_arg_ptr());
    }

    /// Records a raw pointer entry. Used for variadic tails, where entries are variant pointers.
    ///
    /// # Panics
    /// When the frame already holds [`MAX_FRAME_ARGS`] arguments.
    pub fn push_raw_entry(&mut self, entry: *const c_void) {
        assert!(
            self.arg_count < MAX_FRAME_ARGS,
            "call frame overflow: more than {MAX_FRAME_ARGS} arguments"
        );

        self.ptrs[self.arg_count] = entry;
        self.arg_count += 1;
    }

    /// Reserves the return slot for a value of type `T` (carved from the back of the backing
    /// store) and returns its address.
    ///
    /// # Panics
    /// When called twice on the same frame, or when the slot would collide with pushed values.
    pub fn return_slot<T: GodotAbi>(&mut self) -> sys::GDExtensionTypePtr {
        assert!(!self.has_ret, "call frame already has a return slot");

        let size = std::mem::size_of::<T>().max(1);
        // 16-byte alignment from the back, matching the storage element alignment.
        let offset = (MAX_FRAME_BYTES - size) & !15;
        assert!(
            offset >= self.value_bytes,
            "call frame overflow: return type too large"
        );

        self.has_ret = true;
        self.ret_bytes = MAX_FRAME_BYTES - offset;

        // SAFETY: offset stays inside storage.
        unsafe { (self.storage.as_mut_ptr() as *mut u8).add(offset) as sys::GDExtensionTypePtr }
    }

    /// Reads the return slot after the engine has written it.
    ///
    /// # Safety
    /// [`return_slot::<T>`](Self::return_slot) must have been called with the same `T`, and the
    /// engine must have initialized the slot with a value of that type.
    pub unsafe fn take_return<T: GodotAbi>(&mut self) -> T {
        debug_assert!(self.has_ret, "take_return without return_slot");

        let offset = MAX_FRAME_BYTES - self.ret_bytes;
        T::from_abi((self.storage.as_mut_ptr() as *mut u8).add(offset) as sys::GDExtensionTypePtr)
    }

    /// Address of the argument pointer array. Non-null even for zero arguments, as the engine
    /// ABI requires.
    pub fn args_ptr(&self) -> *const sys::GDExtensionConstTypePtr {
        self.ptrs.as_ptr()
    }

    /// Same array viewed as variant pointers, for the variadic call ABI.
    pub fn variant_args_ptr(&self) -> *const sys::GDExtensionConstVariantPtr {
        self.ptrs.as_ptr() as *const sys::GDExtensionConstVariantPtr
    }

    pub fn arg_count(&self) -> usize {
        self.arg_count
    }
}

impl Default for CallFrame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_frame_has_valid_args_ptr() {
        let frame = CallFrame::new();

        assert_eq!(frame.arg_count(), 0);
        assert!(!frame.args_ptr().is_null());
    }

    #[test]
    fn push_value_copies_into_frame() {
        let mut frame = CallFrame::new();

        // Values come from expressions; the frame must not depend on caller storage.
        frame.push_value(10_i64);
        frame.push_value(2.5_f64);
        frame.push_value(true);

        assert_eq!(frame.arg_count(), 3);
        unsafe {
            let ptrs = std::slice::from_raw_parts(frame.args_ptr(), 3);
            assert_eq!((ptrs[0] as *const i64).read_unaligned(), 10);
            assert_eq!((ptrs[1] as *const f64).read_unaligned(), 2.5);
            assert!((ptrs[2] as *const bool).read_unaligned());
        }
    }

    #[test]
    fn push_arg_records_addresses_in_order() {
        let mut frame = CallFrame::new();
        let a: i64 = 10;
        let b: f64 = 2.5;

        frame.push_arg(&a);
        frame.push_arg(&b);

        assert_eq!(frame.arg_count(), 2);
        unsafe {
            let ptrs = std::slice::from_raw_parts(frame.args_ptr(), 2);
            assert_eq!(ptrs[0] as *const i64, &a as *const i64);
            assert_eq!((ptrs[1] as *const f64).read_unaligned(), 2.5);
        }
    }

    #[test]
    fn return_slot_roundtrip() {
        let mut frame = CallFrame::new();
        let ret_ptr = frame.return_slot::<i64>();

        // Engine side: write the return value into the slot.
        unsafe {
            *(ret_ptr as *mut i64) = -77;
            assert_eq!(frame.take_return::<i64>(), -77);
        }
    }

    #[test]
    fn values_and_return_slot_share_storage() {
        let mut frame = CallFrame::new();
        frame.push_value(1_i64);
        let ret_ptr = frame.return_slot::<f64>();

        unsafe {
            *(ret_ptr as *mut f64) = 0.5;

            let ptrs = std::slice::from_raw_parts(frame.args_ptr(), 1);
            assert_eq!((ptrs[0] as *const i64).read_unaligned(), 1);
            assert_eq!(frame.take_return::<f64>(), 0.5);
        }
    }

    #[test]
    #[should_panic(expected = "already has a return slot")]
    fn second_return_slot_panics() {
        let mut frame = CallFrame::new();
        let _ = frame.return_slot::<i64>();
        let _ = frame.return_slot::<f64>();
    }

    #[test]
    #[should_panic(expected = "call frame overflow")]
    fn arg_overflow_panics() {
        let mut frame = CallFrame::new();
        let value: i64 = 0;
        for _ in 0..=MAX_FRAME_ARGS {
            frame.push_arg(&value);
        }
    }

    #[test]
    #[should_panic(expected = "backing store exhausted")]
    fn value_overflow_panics() {
        let mut frame = CallFrame::new();
        for _ in 0..=(MAX_FRAME_BYTES / 8) {
            frame.push_value(0_i64);
        }
    }
}
