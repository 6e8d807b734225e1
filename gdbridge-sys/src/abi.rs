/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate as sys;

/// Which flavor of pointer call is being made.
///
/// Virtual calls encode object arguments differently from standard calls: objects that inherit
/// the engine's ref-counted base are passed as `Ref<T>*` instead of `T**`, and must be converted
/// through `ref_get_object` / `ref_set_object`.
#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
pub enum PtrcallKind {
    #[default]
    Standard,
    Virtual,
}

/// Types that directly and fully represent some engine type.
///
/// Adds methods to convert from and to engine ABI pointers. See [`crate::abi_methods`] for
/// ergonomic implementation.
///
/// # Safety
///
/// [`from_arg_ptr`](GodotAbi::from_arg_ptr) and [`move_return_ptr`](GodotAbi::move_return_ptr)
/// must properly initialize and clean up values given the [`PtrcallKind`] provided by the caller.
pub unsafe trait GodotAbi {
    /// The variant kind this type maps to in the engine's tagged union.
    fn variant_type() -> sys::VariantType;

    fn param_metadata() -> sys::GDExtensionClassMethodArgumentMetadata {
        sys::GDEXTENSION_METHOD_ARGUMENT_METADATA_NONE
    }

    /// Construct from an engine type pointer, without any reference bookkeeping.
    ///
    /// # Safety
    /// `ptr` must be a valid _type ptr_ encoding `Self` per the engine's per-type convention, and
    /// the value behind it must not require refcount adjustment on read.
    unsafe fn from_abi(ptr: sys::GDExtensionTypePtr) -> Self;

    /// Construct uninitialized storage, then let `init_fn` fill it through the engine.
    ///
    /// # Safety
    /// `init_fn` must fully initialize the value behind the pointer it receives.
    unsafe fn from_abi_init(init_fn: impl FnOnce(sys::GDExtensionUninitializedTypePtr)) -> Self;

    /// Like [`from_abi_init`](Self::from_abi_init), but pre-initializes the destination with a
    /// default instance first.
    ///
    /// Some engine entry points expect a pre-existing value at the destination (copy-on-write
    /// containers like arrays, dictionaries and strings).
    ///
    /// # Safety
    /// See [`from_abi_init`](Self::from_abi_init).
    unsafe fn from_abi_init_default(init_fn: impl FnOnce(sys::GDExtensionTypePtr)) -> Self
    where
        Self: Sized,
    {
        Self::from_abi_init(|ptr| init_fn(ptr))
    }

    /// Engine pointer to this value's storage.
    ///
    /// `*mut` despite `&self`, because the engine ABI is not const-correct.
    fn abi(&self) -> sys::GDExtensionTypePtr;

    fn abi_mut(&mut self) -> sys::GDExtensionTypePtr {
        self.abi()
    }

    fn abi_const(&self) -> sys::GDExtensionConstTypePtr {
        self.abi() as sys::GDExtensionConstTypePtr
    }

    /// Pointer placed into the call frame's argument array for this value.
    fn as_arg_ptr(&self) -> sys::GDExtensionConstTypePtr {
        self.abi_const()
    }

    /// Construct from a pointer to an argument in an inbound call.
    ///
    /// # Safety
    /// `ptr` must encode `Self` according to `kind`'s encoding of argument values.
    unsafe fn from_arg_ptr(ptr: sys::GDExtensionTypePtr, kind: PtrcallKind) -> Self;

    /// Move `self` into the return slot `dst`, surrendering ownership to the caller.
    ///
    /// # Safety
    /// `dst` must be able to accept a value of type `Self` encoded according to `kind`'s encoding
    /// of return values.
    unsafe fn move_return_ptr(self, dst: sys::GDExtensionTypePtr, kind: PtrcallKind);
}

/// Types that can represent null values at the ABI boundary.
///
/// Used to blanket-convert `Option<T>` at binding boundaries; implemented for object wrappers.
pub trait GodotNullableAbi: Sized + GodotAbi {
    fn null() -> Self;
    fn is_null(&self) -> bool;
}

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Implementation macros
//
// Two storage patterns exist:
// * `*mut Opaque` -- the wrapper stores an engine blob in an `opaque` field; the ADDRESS of that
//   field is the ABI pointer. Expects a `from_opaque()` constructor.
// * `*mut Self`   -- the value is laid out identically to the engine's own representation; the
//   address of `Self` is reinterpreted as the ABI pointer.

#[macro_export]
#[doc(hidden)]
macro_rules! abi_methods_one {
    (OpaquePtr $Ptr:ty; $( #[$attr:meta] )? $vis:vis $fn_name:ident = from_abi) => {
        $( #[$attr] )? $vis
        unsafe fn $fn_name(ptr: $Ptr) -> Self {
            let opaque = std::ptr::read(ptr as *mut _);
            Self::from_opaque(opaque)
        }
    };
    (OpaquePtr $Ptr:ty; $( #[$attr:meta] )? $vis:vis $fn_name:ident = from_abi_init) => {
        $( #[$attr] )? $vis
        unsafe fn $fn_name(init_fn: impl FnOnce($Ptr)) -> Self {
            let mut raw = std::mem::MaybeUninit::uninit();
            init_fn(raw.as_mut_ptr() as $Ptr);
            Self::from_opaque(raw.assume_init())
        }
    };
    (OpaquePtr $Ptr:ty; $( #[$attr:meta] )? $vis:vis $fn_name:ident = abi) => {
        $( #[$attr] )? $vis
        fn $fn_name(&self) -> $Ptr {
            &self.opaque as *const _ as $Ptr
        }
    };
    (OpaquePtr $Ptr:ty; $( #[$attr:meta] )? $vis:vis $fn_name:ident = from_arg_ptr) => {
        $( #[$attr] )? $vis
        unsafe fn $fn_name(ptr: $Ptr, _kind: $crate::PtrcallKind) -> Self {
            Self::from_abi(ptr as *mut _)
        }
    };
    (OpaquePtr $Ptr:ty; $( #[$attr:meta] )? $vis:vis $fn_name:ident = move_return_ptr) => {
        $( #[$attr] )? $vis
        unsafe fn $fn_name(mut self, dst: $Ptr, _kind: $crate::PtrcallKind) {
            std::ptr::swap(dst as *mut _, std::ptr::addr_of_mut!(self.opaque))
        }
    };

    (SelfPtr $Ptr:ty; $( #[$attr:meta] )? $vis:vis $fn_name:ident = from_abi) => {
        $( #[$attr] )? $vis
        unsafe fn $fn_name(ptr: $Ptr) -> Self {
            *(ptr as *mut Self)
        }
    };
    (SelfPtr $Ptr:ty; $( #[$attr:meta] )? $vis:vis $fn_name:ident = from_abi_init) => {
        $( #[$attr] )? $vis
        unsafe fn $fn_name(init_fn: impl FnOnce($Ptr)) -> Self {
            let mut raw = std::mem::MaybeUninit::<Self>::uninit();
            init_fn(raw.as_mut_ptr() as $Ptr);
            raw.assume_init()
        }
    };
    (SelfPtr $Ptr:ty; $( #[$attr:meta] )? $vis:vis $fn_name:ident = abi) => {
        $( #[$attr] )? $vis
        fn $fn_name(&self) -> $Ptr {
            self as *const Self as $Ptr
        }
    };
    (SelfPtr $Ptr:ty; $( #[$attr:meta] )? $vis:vis $fn_name:ident = from_arg_ptr) => {
        $( #[$attr] )? $vis
        unsafe fn $fn_name(ptr: $Ptr, _kind: $crate::PtrcallKind) -> Self {
            *(ptr as *mut Self)
        }
    };
    (SelfPtr $Ptr:ty; $( #[$attr:meta] )? $vis:vis $fn_name:ident = move_return_ptr) => {
        $( #[$attr] )? $vis
        unsafe fn $fn_name(self, dst: $Ptr, _kind: $crate::PtrcallKind) {
            *(dst as *mut Self) = self
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! abi_methods_rest {
    ( // Custom method names, annotated with 'pub'; for inherent "sys-style" accessors.
        $Impl:ident $Ptr:ty; $( fn $user_fn:ident = $abi_fn:ident; )*
    ) => {
        $( $crate::abi_methods_one!($Impl $Ptr; #[doc(hidden)] pub $user_fn = $abi_fn); )*
    };

    ( // Trait methods with canonical names.
        $Impl:ident $Ptr:ty; $( fn $abi_fn:ident; )*
    ) => {
        $( $crate::abi_methods_one!($Impl $Ptr; $abi_fn = $abi_fn); )*
    };

    ( // All 5 trait methods.
        $Impl:ident $Ptr:ty; ..
    ) => {
        $crate::abi_methods_one!($Impl $Ptr; from_abi = from_abi);
        $crate::abi_methods_one!($Impl $Ptr; from_abi_init = from_abi_init);
        $crate::abi_methods_one!($Impl $Ptr; abi = abi);
        $crate::abi_methods_one!($Impl $Ptr; from_arg_ptr = from_arg_ptr);
        $crate::abi_methods_one!($Impl $Ptr; move_return_ptr = move_return_ptr);
    };
}

/// Provides ABI exchange methods for integration with engine pointer calls.
///
/// See the module notes above for the two storage patterns (`*mut Opaque`, `*mut Self`).
#[macro_export]
macro_rules! abi_methods {
    (
        type $Ptr:ty = *mut Opaque;
        $( $rest:tt )*
    ) => {
        $crate::abi_methods_rest!(OpaquePtr $Ptr; $($rest)*);
    };

    (
        type $Ptr:ty = *mut Self;
        $( $rest:tt )*
    ) => {
        $crate::abi_methods_rest!(SelfPtr $Ptr; $($rest)*);
    };
}

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Scalar impls (here due to orphan rule)

mod scalars {
    use super::GodotAbi;
    use crate as sys;

    // SAFETY: represented as itself in the engine ABI.
    unsafe impl GodotAbi for bool {
        fn variant_type() -> sys::VariantType {
            sys::VariantType::Bool
        }

        sys::abi_methods! { type sys::GDExtensionTypePtr = *mut Self; .. }
    }

    // SAFETY: `int` slots are 8 bytes wide in pointer calls.
    unsafe impl GodotAbi for i64 {
        fn variant_type() -> sys::VariantType {
            sys::VariantType::Int
        }

        fn param_metadata() -> sys::GDExtensionClassMethodArgumentMetadata {
            sys::GDEXTENSION_METHOD_ARGUMENT_METADATA_INT_IS_INT64
        }

        sys::abi_methods! { type sys::GDExtensionTypePtr = *mut Self; .. }
    }

    // SAFETY: `float` slots are 8 bytes wide in pointer calls.
    unsafe impl GodotAbi for f64 {
        fn variant_type() -> sys::VariantType {
            sys::VariantType::Float
        }

        fn param_metadata() -> sys::GDExtensionClassMethodArgumentMetadata {
            sys::GDEXTENSION_METHOD_ARGUMENT_METADATA_REAL_IS_DOUBLE
        }

        sys::abi_methods! { type sys::GDExtensionTypePtr = *mut Self; .. }
    }

    // SAFETY: the unit type has no storage; reads and writes are no-ops, matching the engine's
    // treatment of void returns (return slot may be null or a zeroed placeholder).
    unsafe impl GodotAbi for () {
        fn variant_type() -> sys::VariantType {
            sys::VariantType::Nil
        }

        unsafe fn from_abi(_ptr: sys::GDExtensionTypePtr) -> Self {}

        unsafe fn from_abi_init(init_fn: impl FnOnce(sys::GDExtensionUninitializedTypePtr)) -> Self {
            // The engine accepts a null return slot for void calls; the call itself must still
            // be issued.
            init_fn(std::ptr::null_mut())
        }

        fn abi(&self) -> sys::GDExtensionTypePtr {
            // ZST dummy pointer
            self as *const _ as sys::GDExtensionTypePtr
        }

        unsafe fn from_arg_ptr(_ptr: sys::GDExtensionTypePtr, _kind: super::PtrcallKind) -> Self {}

        unsafe fn move_return_ptr(self, _dst: sys::GDExtensionTypePtr, _kind: super::PtrcallKind) {}
    }
}
