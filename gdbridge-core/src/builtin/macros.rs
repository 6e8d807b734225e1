/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Macros wiring builtin wrappers to the engine's constructor/destructor/operator table.

macro_rules! impl_builtin_traits_inner {
    ( Default for $Type:ty => $gd_method:ident ) => {
        impl Default for $Type {
            #[inline]
            fn default() -> Self {
                // SAFETY: default constructor fully initializes the slot.
                unsafe {
                    Self::from_abi_init(|self_ptr| {
                        let ctor = sys::builtin_fn!($gd_method);
                        ctor(self_ptr, std::ptr::null());
                    })
                }
            }
        }
    };

    ( Clone for $Type:ty => $gd_method:ident ) => {
        impl Clone for $Type {
            #[inline]
            fn clone(&self) -> Self {
                self.ensure_live();

                // SAFETY: copy constructor with one live argument.
                unsafe {
                    Self::from_abi_init(|self_ptr| {
                        let ctor = sys::builtin_fn!($gd_method);
                        let args = [self.abi_const()];
                        ctor(self_ptr, args.as_ptr());
                    })
                }
            }
        }
    };

    ( Drop for $Type:ty => $gd_method:ident ) => {
        impl Drop for $Type {
            #[inline]
            fn drop(&mut self) {
                // Already released through end(); nothing left to destroy.
                if !crate::registry::handles::invalidate(self.ticket) {
                    return;
                }

                // SAFETY: ticket was live, so the engine-side storage still exists.
                unsafe {
                    let dtor = sys::builtin_fn!($gd_method);
                    dtor(self.abi_mut());
                }
            }
        }
    };

    ( PartialEq for $Type:ty => $gd_method:ident ) => {
        impl PartialEq for $Type {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.ensure_live();
                other.ensure_live();

                let mut result = false;
                // SAFETY: operator evaluator over two live operands.
                unsafe {
                    let op = sys::builtin_fn!($gd_method);
                    op(self.abi_const(), other.abi_const(), result.abi_mut());
                }
                result
            }
        }
    };

    ( Eq for $Type:ty => $gd_method:ident ) => {
        impl_builtin_traits_inner!(PartialEq for $Type => $gd_method);
        impl Eq for $Type {}
    };

    ( PartialOrd for $Type:ty => $gd_method:ident ) => {
        impl PartialOrd for $Type {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                let op_less = |lhs: &Self, rhs: &Self| {
                    let mut result = false;
                    // SAFETY: as in PartialEq.
                    unsafe {
                        let op = sys::builtin_fn!($gd_method);
                        op(lhs.abi_const(), rhs.abi_const(), result.abi_mut());
                    }
                    result
                };

                if op_less(self, other) {
                    Some(std::cmp::Ordering::Less)
                } else if op_less(other, self) {
                    Some(std::cmp::Ordering::Greater)
                } else {
                    Some(std::cmp::Ordering::Equal)
                }
            }
        }
    };

    ( Ord for $Type:ty => $gd_method:ident ) => {
        impl_builtin_traits_inner!(PartialOrd for $Type => $gd_method);
        impl Ord for $Type {
            #[inline]
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                PartialOrd::partial_cmp(self, other)
                    .unwrap_or_else(|| unreachable!("builtin ordering is total"))
            }
        }
    };
}

/// Derives common traits for a builtin wrapper from engine-supplied functions.
macro_rules! impl_builtin_traits {
    (
        for $Type:ty {
            $( $Trait:ident => $gd_method:ident; )*
        }
    ) => {
        $(
            impl_builtin_traits_inner! { $Trait for $Type => $gd_method }
        )*
    };
}

/// Derives [`ToVariant`]/[`FromVariant`] through the engine's per-kind encoder/decoder pair.
///
/// The `live` flavor asserts the wrapper's generation before encoding (value containers); plain
/// types have nothing to check.
macro_rules! impl_variant_conversions {
    ( $T:ty ) => {
        impl_variant_conversions!(@impls $T, |_v: &$T| {});
    };
    ( $T:ty, live ) => {
        impl_variant_conversions!(@impls $T, |v: &$T| v.ensure_live());
    };
    ( @impls $T:ty, $check:expr ) => {
        impl crate::builtin::ToVariant for $T {
            fn to_variant(&self) -> crate::builtin::Variant {
                ($check)(self);

                // SAFETY: the engine encoder writes a fully initialized variant.
                unsafe {
                    crate::builtin::Variant::from_abi_init(|variant_ptr| {
                        let converter = sys::lifecycle_table()
                            .variant_from_type(<$T as sys::GodotAbi>::variant_type());
                        converter(
                            variant_ptr as sys::GDExtensionUninitializedVariantPtr,
                            sys::GodotAbi::abi(self),
                        );
                    })
                }
            }
        }

        impl crate::builtin::FromVariant for $T {
            fn try_from_variant(
                variant: &crate::builtin::Variant,
            ) -> Result<Self, crate::meta::ConvertError> {
                let expected = <$T as sys::GodotAbi>::variant_type();
                let found = variant.get_type();
                if found != expected {
                    return Err(crate::meta::ConvertError::new(found, expected));
                }

                // SAFETY: kind checked; the engine decoder writes an owned copy of the payload.
                let value = unsafe {
                    <$T as sys::GodotAbi>::from_abi_init(|type_ptr| {
                        let converter = sys::lifecycle_table().variant_to_type(expected);
                        converter(
                            type_ptr as sys::GDExtensionUninitializedTypePtr,
                            variant.variant_sys(),
                        );
                    })
                };
                Ok(value)
            }
        }
    };
}

/// Formatter body rendering through the engine's stringify, with a fallback for ended values.
macro_rules! fmt_via_stringify {
    () => {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            use crate::builtin::ToVariant;

            if self.is_live() {
                write!(f, "{}", self.to_variant().stringify())
            } else {
                f.write_str("<ended>")
            }
        }
    };
}

/// Generates the explicit-release API shared by all value containers.
///
/// `end()` is idempotent in effect: the first call releases the engine storage and ends the
/// wrapper's generation; later calls (and the eventual drop) detect the ended generation and do
/// nothing further.
macro_rules! impl_builtin_release {
    ( $Type:ty, $OpaqueTy:ty => $dtor:ident ) => {
        impl $Type {
            /// Releases the engine-side storage now instead of at drop.
            pub fn end(&mut self) {
                if !crate::registry::handles::invalidate(self.ticket) {
                    sys::out!(concat!("double end of ", stringify!($Type), " ignored"));
                    return;
                }

                // SAFETY: generation was live, so the storage exists exactly once.
                unsafe {
                    let dtor = sys::builtin_fn!($dtor);
                    dtor(self.abi_mut());
                }
                self.opaque = <$OpaqueTy>::zeroed();
            }

            /// Whether the engine-side storage is still live (not yet released).
            pub fn is_live(&self) -> bool {
                crate::registry::handles::is_live(self.ticket)
            }

            #[inline]
            pub(crate) fn ensure_live(&self) {
                assert!(
                    self.is_live(),
                    concat!(stringify!($Type), " used after end()")
                );
            }
        }
    };
}
