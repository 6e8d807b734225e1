/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Per-builtin constructor/destructor/operator table, resolved once at initialization.
//!
//! The engine hands these out through `variant_get_ptr_constructor` (index 0 = default, 1 = copy),
//! `variant_get_ptr_destructor` and `variant_get_ptr_operator_evaluator`. Builtin wrappers in the
//! layer above dispatch through this table via `builtin_fn!`.

use crate::{
    GDExtensionConstTypePtr, GDExtensionInterface, GDExtensionTypePtr,
    GDExtensionUninitializedTypePtr, VariantOperator, VariantType,
};

pub type BuiltinConstructorFn =
    unsafe extern "C" fn(GDExtensionUninitializedTypePtr, *const GDExtensionConstTypePtr);
pub type BuiltinDestructorFn = unsafe extern "C" fn(GDExtensionTypePtr);
pub type BuiltinOperatorFn =
    unsafe extern "C" fn(GDExtensionConstTypePtr, GDExtensionConstTypePtr, GDExtensionTypePtr);

macro_rules! builtin_fn_ty {
    (ctor) => { BuiltinConstructorFn };
    (dtor) => { BuiltinDestructorFn };
    (operator) => { BuiltinOperatorFn };
}

macro_rules! builtin_method_table {
    (
        $( $name:ident = $kind:ident ( $($args:tt)* ); )*
    ) => {
        pub struct BuiltinMethodTable {
            $( pub $name: builtin_fn_ty!($kind), )*
        }

        impl BuiltinMethodTable {
            /// # Safety
            /// `interface` must be fully loaded.
            pub(crate) unsafe fn load(interface: &GDExtensionInterface) -> Self {
                let get_ctor = interface
                    .variant_get_ptr_constructor
                    .expect("variant_get_ptr_constructor not loaded");
                let get_dtor = interface
                    .variant_get_ptr_destructor
                    .expect("variant_get_ptr_destructor not loaded");
                let get_op = interface
                    .variant_get_ptr_operator_evaluator
                    .expect("variant_get_ptr_operator_evaluator not loaded");

                Self {
                    $(
                        $name: builtin_method_table!(@load $kind($($args)*) get_ctor get_dtor get_op)
                            .unwrap_or_else(|| {
                                panic!("engine did not supply builtin entry `{}`", stringify!($name))
                            }),
                    )*
                }
            }
        }
    };

    (@load ctor($Ty:ident, $index:expr) $get_ctor:ident $get_dtor:ident $get_op:ident) => {
        $get_ctor(VariantType::$Ty.sys(), $index)
    };
    (@load dtor($Ty:ident) $get_ctor:ident $get_dtor:ident $get_op:ident) => {
        $get_dtor(VariantType::$Ty.sys())
    };
    (@load operator($Op:ident, $Ty:ident) $get_ctor:ident $get_dtor:ident $get_op:ident) => {
        $get_op(
            VariantOperator::$Op.sys(),
            VariantType::$Ty.sys(),
            VariantType::$Ty.sys(),
        )
    };
}

builtin_method_table! {
    string_construct_default = ctor(String, 0);
    string_construct_copy = ctor(String, 1);
    string_destroy = dtor(String);
    string_operator_equal = operator(Equal, String);
    string_operator_less = operator(Less, String);

    string_name_construct_default = ctor(StringName, 0);
    string_name_construct_copy = ctor(StringName, 1);
    string_name_destroy = dtor(StringName);
    string_name_operator_equal = operator(Equal, StringName);

    node_path_construct_default = ctor(NodePath, 0);
    node_path_construct_copy = ctor(NodePath, 1);
    // Constructor 2 takes a single String argument.
    node_path_from_string = ctor(NodePath, 2);
    node_path_destroy = dtor(NodePath);
    node_path_operator_equal = operator(Equal, NodePath);

    array_construct_default = ctor(Array, 0);
    array_construct_copy = ctor(Array, 1);
    array_destroy = dtor(Array);
    array_operator_equal = operator(Equal, Array);

    dictionary_construct_default = ctor(Dictionary, 0);
    dictionary_construct_copy = ctor(Dictionary, 1);
    dictionary_destroy = dtor(Dictionary);
    dictionary_operator_equal = operator(Equal, Dictionary);

    callable_construct_default = ctor(Callable, 0);
    callable_construct_copy = ctor(Callable, 1);
    // Constructor 2 takes (Object, StringName).
    callable_from_object_method = ctor(Callable, 2);
    callable_destroy = dtor(Callable);
    callable_operator_equal = operator(Equal, Callable);

    signal_construct_default = ctor(Signal, 0);
    signal_construct_copy = ctor(Signal, 1);
    // Constructor 2 takes (Object, StringName).
    signal_from_object_signal = ctor(Signal, 2);
    signal_destroy = dtor(Signal);
    signal_operator_equal = operator(Equal, Signal);

    packed_byte_array_construct_default = ctor(PackedByteArray, 0);
    packed_byte_array_construct_copy = ctor(PackedByteArray, 1);
    packed_byte_array_destroy = dtor(PackedByteArray);
    packed_byte_array_operator_equal = operator(Equal, PackedByteArray);

    packed_int32_array_construct_default = ctor(PackedInt32Array, 0);
    packed_int32_array_construct_copy = ctor(PackedInt32Array, 1);
    packed_int32_array_destroy = dtor(PackedInt32Array);
    packed_int32_array_operator_equal = operator(Equal, PackedInt32Array);

    packed_int64_array_construct_default = ctor(PackedInt64Array, 0);
    packed_int64_array_construct_copy = ctor(PackedInt64Array, 1);
    packed_int64_array_destroy = dtor(PackedInt64Array);
    packed_int64_array_operator_equal = operator(Equal, PackedInt64Array);

    packed_float32_array_construct_default = ctor(PackedFloat32Array, 0);
    packed_float32_array_construct_copy = ctor(PackedFloat32Array, 1);
    packed_float32_array_destroy = dtor(PackedFloat32Array);
    packed_float32_array_operator_equal = operator(Equal, PackedFloat32Array);

    packed_float64_array_construct_default = ctor(PackedFloat64Array, 0);
    packed_float64_array_construct_copy = ctor(PackedFloat64Array, 1);
    packed_float64_array_destroy = dtor(PackedFloat64Array);
    packed_float64_array_operator_equal = operator(Equal, PackedFloat64Array);

    packed_string_array_construct_default = ctor(PackedStringArray, 0);
    packed_string_array_construct_copy = ctor(PackedStringArray, 1);
    packed_string_array_destroy = dtor(PackedStringArray);
    packed_string_array_operator_equal = operator(Equal, PackedStringArray);

    packed_vector2_array_construct_default = ctor(PackedVector2Array, 0);
    packed_vector2_array_construct_copy = ctor(PackedVector2Array, 1);
    packed_vector2_array_destroy = dtor(PackedVector2Array);
    packed_vector2_array_operator_equal = operator(Equal, PackedVector2Array);

    packed_vector3_array_construct_default = ctor(PackedVector3Array, 0);
    packed_vector3_array_construct_copy = ctor(PackedVector3Array, 1);
    packed_vector3_array_destroy = dtor(PackedVector3Array);
    packed_vector3_array_operator_equal = operator(Equal, PackedVector3Array);

    packed_vector4_array_construct_default = ctor(PackedVector4Array, 0);
    packed_vector4_array_construct_copy = ctor(PackedVector4Array, 1);
    packed_vector4_array_destroy = dtor(PackedVector4Array);
    packed_vector4_array_operator_equal = operator(Equal, PackedVector4Array);

    packed_color_array_construct_default = ctor(PackedColorArray, 0);
    packed_color_array_construct_copy = ctor(PackedColorArray, 1);
    packed_color_array_destroy = dtor(PackedColorArray);
    packed_color_array_operator_equal = operator(Equal, PackedColorArray);
}
