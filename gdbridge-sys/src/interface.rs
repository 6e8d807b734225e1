/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Hand-declared subset of the GDExtension C ABI.
//!
//! Declarations mirror `gdextension_interface.h`; names and layouts must match the engine header
//! bit-exactly. Only entry points the bridge actually consumes are declared. Since API 4.1, the
//! engine hands us a `get_proc_address` function instead of a monolithic struct; [`GDExtensionInterface::load`]
//! resolves every declared entry point once and fails loudly on the first missing symbol.

#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_int, c_void};

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Scalar + pointer aliases

pub type GDExtensionBool = u8;
pub type GDExtensionInt = i64;
pub type GDObjectInstanceID = u64;

pub type GDExtensionVariantType = u32;
pub type GDExtensionVariantOperator = u32;
pub type GDExtensionCallErrorType = u32;
pub type GDExtensionInitializationLevel = u32;
pub type GDExtensionClassMethodArgumentMetadata = u32;

pub type GDExtensionObjectPtr = *mut c_void;
pub type GDExtensionConstObjectPtr = *const c_void;
pub type GDExtensionTypePtr = *mut c_void;
pub type GDExtensionConstTypePtr = *const c_void;
pub type GDExtensionUninitializedTypePtr = *mut c_void;
pub type GDExtensionVariantPtr = *mut c_void;
pub type GDExtensionConstVariantPtr = *const c_void;
pub type GDExtensionUninitializedVariantPtr = *mut c_void;
pub type GDExtensionStringPtr = *mut c_void;
pub type GDExtensionConstStringPtr = *const c_void;
pub type GDExtensionUninitializedStringPtr = *mut c_void;
pub type GDExtensionStringNamePtr = *mut c_void;
pub type GDExtensionConstStringNamePtr = *const c_void;
pub type GDExtensionUninitializedStringNamePtr = *mut c_void;
pub type GDExtensionMethodBindPtr = *const c_void;
pub type GDExtensionClassLibraryPtr = *mut c_void;
pub type GDExtensionClassInstancePtr = *mut c_void;
pub type GDExtensionRefPtr = *mut c_void;
pub type GDExtensionConstRefPtr = *const c_void;

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Enum constants

pub const GDEXTENSION_CALL_OK: GDExtensionCallErrorType = 0;
pub const GDEXTENSION_CALL_ERROR_INVALID_METHOD: GDExtensionCallErrorType = 1;
pub const GDEXTENSION_CALL_ERROR_INVALID_ARGUMENT: GDExtensionCallErrorType = 2;
pub const GDEXTENSION_CALL_ERROR_TOO_MANY_ARGUMENTS: GDExtensionCallErrorType = 3;
pub const GDEXTENSION_CALL_ERROR_TOO_FEW_ARGUMENTS: GDExtensionCallErrorType = 4;
pub const GDEXTENSION_CALL_ERROR_INSTANCE_IS_NULL: GDExtensionCallErrorType = 5;
pub const GDEXTENSION_CALL_ERROR_METHOD_NOT_CONST: GDExtensionCallErrorType = 6;

pub const GDEXTENSION_INITIALIZATION_CORE: GDExtensionInitializationLevel = 0;
pub const GDEXTENSION_INITIALIZATION_SERVERS: GDExtensionInitializationLevel = 1;
pub const GDEXTENSION_INITIALIZATION_SCENE: GDExtensionInitializationLevel = 2;
pub const GDEXTENSION_INITIALIZATION_EDITOR: GDExtensionInitializationLevel = 3;

pub const GDEXTENSION_METHOD_ARGUMENT_METADATA_NONE: GDExtensionClassMethodArgumentMetadata = 0;
pub const GDEXTENSION_METHOD_ARGUMENT_METADATA_INT_IS_INT64:
    GDExtensionClassMethodArgumentMetadata = 6;
pub const GDEXTENSION_METHOD_ARGUMENT_METADATA_REAL_IS_DOUBLE:
    GDExtensionClassMethodArgumentMetadata = 10;

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Function pointer typedefs

pub type GDExtensionInterfaceFunctionPtr = Option<unsafe extern "C" fn()>;
pub type GDExtensionInterfaceGetProcAddress =
    Option<unsafe extern "C" fn(p_function_name: *const c_char) -> GDExtensionInterfaceFunctionPtr>;

pub type GDExtensionVariantFromTypeConstructorFunc =
    Option<unsafe extern "C" fn(GDExtensionUninitializedVariantPtr, GDExtensionTypePtr)>;
pub type GDExtensionTypeFromVariantConstructorFunc =
    Option<unsafe extern "C" fn(GDExtensionUninitializedTypePtr, GDExtensionVariantPtr)>;
pub type GDExtensionPtrConstructor =
    Option<unsafe extern "C" fn(GDExtensionUninitializedTypePtr, *const GDExtensionConstTypePtr)>;
pub type GDExtensionPtrDestructor = Option<unsafe extern "C" fn(GDExtensionTypePtr)>;
pub type GDExtensionPtrBuiltInMethod = Option<
    unsafe extern "C" fn(GDExtensionTypePtr, *const GDExtensionConstTypePtr, GDExtensionTypePtr, c_int),
>;
pub type GDExtensionPtrOperatorEvaluator = Option<
    unsafe extern "C" fn(GDExtensionConstTypePtr, GDExtensionConstTypePtr, GDExtensionTypePtr),
>;
pub type GDExtensionPtrUtilityFunction = Option<
    unsafe extern "C" fn(GDExtensionTypePtr, *const GDExtensionConstTypePtr, c_int),
>;

pub type GDExtensionClassCreateInstance =
    Option<unsafe extern "C" fn(p_class_userdata: *mut c_void) -> GDExtensionObjectPtr>;
pub type GDExtensionClassFreeInstance =
    Option<unsafe extern "C" fn(p_class_userdata: *mut c_void, GDExtensionClassInstancePtr)>;
pub type GDExtensionClassRecreateInstance = Option<
    unsafe extern "C" fn(
        p_class_userdata: *mut c_void,
        p_object: GDExtensionObjectPtr,
    ) -> GDExtensionClassInstancePtr,
>;
pub type GDExtensionClassCallVirtual = Option<
    unsafe extern "C" fn(GDExtensionClassInstancePtr, *const GDExtensionConstTypePtr, GDExtensionTypePtr),
>;
pub type GDExtensionClassGetVirtual = Option<
    unsafe extern "C" fn(
        p_class_userdata: *mut c_void,
        p_name: GDExtensionConstStringNamePtr,
    ) -> GDExtensionClassCallVirtual,
>;
pub type GDExtensionClassGetVirtualCallData = Option<
    unsafe extern "C" fn(p_class_userdata: *mut c_void, GDExtensionConstStringNamePtr) -> *mut c_void,
>;
pub type GDExtensionClassCallVirtualWithData = Option<
    unsafe extern "C" fn(
        GDExtensionClassInstancePtr,
        GDExtensionConstStringNamePtr,
        *mut c_void,
        *const GDExtensionConstTypePtr,
        GDExtensionTypePtr,
    ),
>;
pub type GDExtensionClassNotification2 =
    Option<unsafe extern "C" fn(GDExtensionClassInstancePtr, p_what: i32, p_reversed: GDExtensionBool)>;
pub type GDExtensionClassToString = Option<
    unsafe extern "C" fn(GDExtensionClassInstancePtr, *mut GDExtensionBool, GDExtensionStringPtr),
>;
pub type GDExtensionClassReference = Option<unsafe extern "C" fn(GDExtensionClassInstancePtr)>;
pub type GDExtensionClassUnreference = Option<unsafe extern "C" fn(GDExtensionClassInstancePtr)>;
pub type GDExtensionClassSet = Option<
    unsafe extern "C" fn(
        GDExtensionClassInstancePtr,
        GDExtensionConstStringNamePtr,
        GDExtensionConstVariantPtr,
    ) -> GDExtensionBool,
>;
pub type GDExtensionClassGet = Option<
    unsafe extern "C" fn(
        GDExtensionClassInstancePtr,
        GDExtensionConstStringNamePtr,
        GDExtensionVariantPtr,
    ) -> GDExtensionBool,
>;
pub type GDExtensionClassGetPropertyList = Option<
    unsafe extern "C" fn(GDExtensionClassInstancePtr, *mut u32) -> *const GDExtensionPropertyInfo,
>;
pub type GDExtensionClassFreePropertyList =
    Option<unsafe extern "C" fn(GDExtensionClassInstancePtr, *const GDExtensionPropertyInfo)>;
pub type GDExtensionClassPropertyCanRevert = Option<
    unsafe extern "C" fn(GDExtensionClassInstancePtr, GDExtensionConstStringNamePtr) -> GDExtensionBool,
>;
pub type GDExtensionClassPropertyGetRevert = Option<
    unsafe extern "C" fn(
        GDExtensionClassInstancePtr,
        GDExtensionConstStringNamePtr,
        GDExtensionVariantPtr,
    ) -> GDExtensionBool,
>;
pub type GDExtensionClassGetRID =
    Option<unsafe extern "C" fn(GDExtensionClassInstancePtr) -> u64>;

pub type GDExtensionInstanceBindingCreateCallback =
    Option<unsafe extern "C" fn(p_token: *mut c_void, p_instance: *mut c_void) -> *mut c_void>;
pub type GDExtensionInstanceBindingFreeCallback =
    Option<unsafe extern "C" fn(p_token: *mut c_void, p_instance: *mut c_void, p_binding: *mut c_void)>;
pub type GDExtensionInstanceBindingReferenceCallback = Option<
    unsafe extern "C" fn(
        p_token: *mut c_void,
        p_binding: *mut c_void,
        p_reference: GDExtensionBool,
    ) -> GDExtensionBool,
>;

pub type GDExtensionCallableCustomCall = Option<
    unsafe extern "C" fn(
        p_userdata: *mut c_void,
        p_args: *const GDExtensionConstVariantPtr,
        p_argument_count: GDExtensionInt,
        r_return: GDExtensionVariantPtr,
        r_error: *mut GDExtensionCallError,
    ),
>;
pub type GDExtensionCallableCustomIsValid =
    Option<unsafe extern "C" fn(p_userdata: *mut c_void) -> GDExtensionBool>;
pub type GDExtensionCallableCustomFree = Option<unsafe extern "C" fn(p_userdata: *mut c_void)>;
pub type GDExtensionCallableCustomHash =
    Option<unsafe extern "C" fn(p_userdata: *mut c_void) -> u32>;
pub type GDExtensionCallableCustomEqual =
    Option<unsafe extern "C" fn(p_a: *mut c_void, p_b: *mut c_void) -> GDExtensionBool>;
pub type GDExtensionCallableCustomLessThan =
    Option<unsafe extern "C" fn(p_a: *mut c_void, p_b: *mut c_void) -> GDExtensionBool>;
pub type GDExtensionCallableCustomToString = Option<
    unsafe extern "C" fn(p_userdata: *mut c_void, r_is_valid: *mut GDExtensionBool, r_out: GDExtensionStringPtr),
>;

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Structs

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct GDExtensionGodotVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub string: *const c_char,
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct GDExtensionCallError {
    pub error: GDExtensionCallErrorType,
    pub argument: i32,
    pub expected: i32,
}

#[repr(C)]
pub struct GDExtensionInitialization {
    pub minimum_initialization_level: GDExtensionInitializationLevel,
    pub userdata: *mut c_void,
    pub initialize:
        Option<unsafe extern "C" fn(p_userdata: *mut c_void, p_level: GDExtensionInitializationLevel)>,
    pub deinitialize:
        Option<unsafe extern "C" fn(p_userdata: *mut c_void, p_level: GDExtensionInitializationLevel)>,
}

#[repr(C)]
pub struct GDExtensionPropertyInfo {
    pub type_: GDExtensionVariantType,
    pub name: GDExtensionStringNamePtr,
    pub class_name: GDExtensionStringNamePtr,
    pub hint: u32,
    pub hint_string: GDExtensionStringPtr,
    pub usage: u32,
}

#[repr(C)]
pub struct GDExtensionInstanceBindingCallbacks {
    pub create_callback: GDExtensionInstanceBindingCreateCallback,
    pub free_callback: GDExtensionInstanceBindingFreeCallback,
    pub reference_callback: GDExtensionInstanceBindingReferenceCallback,
}

#[repr(C)]
pub struct GDExtensionCallableCustomInfo {
    pub callable_userdata: *mut c_void,
    pub token: *mut c_void,
    pub object_id: GDObjectInstanceID,
    pub call_func: GDExtensionCallableCustomCall,
    pub is_valid_func: GDExtensionCallableCustomIsValid,
    pub free_func: GDExtensionCallableCustomFree,
    pub hash_func: GDExtensionCallableCustomHash,
    pub equal_func: GDExtensionCallableCustomEqual,
    pub less_than_func: GDExtensionCallableCustomLessThan,
    pub to_string_func: GDExtensionCallableCustomToString,
}

/// Class-descriptor record supplied at registration (API 4.2 revision).
#[repr(C)]
pub struct GDExtensionClassCreationInfo2 {
    pub is_virtual: GDExtensionBool,
    pub is_abstract: GDExtensionBool,
    pub is_exposed: GDExtensionBool,
    pub set_func: GDExtensionClassSet,
    pub get_func: GDExtensionClassGet,
    pub get_property_list_func: GDExtensionClassGetPropertyList,
    pub free_property_list_func: GDExtensionClassFreePropertyList,
    pub property_can_revert_func: GDExtensionClassPropertyCanRevert,
    pub property_get_revert_func: GDExtensionClassPropertyGetRevert,
    pub notification_func: GDExtensionClassNotification2,
    pub to_string_func: GDExtensionClassToString,
    pub reference_func: GDExtensionClassReference,
    pub unreference_func: GDExtensionClassUnreference,
    pub create_instance_func: GDExtensionClassCreateInstance,
    pub free_instance_func: GDExtensionClassFreeInstance,
    pub recreate_instance_func: GDExtensionClassRecreateInstance,
    pub get_virtual_func: GDExtensionClassGetVirtual,
    pub get_virtual_call_data_func: GDExtensionClassGetVirtualCallData,
    pub call_virtual_with_data_func: GDExtensionClassCallVirtualWithData,
    pub get_rid_func: GDExtensionClassGetRID,
    pub class_userdata: *mut c_void,
}

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Interface table

macro_rules! interface_decl {
    (
        $( $name:ident : $Fn:ty; )*
    ) => {
        /// Resolved engine entry points, loaded once per session.
        ///
        /// Field names match the `p_function_name` strings understood by `get_proc_address`.
        #[allow(non_snake_case)]
        pub struct GDExtensionInterface {
            $( pub $name: $Fn, )*
        }

        impl GDExtensionInterface {
            /// Resolves every declared entry point through `get_proc_address`.
            ///
            /// # Panics
            /// If any entry point is missing. A missing symbol means the engine predates the
            /// declared ABI revision; continuing would dispatch through null pointers.
            ///
            /// # Safety
            /// `get_proc_address` must be the loader function handed over by the engine at
            /// extension entry.
            pub unsafe fn load(get_proc_address: GDExtensionInterfaceGetProcAddress) -> Self {
                let get_proc_address = get_proc_address.expect("engine handed null get_proc_address");

                $(
                    let name_cstr = concat!(stringify!($name), "\0");
                    let raw = get_proc_address(name_cstr.as_ptr() as *const c_char);
                    assert!(
                        raw.is_some(),
                        "GDExtension entry point `{}` not found; engine too old for this ABI subset",
                        stringify!($name)
                    );
                    // SAFETY: the engine guarantees that the symbol registered under this name has
                    // the signature documented in gdextension_interface.h, which $Fn mirrors.
                    let $name = std::mem::transmute::<GDExtensionInterfaceFunctionPtr, $Fn>(raw);
                )*

                Self { $( $name, )* }
            }
        }
    };
}

interface_decl! {
    // Misc
    get_godot_version: Option<unsafe extern "C" fn(*mut GDExtensionGodotVersion)>;
    print_error: Option<unsafe extern "C" fn(*const c_char, *const c_char, *const c_char, i32, GDExtensionBool)>;
    print_warning: Option<unsafe extern "C" fn(*const c_char, *const c_char, *const c_char, i32, GDExtensionBool)>;

    // Variant lifecycle + dynamic dispatch
    variant_new_copy: Option<unsafe extern "C" fn(GDExtensionUninitializedVariantPtr, GDExtensionConstVariantPtr)>;
    variant_new_nil: Option<unsafe extern "C" fn(GDExtensionUninitializedVariantPtr)>;
    variant_destroy: Option<unsafe extern "C" fn(GDExtensionVariantPtr)>;
    variant_get_type: Option<unsafe extern "C" fn(GDExtensionConstVariantPtr) -> GDExtensionVariantType>;
    variant_hash: Option<unsafe extern "C" fn(GDExtensionConstVariantPtr) -> GDExtensionInt>;
    variant_booleanize: Option<unsafe extern "C" fn(GDExtensionConstVariantPtr) -> GDExtensionBool>;
    variant_stringify: Option<unsafe extern "C" fn(GDExtensionConstVariantPtr, GDExtensionUninitializedStringPtr)>;
    get_variant_from_type_constructor: Option<unsafe extern "C" fn(GDExtensionVariantType) -> GDExtensionVariantFromTypeConstructorFunc>;
    get_variant_to_type_constructor: Option<unsafe extern "C" fn(GDExtensionVariantType) -> GDExtensionTypeFromVariantConstructorFunc>;
    variant_get_ptr_operator_evaluator: Option<unsafe extern "C" fn(GDExtensionVariantOperator, GDExtensionVariantType, GDExtensionVariantType) -> GDExtensionPtrOperatorEvaluator>;
    variant_get_ptr_builtin_method: Option<unsafe extern "C" fn(GDExtensionVariantType, GDExtensionConstStringNamePtr, GDExtensionInt) -> GDExtensionPtrBuiltInMethod>;
    variant_get_ptr_constructor: Option<unsafe extern "C" fn(GDExtensionVariantType, i32) -> GDExtensionPtrConstructor>;
    variant_get_ptr_destructor: Option<unsafe extern "C" fn(GDExtensionVariantType) -> GDExtensionPtrDestructor>;
    variant_get_ptr_utility_function: Option<unsafe extern "C" fn(GDExtensionConstStringNamePtr, GDExtensionInt) -> GDExtensionPtrUtilityFunction>;

    // Strings
    string_new_with_utf8_chars_and_len: Option<unsafe extern "C" fn(GDExtensionUninitializedStringPtr, *const c_char, GDExtensionInt)>;
    string_to_utf8_chars: Option<unsafe extern "C" fn(GDExtensionConstStringPtr, *mut c_char, GDExtensionInt) -> GDExtensionInt>;
    string_name_new_with_utf8_chars_and_len: Option<unsafe extern "C" fn(GDExtensionUninitializedStringNamePtr, *const c_char, GDExtensionInt)>;

    // Container element access
    array_set_typed: Option<unsafe extern "C" fn(GDExtensionTypePtr, GDExtensionVariantType, GDExtensionConstStringNamePtr, GDExtensionConstVariantPtr)>;
    array_operator_index: Option<unsafe extern "C" fn(GDExtensionTypePtr, GDExtensionInt) -> GDExtensionVariantPtr>;
    array_operator_index_const: Option<unsafe extern "C" fn(GDExtensionConstTypePtr, GDExtensionInt) -> GDExtensionVariantPtr>;
    dictionary_operator_index: Option<unsafe extern "C" fn(GDExtensionTypePtr, GDExtensionConstVariantPtr) -> GDExtensionVariantPtr>;
    dictionary_operator_index_const: Option<unsafe extern "C" fn(GDExtensionConstTypePtr, GDExtensionConstVariantPtr) -> GDExtensionVariantPtr>;

    // Packed array element access
    packed_byte_array_operator_index: Option<unsafe extern "C" fn(GDExtensionTypePtr, GDExtensionInt) -> *mut u8>;
    packed_byte_array_operator_index_const: Option<unsafe extern "C" fn(GDExtensionConstTypePtr, GDExtensionInt) -> *const u8>;
    packed_int32_array_operator_index: Option<unsafe extern "C" fn(GDExtensionTypePtr, GDExtensionInt) -> *mut i32>;
    packed_int32_array_operator_index_const: Option<unsafe extern "C" fn(GDExtensionConstTypePtr, GDExtensionInt) -> *const i32>;
    packed_int64_array_operator_index: Option<unsafe extern "C" fn(GDExtensionTypePtr, GDExtensionInt) -> *mut i64>;
    packed_int64_array_operator_index_const: Option<unsafe extern "C" fn(GDExtensionConstTypePtr, GDExtensionInt) -> *const i64>;
    packed_float32_array_operator_index: Option<unsafe extern "C" fn(GDExtensionTypePtr, GDExtensionInt) -> *mut f32>;
    packed_float32_array_operator_index_const: Option<unsafe extern "C" fn(GDExtensionConstTypePtr, GDExtensionInt) -> *const f32>;
    packed_float64_array_operator_index: Option<unsafe extern "C" fn(GDExtensionTypePtr, GDExtensionInt) -> *mut f64>;
    packed_float64_array_operator_index_const: Option<unsafe extern "C" fn(GDExtensionConstTypePtr, GDExtensionInt) -> *const f64>;
    packed_string_array_operator_index: Option<unsafe extern "C" fn(GDExtensionTypePtr, GDExtensionInt) -> GDExtensionStringPtr>;
    packed_string_array_operator_index_const: Option<unsafe extern "C" fn(GDExtensionConstTypePtr, GDExtensionInt) -> GDExtensionStringPtr>;
    packed_vector2_array_operator_index: Option<unsafe extern "C" fn(GDExtensionTypePtr, GDExtensionInt) -> GDExtensionTypePtr>;
    packed_vector2_array_operator_index_const: Option<unsafe extern "C" fn(GDExtensionConstTypePtr, GDExtensionInt) -> GDExtensionTypePtr>;
    packed_vector3_array_operator_index: Option<unsafe extern "C" fn(GDExtensionTypePtr, GDExtensionInt) -> GDExtensionTypePtr>;
    packed_vector3_array_operator_index_const: Option<unsafe extern "C" fn(GDExtensionConstTypePtr, GDExtensionInt) -> GDExtensionTypePtr>;
    packed_vector4_array_operator_index: Option<unsafe extern "C" fn(GDExtensionTypePtr, GDExtensionInt) -> GDExtensionTypePtr>;
    packed_vector4_array_operator_index_const: Option<unsafe extern "C" fn(GDExtensionConstTypePtr, GDExtensionInt) -> GDExtensionTypePtr>;
    packed_color_array_operator_index: Option<unsafe extern "C" fn(GDExtensionTypePtr, GDExtensionInt) -> GDExtensionTypePtr>;
    packed_color_array_operator_index_const: Option<unsafe extern "C" fn(GDExtensionConstTypePtr, GDExtensionInt) -> GDExtensionTypePtr>;

    // Objects
    object_method_bind_call: Option<unsafe extern "C" fn(GDExtensionMethodBindPtr, GDExtensionObjectPtr, *const GDExtensionConstVariantPtr, GDExtensionInt, GDExtensionUninitializedVariantPtr, *mut GDExtensionCallError)>;
    object_method_bind_ptrcall: Option<unsafe extern "C" fn(GDExtensionMethodBindPtr, GDExtensionObjectPtr, *const GDExtensionConstTypePtr, GDExtensionTypePtr)>;
    object_destroy: Option<unsafe extern "C" fn(GDExtensionObjectPtr)>;
    global_get_singleton: Option<unsafe extern "C" fn(GDExtensionConstStringNamePtr) -> GDExtensionObjectPtr>;
    object_get_instance_binding: Option<unsafe extern "C" fn(GDExtensionObjectPtr, *mut c_void, *const GDExtensionInstanceBindingCallbacks) -> *mut c_void>;
    object_set_instance_binding: Option<unsafe extern "C" fn(GDExtensionObjectPtr, *mut c_void, *mut c_void, *const GDExtensionInstanceBindingCallbacks)>;
    object_set_instance: Option<unsafe extern "C" fn(GDExtensionObjectPtr, GDExtensionConstStringNamePtr, GDExtensionClassInstancePtr)>;
    object_cast_to: Option<unsafe extern "C" fn(GDExtensionConstObjectPtr, *mut c_void) -> GDExtensionObjectPtr>;
    object_get_instance_from_id: Option<unsafe extern "C" fn(GDObjectInstanceID) -> GDExtensionObjectPtr>;
    object_get_instance_id: Option<unsafe extern "C" fn(GDExtensionConstObjectPtr) -> GDObjectInstanceID>;
    ref_get_object: Option<unsafe extern "C" fn(GDExtensionConstRefPtr) -> GDExtensionObjectPtr>;
    ref_set_object: Option<unsafe extern "C" fn(GDExtensionRefPtr, GDExtensionObjectPtr)>;

    // Class database
    classdb_construct_object: Option<unsafe extern "C" fn(GDExtensionConstStringNamePtr) -> GDExtensionObjectPtr>;
    classdb_get_method_bind: Option<unsafe extern "C" fn(GDExtensionConstStringNamePtr, GDExtensionConstStringNamePtr, GDExtensionInt) -> GDExtensionMethodBindPtr>;
    classdb_get_class_tag: Option<unsafe extern "C" fn(GDExtensionConstStringNamePtr) -> *mut c_void>;
    classdb_register_extension_class2: Option<unsafe extern "C" fn(GDExtensionClassLibraryPtr, GDExtensionConstStringNamePtr, GDExtensionConstStringNamePtr, *const GDExtensionClassCreationInfo2)>;
    classdb_unregister_extension_class: Option<unsafe extern "C" fn(GDExtensionClassLibraryPtr, GDExtensionConstStringNamePtr)>;

    // Callables
    callable_custom_create: Option<unsafe extern "C" fn(GDExtensionUninitializedTypePtr, *mut GDExtensionCallableCustomInfo)>;
}
