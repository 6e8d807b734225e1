/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Low-level bindings to the GDExtension C API.
//!
//! Entry points are resolved at runtime through `get_proc_address` (API 4.1+); the resolved
//! tables live in a process-wide binding that is initialized exactly once per engine session.

#![cfg_attr(test, allow(unused))]

mod abi;
mod binding;
mod central;
mod interface;
mod lifecycle;
mod method_table;
mod toolbox;

pub mod opaque;

pub use abi::{GodotAbi, GodotNullableAbi, PtrcallKind};
pub use binding::{
    config, get_interface, get_library, godot_version, is_initialized, is_main_thread,
    lifecycle_table, method_table, BridgeConfig,
};
pub use central::types;
pub use central::{VariantOperator, VariantType};
pub use interface::*;
pub use lifecycle::BuiltinLifecycleTable;
pub use method_table::{
    BuiltinConstructorFn, BuiltinDestructorFn, BuiltinMethodTable, BuiltinOperatorFn,
};
pub use toolbox::{Global, GlobalGuard, ManualInitCell};

use binding::EngineBinding;

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Session lifecycle

/// Resolves the engine interface and initializes the process-wide binding.
///
/// # Safety
/// - `get_proc_address` must be the loader function handed to the extension entry point.
/// - `library` must be the class library pointer handed to the extension entry point.
/// - Must be called exactly once, before any other use of this crate, and must not race with
///   any other call into this crate.
pub unsafe fn initialize(
    get_proc_address: GDExtensionInterfaceGetProcAddress,
    library: GDExtensionClassLibraryPtr,
    config: BridgeConfig,
) {
    let interface = GDExtensionInterface::load(get_proc_address);

    let mut version = GDExtensionGodotVersion {
        major: 0,
        minor: 0,
        patch: 0,
        string: std::ptr::null(),
    };
    let get_version = interface
        .get_godot_version
        .expect("get_godot_version not loaded");
    get_version(&mut version);

    assert!(
        version.major > 4 || (version.major == 4 && version.minor >= 1),
        "GDExtension requires Godot 4.1 or later, found {}.{}",
        version.major,
        version.minor
    );

    let lifecycle = BuiltinLifecycleTable::load(&interface);
    let builtins = BuiltinMethodTable::load(&interface);

    binding::initialize_binding(EngineBinding::new(
        interface, library, lifecycle, builtins, version, config,
    ));
}

/// Tears down the process-wide binding.
///
/// # Safety
/// Must be called after all other engine access has ceased, and must not race with any other
/// call into this crate.
pub unsafe fn deinitialize() {
    binding::deinitialize_binding();
}

/// Version string in the form `major.minor.patch`, for log output.
///
/// # Safety
/// The binding must be initialized.
pub unsafe fn godot_version_string() -> String {
    let version = godot_version();
    format!("{}.{}.{}", version.major, version.minor, version.patch)
}

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Call helpers

#[macro_export]
#[doc(hidden)]
macro_rules! interface_fn {
    ($name:ident) => {{
        unsafe { $crate::get_interface().$name.unwrap_unchecked() }
    }};
}

#[macro_export]
#[doc(hidden)]
macro_rules! builtin_fn {
    ($name:ident) => {{
        unsafe { $crate::method_table().$name }
    }};
}

/// Internal trace output, active only with the `debug-log` feature.
#[cfg(feature = "debug-log")]
#[macro_export]
macro_rules! out {
    () => (eprintln!());
    ($fmt:expr) => (eprintln!($fmt));
    ($fmt:expr, $($arg:tt)*) => (eprintln!($fmt, $($arg)*));
}

#[cfg(not(feature = "debug-log"))]
#[macro_export]
macro_rules! out {
    () => {};
    ($fmt:expr) => {};
    ($fmt:expr, $($arg:tt)*) => {};
}

#[doc(hidden)]
#[inline]
pub fn default_call_error() -> GDExtensionCallError {
    GDExtensionCallError {
        error: GDEXTENSION_CALL_OK,
        argument: -1,
        expected: -1,
    }
}

