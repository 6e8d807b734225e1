/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::lifecycle::BuiltinLifecycleTable;
use crate::method_table::BuiltinMethodTable;
use crate::{GDExtensionClassLibraryPtr, GDExtensionGodotVersion, GDExtensionInterface};

#[cfg(feature = "experimental-threads")]
mod multi_threaded;
#[cfg(not(feature = "experimental-threads"))]
mod single_threaded;

#[cfg(feature = "experimental-threads")]
use multi_threaded::BindingStorage;
#[cfg(not(feature = "experimental-threads"))]
use single_threaded::BindingStorage;

/// Configuration passed down from the extension entry point.
pub struct BridgeConfig {
    pub tool_only_in_editor: bool,
}

impl BridgeConfig {
    pub fn new(tool_only_in_editor: bool) -> Self {
        Self {
            tool_only_in_editor,
        }
    }
}

/// Late-init globals for one engine session.
pub(crate) struct EngineBinding {
    interface: GDExtensionInterface,
    library: ClassLibraryPtr,
    lifecycle: BuiltinLifecycleTable,
    builtins: BuiltinMethodTable,
    version: GDExtensionGodotVersion,
    config: BridgeConfig,
}

impl EngineBinding {
    pub fn new(
        interface: GDExtensionInterface,
        library: GDExtensionClassLibraryPtr,
        lifecycle: BuiltinLifecycleTable,
        builtins: BuiltinMethodTable,
        version: GDExtensionGodotVersion,
        config: BridgeConfig,
    ) -> Self {
        Self {
            interface,
            library: ClassLibraryPtr(library),
            lifecycle,
            builtins,
            version,
            config,
        }
    }
}

/// Newtype around the library pointer so `Sync`/`Send` can be implemented manually.
struct ClassLibraryPtr(GDExtensionClassLibraryPtr);

// SAFETY: only the pointer value is shared; any dereference requires unsafe at the use site,
// which is where thread safety must be argued.
unsafe impl Sync for ClassLibraryPtr {}
// SAFETY: see Sync impl.
unsafe impl Send for ClassLibraryPtr {}

// SAFETY: the version struct contains a C string pointer owned by the engine for the whole session.
unsafe impl Sync for EngineBinding {}
// SAFETY: see Sync impl.
unsafe impl Send for EngineBinding {}

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Public API

/// # Safety
/// The binding must have been initialized before calling this function.
#[inline(always)]
pub unsafe fn get_interface() -> &'static GDExtensionInterface {
    &get_binding().interface
}

/// # Safety
/// The binding must have been initialized before calling this function.
#[inline(always)]
pub unsafe fn get_library() -> GDExtensionClassLibraryPtr {
    get_binding().library.0
}

/// # Safety
/// The binding must have been initialized before calling this function.
#[inline(always)]
pub unsafe fn lifecycle_table() -> &'static BuiltinLifecycleTable {
    &get_binding().lifecycle
}

/// # Safety
/// The binding must have been initialized before calling this function.
#[inline(always)]
pub unsafe fn method_table() -> &'static BuiltinMethodTable {
    &get_binding().builtins
}

/// # Safety
/// The binding must have been initialized before calling this function.
#[inline(always)]
pub unsafe fn godot_version() -> &'static GDExtensionGodotVersion {
    &get_binding().version
}

/// # Safety
/// The binding must have been initialized before calling this function.
#[inline]
pub unsafe fn config() -> &'static BridgeConfig {
    &get_binding().config
}

#[inline]
pub fn is_initialized() -> bool {
    BindingStorage::is_initialized()
}

/// Whether the current thread is the one that ran engine initialization.
///
/// Engine calls that destroy objects are only safe on this thread; other threads must defer
/// through the finalization queue.
#[inline]
pub fn is_main_thread() -> bool {
    BindingStorage::is_main_thread()
}

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Crate-local implementation

/// # Safety
/// Must not be called concurrently with any other binding access.
pub(crate) unsafe fn initialize_binding(binding: EngineBinding) {
    BindingStorage::initialize(binding);
}

/// # Safety
/// See [`initialize_binding`].
pub(crate) unsafe fn deinitialize_binding() {
    BindingStorage::deinitialize();
}

/// # Safety
/// The binding must have been initialized before calling this function.
#[inline(always)]
pub(crate) unsafe fn get_binding() -> &'static EngineBinding {
    BindingStorage::get_binding_unchecked()
}
