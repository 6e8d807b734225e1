/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Extension bootstrap: entry point, initialization levels and session teardown.
//!
//! The engine loads the extension by calling the entry point exactly once, handing over the
//! symbol loader and the library handle. The entry point resolves the interface, loads the
//! builtin lifecycle and method tables, and installs per-level init/deinit callbacks. Classes
//! are registered in the init callback of their level and unregistered in reverse order on the
//! way down; deferred finalizers are drained before the binding is torn down.

use std::panic::AssertUnwindSafe;

use crate::obj::finalize;
use crate::private::handle_panic;
use crate::registry;
use crate::sys;

/// Initialization stage of the engine session.
///
/// Ordinals match the engine's `GDEXTENSION_INITIALIZATION_*` constants.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum InitLevel {
    /// Variants and low-level servers exist; no classes yet.
    Core,
    /// Engine servers (rendering, physics, audio) are up.
    Servers,
    /// The scene class hierarchy is available. Most classes register here.
    Scene,
    /// Editor-only functionality; reached only when running inside the editor.
    Editor,
}

impl InitLevel {
    #[doc(hidden)]
    pub fn from_sys(level: sys::GDExtensionInitializationLevel) -> Self {
        match level {
            sys::GDEXTENSION_INITIALIZATION_CORE => Self::Core,
            sys::GDEXTENSION_INITIALIZATION_SERVERS => Self::Servers,
            sys::GDEXTENSION_INITIALIZATION_SCENE => Self::Scene,
            sys::GDEXTENSION_INITIALIZATION_EDITOR => Self::Editor,
            other => panic!("unknown initialization level {other}"),
        }
    }

    #[doc(hidden)]
    pub fn to_sys(self) -> sys::GDExtensionInitializationLevel {
        match self {
            Self::Core => sys::GDEXTENSION_INITIALIZATION_CORE,
            Self::Servers => sys::GDEXTENSION_INITIALIZATION_SERVERS,
            Self::Scene => sys::GDEXTENSION_INITIALIZATION_SCENE,
            Self::Editor => sys::GDEXTENSION_INITIALIZATION_EDITOR,
        }
    }
}

/// Implemented by the type passed to [`entry_point!`][crate::entry_point]; customizes library
/// behavior at the init hooks.
pub trait ExtensionLibrary {
    /// Lowest level at which the library needs to act. Levels below it are skipped entirely.
    fn min_level() -> InitLevel {
        InitLevel::Scene
    }

    /// Called when `level` is reached on the way up. Register classes of that level here.
    fn on_level_init(level: InitLevel) {
        let _ = level;
    }

    /// Called when `level` is about to be torn down. Classes of that level are unregistered
    /// automatically afterwards.
    fn on_level_deinit(level: InitLevel) {
        let _ = level;
    }
}

/// Generic entry-point body. Invoked via the function that [`entry_point!`][crate::entry_point]
/// generates; not called directly.
///
/// # Safety
/// `get_proc_address`, `library` and `init` must be the values the engine passed to the
/// exported entry function, and the engine calls that function exactly once.
#[doc(hidden)]
pub unsafe fn __load_library<E: ExtensionLibrary>(
    get_proc_address: sys::GDExtensionInterfaceGetProcAddress,
    library: sys::GDExtensionClassLibraryPtr,
    init: *mut sys::GDExtensionInitialization,
) -> sys::GDExtensionBool {
    let outcome = handle_panic(
        || "extension library loading",
        AssertUnwindSafe(|| {
            sys::initialize(get_proc_address, library, sys::BridgeConfig::new(false));
            sys::out!("load library (engine {})", sys::godot_version_string());

            *init = sys::GDExtensionInitialization {
                minimum_initialization_level: E::min_level().to_sys(),
                userdata: std::ptr::null_mut(),
                initialize: Some(initialize_level::<E>),
                deinitialize: Some(deinitialize_level::<E>),
            };
        }),
    );

    sys::GDExtensionBool::from(outcome.is_some())
}

unsafe extern "C" fn initialize_level<E: ExtensionLibrary>(
    _userdata: *mut std::ffi::c_void,
    level: sys::GDExtensionInitializationLevel,
) {
    let _ = handle_panic(
        || format!("init level {level}"),
        AssertUnwindSafe(|| {
            let level = InitLevel::from_sys(level);
            sys::out!("init level  {level:?}");
            E::on_level_init(level);
        }),
    );
}

unsafe extern "C" fn deinitialize_level<E: ExtensionLibrary>(
    _userdata: *mut std::ffi::c_void,
    level: sys::GDExtensionInitializationLevel,
) {
    let _ = handle_panic(
        || format!("deinit level {level}"),
        AssertUnwindSafe(|| {
            let level = InitLevel::from_sys(level);
            sys::out!("deinit level  {level:?}");

            // Deferred releases may target classes of this level; drain before unregistering.
            finalize::teardown();

            E::on_level_deinit(level);
            registry::unregister_classes(level);

            if level == E::min_level() {
                // Last callback of the session; nothing may touch the engine afterwards.
                sys::deinitialize();
            }
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::InitLevel;

    #[test]
    fn init_level_roundtrip() {
        for level in [
            InitLevel::Core,
            InitLevel::Servers,
            InitLevel::Scene,
            InitLevel::Editor,
        ] {
            assert_eq!(InitLevel::from_sys(level.to_sys()), level);
        }
    }

    #[test]
    fn init_levels_are_ordered() {
        assert!(InitLevel::Core < InitLevel::Servers);
        assert!(InitLevel::Servers < InitLevel::Scene);
        assert!(InitLevel::Scene < InitLevel::Editor);
    }

    #[test]
    #[should_panic(expected = "unknown initialization level")]
    fn unknown_level_panics() {
        let _ = InitLevel::from_sys(17);
    }
}

/// Defines the `extern "C"` entry point the engine loads, delegating to `$Library`'s
/// [`ExtensionLibrary`] impl. The exported symbol name goes into the `.gdextension` file.
#[macro_export]
macro_rules! entry_point {
    ($symbol:ident, $Library:ty) => {
        #[no_mangle]
        unsafe extern "C" fn $symbol(
            get_proc_address: $crate::sys::GDExtensionInterfaceGetProcAddress,
            library: $crate::sys::GDExtensionClassLibraryPtr,
            init: *mut $crate::sys::GDExtensionInitialization,
        ) -> $crate::sys::GDExtensionBool {
            $crate::init::__load_library::<$Library>(get_proc_address, library, init)
        }
    };
}
