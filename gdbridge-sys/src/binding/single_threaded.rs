/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Binding storage without cross-thread access support.
//!
//! Reads skip synchronization; in Debug builds, every access verifies that it happens on the
//! thread that ran initialization.

use std::sync::Mutex;
use std::thread::ThreadId;

use super::EngineBinding;
use crate::toolbox::ManualInitCell;

pub(super) struct BindingStorage;

static BINDING: ManualInitCell<EngineBinding> = ManualInitCell::new();
static MAIN_THREAD: Mutex<Option<ThreadId>> = Mutex::new(None);

impl BindingStorage {
    /// # Safety
    /// Must only be called once, before any access, from the thread that will drive the engine.
    pub unsafe fn initialize(binding: EngineBinding) {
        assert!(
            !BINDING.is_initialized(),
            "engine binding initialized twice"
        );

        *MAIN_THREAD.lock().unwrap() = Some(std::thread::current().id());
        BINDING.set(binding);
    }

    /// # Safety
    /// Must not race with accesses from other threads.
    pub unsafe fn deinitialize() {
        assert!(
            BINDING.is_initialized(),
            "engine binding deinitialized before initialization"
        );

        BINDING.clear();
        *MAIN_THREAD.lock().unwrap() = None;
    }

    /// # Safety
    /// The binding must be initialized, and the caller must be on the init thread.
    #[inline(always)]
    pub unsafe fn get_binding_unchecked() -> &'static EngineBinding {
        #[cfg(debug_assertions)]
        {
            let main = MAIN_THREAD.lock().unwrap();
            assert_eq!(
                *main,
                Some(std::thread::current().id()),
                "engine binding accessed from non-main thread; enable `experimental-threads` for multi-threaded use"
            );
        }

        BINDING.get_unchecked()
    }

    pub fn is_initialized() -> bool {
        BINDING.is_initialized()
    }

    pub fn is_main_thread() -> bool {
        *MAIN_THREAD.lock().unwrap() == Some(std::thread::current().id())
    }
}
