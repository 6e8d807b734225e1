/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Binding storage allowing access from any thread.
//!
//! Thread-safety of any given engine entry point remains the engine's contract; this storage
//! merely makes the resolved tables readable everywhere.

use std::sync::Mutex;
use std::thread::ThreadId;

use super::EngineBinding;
use crate::toolbox::ManualInitCell;

pub(super) struct BindingStorage;

static BINDING: ManualInitCell<EngineBinding> = ManualInitCell::new();
static INIT_THREAD: Mutex<Option<ThreadId>> = Mutex::new(None);

impl BindingStorage {
    /// # Safety
    /// Must only be called once, before any access.
    pub unsafe fn initialize(binding: EngineBinding) {
        assert!(
            !BINDING.is_initialized(),
            "engine binding initialized twice"
        );

        *INIT_THREAD.lock().unwrap() = Some(std::thread::current().id());
        BINDING.set(binding);
    }

    /// # Safety
    /// Must not race with concurrent accesses.
    pub unsafe fn deinitialize() {
        assert!(
            BINDING.is_initialized(),
            "engine binding deinitialized before initialization"
        );

        BINDING.clear();
        *INIT_THREAD.lock().unwrap() = None;
    }

    /// # Safety
    /// The binding must be initialized.
    #[inline(always)]
    pub unsafe fn get_binding_unchecked() -> &'static EngineBinding {
        BINDING.get_unchecked()
    }

    pub fn is_initialized() -> bool {
        BINDING.is_initialized()
    }

    pub fn is_main_thread() -> bool {
        *INIT_THREAD.lock().unwrap() == Some(std::thread::current().id())
    }
}
