/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Small utilities with no dependency on the engine ABI.

use std::cell::UnsafeCell;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Cell for late-initialized, then effectively read-only globals.
///
/// Unlike `OnceLock`, reads skip synchronization entirely; the caller guarantees that
/// initialization happened-before every read (here: engine init runs before any other entry
/// point can be reached).
pub struct ManualInitCell<T> {
    value: UnsafeCell<Option<T>>,
    initialized: AtomicBool,
}

// SAFETY: writes only happen in `set`, which the caller must not race with reads.
unsafe impl<T: Sync> Sync for ManualInitCell<T> {}
unsafe impl<T: Send> Send for ManualInitCell<T> {}

impl<T> ManualInitCell<T> {
    pub const fn new() -> Self {
        Self {
            value: UnsafeCell::new(None),
            initialized: AtomicBool::new(false),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// # Safety
    /// Must not be called concurrently with any read or another `set`.
    pub unsafe fn set(&self, value: T) {
        *self.value.get() = Some(value);
        self.initialized.store(true, Ordering::Release);
    }

    /// # Safety
    /// Must not be called concurrently with reads through `get_unchecked`.
    pub unsafe fn clear(&self) {
        self.initialized.store(false, Ordering::Release);
        *self.value.get() = None;
    }

    /// # Safety
    /// [`set`](Self::set) must have happened-before this call.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self) -> &T {
        debug_assert!(self.is_initialized(), "ManualInitCell read before set");

        match &*self.value.get() {
            Some(value) => value,
            None => std::hint::unreachable_unchecked(),
        }
    }
}

// ----------------------------------------------------------------------------------------------------------------------------------------------

/// Mutex-protected global with lazy default construction.
///
/// Non-performance-critical paths only (class registration, handle registry bookkeeping).
/// Poisoning is ignored: a panicking thread must not take the registry down with it.
pub struct Global<T> {
    value: Mutex<Option<T>>,
    init_fn: fn() -> T,
}

impl<T> Global<T> {
    pub const fn new(init_fn: fn() -> T) -> Self {
        Self {
            value: Mutex::new(None),
            init_fn,
        }
    }

    pub fn lock(&self) -> GlobalGuard<'_, T> {
        let mut guard = match self.value.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if guard.is_none() {
            *guard = Some((self.init_fn)());
        }

        GlobalGuard { guard }
    }
}

impl<T: Default> Global<T> {
    pub const fn default() -> Self {
        Self::new(T::default)
    }
}

pub struct GlobalGuard<'a, T> {
    guard: MutexGuard<'a, Option<T>>,
}

impl<T> Deref for GlobalGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Populated in `Global::lock` before the guard is handed out.
        self.guard.as_ref().expect("Global accessed before init")
    }
}

impl<T> DerefMut for GlobalGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.guard.as_mut().expect("Global accessed before init")
    }
}

impl<T: fmt::Debug> fmt::Debug for GlobalGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.deref().fmt(f)
    }
}

// ----------------------------------------------------------------------------------------------------------------------------------------------

/// Verifies a condition at compile time.
#[macro_export]
macro_rules! static_assert {
    ($cond:expr) => {
        const _: () = assert!($cond);
    };
    ($cond:expr, $msg:literal) => {
        const _: () = assert!($cond, $msg);
    };
}

/// Verifies at compile time that two types `T` and `U` have the same size.
#[macro_export]
macro_rules! static_assert_eq_size {
    ($T:ty, $U:ty) => {
        $crate::static_assert!(std::mem::size_of::<$T>() == std::mem::size_of::<$U>());
    };
    ($T:ty, $U:ty, $msg:literal) => {
        $crate::static_assert!(std::mem::size_of::<$T>() == std::mem::size_of::<$U>(), $msg);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_lazily_constructs() {
        static COUNTER: Global<Vec<i32>> = Global::default();

        {
            let mut guard = COUNTER.lock();
            guard.push(1);
            guard.push(2);
        }
        assert_eq!(*COUNTER.lock(), vec![1, 2]);
    }

    #[test]
    fn manual_init_cell_set_then_get() {
        let cell = ManualInitCell::<u32>::new();
        assert!(!cell.is_initialized());

        // SAFETY: no concurrent access in this test.
        unsafe {
            cell.set(42);
            assert!(cell.is_initialized());
            assert_eq!(*cell.get_unchecked(), 42);
            cell.clear();
        }
        assert!(!cell.is_initialized());
    }
}
