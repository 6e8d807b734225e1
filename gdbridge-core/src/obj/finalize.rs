/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Deferred release of engine objects dropped on non-main threads.
//!
//! The engine's object destruction is not thread-safe for every class, so smart pointers dropped
//! off the main thread enqueue their release here instead of calling into the engine directly.
//! The queue is drained on the main thread, in drop order, by [`process`]; [`teardown`] drains it
//! one final time before the library deinitializes.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::sys;

type ReleaseFn = Box<dyn FnOnce() + Send>;

struct Queue {
    pending: Mutex<VecDeque<ReleaseFn>>,
    drained: Condvar,
}

static QUEUE: Queue = Queue {
    pending: Mutex::new(VecDeque::new()),
    drained: Condvar::new(),
};

// A panicking release leaves the remaining entries intact; poisoning carries no information here.
fn lock_pending() -> MutexGuard<'static, VecDeque<ReleaseFn>> {
    QUEUE.pending.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Enqueues a release action to be run on the main thread. Order of enqueueing is preserved.
pub(crate) fn enqueue(release: ReleaseFn) {
    lock_pending().push_back(release);
}

/// Runs all pending releases. Must be called on the main thread.
///
/// Typically hooked into a per-frame callback; also called by [`teardown`].
pub fn process() {
    debug_assert!(
        sys::is_main_thread(),
        "deferred releases must be processed on the main thread"
    );

    loop {
        // Entries are taken one at a time so that releases which themselves drop objects
        // (and thus re-enqueue) do not deadlock on the queue lock.
        let next = lock_pending().pop_front();

        match next {
            Some(release) => release(),
            None => break,
        }
    }

    QUEUE.drained.notify_all();
}

/// Drains the queue before shutdown, blocking until it is empty.
///
/// On the main thread this drains directly. On any other thread it blocks until the main thread
/// has processed everything, so engine teardown never races a pending release.
pub fn teardown() {
    if sys::is_main_thread() {
        process();
        return;
    }

    let mut pending = lock_pending();
    while !pending.is_empty() {
        pending = QUEUE
            .drained
            .wait(pending)
            .unwrap_or_else(PoisonError::into_inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // The queue is a process-wide singleton; serialize tests touching it.
    static TEST_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn releases_run_in_fifo_order() {
        let _guard = TEST_GUARD.lock().unwrap_or_else(|e| e.into_inner());
        let log = Arc::new(Mutex::new(Vec::new()));

        for i in 0..4 {
            let log = Arc::clone(&log);
            enqueue(Box::new(move || log.lock().unwrap().push(i)));
        }

        drain_for_test();
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn release_may_enqueue_another() {
        let _guard = TEST_GUARD.lock().unwrap_or_else(|e| e.into_inner());
        let count = Arc::new(AtomicUsize::new(0));

        let inner = {
            let count = Arc::clone(&count);
            Box::new(move || {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };
        let count2 = Arc::clone(&count);
        enqueue(Box::new(move || {
            count2.fetch_add(1, Ordering::SeqCst);
            enqueue(inner);
        }));

        drain_for_test();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    // Like process(), but without the main-thread assertion (tests run without a binding).
    fn drain_for_test() {
        loop {
            let next = lock_pending().pop_front();
            match next {
                Some(release) => release(),
                None => break,
            }
        }
    }
}
