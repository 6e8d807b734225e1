/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Canonical handle bookkeeping: generation-counted tickets for value containers and the weak
//! instance-ID table for objects.
//!
//! The engine hands out strings, arrays, variants and the like by value, with manual release.
//! Double free and use-after-end are real hazards there; each wrapper therefore carries a
//! [`GenTicket`] whose generation is bumped exactly once, at release. A stale ticket is detected
//! as a mismatch, never dereferenced.

use std::collections::HashMap;

use crate::obj::InstanceId;
use crate::sys;
use sys::Global;

/// Logical identity of one value-container wrapper: a slot index plus the generation that was
/// current when the wrapper was registered.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GenTicket {
    index: u32,
    generation: u32,
}

#[derive(Default)]
struct ContainerSlots {
    // Generation per slot; odd values mark ended slots awaiting reuse.
    generations: Vec<u32>,
    free: Vec<u32>,
}

static CONTAINERS: Global<ContainerSlots> = Global::default();

/// Registers a new container identity and returns its ticket.
pub fn register() -> GenTicket {
    let mut slots = CONTAINERS.lock();

    match slots.free.pop() {
        Some(index) => {
            // Slot was ended (odd generation); restart it at the next even generation.
            let generation = slots.generations[index as usize] + 1;
            slots.generations[index as usize] = generation;
            GenTicket { index, generation }
        }
        None => {
            let index = slots.generations.len() as u32;
            slots.generations.push(0);
            GenTicket {
                index,
                generation: 0,
            }
        }
    }
}

/// Whether the ticket still names a live container.
pub fn is_live(ticket: GenTicket) -> bool {
    let slots = CONTAINERS.lock();

    slots
        .generations
        .get(ticket.index as usize)
        .is_some_and(|&generation| generation == ticket.generation)
}

/// Ends the container identity; returns `false` if it had already ended (double release).
///
/// The engine-side storage release is the caller's job and must happen only on `true`.
pub fn invalidate(ticket: GenTicket) -> bool {
    let mut slots = CONTAINERS.lock();

    let Some(generation) = slots.generations.get_mut(ticket.index as usize) else {
        return false;
    };

    if *generation != ticket.generation {
        return false;
    }

    *generation += 1; // now odd: ended
    slots.free.push(ticket.index);
    true
}

// ----------------------------------------------------------------------------------------------------------------------------------------------
// Weak object table

static OBJECTS: Global<HashMap<InstanceId, usize>> = Global::default();

/// Records the engine address under which `id` is currently reachable.
pub(crate) fn register_object(id: InstanceId, object_ptr: sys::GDExtensionObjectPtr) {
    OBJECTS.lock().insert(id, object_ptr as usize);
}

pub(crate) fn unregister_object(id: InstanceId) {
    OBJECTS.lock().remove(&id);
}

/// Resolves an instance-ID to its engine address, verifying liveness with the engine.
///
/// The table is weak: it never keeps the engine object alive. A destroyed instance yields
/// `None` even if an entry is still present (the stale entry is dropped on the way).
pub fn lookup_object(id: InstanceId) -> Option<sys::GDExtensionObjectPtr> {
    // SAFETY: engine call with a plain u64; returns null for dead instances.
    let engine_ptr = unsafe { sys::interface_fn!(object_get_instance_from_id)(id.to_u64()) };

    if engine_ptr.is_null() {
        unregister_object(id);
        return None;
    }

    // Keep host lookups consistent: repeated lookups of the same live instance return the same
    // address the engine reports.
    OBJECTS.lock().insert(id, engine_ptr as usize);
    Some(engine_ptr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fresh_ticket_is_live() {
        let ticket = register();
        assert!(is_live(ticket));
    }

    #[test]
    fn invalidate_ends_ticket() {
        let ticket = register();

        assert!(invalidate(ticket));
        assert!(!is_live(ticket));
        // Double release is detected, not fatal.
        assert!(!invalidate(ticket));
    }

    #[test]
    fn recycled_slot_does_not_revive_old_ticket() {
        let old = register();
        assert!(invalidate(old));

        // Exhaust the free list until the old slot is reused.
        let mut fresh = Vec::new();
        for _ in 0..64 {
            fresh.push(register());
        }

        assert!(!is_live(old));
        for ticket in fresh {
            assert!(is_live(ticket));
        }
    }

    proptest! {
        #[test]
        fn ticket_lifecycle_invariants(ops in prop::collection::vec(0u8..3, 1..200)) {
            let mut live: Vec<GenTicket> = Vec::new();
            let mut ended: Vec<GenTicket> = Vec::new();

            for op in ops {
                match op {
                    0 => live.push(register()),
                    1 => {
                        if let Some(ticket) = live.pop() {
                            prop_assert!(invalidate(ticket));
                            ended.push(ticket);
                        }
                    }
                    _ => {
                        for &ticket in &live {
                            prop_assert!(is_live(ticket));
                        }
                        for &ticket in &ended {
                            prop_assert!(!is_live(ticket));
                            prop_assert!(!invalidate(ticket));
                        }
                    }
                }
            }
        }
    }
}
