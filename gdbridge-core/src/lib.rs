/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Cross-language object bridge over the GDExtension ABI.
//!
//! The bridge represents engine-owned objects by opaque handles behind typed wrappers, marshals
//! calls through stack call frames, integrates engine object lifetimes with Rust ownership, and
//! lets Rust-defined classes be registered with the engine and dispatched virtually.

mod storage;

pub mod builtin;
pub mod classes;
pub mod init;
pub mod log;
pub mod meta;
pub mod obj;
pub mod registry;

pub use gdbridge_sys as sys;
#[doc(hidden)]
pub use gdbridge_sys::out;

#[doc(hidden)]
pub mod private;
