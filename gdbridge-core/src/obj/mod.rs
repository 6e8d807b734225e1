/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Object pointers and the traits describing engine classes.

mod base;
mod gd;
mod instance_id;
mod raw_gd;
mod traits;

pub mod bounds;
pub mod finalize;

pub use base::Base;
pub use bounds::Bounds;
pub use gd::Gd;
pub use instance_id::InstanceId;
pub use raw_gd::RawGd;
pub use traits::{cap, GodotClass, GodotHooks, Inherits, NoBase};
