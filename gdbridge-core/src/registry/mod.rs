/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Class registration and the bridge's handle bookkeeping.

mod class;

pub mod callbacks;
pub mod handles;

pub use class::register_class;

pub(crate) use class::unregister_classes;
