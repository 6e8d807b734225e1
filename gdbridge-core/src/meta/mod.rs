/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Call-boundary machinery: frames, contexts, errors and ownership labels.

mod call_frame;
mod class_name;
mod error;
pub(crate) mod signature;

pub mod ownership;

pub use call_frame::CallFrame;
pub use class_name::ClassName;
pub use error::{CallContext, CallError, CallFailure, ConvertError};
pub use ownership::OwnershipLabel;
