// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for free@home light control.
//!
//! Raw protocol values are converted into these types at the boundary, so
//! the rest of the crate never handles datapoint strings directly.
//!
//! # Types
//!
//! - [`PowerState`] - On/off read from and written to switching datapoints
//! - [`Brightness`] - Device-native dimming level (0-100)
//! - [`PairingId`] - Parameter role of a datapoint
//! - [`FunctionId`] - Device class of a channel
//! - [`DeviceIdentity`] - Serial number and channel of a light
//! - [`DatapointId`] - Address of a datapoint on a channel

mod brightness;
mod identity;
mod pairing;
mod power;

pub use brightness::Brightness;
pub use identity::{DatapointId, DeviceIdentity};
pub use pairing::{FunctionId, PairingId};
pub use power::PowerState;
