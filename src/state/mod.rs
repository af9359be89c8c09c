// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light state tracking.
//!
//! [`LightState`] is the cached view of a channel: on/off, brightness and
//! whether the last command has been confirmed by the device.

mod light_state;

pub use light_state::LightState;
