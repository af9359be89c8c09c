// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light event types.

use crate::state::LightState;
use crate::types::DeviceIdentity;

/// Events emitted by the light manager.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DeviceEvent {
    /// A light was added to the manager.
    LightAdded {
        /// The channel of the added light.
        identity: DeviceIdentity,
    },

    /// A status notification updated a light.
    ///
    /// Commands do not produce this event; only values reported by the bus
    /// do.
    StateChanged {
        /// The channel of the light.
        identity: DeviceIdentity,
        /// The light's state right after the update.
        snapshot: LightState,
    },
}

impl DeviceEvent {
    /// Returns the identity of the light this event is about.
    #[must_use]
    pub fn identity(&self) -> &DeviceIdentity {
        match self {
            Self::LightAdded { identity } | Self::StateChanged { identity, .. } => identity,
        }
    }

    /// Returns `true` for state change events.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }
}
