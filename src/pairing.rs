// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pairing resolution for light channels.
//!
//! Given a channel's function ID, [`pairing_ids`] says which datapoint roles
//! a light built from that channel needs. Discovery consults it once per
//! channel to decide what to bind and whether to build a light at all.

use crate::types::{FunctionId, PairingId};

const DIMMER_INPUTS: &[PairingId] = &[PairingId::SwitchOnOff, PairingId::AbsoluteSetValue];
const DIMMER_OUTPUTS: &[PairingId] = &[PairingId::InfoOnOff, PairingId::InfoActualDimmingValue];
const SWITCH_INPUTS: &[PairingId] = &[PairingId::SwitchOnOff];
const SWITCH_OUTPUTS: &[PairingId] = &[PairingId::InfoOnOff];

/// Input and output roles a light channel must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingSet {
    /// Roles written by commands.
    pub inputs: &'static [PairingId],
    /// Roles reported by the device.
    pub outputs: &'static [PairingId],
}

impl PairingSet {
    /// Roles of a dimming actuator.
    pub const DIMMER: Self = Self {
        inputs: DIMMER_INPUTS,
        outputs: DIMMER_OUTPUTS,
    };

    /// Roles of a switching actuator exposed as a light.
    pub const SWITCH: Self = Self {
        inputs: SWITCH_INPUTS,
        outputs: SWITCH_OUTPUTS,
    };

    /// Returns `true` if `role` is one of the inputs.
    #[must_use]
    pub fn requires_input(&self, role: PairingId) -> bool {
        self.inputs.contains(&role)
    }

    /// Returns `true` if `role` is one of the outputs.
    #[must_use]
    pub fn requires_output(&self, role: PairingId) -> bool {
        self.outputs.contains(&role)
    }
}

/// Resolves the roles a light needs for a channel of the given class.
///
/// Dimming actuators are always lights. Switching actuators are lights
/// unless `switch_as_x` asks for them to be exposed as generic switches.
/// Everything else returns `None`.
///
/// # Examples
///
/// ```
/// use fah_lib::pairing::{pairing_ids, PairingSet};
/// use fah_lib::types::FunctionId;
///
/// assert_eq!(pairing_ids(FunctionId::DIMMING_ACTUATOR, true), Some(PairingSet::DIMMER));
/// assert_eq!(pairing_ids(FunctionId::SWITCH_ACTUATOR, false), Some(PairingSet::SWITCH));
/// assert_eq!(pairing_ids(FunctionId::SWITCH_ACTUATOR, true), None);
/// ```
#[must_use]
pub fn pairing_ids(function_id: FunctionId, switch_as_x: bool) -> Option<PairingSet> {
    if function_id.is_dimming_actuator() {
        Some(PairingSet::DIMMER)
    } else if function_id.is_switching_actuator() && !switch_as_x {
        Some(PairingSet::SWITCH)
    } else {
        None
    }
}
