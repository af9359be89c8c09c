// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Datapoint address maps for the two kinds of light.

use std::collections::BTreeMap;

use crate::error::DeviceError;
use crate::types::{DatapointId, DeviceIdentity, PairingId};

/// Datapoints of a plain switching light.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchDatapoints {
    /// Written with `"1"`/`"0"` to switch.
    pub switch_on_off: DatapointId,
    /// Reports the on/off state.
    pub info_on_off: DatapointId,
}

/// Datapoints of a dimmable light.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimmerDatapoints {
    /// The on/off datapoints every light has.
    pub switch: SwitchDatapoints,
    /// Written with the brightness to set.
    pub absolute_set_value: DatapointId,
    /// Reports the actual brightness.
    pub info_actual_dimming_value: DatapointId,
}

/// A light's datapoint address map.
///
/// The variant is the light's capability: a map can never be half a dimmer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightDatapoints {
    /// On/off only.
    Switch(SwitchDatapoints),
    /// On/off plus brightness.
    Dimmer(DimmerDatapoints),
}

/// Incoming datapoints a light reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusRole {
    OnOff,
    ActualDimmingValue,
}

impl LightDatapoints {
    /// Builds the address map from role bindings.
    ///
    /// A binding for [`PairingId::AbsoluteSetValue`] makes the light a
    /// dimmer, which then also needs [`PairingId::InfoActualDimmingValue`].
    /// Roles that neither kind uses are ignored.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::IncompleteDatapoints` naming the first missing
    /// role.
    pub fn from_bindings(
        identity: &DeviceIdentity,
        bindings: &BTreeMap<PairingId, DatapointId>,
    ) -> Result<Self, DeviceError> {
        let require = |role: PairingId| {
            bindings
                .get(&role)
                .cloned()
                .ok_or_else(|| DeviceError::IncompleteDatapoints {
                    identity: identity.clone(),
                    role: role.name(),
                })
        };

        let switch = SwitchDatapoints {
            switch_on_off: require(PairingId::SwitchOnOff)?,
            info_on_off: require(PairingId::InfoOnOff)?,
        };

        match bindings.get(&PairingId::AbsoluteSetValue) {
            Some(absolute_set_value) => Ok(Self::Dimmer(DimmerDatapoints {
                switch,
                absolute_set_value: absolute_set_value.clone(),
                info_actual_dimming_value: require(PairingId::InfoActualDimmingValue)?,
            })),
            None => Ok(Self::Switch(switch)),
        }
    }

    /// Returns `true` for dimmers.
    #[must_use]
    pub fn is_dimmer(&self) -> bool {
        matches!(self, Self::Dimmer(_))
    }

    /// Returns the on/off datapoints.
    #[must_use]
    pub fn switch(&self) -> &SwitchDatapoints {
        match self {
            Self::Switch(switch) => switch,
            Self::Dimmer(dimmer) => &dimmer.switch,
        }
    }

    /// Returns the brightness datapoints of a dimmer.
    #[must_use]
    pub fn dimmer(&self) -> Option<&DimmerDatapoints> {
        match self {
            Self::Switch(_) => None,
            Self::Dimmer(dimmer) => Some(dimmer),
        }
    }

    /// Returns the datapoint bound to `role`, if this kind of light has one.
    #[must_use]
    pub fn get(&self, role: PairingId) -> Option<&DatapointId> {
        match role {
            PairingId::SwitchOnOff => Some(&self.switch().switch_on_off),
            PairingId::InfoOnOff => Some(&self.switch().info_on_off),
            PairingId::AbsoluteSetValue => self.dimmer().map(|d| &d.absolute_set_value),
            PairingId::InfoActualDimmingValue => {
                self.dimmer().map(|d| &d.info_actual_dimming_value)
            }
            PairingId::Other(_) => None,
        }
    }

    /// Matches an incoming datapoint against the status outputs.
    pub(crate) fn status_role(&self, datapoint: &str) -> Option<StatusRole> {
        if self.switch().info_on_off == *datapoint {
            return Some(StatusRole::OnOff);
        }
        match self.dimmer() {
            Some(dimmer) if dimmer.info_actual_dimming_value == *datapoint => {
                Some(StatusRole::ActualDimmingValue)
            }
            _ => None,
        }
    }
}
