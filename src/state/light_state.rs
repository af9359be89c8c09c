// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached state of one light channel.

use crate::types::{Brightness, PowerState};

/// Tracked state of a light.
///
/// Both fields start unknown and become known either from a status
/// notification or from a local command. Brightness is only ever set on
/// dimmers; the owning [`LightDevice`](crate::LightDevice) enforces that.
///
/// # Confirmation
///
/// Commands update the state optimistically once their write has been
/// issued, without waiting for the device to report back. Such a state is
/// *unconfirmed* until the next status notification arrives, and may
/// disagree with the physical device if a later write failed.
///
/// # Examples
///
/// ```
/// use fah_lib::state::LightState;
///
/// let state = LightState::new();
/// assert_eq!(state.is_on(), None);
/// assert_eq!(state.brightness(), None);
/// assert!(state.is_confirmed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LightState {
    power: Option<PowerState>,
    brightness: Option<Brightness>,
    confirmed: bool,
}

impl LightState {
    /// Creates a state with nothing known yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            power: None,
            brightness: None,
            confirmed: true,
        }
    }

    /// Returns the power state, or `None` before anything is known.
    #[must_use]
    pub fn power(&self) -> Option<PowerState> {
        self.power
    }

    /// Returns whether the light is on, or `None` before anything is known.
    #[must_use]
    pub fn is_on(&self) -> Option<bool> {
        self.power.map(|p| p.is_on())
    }

    /// Returns the brightness, or `None` if unknown or not a dimmer.
    #[must_use]
    pub fn brightness(&self) -> Option<Brightness> {
        self.brightness
    }

    /// Returns `false` while a command's effect has not been reported back.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Records a power state reported by the device.
    pub(crate) fn report_power(&mut self, power: PowerState) {
        self.power = Some(power);
        self.confirmed = true;
    }

    /// Records a brightness reported by the device.
    pub(crate) fn report_brightness(&mut self, brightness: Brightness) {
        self.brightness = Some(brightness);
        self.confirmed = true;
    }

    /// Records a power state sent by a command.
    pub(crate) fn command_power(&mut self, power: PowerState) {
        self.power = Some(power);
        self.confirmed = false;
    }

    /// Stores a brightness to be pushed on the next turn-on.
    pub(crate) fn stage_brightness(&mut self, brightness: Brightness) {
        self.brightness = Some(brightness);
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
