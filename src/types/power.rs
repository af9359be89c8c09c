// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! On/off state carried by switching datapoints.

use std::fmt;

/// The on/off state of a light channel.
///
/// free@home switching datapoints carry the literals `"1"` and `"0"`.
///
/// # Examples
///
/// ```
/// use fah_lib::types::PowerState;
///
/// assert_eq!(PowerState::On.as_datapoint_value(), "1");
/// assert_eq!(PowerState::from_datapoint("1"), PowerState::On);
/// assert_eq!(PowerState::from_datapoint("0"), PowerState::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PowerState {
    /// The channel is off.
    Off,
    /// The channel is on.
    On,
}

impl PowerState {
    /// Reads a raw switching datapoint value.
    ///
    /// Only the literal `"1"` means on; every other value reads as off.
    #[must_use]
    pub fn from_datapoint(raw: &str) -> Self {
        Self::from(raw == "1")
    }

    /// Returns the literal written to a switching datapoint.
    #[must_use]
    pub const fn as_datapoint_value(&self) -> &'static str {
        match self {
            Self::Off => "0",
            Self::On => "1",
        }
    }

    /// Returns `true` for [`PowerState::On`].
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::On => write!(f, "on"),
        }
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_reads_as_on() {
        assert_eq!(PowerState::from_datapoint("1"), PowerState::On);
        assert_eq!(PowerState::from_datapoint("0"), PowerState::Off);
        assert_eq!(PowerState::from_datapoint("true"), PowerState::Off);
        assert_eq!(PowerState::from_datapoint(" 1"), PowerState::Off);
        assert_eq!(PowerState::from_datapoint(""), PowerState::Off);
    }

    #[test]
    fn datapoint_literals() {
        assert_eq!(PowerState::On.as_datapoint_value(), "1");
        assert_eq!(PowerState::Off.as_datapoint_value(), "0");
    }

    #[test]
    fn from_bool() {
        assert_eq!(PowerState::from(true), PowerState::On);
        assert_eq!(PowerState::from(false), PowerState::Off);
        assert!(PowerState::On.is_on());
        assert!(!PowerState::Off.is_on());
    }

    #[test]
    fn display() {
        assert_eq!(PowerState::On.to_string(), "on");
        assert_eq!(PowerState::Off.to_string(), "off");
    }
}
