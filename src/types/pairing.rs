// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol identifiers: pairing IDs (parameter roles) and function IDs.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// The logical role a datapoint plays on a channel.
///
/// free@home calls these pairing IDs. Roles this crate does not act on are
/// kept as [`PairingId::Other`] so discovery metadata can be carried as-is.
///
/// # Examples
///
/// ```
/// use fah_lib::types::PairingId;
///
/// assert_eq!(PairingId::from_raw(0x0001), PairingId::SwitchOnOff);
/// assert_eq!(PairingId::InfoActualDimmingValue.value(), 0x0110);
/// assert_eq!(PairingId::from_raw(0x0004), PairingId::Other(0x0004));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum PairingId {
    /// Switch command (input).
    SwitchOnOff,
    /// Absolute brightness command (input).
    AbsoluteSetValue,
    /// Switch status (output).
    InfoOnOff,
    /// Actual brightness status (output).
    InfoActualDimmingValue,
    /// Any other pairing ID.
    Other(u16),
}

impl PairingId {
    /// Maps a raw pairing ID onto a role.
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        match raw {
            0x0001 => Self::SwitchOnOff,
            0x0011 => Self::AbsoluteSetValue,
            0x0100 => Self::InfoOnOff,
            0x0110 => Self::InfoActualDimmingValue,
            other => Self::Other(other),
        }
    }

    /// Returns the raw protocol value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        match self {
            Self::SwitchOnOff => 0x0001,
            Self::AbsoluteSetValue => 0x0011,
            Self::InfoOnOff => 0x0100,
            Self::InfoActualDimmingValue => 0x0110,
            Self::Other(raw) => *raw,
        }
    }

    /// Returns a short name for logs and error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SwitchOnOff => "SwitchOnOff",
            Self::AbsoluteSetValue => "AbsoluteSetValue",
            Self::InfoOnOff => "InfoOnOff",
            Self::InfoActualDimmingValue => "InfoActualDimmingValue",
            Self::Other(_) => "Other",
        }
    }
}

impl From<u16> for PairingId {
    fn from(raw: u16) -> Self {
        Self::from_raw(raw)
    }
}

impl From<PairingId> for u16 {
    fn from(id: PairingId) -> Self {
        id.value()
    }
}

impl fmt::Display for PairingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:04X})", self.name(), self.value())
    }
}

/// A channel's device class.
///
/// The SysAP reports function IDs as hexadecimal strings (e.g. `"12"`).
///
/// # Examples
///
/// ```
/// use fah_lib::types::FunctionId;
///
/// let fid: FunctionId = "12".parse().unwrap();
/// assert_eq!(fid, FunctionId::DIMMING_ACTUATOR);
/// assert!(fid.is_dimming_actuator());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionId(u16);

impl FunctionId {
    /// Switching actuator.
    pub const SWITCH_ACTUATOR: Self = Self(0x0007);

    /// Dimming actuator.
    pub const DIMMING_ACTUATOR: Self = Self(0x0012);

    /// Light switch actuator found on door-entry hardware.
    pub const LIGHT_SWITCH_ACTUATOR: Self = Self(0x1010);

    /// Function IDs of the switching-actuator class.
    pub const SWITCHING_ACTUATORS: [Self; 2] = [Self::SWITCH_ACTUATOR, Self::LIGHT_SWITCH_ACTUATOR];

    /// Function IDs of the dimming-actuator class.
    pub const DIMMING_ACTUATORS: [Self; 1] = [Self::DIMMING_ACTUATOR];

    /// Creates a function ID from its raw value.
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns `true` if this belongs to the dimming-actuator class.
    #[must_use]
    pub fn is_dimming_actuator(&self) -> bool {
        Self::DIMMING_ACTUATORS.contains(self)
    }

    /// Returns `true` if this belongs to the switching-actuator class.
    #[must_use]
    pub fn is_switching_actuator(&self) -> bool {
        Self::SWITCHING_ACTUATORS.contains(self)
    }
}

impl FromStr for FunctionId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        u16::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ValueError::InvalidIdentifier(s.to_string()))
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

impl<'de> serde::Deserialize<'de> for FunctionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for FunctionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("{:X}", self.0))
    }
}
