// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness type for dimming actuators.
//!
//! This module provides a type-safe representation of the device-native
//! dimming value, ensuring values are always within 0-100.

use std::fmt;

use crate::error::ValueError;

/// Device-native brightness level (0-100).
///
/// free@home dimming actuators report and accept their level as a
/// percentage. Conversion to any other scale is left to the consumer.
///
/// # Examples
///
/// ```
/// use fah_lib::types::Brightness;
///
/// let level = Brightness::new(75).unwrap();
/// assert_eq!(level.value(), 75);
/// assert_eq!(level.as_datapoint_value(), "75");
///
/// // Values reported by the bus are parsed at the boundary
/// let reported = Brightness::parse_datapoint("42").unwrap();
/// assert_eq!(reported.value(), 42);
///
/// assert!(Brightness::new(101).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Brightness(u8);

impl Brightness {
    /// Minimum brightness (0).
    pub const MIN: Self = Self(0);

    /// Maximum brightness (100).
    pub const MAX: Self = Self(100);

    /// Creates a new brightness value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a brightness value, clamping to the valid range.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Parses a raw dimming datapoint value.
    ///
    /// Integer and decimal literals are accepted; decimals are rounded.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidNumber` if the value is not numeric, or
    /// `ValueError::OutOfRange` if it is outside 0-100.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn parse_datapoint(raw: &str) -> Result<Self, ValueError> {
        let trimmed = raw.trim();
        let number: f64 = trimmed
            .parse()
            .map_err(|_| ValueError::InvalidNumber(raw.to_string()))?;
        if !number.is_finite() {
            return Err(ValueError::InvalidNumber(raw.to_string()));
        }
        let rounded = number.round();
        if !(0.0..=100.0).contains(&rounded) {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                // Informational only: the value is already known to be out of range
                actual: rounded.clamp(0.0, f64::from(u16::MAX)) as u16,
            });
        }
        Ok(Self(rounded as u8))
    }

    /// Returns the brightness value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` if the level is above zero.
    #[must_use]
    pub const fn is_lit(&self) -> bool {
        self.0 > 0
    }

    /// Returns the literal written to an absolute set value datapoint.
    #[must_use]
    pub fn as_datapoint_value(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Brightness {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
