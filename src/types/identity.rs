// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel identity and datapoint address types.

use std::fmt;

/// Identity of one light: a device serial number and a channel on it.
///
/// Displayed as `SERIAL/channel`, which is also the unique ID consumers
/// key their entities on.
///
/// # Examples
///
/// ```
/// use fah_lib::types::DeviceIdentity;
///
/// let id = DeviceIdentity::new("ABB700D9C0A4", "ch0003");
/// assert_eq!(id.to_string(), "ABB700D9C0A4/ch0003");
/// assert_eq!(DeviceIdentity::parse("ABB700D9C0A4/ch0003"), Some(id));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct DeviceIdentity {
    serial_number: String,
    channel_id: String,
}

impl DeviceIdentity {
    /// Creates an identity from a serial number and channel ID.
    #[must_use]
    pub fn new(serial_number: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            serial_number: serial_number.into(),
            channel_id: channel_id.into(),
        }
    }

    /// Parses a `SERIAL/channel` string.
    ///
    /// Returns `None` if either part is empty or the separator is missing.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (serial, channel) = s.split_once('/')?;
        if serial.is_empty() || channel.is_empty() || channel.contains('/') {
            return None;
        }
        Some(Self::new(serial, channel))
    }

    /// Returns the device serial number.
    #[must_use]
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Returns the channel ID.
    #[must_use]
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.serial_number, self.channel_id)
    }
}

/// Address of one datapoint on a channel (e.g. `idp0000`, `odp0001`).
///
/// Opaque to this crate; it is only compared and handed to the bus client.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DatapointId(String);

impl DatapointId {
    /// Creates a datapoint ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatapointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DatapointId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DatapointId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for DatapointId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_display() {
        let id = DeviceIdentity::new("ABB7F500E17A", "ch0000");
        assert_eq!(id.to_string(), "ABB7F500E17A/ch0000");
        assert_eq!(id.serial_number(), "ABB7F500E17A");
        assert_eq!(id.channel_id(), "ch0000");
    }

    #[test]
    fn identity_parse_rejects_malformed() {
        assert!(DeviceIdentity::parse("ABB7F500E17A").is_none());
        assert!(DeviceIdentity::parse("/ch0000").is_none());
        assert!(DeviceIdentity::parse("ABB7F500E17A/").is_none());
        assert!(DeviceIdentity::parse("a/b/c").is_none());
    }

    #[test]
    fn identity_hash_distinguishes_channels() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(DeviceIdentity::new("ABB7F500E17A", "ch0000"));
        set.insert(DeviceIdentity::new("ABB7F500E17A", "ch0001"));
        set.insert(DeviceIdentity::new("ABB7F500E17A", "ch0000"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn datapoint_compares_with_str() {
        let dp = DatapointId::from("odp0000");
        assert!(dp == *"odp0000");
        assert_eq!(dp.as_str(), "odp0000");
    }
}
