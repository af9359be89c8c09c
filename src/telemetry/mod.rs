// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Datapoint update messages pushed by the SysAP.
//!
//! The SysAP reports value changes as JSON keyed by the SysAP ID, with one
//! entry per changed datapoint:
//!
//! ```json
//! {
//!   "00000000-0000-0000-0000-000000000000": {
//!     "datapoints": {
//!       "ABB700D9C0A4/ch0000/odp0000": "1",
//!       "ABB700D9C0A4/ch0000/odp0001": "75"
//!     }
//!   }
//! }
//! ```
//!
//! # Examples
//!
//! ```
//! use fah_lib::telemetry::parse_datapoint_updates;
//!
//! let message = r#"{"00000000-0000-0000-0000-000000000000":
//!     {"datapoints": {"ABB700D9C0A4/ch0000/odp0000": "1"}}}"#;
//!
//! let updates = parse_datapoint_updates(message).unwrap();
//! assert_eq!(updates.len(), 1);
//! assert_eq!(updates[0].identity.serial_number(), "ABB700D9C0A4");
//! assert_eq!(updates[0].datapoint.as_str(), "odp0000");
//! assert_eq!(updates[0].value, "1");
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ParseError;
use crate::types::{DatapointId, DeviceIdentity};

/// One reported datapoint value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DatapointUpdate {
    /// The channel the value belongs to.
    pub identity: DeviceIdentity,
    /// The datapoint that changed.
    pub datapoint: DatapointId,
    /// The raw reported value.
    pub value: String,
}

impl DatapointUpdate {
    /// Parses a `SERIAL/chNNNN/dpNNNN` key together with its value.
    ///
    /// Returns `None` for keys without exactly three non-empty segments.
    #[must_use]
    pub fn from_key(key: &str, value: impl Into<String>) -> Option<Self> {
        let mut parts = key.split('/');
        let serial = parts.next().filter(|s| !s.is_empty())?;
        let channel = parts.next().filter(|s| !s.is_empty())?;
        let datapoint = parts.next().filter(|s| !s.is_empty())?;
        if parts.next().is_some() {
            return None;
        }

        Some(Self {
            identity: DeviceIdentity::new(serial, channel),
            datapoint: DatapointId::new(datapoint),
            value: value.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SysApUpdate {
    #[serde(default)]
    datapoints: BTreeMap<String, serde_json::Value>,
}

/// Parses a datapoint update message.
///
/// Updates from every SysAP in the message are returned in key order.
/// Keys that are not datapoint addresses are skipped. Numeric and boolean
/// values are accepted and kept as their JSON text.
///
/// # Errors
///
/// Returns `ParseError::Json` if the message is not valid JSON, or
/// `ParseError::UnexpectedFormat` if it is not an object of SysAP entries.
pub fn parse_datapoint_updates(message: &str) -> Result<Vec<DatapointUpdate>, ParseError> {
    let sections: BTreeMap<String, serde_json::Value> = serde_json::from_str(message)?;

    let mut updates = Vec::new();
    for (sysap, section) in sections {
        let section: SysApUpdate = serde_json::from_value(section).map_err(|e| {
            ParseError::UnexpectedFormat(format!("SysAP {sysap}: {e}"))
        })?;

        for (key, value) in section.datapoints {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => String::from(if b { "1" } else { "0" }),
                other => {
                    tracing::debug!(key = %key, value = %other, "Skipping non-scalar datapoint value");
                    continue;
                }
            };
            match DatapointUpdate::from_key(&key, value) {
                Some(update) => updates.push(update),
                None => tracing::debug!(key = %key, "Skipping malformed datapoint key"),
            }
        }
    }

    tracing::trace!(count = updates.len(), "Parsed datapoint updates");
    Ok(updates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_key_splits_address() {
        let update = DatapointUpdate::from_key("ABB7F500E17A/ch0003/odp0000", "0").unwrap();
        assert_eq!(update.identity, DeviceIdentity::new("ABB7F500E17A", "ch0003"));
        assert_eq!(update.datapoint, DatapointId::new("odp0000"));
        assert_eq!(update.value, "0");
    }

    #[test]
    fn from_key_rejects_malformed() {
        assert!(DatapointUpdate::from_key("ABB7F500E17A/ch0003", "0").is_none());
        assert!(DatapointUpdate::from_key("ABB7F500E17A//odp0000", "0").is_none());
        assert!(DatapointUpdate::from_key("a/b/c/d", "0").is_none());
        assert!(DatapointUpdate::from_key("", "0").is_none());
    }

    #[test]
    fn parses_multiple_updates() {
        let message = r#"{
            "00000000-0000-0000-0000-000000000000": {
                "datapoints": {
                    "ABB700D9C0A4/ch0000/odp0001": "75",
                    "ABB700D9C0A4/ch0000/odp0000": "1",
                    "not-a-datapoint": "x"
                }
            }
        }"#;

        let updates = parse_datapoint_updates(message).unwrap();

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].datapoint.as_str(), "odp0000");
        assert_eq!(updates[1].datapoint.as_str(), "odp0001");
        assert_eq!(updates[1].value, "75");
    }

    #[test]
    fn numeric_values_are_kept_as_text() {
        let message = r#"{"sysap": {"datapoints": {"S/ch0000/odp0001": 42, "S/ch0000/odp0000": true}}}"#;
        let updates = parse_datapoint_updates(message).unwrap();
        assert_eq!(updates[0].value, "1");
        assert_eq!(updates[1].value, "42");
    }

    #[test]
    fn section_without_datapoints_is_empty() {
        let updates = parse_datapoint_updates(r#"{"sysap": {}}"#).unwrap();
        assert!(updates.is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            parse_datapoint_updates("{not json"),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn non_object_section_is_an_error() {
        assert!(matches!(
            parse_datapoint_updates(r#"{"sysap": 5}"#),
            Err(ParseError::UnexpectedFormat(_))
        ));
    }
}
