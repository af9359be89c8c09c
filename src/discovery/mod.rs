// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light discovery from the SysAP configuration.
//!
//! The SysAP describes every device it knows as a tree of channels, each
//! with a function ID and input/output datapoints tagged by pairing ID.
//! [`light_channels`] walks that tree, asks the
//! [pairing resolver](crate::pairing::pairing_ids) which channels are lights,
//! and binds only the datapoints those lights use.
//!
//! # Examples
//!
//! ```
//! use fah_lib::discovery::{light_channels, DiscoveryOptions};
//!
//! let config = r#"{
//!   "00000000-0000-0000-0000-000000000000": {
//!     "devices": {
//!       "ABB700D9C0A4": {
//!         "displayName": "Actuator",
//!         "channels": {
//!           "ch0000": {
//!             "displayName": "Hallway",
//!             "functionID": "7",
//!             "inputs": { "idp0000": { "pairingID": 1, "value": "0" } },
//!             "outputs": { "odp0000": { "pairingID": 256, "value": "1" } }
//!           }
//!         }
//!       }
//!     }
//!   }
//! }"#;
//!
//! let lights = light_channels(config, &DiscoveryOptions::default()).unwrap();
//! assert_eq!(lights.len(), 1);
//! assert_eq!(lights[0].name(), "Hallway");
//!
//! // Switching actuators can be left to a generic switch platform instead
//! let lights = light_channels(config, &DiscoveryOptions::new().with_switch_as_x(true)).unwrap();
//! assert!(lights.is_empty());
//! ```

mod channel;

pub use channel::ChannelDescriptor;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::pairing::{PairingSet, pairing_ids};
use crate::types::{DatapointId, DeviceIdentity, FunctionId, PairingId};

/// Options applied while discovering lights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryOptions {
    /// Leave switching actuators to a generic switch instead of a light.
    pub switch_as_x: bool,
}

impl DiscoveryOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether switching actuators are skipped.
    #[must_use]
    pub fn with_switch_as_x(mut self, switch_as_x: bool) -> Self {
        self.switch_as_x = switch_as_x;
        self
    }
}

#[derive(Debug, Deserialize)]
struct SysApSection {
    #[serde(default)]
    devices: BTreeMap<String, RawDevice>,
}

#[derive(Debug, Deserialize)]
struct RawDevice {
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
    #[serde(default)]
    channels: BTreeMap<String, RawChannel>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawChannel {
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
    #[serde(rename = "functionID", default)]
    function_id: Option<String>,
    #[serde(default)]
    inputs: BTreeMap<DatapointId, RawDatapoint>,
    #[serde(default)]
    outputs: BTreeMap<DatapointId, RawDatapoint>,
}

#[derive(Debug, Deserialize)]
struct RawDatapoint {
    #[serde(rename = "pairingID", default)]
    pairing_id: Option<u16>,
    #[serde(default)]
    value: Option<String>,
}

/// Finds the light channels in a SysAP configuration document.
///
/// Channels whose function ID is missing, malformed or not a light class are
/// skipped. The result is ordered by serial number, then channel ID.
///
/// # Errors
///
/// Returns `ParseError` if the document is not JSON or not keyed by SysAP.
pub fn light_channels(
    config_json: &str,
    options: &DiscoveryOptions,
) -> Result<Vec<ChannelDescriptor>, ParseError> {
    let value: serde_json::Value = serde_json::from_str(config_json)?;
    light_channels_from_value(value, options)
}

/// Same as [`light_channels`] for an already parsed document.
///
/// # Errors
///
/// Returns `ParseError` if the document is not keyed by SysAP.
pub fn light_channels_from_value(
    config: serde_json::Value,
    options: &DiscoveryOptions,
) -> Result<Vec<ChannelDescriptor>, ParseError> {
    let serde_json::Value::Object(sysaps) = config else {
        return Err(ParseError::UnexpectedFormat(
            "configuration is not an object".to_string(),
        ));
    };

    let mut lights = Vec::new();
    for (sysap_id, section) in sysaps {
        let section: SysApSection = serde_json::from_value(section)?;
        tracing::debug!(
            sysap = %sysap_id,
            devices = section.devices.len(),
            "Scanning SysAP configuration"
        );
        for (serial, device) in section.devices {
            collect_device(&serial, device, options, &mut lights);
        }
    }

    tracing::info!(count = lights.len(), "Discovered light channels");
    Ok(lights)
}

fn collect_device(
    serial: &str,
    device: RawDevice,
    options: &DiscoveryOptions,
    lights: &mut Vec<ChannelDescriptor>,
) {
    let mut device_info = device.extra;
    if let Some(name) = &device.display_name {
        device_info.insert("displayName".to_string(), name.clone().into());
    }
    device_info.insert("serialNumber".to_string(), serial.into());
    let device_info = serde_json::Value::Object(device_info);

    for (channel_id, channel) in device.channels {
        let identity = DeviceIdentity::new(serial, channel_id);

        let Some(function_id) = channel.function_id.as_deref() else {
            tracing::trace!(channel = %identity, "Channel has no function ID");
            continue;
        };
        let function_id: FunctionId = match function_id.parse() {
            Ok(fid) => fid,
            Err(e) => {
                tracing::debug!(channel = %identity, error = %e, "Skipping channel");
                continue;
            }
        };
        let Some(pairing) = pairing_ids(function_id, options.switch_as_x) else {
            tracing::trace!(channel = %identity, function = %function_id, "Not a light");
            continue;
        };

        let name = channel
            .display_name
            .clone()
            .or_else(|| device.display_name.clone())
            .unwrap_or_else(|| identity.to_string());

        let descriptor = bind_channel(
            ChannelDescriptor::new(identity, function_id)
                .with_name(name)
                .with_device_info(device_info.clone()),
            &channel,
            pairing,
        );

        tracing::debug!(
            channel = %descriptor.identity(),
            function = %function_id,
            datapoints = descriptor.datapoints().len(),
            "Found light channel"
        );
        lights.push(descriptor);
    }
}

/// Binds the datapoints the pairing set asks for.
///
/// If a role appears on several datapoints the first in ID order wins.
fn bind_channel(
    mut descriptor: ChannelDescriptor,
    channel: &RawChannel,
    pairing: PairingSet,
) -> ChannelDescriptor {
    let inputs = channel
        .inputs
        .iter()
        .filter_map(|(dp, raw)| Some((dp, PairingId::from_raw(raw.pairing_id?), raw)))
        .filter(|(_, role, _)| pairing.requires_input(*role));
    let outputs = channel
        .outputs
        .iter()
        .filter_map(|(dp, raw)| Some((dp, PairingId::from_raw(raw.pairing_id?), raw)))
        .filter(|(_, role, _)| pairing.requires_output(*role));

    for (dp, role, raw) in inputs.chain(outputs) {
        if descriptor.datapoints().contains_key(&role) {
            continue;
        }
        descriptor = descriptor.with_datapoint(role, dp.clone());
        if let Some(value) = &raw.value {
            descriptor = descriptor.with_initial_value(dp.clone(), value.clone());
        }
    }
    descriptor
}
