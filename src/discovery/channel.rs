// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-channel discovery metadata.

use std::collections::{BTreeMap, HashMap};

use crate::types::{DatapointId, DeviceIdentity, FunctionId, PairingId};

/// Everything needed to build a light for one channel.
///
/// Produced by [`light_channels`](super::light_channels) from the SysAP
/// configuration, or assembled by hand.
///
/// # Examples
///
/// ```
/// use fah_lib::discovery::ChannelDescriptor;
/// use fah_lib::types::{DeviceIdentity, FunctionId, PairingId};
///
/// let channel = ChannelDescriptor::new(
///     DeviceIdentity::new("ABB700D9C0A4", "ch0000"),
///     FunctionId::SWITCH_ACTUATOR,
/// )
/// .with_name("Hallway")
/// .with_datapoint(PairingId::SwitchOnOff, "idp0000")
/// .with_datapoint(PairingId::InfoOnOff, "odp0000");
///
/// assert_eq!(channel.datapoints().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDescriptor {
    identity: DeviceIdentity,
    name: String,
    function_id: FunctionId,
    datapoints: BTreeMap<PairingId, DatapointId>,
    initial_values: HashMap<DatapointId, String>,
    device_info: serde_json::Value,
}

impl ChannelDescriptor {
    /// Creates a descriptor with no datapoints bound.
    ///
    /// The name defaults to the identity string.
    #[must_use]
    pub fn new(identity: DeviceIdentity, function_id: FunctionId) -> Self {
        Self {
            name: identity.to_string(),
            identity,
            function_id,
            datapoints: BTreeMap::new(),
            initial_values: HashMap::new(),
            device_info: serde_json::Value::Null,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Binds a datapoint to a role, replacing any previous binding.
    #[must_use]
    pub fn with_datapoint(mut self, role: PairingId, datapoint: impl Into<DatapointId>) -> Self {
        self.datapoints.insert(role, datapoint.into());
        self
    }

    /// Records the last value the SysAP reported for a datapoint.
    #[must_use]
    pub fn with_initial_value(
        mut self,
        datapoint: impl Into<DatapointId>,
        value: impl Into<String>,
    ) -> Self {
        self.initial_values.insert(datapoint.into(), value.into());
        self
    }

    /// Attaches opaque device metadata for consumers.
    #[must_use]
    pub fn with_device_info(mut self, device_info: serde_json::Value) -> Self {
        self.device_info = device_info;
        self
    }

    /// Returns the channel identity.
    #[must_use]
    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the function ID.
    #[must_use]
    pub fn function_id(&self) -> FunctionId {
        self.function_id
    }

    /// Returns the role to datapoint bindings.
    #[must_use]
    pub fn datapoints(&self) -> &BTreeMap<PairingId, DatapointId> {
        &self.datapoints
    }

    /// Returns the reported value of a datapoint, if any.
    #[must_use]
    pub fn initial_value(&self, datapoint: &DatapointId) -> Option<&str> {
        self.initial_values.get(datapoint).map(String::as_str)
    }

    /// Returns the opaque device metadata.
    #[must_use]
    pub fn device_info(&self) -> &serde_json::Value {
        &self.device_info
    }
}
