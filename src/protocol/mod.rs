// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bus client seam for writing datapoints.
//!
//! Light devices never talk to the network themselves; they hand every
//! datapoint write to a [`BusClient`]. Timeouts and connection handling are
//! the client's responsibility.
//!
//! # Clients
//!
//! - [`HttpBusClient`]: writes through the SysAP local REST API (feature `http`)

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{Credentials, HttpBusClient, SysApConfig};

use crate::error::ProtocolError;
use crate::types::{DatapointId, DeviceIdentity};

/// Trait for transports that can write datapoints on the bus.
#[allow(async_fn_in_trait)]
pub trait BusClient {
    /// Writes `value` to a datapoint of the given channel.
    ///
    /// Returns once the write has been acknowledged or has failed.
    ///
    /// # Arguments
    ///
    /// * `identity` - Serial number and channel of the target
    /// * `datapoint` - The datapoint to write
    /// * `value` - The raw datapoint literal (`"1"`, `"0"`, `"80"`, ...)
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the write could not be delivered or was
    /// refused.
    async fn set_datapoint(
        &self,
        identity: &DeviceIdentity,
        datapoint: &DatapointId,
        value: &str,
    ) -> Result<(), ProtocolError>;
}
