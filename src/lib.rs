// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `fah_lib` - Light control for ABB-free@home channels.
//!
//! This library exposes free@home switch and dimming actuator channels as
//! lights. It decides which channels are lights and which datapoints they
//! use, turns light commands into datapoint writes, and keeps a cached light
//! state up to date from the values the system access point (SysAP) pushes.
//!
//! # Supported Channels
//!
//! - Switch actuators (`0x0007`) and light switch actuators (`0x1010`): on/off
//! - Dimming actuators (`0x0012`): on/off and brightness (0-100)
//!
//! # Quick Start
//!
//! ## Managing All Lights of a SysAP
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use fah_lib::manager::LightManager;
//! use fah_lib::protocol::SysApConfig;
//!
//! #[tokio::main]
//! async fn main() -> fah_lib::Result<()> {
//!     let client = SysApConfig::new("192.168.1.20")
//!         .with_credentials("installer", "secret")
//!         .into_client()?;
//!     let manager = LightManager::new(Arc::new(client));
//!
//!     # let config_json = "{}";
//!     // Build lights from the SysAP configuration
//!     let lights = manager.load_configuration(config_json)?;
//!
//!     for identity in &lights {
//!         manager.turn_on(identity).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## A Single Light
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use fah_lib::LightDevice;
//! use fah_lib::discovery::ChannelDescriptor;
//! use fah_lib::protocol::SysApConfig;
//! use fah_lib::types::{Brightness, DeviceIdentity, FunctionId, PairingId};
//!
//! #[tokio::main]
//! async fn main() -> fah_lib::Result<()> {
//!     let client = Arc::new(SysApConfig::new("192.168.1.20").into_client()?);
//!
//!     let channel = ChannelDescriptor::new(
//!         DeviceIdentity::new("ABB700D9C0A4", "ch0000"),
//!         FunctionId::DIMMING_ACTUATOR,
//!     )
//!     .with_datapoint(PairingId::SwitchOnOff, "idp0000")
//!     .with_datapoint(PairingId::AbsoluteSetValue, "idp0002")
//!     .with_datapoint(PairingId::InfoOnOff, "odp0000")
//!     .with_datapoint(PairingId::InfoActualDimmingValue, "odp0001");
//!
//!     let light = LightDevice::new(client, &channel)?;
//!     light.on_device_changed(|identity| println!("{identity} changed"));
//!
//!     light.set_brightness(Brightness::new(75)?);
//!     light.turn_on().await?;
//!
//!     // Values pushed by the SysAP update the cached state
//!     light.update_datapoint("odp0001", "75");
//!     assert_eq!(light.brightness(), Some(Brightness::new(75)?));
//!     Ok(())
//! }
//! ```
//!
//! # Feature Flags
//!
//! - `http` (default): [`protocol::HttpBusClient`] over the SysAP REST API

mod device;
pub mod discovery;
pub mod error;
pub mod event;
pub mod manager;
pub mod pairing;
pub mod protocol;
pub mod state;
pub mod subscription;
pub mod telemetry;
pub mod types;

pub use device::{DimmerDatapoints, LightDatapoints, LightDevice, SwitchDatapoints};
pub use error::{DeviceError, Error, ParseError, ProtocolError, Result, ValueError};
pub use pairing::{PairingSet, pairing_ids};
pub use protocol::BusClient;
#[cfg(feature = "http")]
pub use protocol::{HttpBusClient, SysApConfig};
pub use state::LightState;
pub use subscription::CallbackRegistry;
pub use types::{Brightness, DatapointId, DeviceIdentity, FunctionId, PairingId, PowerState};
