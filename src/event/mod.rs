// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for light state changes.
//!
//! Per-light observers ([`LightDevice::on_device_changed`]) are synchronous
//! and carry only the identity. The [`EventBus`] fans the same changes out
//! to async subscribers together with a state snapshot, using tokio's
//! broadcast channel.
//!
//! [`LightDevice::on_device_changed`]: crate::LightDevice::on_device_changed
//!
//! # Examples
//!
//! ```
//! use fah_lib::event::{DeviceEvent, EventBus};
//! use fah_lib::types::DeviceIdentity;
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(DeviceEvent::LightAdded {
//!     identity: DeviceIdentity::new("ABB700D9C0A4", "ch0000"),
//! });
//! ```

mod device_event;
mod event_bus;

pub use device_event::DeviceEvent;
pub use event_bus::EventBus;
