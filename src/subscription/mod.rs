// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for device-changed notifications.
//!
//! Every [`LightDevice`](crate::LightDevice) owns a [`CallbackRegistry`].
//! Consumers register observers on the light; the light publishes to them
//! whenever an incoming datapoint changes its state.
//!
//! # Usage
//!
//! ```no_run
//! use fah_lib::LightDevice;
//! use fah_lib::protocol::HttpBusClient;
//!
//! # fn example(light: &LightDevice<HttpBusClient>) {
//! light.on_device_changed(|identity| {
//!     println!("{identity} changed");
//! });
//! # }
//! ```

mod callback;

pub use callback::CallbackRegistry;
