// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Managing every light behind a SysAP.
//!
//! [`LightManager`] ties the pieces together: it builds lights from the
//! SysAP configuration, routes pushed datapoint updates to them and turns
//! their change notifications into [`DeviceEvent`](crate::event::DeviceEvent)s.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use fah_lib::event::DeviceEvent;
//! use fah_lib::manager::LightManager;
//! use fah_lib::protocol::SysApConfig;
//!
//! # fn example(config_json: &str, pushed: &str) -> fah_lib::Result<()> {
//! let client = SysApConfig::new("192.168.1.20").into_client()?;
//! let manager = LightManager::new(Arc::new(client));
//! let mut events = manager.subscribe();
//!
//! manager.load_configuration(config_json)?;
//! manager.apply_message(pushed)?;
//!
//! while let Ok(event) = events.try_recv() {
//!     if let DeviceEvent::StateChanged { identity, snapshot } = event {
//!         println!("{identity}: {:?}", snapshot.is_on());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod light_manager;

pub use light_manager::LightManager;
