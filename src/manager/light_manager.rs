// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light manager for coordinating all lights behind one SysAP.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tokio::sync::broadcast;

use crate::LightDevice;
use crate::discovery::{self, ChannelDescriptor, DiscoveryOptions};
use crate::error::{DeviceError, Error, Result};
use crate::event::{DeviceEvent, EventBus};
use crate::pairing::pairing_ids;
use crate::protocol::BusClient;
use crate::telemetry::{self, DatapointUpdate};
use crate::types::{Brightness, DeviceIdentity};

/// Manager for the lights of one SysAP.
///
/// The manager owns every light, shares one bus client between them, routes
/// datapoint updates to the right light and republishes their change
/// notifications on an [`EventBus`].
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use fah_lib::manager::LightManager;
/// use fah_lib::protocol::SysApConfig;
///
/// #[tokio::main]
/// async fn main() -> fah_lib::Result<()> {
///     let client = SysApConfig::new("192.168.1.20").into_client()?;
///     let manager = LightManager::new(Arc::new(client));
///
///     let mut events = manager.subscribe();
///     tokio::spawn(async move {
///         while let Ok(event) = events.recv().await {
///             println!("Event: {event:?}");
///         }
///     });
///
///     # let config_json = "{}";
///     for identity in manager.load_configuration(config_json)? {
///         manager.turn_on(&identity).await?;
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct LightManager<C: BusClient> {
    client: Arc<C>,
    lights: RwLock<HashMap<DeviceIdentity, Arc<LightDevice<C>>>>,
    event_bus: EventBus,
    options: DiscoveryOptions,
}

impl<C> LightManager<C>
where
    C: BusClient + Send + Sync + 'static,
{
    /// Creates an empty manager.
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            lights: RwLock::new(HashMap::new()),
            event_bus: EventBus::new(),
            options: DiscoveryOptions::default(),
        }
    }

    /// Creates an empty manager with custom event bus capacity.
    #[must_use]
    pub fn with_capacity(client: Arc<C>, event_capacity: usize) -> Self {
        Self {
            event_bus: EventBus::with_capacity(event_capacity),
            ..Self::new(client)
        }
    }

    /// Sets the options used when loading configurations.
    #[must_use]
    pub fn with_discovery_options(mut self, options: DiscoveryOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the discovery options.
    #[must_use]
    pub fn discovery_options(&self) -> &DiscoveryOptions {
        &self.options
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribes to events for all managed lights.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the number of active event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.event_bus.subscriber_count()
    }

    // =========================================================================
    // Light Management
    // =========================================================================

    /// Loads every light channel from a SysAP configuration document.
    ///
    /// Channels that cannot be built are logged and skipped. Returns the
    /// identities of the lights that were added.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the document cannot be read.
    pub fn load_configuration(&self, config_json: &str) -> Result<Vec<DeviceIdentity>> {
        let channels = discovery::light_channels(config_json, &self.options)?;

        let mut added = Vec::with_capacity(channels.len());
        for channel in &channels {
            match self.add_channel(channel) {
                Ok(light) => added.push(light.identity().clone()),
                Err(e) => tracing::warn!(
                    identity = %channel.identity(),
                    error = %e,
                    "Skipping light channel"
                ),
            }
        }

        tracing::info!(lights = added.len(), "Loaded SysAP configuration");
        Ok(added)
    }

    /// Adds a light for a channel, replacing any light with the same identity.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedFunction` if the channel's function
    /// is not handled as a light under the current options, or
    /// `DeviceError::IncompleteDatapoints` if the channel lacks datapoints.
    pub fn add_channel(&self, channel: &ChannelDescriptor) -> Result<Arc<LightDevice<C>>> {
        if pairing_ids(channel.function_id(), self.options.switch_as_x).is_none() {
            return Err(DeviceError::UnsupportedFunction(channel.function_id().to_string()).into());
        }

        let light = Arc::new(LightDevice::new(Arc::clone(&self.client), channel)?);
        self.forward_changes(&light);

        let identity = light.identity().clone();
        let replaced = self
            .lights
            .write()
            .insert(identity.clone(), Arc::clone(&light))
            .is_some();
        if replaced {
            tracing::debug!(identity = %identity, "Replaced light");
        }

        self.event_bus.publish(DeviceEvent::LightAdded { identity });
        Ok(light)
    }

    /// Removes a light. Returns it if it was managed.
    pub fn remove(&self, identity: &DeviceIdentity) -> Option<Arc<LightDevice<C>>> {
        self.lights.write().remove(identity)
    }

    /// Returns the light with the given identity.
    #[must_use]
    pub fn light(&self, identity: &DeviceIdentity) -> Option<Arc<LightDevice<C>>> {
        self.lights.read().get(identity).cloned()
    }

    /// Returns all managed lights, ordered by identity.
    #[must_use]
    pub fn lights(&self) -> Vec<Arc<LightDevice<C>>> {
        let mut lights: Vec<_> = self.lights.read().values().cloned().collect();
        lights.sort_by(|a, b| a.identity().cmp(b.identity()));
        lights
    }

    /// Returns the number of managed lights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lights.read().len()
    }

    /// Returns `true` if no light is managed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lights.read().is_empty()
    }

    fn forward_changes(&self, light: &Arc<LightDevice<C>>) {
        let bus = self.event_bus.clone();
        let weak: Weak<LightDevice<C>> = Arc::downgrade(light);
        light.on_device_changed(move |identity| {
            if let Some(light) = weak.upgrade() {
                bus.publish(DeviceEvent::StateChanged {
                    identity: identity.clone(),
                    snapshot: light.state(),
                });
            }
        });
    }

    fn require(&self, identity: &DeviceIdentity) -> Result<Arc<LightDevice<C>>> {
        self.light(identity)
            .ok_or_else(|| Error::Device(DeviceError::UnknownDevice(identity.clone())))
    }

    // =========================================================================
    // Updates
    // =========================================================================

    /// Routes one datapoint update to its light.
    ///
    /// Returns `true` if a light applied it. Updates for unknown channels are
    /// ignored.
    pub fn apply_update(&self, update: &DatapointUpdate) -> bool {
        let Some(light) = self.light(&update.identity) else {
            tracing::trace!(
                identity = %update.identity,
                datapoint = %update.datapoint,
                "Update for unmanaged channel"
            );
            return false;
        };
        light.update_datapoint(update.datapoint.as_str(), &update.value)
    }

    /// Parses a datapoint update message and routes every update in it.
    ///
    /// Returns the number of updates a light applied.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the message cannot be read.
    pub fn apply_message(&self, message: &str) -> Result<usize> {
        let updates = telemetry::parse_datapoint_updates(message)?;
        Ok(updates.iter().filter(|u| self.apply_update(u)).count())
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Turns a light on.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnknownDevice` for unmanaged identities, or the
    /// light's command error.
    pub async fn turn_on(&self, identity: &DeviceIdentity) -> Result<()> {
        self.require(identity)?.turn_on().await
    }

    /// Turns a light off.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnknownDevice` for unmanaged identities, or the
    /// light's command error.
    pub async fn turn_off(&self, identity: &DeviceIdentity) -> Result<()> {
        self.require(identity)?.turn_off().await
    }

    /// Stores the brightness a light applies on its next turn on.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnknownDevice` for unmanaged identities.
    pub fn set_brightness(&self, identity: &DeviceIdentity, brightness: Brightness) -> Result<()> {
        self.require(identity)?.set_brightness(brightness);
        Ok(())
    }
}
