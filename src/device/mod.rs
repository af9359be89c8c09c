// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light devices built from free@home channels.
//!
//! A [`LightDevice`] is the meeting point of both directions of traffic:
//!
//! - commands ([`LightDevice::turn_on`], [`LightDevice::turn_off`]) become
//!   datapoint writes through a [`BusClient`];
//! - status notifications ([`LightDevice::update_datapoint`]) become cached
//!   state and are announced to the light's observers.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use fah_lib::LightDevice;
//! use fah_lib::discovery::ChannelDescriptor;
//! use fah_lib::protocol::SysApConfig;
//! use fah_lib::types::{Brightness, DeviceIdentity, FunctionId, PairingId};
//!
//! # async fn example() -> fah_lib::Result<()> {
//! let client = Arc::new(SysApConfig::new("192.168.1.20").into_client()?);
//!
//! let channel = ChannelDescriptor::new(
//!     DeviceIdentity::new("ABB700D9C0A4", "ch0000"),
//!     FunctionId::DIMMING_ACTUATOR,
//! )
//! .with_datapoint(PairingId::SwitchOnOff, "idp0000")
//! .with_datapoint(PairingId::AbsoluteSetValue, "idp0002")
//! .with_datapoint(PairingId::InfoOnOff, "odp0000")
//! .with_datapoint(PairingId::InfoActualDimmingValue, "odp0001");
//!
//! let light = LightDevice::new(client, &channel)?;
//! light.set_brightness(Brightness::new(60)?);
//! light.turn_on().await?;
//! # Ok(())
//! # }
//! ```

mod datapoints;

pub use datapoints::{DimmerDatapoints, LightDatapoints, SwitchDatapoints};

use std::sync::Arc;

use parking_lot::RwLock;

use crate::discovery::ChannelDescriptor;
use crate::error::{Error, Result};
use crate::protocol::BusClient;
use crate::state::LightState;
use crate::subscription::CallbackRegistry;
use crate::types::{Brightness, DatapointId, DeviceIdentity, FunctionId, PowerState};

use datapoints::StatusRole;

/// A free@home channel exposed as a light.
///
/// The light is either a plain switch or a dimmer, fixed at construction by
/// its [`LightDatapoints`]. State starts unknown unless the channel carried
/// reported values.
///
/// # Concurrency
///
/// All methods take `&self`. State is kept behind a lock that is never held
/// across an `.await`, so calls from different threads are memory safe, but
/// the *order* in which a command and a notification for the same light
/// apply is not arbitrated here. The host must deliver commands and
/// notifications for one light one at a time.
#[derive(Debug)]
pub struct LightDevice<C: BusClient> {
    client: Arc<C>,
    identity: DeviceIdentity,
    name: String,
    function_id: FunctionId,
    device_info: serde_json::Value,
    datapoints: LightDatapoints,
    state: RwLock<LightState>,
    callbacks: CallbackRegistry,
}

impl<C: BusClient> LightDevice<C> {
    /// Builds a light from a discovered channel.
    ///
    /// Reported values for the channel's status outputs seed the initial
    /// state; observers are not involved since none can be registered yet.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::IncompleteDatapoints` if the channel lacks a
    /// datapoint its kind of light needs.
    pub fn new(client: Arc<C>, channel: &ChannelDescriptor) -> Result<Self> {
        let datapoints = LightDatapoints::from_bindings(channel.identity(), channel.datapoints())?;

        let light = Self {
            client,
            identity: channel.identity().clone(),
            name: channel.name().to_string(),
            function_id: channel.function_id(),
            device_info: channel.device_info().clone(),
            datapoints,
            state: RwLock::new(LightState::new()),
            callbacks: CallbackRegistry::new(),
        };

        let outputs = [
            Some(&light.datapoints.switch().info_on_off),
            light.datapoints.dimmer().map(|d| &d.info_actual_dimming_value),
        ];
        for datapoint in outputs.into_iter().flatten() {
            if let Some(value) = channel.initial_value(datapoint) {
                light.apply_status(datapoint.as_str(), value);
            }
        }

        tracing::debug!(
            light = %light.name,
            identity = %light.identity,
            dimmer = light.is_dimmer(),
            "Created light device"
        );
        Ok(light)
    }

    /// Returns the light's identity.
    #[must_use]
    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the channel's function ID.
    #[must_use]
    pub fn function_id(&self) -> FunctionId {
        self.function_id
    }

    /// Returns the opaque device metadata supplied at discovery.
    #[must_use]
    pub fn device_info(&self) -> &serde_json::Value {
        &self.device_info
    }

    /// Returns the datapoint address map.
    #[must_use]
    pub fn datapoints(&self) -> &LightDatapoints {
        &self.datapoints
    }

    /// Returns a snapshot of the cached state.
    #[must_use]
    pub fn state(&self) -> LightState {
        self.state.read().clone()
    }

    /// Returns whether the light is on, or `None` before anything is known.
    #[must_use]
    pub fn is_on(&self) -> Option<bool> {
        self.state.read().is_on()
    }

    /// Returns `true` if the light can dim.
    #[must_use]
    pub fn is_dimmer(&self) -> bool {
        self.datapoints.is_dimmer()
    }

    /// Returns the stored brightness.
    ///
    /// Always `None` for switches, and for dimmers until a brightness has
    /// been set or reported.
    #[must_use]
    pub fn brightness(&self) -> Option<Brightness> {
        self.state.read().brightness()
    }

    /// Returns `false` while the last command has not been reported back.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.state.read().is_confirmed()
    }

    // ========== Commands ==========

    /// Turns the light on.
    ///
    /// Writes the switch datapoint, then marks the light on. A dimmer also
    /// gets its stored brightness written afterwards when it was already on,
    /// or when it was off (or unknown) and the stored brightness is above
    /// zero. Turning on from off with no or zero brightness leaves the level
    /// to the device.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if a write fails. If the brightness write
    /// fails the light stays marked on.
    pub async fn turn_on(&self) -> Result<()> {
        let was_on = self.state.read().power() == Some(PowerState::On);

        let switch = &self.datapoints.switch().switch_on_off;
        self.write(switch, PowerState::On.as_datapoint_value())
            .await?;
        let brightness = {
            let mut state = self.state.write();
            state.command_power(PowerState::On);
            state.brightness()
        };

        let Some(dimmer) = self.datapoints.dimmer() else {
            return Ok(());
        };
        match brightness {
            Some(level) if was_on || level.is_lit() => {
                self.write(&dimmer.absolute_set_value, &level.as_datapoint_value())
                    .await
            }
            _ => Ok(()),
        }
    }

    /// Turns the light off.
    ///
    /// Writes the switch datapoint, then marks the light off. Brightness is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the write fails.
    pub async fn turn_off(&self) -> Result<()> {
        let switch = &self.datapoints.switch().switch_on_off;
        self.write(switch, PowerState::Off.as_datapoint_value())
            .await?;
        self.state.write().command_power(PowerState::Off);
        Ok(())
    }

    /// Stores the brightness the next [`turn_on`](Self::turn_on) applies.
    ///
    /// Nothing is written to the bus. Ignored on switches.
    pub fn set_brightness(&self, brightness: Brightness) {
        if self.is_dimmer() {
            self.state.write().stage_brightness(brightness);
        } else {
            tracing::trace!(identity = %self.identity, "Ignoring brightness on a switch");
        }
    }

    async fn write(&self, datapoint: &DatapointId, value: &str) -> Result<()> {
        tracing::debug!(
            light = %self.name,
            identity = %self.identity,
            datapoint = %datapoint,
            value = %value,
            "Setting datapoint"
        );
        self.client
            .set_datapoint(&self.identity, datapoint, value)
            .await
            .map_err(Error::Protocol)
    }

    // ========== Notifications ==========

    /// Applies a datapoint value reported by the bus.
    ///
    /// The switch status sets the light on exactly when the value is `"1"`.
    /// The brightness status (dimmers only) stores the reported level.
    /// Observers are notified once if the state was updated. Unknown
    /// datapoints and unreadable brightness values are logged and ignored.
    ///
    /// Returns `true` if the state was updated.
    pub fn update_datapoint(&self, datapoint: &str, value: &str) -> bool {
        let applied = self.apply_status(datapoint, value);
        if applied {
            self.publish_changed();
        }
        applied
    }

    /// Accepts a device parameter update.
    ///
    /// No parameter affects light state, so this only logs.
    pub fn update_parameter(&self, parameter: &str, value: &str) {
        tracing::debug!(
            identity = %self.identity,
            parameter = %parameter,
            value = %value,
            "Ignoring parameter update"
        );
    }

    fn apply_status(&self, datapoint: &str, value: &str) -> bool {
        match self.datapoints.status_role(datapoint) {
            Some(StatusRole::OnOff) => {
                self.state.write().report_power(PowerState::from_datapoint(value));
                tracing::info!(
                    light = %self.name,
                    identity = %self.identity,
                    datapoint = %datapoint,
                    value = %value,
                    "Light state updated"
                );
                true
            }
            Some(StatusRole::ActualDimmingValue) => match Brightness::parse_datapoint(value) {
                Ok(level) => {
                    self.state.write().report_brightness(level);
                    tracing::info!(
                        light = %self.name,
                        identity = %self.identity,
                        datapoint = %datapoint,
                        value = %value,
                        "Light brightness updated"
                    );
                    true
                }
                Err(e) => {
                    tracing::warn!(
                        identity = %self.identity,
                        datapoint = %datapoint,
                        value = %value,
                        error = %e,
                        "Unreadable brightness"
                    );
                    false
                }
            },
            None => {
                tracing::info!(
                    light = %self.name,
                    identity = %self.identity,
                    datapoint = %datapoint,
                    value = %value,
                    "Unknown datapoint"
                );
                false
            }
        }
    }

    // ========== Observers ==========

    /// Registers an observer called after each applied status update.
    ///
    /// The observer receives the light's identity and runs synchronously
    /// inside [`update_datapoint`](Self::update_datapoint).
    pub fn on_device_changed<F>(&self, callback: F)
    where
        F: Fn(&DeviceIdentity) + Send + Sync + 'static,
    {
        self.callbacks.on_device_changed(callback);
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.callbacks.callback_count()
    }

    fn publish_changed(&self) {
        self.callbacks.dispatch(&self.identity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use parking_lot::Mutex;

    use crate::error::ProtocolError;
    use crate::types::PairingId;

    /// Bus client that records writes and can be told to fail.
    #[derive(Debug, Default)]
    struct RecordingClient {
        writes: Mutex<Vec<(String, String)>>,
        fail_on: Mutex<Option<String>>,
    }

    impl RecordingClient {
        fn writes(&self) -> Vec<(String, String)> {
            self.writes.lock().clone()
        }

        fn fail_on(&self, datapoint: &str) {
            *self.fail_on.lock() = Some(datapoint.to_string());
        }
    }

    impl BusClient for RecordingClient {
        async fn set_datapoint(
            &self,
            _identity: &DeviceIdentity,
            datapoint: &DatapointId,
            value: &str,
        ) -> std::result::Result<(), ProtocolError> {
            if self.fail_on.lock().as_deref() == Some(datapoint.as_str()) {
                return Err(ProtocolError::ConnectionFailed("bus down".to_string()));
            }
            self.writes
                .lock()
                .push((datapoint.to_string(), value.to_string()));
            Ok(())
        }
    }

    fn dimmer_channel() -> ChannelDescriptor {
        ChannelDescriptor::new(
            DeviceIdentity::new("ABB700D9C0A4", "ch0000"),
            FunctionId::DIMMING_ACTUATOR,
        )
        .with_datapoint(PairingId::SwitchOnOff, "odp0000")
        .with_datapoint(PairingId::InfoOnOff, "idp0000")
        .with_datapoint(PairingId::AbsoluteSetValue, "odp0001")
        .with_datapoint(PairingId::InfoActualDimmingValue, "idp0001")
    }

    fn switch_channel() -> ChannelDescriptor {
        ChannelDescriptor::new(
            DeviceIdentity::new("ABB7F500E17A", "ch0003"),
            FunctionId::SWITCH_ACTUATOR,
        )
        .with_datapoint(PairingId::SwitchOnOff, "idp0000")
        .with_datapoint(PairingId::InfoOnOff, "odp0000")
    }

    fn light(channel: &ChannelDescriptor) -> (Arc<RecordingClient>, LightDevice<RecordingClient>) {
        let client = Arc::new(RecordingClient::default());
        let light = LightDevice::new(client.clone(), channel).unwrap();
        (client, light)
    }

    fn counter(light: &LightDevice<RecordingClient>) -> Arc<AtomicU32> {
        let count = Arc::new(AtomicU32::new(0));
        let clone = count.clone();
        light.on_device_changed(move |_| {
            clone.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    fn level(value: u8) -> Brightness {
        Brightness::new(value).unwrap()
    }

    fn write(dp: &str, value: &str) -> (String, String) {
        (dp.to_string(), value.to_string())
    }

    #[test]
    fn capability_follows_bindings() {
        let (_, dimmer) = light(&dimmer_channel());
        let (_, switch) = light(&switch_channel());
        assert!(dimmer.is_dimmer());
        assert!(!switch.is_dimmer());
    }

    #[test]
    fn starts_unknown() {
        let (_, light) = light(&dimmer_channel());
        assert_eq!(light.is_on(), None);
        assert_eq!(light.brightness(), None);
        assert!(light.is_confirmed());
        assert_eq!(light.name(), "ABB700D9C0A4/ch0000");
    }

    #[tokio::test]
    async fn turn_on_from_off_with_zero_brightness_writes_switch_only() {
        let (client, light) = light(&dimmer_channel());
        light.update_datapoint("idp0000", "0");
        light.set_brightness(Brightness::MIN);

        light.turn_on().await.unwrap();

        assert_eq!(client.writes(), vec![write("odp0000", "1")]);
        assert_eq!(light.is_on(), Some(true));
    }

    #[tokio::test]
    async fn turn_on_from_off_with_brightness_pushes_level() {
        let (client, light) = light(&dimmer_channel());
        light.update_datapoint("idp0000", "0");
        light.set_brightness(level(80));

        light.turn_on().await.unwrap();

        assert_eq!(
            client.writes(),
            vec![write("odp0000", "1"), write("odp0001", "80")]
        );
    }

    #[tokio::test]
    async fn turn_on_while_on_pushes_level_even_at_zero() {
        let (client, light) = light(&dimmer_channel());
        light.update_datapoint("idp0000", "1");
        light.update_datapoint("idp0001", "0");

        light.turn_on().await.unwrap();

        assert_eq!(
            client.writes(),
            vec![write("odp0000", "1"), write("odp0001", "0")]
        );
        assert_eq!(light.is_on(), Some(true));
    }

    #[tokio::test]
    async fn turn_on_while_on_without_level_writes_switch_only() {
        let (client, light) = light(&dimmer_channel());
        light.update_datapoint("idp0000", "1");

        light.turn_on().await.unwrap();

        assert_eq!(client.writes(), vec![write("odp0000", "1")]);
    }

    #[tokio::test]
    async fn turn_on_from_unknown_with_brightness_pushes_level() {
        let (client, light) = light(&dimmer_channel());
        light.set_brightness(level(40));

        light.turn_on().await.unwrap();

        assert_eq!(
            client.writes(),
            vec![write("odp0000", "1"), write("odp0001", "40")]
        );
    }

    #[tokio::test]
    async fn switch_turn_on_never_writes_brightness() {
        let (client, light) = light(&switch_channel());
        light.update_datapoint("odp0000", "1");

        light.turn_on().await.unwrap();

        assert_eq!(client.writes(), vec![write("idp0000", "1")]);
    }

    #[tokio::test]
    async fn turn_off_writes_once_and_keeps_brightness() {
        let (client, light) = light(&dimmer_channel());
        light.update_datapoint("idp0000", "1");
        light.update_datapoint("idp0001", "65");

        light.turn_off().await.unwrap();

        assert_eq!(client.writes(), vec![write("odp0000", "0")]);
        assert_eq!(light.is_on(), Some(false));
        assert_eq!(light.brightness(), Some(level(65)));
    }

    #[tokio::test]
    async fn commands_do_not_notify_but_mark_unconfirmed() {
        let (_, light) = light(&dimmer_channel());
        let count = counter(&light);

        light.turn_on().await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(!light.is_confirmed());

        light.update_datapoint("idp0000", "1");
        assert!(light.is_confirmed());
    }

    #[tokio::test]
    async fn failed_switch_write_leaves_state() {
        let (client, light) = light(&dimmer_channel());
        light.update_datapoint("idp0000", "0");
        client.fail_on("odp0000");

        let err = light.turn_on().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::ConnectionFailed(_))
        ));
        assert_eq!(light.is_on(), Some(false));
    }

    #[tokio::test]
    async fn failed_brightness_write_keeps_optimistic_on() {
        let (client, light) = light(&dimmer_channel());
        light.set_brightness(level(50));
        client.fail_on("odp0001");

        assert!(light.turn_on().await.is_err());

        assert_eq!(light.is_on(), Some(true));
        assert!(!light.is_confirmed());
        assert_eq!(client.writes(), vec![write("odp0000", "1")]);
    }

    #[test]
    fn set_brightness_on_switch_is_ignored() {
        let (_, light) = light(&switch_channel());
        light.set_brightness(level(50));
        assert_eq!(light.brightness(), None);
    }

    #[test]
    fn set_brightness_is_local() {
        let (client, light) = light(&dimmer_channel());
        let count = counter(&light);
        light.set_brightness(level(50));
        assert_eq!(light.brightness(), Some(level(50)));
        assert!(client.writes().is_empty());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn switch_status_updates_and_notifies_once() {
        let (_, light) = light(&dimmer_channel());
        let count = counter(&light);

        assert!(light.update_datapoint("idp0000", "1"));
        assert_eq!(light.is_on(), Some(true));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        assert!(light.update_datapoint("idp0000", "0"));
        assert_eq!(light.is_on(), Some(false));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn brightness_status_is_stored_unscaled() {
        let (_, light) = light(&dimmer_channel());
        let count = counter(&light);

        assert!(light.update_datapoint("idp0001", "75"));
        assert_eq!(light.brightness(), Some(level(75)));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_datapoint_changes_nothing() {
        let (_, light) = light(&dimmer_channel());
        let count = counter(&light);
        light.update_datapoint("idp0000", "1");
        light.update_datapoint("idp0001", "20");
        let before = light.state();

        // Command datapoints are not status outputs
        assert!(!light.update_datapoint("odp0000", "0"));
        assert!(!light.update_datapoint("odp0001", "90"));
        assert!(!light.update_datapoint("idp0099", "1"));

        assert_eq!(light.state(), before);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn brightness_status_on_switch_is_unknown() {
        let (_, light) = light(&switch_channel());
        let count = counter(&light);
        assert!(!light.update_datapoint("odp0001", "50"));
        assert_eq!(light.brightness(), None);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unreadable_brightness_is_ignored() {
        let (_, light) = light(&dimmer_channel());
        let count = counter(&light);
        assert!(!light.update_datapoint("idp0001", "dim"));
        assert_eq!(light.brightness(), None);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn update_parameter_is_a_no_op() {
        let (client, light) = light(&dimmer_channel());
        let count = counter(&light);
        let before = light.state();

        light.update_parameter("par0001", "3");

        assert_eq!(light.state(), before);
        assert!(client.writes().is_empty());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn initial_values_seed_state() {
        let channel = dimmer_channel()
            .with_initial_value("idp0000", "1")
            .with_initial_value("idp0001", "35")
            .with_initial_value("odp0000", "0");
        let (_, light) = light(&channel);

        assert_eq!(light.is_on(), Some(true));
        assert_eq!(light.brightness(), Some(level(35)));
        assert!(light.is_confirmed());
    }

    #[test]
    fn incomplete_channel_is_rejected() {
        let channel = ChannelDescriptor::new(
            DeviceIdentity::new("ABB700D9C0A4", "ch0001"),
            FunctionId::DIMMING_ACTUATOR,
        )
        .with_datapoint(PairingId::SwitchOnOff, "idp0000");

        let result = LightDevice::new(Arc::new(RecordingClient::default()), &channel);
        assert!(matches!(result, Err(Error::Device(_))));
    }
}
