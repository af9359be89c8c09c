// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback storage and dispatch for device-changed notifications.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::DeviceIdentity;

/// Type alias for device-changed callbacks.
type DeviceChangedCallback = Arc<dyn Fn(&DeviceIdentity) + Send + Sync>;

/// Registry of observers interested in one device's changes.
///
/// Each light owns one registry. Observers are appended and live as long as
/// the light; there is no unregistration.
///
/// # Thread Safety
///
/// Registration and dispatch may happen from different tasks. Dispatch
/// snapshots the callback list first, so a callback may register further
/// observers without deadlocking; those only see later changes.
pub struct CallbackRegistry {
    callbacks: RwLock<Vec<DeviceChangedCallback>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            callbacks: RwLock::new(Vec::new()),
        }
    }

    /// Registers a callback for device changes.
    ///
    /// The callback receives the identity of the changed device.
    pub fn on_device_changed<F>(&self, callback: F)
    where
        F: Fn(&DeviceIdentity) + Send + Sync + 'static,
    {
        self.callbacks.write().push(Arc::new(callback));
    }

    /// Calls every registered callback once, in registration order.
    pub(crate) fn dispatch(&self, identity: &DeviceIdentity) {
        let callbacks = self.callbacks.read().clone();
        for callback in &callbacks {
            callback(identity);
        }
    }

    /// Returns the number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.read().is_empty()
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn identity() -> DeviceIdentity {
        DeviceIdentity::new("ABB700D9C0A4", "ch0000")
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.callback_count(), 0);
    }

    #[test]
    fn dispatch_reaches_every_callback_once() {
        let registry = CallbackRegistry::new();
        let counter1 = Arc::new(AtomicU32::new(0));
        let counter2 = Arc::new(AtomicU32::new(0));
        let c1 = counter1.clone();
        let c2 = counter2.clone();

        registry.on_device_changed(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        });
        registry.on_device_changed(move |_| {
            c2.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch(&identity());

        assert_eq!(counter1.load(Ordering::SeqCst), 1);
        assert_eq!(counter2.load(Ordering::SeqCst), 1);
        assert_eq!(registry.callback_count(), 2);
    }

    #[test]
    fn callback_receives_identity() {
        let registry = CallbackRegistry::new();
        let received = Arc::new(RwLock::new(None::<DeviceIdentity>));
        let received_clone = received.clone();

        registry.on_device_changed(move |id| {
            *received_clone.write() = Some(id.clone());
        });

        registry.dispatch(&identity());
        assert_eq!(*received.read(), Some(identity()));
    }

    #[test]
    fn callbacks_run_in_registration_order() {
        let registry = CallbackRegistry::new();
        let order = Arc::new(RwLock::new(Vec::new()));

        for n in 0..3 {
            let order = order.clone();
            registry.on_device_changed(move |_| order.write().push(n));
        }

        registry.dispatch(&identity());
        assert_eq!(*order.read(), vec![0, 1, 2]);
    }

    #[test]
    fn callback_may_register_during_dispatch() {
        let registry = Arc::new(CallbackRegistry::new());
        let inner = registry.clone();

        registry.on_device_changed(move |_| {
            inner.on_device_changed(|_| {});
        });

        registry.dispatch(&identity());
        assert_eq!(registry.callback_count(), 2);
    }

    #[test]
    fn registry_debug() {
        let registry = CallbackRegistry::new();
        registry.on_device_changed(|_| {});

        let debug = format!("{registry:?}");
        assert!(debug.contains("CallbackRegistry"));
        assert!(debug.contains("callback_count"));
    }
}
