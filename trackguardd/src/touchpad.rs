use crate::backend::InputBackend;
use trackguard_common::tracing::{info, warn};
use trackguard_common::{DeviceHandle, PropertyId, TouchpadState};

/// The selected touchpad together with its resolved "Device Enabled" property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchpadDevice {
    handle: DeviceHandle,
    enabled_property: PropertyId,
}

impl TouchpadDevice {
    pub fn new(handle: DeviceHandle, enabled_property: PropertyId) -> Self {
        Self {
            handle,
            enabled_property,
        }
    }

    pub fn handle(&self) -> &DeviceHandle {
        &self.handle
    }

    pub fn enabled_property(&self) -> PropertyId {
        self.enabled_property
    }

    /// Write the target state to the device and flush immediately.
    ///
    /// Delivery is best-effort: failures are logged and reported through the
    /// return value, never propagated.
    pub fn apply<B: InputBackend + ?Sized>(&self, backend: &B, state: TouchpadState) -> bool {
        let Some(value) = state.property_value() else {
            return false;
        };
        info!("Touchpad {} -> {}", self.handle, state);

        if let Err(e) = backend.write_device_property(&self.handle, self.enabled_property, value) {
            warn!("Failed to set touchpad {}: {}", state, e);
            return false;
        }
        if let Err(e) = backend.flush() {
            warn!("Failed to flush touchpad {} request: {}", state, e);
            return false;
        }
        true
    }
}
