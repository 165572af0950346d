//! Input backend abstraction
//!
//! The locator, sampler and daemon loop only talk to the windowing input
//! subsystem through this trait. `crate::x11::X11Backend` is the production
//! implementation.

use trackguard_common::{BackendError, DeviceHandle, DeviceInfo, DeviceState, PropertyId};

/// Operations the daemon needs from the input subsystem
pub trait InputBackend {
    /// Enumerate all input devices in server order
    fn list_input_devices(&self) -> Result<Vec<DeviceInfo>, BackendError>;

    /// Open a device for property and state access
    fn open_device(&self, device: &DeviceInfo) -> Result<DeviceHandle, BackendError>;

    /// Release a device opened with `open_device`
    fn close_device(&self, handle: &DeviceHandle) -> Result<(), BackendError>;

    /// List the property identifiers a device supports
    fn list_device_properties(&self, handle: &DeviceHandle) -> Result<Vec<PropertyId>, BackendError>;

    /// Resolve a property name, returning `None` if the server does not know it
    fn intern_property(&self, name: &str) -> Result<Option<PropertyId>, BackendError>;

    /// Query the current state of a device
    fn query_device_state(&self, handle: &DeviceHandle) -> Result<DeviceState, BackendError>;

    /// Replace a one-byte integer property on a device
    fn write_device_property(
        &self,
        handle: &DeviceHandle,
        property: PropertyId,
        value: u8,
    ) -> Result<(), BackendError>;

    /// Push buffered requests to the server
    fn flush(&self) -> Result<(), BackendError>;
}

/// Close a device, logging instead of failing
pub fn close_quietly<B: InputBackend + ?Sized>(backend: &B, handle: &DeviceHandle) {
    if let Err(e) = backend.close_device(handle) {
        trackguard_common::tracing::warn!("Failed to close device {}: {}", handle, e);
    }
}
