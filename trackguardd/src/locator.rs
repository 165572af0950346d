//! Startup device discovery
//!
//! Selects the touchpad and the trackpoint with a single ordered scan each.
//! The first qualifying device wins; every device opened during a scan and
//! then rejected is closed again before moving on.

use crate::backend::{close_quietly, InputBackend};
use crate::config::{DEVICE_ENABLED_PROPERTY, TRACKPOINT_NAME_PATTERN};
use crate::touchpad::TouchpadDevice;
use trackguard_common::tracing::{debug, info, warn};
use trackguard_common::{DaemonError, DeviceHandle, DeviceKind};

/// Find the first touchpad exposing the "Device Enabled" property
pub fn find_touchpad<B: InputBackend + ?Sized>(backend: &B) -> Result<TouchpadDevice, DaemonError> {
    let devices = backend.list_input_devices()?;
    info!("Scanning {} input devices for a touchpad", devices.len());

    // A server that never interned the property cannot have a device exposing it
    let Some(enabled_property) = backend.intern_property(DEVICE_ENABLED_PROPERTY)? else {
        warn!("Property '{}' is unknown to the server", DEVICE_ENABLED_PROPERTY);
        return Err(DaemonError::TouchpadNotFound);
    };

    for (index, device) in devices.iter().enumerate() {
        if device.kind != DeviceKind::Touchpad {
            continue;
        }
        info!("[{}]: {}", index, device);

        let handle = match backend.open_device(device) {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Can't open device id: {} name: {}: {}", device.id, device.name, e);
                continue;
            }
        };

        let properties = match backend.list_device_properties(&handle) {
            Ok(properties) if !properties.is_empty() => properties,
            Ok(_) => {
                warn!("Device id: {} name: {} has no properties", device.id, device.name);
                close_quietly(backend, &handle);
                continue;
            }
            Err(e) => {
                warn!("Can't get properties of device id: {} name: {}: {}", device.id, device.name, e);
                close_quietly(backend, &handle);
                continue;
            }
        };

        if properties.contains(&enabled_property) {
            info!("Selected touchpad {}", handle);
            return Ok(TouchpadDevice::new(handle, enabled_property));
        }

        debug!("Device {} lacks '{}', skipping", handle, DEVICE_ENABLED_PROPERTY);
        close_quietly(backend, &handle);
    }

    Err(DaemonError::TouchpadNotFound)
}

/// Find the first pointer device whose name contains "TrackPoint"
pub fn find_trackpoint<B: InputBackend + ?Sized>(backend: &B) -> Result<DeviceHandle, DaemonError> {
    let devices = backend.list_input_devices()?;
    info!("Scanning {} input devices for a trackpoint", devices.len());

    for (index, device) in devices.iter().enumerate() {
        // Anything that is not a mouse is definitely not a trackpoint
        if device.kind != DeviceKind::Mouse {
            continue;
        }
        info!("[{}]: {}", index, device);

        let handle = match backend.open_device(device) {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Can't open device id: {} name: {}: {}", device.id, device.name, e);
                continue;
            }
        };

        if device.name.contains(TRACKPOINT_NAME_PATTERN) {
            info!("Selected trackpoint {}", handle);
            return Ok(handle);
        }

        debug!("Device {} is not a trackpoint, skipping", handle);
        close_quietly(backend, &handle);
    }

    Err(DaemonError::TrackpointNotFound)
}

/// Locate both devices, releasing the touchpad if no trackpoint exists
pub fn locate_devices<B: InputBackend + ?Sized>(
    backend: &B,
) -> Result<(TouchpadDevice, DeviceHandle), DaemonError> {
    let touchpad = find_touchpad(backend)?;

    match find_trackpoint(backend) {
        Ok(trackpoint) => Ok((touchpad, trackpoint)),
        Err(e) => {
            close_quietly(backend, touchpad.handle());
            Err(e)
        }
    }
}
