//! X11 XInput backend
//!
//! Speaks the XInput 1.x device requests over an `x11rb` connection and
//! decodes their replies into the shared device types.

use crate::backend::InputBackend;
use trackguard_common::tracing::{debug, info};
use trackguard_common::{
    BackendError, DeviceHandle, DeviceInfo, DeviceKind, DeviceState, InputClassState, PropertyId,
    ValuatorMode, ValuatorReport,
};
use x11rb::connection::{Connection, RequestConnection};
use x11rb::cookie::VoidCookie;
use x11rb::errors::{ConnectionError, ReplyError};
use x11rb::protocol::xinput::{self, ChangeDevicePropertyAux, ConnectionExt as _, InputStateData};
use x11rb::protocol::xproto::{Atom, AtomEnum, ConnectionExt as _, PropMode};
use x11rb::rust_connection::RustConnection;

// Device type atoms from XI.h
const XI_TOUCHPAD: &str = "TOUCHPAD";
const XI_MOUSE: &str = "MOUSE";

// DeviceModeAbsolute bit of a valuator state
const DEVICE_MODE_ABSOLUTE: u32 = 1;

fn request_error(e: ConnectionError) -> BackendError {
    BackendError::Request(e.to_string())
}

fn reply_error(e: ReplyError) -> BackendError {
    BackendError::Reply(e.to_string())
}

/// Input backend over a live X server connection
pub struct X11Backend {
    conn: RustConnection,
    touchpad_type: Option<Atom>,
    mouse_type: Option<Atom>,
}

impl X11Backend {
    /// Connect to `display` (or `DISPLAY` when `None`) and check for XInput
    pub fn open(display: Option<&str>) -> Result<Self, BackendError> {
        let (conn, _screen) =
            x11rb::connect(display).map_err(|e| BackendError::Connect(e.to_string()))?;

        if conn
            .extension_information(xinput::X11_EXTENSION_NAME)
            .map_err(request_error)?
            .is_none()
        {
            return Err(BackendError::MissingExtension(xinput::X11_EXTENSION_NAME));
        }

        let version = conn
            .xinput_get_extension_version(xinput::X11_EXTENSION_NAME.as_bytes())
            .map_err(request_error)?
            .reply()
            .map_err(reply_error)?;
        info!(
            "Connected to X server, XInput {}.{}",
            version.server_major, version.server_minor
        );

        let mut backend = Self {
            conn,
            touchpad_type: None,
            mouse_type: None,
        };
        backend.touchpad_type = backend.lookup_atom(XI_TOUCHPAD)?;
        backend.mouse_type = backend.lookup_atom(XI_MOUSE)?;
        debug!(
            "Device type atoms: touchpad={:?} mouse={:?}",
            backend.touchpad_type, backend.mouse_type
        );

        Ok(backend)
    }

    /// Resolve an atom without creating it
    fn lookup_atom(&self, name: &str) -> Result<Option<Atom>, BackendError> {
        let atom = self
            .conn
            .intern_atom(true, name.as_bytes())
            .map_err(request_error)?
            .reply()
            .map_err(reply_error)?
            .atom;
        Ok((atom != u32::from(AtomEnum::NONE)).then_some(atom))
    }

    fn classify(&self, device_type: Atom) -> DeviceKind {
        if self.touchpad_type == Some(device_type) {
            DeviceKind::Touchpad
        } else if self.mouse_type == Some(device_type) {
            DeviceKind::Mouse
        } else {
            DeviceKind::Other
        }
    }

    fn check(&self, cookie: Result<VoidCookie<'_, RustConnection>, ConnectionError>) -> Result<(), BackendError> {
        cookie.map_err(request_error)?.check().map_err(reply_error)
    }
}

fn decode_class(data: &InputStateData) -> InputClassState {
    match data {
        InputStateData::Key(key) => InputClassState::Key {
            num_keys: key.num_keys,
        },
        InputStateData::Button(button) => InputClassState::Button {
            num_buttons: button.num_buttons,
        },
        InputStateData::Valuator(valuator) => {
            let mode = if u32::from(valuator.mode) & DEVICE_MODE_ABSOLUTE != 0 {
                ValuatorMode::Absolute
            } else {
                ValuatorMode::Relative
            };
            InputClassState::Valuator(ValuatorReport {
                mode,
                values: valuator.valuators.clone(),
            })
        }
        #[allow(unreachable_patterns)]
        _ => InputClassState::Other,
    }
}

impl InputBackend for X11Backend {
    fn list_input_devices(&self) -> Result<Vec<DeviceInfo>, BackendError> {
        let reply = self
            .conn
            .xinput_list_input_devices()
            .map_err(request_error)?
            .reply()
            .map_err(reply_error)?;

        Ok(reply
            .devices
            .iter()
            .zip(reply.names.iter())
            .map(|(device, name)| DeviceInfo {
                id: device.device_id,
                name: String::from_utf8_lossy(&name.name).into_owned(),
                kind: self.classify(device.device_type),
            })
            .collect())
    }

    fn open_device(&self, device: &DeviceInfo) -> Result<DeviceHandle, BackendError> {
        self.conn
            .xinput_open_device(device.id)
            .map_err(request_error)?
            .reply()
            .map_err(reply_error)?;
        Ok(DeviceHandle::from(device))
    }

    fn close_device(&self, handle: &DeviceHandle) -> Result<(), BackendError> {
        self.check(self.conn.xinput_close_device(handle.id))
    }

    fn list_device_properties(&self, handle: &DeviceHandle) -> Result<Vec<PropertyId>, BackendError> {
        Ok(self
            .conn
            .xinput_list_device_properties(handle.id)
            .map_err(request_error)?
            .reply()
            .map_err(reply_error)?
            .atoms)
    }

    fn intern_property(&self, name: &str) -> Result<Option<PropertyId>, BackendError> {
        self.lookup_atom(name)
    }

    fn query_device_state(&self, handle: &DeviceHandle) -> Result<DeviceState, BackendError> {
        let reply = self
            .conn
            .xinput_query_device_state(handle.id)
            .map_err(request_error)?
            .reply()
            .map_err(reply_error)?;

        Ok(DeviceState {
            classes: reply.classes.iter().map(|class| decode_class(&class.data)).collect(),
        })
    }

    fn write_device_property(
        &self,
        handle: &DeviceHandle,
        property: PropertyId,
        value: u8,
    ) -> Result<(), BackendError> {
        // Fire-and-forget: an X error here must not stall the poll loop
        self.conn
            .xinput_change_device_property(
                property,
                AtomEnum::INTEGER.into(),
                handle.id,
                PropMode::REPLACE,
                1,
                &ChangeDevicePropertyAux::Data8(vec![value]),
            )
            .map_err(request_error)?
            .ignore_error();
        Ok(())
    }

    fn flush(&self) -> Result<(), BackendError> {
        self.conn
            .flush()
            .map_err(|e| BackendError::Flush(e.to_string()))
    }
}
