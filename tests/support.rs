//! Scripted input backend for the end-to-end tests
//!
//! Plays back a per-tick trackpoint position script and records every
//! property write together with the (tokio) time it happened at, so tests can
//! check both what the daemon did and when.

use std::cell::{Cell, RefCell};
use tokio::time::{Duration, Instant};
use trackguard_common::{
    BackendError, DeviceHandle, DeviceId, DeviceInfo, DeviceKind, DeviceState, InputClassState,
    PropertyId, ValuatorMode, ValuatorReport,
};
use trackguardd::backend::InputBackend;

pub const DEVICE_ENABLED: PropertyId = 242;
const SYNAPTICS_OFF: PropertyId = 300;

/// A recorded property write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Write {
    pub device: DeviceId,
    pub value: u8,
    pub at: Duration,
}

pub struct ScriptedBackend {
    devices: Vec<(DeviceInfo, Vec<PropertyId>)>,
    trackpoint: DeviceId,
    script: RefCell<Vec<Vec<i32>>>,
    cursor: Cell<usize>,
    lost_after: Cell<Option<usize>>,
    epoch: Instant,
    pub writes: RefCell<Vec<Write>>,
    pub flushes: Cell<usize>,
    pub open: RefCell<Vec<DeviceId>>,
}

impl ScriptedBackend {
    /// A ThinkPad-like device set: keyboard, USB mouse, touchpad, trackpoint
    pub fn thinkpad() -> Self {
        Self::with_devices(
            vec![
                device(2, "Virtual core pointer", DeviceKind::Other, vec![]),
                device(3, "Virtual core keyboard", DeviceKind::Other, vec![]),
                device(9, "AT Translated Set 2 keyboard", DeviceKind::Other, vec![DEVICE_ENABLED]),
                device(10, "Logitech USB Optical Mouse", DeviceKind::Mouse, vec![DEVICE_ENABLED]),
                device(11, "SynPS/2 Synaptics TouchPad", DeviceKind::Touchpad, vec![SYNAPTICS_OFF, DEVICE_ENABLED]),
                device(12, "TPPS/2 IBM TrackPoint", DeviceKind::Mouse, vec![DEVICE_ENABLED]),
            ],
            12,
        )
    }

    pub fn with_devices(devices: Vec<(DeviceInfo, Vec<PropertyId>)>, trackpoint: DeviceId) -> Self {
        Self {
            devices,
            trackpoint,
            script: RefCell::new(vec![vec![0, 0]]),
            cursor: Cell::new(0),
            lost_after: Cell::new(None),
            epoch: Instant::now(),
            writes: RefCell::new(Vec::new()),
            flushes: Cell::new(0),
            open: RefCell::new(Vec::new()),
        }
    }

    /// Replace the trackpoint script; each entry is the valuator list for one tick
    pub fn script(&self, ticks: Vec<Vec<i32>>) {
        *self.script.borrow_mut() = ticks;
        self.cursor.set(0);
    }

    /// Fail every state query after `ticks` successful ones
    pub fn lose_connection_after(&self, ticks: usize) {
        self.lost_after.set(Some(ticks));
    }

    pub fn values(&self) -> Vec<u8> {
        self.writes.borrow().iter().map(|w| w.value).collect()
    }
}

pub fn device(id: DeviceId, name: &str, kind: DeviceKind, properties: Vec<PropertyId>) -> (DeviceInfo, Vec<PropertyId>) {
    (
        DeviceInfo {
            id,
            name: name.to_string(),
            kind,
        },
        properties,
    )
}

/// Position script: `idle` ticks at rest, then `moving` ticks each one unit further
pub fn idle_then_move(idle: usize, moving: usize) -> Vec<Vec<i32>> {
    let mut ticks = vec![vec![100, 100]; idle];
    for step in 1..=moving {
        ticks.push(vec![100 + step as i32, 100]);
    }
    ticks
}

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

impl InputBackend for ScriptedBackend {
    fn list_input_devices(&self) -> Result<Vec<DeviceInfo>, BackendError> {
        Ok(self.devices.iter().map(|(info, _)| info.clone()).collect())
    }

    fn open_device(&self, device: &DeviceInfo) -> Result<DeviceHandle, BackendError> {
        self.open.borrow_mut().push(device.id);
        Ok(DeviceHandle::from(device))
    }

    fn close_device(&self, handle: &DeviceHandle) -> Result<(), BackendError> {
        self.open.borrow_mut().retain(|id| *id != handle.id);
        Ok(())
    }

    fn list_device_properties(&self, handle: &DeviceHandle) -> Result<Vec<PropertyId>, BackendError> {
        self.devices
            .iter()
            .find(|(info, _)| info.id == handle.id)
            .map(|(_, properties)| properties.clone())
            .ok_or(BackendError::DeviceUnavailable(handle.id))
    }

    fn intern_property(&self, name: &str) -> Result<Option<PropertyId>, BackendError> {
        Ok((name == "Device Enabled").then_some(DEVICE_ENABLED))
    }

    fn query_device_state(&self, handle: &DeviceHandle) -> Result<DeviceState, BackendError> {
        if handle.id != self.trackpoint {
            return Err(BackendError::DeviceUnavailable(handle.id));
        }

        let tick = self.cursor.get();
        if self.lost_after.get().is_some_and(|limit| tick >= limit) {
            return Err(BackendError::Request("broken pipe".to_string()));
        }
        self.cursor.set(tick + 1);

        let script = self.script.borrow();
        let values = script
            .get(tick)
            .or_else(|| script.last())
            .cloned()
            .unwrap_or_default();

        Ok(DeviceState {
            classes: vec![
                InputClassState::Button { num_buttons: 3 },
                InputClassState::Valuator(ValuatorReport {
                    mode: ValuatorMode::Relative,
                    values,
                }),
            ],
        })
    }

    fn write_device_property(
        &self,
        handle: &DeviceHandle,
        property: PropertyId,
        value: u8,
    ) -> Result<(), BackendError> {
        assert_eq!(property, DEVICE_ENABLED, "unexpected property write");
        self.writes.borrow_mut().push(Write {
            device: handle.id,
            value,
            at: self.epoch.elapsed(),
        });
        Ok(())
    }

    fn flush(&self) -> Result<(), BackendError> {
        self.flushes.set(self.flushes.get() + 1);
        Ok(())
    }
}
