use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export common dependencies
pub use serde;
pub use tracing;

pub mod error;

pub use error::{BackendError, DaemonError, FATAL_EXIT_CODE};

/// Identifier of an input device as reported by the input extension
pub type DeviceId = u8;

/// Identifier of a device property (an interned atom on X11)
pub type PropertyId = u32;

/// Device type classifier decoded from the enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceKind {
    /// Touchpad-typed device
    Touchpad,
    /// Generic pointer (mouse) device; trackpoints are reported as this
    Mouse,
    /// Anything else (keyboards, master devices, unknown types)
    Other,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DeviceKind::Touchpad => write!(f, "touchpad"),
            DeviceKind::Mouse => write!(f, "mouse"),
            DeviceKind::Other => write!(f, "other"),
        }
    }
}

/// One entry of the input device enumeration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub id: DeviceId,
    pub name: String,
    pub kind: DeviceKind,
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "id: {} name: {} type: {}", self.id, self.name, self.kind)
    }
}

/// An opened input device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceHandle {
    pub id: DeviceId,
    pub name: String,
}

impl From<&DeviceInfo> for DeviceHandle {
    fn from(info: &DeviceInfo) -> Self {
        Self {
            id: info.id,
            name: info.name.clone(),
        }
    }
}

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (id {})", self.name, self.id)
    }
}

/// Instantaneous trackpoint position in valuator units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionSample {
    pub x: i32,
    pub y: i32,
}

/// Logical state of the touchpad as tracked by the daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchpadState {
    /// Nothing has been written to the device yet
    #[default]
    Undefined,
    Enabled,
    Disabled,
}

impl TouchpadState {
    /// Value written to the "Device Enabled" property for this state
    pub fn property_value(self) -> Option<u8> {
        match self {
            TouchpadState::Enabled => Some(1),
            TouchpadState::Disabled => Some(0),
            TouchpadState::Undefined => None,
        }
    }
}

impl fmt::Display for TouchpadState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TouchpadState::Undefined => write!(f, "undefined"),
            TouchpadState::Enabled => write!(f, "enabled"),
            TouchpadState::Disabled => write!(f, "disabled"),
        }
    }
}

/// Valuator reporting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuatorMode {
    Relative,
    Absolute,
}

/// Axis data reported by a device state query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuatorReport {
    pub mode: ValuatorMode,
    pub values: Vec<i32>,
}

impl ValuatorReport {
    /// Interpret the report as an (x, y) pair. Only two-axis reports qualify.
    pub fn sample(&self) -> Option<MotionSample> {
        match self.values.as_slice() {
            [x, y] => Some(MotionSample { x: *x, y: *y }),
            _ => None,
        }
    }
}

/// One typed sub-report of a device state query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputClassState {
    Key { num_keys: u8 },
    Button { num_buttons: u8 },
    Valuator(ValuatorReport),
    Other,
}

/// Decoded result of a device state query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceState {
    pub classes: Vec<InputClassState>,
}

impl DeviceState {
    /// First valuator sub-report, if the device reported one
    pub fn valuator_report(&self) -> Option<&ValuatorReport> {
        self.classes.iter().find_map(|class| match class {
            InputClassState::Valuator(report) => Some(report),
            _ => None,
        })
    }
}
