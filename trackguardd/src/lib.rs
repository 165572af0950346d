//! Trackguard Daemon Library
//!
//! This library provides the core functionality for the trackguard daemon:
//! - Touchpad and trackpoint discovery
//! - Trackpoint motion sampling
//! - Debounced touchpad enable/disable decisions
//! - The X11 XInput backend

pub mod backend;
pub mod config;
pub mod daemon;
pub mod debounce;
pub mod locator;
pub mod sampler;
pub mod touchpad;
pub mod x11;


// Re-export common types
pub use daemon::Daemon;
pub use trackguard_common::{DaemonError, DeviceHandle, DeviceInfo, TouchpadState};
