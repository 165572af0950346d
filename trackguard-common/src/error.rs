//! Error types shared by the daemon and its tools

use crate::DeviceId;
use thiserror::Error;

/// Exit code used for every fatal daemon error
pub const FATAL_EXIT_CODE: i32 = 2;

/// Errors raised by an input backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to connect to display: {0}")]
    Connect(String),

    #[error("X server lacks the {0} extension")]
    MissingExtension(&'static str),

    #[error("failed to send request: {0}")]
    Request(String),

    #[error("request failed: {0}")]
    Reply(String),

    #[error("failed to flush connection: {0}")]
    Flush(String),

    #[error("device {0} is not available")]
    DeviceUnavailable(DeviceId),
}

/// Errors that terminate the daemon
#[derive(Error, Debug)]
pub enum DaemonError {
    #[error("can't open display: {0}")]
    Connection(BackendError),

    #[error("no touchpad device found")]
    TouchpadNotFound,

    #[error("no trackpoint device found")]
    TrackpointNotFound,

    #[error("invalid valuator report: expected 2 valuators, got {count}")]
    MalformedValuatorReport { count: usize },

    #[error("input backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to install signal handler: {0}")]
    Signal(std::io::Error),
}

impl DaemonError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        FATAL_EXIT_CODE
    }
}
