use crate::backend::{close_quietly, InputBackend};
use crate::config::POLL_INTERVAL_MS;
use crate::debounce::DebounceMachine;
use crate::locator::locate_devices;
use crate::sampler::MotionSampler;
use crate::touchpad::TouchpadDevice;
use std::future::Future;
use tokio::time::{sleep, Duration, Instant};
use trackguard_common::tracing::{debug, info};
use trackguard_common::{DaemonError, DeviceHandle, TouchpadState};

/// The polling control loop and all state it owns
pub struct Daemon<B: InputBackend> {
    backend: B,
    touchpad: TouchpadDevice,
    trackpoint: DeviceHandle,
    sampler: MotionSampler,
    debounce: DebounceMachine,
    started: Instant,
}

impl<B: InputBackend> Daemon<B> {
    pub fn new(backend: B, touchpad: TouchpadDevice, trackpoint: DeviceHandle) -> Self {
        Self {
            backend,
            touchpad,
            trackpoint,
            sampler: MotionSampler::new(),
            debounce: DebounceMachine::new(),
            started: Instant::now(),
        }
    }

    /// Discover the touchpad and trackpoint and build a daemon around them
    pub fn locate(backend: B) -> Result<Self, DaemonError> {
        let (touchpad, trackpoint) = locate_devices(&backend)?;
        info!("Touchpad id: {}", touchpad.handle().id);
        info!("Trackpoint id: {}", trackpoint.id);
        Ok(Self::new(backend, touchpad, trackpoint))
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn touchpad(&self) -> &TouchpadDevice {
        &self.touchpad
    }

    pub fn trackpoint(&self) -> &DeviceHandle {
        &self.trackpoint
    }

    pub fn touchpad_state(&self) -> TouchpadState {
        self.debounce.state()
    }

    /// Run one poll tick at `now_ms`, returning the command that was applied
    pub fn tick(&mut self, now_ms: u64) -> Result<Option<TouchpadState>, DaemonError> {
        let moved = self.sampler.sample_moved(&self.backend, &self.trackpoint)?;
        if moved {
            debug!("Trackpoint moved at {}ms", now_ms);
        }

        let command = self.debounce.tick(moved, now_ms);
        if let Some(state) = command {
            self.touchpad.apply(&self.backend, state);
        }
        Ok(command)
    }

    /// Milliseconds since the daemon was created
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Poll until `shutdown` resolves or a fatal error occurs
    pub async fn run<F>(&mut self, shutdown: F) -> Result<(), DaemonError>
    where
        F: Future<Output = ()>,
    {
        info!("Polling trackpoint every {}ms", POLL_INTERVAL_MS);
        tokio::pin!(shutdown);

        loop {
            let now = self.now_ms();
            self.tick(now)?;

            tokio::select! {
                _ = &mut shutdown => {
                    info!("Stopping poll loop");
                    return Ok(());
                }
                _ = sleep(Duration::from_millis(POLL_INTERVAL_MS)) => {}
            }
        }
    }

    /// Give the touchpad back to the user and release both devices
    pub fn shutdown(self) -> B {
        info!("Starting cleanup...");

        if self.debounce.state() == TouchpadState::Disabled {
            self.touchpad.apply(&self.backend, TouchpadState::Enabled);
        }
        close_quietly(&self.backend, &self.trackpoint);
        close_quietly(&self.backend, self.touchpad.handle());

        info!("Cleanup complete");
        self.backend
    }
}
