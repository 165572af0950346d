use crate::backend::InputBackend;
use trackguard_common::tracing::debug;
use trackguard_common::{DaemonError, DeviceHandle, MotionSample, ValuatorReport};

/// Tracks the last known trackpoint position between poll ticks
#[derive(Debug, Default)]
pub struct MotionSampler {
    last: Option<MotionSample>,
}

impl MotionSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_sample(&self) -> Option<MotionSample> {
        self.last
    }

    /// Query the trackpoint and report whether it moved since the previous call
    pub fn sample_moved<B: InputBackend + ?Sized>(
        &mut self,
        backend: &B,
        trackpoint: &DeviceHandle,
    ) -> Result<bool, DaemonError> {
        let state = backend.query_device_state(trackpoint)?;
        self.observe(state.valuator_report())
    }

    /// Record a valuator report. The first recorded sample never counts as motion.
    pub fn observe(&mut self, report: Option<&ValuatorReport>) -> Result<bool, DaemonError> {
        let Some(report) = report else {
            debug!("Trackpoint state has no valuator report");
            return Ok(false);
        };

        let sample = report.sample().ok_or(DaemonError::MalformedValuatorReport {
            count: report.values.len(),
        })?;

        match self.last.replace(sample) {
            Some(previous) => Ok(previous != sample),
            None => Ok(false),
        }
    }
}
