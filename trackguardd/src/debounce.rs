//! Touchpad debounce state machine
//!
//! Motion disables the touchpad at once; it comes back only after the
//! trackpoint has been still for the quiescence period. A command is emitted
//! only when the target state differs from the recorded one, so the very
//! first tick always emits (the recorded state starts as `Undefined`).
//!
//! When no motion has been seen yet the quiescence period counts as elapsed,
//! so `Undefined` never survives the first tick.

use trackguard_common::TouchpadState;

use crate::config::QUIESCENCE_MS;

#[derive(Debug, Clone)]
pub struct DebounceMachine {
    state: TouchpadState,
    last_moved_ms: Option<u64>,
    quiescence_ms: u64,
}

impl DebounceMachine {
    pub fn new() -> Self {
        Self {
            state: TouchpadState::Undefined,
            last_moved_ms: None,
            quiescence_ms: QUIESCENCE_MS,
        }
    }

    /// Start from an arbitrary recorded state
    pub fn with_state(state: TouchpadState, last_moved_ms: Option<u64>) -> Self {
        Self {
            state,
            last_moved_ms,
            ..Self::new()
        }
    }

    pub fn state(&self) -> TouchpadState {
        self.state
    }

    pub fn last_moved_ms(&self) -> Option<u64> {
        self.last_moved_ms
    }

    /// Advance one poll tick. Returns the state to write to the touchpad, if any.
    pub fn tick(&mut self, moved: bool, now_ms: u64) -> Option<TouchpadState> {
        if moved {
            self.last_moved_ms = Some(now_ms);
            return self.transition(TouchpadState::Disabled);
        }

        if self.state != TouchpadState::Enabled && self.quiescent(now_ms) {
            return self.transition(TouchpadState::Enabled);
        }

        None
    }

    fn quiescent(&self, now_ms: u64) -> bool {
        match self.last_moved_ms {
            Some(last) => now_ms >= last.saturating_add(self.quiescence_ms),
            None => true,
        }
    }

    fn transition(&mut self, target: TouchpadState) -> Option<TouchpadState> {
        if self.state == target {
            return None;
        }
        self.state = target;
        Some(target)
    }
}

impl Default for DebounceMachine {
    fn default() -> Self {
        Self::new()
    }
}
