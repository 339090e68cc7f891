//! Simulation clock
//!
//! Display frames come with wall-clock timestamps; the simulation keeps its
//! own time that only moves while unpaused, so animations resume exactly
//! where they stopped.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_MS;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clock {
    /// Timestamp of the previous display frame
    last_frame_ms: Option<f64>,
    /// Accumulated unpaused time (ms)
    sim_ms: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time (ms)
    #[inline]
    pub fn now(&self) -> f64 {
        self.sim_ms
    }

    /// Consume a display frame timestamp and return the simulation time
    pub fn advance(&mut self, frame_ms: f64, paused: bool) -> f64 {
        let delta = match self.last_frame_ms {
            // Tab switches and debugger stops show up as huge gaps
            Some(last) => (frame_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_frame_ms = Some(frame_ms);
        if !paused {
            self.sim_ms += delta;
        }
        self.sim_ms
    }
}
