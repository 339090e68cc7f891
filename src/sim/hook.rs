//! Hook animation
//!
//! The hook drops to the seabed once, then jigs forever: every so often it
//! picks a spot a little higher up and glides toward it, climbing in
//! irregular hops until the waterline margin holds it.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::viewport::{Rect, ViewportMetrics};
use crate::consts::*;
use crate::tuning::Tuning;

/// Hook animation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookPhase {
    /// Not yet placed; runs on the first animated frame
    Drop,
    /// Steady state
    Jig,
}

/// What a hook step did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    /// Placed at the bottom and switched to jigging (once per session)
    Dropped,
    /// Moved toward its target
    Jigged,
}

/// Where the line leaves the rod, derived from the boat's box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RodAnchor {
    pub boat: Rect,
    pub tip: Vec2,
}

impl RodAnchor {
    pub fn from_boat(boat: Rect) -> Self {
        Self {
            boat,
            tip: Vec2::new(boat.left + ROD_TIP_OFFSET_X, boat.top + ROD_TIP_OFFSET_Y),
        }
    }
}

/// Hook animation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookState {
    pub phase: HookPhase,
    /// Vertical center of the hook sprite
    pub y: f32,
    /// Where the hook is gliding to
    pub target_y: f32,
    /// Simulation time of the last retarget (ms)
    pub last_change_ms: f64,
    /// How long to hold the current target before picking another (ms)
    pub hold_ms: f64,
    /// Rod tip to hook eye
    pub line_length: f32,
}

impl Default for HookState {
    fn default() -> Self {
        Self::new()
    }
}

impl HookState {
    pub fn new() -> Self {
        Self {
            phase: HookPhase::Drop,
            y: 0.0,
            target_y: 0.0,
            last_change_ms: 0.0,
            hold_ms: 0.0,
            line_length: 0.0,
        }
    }

    /// Y of the eye the line is tied to
    #[inline]
    pub fn eye_y(&self) -> f32 {
        self.y - HOOK_HEIGHT / 2.0 + HOOK_EYE_Y
    }

    /// Advance one frame
    pub fn step(
        &mut self,
        now_ms: f64,
        anchor: &RodAnchor,
        metrics: &ViewportMetrics,
        tuning: &Tuning,
        rng: &mut Pcg32,
    ) -> HookEvent {
        let bottom = metrics.hook_bottom();

        if self.phase == HookPhase::Drop {
            self.y = bottom;
            self.line_length = (bottom - anchor.tip.y).max(0.0);
            self.target_y = bottom - HOOK_DROP_RISE;
            self.last_change_ms = now_ms;
            self.hold_ms = rng.random_range(tuning.jig_hold_min_ms..tuning.jig_hold_max_ms);
            self.phase = HookPhase::Jig;
            log::debug!("Hook dropped to y={:.1}", bottom);
            return HookEvent::Dropped;
        }

        let top = metrics.waterline_y;
        // The band moves with the viewport; keep a stale target inside it
        self.target_y = self
            .target_y
            .min(bottom - tuning.hook_bottom_margin)
            .max(top + tuning.jig_target_margin);

        if now_ms - self.last_change_ms > self.hold_ms {
            let hop = rng.random_range(tuning.jig_hop_min..tuning.jig_hop_max) * metrics.scale;
            self.target_y = (self.y - hop).max(top + tuning.jig_target_margin);
            self.last_change_ms = now_ms;
            self.hold_ms = rng.random_range(tuning.jig_hold_min_ms..tuning.jig_hold_max_ms);
        }

        // Exponential approach: a fixed fraction of what is left each frame
        let next = self.y + (self.target_y - self.y) * tuning.jig_smoothing;
        self.y = next
            .max(top + tuning.hook_top_margin)
            .min(bottom - tuning.hook_bottom_margin);
        self.line_length = (self.eye_y() - anchor.tip.y).max(0.0);

        HookEvent::Jigged
    }
}
