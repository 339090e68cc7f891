//! One-shot rod cast
//!
//! Windup, forward stroke, settle. Runs alongside the hook animation and
//! only ever writes the rod rotation and, during the forward stroke, the
//! hook's horizontal position.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::ease_out_cubic;
use crate::tuning::Tuning;

/// Cast phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CastPhase {
    #[default]
    Idle,
    /// Rod swings back
    Windup,
    /// Rod whips forward and the hook flies out
    Forward,
    /// Rod returns to rest
    Settle,
}

/// Outputs the cast overrides this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CastOutput {
    /// Rod rotation in degrees (negative is back)
    pub rod_rotation: Option<f32>,
    /// Hook eye x, replacing the rod tip anchor
    pub hook_x: Option<f32>,
}

/// Cast state machine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CastState {
    pub phase: CastPhase,
    /// Simulation time the current phase began (ms)
    pub phase_start_ms: f64,
    /// Set when the cast starts; it never starts again
    pub fired: bool,
    /// Hook x at the start of the forward stroke
    pub from_x: f32,
    /// Where the forward stroke lands the hook
    pub to_x: f32,
}

/// Landing x for a cast from `section`, kept clear of the right edge
pub fn cast_target_x(section: u32, width: f32) -> f32 {
    let section_w = width / BOAT_SECTIONS as f32;
    let x = (section + CAST_LEAD_SECTIONS) as f32 * section_w + section_w / 2.0;
    x.min(width - CAST_EDGE_MARGIN)
}

impl CastState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Casting allowed: flag on, never cast before, boat left of the last two sections
    pub fn is_eligible(&self, enabled: bool, boat_section: u32) -> bool {
        enabled && !self.fired && boat_section < CAST_MAX_SECTION
    }

    /// Begin the windup if eligible; returns whether it started
    pub fn try_start(&mut self, enabled: bool, boat_section: u32, now_ms: f64) -> bool {
        if !self.is_eligible(enabled, boat_section) {
            return false;
        }
        self.fired = true;
        self.phase = CastPhase::Windup;
        self.phase_start_ms = now_ms;
        log::debug!("Cast windup from section {}", boat_section);
        true
    }

    /// True while any phase other than Idle is running
    pub fn is_active(&self) -> bool {
        self.phase != CastPhase::Idle
    }

    fn enter(&mut self, phase: CastPhase, now_ms: f64) {
        log::debug!("Cast {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.phase_start_ms = now_ms;
    }

    /// Advance one frame
    ///
    /// `anchor_x` is where the hook hangs when nothing overrides it and
    /// `target_x` where a forward stroke should land.
    pub fn step(&mut self, now_ms: f64, anchor_x: f32, target_x: f32, tuning: &Tuning) -> CastOutput {
        let elapsed = now_ms - self.phase_start_ms;
        let progress = |duration: f64| (elapsed / duration).clamp(0.0, 1.0) as f32;

        match self.phase {
            CastPhase::Idle => CastOutput::default(),
            CastPhase::Windup => {
                let k = progress(tuning.windup_ms);
                let angle = tuning.windup_angle * ease_out_cubic(k);
                if k >= 1.0 {
                    self.from_x = anchor_x;
                    self.to_x = target_x;
                    self.enter(CastPhase::Forward, now_ms);
                }
                CastOutput {
                    rod_rotation: Some(angle),
                    hook_x: None,
                }
            }
            CastPhase::Forward => {
                let k = progress(tuning.forward_ms);
                let e = ease_out_cubic(k);
                let angle = tuning.windup_angle + (tuning.forward_angle - tuning.windup_angle) * e;
                let x = self.from_x + (self.to_x - self.from_x) * e;
                if k >= 1.0 {
                    self.enter(CastPhase::Settle, now_ms);
                }
                CastOutput {
                    rod_rotation: Some(angle),
                    hook_x: Some(x),
                }
            }
            CastPhase::Settle => {
                let k = progress(tuning.settle_ms);
                let mut angle = tuning.forward_angle * (1.0 - ease_out_cubic(k));
                if k >= 1.0 {
                    angle = 0.0;
                    self.enter(CastPhase::Idle, now_ms);
                }
                CastOutput {
                    rod_rotation: Some(angle),
                    hook_x: None,
                }
            }
        }
    }
}
