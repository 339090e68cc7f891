//! Fish kinematics
//!
//! Per-frame (not per-second) integration: horizontal motion at a stepped
//! speed that wraps around the screen, vertical drift under gravity with a
//! held surge pulling upward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::Key;
use super::viewport::ViewportMetrics;
use crate::consts::*;
use crate::tuning::{SPEED_LEVELS, Tuning};
use crate::wrap_coord;

/// Which way the fish swims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Body pose for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pose {
    #[default]
    Cruise,
    /// Tilted up while the surge key is held
    Surge,
}

/// The player's fish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FishState {
    pub pos: Vec2,
    /// Vertical velocity (px/frame, positive is down)
    pub vy: f32,
    pub facing: Facing,
    /// Index into the speed table, always < SPEED_LEVELS
    pub speed_index: usize,
    /// Signed horizontal speed (px/frame), cached until the next speed change
    pub speed: f32,
    /// Surge key currently held
    pub surging: bool,
    pub pose: Pose,
}

impl FishState {
    pub fn new(metrics: &ViewportMetrics, tuning: &Tuning) -> Self {
        let mut fish = Self {
            pos: Vec2::new(FISH_START_X, metrics.height * FISH_START_Y_FRACTION),
            vy: 0.0,
            facing: Facing::Right,
            speed_index: 0,
            speed: 0.0,
            surging: false,
            pose: Pose::Cruise,
        };
        fish.update_speed(metrics.scale, tuning);
        fish
    }

    /// Recompute the signed speed from direction, level and scale
    pub fn update_speed(&mut self, scale: f32, tuning: &Tuning) {
        self.speed = self.facing.sign() * tuning.speed_table[self.speed_index] * scale;
    }

    /// Handle a key press; returns false if the key is not a fish control
    pub fn apply_key_down(&mut self, key: Key, metrics: &ViewportMetrics, tuning: &Tuning) -> bool {
        match key {
            Key::Surge => {
                // Auto-repeat while held must not stack impulses
                if !self.surging {
                    self.surging = true;
                    self.vy = (self.vy - tuning.surge_impulse * metrics.scale)
                        .max(tuning.max_rise * metrics.scale);
                    self.pose = Pose::Surge;
                }
            }
            Key::StepLeft => {
                self.step_toward(Facing::Left);
                self.update_speed(metrics.scale, tuning);
            }
            Key::StepRight => {
                self.step_toward(Facing::Right);
                self.update_speed(metrics.scale, tuning);
            }
            Key::Pause | Key::ToggleCast => return false,
        }
        true
    }

    /// Handle a key release
    pub fn apply_key_up(&mut self, key: Key) {
        if key == Key::Surge {
            self.surging = false;
            self.pose = Pose::Cruise;
        }
    }

    /// Pressing toward the current heading speeds up; pressing against it
    /// slows down, and from the slowest level turns around.
    fn step_toward(&mut self, toward: Facing) {
        if self.facing == toward {
            self.speed_index = (self.speed_index + 1).min(SPEED_LEVELS - 1);
        } else if self.speed_index > 0 {
            self.speed_index -= 1;
        } else {
            self.facing = toward;
            self.speed_index = 0;
        }
    }

    /// Advance one frame
    pub fn step(&mut self, metrics: &ViewportMetrics, tuning: &Tuning) {
        self.pos.x = wrap_coord(self.pos.x + self.speed, metrics.width);

        let s = metrics.scale;
        if self.surging {
            self.vy = (self.vy - tuning.surge_accel * s).max(tuning.max_rise * s);
        } else {
            self.vy = (self.vy + tuning.gravity * s).min(tuning.max_fall * s);
        }
        self.pos.y = metrics.clamp_fish_y(self.pos.y + self.vy);
    }

    /// Pull the fish back inside a resized viewport
    pub fn refit(&mut self, metrics: &ViewportMetrics, tuning: &Tuning) {
        self.pos.x = self.pos.x.min(metrics.width - FISH_SIZE).max(0.0);
        self.pos.y = metrics.clamp_fish_y(self.pos.y);
        self.update_speed(metrics.scale, tuning);
    }
}
