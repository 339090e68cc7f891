//! Data-driven physics and animation balance
//!
//! Magnitudes are given at scale 1.0 (a 1200px wide viewport). Anything
//! that moves the fish is multiplied by the viewport scale factor at use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of entries in the fish speed table
pub const SPEED_LEVELS: usize = 3;

/// Problems with a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning json is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value `{field}` is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// All tunable magnitudes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Fish ===
    /// Horizontal speed per level (px/frame)
    pub speed_table: [f32; SPEED_LEVELS],
    /// Downward drift added to vy every frame
    pub gravity: f32,
    /// Largest downward velocity (px/frame)
    pub max_fall: f32,
    /// Largest upward velocity (negative, px/frame)
    pub max_rise: f32,
    /// Upward acceleration per frame while surge is held
    pub surge_accel: f32,
    /// One-time upward kick on the surge key edge
    pub surge_impulse: f32,

    // === Hook jig ===
    /// Minimum hold before the hook picks a new target (ms)
    pub jig_hold_min_ms: f64,
    /// Exclusive upper bound of the hold (ms)
    pub jig_hold_max_ms: f64,
    /// Upward hop range (px, scaled)
    pub jig_hop_min: f32,
    pub jig_hop_max: f32,
    /// Fraction of the remaining distance covered per frame
    pub jig_smoothing: f32,
    /// Targets never rise above waterline + this
    pub jig_target_margin: f32,
    /// The hook never rises above waterline + this
    pub hook_top_margin: f32,
    /// The hook never sinks below bottom - this
    pub hook_bottom_margin: f32,

    // === Cast ===
    pub windup_ms: f64,
    pub forward_ms: f64,
    pub settle_ms: f64,
    /// Rod rotation at the end of the windup (degrees)
    pub windup_angle: f32,
    /// Rod rotation at the end of the forward stroke (degrees)
    pub forward_angle: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            speed_table: [1.0, 3.0, 6.0],
            gravity: 0.12,
            max_fall: 3.0,
            max_rise: -4.0,
            surge_accel: 0.45,
            surge_impulse: 2.2,

            jig_hold_min_ms: 600.0,
            jig_hold_max_ms: 1200.0,
            jig_hop_min: 30.0,
            jig_hop_max: 90.0,
            jig_smoothing: 0.14,
            jig_target_margin: 60.0,
            hook_top_margin: 40.0,
            hook_bottom_margin: 12.0,

            windup_ms: 380.0,
            forward_ms: 240.0,
            settle_ms: 280.0,
            windup_angle: -35.0,
            forward_angle: 15.0,
        }
    }
}

impl Tuning {
    /// LocalStorage key for an optional JSON override
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "fd_tuning";

    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.speed_table.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(TuningError::Invalid {
                field: "speed_table",
                reason: "speeds must be finite and non-negative",
            });
        }
        if !(self.max_rise < 0.0 && self.max_fall > 0.0) {
            return Err(TuningError::Invalid {
                field: "max_rise/max_fall",
                reason: "rise must be negative and fall positive",
            });
        }
        if self.gravity < 0.0 || self.surge_accel < 0.0 || self.surge_impulse < 0.0 {
            return Err(TuningError::Invalid {
                field: "gravity/surge",
                reason: "accelerations are magnitudes and must be non-negative",
            });
        }
        let finite = [
            self.gravity,
            self.max_fall,
            self.max_rise,
            self.surge_accel,
            self.surge_impulse,
            self.jig_hop_min,
            self.jig_hop_max,
            self.jig_target_margin,
            self.hook_top_margin,
            self.hook_bottom_margin,
            self.windup_angle,
            self.forward_angle,
        ];
        let finite_ms = [
            self.jig_hold_min_ms,
            self.jig_hold_max_ms,
            self.windup_ms,
            self.forward_ms,
            self.settle_ms,
        ];
        if finite.iter().any(|v| !v.is_finite()) || finite_ms.iter().any(|v| !v.is_finite()) {
            return Err(TuningError::Invalid {
                field: "tuning",
                reason: "all values must be finite",
            });
        }
        // random_range needs a finite span, not just finite ends
        let hold_span = self.jig_hold_max_ms - self.jig_hold_min_ms;
        if !(hold_span > 0.0 && hold_span.is_finite()) {
            return Err(TuningError::Invalid {
                field: "jig_hold_ms",
                reason: "min must be below max with a finite span",
            });
        }
        let hop_span = self.jig_hop_max - self.jig_hop_min;
        if !(hop_span > 0.0 && hop_span.is_finite()) {
            return Err(TuningError::Invalid {
                field: "jig_hop",
                reason: "min must be below max with a finite span",
            });
        }
        if !(self.jig_smoothing > 0.0 && self.jig_smoothing <= 1.0) {
            return Err(TuningError::Invalid {
                field: "jig_smoothing",
                reason: "must be in (0, 1]",
            });
        }
        if self.windup_ms <= 0.0 || self.forward_ms <= 0.0 || self.settle_ms <= 0.0 {
            return Err(TuningError::Invalid {
                field: "cast durations",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    /// Load the override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring tuning override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
