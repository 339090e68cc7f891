//! Fish Drift - a fish swimming under a boat that keeps jigging its hook
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (fish kinematics, hook and cast animation)
//! - `platform`: Browser DOM adapter (measurement + rendering)
//! - `settings`: Feature flags persisted in LocalStorage
//! - `tuning`: Data-driven physics and animation balance

pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Features;
pub use tuning::{Tuning, TuningError};

/// Scene geometry constants (pixels unless noted)
pub mod consts {
    /// Reference viewport width for the scale factor
    pub const REFERENCE_WIDTH: f32 = 1200.0;
    /// Scale factor bounds
    pub const MIN_SCALE: f32 = 0.8;
    pub const MAX_SCALE: f32 = 2.0;
    /// Waterline sits at this fraction of the viewport height
    pub const WATERLINE_FRACTION: f32 = 1.0 / 6.0;

    /// Fish sprite box; the bottom clamp keeps the whole box on screen
    pub const FISH_SIZE: f32 = 40.0;
    /// Half-height used before the fish sprite has been laid out
    pub const FISH_HALF_HEIGHT_FALLBACK: f32 = 16.0;
    pub const FISH_HALF_HEIGHT_MIN: f32 = 8.0;
    /// Gap kept between the waterline and the top of the fish
    pub const WATERLINE_GAP: f32 = 1.0;
    /// Spawn point (y is a fraction of the viewport height)
    pub const FISH_START_X: f32 = 24.0;
    pub const FISH_START_Y_FRACTION: f32 = 0.5;

    /// Rod tip offset inside the boat's bounding box
    pub const ROD_TIP_OFFSET_X: f32 = 110.0;
    pub const ROD_TIP_OFFSET_Y: f32 = 14.0;
    /// Hook sprite (viewBox 0 0 24 36) with the eye near its top
    pub const HOOK_HEIGHT: f32 = 36.0;
    pub const HOOK_EYE_X: f32 = 16.0;
    pub const HOOK_EYE_Y: f32 = 2.0;
    /// The seabed line the hook drops to, measured up from the viewport bottom
    pub const HOOK_BOTTOM_INSET: f32 = 4.0;
    /// First jig target after the drop, above the bottom
    pub const HOOK_DROP_RISE: f32 = 30.0;

    /// Boat sections used for cast eligibility and targeting
    pub const BOAT_SECTIONS: u32 = 10;
    /// Casting is allowed from sections strictly below this index
    pub const CAST_MAX_SECTION: u32 = 8;
    /// The cast lands this many sections to the right of the boat
    pub const CAST_LEAD_SECTIONS: u32 = 2;
    /// Keep the cast hook at least this far from the right edge
    pub const CAST_EDGE_MARGIN: f32 = 20.0;

    /// Longest frame delta the clock will accept (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;
}

/// Cubic ease-out on a normalized progress `k` in [0, 1]
#[inline]
pub fn ease_out_cubic(k: f32) -> f32 {
    let k = k.clamp(0.0, 1.0);
    1.0 - (1.0 - k).powi(3)
}

/// Wrap a coordinate into [0, width) so the left and right edges meet
#[inline]
pub fn wrap_coord(x: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return 0.0;
    }
    let wrapped = x.rem_euclid(width);
    // rem_euclid can round up to exactly `width` for tiny negative inputs
    if wrapped >= width { 0.0 } else { wrapped }
}
