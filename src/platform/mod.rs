//! Platform abstraction layer
//!
//! Turns simulation frames into DOM styling and measures the page for the
//! simulation. The conversions are plain functions so they can be tested
//! natively; the DOM binding itself only exists on wasm32.

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::DomScene;

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Facing, HookView, Pose};

/// Event dispatched on `window` when scenery should be laid out again
pub const RELAYOUT_EVENT: &str = "fd-relayout";

/// Rotation pivot of the rod group inside the boat SVG
pub const ROD_PIVOT: &str = "75px 32px";

/// CSS class to add and class to remove for a facing
pub fn facing_classes(facing: Facing) -> (&'static str, &'static str) {
    match facing {
        Facing::Left => ("face-left", "face-right"),
        Facing::Right => ("face-right", "face-left"),
    }
}

/// CSS transform for the fish element
pub fn pose_transform(pose: Pose) -> &'static str {
    match pose {
        Pose::Cruise => "translateY(-50%)",
        Pose::Surge => "translateY(-50%) scale(1.04) rotate(-3deg)",
    }
}

/// Inline style for the rod group at a rotation in degrees
pub fn rod_style(degrees: f32) -> String {
    format!("transform-origin: {}; transform: rotate({}deg)", ROD_PIVOT, degrees)
}

/// Hook sprite left/top relative to the boat box it is positioned in
pub fn hook_offset(view: &HookView) -> Vec2 {
    Vec2::new(
        view.eye_x - HOOK_EYE_X - view.boat.left,
        view.center_y - HOOK_HEIGHT / 2.0 - view.boat.top,
    )
}

/// CSS pixel length
#[inline]
pub fn px(value: f32) -> String {
    format!("{}px", value)
}
