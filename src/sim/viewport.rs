//! Viewport-derived geometry
//!
//! Nothing here is stored between frames: metrics are rebuilt from the
//! live viewport every step, so resizes take effect immediately.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned rectangle in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    /// A zero-sized rect is what the browser reports before layout
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Measurement capability the simulation reads its physical inputs from
///
/// Each getter may fail (element not laid out yet); the simulation degrades
/// instead of erroring.
pub trait SceneProbe {
    /// Viewport width/height in CSS pixels
    fn viewport_size(&self) -> Vec2;
    /// Rendered height of the fish sprite
    fn fish_height(&self) -> Option<f32>;
    /// Bounding box of the boat (rod tip is derived from it)
    fn boat_rect(&self) -> Option<Rect>;
}

/// Fixed geometry for headless runs and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticProbe {
    pub viewport: Vec2,
    pub fish_height: Option<f32>,
    pub boat: Option<Rect>,
}

impl StaticProbe {
    /// Viewport with the boat floating on the waterline, a fifth of the way in
    pub fn new(width: f32, height: f32) -> Self {
        let waterline = height * WATERLINE_FRACTION;
        Self {
            viewport: Vec2::new(width, height),
            fish_height: Some(FISH_HALF_HEIGHT_FALLBACK * 2.0),
            boat: Some(Rect::new(width * 0.2, waterline - 48.0, 160.0, 64.0)),
        }
    }

    /// Move the boat so its center sits at `center_x`
    pub fn with_boat_center(mut self, center_x: f32) -> Self {
        if let Some(boat) = self.boat.as_mut() {
            boat.left = center_x - boat.width / 2.0;
        }
        self
    }
}

impl SceneProbe for StaticProbe {
    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn fish_height(&self) -> Option<f32> {
        self.fish_height
    }

    fn boat_rect(&self) -> Option<Rect> {
        self.boat
    }
}

/// Resolution-independent scale factor for a viewport width
#[inline]
pub fn scale_for_width(width: f32) -> f32 {
    (width / REFERENCE_WIDTH).clamp(MIN_SCALE, MAX_SCALE)
}

/// Half the fish height, with a fallback before first layout
pub fn fish_half_height(measured: Option<f32>) -> f32 {
    match measured {
        Some(h) if h.is_finite() && h > 0.0 => (h / 2.0).max(FISH_HALF_HEIGHT_MIN),
        _ => FISH_HALF_HEIGHT_FALLBACK,
    }
}

/// Geometry derived from the current viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub waterline_y: f32,
    pub fish_half_height: f32,
}

impl ViewportMetrics {
    pub fn new(width: f32, height: f32, fish_height: Option<f32>) -> Self {
        Self {
            width,
            height,
            scale: scale_for_width(width),
            waterline_y: height * WATERLINE_FRACTION,
            fish_half_height: fish_half_height(fish_height),
        }
    }

    pub fn from_probe<P: SceneProbe + ?Sized>(probe: &P) -> Self {
        let size = probe.viewport_size();
        Self::new(size.x, size.y, probe.fish_height())
    }

    /// Highest point the fish center may reach (just under the waterline)
    #[inline]
    pub fn top_clamp(&self) -> f32 {
        (self.waterline_y + self.fish_half_height + WATERLINE_GAP).max(0.0)
    }

    /// Lowest point the fish may reach
    #[inline]
    pub fn bottom_clamp(&self) -> f32 {
        self.height - FISH_SIZE
    }

    /// Clamp a fish y into its band; on a degenerate band the top wins
    #[inline]
    pub fn clamp_fish_y(&self, y: f32) -> f32 {
        y.min(self.bottom_clamp()).max(self.top_clamp())
    }

    /// Seabed line the hook drops to
    #[inline]
    pub fn hook_bottom(&self) -> f32 {
        self.height - HOOK_BOTTOM_INSET
    }

    /// Which of the `BOAT_SECTIONS` equal columns contains `x`
    pub fn section_of(&self, x: f32) -> u32 {
        if self.width <= 0.0 {
            return 0;
        }
        let sections = BOAT_SECTIONS as f32;
        let raw = (x / self.width * sections).floor();
        raw.clamp(0.0, sections - 1.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_is_clamped() {
        assert_eq!(scale_for_width(1200.0), 1.0);
        assert_eq!(scale_for_width(600.0), 0.8);
        assert_eq!(scale_for_width(1800.0), 1.5);
        assert_eq!(scale_for_width(4000.0), 2.0);
    }

    #[test]
    fn test_half_height_fallback() {
        assert_eq!(fish_half_height(None), 16.0);
        assert_eq!(fish_half_height(Some(0.0)), 16.0);
        assert_eq!(fish_half_height(Some(f32::NAN)), 16.0);
        assert_eq!(fish_half_height(Some(10.0)), 8.0);
        assert_eq!(fish_half_height(Some(50.0)), 25.0);
    }

    #[test]
    fn test_clamp_band() {
        let m = ViewportMetrics::new(1200.0, 800.0, Some(32.0));
        assert!((m.waterline_y - 800.0 / 6.0).abs() < 1e-4);
        assert!((m.top_clamp() - (800.0 / 6.0 + 17.0)).abs() < 1e-4);
        assert_eq!(m.bottom_clamp(), 760.0);
        assert_eq!(m.clamp_fish_y(0.0), m.top_clamp());
        assert_eq!(m.clamp_fish_y(900.0), 760.0);
        assert_eq!(m.clamp_fish_y(400.0), 400.0);
    }

    #[test]
    fn test_degenerate_band_prefers_top() {
        let m = ViewportMetrics::new(300.0, 60.0, None);
        assert!(m.top_clamp() > m.bottom_clamp());
        assert_eq!(m.clamp_fish_y(5.0), m.top_clamp());
    }

    #[test]
    fn test_section_of() {
        let m = ViewportMetrics::new(1000.0, 800.0, None);
        assert_eq!(m.section_of(0.0), 0);
        assert_eq!(m.section_of(799.0), 7);
        assert_eq!(m.section_of(800.0), 8);
        assert_eq!(m.section_of(1000.0), 9);
        assert_eq!(m.section_of(-50.0), 0);
        assert_eq!(m.section_of(5000.0), 9);
    }

    #[test]
    fn test_rect_with_no_area_is_empty() {
        assert!(Rect::new(0.0, 0.0, 0.0, 0.0).is_empty());
        assert!(Rect::new(10.0, 20.0, 0.0, 64.0).is_empty());
        assert!(Rect::new(10.0, 20.0, 160.0, 0.0).is_empty());
        assert!(!Rect::new(10.0, 20.0, 160.0, 64.0).is_empty());
    }

    #[test]
    fn test_static_probe_boat_center() {
        let probe = StaticProbe::new(1200.0, 800.0).with_boat_center(750.0);
        assert_eq!(probe.boat_rect().unwrap().center_x(), 750.0);
        let m = ViewportMetrics::from_probe(&probe);
        assert_eq!(m.section_of(750.0), 6);
    }
}
