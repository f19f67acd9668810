//! Letterbox transform between the fixed logical canvas and the window
//!
//! The game simulates on a fixed 480x360 canvas. The window is resizable,
//! so every frame recomputes a uniform scale plus a centering offset and
//! all drawing and pointer input go through it.

use glam::Vec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Uniform scale and centering offset for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    pub scale: f32,
    pub offset: Vec2,
}

impl CanvasTransform {
    /// Fit the logical canvas inside the window, preserving aspect ratio
    pub fn compute(window_width: f32, window_height: f32) -> Self {
        let scale = (window_width / SCREEN_WIDTH).min(window_height / SCREEN_HEIGHT);
        let offset = Vec2::new(
            (window_width - SCREEN_WIDTH * scale) * 0.5,
            (window_height - SCREEN_HEIGHT * scale) * 0.5,
        );
        Self { scale, offset }
    }

    /// Canvas-space point to window-space
    pub fn to_window(&self, canvas: Vec2) -> Vec2 {
        canvas * self.scale + self.offset
    }

    /// Window-space point (e.g. the mouse) back to canvas-space
    pub fn to_canvas(&self, window: Vec2) -> Vec2 {
        (window - self.offset) / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_fit_is_identity() {
        let t = CanvasTransform::compute(SCREEN_WIDTH, SCREEN_HEIGHT);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.offset, Vec2::ZERO);
    }

    #[test]
    fn wide_window_letterboxes_horizontally() {
        // Twice as tall as needed for the width
        let t = CanvasTransform::compute(SCREEN_WIDTH * 2.0, SCREEN_HEIGHT * 4.0);
        assert_eq!(t.scale, 2.0);
        assert_eq!(t.offset.x, 0.0);
        assert!(t.offset.y > 0.0);
        // Canvas is vertically centered
        assert_eq!(t.offset.y, (SCREEN_HEIGHT * 4.0 - SCREEN_HEIGHT * 2.0) * 0.5);
    }

    #[test]
    fn tall_window_letterboxes_vertically() {
        let t = CanvasTransform::compute(SCREEN_WIDTH * 3.0, SCREEN_HEIGHT * 1.5);
        assert_eq!(t.scale, 1.5);
        assert!(t.offset.x > 0.0);
        assert_eq!(t.offset.y, 0.0);
    }

    #[test]
    fn window_and_canvas_mappings_round_trip() {
        let t = CanvasTransform::compute(1600.0, 900.0);
        let p = Vec2::new(123.0, 45.0);
        let back = t.to_canvas(t.to_window(p));
        assert!((back - p).length() < 1e-4);
    }

    #[test]
    fn canvas_center_maps_to_window_center() {
        let t = CanvasTransform::compute(1920.0, 1080.0);
        let center = t.to_window(Vec2::new(SCREEN_WIDTH * 0.5, SCREEN_HEIGHT * 0.5));
        assert!((center.x - 960.0).abs() < 1e-3);
        assert!((center.y - 540.0).abs() < 1e-3);
    }
}
