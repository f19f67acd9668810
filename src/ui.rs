//! Game-over panel layout and button hit testing
//!
//! Pure canvas-space geometry; the app layer feeds it pointer state and
//! draws it. Kept free of macroquad so the interaction logic is testable.

use glam::Vec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::Rect;

/// A clickable region in canvas space
#[derive(Debug, Clone, Copy)]
pub struct Button {
    pub bounds: Rect,
    pub hovered: bool,
    pub pressed: bool,
}

impl Button {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            hovered: false,
            pressed: false,
        }
    }

    /// Feed one frame of pointer state. Returns true when a click is
    /// released inside the button.
    pub fn update(&mut self, pointer: Vec2, down: bool, released: bool) -> bool {
        self.hovered = self.bounds.contains(pointer);
        self.pressed = self.hovered && down;
        self.hovered && released
    }
}

/// The game-over panel, centered on the canvas
#[derive(Debug, Clone, Copy)]
pub struct GameOverPanel {
    pub bounds: Rect,
    pub play_again: Button,
}

impl GameOverPanel {
    const WIDTH: f32 = 240.0;
    const HEIGHT: f32 = 150.0;
    const BUTTON_WIDTH: f32 = 150.0;
    const BUTTON_HEIGHT: f32 = 32.0;
    /// Gap between the button and the panel bottom
    const BUTTON_MARGIN: f32 = 18.0;

    pub fn new() -> Self {
        let bounds = Rect::new(
            (SCREEN_WIDTH - Self::WIDTH) * 0.5,
            (SCREEN_HEIGHT - Self::HEIGHT) * 0.5,
            Self::WIDTH,
            Self::HEIGHT,
        );
        let play_again = Button::new(Rect::new(
            bounds.x + (Self::WIDTH - Self::BUTTON_WIDTH) * 0.5,
            bounds.y + Self::HEIGHT - Self::BUTTON_HEIGHT - Self::BUTTON_MARGIN,
            Self::BUTTON_WIDTH,
            Self::BUTTON_HEIGHT,
        ));
        Self { bounds, play_again }
    }
}

impl Default for GameOverPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_hit_test_covers_bounds_inclusive() {
        let button = Button::new(Rect::new(10.0, 20.0, 100.0, 30.0));
        assert!(button.bounds.contains(Vec2::new(10.0, 20.0)));
        assert!(button.bounds.contains(Vec2::new(110.0, 50.0)));
        assert!(button.bounds.contains(Vec2::new(60.0, 35.0)));
        assert!(!button.bounds.contains(Vec2::new(9.9, 35.0)));
        assert!(!button.bounds.contains(Vec2::new(60.0, 50.1)));
    }

    #[test]
    fn click_fires_only_on_release_inside() {
        let mut button = Button::new(Rect::new(0.0, 0.0, 50.0, 20.0));
        let inside = Vec2::new(25.0, 10.0);
        let outside = Vec2::new(200.0, 200.0);

        assert!(!button.update(inside, true, false));
        assert!(button.pressed);

        assert!(button.update(inside, false, true));

        // Release outside does nothing
        assert!(!button.update(outside, false, true));
        assert!(!button.hovered);
    }

    #[test]
    fn panel_is_centered_with_button_inside() {
        let panel = GameOverPanel::new();
        let panel_center = panel.bounds.center();
        assert!((panel_center.x - SCREEN_WIDTH * 0.5).abs() < 1e-3);
        assert!((panel_center.y - SCREEN_HEIGHT * 0.5).abs() < 1e-3);

        let b = panel.play_again.bounds;
        assert!(b.x > panel.bounds.x);
        assert!(b.x + b.w < panel.bounds.x + panel.bounds.w);
        assert!(b.y + b.h < panel.bounds.y + panel.bounds.h);
    }
}
