//! Brickout - a single-screen arcade block breaker
//!
//! Core modules:
//! - `sim`: simulation core (entities, collision passes, mode state machine)
//! - `canvas`: letterbox transform between the logical canvas and the window
//! - `assets`/`audio`/`ui`/`app`: thin presentation adapter around
//!   macroquad (render/input) and rodio (sound)

pub mod app;
pub mod assets;
pub mod audio;
pub mod canvas;
pub mod sim;
pub mod ui;

pub use sim::{FrameEvents, FrameInput, GameMode, GameState};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed logical resolution; the window is letterboxed to this
    pub const SCREEN_WIDTH: f32 = 480.0;
    pub const SCREEN_HEIGHT: f32 = 360.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 64.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    pub const PADDLE_SPEED: f32 = 400.0;
    /// Gap between the paddle and the bottom of the screen
    pub const PADDLE_BOTTOM_MARGIN: f32 = 15.0;

    /// Ball defaults
    pub const BALL_WIDTH: f32 = 8.0;
    pub const BALL_HEIGHT: f32 = 8.0;
    pub const BALL_SPEED: f32 = 250.0;
    /// Serve direction, normalized before use
    pub const BALL_START_DIRECTION: Vec2 = Vec2::new(-0.5, -1.0);
    /// Gap between a served ball and the paddle top
    pub const BALL_SERVE_GAP: f32 = 2.0;

    /// Block grid layout
    pub const BLOCK_WIDTH: f32 = 30.0;
    pub const BLOCK_HEIGHT: f32 = 12.0;
    pub const BLOCK_ROWS: usize = 4;
    pub const MAX_BLOCKS_PER_ROW: usize = 15;
    pub const INITIAL_BLOCKS_PER_ROW: usize = 7;
    pub const BLOCKS_PER_ROW_STEP: usize = 2;
    pub const BLOCK_PADDING: f32 = 2.0;
    /// Y offset of the first block row
    pub const BLOCK_START_OFFSET: f32 = 30.0;

    /// Scoring
    pub const BLOCK_SCORE: u32 = 50;
    pub const LEVEL_CLEAR_BONUS: u32 = 250;

    /// Exponential smoothing rate for the block respawn animation
    pub const BLOCK_ANIM_SPEED: f32 = 1.5;
}

/// Linear interpolation between `from` and `to`
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
