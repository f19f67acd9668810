//! The game layer: input polling, simulation stepping and drawing
//!
//! Thin adapter between the simulation core and the macroquad/rodio
//! collaborators. One `frame()` call per rendered frame: recompute the
//! canvas transform, poll input, tick the simulation, map events to
//! sounds, draw.

use glam::Vec2;
use macroquad::prelude as mq;

use crate::assets::Assets;
use crate::audio::{AudioManager, SoundEffect};
use crate::canvas::CanvasTransform;
use crate::consts::*;
use crate::sim::{self, EntityFlags, FrameEvents, FrameInput, GameMode, GameState};
use crate::ui::GameOverPanel;

const BACKGROUND: mq::Color = mq::Color::new(0.125, 0.125, 0.125, 1.0);

pub struct GameLayer {
    state: GameState,
    assets: Assets,
    audio: AudioManager,
    panel: GameOverPanel,
}

impl GameLayer {
    pub fn new() -> Self {
        let assets = Assets::load();
        let state = GameState::new(assets.sprites());
        Self {
            state,
            assets,
            audio: AudioManager::new(),
            panel: GameOverPanel::new(),
        }
    }

    /// Run one full frame: input, simulation, feedback, draw
    pub fn frame(&mut self) {
        let transform = CanvasTransform::compute(mq::screen_width(), mq::screen_height());
        let input = self.poll_input(&transform);
        let events = sim::tick(&mut self.state, &input, mq::get_frame_time());
        self.play_feedback(&events);
        self.draw(&transform);
    }

    /// Translate raw key/mouse state into mode-gated frame input
    fn poll_input(&mut self, transform: &CanvasTransform) -> FrameInput {
        let mut input = FrameInput::default();

        match self.state.mode {
            GameMode::Paused => {
                input.start = mq::is_key_pressed(mq::KeyCode::A)
                    || mq::is_key_pressed(mq::KeyCode::D)
                    || mq::is_key_pressed(mq::KeyCode::Space);
            }
            GameMode::GameOver => {
                let (mouse_x, mouse_y) = mq::mouse_position();
                let pointer = transform.to_canvas(Vec2::new(mouse_x, mouse_y));
                let clicked = self.panel.play_again.update(
                    pointer,
                    mq::is_mouse_button_down(mq::MouseButton::Left),
                    mq::is_mouse_button_released(mq::MouseButton::Left),
                );
                input.play_again = clicked || mq::is_key_pressed(mq::KeyCode::Space);
            }
            GameMode::Playing | GameMode::LevelClear => {
                if mq::is_key_down(mq::KeyCode::A) || mq::is_key_down(mq::KeyCode::Left) {
                    input.steer -= 1.0;
                }
                if mq::is_key_down(mq::KeyCode::D) || mq::is_key_down(mq::KeyCode::Right) {
                    input.steer += 1.0;
                }
            }
        }

        input
    }

    /// Map frame events to sounds and log lines
    fn play_feedback(&self, events: &FrameEvents) {
        if events.wall_bounce {
            self.audio.play(SoundEffect::Bounce);
        }
        // Gated: skipped while the previous bounce is still sounding
        if events.paddle_bounce {
            self.audio.play_gated(SoundEffect::Bounce);
        }
        if events.blocks_destroyed > 0 {
            self.audio.play(SoundEffect::Brick);
        }
        if events.level_cleared {
            self.audio.play(SoundEffect::LevelComplete);
            log::info!("level cleared, score {}", self.state.score);
        }
        if events.game_over {
            self.audio.play(SoundEffect::GameOver);
            log::info!(
                "game over, score {} (best {})",
                self.state.score,
                self.state.high_score
            );
        }
        if events.reset {
            self.audio.play(SoundEffect::Button);
        }
        if events.started {
            log::info!("round started");
        }
    }

    fn draw(&self, transform: &CanvasTransform) {
        mq::clear_background(BACKGROUND);

        for entity in &self.state.entities {
            if !entity.has_flag(EntityFlags::VISIBLE) {
                continue;
            }
            let pos = transform.to_window(entity.position);
            mq::draw_texture_ex(
                self.assets.texture(entity.sprite),
                pos.x,
                pos.y,
                mq::WHITE,
                mq::DrawTextureParams {
                    dest_size: Some(mq::vec2(
                        entity.width * transform.scale,
                        entity.height * transform.scale,
                    )),
                    ..Default::default()
                },
            );
        }

        self.draw_score(transform);
        match self.state.mode {
            GameMode::Paused => self.draw_start_hint(transform),
            GameMode::GameOver => self.draw_game_over(transform),
            _ => {}
        }
    }

    /// Score centered in the strip above the block rows
    fn draw_score(&self, transform: &CanvasTransform) {
        let text = self.state.score.to_string();
        draw_text_centered(&text, SCREEN_WIDTH * 0.5, 20.0, 16.0, mq::WHITE, transform);
    }

    fn draw_start_hint(&self, transform: &CanvasTransform) {
        // Slow blink
        if mq::get_time() % 1.0 < 0.7 {
            draw_text_centered(
                "PRESS SPACE TO START",
                SCREEN_WIDTH * 0.5,
                SCREEN_HEIGHT * 0.62,
                16.0,
                mq::WHITE,
                transform,
            );
        }
    }

    fn draw_game_over(&self, transform: &CanvasTransform) {
        let panel = self.panel.bounds;
        let top_left = transform.to_window(Vec2::new(panel.x, panel.y));
        mq::draw_rectangle(
            top_left.x,
            top_left.y,
            panel.w * transform.scale,
            panel.h * transform.scale,
            mq::Color::new(0.08, 0.08, 0.08, 0.95),
        );
        mq::draw_rectangle_lines(
            top_left.x,
            top_left.y,
            panel.w * transform.scale,
            panel.h * transform.scale,
            2.0 * transform.scale,
            mq::WHITE,
        );

        let center_x = panel.x + panel.w * 0.5;
        draw_text_centered("GAME OVER", center_x, panel.y + 24.0, 20.0, mq::RED, transform);
        draw_text_centered(
            &format!("SCORE {}", self.state.score),
            center_x,
            panel.y + 52.0,
            16.0,
            mq::WHITE,
            transform,
        );
        draw_text_centered(
            &format!("BEST {}", self.state.high_score),
            center_x,
            panel.y + 74.0,
            16.0,
            mq::GRAY,
            transform,
        );

        let button = &self.panel.play_again;
        let fill = if button.pressed {
            mq::Color::new(0.35, 0.35, 0.4, 1.0)
        } else if button.hovered {
            mq::Color::new(0.28, 0.28, 0.32, 1.0)
        } else {
            mq::Color::new(0.2, 0.2, 0.24, 1.0)
        };
        let button_top_left = transform.to_window(Vec2::new(button.bounds.x, button.bounds.y));
        mq::draw_rectangle(
            button_top_left.x,
            button_top_left.y,
            button.bounds.w * transform.scale,
            button.bounds.h * transform.scale,
            fill,
        );
        mq::draw_rectangle_lines(
            button_top_left.x,
            button_top_left.y,
            button.bounds.w * transform.scale,
            button.bounds.h * transform.scale,
            2.0 * transform.scale,
            mq::WHITE,
        );
        draw_text_centered(
            "PLAY AGAIN",
            button.bounds.x + button.bounds.w * 0.5,
            button.bounds.y + button.bounds.h * 0.5 - 6.0,
            16.0,
            mq::WHITE,
            transform,
        );
    }
}

impl Default for GameLayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw text horizontally centered on a canvas-space x, top at canvas y
fn draw_text_centered(
    text: &str,
    center_x: f32,
    top_y: f32,
    size: f32,
    color: mq::Color,
    transform: &CanvasTransform,
) {
    let font_size = (size * transform.scale).round().max(8.0) as u16;
    let dims = mq::measure_text(text, None, font_size, 1.0);
    let top_left = transform.to_window(Vec2::new(center_x, top_y));
    // draw_text positions at the baseline
    mq::draw_text(
        text,
        top_left.x - dims.width * 0.5,
        top_left.y + dims.offset_y,
        font_size as f32,
        color,
    );
}
