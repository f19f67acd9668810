//! Game state: the entity collection, score and block grid layout
//!
//! The block grid is allocated once at rows x max-columns capacity; level
//! progression only rewrites which centered column range is visible and
//! collidable, never the entity count.

use glam::Vec2;

use super::entity::{Entity, EntityFlags, EntityKind, SpriteSet};
use crate::consts::*;

/// Coarse game mode gating which per-frame behaviors run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Waiting for a start input; no entity update runs
    Paused,
    /// Active gameplay
    Playing,
    /// All blocks destroyed; transient, resolved within the same tick
    LevelClear,
    /// Round ended; waiting for a play-again interaction
    GameOver,
}

/// Complete game state for one round-after-round session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Insertion order: paddle, ball, then the block grid row by row
    pub entities: Vec<Entity>,
    pub mode: GameMode,
    pub score: u32,
    /// Best score this process run; never persisted
    pub high_score: u32,
    /// Active columns per row, grows with each cleared level
    pub blocks_per_row: usize,
}

impl GameState {
    /// Build the initial state: paddle centered at the bottom, ball served
    /// just above it, full block grid laid out with the starting column
    /// range active.
    pub fn new(sprites: &SpriteSet) -> Self {
        let mut entities = Vec::with_capacity(2 + BLOCK_ROWS * MAX_BLOCKS_PER_ROW);

        let mut paddle = Entity::new(EntityKind::Paddle, sprites.paddle, PADDLE_WIDTH, PADDLE_HEIGHT);
        paddle.add_flag(EntityFlags::VISIBLE | EntityFlags::MOVABLE | EntityFlags::COLLIDABLE);
        paddle.position = Vec2::new(
            (SCREEN_WIDTH - PADDLE_WIDTH) * 0.5,
            SCREEN_HEIGHT - PADDLE_HEIGHT - PADDLE_BOTTOM_MARGIN,
        );
        paddle.move_speed = PADDLE_SPEED;
        let paddle_top = paddle.position.y;
        entities.push(paddle);

        let mut ball = Entity::new(EntityKind::Ball, sprites.ball, BALL_WIDTH, BALL_HEIGHT);
        ball.add_flag(EntityFlags::VISIBLE | EntityFlags::MOVABLE | EntityFlags::COLLIDABLE);
        ball.position = Vec2::new(
            (SCREEN_WIDTH - BALL_WIDTH) * 0.5,
            paddle_top - BALL_HEIGHT - BALL_SERVE_GAP,
        );
        ball.move_speed = BALL_SPEED;
        ball.direction = BALL_START_DIRECTION.normalize();
        entities.push(ball);

        let total_row_width =
            MAX_BLOCKS_PER_ROW as f32 * BLOCK_WIDTH + (MAX_BLOCKS_PER_ROW as f32 - 1.0) * BLOCK_PADDING;
        let start_x = (SCREEN_WIDTH - total_row_width) * 0.5;

        for row in 0..BLOCK_ROWS {
            for col in 0..MAX_BLOCKS_PER_ROW {
                let mut block =
                    Entity::new(EntityKind::Block, sprites.block_rows[row], BLOCK_WIDTH, BLOCK_HEIGHT);
                block.position = Vec2::new(
                    start_x + col as f32 * (BLOCK_WIDTH + BLOCK_PADDING),
                    BLOCK_START_OFFSET + row as f32 * (BLOCK_HEIGHT + BLOCK_PADDING),
                );
                block.target_position = block.position;
                entities.push(block);
            }
        }

        let mut state = Self {
            entities,
            mode: GameMode::Paused,
            score: 0,
            high_score: 0,
            blocks_per_row: INITIAL_BLOCKS_PER_ROW,
        };
        state.apply_row_visibility();
        state
    }

    /// First entity of ball kind; singleton by convention, not enforced
    pub fn ball(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.kind == EntityKind::Ball)
    }

    pub fn ball_mut(&mut self) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.kind == EntityKind::Ball)
    }

    /// First entity of paddle kind
    pub fn paddle(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.kind == EntityKind::Paddle)
    }

    /// Columns left inactive on each side to center the active range
    pub fn skip_margin(&self) -> usize {
        (MAX_BLOCKS_PER_ROW - self.blocks_per_row) / 2
    }

    /// True once no block is left visible
    pub fn all_blocks_cleared(&self) -> bool {
        !self
            .entities
            .iter()
            .any(|e| e.kind == EntityKind::Block && e.has_flag(EntityFlags::VISIBLE))
    }

    /// Rewrite block visibility/collidability from the current
    /// `blocks_per_row`: a centered contiguous column range is active,
    /// the symmetric skip margin on either side is not.
    pub fn apply_row_visibility(&mut self) {
        let skip = self.skip_margin();
        let active = skip..skip + self.blocks_per_row;

        let mut counter = 0usize;
        for block in self.entities.iter_mut().filter(|e| e.kind == EntityKind::Block) {
            let column = counter % MAX_BLOCKS_PER_ROW;
            if active.contains(&column) {
                block.add_flag(EntityFlags::VISIBLE | EntityFlags::COLLIDABLE);
            } else {
                block.remove_flag(
                    EntityFlags::VISIBLE | EntityFlags::COLLIDABLE | EntityFlags::ANIMATING,
                );
            }
            counter += 1;
        }
    }

    /// Level respawn: widen the active column range, push every block
    /// off-screen above its resting position and let the animation step
    /// slide it back in.
    pub fn advance_level(&mut self) {
        self.blocks_per_row = (self.blocks_per_row + BLOCKS_PER_ROW_STEP).min(MAX_BLOCKS_PER_ROW);

        let formation_height = BLOCK_START_OFFSET
            + BLOCK_ROWS as f32 * BLOCK_HEIGHT
            + (BLOCK_ROWS as f32 - 1.0) * BLOCK_PADDING;
        let offscreen_offset = formation_height + BLOCK_HEIGHT;

        for block in self.entities.iter_mut().filter(|e| e.kind == EntityKind::Block) {
            block.position.y = block.target_position.y - offscreen_offset;
            block.add_flag(EntityFlags::ANIMATING);
        }

        self.apply_row_visibility();
    }

    /// Back to a fresh round after a game over. Idempotent: the high
    /// score is the only thing that survives.
    pub fn reset(&mut self) {
        self.score = 0;
        self.blocks_per_row = INITIAL_BLOCKS_PER_ROW;
        self.mode = GameMode::Paused;

        for paddle in self.entities.iter_mut().filter(|e| e.kind == EntityKind::Paddle) {
            paddle.position = Vec2::new(
                (SCREEN_WIDTH - paddle.width) * 0.5,
                SCREEN_HEIGHT - paddle.height - PADDLE_BOTTOM_MARGIN,
            );
            paddle.direction = Vec2::ZERO;
        }

        // The ball serves relative to the first-found paddle
        let paddle_top = self.paddle().map(|p| p.position.y);
        for ball in self.entities.iter_mut().filter(|e| e.kind == EntityKind::Ball) {
            ball.position.x = (SCREEN_WIDTH - ball.width) * 0.5;
            if let Some(top) = paddle_top {
                ball.position.y = top - ball.height - BALL_SERVE_GAP;
            }
            ball.direction = BALL_START_DIRECTION.normalize();
            ball.add_flag(EntityFlags::VISIBLE);
        }

        // Snap any in-flight respawn animation back to rest
        for block in self.entities.iter_mut().filter(|e| e.kind == EntityKind::Block) {
            block.position = block.target_position;
            block.remove_flag(EntityFlags::ANIMATING);
        }
        self.apply_row_visibility();
    }
}
