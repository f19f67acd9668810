//! Per-frame simulation step and the mode state machine
//!
//! One `tick` advances the game by a real-elapsed-seconds delta: mode-gated
//! input, respawn animation, movement integration, the collision passes and
//! rule evaluation, in that order.

use glam::Vec2;

use super::collision;
use super::entity::{EntityFlags, EntityKind};
use super::state::{GameMode, GameState};
use crate::consts::*;
use crate::lerp;

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Paddle steering in -1.0..=1.0 from held keys
    pub steer: f32,
    /// Start playing from the paused state
    pub start: bool,
    /// Restart after a game over
    pub play_again: bool,
}

/// Everything that happened this frame that the presentation layer may
/// want to react to with sounds or logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    pub started: bool,
    pub wall_bounce: bool,
    pub paddle_bounce: bool,
    pub blocks_destroyed: u32,
    pub level_cleared: bool,
    pub game_over: bool,
    pub reset: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) -> FrameEvents {
    let mut events = FrameEvents::default();

    match state.mode {
        GameMode::Paused => {
            if input.start {
                state.mode = GameMode::Playing;
                events.started = true;
            }
        }
        GameMode::GameOver => {
            if input.play_again {
                state.reset();
                events.reset = true;
            }
        }
        GameMode::Playing | GameMode::LevelClear => {
            step_playing(state, input, dt, &mut events);
        }
    }

    events
}

fn step_playing(state: &mut GameState, input: &FrameInput, dt: f32, events: &mut FrameEvents) {
    steer_paddle(state, input.steer);
    animate_blocks(state, dt);
    integrate_movement(state, dt);

    let hits = collision::resolve_collisions(state);
    events.wall_bounce = hits.wall_bounce;
    events.paddle_bounce = hits.paddle_bounce;
    events.blocks_destroyed = hits.blocks_destroyed;

    evaluate_rules(state, events);

    // Level clear is transient: the grid respawns and play carries straight
    // on, so the mode is never observable across frames
    if state.mode == GameMode::LevelClear {
        state.advance_level();
        state.mode = GameMode::Playing;
    }
}

/// Held input steers the paddle; it stops dead the moment keys are released
fn steer_paddle(state: &mut GameState, steer: f32) {
    for paddle in state.entities.iter_mut().filter(|e| e.kind == EntityKind::Paddle) {
        paddle.direction = Vec2::new(steer.clamp(-1.0, 1.0), 0.0);
    }
}

/// Slide ANIMATING blocks toward their resting position with exponential
/// smoothing; snap and clear the flag once the gap closes completely
fn animate_blocks(state: &mut GameState, dt: f32) {
    for entity in &mut state.entities {
        if !entity.has_flag(EntityFlags::ANIMATING) {
            continue;
        }

        entity.position.y = lerp(entity.position.y, entity.target_position.y, BLOCK_ANIM_SPEED * dt);

        if (entity.position.y - entity.target_position.y).abs() <= 0.0 {
            entity.position.y = entity.target_position.y;
            entity.remove_flag(EntityFlags::ANIMATING);
        }
    }
}

/// Explicit Euler step for MOVABLE entities; only the paddle is clamped
/// to the screen, the ball is bounded by bounce logic instead
fn integrate_movement(state: &mut GameState, dt: f32) {
    for entity in &mut state.entities {
        if entity.has_flag(EntityFlags::MOVABLE) {
            entity.position += entity.direction * entity.move_speed * dt;
        }

        if entity.kind == EntityKind::Paddle {
            entity.position.x = entity.position.x.clamp(0.0, SCREEN_WIDTH - entity.width);
        }
    }
}

/// Win/lose evaluation, run every playing frame. The miss check comes
/// first; the two conditions are mutually exclusive in practice (no blocks
/// left vs ball still in play).
fn evaluate_rules(state: &mut GameState, events: &mut FrameEvents) {
    let mut missed = false;
    for ball in state.entities.iter_mut().filter(|e| e.kind == EntityKind::Ball) {
        if ball.position.y >= SCREEN_HEIGHT {
            ball.remove_flag(EntityFlags::VISIBLE);
            missed = true;
        }
    }
    if missed {
        state.high_score = state.high_score.max(state.score);
        state.mode = GameMode::GameOver;
        events.game_over = true;
    }

    if state.all_blocks_cleared() {
        state.score += LEVEL_CLEAR_BONUS;
        state.mode = GameMode::LevelClear;
        events.level_cleared = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{SpriteId, SpriteSet};
    use proptest::prelude::*;

    fn sprites() -> SpriteSet {
        SpriteSet {
            paddle: SpriteId(0),
            ball: SpriteId(1),
            block_rows: [SpriteId(2), SpriteId(3), SpriteId(4), SpriteId(5)],
        }
    }

    fn playing_state() -> GameState {
        let mut state = GameState::new(&sprites());
        state.mode = GameMode::Playing;
        state
    }

    fn hide_all_blocks(state: &mut GameState) {
        for block in state.entities.iter_mut().filter(|e| e.kind == EntityKind::Block) {
            block.remove_flag(EntityFlags::VISIBLE | EntityFlags::COLLIDABLE);
        }
    }

    #[test]
    fn paused_runs_no_entity_update() {
        let mut state = GameState::new(&sprites());
        let ball_before = state.ball().unwrap().position;

        let events = tick(&mut state, &FrameInput::default(), 1.0 / 60.0);

        assert_eq!(state.mode, GameMode::Paused);
        assert_eq!(state.ball().unwrap().position, ball_before);
        assert_eq!(events, FrameEvents::default());
    }

    #[test]
    fn start_input_begins_playing() {
        let mut state = GameState::new(&sprites());
        let input = FrameInput { start: true, ..Default::default() };

        let events = tick(&mut state, &input, 1.0 / 60.0);

        assert_eq!(state.mode, GameMode::Playing);
        assert!(events.started);
    }

    #[test]
    fn ball_moves_while_playing() {
        let mut state = playing_state();
        let before = state.ball().unwrap().position;

        tick(&mut state, &FrameInput::default(), 1.0 / 60.0);

        let after = state.ball().unwrap().position;
        let expected = before + BALL_START_DIRECTION.normalize() * BALL_SPEED / 60.0;
        assert!((after - expected).length() < 1e-4);
    }

    #[test]
    fn steering_moves_and_clamps_paddle() {
        let mut state = playing_state();
        // Park the ball so a miss cannot end the round mid-test
        state.ball_mut().unwrap().direction = Vec2::ZERO;
        let input = FrameInput { steer: -1.0, ..Default::default() };

        // Steer hard left far longer than it takes to reach the wall
        for _ in 0..300 {
            tick(&mut state, &input, 1.0 / 60.0);
        }
        assert_eq!(state.paddle().unwrap().position.x, 0.0);

        let input = FrameInput { steer: 1.0, ..Default::default() };
        for _ in 0..300 {
            tick(&mut state, &input, 1.0 / 60.0);
        }
        assert_eq!(
            state.paddle().unwrap().position.x,
            SCREEN_WIDTH - PADDLE_WIDTH
        );
    }

    proptest! {
        /// Post-clamp paddle X stays in [0, screen - width] for any
        /// steering history
        #[test]
        fn paddle_clamp_holds(steer in -1.0f32..1.0, dt in 0.0f32..0.25, steps in 1usize..30) {
            let mut state = playing_state();
            // Park the ball so a miss cannot end the round mid-test
            state.ball_mut().unwrap().direction = Vec2::ZERO;
            let input = FrameInput { steer, ..Default::default() };

            for _ in 0..steps {
                tick(&mut state, &input, dt);
                let x = state.paddle().unwrap().position.x;
                prop_assert!(x >= 0.0);
                prop_assert!(x <= SCREEN_WIDTH - PADDLE_WIDTH);
            }
        }
    }

    #[test]
    fn respawn_animation_slides_in_and_snaps() {
        let mut state = playing_state();
        state.advance_level();
        state.mode = GameMode::Playing;

        let animating = |s: &GameState| {
            s.entities
                .iter()
                .filter(|e| e.has_flag(EntityFlags::ANIMATING))
                .count()
        };
        assert!(animating(&state) > 0);

        let sample = state
            .entities
            .iter()
            .position(|e| e.has_flag(EntityFlags::ANIMATING))
            .unwrap();
        let start_y = state.entities[sample].position.y;
        let target_y = state.entities[sample].target_position.y;

        tick(&mut state, &FrameInput::default(), 1.0 / 60.0);

        let moved_y = state.entities[sample].position.y;
        assert!(moved_y > start_y, "block must slide down toward rest");
        assert!(moved_y < target_y, "one step must not overshoot");
    }

    #[test]
    fn game_over_latches_new_high_score() {
        let mut state = playing_state();
        state.score = 900;
        state.high_score = 400;
        state.ball_mut().unwrap().position.y = SCREEN_HEIGHT + 5.0;
        state.ball_mut().unwrap().direction = Vec2::ZERO;

        let events = tick(&mut state, &FrameInput::default(), 1.0 / 60.0);

        assert_eq!(state.mode, GameMode::GameOver);
        assert_eq!(state.high_score, 900);
        assert!(events.game_over);
        assert!(!state.ball().unwrap().has_flag(EntityFlags::VISIBLE));
    }

    #[test]
    fn game_over_keeps_higher_previous_score() {
        let mut state = playing_state();
        state.score = 300;
        state.high_score = 1000;
        state.ball_mut().unwrap().position.y = SCREEN_HEIGHT + 5.0;
        state.ball_mut().unwrap().direction = Vec2::ZERO;

        tick(&mut state, &FrameInput::default(), 1.0 / 60.0);

        assert_eq!(state.high_score, 1000);
    }

    #[test]
    fn level_clear_awards_bonus_and_respawns() {
        let mut state = playing_state();
        hide_all_blocks(&mut state);
        let score_before = state.score;
        let rows_before = state.blocks_per_row;

        let events = tick(&mut state, &FrameInput::default(), 1.0 / 60.0);

        assert!(events.level_cleared);
        assert_eq!(state.score, score_before + LEVEL_CLEAR_BONUS);
        // Transient: never left in LevelClear
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.blocks_per_row, rows_before + BLOCKS_PER_ROW_STEP);

        // Fresh blocks are active again, sliding in from off-screen
        assert!(!state.all_blocks_cleared());
        assert!(
            state
                .entities
                .iter()
                .any(|e| e.has_flag(EntityFlags::ANIMATING))
        );
    }

    #[test]
    fn play_again_resets_to_paused() {
        let mut state = playing_state();
        state.score = 500;
        state.ball_mut().unwrap().position.y = SCREEN_HEIGHT + 5.0;
        tick(&mut state, &FrameInput::default(), 1.0 / 60.0);
        assert_eq!(state.mode, GameMode::GameOver);

        // Other inputs are ignored while game over
        tick(
            &mut state,
            &FrameInput { start: true, steer: 1.0, ..Default::default() },
            1.0 / 60.0,
        );
        assert_eq!(state.mode, GameMode::GameOver);

        let events = tick(
            &mut state,
            &FrameInput { play_again: true, ..Default::default() },
            1.0 / 60.0,
        );

        assert!(events.reset);
        assert_eq!(state.mode, GameMode::Paused);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 500);
        assert_eq!(state.blocks_per_row, INITIAL_BLOCKS_PER_ROW);
    }

    #[test]
    fn full_round_paddle_keeps_rally_alive() {
        // Drop the ball straight down onto a paddle parked beneath it and
        // check it comes back up through a couple of frames
        let mut state = playing_state();
        let paddle_x = state.paddle().unwrap().position.x;
        {
            let ball = state.ball_mut().unwrap();
            ball.position = Vec2::new(paddle_x + PADDLE_WIDTH * 0.5, 300.0);
            ball.direction = Vec2::new(0.0, 1.0);
        }

        let mut bounced = false;
        for _ in 0..120 {
            let events = tick(&mut state, &FrameInput::default(), 1.0 / 60.0);
            if events.paddle_bounce {
                bounced = true;
            }
            if bounced {
                break;
            }
        }
        assert!(bounced, "ball must meet the paddle");
        assert!(state.ball().unwrap().direction.y < 0.0);
        assert_eq!(state.mode, GameMode::Playing);
    }
}
