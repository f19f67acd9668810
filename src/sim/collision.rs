//! Wall, block and paddle collision passes
//!
//! Three independent passes per frame, in a fixed order (wall, block,
//! paddle). Each pass may rewrite the ball's direction and a later pass
//! reads the updated value, so the order is load-bearing.

use glam::Vec2;

use super::entity::{EntityFlags, EntityKind};
use super::state::GameState;
use crate::consts::*;

/// Coordinate axis whose direction component is inverted by a bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Collision outcomes of one frame, consumed by the presentation layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionEvents {
    /// At most one wall bounce is reported per frame, however many edges
    /// were hit
    pub wall_bounce: bool,
    pub blocks_destroyed: u32,
    pub paddle_bounce: bool,
}

/// Run all three passes in order
pub fn resolve_collisions(state: &mut GameState) -> CollisionEvents {
    let mut events = CollisionEvents::default();
    wall_pass(state, &mut events);
    block_pass(state, &mut events);
    paddle_pass(state, &mut events);
    events
}

/// Bounce the ball off the left/right/top screen edges, clamping the
/// position back inside so it cannot stick or tunnel out. The bottom edge
/// is deliberately open; falling past it is a rule, not a bounce.
pub fn wall_pass(state: &mut GameState, events: &mut CollisionEvents) {
    for ball in state.entities.iter_mut().filter(|e| e.kind == EntityKind::Ball) {
        let mut bounced = false;

        if ball.position.x <= 0.0 || ball.position.x + ball.width >= SCREEN_WIDTH {
            ball.direction.x *= -1.0;
            ball.position.x = ball.position.x.clamp(0.0, SCREEN_WIDTH - ball.width);
            bounced = true;
        }

        if ball.position.y <= 0.0 {
            ball.direction.y *= -1.0;
            ball.position.y = ball.position.y.max(0.0);
            bounced = true;
        }

        if bounced {
            events.wall_bounce = true;
        }
    }
}

/// Destroy every visible, collidable block the ball overlaps. Only the
/// first overlap decides the bounce: the axis with the larger normalized
/// center offset is flipped, which resolves corner and simultaneous hits
/// deterministically. Later overlaps in the same frame are destroyed
/// without a second flip, so the ball can plow through a cluster while
/// bouncing once.
pub fn block_pass(state: &mut GameState, events: &mut CollisionEvents) {
    let Some(ball_idx) = state
        .entities
        .iter()
        .position(|e| e.kind == EntityKind::Ball)
    else {
        return;
    };
    let ball_bounds = state.entities[ball_idx].collider();
    let ball_center = ball_bounds.center();

    let mut bounce_axis: Option<Axis> = None;

    for block in state.entities.iter_mut().filter(|e| e.kind == EntityKind::Block) {
        if !block.has_flag(EntityFlags::COLLIDABLE) {
            continue;
        }
        let block_bounds = block.collider();
        if !ball_bounds.overlaps(&block_bounds) {
            continue;
        }

        state.score += BLOCK_SCORE;
        block.remove_flag(EntityFlags::COLLIDABLE);
        block.remove_flag(EntityFlags::VISIBLE);
        events.blocks_destroyed += 1;

        if bounce_axis.is_none() {
            let delta = ball_center - block_bounds.center();
            // Normalize by the block's half extents so tall-vs-wide
            // geometry does not bias the side detection
            let normalized = Vec2::new(
                delta.x / (block_bounds.w * 0.5),
                delta.y / (block_bounds.h * 0.5),
            );
            bounce_axis = Some(if normalized.x.abs() > normalized.y.abs() {
                Axis::X
            } else {
                Axis::Y
            });
        }
    }

    if let Some(axis) = bounce_axis {
        let ball = &mut state.entities[ball_idx];
        match axis {
            Axis::X => ball.direction.x *= -1.0,
            Axis::Y => ball.direction.y *= -1.0,
        }
    }
}

/// Deflect the ball off the paddle. The new direction depends on where
/// the ball struck: a center hit leaves straight up, an edge hit leaves
/// at a sharp angle. The Y component is always upward, and the vector is
/// re-normalized since speed is carried by `move_speed`.
pub fn paddle_pass(state: &mut GameState, events: &mut CollisionEvents) {
    let Some(paddle) = state.entities.iter().find(|e| e.kind == EntityKind::Paddle) else {
        return;
    };
    let paddle_bounds = paddle.collider();
    let paddle_center_x = paddle_bounds.center().x;
    let half_width = paddle_bounds.w * 0.5;

    for ball in state.entities.iter_mut().filter(|e| e.kind == EntityKind::Ball) {
        if !ball.collider().overlaps(&paddle_bounds) {
            continue;
        }

        // Offset normalized to (-1, 1) across the paddle face
        let ball_center_x = ball.position.x + ball.width * 0.5;
        let offset_x = (ball_center_x - paddle_center_x) / half_width;
        ball.direction = Vec2::new(offset_x, -1.0).normalize();

        // Snap flush above the paddle so the overlap cannot re-trigger
        // every following frame
        ball.position.y = paddle_bounds.y - ball.height;

        events.paddle_bounce = true;
    }
}
