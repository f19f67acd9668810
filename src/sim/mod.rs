//! Simulation core
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies: input arrives as a [`FrameInput`], everything the
//! presentation layer needs to react to leaves as [`FrameEvents`].

pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;

pub use collision::{Axis, CollisionEvents, resolve_collisions};
pub use entity::{Entity, EntityFlags, EntityKind, Rect, SpriteId, SpriteSet};
pub use state::{GameMode, GameState};
pub use tick::{FrameEvents, FrameInput, tick};
