//! Entity records and capability flags
//!
//! A single `Entity` struct covers the paddle, the ball and every block.
//! Cross-cutting behaviors (movement, drawing, collision, respawn
//! animation) are selected by an orthogonal flag set rather than by kind,
//! so the per-frame loops stay cheap filters. Kind is only consulted where
//! flags are ambiguous (only one entity kind is "the ball").

use glam::Vec2;

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Paddle,
    Ball,
    Block,
}

/// Capability flags, stored as a bit set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityFlags(u8);

impl EntityFlags {
    pub const NONE: Self = Self(0);
    /// Drawn by the presentation layer
    pub const VISIBLE: Self = Self(1 << 0);
    /// Integrated by the movement step
    pub const MOVABLE: Self = Self(1 << 1);
    /// Participates in overlap tests
    pub const COLLIDABLE: Self = Self(1 << 2);
    /// Sliding toward `target_position` during a level respawn
    pub const ANIMATING: Self = Self(1 << 3);

    /// True if any bit of `flag` is set
    #[inline]
    pub const fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 != 0
    }

    #[inline]
    pub fn insert(&mut self, flag: Self) {
        self.0 |= flag.0;
    }

    #[inline]
    pub fn remove(&mut self, flag: Self) {
        self.0 &= !flag.0;
    }
}

impl std::ops::BitOr for EntityFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Axis-aligned rectangle, top-left origin, Y increasing downward
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict-inequality overlap test; touching edges do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.w
            && point.y >= self.y
            && point.y <= self.y + self.h
    }
}

/// Opaque reference into the presentation layer's asset registry.
/// The simulation never inspects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

/// The sprites entity setup needs, handed in by the asset registry
#[derive(Debug, Clone, Copy)]
pub struct SpriteSet {
    pub paddle: SpriteId,
    pub ball: SpriteId,
    /// One look per block row, top row first
    pub block_rows: [SpriteId; crate::consts::BLOCK_ROWS],
}

/// A single simulated object
#[derive(Debug, Clone)]
pub struct Entity {
    pub kind: EntityKind,
    pub flags: EntityFlags,
    pub width: f32,
    pub height: f32,
    pub position: Vec2,
    /// Resting position a block animates toward during a level respawn
    pub target_position: Vec2,
    /// Unit-ish travel direction; its signs encode the bounce state.
    /// Speed is carried separately by `move_speed`, and the bounce
    /// formulas re-normalize, so magnitude stays ~1 while in flight.
    pub direction: Vec2,
    pub move_speed: f32,
    pub sprite: SpriteId,
}

impl Entity {
    pub fn new(kind: EntityKind, sprite: SpriteId, width: f32, height: f32) -> Self {
        Self {
            kind,
            flags: EntityFlags::NONE,
            width,
            height,
            position: Vec2::ZERO,
            target_position: Vec2::ZERO,
            direction: Vec2::ZERO,
            move_speed: 0.0,
            sprite,
        }
    }

    pub fn collider(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    #[inline]
    pub fn has_flag(&self, flag: EntityFlags) -> bool {
        self.flags.contains(flag)
    }

    #[inline]
    pub fn add_flag(&mut self, flag: EntityFlags) {
        self.flags.insert(flag);
    }

    #[inline]
    pub fn remove_flag(&mut self, flag: EntityFlags) {
        self.flags.remove(flag);
    }
}
