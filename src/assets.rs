//! Asset registry for the presentation layer
//!
//! Sprites are generated at startup instead of loaded from disk, so the
//! binary is self-contained. The simulation only ever sees opaque
//! [`SpriteId`]s; all texture handles stay here.

use macroquad::prelude::{BROWN, Color, FilterMode, GREEN, PINK, SKYBLUE, Texture2D};

use crate::consts::*;
use crate::sim::{SpriteId, SpriteSet};

/// Owns every texture and maps sprite ids to them
pub struct Assets {
    textures: Vec<Texture2D>,
    sprites: SpriteSet,
}

impl Assets {
    /// Build all sprites. Runs once at startup; generation cannot fail.
    pub fn load() -> Self {
        let mut textures = Vec::new();
        let mut add = |width: f32, height: f32, color: Color| {
            textures.push(shaded_texture(width as u16, height as u16, color));
            SpriteId(textures.len() as u32 - 1)
        };

        let paddle = add(PADDLE_WIDTH, PADDLE_HEIGHT, Color::from_rgba(200, 200, 210, 255));
        let ball = add(BALL_WIDTH, BALL_HEIGHT, Color::from_rgba(240, 240, 240, 255));
        // Row colors top to bottom, matching the classic palette
        let block_rows = [
            add(BLOCK_WIDTH, BLOCK_HEIGHT, PINK),
            add(BLOCK_WIDTH, BLOCK_HEIGHT, BROWN),
            add(BLOCK_WIDTH, BLOCK_HEIGHT, GREEN),
            add(BLOCK_WIDTH, BLOCK_HEIGHT, SKYBLUE),
        ];

        let sprites = SpriteSet { paddle, ball, block_rows };
        log::info!("generated {} sprite textures", textures.len());
        Self { textures, sprites }
    }

    /// Sprite ids handed to entity setup
    pub fn sprites(&self) -> &SpriteSet {
        &self.sprites
    }

    /// Texture for a sprite id. Ids come only from this registry, so an
    /// out-of-range id is a programming error.
    pub fn texture(&self, sprite: SpriteId) -> &Texture2D {
        &self.textures[sprite.0 as usize]
    }
}

/// Flat fill with darkened bottom/right edge pixels for a little depth
fn shaded_texture(width: u16, height: u16, color: Color) -> Texture2D {
    let fill = to_rgba8(color, 1.0);
    let edge = to_rgba8(color, 0.6);

    let mut bytes = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let pixel = if x == width - 1 || y == height - 1 {
                edge
            } else {
                fill
            };
            bytes.extend_from_slice(&pixel);
        }
    }

    let texture = Texture2D::from_rgba8(width, height, &bytes);
    texture.set_filter(FilterMode::Nearest);
    texture
}

fn to_rgba8(color: Color, brightness: f32) -> [u8; 4] {
    [
        (color.r * brightness * 255.0) as u8,
        (color.g * brightness * 255.0) as u8,
        (color.b * brightness * 255.0) as u8,
        (color.a * 255.0) as u8,
    ]
}
