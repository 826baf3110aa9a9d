//! Repeated draw request along a segment.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

use crate::backend::TextureId;

/// Tile `sprite` from `start` to `end`, each copy scaled by `scale`.
#[derive(Component, Clone, Copy, Debug)]
pub struct TiledLine {
    pub sprite: TextureId,
    pub start: Vector2,
    pub end: Vector2,
    pub scale: f32,
}

impl TiledLine {
    pub fn new(sprite: TextureId, start: Vector2, end: Vector2) -> Self {
        Self {
            sprite,
            start,
            end,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}
