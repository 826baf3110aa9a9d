//! Single-sprite draw request.
//!
//! An entity with a [`SpritePlacement`] is drawn once per frame by
//! [`render_sprites`](crate::systems::render::render_sprites). Nothing is
//! retained between frames beyond the component itself.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

use crate::backend::TextureId;

/// Draw `sprite` with its origin on `position`.
///
/// `size` overrides the native frame size; `scale` multiplies whichever size
/// is used.
#[derive(Component, Clone, Copy, Debug)]
pub struct SpritePlacement {
    pub sprite: TextureId,
    pub position: Vector2,
    pub size: Option<Vector2>,
    pub scale: f32,
}

impl SpritePlacement {
    pub fn new(sprite: TextureId, position: Vector2) -> Self {
        Self {
            sprite,
            position,
            size: None,
            scale: 1.0,
        }
    }

    pub fn with_size(mut self, size: Vector2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}
