//! Color tint component for sprite draw requests.
//!
//! The [`Tint`] component replaces the white draw color of an entity's
//! [`SpritePlacement`](crate::components::spriteplacement::SpritePlacement)
//! or [`TiledLine`](crate::components::tiledline::TiledLine). A tint with
//! alpha below 255 turns blending on for that draw.

use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

#[derive(Component, Clone, Debug, Copy)]
pub struct Tint {
    pub color: Color,
}

impl Tint {
    /// Create a new Tint with the specified RGBA values.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            color: Color::new(r, g, b, a),
        }
    }

    /// White at the given opacity.
    pub fn fade(alpha: u8) -> Self {
        Self::new(255, 255, 255, alpha)
    }

    pub fn is_opaque(&self) -> bool {
        self.color.a == 255
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
        }
    }
}
