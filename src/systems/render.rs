//! Sprite rendering system.
//!
//! Collects [`SpritePlacement`] and [`TiledLine`] requests, sorts them by
//! [`ZIndex`] and draws each one through the registry's backend. Failed
//! draws are logged and counted in [`RenderStats`]; they never stop the
//! frame.

use bevy_ecs::prelude::*;
use log::warn;
use raylib::prelude::Color;

use crate::backend::{BitmapLoader, TextureBackend, TextureId};
use crate::components::frameselect::FrameSelect;
use crate::components::spriteplacement::SpritePlacement;
use crate::components::tiledline::TiledLine;
use crate::components::tint::Tint;
use crate::components::zindex::ZIndex;
use crate::error::{Result, SpriteError};
use crate::resources::renderstats::RenderStats;
use crate::resources::spriteregistry::SpriteRegistry;

enum DrawRequest {
    Single(SpritePlacement, Option<usize>),
    Line(TiledLine),
}

impl DrawRequest {
    fn sprite(&self) -> TextureId {
        match self {
            DrawRequest::Single(p, _) => p.sprite,
            DrawRequest::Line(l) => l.sprite,
        }
    }
}

/// Draw every sprite request of the frame.
///
/// The registry is a NonSend resource, so this system runs on the thread
/// that owns the graphics context.
pub fn render_sprites<B, L>(
    mut registry: NonSendMut<SpriteRegistry<B, L>>,
    mut stats: ResMut<RenderStats>,
    placements: Query<(
        &SpritePlacement,
        Option<&FrameSelect>,
        Option<&Tint>,
        Option<&ZIndex>,
    )>,
    lines: Query<(&TiledLine, Option<&Tint>, Option<&ZIndex>)>,
) where
    B: TextureBackend + 'static,
    L: BitmapLoader + 'static,
{
    let mut to_draw: Vec<(ZIndex, DrawRequest, Color)> = placements
        .iter()
        .map(|(p, frame, tint, z)| {
            (
                z.copied().unwrap_or_default(),
                DrawRequest::Single(*p, frame.map(|f| f.0)),
                tint.copied().unwrap_or_default().color,
            )
        })
        .chain(lines.iter().map(|(l, tint, z)| {
            (
                z.copied().unwrap_or_default(),
                DrawRequest::Line(*l),
                tint.copied().unwrap_or_default().color,
            )
        }))
        .collect();

    to_draw.sort_by_key(|(z, _, _)| *z);

    stats.frames += 1;
    stats.draws = 0;
    stats.failures = 0;

    let registry = &mut *registry;
    for (_, request, color) in to_draw {
        match draw_request(registry, &request, color) {
            Ok(draws) => stats.draws += draws,
            Err(e) => {
                warn!("Skipping draw of texture {}: {e}", request.sprite());
                stats.failures += 1;
            }
        }
    }
}

fn draw_request<B, L>(
    registry: &mut SpriteRegistry<B, L>,
    request: &DrawRequest,
    color: Color,
) -> Result<usize>
where
    B: TextureBackend,
    L: BitmapLoader,
{
    let id = request.sprite();
    if let DrawRequest::Single(_, Some(frame)) = request {
        registry
            .get_mut(id)
            .ok_or_else(|| unknown(id))?
            .set_frame(*frame)?;
    }
    let (sprite, backend) = registry.sprite_with_backend(id).ok_or_else(|| unknown(id))?;

    match request {
        DrawRequest::Single(p, _) => {
            let size = p.size.unwrap_or_else(|| sprite.size()) * p.scale;
            sprite.draw_sized(backend, p.position, size, color)?;
            Ok(1)
        }
        DrawRequest::Line(l) => {
            sprite.draw_repeated_scaled(backend, l.start, l.end, l.scale, color)
        }
    }
}

fn unknown(id: TextureId) -> SpriteError {
    SpriteError::InvalidArgument(format!("texture {id} is not registered"))
}
