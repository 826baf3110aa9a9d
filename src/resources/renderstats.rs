//! Per-frame draw statistics.

use bevy_ecs::prelude::Resource;

/// Filled by the render system every frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames rendered so far.
    pub frames: u64,
    /// Quads emitted during the last frame.
    pub draws: usize,
    /// Draw requests that failed during the last frame.
    pub failures: usize,
}
