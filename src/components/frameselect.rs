use bevy_ecs::prelude::Component;

/// Row-major sheet frame to select before the entity's sprite is drawn.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameSelect(pub usize);
