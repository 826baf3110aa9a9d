//! Draw order component.

use bevy_ecs::prelude::Component;

/// Draw order for sprite requests.
///
/// Lower values are drawn first, so higher values end up on top. Requests
/// without a `ZIndex` use 0; ties keep query order.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
