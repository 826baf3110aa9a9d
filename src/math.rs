//! 2D point arithmetic.
//!
//! Float positions and sizes use raylib's [`Vector2`] and its operators.
//! Integer grid coordinates (sprite-sheet dimensions and frame selectors) use
//! [`Point2i`], which serializes with capital `X`/`Y` keys.

use std::ops::Div;

use raylib::prelude::Vector2;
use serde::{Deserialize, Serialize};

/// Shorthand constructor for a raylib vector.
pub const fn vec2(x: f32, y: f32) -> Vector2 {
    Vector2 { x, y }
}

/// The zero vector.
pub const ZERO: Vector2 = vec2(0.0, 0.0);

/// Integer point used for grid dimensions and frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point2i {
    #[serde(rename = "X")]
    pub x: i32,
    #[serde(rename = "Y")]
    pub y: i32,
}

impl Point2i {
    pub const ONE: Point2i = Point2i::new(1, 1);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise maximum with `min`, used to clamp grid sizes.
    pub fn at_least(self, min: i32) -> Self {
        Self::new(self.x.max(min), self.y.max(min))
    }

    pub fn to_vector2(self) -> Vector2 {
        vec2(self.x as f32, self.y as f32)
    }
}

/// Component-wise integer division, e.g. a bitmap size split into a grid.
impl Div for Point2i {
    type Output = Point2i;

    fn div(self, rhs: Point2i) -> Point2i {
        Point2i::new(self.x / rhs.x, self.y / rhs.y)
    }
}
