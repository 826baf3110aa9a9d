//! Anchor points for sprite placement.
//!
//! A sprite is positioned by its origin: drawing at `p` puts the origin on
//! `p`. The origin is either an explicit pixel offset from the frame's
//! top-left corner or one of nine named [`Layout`] anchors, which scale with
//! the drawn size.

use raylib::prelude::Vector2;
use serde::{Deserialize, Serialize};

use crate::math::vec2;

/// Named anchor within a sprite's bounds.
///
/// Serializes as its variant name (`"Center"`, `"BottomLeft"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Layout {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Layout {
    pub const ALL: [Layout; 9] = [
        Layout::TopLeft,
        Layout::TopCenter,
        Layout::TopRight,
        Layout::CenterLeft,
        Layout::Center,
        Layout::CenterRight,
        Layout::BottomLeft,
        Layout::BottomCenter,
        Layout::BottomRight,
    ];

    /// Offset of the anchor in [0,1]x[0,1], relative to the top-left corner.
    pub fn normalized(self) -> Vector2 {
        let (x, y) = match self {
            Layout::TopLeft => (0.0, 0.0),
            Layout::TopCenter => (0.5, 0.0),
            Layout::TopRight => (1.0, 0.0),
            Layout::CenterLeft => (0.0, 0.5),
            Layout::Center => (0.5, 0.5),
            Layout::CenterRight => (1.0, 0.5),
            Layout::BottomLeft => (0.0, 1.0),
            Layout::BottomCenter => (0.5, 1.0),
            Layout::BottomRight => (1.0, 1.0),
        };
        vec2(x, y)
    }
}

/// Origin of a sprite, as stored on the sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Origin {
    /// Offset in pixels of the native frame.
    Pixel(Vector2),
    /// Named anchor, resolved against whatever size is drawn.
    Layout(Layout),
}

impl Default for Origin {
    fn default() -> Self {
        Origin::Layout(Layout::TopLeft)
    }
}

impl From<Layout> for Origin {
    fn from(layout: Layout) -> Self {
        Origin::Layout(layout)
    }
}

impl From<Vector2> for Origin {
    fn from(offset: Vector2) -> Self {
        Origin::Pixel(offset)
    }
}

impl Origin {
    /// Offset to subtract from the draw position when a sprite whose native
    /// frame is `frame_size` is drawn at `draw_size`.
    ///
    /// Pixel origins are stretched by `draw_size / frame_size`; layouts are
    /// multiplied directly by `draw_size`.
    pub fn offset(self, frame_size: Vector2, draw_size: Vector2) -> Vector2 {
        match self {
            Origin::Pixel(px) => px * (draw_size / frame_size),
            Origin::Layout(layout) => layout.normalized() * draw_size,
        }
    }

    pub fn layout(self) -> Option<Layout> {
        match self {
            Origin::Layout(layout) => Some(layout),
            Origin::Pixel(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_and_center() {
        assert_eq!(Layout::TopLeft.normalized(), vec2(0.0, 0.0));
        assert_eq!(Layout::Center.normalized(), vec2(0.5, 0.5));
        assert_eq!(Layout::BottomRight.normalized(), vec2(1.0, 1.0));
        assert_eq!(Layout::CenterRight.normalized(), vec2(1.0, 0.5));
        assert_eq!(Layout::BottomCenter.normalized(), vec2(0.5, 1.0));
    }

    #[test]
    fn test_all_layouts_stay_in_unit_square() {
        for layout in Layout::ALL {
            let n = layout.normalized();
            assert!((0.0..=1.0).contains(&n.x), "{layout:?}");
            assert!((0.0..=1.0).contains(&n.y), "{layout:?}");
        }
    }

    #[test]
    fn test_layout_offset_scales_with_draw_size() {
        let origin = Origin::from(Layout::Center);
        let off = origin.offset(vec2(10.0, 10.0), vec2(40.0, 20.0));
        assert_eq!(off, vec2(20.0, 10.0));
    }

    #[test]
    fn test_pixel_offset_stretches_with_ratio() {
        let origin = Origin::Pixel(vec2(4.0, 2.0));
        assert_eq!(origin.offset(vec2(8.0, 8.0), vec2(8.0, 8.0)), vec2(4.0, 2.0));
        assert_eq!(origin.offset(vec2(8.0, 8.0), vec2(16.0, 4.0)), vec2(8.0, 1.0));
    }

    #[test]
    fn test_serializes_as_name() {
        let json = serde_json::to_string(&Layout::BottomCenter).unwrap();
        assert_eq!(json, "\"BottomCenter\"");
        let back: Layout = serde_json::from_str("\"CenterLeft\"").unwrap();
        assert_eq!(back, Layout::CenterLeft);
    }

    #[test]
    fn test_default_is_top_left() {
        assert_eq!(Origin::default().layout(), Some(Layout::TopLeft));
        assert_eq!(Origin::Pixel(vec2(1.0, 1.0)).layout(), None);
    }
}
