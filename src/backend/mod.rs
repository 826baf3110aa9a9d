//! Collaborators the sprite code draws and uploads through.
//!
//! Sprites never talk to a graphics API directly. Uploading pixels, filtering
//! and emitting quads go through [`TextureBackend`]; reading image files goes
//! through [`BitmapLoader`]. Two implementations ship with the crate:
//!
//! - [`raylib`] – the real thing, over raylib's C API. Needs an open window
//!   for texture work; image decoding works without one.
//! - [`headless`] – records every backend call and serves bitmaps from
//!   memory. Used by the test suite and the `--headless` run mode.

pub mod headless;
pub mod raylib;

use std::fmt;
use std::path::Path;

use ::raylib::prelude::{Color, Vector2};

use crate::error::Result;

/// Opaque handle to a backend texture resource. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u32);

impl TextureId {
    /// Wraps a raw backend handle. Zero means "not loaded" and is rejected.
    pub fn new(raw: u32) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Layout of an uploaded pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 3 bytes per pixel, blue first.
    Bgr8,
    /// 4 bytes per pixel, blue first, alpha last.
    Bgra8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Bgr8 => 3,
            PixelFormat::Bgra8 => 4,
        }
    }

    /// Format used for raw buffers: alpha only when the sprite is transparent.
    pub fn for_transparency(transparent: bool) -> Self {
        if transparent {
            PixelFormat::Bgra8
        } else {
            PixelFormat::Bgr8
        }
    }
}

/// Texture sampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

/// One textured, tinted quad.
///
/// Vertices run clockwise from the top-left corner; `tex_coords[i]` is the
/// normalized texture coordinate for `vertices[i]`.
#[derive(Debug, Clone, Copy)]
pub struct Quad {
    pub vertices: [Vector2; 4],
    pub tex_coords: [Vector2; 4],
    pub tint: Color,
}

impl Quad {
    pub fn top_left(&self) -> Vector2 {
        self.vertices[0]
    }

    pub fn size(&self) -> Vector2 {
        Vector2 {
            x: self.vertices[2].x - self.vertices[0].x,
            y: self.vertices[2].y - self.vertices[0].y,
        }
    }
}

/// Decoded image: tightly packed BGRA8 rows, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// A bitmap filled with one BGRA colour.
    pub fn solid(width: u32, height: u32, bgra: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&bgra);
        }
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// GPU texture operations used by sprites.
///
/// Every method must be called on the thread that owns the graphics context.
pub trait TextureBackend {
    /// Reserve a new texture handle.
    fn create(&mut self) -> Result<TextureId>;

    /// Make `id` the texture used by subsequent [`draw_quad`](Self::draw_quad) calls.
    fn bind(&mut self, id: TextureId);

    /// Fill `id` with pixel data. `bytes` holds `width * height` pixels of `format`.
    fn upload(
        &mut self,
        id: TextureId,
        width: u32,
        height: u32,
        format: PixelFormat,
        bytes: &[u8],
    ) -> Result<()>;

    fn set_filter(&mut self, id: TextureId, min: FilterMode, mag: FilterMode) -> Result<()>;

    /// Release `id`. Fails with [`DoubleFree`](crate::error::SpriteError::DoubleFree)
    /// for handles the backend does not hold.
    fn destroy(&mut self, id: TextureId) -> Result<()>;

    /// Emit one quad textured with the bound texture.
    fn draw_quad(&mut self, quad: &Quad);

    fn set_blend(&mut self, enabled: bool);

    /// Drop any transform left over from the previous draw.
    fn reset_transform(&mut self) {}
}

/// Image file decoding.
pub trait BitmapLoader {
    /// Decode the file at `path` into BGRA8 pixels.
    fn decode(&self, path: &Path) -> Result<Bitmap>;
}
