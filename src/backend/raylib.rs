//! Raylib implementations of the texture backend and bitmap loader.
//!
//! Textures are created from CPU images with `LoadTextureFromImage` and drawn
//! with `DrawTexturePro`, so the draw calls land in raylib's own batch between
//! `BeginDrawing`/`EndDrawing`.
//!
//! Note: [`RaylibBackend`] must only be used from the thread that opened the
//! window. Constructing it takes a `RaylibThread` for that reason.

use std::ffi::c_void;
use std::path::Path;

use ::raylib::RaylibThread;
use ::raylib::prelude::Image;
use ::raylib::ffi::{self, BlendMode, TextureFilter};
use log::debug;
use rustc_hash::FxHashMap;

use super::{Bitmap, BitmapLoader, FilterMode, PixelFormat, Quad, TextureBackend, TextureId};
use crate::error::{Result, SpriteError};

/// Texture backend drawing through raylib.
pub struct RaylibBackend {
    next_id: u32,
    bound: Option<TextureId>,
    // None until the first upload
    textures: FxHashMap<TextureId, Option<ffi::Texture2D>>,
    blending: bool,
}

impl RaylibBackend {
    pub fn new(_thread: &RaylibThread) -> Self {
        Self {
            next_id: 0,
            bound: None,
            textures: FxHashMap::default(),
            blending: false,
        }
    }

    fn bound_texture(&self) -> Option<ffi::Texture2D> {
        self.bound
            .and_then(|id| self.textures.get(&id).copied().flatten())
    }
}

/// Expand BGR/BGRA rows into RGBA, which every raylib GL backend accepts.
fn to_rgba(format: PixelFormat, bytes: &[u8]) -> Vec<u8> {
    let bpp = format.bytes_per_pixel();
    let mut out = Vec::with_capacity(bytes.len() / bpp * 4);
    for px in bytes.chunks_exact(bpp) {
        let alpha = if bpp == 4 { px[3] } else { 255 };
        out.extend_from_slice(&[px[2], px[1], px[0], alpha]);
    }
    out
}

impl TextureBackend for RaylibBackend {
    fn create(&mut self) -> Result<TextureId> {
        self.next_id += 1;
        let id = TextureId::new(self.next_id)
            .ok_or_else(|| SpriteError::Backend("texture ids exhausted".into()))?;
        self.textures.insert(id, None);
        Ok(id)
    }

    fn bind(&mut self, id: TextureId) {
        self.bound = Some(id);
    }

    fn upload(
        &mut self,
        id: TextureId,
        width: u32,
        height: u32,
        format: PixelFormat,
        bytes: &[u8],
    ) -> Result<()> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if bytes.len() != expected {
            return Err(SpriteError::Backend(format!(
                "upload of {} bytes into a {width}x{height} {format:?} texture",
                bytes.len()
            )));
        }
        let slot = self
            .textures
            .get_mut(&id)
            .ok_or_else(|| SpriteError::Backend(format!("upload to unknown texture {id}")))?;

        let mut rgba = to_rgba(format, bytes);
        let image = ffi::Image {
            data: rgba.as_mut_ptr() as *mut c_void,
            width: width as i32,
            height: height as i32,
            mipmaps: 1,
            format: ffi::PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8A8 as i32,
        };
        // The image memory stays owned by `rgba`; raylib copies it to the GPU.
        let texture = unsafe { ffi::LoadTextureFromImage(image) };
        if texture.id == 0 {
            return Err(SpriteError::Backend(format!(
                "raylib could not create a {width}x{height} texture"
            )));
        }
        if let Some(old) = slot.replace(texture) {
            unsafe { ffi::UnloadTexture(old) };
        }
        debug!("Uploaded texture {} as GL id {}", id, texture.id);
        Ok(())
    }

    fn set_filter(&mut self, id: TextureId, _min: FilterMode, mag: FilterMode) -> Result<()> {
        let texture = self
            .textures
            .get(&id)
            .copied()
            .flatten()
            .ok_or_else(|| SpriteError::Backend(format!("filter on empty texture {id}")))?;
        // raylib sets one filter for both minification and magnification
        let filter_value = match mag {
            FilterMode::Nearest => TextureFilter::TEXTURE_FILTER_POINT as i32,
            FilterMode::Linear => TextureFilter::TEXTURE_FILTER_BILINEAR as i32,
        };
        unsafe {
            ffi::SetTextureFilter(texture, filter_value);
        }
        Ok(())
    }

    fn destroy(&mut self, id: TextureId) -> Result<()> {
        match self.textures.remove(&id) {
            Some(Some(texture)) => unsafe { ffi::UnloadTexture(texture) },
            Some(None) => {}
            None => return Err(SpriteError::DoubleFree(id)),
        }
        if self.bound == Some(id) {
            self.bound = None;
        }
        Ok(())
    }

    fn draw_quad(&mut self, quad: &Quad) {
        let Some(texture) = self.bound_texture() else {
            return;
        };
        let tw = texture.width as f32;
        let th = texture.height as f32;
        let uv_min = quad.tex_coords[0];
        let uv_max = quad.tex_coords[2];
        let source = ffi::Rectangle {
            x: uv_min.x * tw,
            y: uv_min.y * th,
            width: (uv_max.x - uv_min.x) * tw,
            height: (uv_max.y - uv_min.y) * th,
        };
        let top_left = quad.top_left();
        let size = quad.size();
        let dest = ffi::Rectangle {
            x: top_left.x,
            y: top_left.y,
            width: size.x,
            height: size.y,
        };
        unsafe {
            ffi::DrawTexturePro(
                texture,
                source,
                dest,
                ffi::Vector2 { x: 0.0, y: 0.0 },
                0.0,
                quad.tint.into(),
            );
        }
    }

    fn set_blend(&mut self, enabled: bool) {
        // raylib alpha-blends by default; leaving blend mode just restores that,
        // which renders opaque quads identically.
        if enabled && !self.blending {
            unsafe { ffi::BeginBlendMode(BlendMode::BLEND_ALPHA as i32) };
        } else if !enabled && self.blending {
            unsafe { ffi::EndBlendMode() };
        }
        self.blending = enabled;
    }
}

/// Decodes image files with raylib's built-in loaders (PNG, BMP, TGA, ...).
///
/// Images are converted to RGBA8 on the CPU. Formats raylib cannot convert,
/// such as block-compressed DDS, fail with a decode error.
#[derive(Debug, Default, Clone, Copy)]
pub struct RaylibBitmapLoader;

impl BitmapLoader for RaylibBitmapLoader {
    fn decode(&self, path: &Path) -> Result<Bitmap> {
        if !path.is_file() {
            return Err(SpriteError::ResourceNotFound(path.to_path_buf()));
        }
        let file_name = path.to_str().ok_or_else(|| decode_error(path, "path is not valid UTF-8"))?;
        if file_name.contains('\0') {
            return Err(decode_error(path, "path contains a NUL byte"));
        }

        let mut image =
            Image::load_image(file_name).map_err(|e| decode_error(path, &e.to_string()))?;
        image.set_format(ffi::PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8A8);
        let (width, height) =
            check_converted(path, image.width(), image.height(), image.format())?;

        let colors = image.get_image_data();
        if colors.len() != width as usize * height as usize {
            return Err(decode_error(path, "pixel count does not match the image size"));
        }
        let mut pixels = Vec::with_capacity(colors.len() * 4);
        for c in colors.iter() {
            pixels.extend_from_slice(&[c.b, c.g, c.r, c.a]);
        }

        Ok(Bitmap {
            width,
            height,
            pixels,
        })
    }
}

/// Accept only a non-empty image that ended up as RGBA8.
fn check_converted(
    path: &Path,
    width: i32,
    height: i32,
    format: ffi::PixelFormat,
) -> Result<(u32, u32)> {
    if format as i32 != ffi::PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8A8 as i32 {
        return Err(decode_error(
            path,
            &format!("pixel format {format:?} cannot be converted to RGBA8"),
        ));
    }
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(decode_error(path, &format!("empty image {width}x{height}"))),
    }
}

fn decode_error(path: &Path, reason: &str) -> SpriteError {
    SpriteError::Decode {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
