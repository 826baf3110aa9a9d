//! Loaded sprite resource.
//!
//! A [`Sprite`] owns exactly one backend texture. It is move-only: there is
//! no `Clone`, and [`Sprite::dispose`] consumes the value, so a texture can
//! only be released once. Sprites kept in a
//! [`SpriteRegistry`](crate::resources::spriteregistry::SpriteRegistry) are
//! referred to by their [`TextureId`] and released by the registry.
//!
//! Drawing is immediate: every draw call toggles blending, binds the texture
//! and emits one quad through the backend.

use std::fmt;
use std::path::Path;

use log::{debug, warn};
use raylib::prelude::{Color, Vector2};

use crate::backend::{BitmapLoader, FilterMode, PixelFormat, Quad, TextureBackend, TextureId};
use crate::error::{Result, SpriteError};
use crate::math::{Point2i, ZERO, vec2};
use crate::origin::Origin;
use crate::resources::descriptor::SpriteDescriptor;

/// One image resource, optionally a grid of frames.
#[derive(Debug)]
pub struct Sprite {
    id: TextureId,
    name: String,
    /// Size of one frame in pixels.
    frame_size: Point2i,
    /// Size of the whole uploaded bitmap in pixels.
    texture_size: Point2i,
    origin: Origin,
    transparent: bool,
    /// Columns and rows of the sheet, (1,1) for a plain image.
    image_number: Point2i,
    /// Selected (column, row).
    image_index: Point2i,
}

impl Sprite {
    /// Decode `directory/name` and upload it as a new texture.
    ///
    /// `image_number` splits the bitmap into a grid of equally sized frames.
    /// On failure nothing stays allocated in the backend.
    pub fn load<B, L>(
        backend: &mut B,
        loader: &L,
        directory: &Path,
        name: &str,
        transparent: bool,
        origin: Origin,
        image_number: Point2i,
    ) -> Result<Self>
    where
        B: TextureBackend + ?Sized,
        L: BitmapLoader + ?Sized,
    {
        if image_number.x < 1 || image_number.y < 1 {
            return Err(SpriteError::InvalidArgument(format!(
                "sprite sheet grid must be at least 1x1, got {}x{}",
                image_number.x, image_number.y
            )));
        }

        let bitmap = loader.decode(&directory.join(name))?;
        let texture_size = checked_size(bitmap.width, bitmap.height)?;
        let frame_size = texture_size / image_number;
        if frame_size.x < 1 || frame_size.y < 1 {
            return Err(SpriteError::InvalidArgument(format!(
                "{name}: a {}x{} bitmap cannot hold a {}x{} grid",
                texture_size.x, texture_size.y, image_number.x, image_number.y
            )));
        }

        let id = create_texture(
            backend,
            bitmap.width,
            bitmap.height,
            PixelFormat::Bgra8,
            &bitmap.pixels,
        )?;
        debug!(
            "Created texture {id} for {name} ({}x{}, {}x{} frames)",
            texture_size.x, texture_size.y, image_number.x, image_number.y
        );

        Ok(Self {
            id,
            name: name.to_string(),
            frame_size,
            texture_size,
            origin,
            transparent,
            image_number,
            image_index: Point2i::default(),
        })
    }

    /// Upload a raw pixel buffer as a new texture.
    ///
    /// `pixels` must hold `size.x * size.y` pixels of BGRA8 when `transparent`
    /// and BGR8 otherwise.
    pub fn from_pixels<B>(
        backend: &mut B,
        name: &str,
        size: Point2i,
        pixels: &[u8],
        transparent: bool,
        origin: Origin,
    ) -> Result<Self>
    where
        B: TextureBackend + ?Sized,
    {
        if size.x < 1 || size.y < 1 {
            return Err(SpriteError::InvalidArgument(format!(
                "{name}: pixel buffer size must be positive, got {}x{}",
                size.x, size.y
            )));
        }
        let format = PixelFormat::for_transparency(transparent);
        let expected = size.x as usize * size.y as usize * format.bytes_per_pixel();
        if pixels.len() != expected {
            return Err(SpriteError::InvalidFormat {
                expected,
                actual: pixels.len(),
            });
        }

        let id = create_texture(backend, size.x as u32, size.y as u32, format, pixels)?;
        debug!("Created texture {id} for {name} from a {format:?} buffer");

        Ok(Self {
            id,
            name: name.to_string(),
            frame_size: size,
            texture_size: size,
            origin,
            transparent,
            image_number: Point2i::ONE,
            image_index: Point2i::default(),
        })
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Frame size as a float vector, the native draw size.
    pub fn size(&self) -> Vector2 {
        self.frame_size.to_vector2()
    }

    pub fn frame_size(&self) -> Point2i {
        self.frame_size
    }

    pub fn texture_size(&self) -> Point2i {
        self.texture_size
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Origin in pixels of the native frame.
    pub fn origin_offset(&self) -> Vector2 {
        self.origin.offset(self.size(), self.size())
    }

    pub fn transparent(&self) -> bool {
        self.transparent
    }

    pub fn image_number(&self) -> Point2i {
        self.image_number
    }

    pub fn image_index(&self) -> Point2i {
        self.image_index
    }

    pub fn frame_count(&self) -> usize {
        self.image_number.x as usize * self.image_number.y as usize
    }

    /// Row-major index of the selected frame.
    pub fn frame(&self) -> usize {
        self.image_index.y as usize * self.image_number.x as usize + self.image_index.x as usize
    }

    /// Select the frame at `column`, `row` of the sheet.
    pub fn set_image_index(&mut self, column: i32, row: i32) -> Result<()> {
        if !(0..self.image_number.x).contains(&column) || !(0..self.image_number.y).contains(&row)
        {
            return Err(SpriteError::InvalidArgument(format!(
                "{}: frame ({column}, {row}) outside a {}x{} sheet",
                self.name, self.image_number.x, self.image_number.y
            )));
        }
        self.image_index = Point2i::new(column, row);
        Ok(())
    }

    /// Select a frame by its row-major index.
    pub fn set_frame(&mut self, frame: usize) -> Result<()> {
        if frame >= self.frame_count() {
            return Err(SpriteError::InvalidArgument(format!(
                "{}: frame {frame} outside a sheet of {} frames",
                self.name,
                self.frame_count()
            )));
        }
        let columns = self.image_number.x as usize;
        self.image_index = Point2i::new((frame % columns) as i32, (frame / columns) as i32);
        Ok(())
    }

    /// Both values refer to the same backend texture.
    pub fn same_resource(&self, other: &Sprite) -> bool {
        self.id == other.id
    }

    /// Flat persistent description, available for layout-anchored sprites.
    pub fn descriptor(&self) -> Option<SpriteDescriptor> {
        let layout = self.origin.layout()?;
        Some(
            SpriteDescriptor::new(self.name.clone(), self.transparent, layout)
                .with_image_number(self.image_number),
        )
    }

    /// Release the backend texture.
    pub fn dispose<B>(self, backend: &mut B) -> Result<()>
    where
        B: TextureBackend + ?Sized,
    {
        debug!("Releasing texture {self}");
        backend.destroy(self.id)
    }

    /// Draw at native size with no tint.
    pub fn draw<B>(&self, backend: &mut B, position: Vector2) -> Result<()>
    where
        B: TextureBackend + ?Sized,
    {
        self.draw_sized(backend, position, self.size(), Color::WHITE)
    }

    /// Draw scaled uniformly by `scale` and tinted by `color`.
    pub fn draw_scaled<B>(
        &self,
        backend: &mut B,
        position: Vector2,
        scale: f32,
        color: Color,
    ) -> Result<()>
    where
        B: TextureBackend + ?Sized,
    {
        check_scale(scale)?;
        self.draw_sized(backend, position, self.size() * scale, color)
    }

    /// Draw stretched to `size` and tinted by `color`, with the origin on `position`.
    pub fn draw_sized<B>(
        &self,
        backend: &mut B,
        position: Vector2,
        size: Vector2,
        color: Color,
    ) -> Result<()>
    where
        B: TextureBackend + ?Sized,
    {
        check_size(size)?;
        let top_left = position - self.origin.offset(self.size(), size);

        backend.set_blend(color.a < 255 || self.transparent);
        backend.bind(self.id);
        backend.draw_quad(&self.quad(top_left, size, color));
        backend.set_blend(false);
        backend.reset_transform();
        Ok(())
    }

    /// Tile the sprite at native size from `start` to `end`.
    ///
    /// Returns the number of copies drawn.
    pub fn draw_repeated<B>(&self, backend: &mut B, start: Vector2, end: Vector2) -> Result<usize>
    where
        B: TextureBackend + ?Sized,
    {
        self.draw_repeated_sized(backend, start, end, self.size(), Color::WHITE)
    }

    pub fn draw_repeated_scaled<B>(
        &self,
        backend: &mut B,
        start: Vector2,
        end: Vector2,
        scale: f32,
        color: Color,
    ) -> Result<usize>
    where
        B: TextureBackend + ?Sized,
    {
        check_scale(scale)?;
        self.draw_repeated_sized(backend, start, end, self.size() * scale, color)
    }

    /// Tile copies drawn at `size` along the segment `start`..`end`.
    ///
    /// The repeat count is the length of `(end - start) / size.x` rounded
    /// half to even; copies sit at `start + step * i` for `i` in
    /// `0..=repeats`, so both ends of the segment are covered.
    pub fn draw_repeated_sized<B>(
        &self,
        backend: &mut B,
        start: Vector2,
        end: Vector2,
        size: Vector2,
        color: Color,
    ) -> Result<usize>
    where
        B: TextureBackend + ?Sized,
    {
        check_size(size)?;
        let diff = end - start;
        let repeats = repeat_count(diff, size.x);
        let step = if repeats != 0 {
            diff / repeats as f32
        } else {
            ZERO
        };

        for i in 0..=repeats {
            self.draw_sized(backend, start + step * i as f32, size, color)?;
        }
        Ok(repeats as usize + 1)
    }

    fn quad(&self, top_left: Vector2, size: Vector2, tint: Color) -> Quad {
        let tw = self.texture_size.x as f32;
        let th = self.texture_size.y as f32;
        let fw = self.frame_size.x as f32;
        let fh = self.frame_size.y as f32;
        let u0 = self.image_index.x as f32 * fw / tw;
        let v0 = self.image_index.y as f32 * fh / th;
        let u1 = u0 + fw / tw;
        let v1 = v0 + fh / th;

        Quad {
            vertices: [
                top_left,
                vec2(top_left.x + size.x, top_left.y),
                vec2(top_left.x + size.x, top_left.y + size.y),
                vec2(top_left.x, top_left.y + size.y),
            ],
            tex_coords: [vec2(u0, v0), vec2(u1, v0), vec2(u1, v1), vec2(u0, v1)],
            tint,
        }
    }
}

impl fmt::Display for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.name)
    }
}

/// Number of steps along `diff` when tiles are `width` wide.
///
/// Measured as the distance from the origin to `diff / width`. Only the
/// horizontal tile size enters, whatever the direction of the segment.
fn repeat_count(diff: Vector2, width: f32) -> u32 {
    ZERO.distance_to(diff / width).round_ties_even() as u32
}

fn check_scale(scale: f32) -> Result<()> {
    if scale > 0.0 {
        Ok(())
    } else {
        Err(SpriteError::InvalidArgument(format!(
            "draw scale must be positive, got {scale}"
        )))
    }
}

fn check_size(size: Vector2) -> Result<()> {
    if size.x > 0.0 && size.y > 0.0 {
        Ok(())
    } else {
        Err(SpriteError::InvalidArgument(format!(
            "draw size must be positive, got {}x{}",
            size.x, size.y
        )))
    }
}

fn checked_size(width: u32, height: u32) -> Result<Point2i> {
    match (i32::try_from(width), i32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok(Point2i::new(w, h)),
        _ => Err(SpriteError::InvalidArgument(format!(
            "bitmap size {width}x{height} is not usable"
        ))),
    }
}

/// Create, fill and filter a texture; destroy it again if any step fails.
fn create_texture<B>(
    backend: &mut B,
    width: u32,
    height: u32,
    format: PixelFormat,
    bytes: &[u8],
) -> Result<TextureId>
where
    B: TextureBackend + ?Sized,
{
    let id = backend.create()?;
    if let Err(e) = fill_texture(backend, id, width, height, format, bytes) {
        if let Err(release) = backend.destroy(id) {
            warn!("Could not release texture {id} after a failed upload: {release}");
        }
        return Err(e);
    }
    Ok(id)
}

fn fill_texture<B>(
    backend: &mut B,
    id: TextureId,
    width: u32,
    height: u32,
    format: PixelFormat,
    bytes: &[u8],
) -> Result<()>
where
    B: TextureBackend + ?Sized,
{
    backend.bind(id);
    backend.upload(id, width, height, format, bytes)?;
    // pixel art stays sharp: no mipmaps, no smoothing
    backend.set_filter(id, FilterMode::Nearest, FilterMode::Nearest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Bitmap;
    use crate::backend::headless::{BackendCall, MemoryBitmapLoader, RecordingBackend};
    use crate::origin::Layout;

    fn loader_with(name: &str, width: u32, height: u32) -> MemoryBitmapLoader {
        let mut loader = MemoryBitmapLoader::new();
        loader.insert(
            Path::new("assets").join(name),
            Bitmap::solid(width, height, [0, 0, 255, 255]),
        );
        loader
    }

    fn load(backend: &mut RecordingBackend, origin: Origin, w: u32, h: u32) -> Sprite {
        let loader = loader_with("box.png", w, h);
        Sprite::load(
            backend,
            &loader,
            Path::new("assets"),
            "box.png",
            false,
            origin,
            Point2i::ONE,
        )
        .unwrap()
    }

    fn top_lefts(backend: &RecordingBackend) -> Vec<Vector2> {
        backend.quads().iter().map(|(_, q)| q.top_left()).collect()
    }

    #[test]
    fn test_load_uploads_and_filters_nearest() {
        let mut backend = RecordingBackend::new();
        let sprite = load(&mut backend, Layout::TopLeft.into(), 16, 8);
        assert_eq!(sprite.size(), vec2(16.0, 8.0));
        assert_eq!(sprite.name(), "box.png");
        let record = backend.texture(sprite.id()).unwrap();
        assert_eq!((record.width, record.height), (16, 8));
        assert_eq!(record.format, Some(PixelFormat::Bgra8));
        assert_eq!(record.min_filter, Some(FilterMode::Nearest));
        assert_eq!(record.mag_filter, Some(FilterMode::Nearest));
    }

    #[test]
    fn test_center_origin_draw() {
        let mut backend = RecordingBackend::new();
        let sprite = load(&mut backend, Layout::Center.into(), 100, 100);
        sprite
            .draw_sized(&mut backend, vec2(50.0, 50.0), vec2(100.0, 100.0), Color::WHITE)
            .unwrap();
        assert_eq!(top_lefts(&backend), vec![vec2(0.0, 0.0)]);
    }

    #[test]
    fn test_top_left_origin_draw() {
        let mut backend = RecordingBackend::new();
        let sprite = load(&mut backend, Layout::TopLeft.into(), 100, 100);
        sprite
            .draw_sized(&mut backend, vec2(50.0, 50.0), vec2(100.0, 100.0), Color::WHITE)
            .unwrap();
        assert_eq!(top_lefts(&backend), vec![vec2(50.0, 50.0)]);
    }

    #[test]
    fn test_pixel_origin_scales_with_draw_size() {
        let mut backend = RecordingBackend::new();
        let sprite = load(&mut backend, Origin::Pixel(vec2(10.0, 5.0)), 20, 10);
        sprite.draw_scaled(&mut backend, vec2(100.0, 100.0), 2.0, Color::WHITE).unwrap();
        let (_, quad) = backend.quads()[0];
        assert_eq!(quad.top_left(), vec2(80.0, 90.0));
        assert_eq!(quad.size(), vec2(40.0, 20.0));
    }

    #[test]
    fn test_quad_winding_and_call_order() {
        let mut backend = RecordingBackend::new();
        let sprite = load(&mut backend, Layout::TopLeft.into(), 4, 4);
        backend.clear_calls();
        sprite.draw(&mut backend, vec2(1.0, 2.0)).unwrap();

        let calls = backend.calls();
        assert!(matches!(calls[0], BackendCall::SetBlend(false)));
        assert!(matches!(calls[1], BackendCall::Bind(id) if id == sprite.id()));
        let BackendCall::DrawQuad { texture, quad } = &calls[2] else {
            panic!("expected a quad, got {:?}", calls[2]);
        };
        assert_eq!(*texture, Some(sprite.id()));
        assert_eq!(
            quad.vertices,
            [vec2(1.0, 2.0), vec2(5.0, 2.0), vec2(5.0, 6.0), vec2(1.0, 6.0)]
        );
        assert_eq!(
            quad.tex_coords,
            [vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 1.0)]
        );
        assert!(matches!(calls[3], BackendCall::SetBlend(false)));
        assert!(matches!(calls[4], BackendCall::ResetTransform));
    }

    #[test]
    fn test_blend_enabled_for_translucent_tint() {
        let mut backend = RecordingBackend::new();
        let sprite = load(&mut backend, Layout::TopLeft.into(), 4, 4);
        backend.clear_calls();
        sprite
            .draw_scaled(&mut backend, ZERO, 1.0, Color::new(255, 255, 255, 128))
            .unwrap();
        assert!(matches!(backend.calls()[0], BackendCall::SetBlend(true)));
        let (_, quad) = backend.quads()[0];
        assert_eq!(quad.tint.a, 128);
    }

    #[test]
    fn test_blend_enabled_for_transparent_sprite() {
        let mut backend = RecordingBackend::new();
        let sprite = Sprite::from_pixels(
            &mut backend,
            "dot",
            Point2i::ONE,
            &[1, 2, 3, 4],
            true,
            Origin::default(),
        )
        .unwrap();
        backend.clear_calls();
        sprite.draw(&mut backend, ZERO).unwrap();
        assert!(matches!(backend.calls()[0], BackendCall::SetBlend(true)));
    }

    #[test]
    fn test_repeated_along_x_axis() {
        let mut backend = RecordingBackend::new();
        let sprite = load(&mut backend, Layout::TopLeft.into(), 10, 10);
        let drawn = sprite
            .draw_repeated_sized(
                &mut backend,
                ZERO,
                vec2(100.0, 0.0),
                vec2(10.0, 10.0),
                Color::WHITE,
            )
            .unwrap();
        assert_eq!(drawn, 11);
        let xs: Vec<f32> = top_lefts(&backend).iter().map(|p| p.x).collect();
        let expected: Vec<f32> = (0..=10).map(|i| i as f32 * 10.0).collect();
        assert_eq!(xs, expected);
    }

    #[test]
    fn test_repeated_zero_length_draws_once() {
        let mut backend = RecordingBackend::new();
        let sprite = load(&mut backend, Layout::TopLeft.into(), 10, 10);
        let drawn = sprite
            .draw_repeated(&mut backend, vec2(7.0, 3.0), vec2(7.0, 3.0))
            .unwrap();
        assert_eq!(drawn, 1);
        assert_eq!(top_lefts(&backend), vec![vec2(7.0, 3.0)]);
    }

    #[test]
    fn test_repeat_count_rounds_half_to_even() {
        assert_eq!(repeat_count(vec2(25.0, 0.0), 10.0), 2);
        assert_eq!(repeat_count(vec2(35.0, 0.0), 10.0), 4);
        assert_eq!(repeat_count(vec2(0.0, -30.0), 10.0), 3);
        assert_eq!(repeat_count(vec2(30.0, 40.0), 10.0), 5);
    }

    #[test]
    fn test_repeated_scaled_uses_scaled_width() {
        let mut backend = RecordingBackend::new();
        let sprite = load(&mut backend, Layout::TopLeft.into(), 10, 10);
        let drawn = sprite
            .draw_repeated_scaled(&mut backend, ZERO, vec2(0.0, 100.0), 2.0, Color::WHITE)
            .unwrap();
        assert_eq!(drawn, 6);
        let ys: Vec<f32> = top_lefts(&backend).iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn test_non_positive_arguments_fail_before_drawing() {
        let mut backend = RecordingBackend::new();
        let sprite = load(&mut backend, Layout::TopLeft.into(), 10, 10);
        backend.clear_calls();
        assert!(matches!(
            sprite.draw_scaled(&mut backend, ZERO, 0.0, Color::WHITE),
            Err(SpriteError::InvalidArgument(_))
        ));
        assert!(matches!(
            sprite.draw_sized(&mut backend, ZERO, vec2(10.0, -1.0), Color::WHITE),
            Err(SpriteError::InvalidArgument(_))
        ));
        assert!(matches!(
            sprite.draw_repeated_scaled(&mut backend, ZERO, vec2(5.0, 5.0), f32::NAN, Color::WHITE),
            Err(SpriteError::InvalidArgument(_))
        ));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_sheet_frames_select_sub_rectangle() {
        let mut backend = RecordingBackend::new();
        let loader = loader_with("sheet.png", 64, 32);
        let mut sprite = Sprite::load(
            &mut backend,
            &loader,
            Path::new("assets"),
            "sheet.png",
            true,
            Layout::TopLeft.into(),
            Point2i::new(4, 2),
        )
        .unwrap();
        assert_eq!(sprite.frame_size(), Point2i::new(16, 16));
        assert_eq!(sprite.frame_count(), 8);

        sprite.set_frame(6).unwrap();
        assert_eq!(sprite.image_index(), Point2i::new(2, 1));
        assert_eq!(sprite.frame(), 6);
        sprite.draw(&mut backend, ZERO).unwrap();
        let (_, quad) = backend.quads()[0];
        assert_eq!(quad.tex_coords[0], vec2(0.5, 0.5));
        assert_eq!(quad.tex_coords[2], vec2(0.75, 1.0));
        assert_eq!(quad.size(), vec2(16.0, 16.0));

        assert!(sprite.set_frame(8).is_err());
        assert!(sprite.set_image_index(4, 0).is_err());
        assert!(sprite.set_image_index(0, -1).is_err());
        assert_eq!(sprite.frame(), 6);
    }

    #[test]
    fn test_grid_larger_than_bitmap_is_rejected() {
        let mut backend = RecordingBackend::new();
        let loader = loader_with("tiny.png", 2, 2);
        let err = Sprite::load(
            &mut backend,
            &loader,
            Path::new("assets"),
            "tiny.png",
            false,
            Origin::default(),
            Point2i::new(4, 1),
        )
        .unwrap_err();
        assert!(matches!(err, SpriteError::InvalidArgument(_)));
        assert_eq!(backend.created_count(), 0);
    }

    #[test]
    fn test_buffer_length_mismatch() {
        let mut backend = RecordingBackend::new();
        let err = Sprite::from_pixels(
            &mut backend,
            "bad",
            Point2i::new(2, 2),
            &[0; 16],
            false,
            Origin::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SpriteError::InvalidFormat {
                expected: 12,
                actual: 16
            }
        ));
        assert_eq!(backend.created_count(), 0);
    }

    #[test]
    fn test_opaque_buffer_uploads_bgr() {
        let mut backend = RecordingBackend::new();
        let sprite = Sprite::from_pixels(
            &mut backend,
            "rgb",
            Point2i::new(2, 1),
            &[0; 6],
            false,
            Origin::default(),
        )
        .unwrap();
        assert_eq!(
            backend.texture(sprite.id()).unwrap().format,
            Some(PixelFormat::Bgr8)
        );
    }

    #[test]
    fn test_failed_upload_releases_texture() {
        let mut backend = RecordingBackend::new();
        backend.fail_uploads(true);
        let loader = loader_with("box.png", 4, 4);
        let err = Sprite::load(
            &mut backend,
            &loader,
            Path::new("assets"),
            "box.png",
            false,
            Origin::default(),
            Point2i::ONE,
        )
        .unwrap_err();
        assert!(matches!(err, SpriteError::Backend(_)));
        assert_eq!(backend.created_count(), 1);
        assert_eq!(backend.live_count(), 0);
    }

    #[test]
    fn test_identity_and_display() {
        let mut backend = RecordingBackend::new();
        let a = load(&mut backend, Layout::TopLeft.into(), 4, 4);
        let b = load(&mut backend, Layout::TopLeft.into(), 4, 4);
        assert!(a.same_resource(&a));
        assert!(!a.same_resource(&b));
        assert_eq!(a.to_string(), format!("{}:box.png", a.id()));
    }

    #[test]
    fn test_dispose_releases_texture() {
        let mut backend = RecordingBackend::new();
        let sprite = load(&mut backend, Layout::TopLeft.into(), 4, 4);
        let id = sprite.id();
        sprite.dispose(&mut backend).unwrap();
        assert!(!backend.is_live(id));
    }

    #[test]
    fn test_descriptor_only_for_layouts() {
        let mut backend = RecordingBackend::new();
        let anchored = load(&mut backend, Layout::BottomCenter.into(), 4, 4);
        let desc = anchored.descriptor().unwrap();
        assert_eq!(desc.origin, Layout::BottomCenter);
        assert_eq!(desc.image_number, Point2i::ONE);

        let pinned = load(&mut backend, Origin::Pixel(vec2(1.0, 1.0)), 4, 4);
        assert!(pinned.descriptor().is_none());
    }
}
