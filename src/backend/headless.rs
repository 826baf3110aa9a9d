//! Window-less backend and loader.
//!
//! [`RecordingBackend`] keeps track of every texture it hands out and logs
//! each call in order, so draw output can be inspected without a GPU.
//! [`MemoryBitmapLoader`] serves bitmaps registered in memory by path.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::{Bitmap, BitmapLoader, FilterMode, PixelFormat, Quad, TextureBackend, TextureId};
use crate::error::{Result, SpriteError};

/// One call received by a [`RecordingBackend`].
#[derive(Debug, Clone)]
pub enum BackendCall {
    Create(TextureId),
    Bind(TextureId),
    Upload {
        id: TextureId,
        width: u32,
        height: u32,
        format: PixelFormat,
    },
    SetFilter {
        id: TextureId,
        min: FilterMode,
        mag: FilterMode,
    },
    Destroy(TextureId),
    /// A quad together with the texture bound when it was emitted.
    DrawQuad {
        texture: Option<TextureId>,
        quad: Quad,
    },
    SetBlend(bool),
    ResetTransform,
}

/// State of one live texture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureRecord {
    pub width: u32,
    pub height: u32,
    pub format: Option<PixelFormat>,
    pub min_filter: Option<FilterMode>,
    pub mag_filter: Option<FilterMode>,
}

/// Texture backend that records instead of rendering.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u32,
    bound: Option<TextureId>,
    textures: FxHashMap<TextureId, TextureRecord>,
    calls: Vec<BackendCall>,
    created: usize,
    fail_create: bool,
    fail_upload: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `create` fail.
    pub fn fail_creates(&mut self, fail: bool) {
        self.fail_create = fail;
    }

    /// Make every following `upload` fail.
    pub fn fail_uploads(&mut self, fail: bool) {
        self.fail_upload = fail;
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Quads drawn so far, with their bound texture.
    pub fn quads(&self) -> Vec<(Option<TextureId>, Quad)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::DrawQuad { texture, quad } => Some((*texture, *quad)),
                _ => None,
            })
            .collect()
    }

    pub fn draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, BackendCall::DrawQuad { .. }))
            .count()
    }

    /// Number of textures ever created.
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Number of textures created and not yet destroyed.
    pub fn live_count(&self) -> usize {
        self.textures.len()
    }

    pub fn is_live(&self, id: TextureId) -> bool {
        self.textures.contains_key(&id)
    }

    pub fn texture(&self, id: TextureId) -> Option<&TextureRecord> {
        self.textures.get(&id)
    }
}

impl TextureBackend for RecordingBackend {
    fn create(&mut self) -> Result<TextureId> {
        if self.fail_create {
            return Err(SpriteError::Backend("texture creation disabled".into()));
        }
        self.next_id += 1;
        let id = TextureId::new(self.next_id)
            .ok_or_else(|| SpriteError::Backend("texture ids exhausted".into()))?;
        self.textures.insert(id, TextureRecord::default());
        self.created += 1;
        self.calls.push(BackendCall::Create(id));
        Ok(id)
    }

    fn bind(&mut self, id: TextureId) {
        self.bound = Some(id);
        self.calls.push(BackendCall::Bind(id));
    }

    fn upload(
        &mut self,
        id: TextureId,
        width: u32,
        height: u32,
        format: PixelFormat,
        bytes: &[u8],
    ) -> Result<()> {
        if self.fail_upload {
            return Err(SpriteError::Backend("texture upload disabled".into()));
        }
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if bytes.len() != expected {
            return Err(SpriteError::Backend(format!(
                "upload of {} bytes into a {width}x{height} {format:?} texture",
                bytes.len()
            )));
        }
        let record = self
            .textures
            .get_mut(&id)
            .ok_or_else(|| SpriteError::Backend(format!("upload to unknown texture {id}")))?;
        record.width = width;
        record.height = height;
        record.format = Some(format);
        self.calls.push(BackendCall::Upload {
            id,
            width,
            height,
            format,
        });
        Ok(())
    }

    fn set_filter(&mut self, id: TextureId, min: FilterMode, mag: FilterMode) -> Result<()> {
        let record = self
            .textures
            .get_mut(&id)
            .ok_or_else(|| SpriteError::Backend(format!("filter on unknown texture {id}")))?;
        record.min_filter = Some(min);
        record.mag_filter = Some(mag);
        self.calls.push(BackendCall::SetFilter { id, min, mag });
        Ok(())
    }

    fn destroy(&mut self, id: TextureId) -> Result<()> {
        if self.textures.remove(&id).is_none() {
            return Err(SpriteError::DoubleFree(id));
        }
        if self.bound == Some(id) {
            self.bound = None;
        }
        self.calls.push(BackendCall::Destroy(id));
        Ok(())
    }

    fn draw_quad(&mut self, quad: &Quad) {
        self.calls.push(BackendCall::DrawQuad {
            texture: self.bound,
            quad: *quad,
        });
    }

    fn set_blend(&mut self, enabled: bool) {
        self.calls.push(BackendCall::SetBlend(enabled));
    }

    fn reset_transform(&mut self) {
        self.calls.push(BackendCall::ResetTransform);
    }
}

/// Bitmap loader backed by an in-memory table of paths.
#[derive(Debug, Default)]
pub struct MemoryBitmapLoader {
    files: FxHashMap<PathBuf, std::result::Result<Bitmap, String>>,
    decodes: Cell<usize>,
}

impl MemoryBitmapLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, bitmap: Bitmap) {
        self.files.insert(path.into(), Ok(bitmap));
    }

    /// Register a file that exists but fails to decode with `reason`.
    pub fn insert_corrupt(&mut self, path: impl Into<PathBuf>, reason: impl Into<String>) {
        self.files.insert(path.into(), Err(reason.into()));
    }

    /// Number of `decode` calls so far, successful or not.
    pub fn decode_count(&self) -> usize {
        self.decodes.get()
    }
}

impl BitmapLoader for MemoryBitmapLoader {
    fn decode(&self, path: &Path) -> Result<Bitmap> {
        self.decodes.set(self.decodes.get() + 1);
        match self.files.get(path) {
            Some(Ok(bitmap)) => Ok(bitmap.clone()),
            Some(Err(reason)) => Err(SpriteError::Decode {
                path: path.to_path_buf(),
                reason: reason.clone(),
            }),
            None => Err(SpriteError::ResourceNotFound(path.to_path_buf())),
        }
    }
}
