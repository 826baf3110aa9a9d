//! Sprite registry.
//!
//! The registry owns every loaded [`Sprite`] and the backend they live in.
//! Loading by name is deduplicated: a name already present returns the
//! existing handle and nothing is decoded or uploaded again. Callers keep
//! [`TextureId`] handles; the registry is the only place textures are
//! released from.
//!
//! Note: the registry holds graphics resources and must stay on the render
//! thread. In an ECS world insert it with `insert_non_send_resource`.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rustc_hash::FxHashMap;

use crate::backend::{BitmapLoader, TextureBackend, TextureId};
use crate::error::Result;
use crate::math::Point2i;
use crate::origin::Origin;
use crate::resources::descriptor::{SpriteDescriptor, read_manifest, write_manifest};
use crate::resources::sprite::Sprite;

pub struct SpriteRegistry<B: TextureBackend, L: BitmapLoader> {
    backend: B,
    loader: L,
    directory: PathBuf,
    sprites: FxHashMap<TextureId, Sprite>,
    names: FxHashMap<String, TextureId>,
}

impl<B: TextureBackend, L: BitmapLoader> SpriteRegistry<B, L> {
    /// Create an empty registry resolving sprite names against `directory`.
    pub fn new(backend: B, loader: L, directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        info!("Sprite registry reading assets from {:?}", directory);
        Self {
            backend,
            loader,
            directory,
            sprites: FxHashMap::default(),
            names: FxHashMap::default(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn contains(&self, id: TextureId) -> bool {
        self.sprites.contains_key(&id)
    }

    pub fn id_of(&self, name: &str) -> Option<TextureId> {
        self.names.get(name).copied()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Sprite> {
        self.id_of(name).and_then(|id| self.sprites.get(&id))
    }

    pub fn find_by_id(&self, id: TextureId) -> Option<&Sprite> {
        self.sprites.get(&id)
    }

    /// Mutable access, e.g. to select a sheet frame.
    pub fn get_mut(&mut self, id: TextureId) -> Option<&mut Sprite> {
        self.sprites.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.values()
    }

    /// Borrow a sprite together with the backend to draw it with.
    pub fn sprite_with_backend(&mut self, id: TextureId) -> Option<(&Sprite, &mut B)> {
        let sprite = self.sprites.get(&id)?;
        Some((sprite, &mut self.backend))
    }

    /// Load `name` from the asset directory, or return the existing handle.
    pub fn load(
        &mut self,
        name: &str,
        transparent: bool,
        origin: impl Into<Origin>,
    ) -> Result<TextureId> {
        self.load_sheet(name, transparent, origin, Point2i::ONE)
    }

    /// Load `name` as a sprite sheet of `image_number` columns and rows.
    ///
    /// When `name` is already registered its handle is returned unchanged,
    /// whatever origin or grid is passed.
    pub fn load_sheet(
        &mut self,
        name: &str,
        transparent: bool,
        origin: impl Into<Origin>,
        image_number: Point2i,
    ) -> Result<TextureId> {
        if let Some(id) = self.id_of(name) {
            debug!("Sprite {name} already loaded as texture {id}");
            return Ok(id);
        }
        let sprite = Sprite::load(
            &mut self.backend,
            &self.loader,
            &self.directory,
            name,
            transparent,
            origin.into(),
            image_number,
        )?;
        info!(
            "Loaded sprite {sprite} ({}x{} per frame)",
            sprite.frame_size().x,
            sprite.frame_size().y
        );
        Ok(self.register(sprite))
    }

    pub fn load_descriptor(&mut self, descriptor: &SpriteDescriptor) -> Result<TextureId> {
        self.load_sheet(
            &descriptor.name,
            descriptor.transparent,
            descriptor.origin,
            descriptor.image_number.at_least(1),
        )
    }

    /// Load every sprite listed in a JSON manifest, in order.
    ///
    /// Stops at the first failing entry; entries loaded before it stay
    /// registered.
    pub fn load_manifest(&mut self, path: &Path) -> Result<Vec<TextureId>> {
        let descriptors = read_manifest(path)?;
        info!("Loading {} sprites from {:?}", descriptors.len(), path);
        descriptors
            .iter()
            .map(|desc| self.load_descriptor(desc))
            .collect()
    }

    /// Upload a raw pixel buffer under `name`, or return the existing handle.
    pub fn load_pixels(
        &mut self,
        name: &str,
        size: Point2i,
        pixels: &[u8],
        transparent: bool,
        origin: impl Into<Origin>,
    ) -> Result<TextureId> {
        if let Some(id) = self.id_of(name) {
            debug!("Sprite {name} already loaded as texture {id}");
            return Ok(id);
        }
        let sprite = Sprite::from_pixels(
            &mut self.backend,
            name,
            size,
            pixels,
            transparent,
            origin.into(),
        )?;
        Ok(self.register(sprite))
    }

    /// Take ownership of `sprite`.
    ///
    /// Registering a sprite whose texture is already held is a no-op. A
    /// different texture under an already registered name is released and
    /// the existing handle is returned.
    pub fn register(&mut self, sprite: Sprite) -> TextureId {
        let id = sprite.id();
        if self.sprites.contains_key(&id) {
            return id;
        }
        if let Some(existing) = self.id_of(sprite.name()) {
            warn!(
                "Sprite name {} already registered as texture {existing}; releasing texture {id}",
                sprite.name()
            );
            if let Err(e) = sprite.dispose(&mut self.backend) {
                warn!("Could not release texture {id}: {e}");
            }
            return existing;
        }
        self.names.insert(sprite.name().to_string(), id);
        self.sprites.insert(id, sprite);
        id
    }

    /// Remove a sprite from the registry.
    ///
    /// With `dispose` its texture is released; otherwise the sprite is handed
    /// back and the caller owns the texture. Unknown ids are ignored.
    pub fn unregister(&mut self, id: TextureId, dispose: bool) -> Result<Option<Sprite>> {
        let Some(sprite) = self.sprites.remove(&id) else {
            return Ok(None);
        };
        self.names.remove(sprite.name());
        if dispose {
            sprite.dispose(&mut self.backend)?;
            Ok(None)
        } else {
            Ok(Some(sprite))
        }
    }

    /// Release every registered sprite.
    ///
    /// All textures are released even if some fail; the first failure is
    /// returned.
    pub fn dispose_all(&mut self) -> Result<()> {
        let count = self.sprites.len();
        self.names.clear();
        let mut first_err = None;
        for (id, sprite) in self.sprites.drain() {
            if let Err(e) = sprite.dispose(&mut self.backend) {
                warn!("Could not release texture {id}: {e}");
                first_err.get_or_insert(e);
            }
        }
        info!("Released {count} sprites");
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Descriptors of every layout-anchored sprite, sorted by name.
    pub fn descriptors(&self) -> Vec<SpriteDescriptor> {
        let mut descs: Vec<SpriteDescriptor> =
            self.sprites.values().filter_map(Sprite::descriptor).collect();
        descs.sort_by(|a, b| a.name.cmp(&b.name));
        descs
    }

    /// Write [`descriptors`](Self::descriptors) as a JSON manifest.
    ///
    /// Returns the number of entries written. Registered sprites are left
    /// untouched whether or not the write succeeds.
    pub fn save_manifest(&self, path: &Path) -> Result<usize> {
        let descriptors = self.descriptors();
        write_manifest(path, &descriptors)?;
        info!("Wrote {} descriptors to {:?}", descriptors.len(), path);
        Ok(descriptors.len())
    }
}

impl<B: TextureBackend, L: BitmapLoader> Drop for SpriteRegistry<B, L> {
    fn drop(&mut self) {
        if !self.sprites.is_empty() {
            warn!(
                "Sprite registry dropped with {} sprites still loaded; call dispose_all first",
                self.sprites.len()
            );
        }
    }
}
