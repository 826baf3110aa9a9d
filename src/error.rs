//! Error type shared by the sprite loader, registry and backends.

use std::path::PathBuf;

use thiserror::Error;

use crate::backend::TextureId;

/// Everything that can go wrong while loading, drawing or releasing sprites.
#[derive(Debug, Error)]
pub enum SpriteError {
    /// The asset file does not exist.
    #[error("resource not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    /// The file exists but could not be decoded into pixels.
    #[error("cannot decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    /// A raw pixel buffer does not match its declared dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    InvalidFormat { expected: usize, actual: usize },

    /// The texture backend refused to create or fill a resource.
    #[error("texture backend error: {0}")]
    Backend(String),

    /// A caller passed a value outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Releasing a handle the backend does not know about.
    #[error("texture {0} released twice or never created")]
    DoubleFree(TextureId),

    /// A sprite manifest could not be read or parsed.
    #[error("bad manifest {}: {reason}", .path.display())]
    Manifest { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, SpriteError>;
