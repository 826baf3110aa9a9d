//! Sprite manager library.
//!
//! Loads bitmaps as textures, keeps one texture per sprite name and draws
//! sprites immediately: single, scaled, tinted, or tiled along a segment,
//! anchored at a configurable origin. Sprite sheets split one bitmap into a
//! grid of frames.
//!
//! - [`backend`] – texture backend and bitmap loader traits, raylib and headless implementations
//! - [`components`] – ECS draw requests drained by the render system
//! - [`error`] – [`SpriteError`](error::SpriteError) and the crate `Result`
//! - [`math`] – 2D point arithmetic
//! - [`origin`] – named anchors and pixel origins
//! - [`resources`] – sprites, the registry, descriptors and configuration
//! - [`systems`] – the ECS render system

pub mod backend;
pub mod components;
pub mod error;
pub mod math;
pub mod origin;
pub mod resources;
pub mod systems;
