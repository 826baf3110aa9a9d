//! Long-lived sprite data.
//!
//! Overview
//! - `descriptor` – flat JSON description of a sprite and manifests of them
//! - `renderstats` – per-frame draw counters written by the render system
//! - `sprite` – one loaded texture with its origin, sheet grid and draw calls
//! - `spriteconfig` – INI configuration: asset directory, manifest, window
//! - `spriteregistry` – owner of all loaded sprites, deduplicated by name
pub mod descriptor;
pub mod renderstats;
pub mod sprite;
pub mod spriteconfig;
pub mod spriteregistry;
