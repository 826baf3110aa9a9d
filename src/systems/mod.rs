//! ECS systems.
//!
//! - [`render`] – draw sprite requests through the registry's backend

pub mod render;
