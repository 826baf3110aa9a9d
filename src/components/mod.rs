//! ECS components describing what to draw this frame.
//!
//! Submodules overview:
//! - [`frameselect`] – sheet frame to show for an entity's sprite
//! - [`spriteplacement`] – draw one sprite at a position
//! - [`tiledline`] – tile a sprite along a segment
//! - [`tint`] – color modulation for a draw request
//! - [`zindex`] – draw order

pub mod frameselect;
pub mod spriteplacement;
pub mod tiledline;
pub mod tint;
pub mod zindex;
