//! Coordinate and transform types shared by the sprite model and renderers.
//!
//! Canonical CPU space:
//! - surface pixels (physical, one unit per framebuffer pixel)
//! - origin top-left
//! - +X right, +Y down
//!
//! The destination matrix maps this space to clip space; nothing else in the
//! engine knows about NDC.

pub mod transform;
mod viewport;

pub use viewport::Viewport;
