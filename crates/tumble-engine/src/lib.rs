//! Tumble engine crate.
//!
//! Owns the sprite transform math, the per-frame motion step, texture loading
//! and the winit + wgpu runtime that puts the result on screen.

pub mod core;
pub mod coords;
pub mod device;
pub mod logging;
pub mod render;
pub mod scene;
pub mod sprite;
pub mod texture;
pub mod time;
pub mod window;
