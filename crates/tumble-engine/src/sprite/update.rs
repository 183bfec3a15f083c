use crate::coords::Viewport;

use super::Sprite;

/// Motion constants shared by every sprite.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MotionConfig {
    /// Linear speed along each axis, in pixels per second.
    pub speed: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self { speed: 60.0 }
    }
}

/// Advances every sprite by `dt` seconds inside `bounds`.
///
/// Sprites are independent; the order of the slice does not matter.
pub fn update_sprites(sprites: &mut [Sprite], bounds: Viewport, motion: &MotionConfig, dt: f32) {
    for sprite in sprites.iter_mut() {
        sprite.advance(bounds, motion.speed, dt);
    }
}
