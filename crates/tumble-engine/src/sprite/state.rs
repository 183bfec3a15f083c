use glam::Vec2;

use crate::coords::Viewport;
use crate::render::DrawImageParams;
use crate::texture::{TextureId, TextureRef};

/// Travel direction along one axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Negative,
    Positive,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Negative => -1.0,
            Direction::Positive => 1.0,
        }
    }
}

/// Kinematic and appearance state of one sprite.
///
/// Invariants (not checked):
/// - `scale` components are positive
/// - `source_extent` components are positive
///
/// `rotation` is never normalized; it accumulates freely and only wraps
/// through the trig functions at draw time.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Top-left corner in surface pixels.
    pub position: Vec2,
    pub direction: (Direction, Direction),
    /// Multiplier on the texture's pixel size.
    pub scale: Vec2,
    /// Source origin as a fraction of the texture, in `[0, 1)`.
    pub source_offset: Vec2,
    /// Source size as a fraction of the texture; `(1, 1)` is the whole image.
    pub source_extent: Vec2,
    /// Radians.
    pub rotation: f32,
    /// Radians per second.
    pub angular_velocity: f32,
    pub texture: TextureId,
}

impl Sprite {
    /// Sprite at `position` showing the whole texture at native size.
    pub fn new(texture: TextureId, position: Vec2) -> Self {
        Self {
            position,
            direction: (Direction::Positive, Direction::Positive),
            scale: Vec2::ONE,
            source_offset: Vec2::ZERO,
            source_extent: Vec2::ONE,
            rotation: 0.0,
            angular_velocity: 0.0,
            texture,
        }
    }

    /// Advances by `dt` seconds at `speed` pixels per second.
    ///
    /// Bounce is a sign reset, not a reflection: once the position is past an
    /// edge the direction points back inside, but the position itself is not
    /// clamped and may sit outside for a frame.
    pub fn advance(&mut self, bounds: Viewport, speed: f32, dt: f32) {
        let (dx, dy) = self.direction;
        self.position.x += dx.sign() * speed * dt;
        self.position.y += dy.sign() * speed * dt;

        self.direction.0 = bounce(self.position.x, bounds.width, dx);
        self.direction.1 = bounce(self.position.y, bounds.height, dy);

        self.rotation += self.angular_velocity * dt;
    }

    /// Draw request for this sprite against its (current) texture size.
    pub fn draw_params(&self, texture: &TextureRef) -> DrawImageParams {
        let tex = texture.size();
        let dst_size = tex * self.scale;
        let src_origin = tex * self.source_offset;
        let src_size = tex * self.source_extent;

        DrawImageParams::new()
            .dst_origin(self.position.x, self.position.y)
            .dst_size(dst_size.x, dst_size.y)
            .src_origin(src_origin.x, src_origin.y)
            .src_size(src_size.x, src_size.y)
            .rotation(self.rotation)
    }
}

fn bounce(pos: f32, limit: f32, dir: Direction) -> Direction {
    if pos < 0.0 {
        Direction::Positive
    } else if pos >= limit {
        Direction::Negative
    } else {
        dir
    }
}
