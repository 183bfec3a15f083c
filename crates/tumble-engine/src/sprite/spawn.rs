use std::f32::consts::TAU;
use std::ops::Range;

use fastrand::Rng;
use glam::Vec2;

use crate::coords::Viewport;
use crate::texture::TextureId;

use super::{Direction, Sprite};

/// Ranges for the randomized starting population.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnConfig {
    pub count: usize,
    /// Per-axis scale, sampled independently.
    pub scale: Range<f32>,
    /// Angular speed magnitude in rad/s; the sign is a coin flip.
    pub angular_speed: Range<f32>,
    /// Source offset fraction per axis. An empty range pins the offset at `start`.
    pub source_offset: Range<f32>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            count: 9,
            scale: 0.25..0.5,
            angular_speed: 0.5..1.0,
            source_offset: 0.0..0.0,
        }
    }
}

/// Creates `config.count` sprites scattered over `bounds`.
///
/// Each sprite picks one of `textures` uniformly. Returns an empty list when
/// there are no textures to pick from.
pub fn spawn_sprites(
    rng: &mut Rng,
    config: &SpawnConfig,
    bounds: Viewport,
    textures: &[TextureId],
) -> Vec<Sprite> {
    if textures.is_empty() {
        log::warn!("no textures registered; spawning no sprites");
        return Vec::new();
    }

    let sprites: Vec<Sprite> = (0..config.count)
        .map(|_| {
            let position = Vec2::new(rng.f32() * bounds.width, rng.f32() * bounds.height);
            let texture = textures[rng.usize(..textures.len())];

            let angular_speed = sample(rng, &config.angular_speed);
            let spin = if rng.bool() { angular_speed } else { -angular_speed };

            Sprite {
                position,
                direction: (random_direction(rng), random_direction(rng)),
                scale: Vec2::new(sample(rng, &config.scale), sample(rng, &config.scale)),
                source_offset: Vec2::new(
                    sample(rng, &config.source_offset),
                    sample(rng, &config.source_offset),
                ),
                source_extent: Vec2::ONE,
                rotation: rng.f32() * TAU,
                angular_velocity: spin,
                texture,
            }
        })
        .collect();

    log::debug!("spawned {} sprites over {}x{}", sprites.len(), bounds.width, bounds.height);
    sprites
}

fn sample(rng: &mut Rng, range: &Range<f32>) -> f32 {
    range.start + rng.f32() * (range.end - range.start)
}

fn random_direction(rng: &mut Rng) -> Direction {
    if rng.bool() { Direction::Negative } else { Direction::Positive }
}
