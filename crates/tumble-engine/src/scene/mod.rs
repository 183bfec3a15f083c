//! Sprite scene: everything one animation loop owns.
//!
//! A frame is, strictly in this order:
//! 1. apply texture completions that arrived since the last frame
//! 2. populate sprites on the very first frame (the surface size is known now)
//! 3. advance every sprite by `dt`
//! 4. draw every sprite
//!
//! Steps 2-4 are skipped while the surface has no area (minimized window).
//! Steps 1-3 mutate state; step 4 only reads it. Nothing else writes to the
//! scene, so there is no locking anywhere.

mod config;

pub use config::SceneConfig;

use fastrand::Rng;
use image::RgbaImage;

use crate::coords::Viewport;
use crate::core::{App, AppControl, FrameCtx};
use crate::render::SpriteRenderer;
use crate::sprite::{spawn_sprites, update_sprites, Sprite};
use crate::texture::{TextureEvent, TextureId, TextureLoader, TextureSource, TextureStore};

/// Explicit owner of all per-scene mutable state.
pub struct SpriteScene {
    config: SceneConfig,
    rng: Rng,

    sprites: Vec<Sprite>,
    populated: bool,

    textures: TextureStore,
    loader: TextureLoader,
    pending_uploads: Vec<(TextureId, RgbaImage)>,

    renderer: SpriteRenderer,
}

impl SpriteScene {
    pub fn new(config: SceneConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };

        Self {
            config,
            rng,
            sprites: Vec::new(),
            populated: false,
            textures: TextureStore::new(),
            loader: TextureLoader::new(),
            pending_uploads: Vec::new(),
            renderer: SpriteRenderer::new(),
        }
    }

    /// Starts loading a texture; returns its placeholder id immediately.
    pub fn load_texture(&mut self, source: impl Into<TextureSource>) -> TextureId {
        self.loader.request(&mut self.textures, source)
    }

    /// Replaces the random population with a fixed one.
    pub fn set_sprites(&mut self, sprites: Vec<Sprite>) {
        self.sprites = sprites;
        self.populated = true;
    }

    #[inline]
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    #[inline]
    pub fn textures(&self) -> &TextureStore {
        &self.textures
    }

    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Applies every texture completion that has arrived.
    ///
    /// Loaded images are queued for GPU upload at the start of the next draw.
    pub fn apply_texture_events(&mut self) {
        for event in self.loader.poll() {
            self.textures.apply(&event);
            if let TextureEvent::Loaded { id, image } = event {
                self.pending_uploads.push((id, image));
            }
        }
    }

    /// Spawns the random population if nothing has been placed yet.
    pub fn populate(&mut self, bounds: Viewport) {
        if self.populated {
            return;
        }
        let ids: Vec<TextureId> = self.textures.ids().collect();
        self.sprites = spawn_sprites(&mut self.rng, &self.config.spawn, bounds, &ids);
        self.populated = true;
    }

    /// Update step: advances every sprite by `dt` seconds.
    pub fn step(&mut self, dt: f32, bounds: Viewport) {
        update_sprites(&mut self.sprites, bounds, &self.config.motion, dt);
    }

    /// Everything that happens at a frame boundary before drawing.
    ///
    /// An empty `bounds` freezes the scene: there is no edge to bounce off,
    /// so sprites hold still until the surface has area again.
    pub fn advance_frame(&mut self, dt: f32, bounds: Viewport) {
        self.apply_texture_events();
        if !bounds.is_valid() {
            return;
        }
        self.populate(bounds);
        self.step(dt, bounds);
    }
}

impl App for SpriteScene {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.advance_frame(ctx.time.dt, ctx.viewport());

        let Self {
            config,
            sprites,
            textures,
            pending_uploads,
            renderer,
            ..
        } = self;

        ctx.render(config.clear_color, |rctx, target| {
            for (id, image) in pending_uploads.drain(..) {
                renderer.upload(rctx, id, &image);
            }
            renderer.render(rctx, target, sprites, textures);
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sprite::{Direction, SpawnConfig};
    use crate::texture::TextureState;

    fn scene(count: usize) -> SpriteScene {
        SpriteScene::new(SceneConfig {
            spawn: SpawnConfig { count, ..SpawnConfig::default() },
            seed: Some(11),
            ..SceneConfig::default()
        })
    }

    #[test]
    fn textures_resolve_only_when_events_are_applied() {
        let mut s = scene(3);
        let id = s.load_texture(TextureSource::image("mem", RgbaImage::new(16, 8)));
        assert_eq!(s.textures().get(id).unwrap().state, TextureState::Pending);

        s.apply_texture_events();
        let tex = s.textures().get(id).unwrap();
        assert_eq!(tex.state, TextureState::Loaded);
        assert_eq!((tex.width, tex.height), (16, 8));
        assert_eq!(s.pending_uploads.len(), 1);
    }

    #[test]
    fn populate_runs_once() {
        let mut s = scene(4);
        s.load_texture(TextureSource::image("mem", RgbaImage::new(2, 2)));

        s.populate(Viewport::new(100.0, 100.0));
        let first = s.sprites().to_vec();
        assert_eq!(first.len(), 4);

        s.populate(Viewport::new(100.0, 100.0));
        assert_eq!(s.sprites(), first.as_slice());
    }

    #[test]
    fn injected_sprites_are_not_replaced() {
        let mut s = scene(9);
        let id = s.load_texture(TextureSource::image("mem", RgbaImage::new(2, 2)));
        s.set_sprites(vec![Sprite::new(id, Vec2::new(5.0, 5.0))]);

        s.populate(Viewport::new(100.0, 100.0));
        assert_eq!(s.sprites().len(), 1);
    }

    #[test]
    fn empty_surface_freezes_motion() {
        let mut s = scene(0);
        let id = s.load_texture(TextureSource::image("mem", RgbaImage::new(2, 2)));
        let mut sprite = Sprite::new(id, Vec2::new(400.0, 300.0));
        sprite.direction = (Direction::Positive, Direction::Negative);
        sprite.angular_velocity = 1.0;
        s.set_sprites(vec![sprite.clone()]);

        // Ten seconds of redraws while minimized.
        for _ in 0..600 {
            s.advance_frame(1.0 / 60.0, Viewport::new(0.0, 0.0));
        }
        assert_eq!(s.sprites()[0], sprite);

        // Texture completions still land while frozen.
        assert_eq!(s.textures().get(id).unwrap().state, TextureState::Loaded);

        s.advance_frame(0.5, Viewport::new(800.0, 600.0));
        assert_eq!(s.sprites()[0].position, Vec2::new(430.0, 270.0));
    }

    #[test]
    fn empty_surface_defers_population() {
        let mut s = scene(5);
        s.load_texture(TextureSource::image("mem", RgbaImage::new(2, 2)));

        s.advance_frame(0.1, Viewport::new(0.0, 0.0));
        assert!(s.sprites().is_empty());

        s.advance_frame(0.1, Viewport::new(100.0, 100.0));
        assert_eq!(s.sprites().len(), 5);
    }

    #[test]
    fn step_uses_configured_speed() {
        let mut s = scene(0);
        let id = s.load_texture(TextureSource::image("mem", RgbaImage::new(2, 2)));
        let mut sprite = Sprite::new(id, Vec2::new(50.0, 50.0));
        sprite.direction = (Direction::Negative, Direction::Positive);
        s.set_sprites(vec![sprite]);

        s.step(0.5, Viewport::new(100.0, 100.0));
        assert_eq!(s.sprites()[0].position, Vec2::new(20.0, 80.0));
    }
}
