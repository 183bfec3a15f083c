use crate::sprite::{MotionConfig, SpawnConfig};

/// Scene configuration.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub spawn: SpawnConfig,
    pub motion: MotionConfig,
    /// Surface clear color behind the sprites.
    pub clear_color: wgpu::Color,
    /// Seed for the initial population; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            spawn: SpawnConfig::default(),
            motion: MotionConfig::default(),
            clear_color: wgpu::Color::TRANSPARENT,
            seed: None,
        }
    }
}
