use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use image::{Rgba, RgbaImage};

use tumble_engine::device::GpuInit;
use tumble_engine::logging::{init_logging, LoggingConfig};
use tumble_engine::scene::{SceneConfig, SpriteScene};
use tumble_engine::sprite::{MotionConfig, SpawnConfig};
use tumble_engine::texture::TextureSource;
use tumble_engine::window::{Runtime, RuntimeConfig};

/// Bouncing, spinning sprites.
#[derive(Debug, Parser)]
#[command(name = "tumble", version)]
struct Args {
    /// Images to draw. A generated checkerboard is used when none are given.
    images: Vec<PathBuf>,

    /// Number of sprites.
    #[arg(long, default_value_t = 9)]
    count: usize,

    /// Linear speed in pixels per second.
    #[arg(long, default_value_t = 60.0)]
    speed: f32,

    /// Seed for the starting layout.
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter, e.g. "debug" or "tumble_engine=trace".
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(match args.log {
        Some(filter) => LoggingConfig::with_filter(filter),
        None => LoggingConfig::default(),
    });

    let mut scene = SpriteScene::new(SceneConfig {
        spawn: SpawnConfig {
            count: args.count,
            ..SpawnConfig::default()
        },
        motion: MotionConfig { speed: args.speed },
        seed: args.seed,
        ..SceneConfig::default()
    });

    if args.images.is_empty() {
        scene.load_texture(TextureSource::image("checkerboard", checkerboard(128, 16)));
    } else {
        for path in args.images {
            scene.load_texture(path);
        }
    }

    log::info!("starting with {} texture(s)", scene.textures().len());

    Runtime::run(
        RuntimeConfig {
            title: "tumble".to_string(),
            ..RuntimeConfig::default()
        },
        GpuInit::default(),
        scene,
    )
}

/// Square two-tone checkerboard, `size` pixels wide with `cell`-pixel squares.
fn checkerboard(size: u32, cell: u32) -> RgbaImage {
    const LIGHT: Rgba<u8> = Rgba([0xf2, 0xc1, 0x4e, 0xff]);
    const DARK: Rgba<u8> = Rgba([0x2b, 0x2d, 0x42, 0xff]);

    RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 { LIGHT } else { DARK }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates_cells() {
        let img = checkerboard(32, 8);
        assert_eq!(img.dimensions(), (32, 32));
        assert_ne!(img.get_pixel(0, 0), img.get_pixel(8, 0));
        assert_eq!(img.get_pixel(0, 0), img.get_pixel(8, 8));
    }

    #[test]
    fn args_default_to_nine_sprites() {
        let args = Args::parse_from(["tumble"]);
        assert_eq!(args.count, 9);
        assert_eq!(args.speed, 60.0);
        assert!(args.images.is_empty());
    }
}
