//! Sprite state and the per-frame motion step.
//!
//! Each sprite owns only its own kinematic fields; the only shared thing is
//! the texture it points at, which it reads and never writes.

mod spawn;
mod state;
mod update;

pub use spawn::{spawn_sprites, SpawnConfig};
pub use state::{Direction, Sprite};
pub use update::{update_sprites, MotionConfig};
