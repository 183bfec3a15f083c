//! GPU rendering subsystem.
//!
//! Convention:
//! - CPU geometry is in surface pixels (top-left origin, +Y down).
//! - Every draw is the unit quad transformed by a per-draw destination matrix;
//!   texcoords are the same quad transformed by a per-draw texture matrix.

mod ctx;
mod draw_image;
mod quad;
mod sprite_renderer;

pub use ctx::{RenderCtx, RenderTarget};
pub use draw_image::{DrawImage, DrawImageParams, DrawUniforms};
pub use sprite_renderer::SpriteRenderer;
