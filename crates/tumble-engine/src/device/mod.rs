//! GPU device and window surface.
//!
//! [`Gpu`] owns the wgpu device, queue and the window's surface, hands out
//! one [`GpuFrame`] per redraw and presents it again. Failing to create any of
//! these is fatal: `Gpu::new` returns an error and nothing is ever drawn.

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
