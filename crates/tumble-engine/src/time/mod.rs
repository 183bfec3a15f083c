//! Time subsystem.
//!
//! Turns host frame timestamps into clamped delta times. Intended usage:
//! - one `FrameClock` per render loop
//! - call `tick()` (or `tick_at()` with an explicit timestamp) once per frame

mod frame_clock;

pub use frame_clock::{ClockPhase, FrameClock, FrameTime, DEFAULT_MAX_DT};
