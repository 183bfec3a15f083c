use std::time::Instant;

/// Upper bound on a single step, in seconds.
///
/// A stalled or hidden window resumes with at most this much simulated time.
pub const DEFAULT_MAX_DT: f32 = 0.1;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Clamped time since the previous tick, in seconds.
    pub dt: f32,

    /// Absolute tick time in seconds since the clock origin.
    pub now: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Loop state of a [`FrameClock`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClockPhase {
    /// No tick has been observed yet.
    Idle,
    /// At least one tick has been observed; the loop is steady.
    Running,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Timestamps arrive in milliseconds, the way a display-refresh scheduler
/// reports them. Each tick computes `now = t / 1000` and
/// `dt = min(max_dt, now - last_now)`. `last_now` starts at zero, so the very
/// first tick measures from the clock origin.
///
/// There is no terminal phase: the loop ends when the host stops ticking.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    last_now: f64,
    max_dt: f64,
    frame_index: u64,
    phase: ClockPhase,
}

impl FrameClock {
    /// Creates a clock capped at [`DEFAULT_MAX_DT`].
    pub fn new() -> Self {
        Self::with_max_dt(DEFAULT_MAX_DT)
    }

    /// Creates a clock with a custom delta-time cap (seconds).
    pub fn with_max_dt(max_dt: f32) -> Self {
        debug_assert!(max_dt > 0.0);
        Self {
            origin: Instant::now(),
            last_now: 0.0,
            max_dt: max_dt as f64,
            frame_index: 0,
            phase: ClockPhase::Idle,
        }
    }

    #[inline]
    pub fn phase(&self) -> ClockPhase {
        self.phase
    }

    /// Ticks with a timestamp taken from the monotonic clock.
    pub fn tick(&mut self) -> FrameTime {
        let timestamp_ms = self.origin.elapsed().as_secs_f64() * 1000.0;
        self.tick_at(timestamp_ms)
    }

    /// Ticks with an explicit timestamp in milliseconds since the origin.
    ///
    /// Timestamps are expected to be non-decreasing; a step backwards yields
    /// `dt = 0` rather than a negative step.
    pub fn tick_at(&mut self, timestamp_ms: f64) -> FrameTime {
        let now = timestamp_ms * 0.001;
        let dt = (now - self.last_now).min(self.max_dt).max(0.0);
        self.last_now = now;

        if self.phase == ClockPhase::Idle {
            log::debug!("frame clock running (first tick at {now:.3}s)");
            self.phase = ClockPhase::Running;
        }

        let ft = FrameTime {
            dt: dt as f32,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn starts_idle_and_runs_after_first_tick() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.phase(), ClockPhase::Idle);
        clock.tick_at(16.0);
        assert_eq!(clock.phase(), ClockPhase::Running);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut clock = FrameClock::new();
        let ft = clock.tick_at(50_000.0);
        assert_close(ft.dt, 0.1);
        assert_eq!(ft.now, 50.0);
    }

    #[test]
    fn regular_ticks_report_elapsed_seconds() {
        let mut clock = FrameClock::new();
        clock.tick_at(1000.0);
        let ft = clock.tick_at(1016.0);
        assert_close(ft.dt, 0.016);
    }

    #[test]
    fn first_tick_measures_from_origin() {
        let mut clock = FrameClock::new();
        assert_close(clock.tick_at(40.0).dt, 0.04);
    }

    #[test]
    fn backwards_timestamp_yields_zero_dt() {
        let mut clock = FrameClock::new();
        clock.tick_at(500.0);
        assert_eq!(clock.tick_at(400.0).dt, 0.0);
    }

    #[test]
    fn custom_cap_is_honoured() {
        let mut clock = FrameClock::with_max_dt(0.25);
        assert_close(clock.tick_at(2000.0).dt, 0.25);
    }

    #[test]
    fn frame_index_increments() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick_at(0.0).frame_index, 0);
        assert_eq!(clock.tick_at(16.0).frame_index, 1);
        assert_eq!(clock.tick_at(32.0).frame_index, 2);
    }
}
