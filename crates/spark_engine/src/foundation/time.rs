//! Frame timing utilities
//!
//! Two clocks drive the simulation:
//!
//! - [`FrameClock`] measures real elapsed time between frames and clamps it,
//!   so a stall (breakpoint, window drag) cannot produce a runaway step.
//! - [`FixedTimestep`] converts the variable per-frame delta into constant
//!   simulation steps for logic that needs deterministic integration.

use std::time::Instant;

/// Default clamp applied to per-frame elapsed time, in seconds
pub const MAX_FRAME_DELTA: f32 = 0.125;

/// Default fixed simulation step, in seconds
pub const DEFAULT_STEP: f32 = 1.0 / 60.0;

/// Wall-clock frame timer with an elapsed-time clamp.
///
/// Call [`FrameClock::tick`] once per frame; it returns the elapsed time
/// since the previous tick, capped at the configured maximum.
pub struct FrameClock {
    last_frame: Instant,
    max_delta: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock with the default 1/8th second clamp
    pub fn new() -> Self {
        Self::with_max_delta(MAX_FRAME_DELTA)
    }

    /// Create a clock with a custom elapsed-time clamp
    pub fn with_max_delta(max_delta: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            max_delta,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance the clock and return the clamped elapsed time in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        let delta = self.clamp(elapsed);
        self.total_time += delta;
        self.frame_count += 1;
        delta
    }

    /// Apply the clamp to an externally measured elapsed time
    pub fn clamp(&self, elapsed: f32) -> f32 {
        elapsed.min(self.max_delta)
    }

    /// Total clamped time accumulated over all ticks
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Fixed-step accumulator for deterministic simulation stepping.
///
/// Incoming frame deltas are summed into an accumulator. While the
/// accumulator is below one step, [`FixedTimestep::tick`] returns `None` and
/// the caller skips its simulation for that frame. Once at least one step
/// has accumulated, exactly one step is consumed and returned; any surplus
/// stays in the accumulator for subsequent frames.
///
/// At most one step is consumed per call. There is no catch-up loop: after a
/// long stall the effective rate throttles toward the step rate instead of
/// replaying the backlog in a burst.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

impl FixedTimestep {
    /// Create an accumulator with the given step size in seconds
    pub fn new(step: f32) -> Self {
        debug_assert!(step > 0.0, "FixedTimestep step must be positive");
        Self {
            step,
            accumulator: 0.0,
        }
    }

    /// Feed `elapsed` seconds in; returns `Some(step)` if a simulation step
    /// is due this frame, `None` otherwise.
    pub fn tick(&mut self, elapsed: f32) -> Option<f32> {
        self.accumulator += elapsed;
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            Some(self.step)
        } else {
            None
        }
    }

    /// The fixed step size in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time currently banked in the accumulator
    pub fn accumulated(&self) -> f32 {
        self.accumulator
    }

    /// Discard any banked time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clock_clamps_elapsed_time() {
        let clock = FrameClock::new();
        assert_relative_eq!(clock.clamp(5.0), 0.125);
        assert_relative_eq!(clock.clamp(0.016), 0.016);
    }

    #[test]
    fn test_no_step_until_threshold() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        // Three frames summing to just under one step
        assert!(ts.tick(0.005).is_none());
        assert!(ts.tick(0.005).is_none());
        assert!(ts.tick(0.005).is_none());
        assert_relative_eq!(ts.accumulated(), 0.015);
    }

    #[test]
    fn test_exactly_one_step_per_tick() {
        let step = 1.0 / 60.0;
        let mut ts = FixedTimestep::new(step);
        // Deliver four steps worth of time in a single frame: only one step
        // fires, the rest stays banked.
        let fired = ts.tick(step * 4.0);
        assert_relative_eq!(fired.unwrap(), step);
        assert_relative_eq!(ts.accumulated(), step * 3.0, epsilon = 1e-6);

        // The surplus drains one step per subsequent call even with zero
        // elapsed time.
        assert!(ts.tick(0.0).is_some());
        assert!(ts.tick(0.0).is_some());
        assert!(ts.tick(0.0).is_some());
        assert!(ts.tick(0.0).is_none());
    }

    #[test]
    fn test_step_size_is_constant() {
        let step = 1.0 / 60.0;
        let mut ts = FixedTimestep::new(step);
        // A variable frame delta still produces the fixed step value.
        let fired = ts.tick(0.1).unwrap();
        assert_relative_eq!(fired, step);
    }

    #[test]
    fn test_reset_discards_banked_time() {
        let mut ts = FixedTimestep::new(0.5);
        assert!(ts.tick(0.4).is_none());
        ts.reset();
        assert!(ts.tick(0.4).is_none());
    }
}
