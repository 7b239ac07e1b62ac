//! Fixed-timestep simulation clock.
//!
//! Wall-clock frame time is fed into an accumulator and drained in 60 Hz
//! steps, so orbital motion does not depend on the display refresh rate.
//! Leftover time carries into the next frame.

use std::time::Instant;
use tracing::warn;

/// Fixed simulation timestep: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame the clock will account for. Anything above this is dropped,
/// which slows the simulation instead of running a burst of catch-up steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

pub struct GameLoop {
    previous_time: Instant,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Restart frame timing from now, e.g. after a long blocking initialization.
    pub fn reset_clock(&mut self) {
        self.previous_time = Instant::now();
    }

    /// Seconds since the previous call, clamped to `[0, MAX_FRAME_TIME]`.
    pub fn measure(&mut self) -> f64 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        clamp_frame_time(frame_time)
    }

    /// Account for `frame_time` seconds, calling `update_fn(FIXED_DT, sim_time)`
    /// once per whole step. Returns the number of steps run.
    pub fn advance(&mut self, frame_time: f64, mut update_fn: impl FnMut(f64, f64)) -> u32 {
        self.accumulator += clamp_frame_time(frame_time);

        let mut steps = 0;
        while self.accumulator >= FIXED_DT {
            update_fn(FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
            steps += 1;
        }
        self.frame_count += 1;
        steps
    }

    /// Measure elapsed wall-clock time and [`advance`](Self::advance) by it.
    pub fn tick(&mut self, update_fn: impl FnMut(f64, f64)) -> u32 {
        let frame_time = self.measure();
        self.advance(frame_time, update_fn)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Simulated seconds, always a whole multiple of [`FIXED_DT`].
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_frame_time(frame_time: f64) -> f64 {
    if !frame_time.is_finite() || frame_time <= 0.0 {
        return 0.0;
    }
    if frame_time > MAX_FRAME_TIME {
        warn!(
            "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
            frame_time * 1000.0,
            MAX_FRAME_TIME * 1000.0
        );
        return MAX_FRAME_TIME;
    }
    frame_time
}
