//! Fixed-timestep simulation clock
//!
//! Spawn cadence and the difficulty ramp key off the frame counter, never
//! wall time, so schedules replay identically under frame-rate jitter.

use serde::{Deserialize, Serialize};

/// Frame counter for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimClock {
    rate: u32,
    frame_count: u64,
}

impl SimClock {
    /// Clock at frame 0 ticking `rate` times per simulated second
    pub fn new(rate: u32) -> Self {
        Self {
            rate: rate.max(1),
            frame_count: 0,
        }
    }

    /// Advance one tick, returning the new frame count
    pub fn advance(&mut self) -> u64 {
        self.frame_count += 1;
        self.frame_count
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whole simulated seconds elapsed (integer division)
    pub fn elapsed_seconds(&self) -> u64 {
        self.frame_count / self.rate as u64
    }

    /// True on the first tick of each simulated second
    pub fn is_second_boundary(&self) -> bool {
        self.frame_count > 0 && self.frame_count.is_multiple_of(self.rate as u64)
    }

    /// True exactly once per `interval_secs` boundary (never at t = 0)
    pub fn is_interval_boundary(&self, interval_secs: u64) -> bool {
        let secs = self.elapsed_seconds();
        interval_secs > 0
            && secs > 0
            && secs.is_multiple_of(interval_secs)
            && self.is_second_boundary()
    }

    /// True when `frame_count` is a multiple of `interval` ticks
    pub fn on_cadence(&self, interval: u32) -> bool {
        interval > 0 && self.frame_count.is_multiple_of(interval as u64)
    }
}
