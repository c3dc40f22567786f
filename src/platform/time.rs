//! Frame pacing
//!
//! `FixedStep` reports a constant frame time without waiting (tests,
//! headless runs). `Realtime` sleeps to the next frame boundary and reports
//! the wall-clock time that actually passed.

use std::thread;
use std::time::{Duration, Instant};

use super::FrameClock;
use crate::consts::{SIM_DT, TICK_RATE};

/// Constant dt, no waiting
#[derive(Debug, Clone, Copy)]
pub struct FixedStep {
    dt: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStep {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl FrameClock for FixedStep {
    fn next_frame(&mut self) -> f32 {
        self.dt
    }
}

/// Wall-clock pacing at a target frame rate
#[derive(Debug, Clone)]
pub struct Realtime {
    frame: Duration,
    last: Option<Instant>,
}

impl Default for Realtime {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}

impl Realtime {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            last: None,
        }
    }
}

impl FrameClock for Realtime {
    fn next_frame(&mut self) -> f32 {
        let Some(last) = self.last else {
            self.last = Some(Instant::now());
            return self.frame.as_secs_f32();
        };

        let deadline = last + self.frame;
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }

        let now = Instant::now();
        self.last = Some(now);
        now.duration_since(last).as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step_is_constant() {
        let mut clock = FixedStep::new(0.02);
        assert_eq!(clock.next_frame(), 0.02);
        assert_eq!(clock.next_frame(), 0.02);
    }

    #[test]
    fn test_realtime_waits_for_frame_boundary() {
        let mut clock = Realtime::new(100);
        clock.next_frame();
        let dt = clock.next_frame();
        assert!(dt >= 0.0099, "dt was {dt}");
    }
}
