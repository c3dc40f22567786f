//! Runtime difficulty ramp
//!
//! Seeded from an immutable preset, then tightened on a fixed schedule for the
//! rest of the session. Speed has no ceiling.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::DifficultySettings;

/// Mutable difficulty state for one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyController {
    scroll_speed: f32,
    obstacle_interval: u32,
    flag_interval: u32,
    rescue_interval: u32,
    escalations: u32,
}

impl DifficultyController {
    pub fn new(preset: &DifficultySettings) -> Self {
        Self {
            scroll_speed: preset.scroll_speed,
            obstacle_interval: preset.obstacle_interval.max(MIN_OBSTACLE_INTERVAL),
            flag_interval: preset.flag_interval.max(MIN_FLAG_INTERVAL),
            rescue_interval: RESCUE_BASE_INTERVAL,
            escalations: 0,
        }
    }

    /// One step up the ramp: faster scroll, tighter spawn cadences
    pub fn escalate(&mut self) {
        self.scroll_speed *= SCROLL_SPEED_MULTIPLIER;
        self.obstacle_interval = shrink(self.obstacle_interval, MIN_OBSTACLE_INTERVAL);
        self.flag_interval = shrink(self.flag_interval, MIN_FLAG_INTERVAL);
        self.rescue_interval = shrink(self.rescue_interval, MIN_RESCUE_INTERVAL);
        self.escalations += 1;

        log::debug!(
            "Difficulty up (#{}): speed={:.2} obstacle={} flag={} rescue={}",
            self.escalations,
            self.scroll_speed,
            self.obstacle_interval,
            self.flag_interval,
            self.rescue_interval
        );
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    pub fn obstacle_interval(&self) -> u32 {
        self.obstacle_interval
    }

    pub fn flag_interval(&self) -> u32 {
        self.flag_interval
    }

    pub fn rescue_interval(&self) -> u32 {
        self.rescue_interval
    }

    /// Escalations applied so far this session
    pub fn escalations(&self) -> u32 {
        self.escalations
    }
}

fn shrink(interval: u32, floor: u32) -> u32 {
    ((interval as f32 * SPAWN_INTERVAL_MULTIPLIER) as u32).max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;

    #[test]
    fn test_seeded_from_preset() {
        let ctl = DifficultyController::new(Difficulty::Easy.preset());
        assert_eq!(ctl.scroll_speed(), 3.0);
        assert_eq!(ctl.obstacle_interval(), 70);
        assert_eq!(ctl.flag_interval(), 110);
        assert_eq!(ctl.rescue_interval(), RESCUE_BASE_INTERVAL);
        assert_eq!(ctl.escalations(), 0);
    }

    #[test]
    fn test_single_escalation_values() {
        let mut ctl = DifficultyController::new(Difficulty::Medium.preset());
        ctl.escalate();
        assert!((ctl.scroll_speed() - 4.2).abs() < 1e-4);
        // int(55 * 0.93) = 51, int(90 * 0.93) = 83, int(480 * 0.93) = 446
        assert_eq!(ctl.obstacle_interval(), 51);
        assert_eq!(ctl.flag_interval(), 83);
        assert_eq!(ctl.rescue_interval(), 446);
    }

    #[test]
    fn test_escalation_is_monotonic_and_floored() {
        for difficulty in Difficulty::ALL {
            let mut ctl = DifficultyController::new(difficulty.preset());
            for _ in 0..200 {
                let before = ctl;
                ctl.escalate();
                assert!(ctl.scroll_speed() > before.scroll_speed());
                assert!(ctl.obstacle_interval() <= before.obstacle_interval());
                assert!(ctl.flag_interval() <= before.flag_interval());
                assert!(ctl.rescue_interval() <= before.rescue_interval());
                assert!(ctl.obstacle_interval() >= MIN_OBSTACLE_INTERVAL);
                assert!(ctl.flag_interval() >= MIN_FLAG_INTERVAL);
                assert!(ctl.rescue_interval() >= MIN_RESCUE_INTERVAL);
            }
            assert_eq!(ctl.obstacle_interval(), MIN_OBSTACLE_INTERVAL);
            assert_eq!(ctl.flag_interval(), MIN_FLAG_INTERVAL);
            assert_eq!(ctl.rescue_interval(), MIN_RESCUE_INTERVAL);
        }
    }
}
