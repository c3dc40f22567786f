//! Fixed timestep simulation tick
//!
//! One call advances a session by exactly one frame. Spawn and difficulty
//! timing use the frame counter; score accrual and background scroll use the
//! real frame duration `dt`.

use serde::{Deserialize, Serialize};

use super::collision::{CollisionReport, resolve_collisions};
use super::spawn::spawn_tick;
use super::state::{GameEvent, SessionState, Steer};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub steer: Steer,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session is paused; nothing advanced
    Paused,
    /// Tick ran and the skier is still alive
    Running(CollisionReport),
    /// Tick ran and the last life was lost
    GameOver(CollisionReport),
}

impl TickOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, TickOutcome::GameOver(_))
    }
}

/// Advance the session by one tick
pub fn tick(state: &mut SessionState, input: &TickInput, dt: f32) -> TickOutcome {
    if state.paused {
        return TickOutcome::Paused;
    }

    let frame = state.clock.advance();
    state.elapsed_seconds = state.clock.elapsed_seconds();

    if state
        .clock
        .is_interval_boundary(DIFFICULTY_SCALE_INTERVAL_SECONDS)
    {
        state.ramp.escalate();
        state.events.push(GameEvent::DifficultyUp {
            level: state.ramp.escalations(),
            scroll_speed: state.ramp.scroll_speed(),
        });
        log::info!(
            "Difficulty increased at {}s (speed {:.2})",
            state.elapsed_seconds,
            state.ramp.scroll_speed()
        );
    }

    spawn_tick(state);

    state.skier.steer(input.steer);
    for entity in state.entities.iter_mut() {
        entity.advance();
    }
    state.entities.retain(|e| e.alive);

    let dt = dt.max(0.0);
    state.score += (POINTS_PER_SECOND * dt).floor() as u64;
    state.background_phase += state.ramp.scroll_speed() * dt * state.clock.rate() as f32;

    let report = resolve_collisions(state);

    if state.lives == 0 {
        log::info!(
            "Out of lives at frame {} (score {}, rescued {})",
            frame,
            state.score,
            state.rescued_count
        );
        TickOutcome::GameOver(report)
    } else {
        TickOutcome::Running(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use crate::sim::state::{Entity, EntityKind, ObstacleKind};

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn drop_obstacle_on_skier(state: &mut SessionState) {
        let id = state.next_entity_id();
        let mut entity = Entity::at_top(id, EntityKind::Obstacle(ObstacleKind::Rock), 0.0, 0.0);
        entity.pos = state.skier.pos;
        state.entities.push(entity);
    }

    #[test]
    fn test_tick_advances_clock() {
        let mut state = SessionState::new(Difficulty::Easy, 1);
        for _ in 0..120 {
            tick(&mut state, &idle(), SIM_DT);
        }
        assert_eq!(state.frame_count(), 120);
        assert_eq!(state.elapsed_seconds, 2);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = SessionState::new(Difficulty::Hard, 5);
        for _ in 0..100 {
            tick(&mut state, &idle(), SIM_DT);
        }
        state.score = 1234;
        let frame = state.frame_count();
        let positions: Vec<_> = state.entities.iter().map(|e| e.pos).collect();
        let skier = state.skier.pos;
        let phase = state.background_phase;

        state.paused = true;
        let input = TickInput { steer: Steer::Left };
        for _ in 0..30 {
            assert_eq!(tick(&mut state, &input, 0.5), TickOutcome::Paused);
        }

        assert_eq!(state.frame_count(), frame);
        assert_eq!(state.score, 1234);
        assert_eq!(state.skier.pos, skier);
        assert_eq!(state.background_phase, phase);
        let after: Vec<_> = state.entities.iter().map(|e| e.pos).collect();
        assert_eq!(positions, after);

        state.paused = false;
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.frame_count(), frame + 1);
    }

    #[test]
    fn test_escalates_once_per_ten_seconds() {
        let mut state = SessionState::new(Difficulty::Medium, 9);
        // Survive the whole run: nothing stays on screen long enough to hit
        for _ in 0..(TICK_RATE as u64 * 35) {
            tick(&mut state, &idle(), SIM_DT);
            state.entities.clear();
            state.lives = STARTING_LIVES;
        }
        assert_eq!(state.ramp.escalations(), 3);
        let ups = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::DifficultyUp { .. }))
            .count();
        assert_eq!(ups, 3);
    }

    #[test]
    fn test_score_accrual_uses_dt() {
        let mut state = SessionState::new(Difficulty::Easy, 2);
        tick(&mut state, &idle(), SIM_DT);
        // 10 points/s * 1/60 s floors to zero
        assert_eq!(state.score, 0);

        tick(&mut state, &idle(), 0.25);
        assert_eq!(state.score, 2);

        tick(&mut state, &idle(), 1.0);
        assert_eq!(state.score, 12);
    }

    #[test]
    fn test_background_phase_scales_with_dt() {
        let mut state = SessionState::new(Difficulty::Easy, 2);
        tick(&mut state, &idle(), SIM_DT);
        assert!((state.background_phase - 3.0).abs() < 1e-3);
        tick(&mut state, &idle(), 2.0 * SIM_DT);
        assert!((state.background_phase - 9.0).abs() < 1e-3);
    }

    #[test]
    fn test_three_hits_end_the_session() {
        let mut state = SessionState::new(Difficulty::Easy, 4);
        assert_eq!(state.lives, 3);

        drop_obstacle_on_skier(&mut state);
        assert!(!tick(&mut state, &idle(), SIM_DT).is_game_over());
        drop_obstacle_on_skier(&mut state);
        assert!(!tick(&mut state, &idle(), SIM_DT).is_game_over());
        drop_obstacle_on_skier(&mut state);
        let outcome = tick(&mut state, &idle(), SIM_DT);

        assert_eq!(state.lives, 0);
        assert!(outcome.is_game_over());
    }

    #[test]
    fn test_steering_moves_skier() {
        let mut state = SessionState::new(Difficulty::Easy, 4);
        let x0 = state.skier.pos.x;
        tick(&mut state, &TickInput { steer: Steer::Right }, SIM_DT);
        assert_eq!(state.skier.pos.x, x0 + SKIER_MOVE_SPEED);
        tick(&mut state, &TickInput { steer: Steer::Left }, SIM_DT);
        tick(&mut state, &TickInput { steer: Steer::Left }, SIM_DT);
        assert_eq!(state.skier.pos.x, x0 - SKIER_MOVE_SPEED);
    }

    #[test]
    fn test_entities_reaped_at_bottom() {
        let mut state = SessionState::new(Difficulty::Hard, 8);
        let id = state.next_entity_id();
        // Far left lane, away from the skier
        let mut flag = Entity::at_top(id, EntityKind::Flag, 30.0, 5.0);
        flag.pos.y = SCREEN_HEIGHT + flag.size.y / 2.0 - 1.0;
        state.entities.push(flag);

        tick(&mut state, &idle(), SIM_DT);

        assert!(state.entities.iter().all(|e| e.id != id));
    }

    #[test]
    fn test_determinism() {
        let mut a = SessionState::new(Difficulty::Hard, 99999);
        let mut b = SessionState::new(Difficulty::Hard, 99999);
        let inputs = [
            TickInput { steer: Steer::Left },
            TickInput::default(),
            TickInput { steer: Steer::Right },
        ];

        for i in 0..3000 {
            let input = &inputs[i % inputs.len()];
            let oa = tick(&mut a, input, SIM_DT);
            let ob = tick(&mut b, input, SIM_DT);
            assert_eq!(oa, ob);
            if oa.is_game_over() {
                break;
            }
        }

        assert_eq!(a.frame_count(), b.frame_count());
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.entities, b.entities);
    }
}
