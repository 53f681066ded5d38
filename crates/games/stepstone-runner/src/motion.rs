use serde::{Deserialize, Serialize};

use stepstone_core::config::GameConfig;
use stepstone_core::events::{ClipId, Step};
use stepstone_core::math::Vec3;

/// Interpolation state for the actor's jump.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum MotionState {
    Idle,
    Jumping {
        step: Step,
        target: Vec3,
        elapsed: f32,
        duration: f32,
        speed: f32,
    },
}

/// Per-actor jump state machine.
///
/// A step request becomes a timed linear interpolation along the lane axis;
/// `tick` advances it and reports the move index when the jump lands. The
/// machine returns to `Idle` after every jump, ready for the next request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JumpMotion {
    state: MotionState,
    position: Vec3,
    move_index: u32,
}

impl JumpMotion {
    pub fn new() -> Self {
        Self {
            state: MotionState::Idle,
            position: Vec3::ZERO,
            move_index: 0,
        }
    }

    /// Interpolated position. Converges exactly to
    /// `move_index * tile_size` on the lane axis when the jump lands.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Authoritative count of tiles advanced. Advances at request time,
    /// not at completion.
    pub fn move_index(&self) -> u32 {
        self.move_index
    }

    pub fn is_jumping(&self) -> bool {
        !matches!(self.state, MotionState::Idle)
    }

    /// Accept a step request, returning the clip to play, or `None` if a
    /// jump is already in flight. Extra taps mid-jump are dropped, never
    /// queued.
    pub fn request(&mut self, step: Step, config: &GameConfig) -> Option<ClipId> {
        if self.is_jumping() {
            return None;
        }
        let duration = config.duration_for(step);
        let distance = step.size() as f32 * config.tile_size;
        self.state = MotionState::Jumping {
            step,
            target: self.position + Vec3::new(distance, 0.0, 0.0),
            elapsed: 0.0,
            duration,
            speed: distance / duration,
        };
        // The counter the outcome check reads advances now, so a rejected
        // extra tap can never desync it from the jump in flight.
        self.move_index += step.size();
        Some(step.clip())
    }

    /// Advance an in-flight jump by `dt` seconds. Returns the move index
    /// when the jump completes, `None` otherwise.
    pub fn tick(&mut self, dt: f32) -> Option<u32> {
        match self.state {
            MotionState::Idle => None,
            MotionState::Jumping {
                step,
                target,
                elapsed,
                duration,
                speed,
            } => {
                let elapsed = elapsed + dt;
                if elapsed > duration {
                    // Snap to the exact target so incremental interpolation
                    // drift never accumulates across jumps.
                    self.position = target;
                    self.state = MotionState::Idle;
                    tracing::debug!(move_index = self.move_index, "jump complete");
                    Some(self.move_index)
                } else {
                    self.position.x += speed * dt;
                    self.state = MotionState::Jumping {
                        step,
                        target,
                        elapsed,
                        duration,
                        speed,
                    };
                    None
                }
            },
        }
    }

    /// Hard cut back to the origin: `Idle`, zero position, zero move index.
    /// Safe to call while a jump is in flight.
    pub fn reset(&mut self) {
        self.state = MotionState::Idle;
        self.position = Vec3::ZERO;
        self.move_index = 0;
    }
}

impl Default for JumpMotion {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepstone_core::config::StepDurations;

    fn test_config() -> GameConfig {
        GameConfig {
            tile_size: 40.0,
            step_durations: StepDurations { one: 0.2, two: 0.4 },
            ..Default::default()
        }
    }

    #[test]
    fn request_computes_speed_from_clip_duration() {
        // step 2, duration 0.4s, tile 40 -> 200 units/s
        let config = test_config();
        let mut motion = JumpMotion::new();
        assert_eq!(motion.request(Step::Two, &config), Some(ClipId::TwoStep));

        motion.tick(0.1);
        let expected = 200.0_f32 * 0.1;
        assert!((motion.position().x - expected).abs() < 1e-4);
    }

    #[test]
    fn move_index_advances_at_request_time() {
        let config = test_config();
        let mut motion = JumpMotion::new();
        motion.request(Step::Two, &config);
        assert_eq!(motion.move_index(), 2, "before any tick");
        assert!(motion.is_jumping());
    }

    #[test]
    fn completion_snaps_to_exact_target() {
        let config = test_config();
        let mut motion = JumpMotion::new();
        motion.request(Step::Two, &config);

        // Uneven ticks so incremental interpolation would drift.
        assert_eq!(motion.tick(0.13), None);
        assert_eq!(motion.tick(0.17), None);
        assert_eq!(motion.tick(0.2), Some(2));

        assert_eq!(motion.position().x, 80.0, "zero residual error");
        assert!(!motion.is_jumping());
    }

    #[test]
    fn request_while_jumping_is_dropped() {
        let config = test_config();
        let mut motion = JumpMotion::new();
        motion.request(Step::One, &config);

        assert_eq!(motion.request(Step::Two, &config), None);
        assert_eq!(motion.move_index(), 1, "rejected request must not count");

        // The original jump runs to its own target, not the rejected one's.
        assert_eq!(motion.tick(0.25), Some(1));
        assert_eq!(motion.position().x, 40.0);
    }

    #[test]
    fn reentrant_across_jumps() {
        let config = test_config();
        let mut motion = JumpMotion::new();

        motion.request(Step::One, &config);
        assert_eq!(motion.tick(0.25), Some(1));

        motion.request(Step::Two, &config);
        assert_eq!(motion.tick(0.45), Some(3));
        assert_eq!(motion.position().x, 120.0);
    }

    #[test]
    fn idle_tick_is_a_no_op() {
        let mut motion = JumpMotion::new();
        assert_eq!(motion.tick(1.0), None);
        assert_eq!(motion.position(), Vec3::ZERO);
    }

    #[test]
    fn inflight_snapshot_json_roundtrip() {
        let config = test_config();
        let mut motion = JumpMotion::new();
        motion.request(Step::Two, &config);
        motion.tick(0.1);

        let json = serde_json::to_string(&motion).unwrap();
        let mut back: JumpMotion = serde_json::from_str(&json).unwrap();

        assert_eq!(back.position(), motion.position());
        assert_eq!(back.move_index(), 2);
        // The restored jump finishes exactly where the original would.
        assert_eq!(back.tick(0.35), Some(2));
        assert_eq!(back.position().x, 80.0);
    }

    #[test]
    fn reset_cuts_an_inflight_jump() {
        let config = test_config();
        let mut motion = JumpMotion::new();
        motion.request(Step::Two, &config);
        motion.tick(0.1);

        motion.reset();

        assert!(!motion.is_jumping());
        assert_eq!(motion.move_index(), 0);
        assert_eq!(motion.position(), Vec3::ZERO);
        // And it accepts the next request immediately.
        assert_eq!(motion.request(Step::One, &config), Some(ClipId::OneStep));
    }
}
