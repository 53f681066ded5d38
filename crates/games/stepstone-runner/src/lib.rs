pub mod motion;
pub mod road;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use stepstone_core::config::{ConfigError, GameConfig};
use stepstone_core::events::{GameEvent, RunOutcome, Step};
use stepstone_core::math::Vec3;

use motion::JumpMotion;
use road::{Road, Tile};

/// Top-level game state. `End` is a declared terminal state reserved for a
/// distinct win condition; current behavior resets both outcomes to `Init`
/// and surfaces the distinction through `GameEvent::RunEnded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Init,
    Playing,
    End,
}

/// The lane-jump game controller.
///
/// Owns the road, the actor's jump motion, and the Init/Playing state
/// machine. All mutation happens in the synchronous entry points (`start`,
/// `request_step`) or in `update`; collaborators consume the drained event
/// batch each tick.
pub struct LaneRunner {
    config: GameConfig,
    state: GameState,
    road: Road,
    motion: JumpMotion,
    steps_shown: u32,
    /// Step requests are only honored while armed.
    input_armed: bool,
    /// Arming is deferred by one tick so the press that started the run
    /// cannot also register as a jump.
    arm_input_next_tick: bool,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl LaneRunner {
    /// Validate the configuration and enter `Init` with a freshly generated
    /// road. Configuration errors are fatal here and can never surface
    /// mid-jump.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut runner = Self {
            config,
            state: GameState::Init,
            road: Road::from_tiles(vec![Tile::Solid]),
            motion: JumpMotion::new(),
            steps_shown: 0,
            input_armed: false,
            arm_input_next_tick: false,
            rng: StdRng::seed_from_u64(seed),
            events: Vec::new(),
        };
        runner.enter_init();
        Ok(runner)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn road(&self) -> &Road {
        &self.road
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The actor's interpolated position.
    pub fn position(&self) -> Vec3 {
        self.motion.position()
    }

    /// Authoritative count of tiles advanced this run.
    pub fn move_index(&self) -> u32 {
        self.motion.move_index()
    }

    /// Displayed step counter, clamped to the road length.
    pub fn steps_shown(&self) -> u32 {
        self.steps_shown
    }

    /// Start a run. Silently ignored unless the game is in `Init`.
    pub fn start(&mut self) {
        if self.state != GameState::Init {
            return;
        }
        self.state = GameState::Playing;
        self.steps_shown = 0;
        self.arm_input_next_tick = true;
        tracing::debug!("run started");
        self.events.push(GameEvent::MenuVisible(false));
        self.events.push(GameEvent::StepsChanged(0));
    }

    /// Return to `Init`: fresh road, actor at the origin, menu shown.
    pub fn reset(&mut self) {
        self.enter_init();
    }

    /// Request a jump of `step` tiles. Silently rejected while not playing,
    /// while input is still disarmed, or while a jump is in flight.
    pub fn request_step(&mut self, step: Step) {
        if self.state != GameState::Playing || !self.input_armed {
            return;
        }
        if let Some(clip) = self.motion.request(step, &self.config) {
            self.events.push(GameEvent::PlayClip(clip));
        }
    }

    /// Advance the game by `dt` seconds and drain the pending events.
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.arm_input_next_tick {
            self.arm_input_next_tick = false;
            self.input_armed = true;
        }

        if self.state == GameState::Playing {
            if let Some(move_index) = self.motion.tick(dt) {
                self.events.push(GameEvent::ActorMoved(self.motion.position()));
                self.events.push(GameEvent::JumpCompleted { move_index });
                self.steps_shown = move_index.min(self.road.len());
                self.events.push(GameEvent::StepsChanged(self.steps_shown));
                if let Some(outcome) = evaluate_outcome(&self.road, move_index) {
                    tracing::debug!(?outcome, move_index, "run ended");
                    self.events.push(GameEvent::RunEnded(outcome));
                    self.enter_init();
                }
            } else if self.motion.is_jumping() {
                self.events.push(GameEvent::ActorMoved(self.motion.position()));
            }
        }

        std::mem::take(&mut self.events)
    }

    fn enter_init(&mut self) {
        self.state = GameState::Init;
        self.road = road::generate(&mut self.rng, self.config.road_length);
        // A jump may still be in flight when a reset arrives; hard-cut it.
        self.motion.reset();
        self.steps_shown = 0;
        self.input_armed = false;
        self.arm_input_next_tick = false;
        tracing::debug!(road_length = self.road.len(), "entering init");
        self.events.push(GameEvent::MenuVisible(true));
        self.events.push(GameEvent::ActorMoved(Vec3::ZERO));
        self.events.push(GameEvent::StepsChanged(0));
    }

    #[cfg(test)]
    fn set_road(&mut self, road: Road) {
        self.road = road;
    }
}

/// Outcome of landing at `move_index`: `None` keeps the run going. An index
/// past the end of the road is the run-complete boundary, not an error.
fn evaluate_outcome(road: &Road, move_index: u32) -> Option<RunOutcome> {
    match road.tile(move_index) {
        Some(Tile::Empty) => Some(RunOutcome::FellInGap),
        Some(Tile::Solid) => None,
        None => Some(RunOutcome::ReachedEnd),
    }
}
