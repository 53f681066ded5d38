use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Animation clips the actor body can play, one per step size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipId {
    OneStep,
    TwoStep,
}

impl ClipId {
    /// Clip name as known to the animation collaborator.
    pub fn name(self) -> &'static str {
        match self {
            ClipId::OneStep => "oneStep",
            ClipId::TwoStep => "twoStep",
        }
    }
}

/// A single jump of one or two tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    One,
    Two,
}

impl Step {
    /// Number of tiles this step advances.
    pub fn size(self) -> u32 {
        match self {
            Step::One => 1,
            Step::Two => 2,
        }
    }

    /// Clip the animation collaborator plays for this step.
    pub fn clip(self) -> ClipId {
        match self {
            Step::One => ClipId::OneStep,
            Step::Two => ClipId::TwoStep,
        }
    }
}

/// How a run ended. Both outcomes currently reset the game to Init; the
/// distinction is surfaced as data for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The actor landed on an Empty tile.
    FellInGap,
    /// The actor advanced past the last tile.
    ReachedEnd,
}

/// Events emitted by the game core for its collaborators, drained from the
/// controller once per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Start the named jump animation.
    PlayClip(ClipId),
    /// The actor's interpolated position changed.
    ActorMoved(Vec3),
    /// A jump ran to completion; `move_index` is the authoritative tile count.
    JumpCompleted { move_index: u32 },
    /// Displayed step counter changed (already clamped to the road length).
    StepsChanged(u32),
    /// Show or hide the start menu.
    MenuVisible(bool),
    /// The run is over and the game is resetting.
    RunEnded(RunOutcome),
}
