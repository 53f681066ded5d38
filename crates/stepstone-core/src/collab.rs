//! Seams for the external collaborators the game core consumes: the
//! animation system that measures and plays jump clips, the presentation
//! layer that renders positions and UI, and the input device that maps
//! touches to step sizes.

use crate::events::{ClipId, GameEvent, Step};
use crate::math::Vec3;

/// Which touch zone the player pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSide {
    Left,
    Right,
}

impl From<InputSide> for Step {
    fn from(side: InputSide) -> Step {
        match side {
            InputSide::Left => Step::One,
            InputSide::Right => Step::Two,
        }
    }
}

/// Animation collaborator. Clip durations are measured here once at setup;
/// zero or missing durations are a fatal configuration error, caught by
/// `GameConfig::validate` before any jump can divide by them.
pub trait AnimationDriver {
    fn clip_duration(&self, clip: ClipId) -> f32;
    fn play(&mut self, clip: ClipId);
}

/// Presentation collaborator. Receives position, visibility, and label
/// updates as plain data and owns no game logic.
pub trait StageView {
    fn set_actor_position(&mut self, position: Vec3);
    fn set_menu_visible(&mut self, visible: bool);
    fn set_steps_label(&mut self, text: &str);
}

/// Route a batch of drained game events to the collaborators.
///
/// `JumpCompleted` and `RunEnded` are informational and have no collaborator
/// call; callers interested in them inspect the event batch directly.
pub fn dispatch(events: &[GameEvent], anim: &mut dyn AnimationDriver, view: &mut dyn StageView) {
    for event in events {
        match event {
            GameEvent::PlayClip(clip) => anim.play(*clip),
            GameEvent::ActorMoved(position) => view.set_actor_position(*position),
            GameEvent::StepsChanged(steps) => view.set_steps_label(&steps.to_string()),
            GameEvent::MenuVisible(visible) => view.set_menu_visible(*visible),
            GameEvent::JumpCompleted { .. } | GameEvent::RunEnded(_) => {},
        }
    }
}
