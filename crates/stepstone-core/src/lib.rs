pub mod collab;
pub mod config;
pub mod events;
pub mod math;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::collab::{AnimationDriver, StageView};
    use crate::events::ClipId;
    use crate::math::Vec3;

    /// Animation double with fixed clip durations and a played-clip log.
    pub struct RecordingAnimation {
        pub one_step: f32,
        pub two_step: f32,
        pub played: Vec<ClipId>,
    }

    impl RecordingAnimation {
        pub fn new(one_step: f32, two_step: f32) -> Self {
            Self {
                one_step,
                two_step,
                played: Vec::new(),
            }
        }
    }

    impl AnimationDriver for RecordingAnimation {
        fn clip_duration(&self, clip: ClipId) -> f32 {
            match clip {
                ClipId::OneStep => self.one_step,
                ClipId::TwoStep => self.two_step,
            }
        }

        fn play(&mut self, clip: ClipId) {
            self.played.push(clip);
        }
    }

    /// Stage double capturing every presentation call in order.
    #[derive(Debug, Default)]
    pub struct RecordingStage {
        pub positions: Vec<Vec3>,
        pub menu_visibility: Vec<bool>,
        pub labels: Vec<String>,
    }

    impl StageView for RecordingStage {
        fn set_actor_position(&mut self, position: Vec3) {
            self.positions.push(position);
        }

        fn set_menu_visible(&mut self, visible: bool) {
            self.menu_visibility.push(visible);
        }

        fn set_steps_label(&mut self, text: &str) {
            self.labels.push(text.to_string());
        }
    }
}
