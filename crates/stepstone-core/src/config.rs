use serde::{Deserialize, Serialize};

use crate::collab::AnimationDriver;
use crate::events::{ClipId, Step};

/// Default number of tiles in a generated road.
pub const DEFAULT_ROAD_LENGTH: u32 = 50;
/// Default tile size in world units.
pub const DEFAULT_TILE_SIZE: f32 = 40.0;

/// Measured clip durations in seconds, one per step size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct StepDurations {
    pub one: f32,
    pub two: f32,
}

impl Default for StepDurations {
    fn default() -> Self {
        Self { one: 0.1, two: 0.2 }
    }
}

/// Top-level game configuration, loadable from TOML. Fully enumerated and
/// validated once at startup; nothing here changes mid-run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of tiles in a generated road. Must be at least 1.
    pub road_length: u32,
    /// Tile size in world units along the lane axis.
    pub tile_size: f32,
    /// Jump clip durations; jump speed divides by these.
    pub step_durations: StepDurations,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            road_length: DEFAULT_ROAD_LENGTH,
            tile_size: DEFAULT_TILE_SIZE,
            step_durations: StepDurations::default(),
        }
    }
}

/// Fatal configuration error, reported at setup and never mid-jump.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Road length below the minimum of 1.
    RoadLength(u32),
    /// Tile size is zero, negative, or not finite.
    TileSize(f32),
    /// Clip duration is zero, negative, or not finite.
    ClipDuration(ClipId, f32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoadLength(len) => write!(f, "road_length must be >= 1, got {len}"),
            Self::TileSize(size) => write!(f, "tile_size must be finite and > 0, got {size}"),
            Self::ClipDuration(clip, d) => {
                write!(
                    f,
                    "clip {:?} duration must be finite and > 0, got {d}",
                    clip.name()
                )
            },
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is
    /// missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("STEPSTONE_CONFIG")
            .unwrap_or_else(|_| "config/stepstone.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<GameConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    GameConfig::default()
                },
            },
            Err(_) => GameConfig::default(),
        }
    }

    /// Replace the configured durations with ones measured from the
    /// animation collaborator. Call `validate` afterwards; a clip the
    /// collaborator reports as zero-length must fail setup.
    pub fn with_measured_durations(mut self, anim: &dyn AnimationDriver) -> Self {
        self.step_durations = StepDurations {
            one: anim.clip_duration(ClipId::OneStep),
            two: anim.clip_duration(ClipId::TwoStep),
        };
        self
    }

    /// Validate once at startup. Jump speed is `step * tile_size / duration`,
    /// so non-positive durations must be rejected here, not at tick time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.road_length < 1 {
            return Err(ConfigError::RoadLength(self.road_length));
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(ConfigError::TileSize(self.tile_size));
        }
        for (clip, duration) in [
            (ClipId::OneStep, self.step_durations.one),
            (ClipId::TwoStep, self.step_durations.two),
        ] {
            if !duration.is_finite() || duration <= 0.0 {
                return Err(ConfigError::ClipDuration(clip, duration));
            }
        }
        Ok(())
    }

    /// Clip duration for a step.
    pub fn duration_for(&self, step: Step) -> f32 {
        match step {
            Step::One => self.step_durations.one,
            Step::Two => self.step_durations.two,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::RecordingAnimation;

    #[test]
    fn defaults_are_valid() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.road_length, 50);
        assert_eq!(cfg.tile_size, 40.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_road_length_rejected() {
        let cfg = GameConfig {
            road_length: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::RoadLength(0)));
    }

    #[test]
    fn zero_clip_duration_rejected() {
        let cfg = GameConfig {
            step_durations: StepDurations { one: 0.1, two: 0.0 },
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ClipDuration(ClipId::TwoStep, 0.0))
        );
    }

    #[test]
    fn non_finite_values_rejected() {
        let cfg = GameConfig {
            tile_size: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::TileSize(_))));

        let cfg = GameConfig {
            step_durations: StepDurations {
                one: f32::INFINITY,
                two: 0.2,
            },
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ClipDuration(ClipId::OneStep, _))
        ));
    }

    #[test]
    fn measured_durations_come_from_animation() {
        let anim = RecordingAnimation::new(0.4, 0.8);
        let cfg = GameConfig::default().with_measured_durations(&anim);
        assert_eq!(cfg.duration_for(Step::One), 0.4);
        assert_eq!(cfg.duration_for(Step::Two), 0.8);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn measured_zero_duration_fails_validation() {
        let anim = RecordingAnimation::new(0.4, 0.0);
        let cfg = GameConfig::default().with_measured_durations(&anim);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: GameConfig = toml::from_str("road_length = 5").unwrap();
        assert_eq!(cfg.road_length, 5);
        assert_eq!(cfg.tile_size, DEFAULT_TILE_SIZE);
    }

    #[test]
    fn full_toml_parses() {
        let cfg: GameConfig = toml::from_str(
            r#"
            road_length = 12
            tile_size = 32.0

            [step_durations]
            one = 0.3
            two = 0.6
            "#,
        )
        .unwrap();
        assert_eq!(cfg.road_length, 12);
        assert_eq!(cfg.tile_size, 32.0);
        assert_eq!(cfg.duration_for(Step::Two), 0.6);
        assert!(cfg.validate().is_ok());
    }
}
