//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Character tuning parameters.
    pub locomotion: LocomotionConfig,
    /// Headless simulation driver settings.
    pub sim: SimConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Tuning parameters for one character controller.
///
/// Immutable once handed to a controller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Horizontal speed in m/s at full axis deflection.
    pub move_speed: f32,
    /// Yaw rate in degrees per second at full look deflection.
    pub turn_speed: f32,
    /// Upward velocity in m/s applied by any jump.
    pub jump_power: f32,
    /// Downward acceleration in m/s².
    pub gravity: f32,
    /// Seconds after leaving the ground during which a jump is still honored.
    pub coyote_time: f32,
}

/// Settings for the headless frame driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed simulation step in seconds.
    pub fixed_dt: f64,
    /// Simulated render frame time fed into the accumulator.
    pub frame_time: f64,
    /// Maximum frame time before clamping.
    pub max_frame_time: f64,
    /// Height at which the character spawns.
    pub spawn_height: f32,
    /// Height of the flat ground plane.
    pub ground_height: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Emit a trace event for every simulated frame.
    pub log_frames: bool,
}

// --- Default implementations ---

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            turn_speed: 60.0,
            jump_power: 8.0,
            gravity: 9.81,
            coyote_time: 0.1,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            frame_time: 1.0 / 144.0,
            max_frame_time: 0.25,
            spawn_height: 0.0,
            ground_height: 0.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_frames: false,
        }
    }
}

impl LocomotionConfig {
    /// Rejects tuning values a controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("move_speed", self.move_speed),
            ("turn_speed", self.turn_speed),
            ("jump_power", self.jump_power),
            ("gravity", self.gravity),
            ("coyote_time", self.coyote_time),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }
        if self.move_speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "move_speed",
                reason: "must not be negative",
            });
        }
        if self.jump_power <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "jump_power",
                reason: "must be positive",
            });
        }
        if self.gravity < 0.0 {
            return Err(ConfigError::Invalid {
                field: "gravity",
                reason: "must not be negative",
            });
        }
        if self.coyote_time < 0.0 {
            return Err(ConfigError::Invalid {
                field: "coyote_time",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}

/// Smallest `frame_time` accepted, as a fraction of `fixed_dt`.
const MIN_FRAME_TIME_RATIO: f64 = 1e-3;

impl SimConfig {
    /// Rejects timing values the fixed-step loop cannot make progress with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(ConfigError::Invalid {
                field: "fixed_dt",
                reason: "must be positive",
            });
        }
        if !(self.frame_time.is_finite() && self.frame_time > 0.0) {
            return Err(ConfigError::Invalid {
                field: "frame_time",
                reason: "must be positive",
            });
        }
        if self.frame_time < self.fixed_dt * MIN_FRAME_TIME_RATIO {
            return Err(ConfigError::Invalid {
                field: "frame_time",
                reason: "must be at least 1/1000 of fixed_dt",
            });
        }
        if self.max_frame_time.is_nan() || self.max_frame_time < self.fixed_dt {
            return Err(ConfigError::Invalid {
                field: "max_frame_time",
                reason: "must be at least fixed_dt",
            });
        }
        Ok(())
    }
}

/// Platform config directory for stride, e.g. `~/.config/stride` on Linux.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stride"))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(2))
                .unwrap();
        assert!(ron_str.contains("jump_power: 8.0"));
        assert!(ron_str.contains("coyote_time: 0.1"));
    }

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(LocomotionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_missing_field_uses_default() {
        let ron_str = "(locomotion: (jump_power: 12.0))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.locomotion.jump_power, 12.0);
        assert_eq!(config.locomotion.gravity, 9.81);
        assert_eq!(config.sim, SimConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.locomotion.move_speed = 4.5;
        config.sim.spawn_height = 3.0;
        config.debug.log_level = "debug".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.locomotion.gravity = 20.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().locomotion.gravity, 20.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let tuning = LocomotionConfig {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Invalid {
                field: "gravity",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_jump_power() {
        let tuning = LocomotionConfig {
            jump_power: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Invalid {
                field: "jump_power",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_coyote_time() {
        let tuning = LocomotionConfig {
            coyote_time: -0.1,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_default_sim_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_sim_rejects_zero_step() {
        let sim = SimConfig {
            fixed_dt: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            sim.validate(),
            Err(ConfigError::Invalid {
                field: "fixed_dt",
                ..
            })
        ));
    }

    #[test]
    fn test_sim_rejects_vanishing_frame_time() {
        let sim = SimConfig {
            frame_time: 1e-300,
            ..Default::default()
        };
        assert!(matches!(
            sim.validate(),
            Err(ConfigError::Invalid {
                field: "frame_time",
                ..
            })
        ));

        let sim = SimConfig {
            frame_time: SimConfig::default().fixed_dt * MIN_FRAME_TIME_RATIO,
            ..Default::default()
        };
        assert!(sim.validate().is_ok());
    }

    #[test]
    fn test_zero_coyote_time_is_allowed() {
        let tuning = LocomotionConfig {
            coyote_time: 0.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_ok());
    }
}
