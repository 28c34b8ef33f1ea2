//! Command-line argument parsing for the stride simulator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// stride command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "stride-sim", about = "Headless character locomotion simulator")]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to a RON scenario file (defaults to the built-in demo).
    #[arg(long)]
    pub scenario: Option<PathBuf>,

    /// Number of fixed simulation steps to run (defaults to the scenario length).
    #[arg(long)]
    pub frames: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Horizontal move speed in m/s.
    #[arg(long)]
    pub move_speed: Option<f32>,

    /// Yaw rate in degrees per second.
    #[arg(long)]
    pub turn_speed: Option<f32>,

    /// Jump velocity in m/s.
    #[arg(long)]
    pub jump_power: Option<f32>,

    /// Gravity in m/s².
    #[arg(long)]
    pub gravity: Option<f32>,

    /// Coyote window in seconds.
    #[arg(long)]
    pub coyote_time: Option<f32>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(speed) = args.move_speed {
            self.locomotion.move_speed = speed;
        }
        if let Some(turn) = args.turn_speed {
            self.locomotion.turn_speed = turn;
        }
        if let Some(power) = args.jump_power {
            self.locomotion.jump_power = power;
        }
        if let Some(g) = args.gravity {
            self.locomotion.gravity = g;
        }
        if let Some(window) = args.coyote_time {
            self.locomotion.coyote_time = window;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            jump_power: Some(12.0),
            log_level: Some("trace".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.locomotion.jump_power, 12.0);
        assert_eq!(config.debug.log_level, "trace");
        // Non-overridden fields retain defaults
        assert_eq!(config.locomotion.gravity, 9.81);
        assert_eq!(config.locomotion.coyote_time, 0.1);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "stride-sim",
            "--frames",
            "120",
            "--coyote-time",
            "0.25",
            "--scenario",
            "ledge.ron",
        ]);
        assert_eq!(args.frames, Some(120));
        assert_eq!(args.coyote_time, Some(0.25));
        assert_eq!(args.scenario, Some(PathBuf::from("ledge.ron")));
        assert!(args.config.is_none());
    }
}
