//! Configuration for the stride locomotion controller.
//!
//! Tuning parameters and simulation settings persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, validation of the
//! locomotion tuning, and forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, LocomotionConfig, SimConfig, default_config_dir};
pub use error::ConfigError;
