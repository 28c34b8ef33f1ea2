//! Headless locomotion simulator.
//!
//! Loads config (creating a default `config.ron` on first run), applies CLI
//! overrides, then plays a scenario through a character controller.

use clap::Parser;
use stride_config::{CliArgs, Config, default_config_dir};
use stride_log::init_logging;
use stride_sim::{Scenario, Simulation};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(default_config_dir);
    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir)?,
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default_demo(),
    };
    let frames = args.frames.unwrap_or_else(|| scenario.total_frames());
    info!(
        scenario = %scenario.name,
        frames,
        tuning = ?config.locomotion,
        "Starting simulation"
    );

    let mut sim = Simulation::new(config, scenario)?;
    let summary = sim.run(frames);

    info!(
        ticks = summary.ticks,
        stepped = summary.stepped,
        skipped = summary.skipped,
        ground_jumps = summary.ground_jumps,
        coyote_jumps = summary.coyote_jumps,
        double_jumps = summary.double_jumps,
        landings = summary.landings,
        position = ?summary.final_position,
        yaw_deg = summary.final_yaw.to_degrees(),
        "Simulation finished after {:.2}s",
        sim.sim_time()
    );
    Ok(())
}
