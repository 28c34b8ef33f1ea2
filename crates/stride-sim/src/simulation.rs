//! Wires a scenario, a flat-ground world, and a controller into one run.

use glam::{Vec2, Vec3};
use stride_config::{Config, ConfigError};
use stride_input::SharedInput;
use stride_locomotion::{
    CharacterController, ControllerBuilder, ControllerError, FlatGroundMover, FrameOutcome,
    JumpKind, Ledge, MovementMode, SharedHealth,
};
use tracing::{debug, trace};

use crate::game_loop::FixedStepLoop;
use crate::scenario::Scenario;

/// Health a scenario character starts with.
const START_HEALTH: f32 = 100.0;

/// Errors raised while setting up a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Simulation timing is unusable.
    #[error("invalid simulation settings: {0}")]
    Config(#[from] ConfigError),

    /// The controller could not be assembled.
    #[error(transparent)]
    Controller(#[from] ControllerError),
}

/// Totals gathered over a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimSummary {
    /// Fixed frames executed.
    pub frames: u64,
    /// Host frames fed into the fixed-step loop.
    pub ticks: u64,
    /// Frames the controller simulated.
    pub stepped: u64,
    /// Frames skipped by the liveness gate.
    pub skipped: u64,
    /// Jumps from the ground.
    pub ground_jumps: u32,
    /// Late jumps inside the coyote window.
    pub coyote_jumps: u32,
    /// Mid-air jumps.
    pub double_jumps: u32,
    /// Airborne to grounded transitions.
    pub landings: u32,
    /// Character position after the last frame.
    pub final_position: Vec3,
    /// Character yaw in radians after the last frame.
    pub final_yaw: f32,
}

impl SimSummary {
    fn record_jump(&mut self, kind: JumpKind) {
        match kind {
            JumpKind::Ground => self.ground_jumps += 1,
            JumpKind::Coyote => self.coyote_jumps += 1,
            JumpKind::Double => self.double_jumps += 1,
        }
    }
}

/// A headless run of one character through a scenario.
pub struct Simulation {
    config: Config,
    scenario: Scenario,
    input: SharedInput,
    health: SharedHealth,
    controller: CharacterController<FlatGroundMover>,
    game_loop: FixedStepLoop,
}

impl Simulation {
    /// Builds the world and controller described by `config` and `scenario`.
    pub fn new(config: Config, scenario: Scenario) -> Result<Self, SimError> {
        config.sim.validate()?;

        let mut mover = FlatGroundMover::new(
            Vec3::new(0.0, config.sim.spawn_height, 0.0),
            config.sim.ground_height,
        );
        if let Some(spec) = scenario.ledge {
            mover = mover.with_ledge(Ledge {
                edge_z: spec.edge_z,
                drop: spec.drop,
            });
        }

        let input = SharedInput::new();
        let health = SharedHealth::new(START_HEALTH);
        let controller = ControllerBuilder::new(config.locomotion)
            .mover(mover)
            .input(input.clone())
            .liveness(health.clone())
            .build()?;
        let game_loop = FixedStepLoop::new(config.sim.fixed_dt, config.sim.max_frame_time);

        Ok(Self {
            config,
            scenario,
            input,
            health,
            controller,
            game_loop,
        })
    }

    /// Runs `frames` fixed steps, feeding frames of `sim.frame_time` into the loop.
    pub fn run(&mut self, frames: u64) -> SimSummary {
        let mut summary = SimSummary::default();
        let mut last_mode: Option<MovementMode> = None;
        let Self {
            config,
            scenario,
            input,
            health,
            controller,
            game_loop,
        } = self;

        while summary.frames < frames {
            game_loop.tick(config.sim.frame_time, |dt, now| {
                if summary.frames >= frames {
                    return;
                }
                let frame = summary.frames;
                match scenario.sample(frame) {
                    Some((step, first)) => {
                        input.set_move(step.move_axis);
                        input.set_look(step.look_axis);
                        if first {
                            if step.jump {
                                input.press_jump();
                            }
                            if let Some(h) = step.health {
                                debug!(frame, health = h, "scenario sets health");
                                health.set(h);
                            }
                        }
                    }
                    None => {
                        input.set_move(Vec2::ZERO);
                        input.set_look(0.0);
                    }
                }

                match controller.advance(dt as f32, now) {
                    FrameOutcome::Skipped => summary.skipped += 1,
                    FrameOutcome::Stepped(report) => {
                        summary.stepped += 1;
                        if let Some(kind) = report.jump {
                            summary.record_jump(kind);
                        }
                        if last_mode == Some(MovementMode::Airborne)
                            && report.mode == MovementMode::Grounded
                        {
                            summary.landings += 1;
                        }
                        last_mode = Some(report.mode);
                        if config.debug.log_frames {
                            trace!(
                                frame,
                                mode = ?report.mode,
                                velocity = ?report.velocity,
                                position = ?controller.mover().position(),
                                "sim frame"
                            );
                        }
                    }
                }
                summary.frames += 1;
            });
        }

        summary.ticks = game_loop.frame_count();
        summary.final_position = controller.mover().position();
        summary.final_yaw = controller.orientation().yaw;
        summary
    }

    /// The controller being driven.
    pub fn controller(&self) -> &CharacterController<FlatGroundMover> {
        &self.controller
    }

    /// Simulation time elapsed so far.
    pub fn sim_time(&self) -> f64 {
        self.game_loop.total_sim_time()
    }
}
