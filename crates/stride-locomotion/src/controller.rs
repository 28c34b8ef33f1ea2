//! The per-frame character controller and its builder.

use stride_config::LocomotionConfig;
use stride_input::InputSource;
use tracing::{error, info, trace};

use crate::collaborators::{Activatable, Liveness, Mover};
use crate::error::ControllerError;
use crate::locomotion::{FrameInput, LocomotionState, StepReport};
use crate::orientation::Orientation;

/// What one [`CharacterController::advance`] call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// The character is not alive; nothing was simulated.
    Skipped,
    /// The state machine ran and its displacement was applied.
    Stepped(StepReport),
}

/// Assembles a [`CharacterController`], rejecting incomplete setups up front.
pub struct ControllerBuilder<M> {
    tuning: LocomotionConfig,
    mover: Option<M>,
    input: Option<Box<dyn InputSource>>,
    liveness: Option<Box<dyn Liveness>>,
    auxiliary: Vec<Box<dyn Activatable>>,
}

impl<M: Mover> ControllerBuilder<M> {
    /// Starts a builder with the given tuning.
    #[must_use]
    pub fn new(tuning: LocomotionConfig) -> Self {
        Self {
            tuning,
            mover: None,
            input: None,
            liveness: None,
            auxiliary: Vec::new(),
        }
    }

    /// Sets the mover (required).
    #[must_use]
    pub fn mover(mut self, mover: M) -> Self {
        self.mover = Some(mover);
        self
    }

    /// Sets the input source (required).
    #[must_use]
    pub fn input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    /// Sets the liveness source. Without one the character is always alive.
    #[must_use]
    pub fn liveness(mut self, liveness: impl Liveness + 'static) -> Self {
        self.liveness = Some(Box::new(liveness));
        self
    }

    /// Adds an object to deactivate while dead.
    #[must_use]
    pub fn auxiliary(mut self, object: impl Activatable + 'static) -> Self {
        self.auxiliary.push(Box::new(object));
        self
    }

    /// Validates the setup and builds the controller.
    pub fn build(self) -> Result<CharacterController<M>, ControllerError> {
        if let Err(e) = self.tuning.validate() {
            error!("Rejected locomotion tuning: {e}");
            return Err(e.into());
        }
        let Some(mover) = self.mover else {
            error!("Character controller built without a mover");
            return Err(ControllerError::MissingMover);
        };
        let Some(input) = self.input else {
            error!("Character controller built without an input source");
            return Err(ControllerError::MissingInput);
        };

        Ok(CharacterController {
            tuning: self.tuning,
            state: LocomotionState::new(),
            orientation: Orientation::default(),
            mover,
            input,
            liveness: self.liveness,
            auxiliary: self.auxiliary,
            was_alive: None,
        })
    }
}

/// Character controller evaluated once per simulation frame.
///
/// Frame order: liveness gate, ground query, input sample, locomotion step,
/// mover, then orientation.
pub struct CharacterController<M> {
    tuning: LocomotionConfig,
    state: LocomotionState,
    orientation: Orientation,
    mover: M,
    input: Box<dyn InputSource>,
    liveness: Option<Box<dyn Liveness>>,
    auxiliary: Vec<Box<dyn Activatable>>,
    was_alive: Option<bool>,
}

impl<M: Mover> CharacterController<M> {
    /// Runs one frame of `dt` seconds ending at absolute time `now`.
    pub fn advance(&mut self, dt: f32, now: f64) -> FrameOutcome {
        if !self.liveness_gate() {
            // Drain the frame's input so presses made while dead are dropped
            let _stale = self.input.snapshot();
            return FrameOutcome::Skipped;
        }

        let grounded = self.mover.is_grounded();
        let input = self.input.snapshot();
        let report = self.state.step(
            &self.tuning,
            &FrameInput {
                move_axis: input.move_axis,
                jump: input.jump,
                grounded,
                now,
                dt,
                facing: self.orientation.facing(),
            },
        );
        self.mover.move_by(report.displacement);
        self.orientation.apply_look(input.look_axis, self.tuning.turn_speed, dt);

        trace!(now, displacement = ?report.displacement, yaw = self.orientation.yaw, "frame");
        FrameOutcome::Stepped(report)
    }

    /// Syncs auxiliary objects with liveness and reports whether to simulate.
    fn liveness_gate(&mut self) -> bool {
        let alive = self.liveness.as_ref().is_none_or(|l| l.is_alive());
        if self.was_alive != Some(alive) {
            if alive {
                info!("Character alive, simulation running");
            } else {
                info!("Character dead, simulation paused");
            }
            self.was_alive = Some(alive);
        }
        for object in &mut self.auxiliary {
            object.set_active(alive);
        }
        alive
    }

    /// Locomotion state.
    #[must_use]
    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    /// Current orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Tuning the controller was built with.
    #[must_use]
    pub fn tuning(&self) -> &LocomotionConfig {
        &self.tuning
    }

    /// The mover driven by this controller.
    #[must_use]
    pub fn mover(&self) -> &M {
        &self.mover
    }
}
