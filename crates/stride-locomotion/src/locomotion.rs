//! The locomotion state machine: grounded/airborne velocity, jump arbitration,
//! and gravity integration.
//!
//! Mode is recomputed from the ground-contact query at the top of every step
//! and dispatched to exactly one of the two update functions. Coyote time and
//! the double jump are independent budgets: a jump inside the coyote window
//! never consumes the double jump.

use glam::{Quat, Vec2, Vec3};
use stride_config::LocomotionConfig;
use tracing::{debug, trace};

/// Vertical velocity (m/s) a grounded character is held at instead of
/// accumulating gravity, so ground contact stays stable from frame to frame.
pub const GROUND_CLAMP_VELOCITY: f32 = -3.0;

/// The two locomotion modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementMode {
    /// Resting on a supporting surface.
    Grounded,
    /// No supporting surface this frame.
    Airborne,
}

impl MovementMode {
    /// Mode implied by the ground-contact query.
    #[must_use]
    pub fn from_contact(grounded: bool) -> Self {
        if grounded {
            Self::Grounded
        } else {
            Self::Airborne
        }
    }
}

/// Which jump branch fired on a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpKind {
    /// Jump from the ground.
    Ground,
    /// Late jump inside the coyote window after leaving the ground.
    Coyote,
    /// The single mid-air jump.
    Double,
}

/// Everything the state machine reads for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// Strafe (`x`) and forward (`y`) axes, each in `[-1, 1]`.
    pub move_axis: Vec2,
    /// Jump requested this frame.
    pub jump: bool,
    /// Ground contact reported by the mover.
    pub grounded: bool,
    /// Absolute simulation time in seconds.
    pub now: f64,
    /// Frame delta in seconds.
    pub dt: f32,
    /// Rotation taking local intent (+X right, +Z forward) into world space.
    pub facing: Quat,
}

/// Result of one [`LocomotionState::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Mode the step ran in.
    pub mode: MovementMode,
    /// Jump branch that fired, if any.
    pub jump: Option<JumpKind>,
    /// Velocity after gravity and clamping.
    pub velocity: Vec3,
    /// `velocity * dt`, to be handed to the mover.
    pub displacement: Vec3,
}

/// Mutable locomotion state owned by one controller.
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionState {
    velocity: Vec3,
    coyote_deadline: f64,
    double_jump_available: bool,
    last_mode: Option<MovementMode>,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self::new()
    }
}

impl LocomotionState {
    /// At rest, with no coyote window open and no double jump until the first landing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            velocity: Vec3::ZERO,
            coyote_deadline: f64::NEG_INFINITY,
            double_jump_available: false,
            last_mode: None,
        }
    }

    /// Current velocity in m/s.
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Absolute time until which a late jump is still honored.
    #[must_use]
    pub fn coyote_deadline(&self) -> f64 {
        self.coyote_deadline
    }

    /// Whether the mid-air jump is still unspent.
    #[must_use]
    pub fn double_jump_available(&self) -> bool {
        self.double_jump_available
    }

    /// Mode of the most recent step, `None` before the first one.
    #[must_use]
    pub fn mode(&self) -> Option<MovementMode> {
        self.last_mode
    }

    /// Advances the state machine by one frame.
    pub fn step(&mut self, tuning: &LocomotionConfig, input: &FrameInput) -> StepReport {
        let mode = MovementMode::from_contact(input.grounded);
        if self.last_mode != Some(mode) {
            debug!(?mode, now = input.now, "movement mode changed");
            self.last_mode = Some(mode);
        }

        let jump = match mode {
            MovementMode::Grounded => self.grounded_update(tuning, input),
            MovementMode::Airborne => self.airborne_update(tuning, input),
        };
        if let Some(kind) = jump {
            debug!(?kind, now = input.now, "jump");
        }

        self.velocity.y -= tuning.gravity * input.dt;
        if mode == MovementMode::Grounded && self.velocity.y < 0.0 {
            self.velocity.y = GROUND_CLAMP_VELOCITY;
        }

        let displacement = self.velocity * input.dt;
        trace!(?mode, velocity = ?self.velocity, "locomotion step");

        StepReport {
            mode,
            jump,
            velocity: self.velocity,
            displacement,
        }
    }

    fn grounded_update(
        &mut self,
        tuning: &LocomotionConfig,
        input: &FrameInput,
    ) -> Option<JumpKind> {
        self.coyote_deadline = input.now + f64::from(tuning.coyote_time);
        self.double_jump_available = true;

        let local = Vec3::new(input.move_axis.x, 0.0, input.move_axis.y);
        self.velocity = input.facing * local * tuning.move_speed;

        if input.jump {
            self.velocity.y = tuning.jump_power;
            return Some(JumpKind::Ground);
        }
        None
    }

    fn airborne_update(
        &mut self,
        tuning: &LocomotionConfig,
        input: &FrameInput,
    ) -> Option<JumpKind> {
        let local = Vec3::new(
            input.move_axis.x * tuning.move_speed,
            0.0,
            input.move_axis.y * tuning.move_speed,
        );
        let horizontal = input.facing * local;
        self.velocity = Vec3::new(horizontal.x, self.velocity.y, horizontal.z);

        if !input.jump {
            return None;
        }
        if input.now < self.coyote_deadline {
            self.velocity.y = tuning.jump_power;
            Some(JumpKind::Coyote)
        } else if self.double_jump_available {
            self.velocity.y = tuning.jump_power;
            self.double_jump_available = false;
            Some(JumpKind::Double)
        } else {
            None
        }
    }
}
