//! Per-frame character locomotion: grounded/airborne movement, gravity,
//! coyote-time jumps, and a single double jump.
//!
//! [`CharacterController`] is passive. An external frame loop calls
//! [`CharacterController::advance`] once per tick; the controller samples its
//! injected input, steps the [`LocomotionState`] machine, and hands the
//! resulting displacement to its [`Mover`], which owns collision resolution.

pub mod collaborators;
pub mod controller;
pub mod error;
pub mod flat_ground;
pub mod locomotion;
pub mod orientation;

pub use collaborators::{ActiveFlag, Activatable, Liveness, Mover, SharedHealth};
pub use controller::{CharacterController, ControllerBuilder, FrameOutcome};
pub use error::ControllerError;
pub use flat_ground::{FlatGroundMover, Ledge};
pub use locomotion::{
    FrameInput, GROUND_CLAMP_VELOCITY, JumpKind, LocomotionState, MovementMode, StepReport,
};
pub use orientation::Orientation;
