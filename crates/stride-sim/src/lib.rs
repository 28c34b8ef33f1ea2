//! Headless driver for the stride character controller.
//!
//! Feeds a scripted [`Scenario`] through a [`FixedStepLoop`] into a
//! [`CharacterController`](stride_locomotion::CharacterController) standing on a
//! [`FlatGroundMover`](stride_locomotion::FlatGroundMover).

pub mod game_loop;
pub mod scenario;
pub mod simulation;

pub use game_loop::FixedStepLoop;
pub use scenario::{LedgeSpec, Scenario, ScenarioError, ScenarioStep};
pub use simulation::{SimError, SimSummary, Simulation};
