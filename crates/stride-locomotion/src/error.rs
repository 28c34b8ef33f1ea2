//! Controller setup errors.

use stride_config::ConfigError;

/// Errors raised while assembling a [`CharacterController`](crate::CharacterController).
///
/// The per-frame step itself cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// No mover was attached; the controller would have nothing to drive.
    #[error("character controller has no mover attached")]
    MissingMover,

    /// No input source was attached.
    #[error("character controller has no input source attached")]
    MissingInput,

    /// The tuning parameters failed validation.
    #[error("invalid locomotion tuning: {0}")]
    InvalidConfig(#[from] ConfigError),
}
