//! Input abstraction: per-frame snapshots of movement, look, and jump input.
//!
//! The controller never reads global input state. It is handed an
//! [`InputSource`] at construction and samples one [`InputSnapshot`] per frame.

pub mod action;
pub mod snapshot;

pub use action::{Action, ActionInput};
pub use snapshot::{InputSnapshot, InputSource, SharedInput};
