//! Digital action tracking resolved into analog snapshots.
//!
//! [`ActionInput`] accumulates press/release events for semantic [`Action`]s
//! during a frame and answers whether an action is held or was just pressed.
//! Sampling it as an [`InputSource`] folds opposing actions
//! into axes and reports the jump edge once.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::snapshot::{InputSnapshot, InputSource};

/// Semantic locomotion actions.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Move along the facing direction.
    MoveForward,
    /// Move against the facing direction.
    MoveBack,
    /// Strafe left.
    MoveLeft,
    /// Strafe right.
    MoveRight,
    /// Yaw left.
    TurnLeft,
    /// Yaw right.
    TurnRight,
    /// Jump.
    Jump,
}

/// Tracks per-frame action state.
///
/// # Usage
///
/// 1. Forward presses and releases to [`press`](Self::press) / [`release`](Self::release).
/// 2. Query state with [`is_pressed`](Self::is_pressed) and
///    [`just_pressed`](Self::just_pressed).
/// 3. Sample via [`InputSource::snapshot`], which clears the press edges.
#[derive(Debug, Clone, Default)]
pub struct ActionInput {
    pressed: HashSet<Action>,
    just_pressed: HashSet<Action>,
}

impl ActionInput {
    /// Creates an `ActionInput` with nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press. Presses of an already-held action are repeats and ignored.
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Records a release of a held action.
    pub fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Returns `true` while the action is held.
    #[must_use]
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Returns `true` only during the frame the action transitioned to pressed.
    #[must_use]
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Clears `just_pressed`. Call at end of frame.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
    }

    /// Folds the current action state into a snapshot without clearing transients.
    #[must_use]
    pub fn resolve(&self) -> InputSnapshot {
        let axis = |positive: Action, negative: Action| -> f32 {
            f32::from(u8::from(self.is_pressed(positive)))
                - f32::from(u8::from(self.is_pressed(negative)))
        };
        InputSnapshot::new(
            Vec2::new(
                axis(Action::MoveRight, Action::MoveLeft),
                axis(Action::MoveForward, Action::MoveBack),
            ),
            axis(Action::TurnRight, Action::TurnLeft),
            self.just_pressed(Action::Jump),
        )
    }
}

impl InputSource for ActionInput {
    fn snapshot(&mut self) -> InputSnapshot {
        let snapshot = self.resolve();
        if snapshot.jump {
            tracing::trace!("jump edge sampled");
        }
        self.clear_transients();
        snapshot
    }
}
