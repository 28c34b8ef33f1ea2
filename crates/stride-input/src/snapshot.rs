//! The per-frame input snapshot and the source trait the controller samples.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Input state for a single frame.
///
/// `move_axis.x` strafes (positive = right), `move_axis.y` moves along the
/// facing direction (positive = forward). `look_axis` turns (positive = right).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Horizontal/vertical movement axes, each in `[-1, 1]`.
    pub move_axis: Vec2,
    /// Horizontal look axis in `[-1, 1]`.
    pub look_axis: f32,
    /// Jump was requested this frame (edge, not level).
    pub jump: bool,
}

impl InputSnapshot {
    /// Builds a snapshot, clamping every axis to `[-1, 1]`.
    #[must_use]
    pub fn new(move_axis: Vec2, look_axis: f32, jump: bool) -> Self {
        Self {
            move_axis: move_axis.clamp(Vec2::NEG_ONE, Vec2::ONE),
            look_axis: look_axis.clamp(-1.0, 1.0),
            jump,
        }
    }

    /// A snapshot with no movement, no look, and no jump.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Provider of per-frame input, injected into the controller.
pub trait InputSource {
    /// Samples the input for the current frame.
    ///
    /// Edge-triggered signals (jump) are reported once and then consumed.
    fn snapshot(&mut self) -> InputSnapshot;
}

/// Host-fed input handle.
///
/// Clones share the same state: the host keeps one clone and writes into it
/// every frame, the controller owns another and reads from it.
#[derive(Debug, Clone, Default)]
pub struct SharedInput {
    inner: Rc<RefCell<InputSnapshot>>,
}

impl SharedInput {
    /// Creates an idle shared input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole pending snapshot.
    pub fn set(&self, snapshot: InputSnapshot) {
        *self.inner.borrow_mut() =
            InputSnapshot::new(snapshot.move_axis, snapshot.look_axis, snapshot.jump);
    }

    /// Sets the movement axes, keeping look and jump.
    pub fn set_move(&self, move_axis: Vec2) {
        self.inner.borrow_mut().move_axis = move_axis.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Sets the look axis, keeping movement and jump.
    pub fn set_look(&self, look_axis: f32) {
        self.inner.borrow_mut().look_axis = look_axis.clamp(-1.0, 1.0);
    }

    /// Requests a jump for the next sample.
    pub fn press_jump(&self) {
        self.inner.borrow_mut().jump = true;
    }

    /// Returns the pending snapshot without consuming the jump edge.
    #[must_use]
    pub fn peek(&self) -> InputSnapshot {
        *self.inner.borrow()
    }
}

impl InputSource for SharedInput {
    fn snapshot(&mut self) -> InputSnapshot {
        let mut pending = self.inner.borrow_mut();
        let sampled = *pending;
        pending.jump = false;
        sampled
    }
}
