//! External collaborators the controller drives or consults each frame.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;

/// Applies displacements and resolves collisions against the world.
///
/// The mover is the sole writer of the character's world position.
pub trait Mover {
    /// Ground contact as of the last applied move.
    fn is_grounded(&self) -> bool;

    /// Applies a displacement for this frame, updating ground contact.
    fn move_by(&mut self, displacement: Vec3);
}

/// Health source gating whether the simulation runs.
pub trait Liveness {
    /// Current health value.
    fn health(&self) -> f32;

    /// Alive while health is above zero.
    fn is_alive(&self) -> bool {
        self.health() > 0.0
    }
}

/// An externally owned object switched off while the character is dead.
pub trait Activatable {
    /// Activates or deactivates the object.
    fn set_active(&mut self, active: bool);
}

/// Shared health value. Clones observe and mutate the same value.
#[derive(Debug, Clone)]
pub struct SharedHealth(Rc<Cell<f32>>);

impl SharedHealth {
    /// Creates a health value starting at `initial`.
    #[must_use]
    pub fn new(initial: f32) -> Self {
        Self(Rc::new(Cell::new(initial)))
    }

    /// Overwrites the health value.
    pub fn set(&self, health: f32) {
        self.0.set(health);
    }

    /// Subtracts `amount` from the health value.
    pub fn damage(&self, amount: f32) {
        self.0.set(self.0.get() - amount);
    }
}

impl Liveness for SharedHealth {
    fn health(&self) -> f32 {
        self.0.get()
    }
}

/// Shared on/off flag standing in for an externally owned object.
///
/// The owner keeps one clone and hands another to the controller.
#[derive(Debug, Clone, Default)]
pub struct ActiveFlag(Rc<Cell<bool>>);

impl ActiveFlag {
    /// Creates a flag in the given state.
    #[must_use]
    pub fn new(active: bool) -> Self {
        Self(Rc::new(Cell::new(active)))
    }

    /// Current state.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.0.get()
    }
}

impl Activatable for ActiveFlag {
    fn set_active(&mut self, active: bool) {
        self.0.set(active);
    }
}
