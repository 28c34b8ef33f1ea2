//! Reference mover: a character resting on a horizontal ground plane.
//!
//! Resolves only the vertical axis: anything below the supporting height is
//! pushed back up onto it and reported as grounded. An optional [`Ledge`]
//! lowers the ground beyond a line so walking off an edge can be simulated.
//! There are no walls, slopes, or ceilings.

use glam::Vec3;

use crate::collaborators::Mover;

/// A drop in the ground plane for `z > edge_z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ledge {
    /// World Z beyond which the ground is lower.
    pub edge_z: f32,
    /// How far the ground drops past the edge.
    pub drop: f32,
}

/// Kinematic mover over a flat plane.
#[derive(Debug, Clone)]
pub struct FlatGroundMover {
    position: Vec3,
    ground_height: f32,
    ledge: Option<Ledge>,
    grounded: bool,
    moves: u64,
}

impl FlatGroundMover {
    /// Places the character at `position` above a plane at `ground_height`.
    ///
    /// A start position at or below the plane snaps onto it and starts grounded.
    #[must_use]
    pub fn new(position: Vec3, ground_height: f32) -> Self {
        let mut mover = Self {
            position,
            ground_height,
            ledge: None,
            grounded: false,
            moves: 0,
        };
        mover.resolve();
        mover
    }

    /// Adds a ledge to the plane.
    #[must_use]
    pub fn with_ledge(mut self, ledge: Ledge) -> Self {
        self.ledge = Some(ledge);
        self.resolve();
        self
    }

    /// Current world position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Number of displacements applied so far.
    #[must_use]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Ground height under `position`.
    #[must_use]
    pub fn support_height(&self, position: Vec3) -> f32 {
        match self.ledge {
            Some(ledge) if position.z > ledge.edge_z => self.ground_height - ledge.drop,
            _ => self.ground_height,
        }
    }

    fn resolve(&mut self) {
        let support = self.support_height(self.position);
        if self.position.y <= support {
            self.position.y = support;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }
}

impl Mover for FlatGroundMover {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn move_by(&mut self, displacement: Vec3) {
        self.position += displacement;
        self.moves += 1;
        self.resolve();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_on_ground_is_grounded() {
        let mover = FlatGroundMover::new(Vec3::ZERO, 0.0);
        assert!(mover.is_grounded());
    }

    #[test]
    fn test_spawn_below_ground_snaps_up() {
        let mover = FlatGroundMover::new(Vec3::new(1.0, -2.0, 0.0), 0.0);
        assert_eq!(mover.position(), Vec3::new(1.0, 0.0, 0.0));
        assert!(mover.is_grounded());
    }

    #[test]
    fn test_spawn_above_ground_is_airborne() {
        let mover = FlatGroundMover::new(Vec3::new(0.0, 5.0, 0.0), 0.0);
        assert!(!mover.is_grounded());
    }

    #[test]
    fn test_downward_push_keeps_contact() {
        let mut mover = FlatGroundMover::new(Vec3::ZERO, 0.0);
        mover.move_by(Vec3::new(0.1, -0.05, 0.0));
        assert!(mover.is_grounded());
        assert_eq!(mover.position().y, 0.0);
        assert_eq!(mover.position().x, 0.1);
    }

    #[test]
    fn test_upward_move_leaves_ground() {
        let mut mover = FlatGroundMover::new(Vec3::ZERO, 0.0);
        mover.move_by(Vec3::new(0.0, 0.1, 0.0));
        assert!(!mover.is_grounded());
        assert_eq!(mover.moves(), 1);
    }

    #[test]
    fn test_walking_off_ledge_loses_contact() {
        let mut mover = FlatGroundMover::new(Vec3::ZERO, 0.0).with_ledge(Ledge {
            edge_z: 1.0,
            drop: 10.0,
        });
        mover.move_by(Vec3::new(0.0, -0.05, 0.9));
        assert!(mover.is_grounded());
        mover.move_by(Vec3::new(0.0, -0.05, 0.2));
        assert!(!mover.is_grounded());
        assert_eq!(mover.support_height(mover.position()), -10.0);
    }
}
