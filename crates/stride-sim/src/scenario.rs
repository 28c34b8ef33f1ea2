//! Scripted input timelines loaded from RON.
//!
//! A scenario is a list of steps, each holding its input for a number of
//! fixed frames. Jump and health changes fire on the first frame of a step.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Errors raised while loading a scenario file.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// Failed to read the scenario file.
    #[error("failed to read scenario: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse scenario: {0}")]
    ParseError(#[source] ron::error::SpannedError),
}

/// One segment of a scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScenarioStep {
    /// How many fixed frames this step lasts.
    pub frames: u32,
    /// Strafe/forward axes held for the whole step.
    pub move_axis: Vec2,
    /// Look axis held for the whole step.
    pub look_axis: f32,
    /// Press jump on the first frame.
    pub jump: bool,
    /// Set health on the first frame.
    pub health: Option<f32>,
}

impl Default for ScenarioStep {
    fn default() -> Self {
        Self {
            frames: 1,
            move_axis: Vec2::ZERO,
            look_axis: 0.0,
            jump: false,
            health: None,
        }
    }
}

/// A drop in the ground for `z > edge_z`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LedgeSpec {
    /// World Z of the edge.
    pub edge_z: f32,
    /// Depth of the drop.
    pub drop: f32,
}

/// A named input timeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Scenario {
    /// Display name.
    pub name: String,
    /// Optional ledge in the ground plane.
    pub ledge: Option<LedgeSpec>,
    /// Steps played in order.
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Loads a scenario from a RON file.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path).map_err(ScenarioError::ReadError)?;
        Self::from_ron(&contents)
    }

    /// Parses a scenario from RON text.
    pub fn from_ron(text: &str) -> Result<Self, ScenarioError> {
        ron::from_str(text).map_err(ScenarioError::ParseError)
    }

    /// Total frames across all steps.
    pub fn total_frames(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.frames)).sum()
    }

    /// Step active on `frame`, and whether `frame` is that step's first frame.
    pub fn sample(&self, frame: u64) -> Option<(&ScenarioStep, bool)> {
        let mut start = 0u64;
        for step in &self.steps {
            let end = start + u64::from(step.frames);
            if frame < end {
                return Some((step, frame == start));
            }
            start = end;
        }
        None
    }

    /// Built-in tour: jumps, a double jump, turning, a ledge with a late jump,
    /// and a death/revival.
    pub fn default_demo() -> Self {
        let forward = Vec2::new(0.0, 1.0);
        let step = |frames, move_axis, look_axis, jump| ScenarioStep {
            frames,
            move_axis,
            look_axis,
            jump,
            health: None,
        };
        Self {
            name: "demo".to_string(),
            ledge: Some(LedgeSpec {
                edge_z: 8.0,
                drop: 4.0,
            }),
            steps: vec![
                step(10, Vec2::ZERO, 0.0, false),
                step(30, forward, 0.0, true),
                step(25, forward, 0.0, false),
                step(1, forward, 0.0, true),
                step(90, forward, 0.0, false),
                step(30, Vec2::ZERO, 1.0, false),
                step(30, Vec2::ZERO, -1.0, false),
                step(100, forward, 0.0, false),
                step(1, forward, 0.0, true),
                step(60, forward, 0.0, false),
                ScenarioStep {
                    frames: 30,
                    health: Some(0.0),
                    ..Default::default()
                },
                ScenarioStep {
                    frames: 30,
                    health: Some(100.0),
                    ..Default::default()
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_walks_steps() {
        let scenario = Scenario {
            steps: vec![
                ScenarioStep {
                    frames: 2,
                    ..Default::default()
                },
                ScenarioStep {
                    frames: 3,
                    jump: true,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(scenario.total_frames(), 5);
        assert_eq!(scenario.sample(0).map(|(_, first)| first), Some(true));
        assert_eq!(scenario.sample(1).map(|(_, first)| first), Some(false));
        let (step, first) = scenario.sample(2).unwrap();
        assert!(step.jump && first);
        assert!(!scenario.sample(4).unwrap().1);
        assert!(scenario.sample(5).is_none());
    }

    #[test]
    fn test_zero_length_step_is_skipped() {
        let scenario = Scenario {
            steps: vec![
                ScenarioStep {
                    frames: 0,
                    jump: true,
                    ..Default::default()
                },
                ScenarioStep::default(),
            ],
            ..Default::default()
        };
        assert!(!scenario.sample(0).unwrap().0.jump);
    }

    #[test]
    fn test_from_ron_with_defaults() {
        let text = r#"(
            name: "hop",
            steps: [
                (frames: 5, move_axis: (0.0, 1.0)),
                (jump: true),
                (frames: 10, health: Some(0.0)),
            ],
        )"#;
        let scenario = Scenario::from_ron(text).unwrap();
        assert_eq!(scenario.name, "hop");
        assert!(scenario.ledge.is_none());
        assert_eq!(scenario.total_frames(), 16);
        assert_eq!(scenario.steps[1].frames, 1);
        assert_eq!(scenario.steps[2].health, Some(0.0));
    }

    #[test]
    fn test_invalid_ron_is_parse_error() {
        assert!(matches!(
            Scenario::from_ron("(steps: [oops])"),
            Err(ScenarioError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Scenario::load(&dir.path().join("missing.ron")),
            Err(ScenarioError::ReadError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledge.ron");
        std::fs::write(
            &path,
            "(name: \"ledge\", ledge: Some((edge_z: 1.0, drop: 2.0)), steps: [(frames: 3)])",
        )
        .unwrap();
        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.ledge.unwrap().edge_z, 1.0);
        assert_eq!(scenario.total_frames(), 3);
    }

    #[test]
    fn test_default_demo_has_death_and_revival() {
        let demo = Scenario::default_demo();
        assert!(demo.steps.iter().any(|s| s.health == Some(0.0)));
        assert!(demo.steps.last().unwrap().health.unwrap() > 0.0);
    }
}
