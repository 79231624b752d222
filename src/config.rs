//! Scenario descriptions loaded from YAML.
//!
//! A scenario fixes everything a [`World`] needs at startup:
//!
//! ```yaml
//! arena:
//!   width: 640.0
//!   height: 480.0
//! radius: 20.0
//! gravity: [0.0, 0.3]     # 2 or 3 components; z defaults to 0
//! restitution: 1.0        # optional, 1 = elastic
//! balls:
//!   - position: [100.0, 100.0]
//!     velocity: [2.0, 3.0]
//!   - position: [300.0, 200.0]
//!     velocity: [-1.0, -2.0]
//! ```
//!
//! Screen coordinates are used: y grows downwards, so a positive y gravity pulls
//! balls towards the bottom edge.

use crate::core::world::ELASTIC;
use crate::core::{Arena, Ball, Vector, World};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Arena dimensions.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
}

/// Initial state of one ball.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BallConfig {
    pub position: Vec<f64>,
    #[serde(default)]
    pub velocity: Vec<f64>,
}

/// Top-level scenario file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub arena: ArenaConfig,
    pub radius: f64,
    pub gravity: Vec<f64>,
    #[serde(default = "default_restitution")]
    pub restitution: f64,
    #[serde(default)]
    pub balls: Vec<BallConfig>,
}

fn default_restitution() -> f64 {
    ELASTIC
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// The eight-ball bouncing demo: 640x480 arena, radius 20, gravity (0, 0.3).
    ///
    /// Balls 0 and 6 start at the same spot with the same velocity, and ball 2
    /// starts partly inside the left wall.
    pub fn demo() -> Self {
        let roster = [
            ([100.0, 100.0], [2.0, 3.0]),
            ([300.0, 200.0], [-1.0, -2.0]),
            ([10.0, 150.0], [2.0, 3.0]),
            ([20.0, 20.0], [-1.0, -2.0]),
            ([200.0, 100.0], [2.0, 3.0]),
            ([30.0, 200.0], [-1.0, -2.0]),
            ([100.0, 100.0], [2.0, 3.0]),
            ([300.0, 200.0], [-1.0, -2.0]),
        ];
        Self {
            arena: ArenaConfig {
                width: 640.0,
                height: 480.0,
            },
            radius: 20.0,
            gravity: vec![0.0, 0.3],
            restitution: ELASTIC,
            balls: roster
                .iter()
                .map(|(p, v)| BallConfig {
                    position: p.to_vec(),
                    velocity: v.to_vec(),
                })
                .collect(),
        }
    }

    /// Validate and build the runtime world.
    pub fn build_world(&self) -> Result<World> {
        let gravity = parse_vector("gravity", &self.gravity)?;
        let balls = self
            .balls
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let position = parse_vector(&format!("balls[{i}].position"), &b.position)?;
                let velocity = if b.velocity.is_empty() {
                    Vector::ZERO
                } else {
                    parse_vector(&format!("balls[{i}].velocity"), &b.velocity)?
                };
                Ball::new(position, velocity)
            })
            .collect::<Result<Vec<_>>>()?;
        let arena = Arena::new(self.arena.width, self.arena.height);

        World::new(balls, gravity, arena, self.radius)?.with_restitution(self.restitution)
    }
}

/// Accepts `[x, y]` or `[x, y, z]`.
fn parse_vector(field: &str, comps: &[f64]) -> Result<Vector> {
    match *comps {
        [x, y] => Ok(Vector::planar(x, y)),
        [x, y, z] => Ok(Vector::new(x, y, z)),
        _ => Err(Error::InvalidConfig(format!(
            "{field} must have 2 or 3 components, got {}",
            comps.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
arena: { width: 320.0, height: 240.0 }
radius: 10.0
gravity: [0.0, 0.5]
balls:
  - position: [50.0, 60.0]
    velocity: [1.0, -1.0]
  - position: [150.0, 60.0, 0.0]
"#;

    #[test]
    fn parses_scenario_with_defaults() -> Result<()> {
        let cfg = ScenarioConfig::from_yaml_str(SCENARIO)?;
        assert_eq!(cfg.restitution, 1.0);
        assert_eq!(cfg.balls.len(), 2);
        assert!(cfg.balls[1].velocity.is_empty());

        let world = cfg.build_world()?;
        assert_eq!(world.num_balls(), 2);
        assert_eq!(world.gravity(), Vector::planar(0.0, 0.5));
        assert_eq!(world.balls()[0].velocity, Vector::planar(1.0, -1.0));
        assert_eq!(world.balls()[1].velocity, Vector::ZERO);
        assert_eq!(world.radius(), 10.0);
        Ok(())
    }

    #[test]
    fn wrong_vector_length_is_config_error() -> Result<()> {
        let mut cfg = ScenarioConfig::from_yaml_str(SCENARIO)?;
        cfg.balls[0].position = vec![1.0];
        let err = cfg.build_world().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.to_string().contains("balls[0].position"));
        Ok(())
    }

    #[test]
    fn malformed_yaml_is_yaml_error() {
        let err = ScenarioConfig::from_yaml_str("arena: [1, 2").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ScenarioConfig::from_path("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn demo_builds() -> Result<()> {
        let world = ScenarioConfig::demo().build_world()?;
        assert_eq!(world.num_balls(), 8);
        assert_eq!(world.arena(), Arena::new(640.0, 480.0));
        Ok(())
    }
}
