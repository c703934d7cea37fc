//! Construction surface for a ball ensemble
//!
//! A `SimConfig` is plain data (serde) so drivers can keep it in JSON; the
//! engine applies it radii → masses → positions → velocities → timestep.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::boundary::BoundaryKind;
use crate::consts::{DEFAULT_DT, DEFAULT_PLACEMENT_ATTEMPTS};
use crate::error::Result;

/// How ball radii are chosen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusSpec {
    Uniform(f64),
    PerBall(Vec<f64>),
    /// Drawn uniformly from `[min, max)`
    Range { min: f64, max: f64 },
}

/// How ball masses are chosen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassSpec {
    Uniform(f64),
    PerBall(Vec<f64>),
    /// Mass of a sphere of the ball's radius at this density
    Density(f64),
}

/// How initial positions are chosen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementSpec {
    /// Rejection-sampled inside the bounding box, clear of walls and other balls
    Random,
    Explicit(Vec<DVec2>),
}

/// How initial velocities are chosen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocitySpec {
    Explicit(Vec<DVec2>),
    /// Same speed for every ball, random direction
    Speed(f64),
    /// Same momentum magnitude for every ball, random direction
    Momentum(f64),
}

/// Everything needed to build a [`BallSystem`](super::BallSystem)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub n_balls: usize,
    pub boundary: BoundaryKind,
    pub radii: RadiusSpec,
    pub masses: MassSpec,
    pub placement: PlacementSpec,
    pub velocities: VelocitySpec,
    /// Timestep per tick
    pub dt: f64,
    /// Seed for every randomized choice above
    pub seed: u64,
    /// Give up placing a single ball after this many rejected draws
    pub max_placement_attempts: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            n_balls: 50,
            boundary: BoundaryKind::Circle { radius: 12.0 },
            radii: RadiusSpec::Uniform(0.25),
            masses: MassSpec::Uniform(1.0),
            placement: PlacementSpec::Random,
            velocities: VelocitySpec::Speed(1.5),
            dt: DEFAULT_DT,
            seed: 0,
            max_placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = SimConfig::from_json(r#"{"n_balls": 10, "seed": 7}"#).unwrap();
        assert_eq!(config.n_balls, 10);
        assert_eq!(config.seed, 7);
        assert_eq!(config.boundary, BoundaryKind::Circle { radius: 12.0 });
        assert_eq!(config.dt, DEFAULT_DT);
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimConfig {
            n_balls: 2,
            boundary: BoundaryKind::Mushroom {
                radius: 10.0,
                stalk_width: 4.0,
                stalk_height: 6.0,
            },
            radii: RadiusSpec::Range { min: 0.2, max: 0.4 },
            masses: MassSpec::Density(1.5),
            placement: PlacementSpec::Explicit(vec![DVec2::new(0.0, 2.0), DVec2::new(0.0, -2.0)]),
            velocities: VelocitySpec::Momentum(0.3),
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_spec_encoding() {
        let json = serde_json::to_string(&RadiusSpec::Range { min: 0.1, max: 0.2 }).unwrap();
        assert_eq!(json, r#"{"range":{"min":0.1,"max":0.2}}"#);
        let json = serde_json::to_string(&PlacementSpec::Random).unwrap();
        assert_eq!(json, r#""random""#);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(SimConfig::from_json("{ not json").is_err());
    }
}
