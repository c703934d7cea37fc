//! Save/restore of a running ensemble
//!
//! A [`Snapshot`] holds everything the engine needs to continue a run from
//! the saved tick: the boundary, per-ball radii and masses, positions and
//! velocities as 2×N matrices, the timestep and the seed. Encoding is JSON;
//! reading and writing files is left to the caller.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::Matrix;
use crate::sim::{BallSystem, BoundaryKind, MassSpec, RadiusSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub boundary: BoundaryKind,
    pub dt: f64,
    pub masses: Vec<f64>,
    pub radii: Vec<f64>,
    /// 2×N, one column per ball
    pub positions: Matrix,
    /// 2×N, one column per ball
    pub velocities: Matrix,
    pub seed: u64,
    #[serde(default)]
    pub ticks: u64,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl BallSystem {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            boundary: self.boundary().kind(),
            dt: self.dt(),
            masses: self.masses().to_vec(),
            radii: self.radii().to_vec(),
            positions: self.positions(),
            velocities: self.velocities(),
            seed: self.seed(),
            ticks: self.tick_count(),
        }
    }

    /// Rebuild an ensemble at the saved tick.
    ///
    /// Positions are taken as-is: a mid-run state may legitimately hold
    /// overlaps that the next resolve pass will handle.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let boundary = snapshot.boundary.build()?;
        let mut system = BallSystem::new(snapshot.radii.len(), boundary, snapshot.seed);
        system.set_radii(&RadiusSpec::PerBall(snapshot.radii.clone()))?;
        system.set_masses(&MassSpec::PerBall(snapshot.masses.clone()))?;
        system.set_positions_matrix(&snapshot.positions)?;
        system.set_velocities_matrix(&snapshot.velocities)?;
        system.set_dt(snapshot.dt)?;
        system.set_tick_count(snapshot.ticks);
        log::info!(
            "Restored {} balls in {} at tick {}",
            system.n_balls(),
            snapshot.boundary,
            snapshot.ticks
        );
        Ok(system)
    }
}
