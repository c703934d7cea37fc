//! The ball ensemble: per-ball state, free flight and collision resolution
//!
//! One tick is: advance every ball by `vel·dt`, resolve ball-ball overlaps
//! found through the spatial grid, then bounce every ball touching the
//! boundary. Each contact is corrected to its own exact contact time; a ball
//! involved in several contacts in one tick gets the corrections one after
//! another in discovery order, not simultaneously.

use std::f64::consts::{PI, TAU};

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::boundary::Boundary;
use super::config::{MassSpec, PlacementSpec, RadiusSpec, SimConfig, VelocitySpec};
use super::grid::SpatialGrid;
use crate::consts::{DEFAULT_DT, DEFAULT_PLACEMENT_ATTEMPTS};
use crate::error::{Result, SimError};
use crate::math::{Matrix, time_circles_intersected};

/// What happened during one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Ball-ball collisions resolved
    pub pair_collisions: usize,
    /// Ball-wall bounces resolved
    pub wall_bounces: usize,
    /// Contacts left alone this tick because no past contact time exists
    pub skipped: usize,
}

#[derive(Debug)]
pub struct BallSystem {
    boundary: Box<dyn Boundary>,
    n_balls: usize,
    radius: Vec<f64>,
    mass: Vec<f64>,
    loc: Vec<DVec2>,
    vel: Vec<DVec2>,
    dt: f64,
    /// Allocated once radii are known
    grid: Option<SpatialGrid>,
    seed: u64,
    rng: Pcg32,
    ticks: u64,
    max_placement_attempts: u32,
}

impl BallSystem {
    /// Empty ensemble of `n_balls`; radii, masses, positions and velocities
    /// still need to be set
    pub fn new(n_balls: usize, boundary: Box<dyn Boundary>, seed: u64) -> Self {
        Self {
            boundary,
            n_balls,
            radius: Vec::new(),
            mass: Vec::new(),
            loc: Vec::new(),
            vel: Vec::new(),
            dt: DEFAULT_DT,
            grid: None,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ticks: 0,
            max_placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
        }
    }

    pub fn from_config(config: &SimConfig) -> Result<Self> {
        let boundary = config.boundary.build()?;
        let mut system = Self::new(config.n_balls, boundary, config.seed);
        system.max_placement_attempts = config.max_placement_attempts;
        system.set_radii(&config.radii)?;
        system.set_masses(&config.masses)?;
        system.set_positions(&config.placement)?;
        system.set_velocities(&config.velocities)?;
        system.set_dt(config.dt)?;
        log::info!(
            "Ball system ready: {} balls in {} (seed {}, dt {})",
            system.n_balls,
            config.boundary,
            system.seed,
            system.dt
        );
        Ok(system)
    }

    // === Initialization ===

    pub fn set_radii(&mut self, spec: &RadiusSpec) -> Result<()> {
        let radii = match spec {
            RadiusSpec::Uniform(r) => vec![*r; self.n_balls],
            RadiusSpec::PerBall(list) => {
                self.check_count("radii", list.len())?;
                list.clone()
            }
            RadiusSpec::Range { min, max } => {
                if !(min <= max) {
                    return Err(SimError::config(format!(
                        "radius range is empty ({min}..{max})"
                    )));
                }
                (0..self.n_balls)
                    .map(|_| min + (max - min) * self.rng.random::<f64>())
                    .collect()
            }
        };
        if let Some(bad) = radii.iter().find(|r| !(r.is_finite() && **r > 0.0)) {
            return Err(SimError::config(format!("ball radius must be positive (got {bad})")));
        }

        let max_radius = radii.iter().copied().fold(0.0, f64::max);
        self.grid = if radii.is_empty() {
            None
        } else {
            Some(SpatialGrid::new(self.boundary.bounds(), max_radius)?)
        };
        self.radius = radii;
        Ok(())
    }

    pub fn set_masses(&mut self, spec: &MassSpec) -> Result<()> {
        let masses = match spec {
            MassSpec::Uniform(m) => vec![*m; self.n_balls],
            MassSpec::PerBall(list) => {
                self.check_count("masses", list.len())?;
                list.clone()
            }
            MassSpec::Density(rho) => {
                self.require_radii()?;
                self.radius
                    .iter()
                    .map(|r| 4.0 * PI * r.powi(3) * rho / 3.0)
                    .collect()
            }
        };
        if let Some(bad) = masses.iter().find(|m| !(m.is_finite() && **m > 0.0)) {
            return Err(SimError::config(format!("ball mass must be positive (got {bad})")));
        }
        self.mass = masses;
        Ok(())
    }

    pub fn set_positions(&mut self, spec: &PlacementSpec) -> Result<()> {
        self.require_radii()?;
        match spec {
            PlacementSpec::Random => self.place_randomly(),
            PlacementSpec::Explicit(points) => self.place_explicitly(points),
        }
    }

    /// Draw positions until each ball is in bounds and clear of the ones
    /// already placed
    fn place_randomly(&mut self) -> Result<()> {
        let bounds = self.boundary.bounds();
        let mut placed: Vec<DVec2> = Vec::with_capacity(self.n_balls);
        for i in 0..self.n_balls {
            let r = self.radius[i];
            let mut attempts = 0;
            let p = loop {
                if attempts >= self.max_placement_attempts {
                    return Err(SimError::config(format!(
                        "could not place ball {i} after {attempts} attempts, enclosure too crowded"
                    )));
                }
                attempts += 1;
                let p = DVec2::new(
                    bounds.x_min + bounds.width() * self.rng.random::<f64>(),
                    bounds.y_min + bounds.height() * self.rng.random::<f64>(),
                );
                if !self.boundary.out_of_bounds(p, r) && !overlaps_any(&placed, &self.radius, p, r) {
                    break p;
                }
            };
            placed.push(p);
        }
        self.loc = placed;
        Ok(())
    }

    fn place_explicitly(&mut self, points: &[DVec2]) -> Result<()> {
        self.check_count("positions", points.len())?;
        for (i, &p) in points.iter().enumerate() {
            let r = self.radius[i];
            if self.boundary.out_of_bounds(p, r) {
                return Err(SimError::config(format!(
                    "ball {i} at {p} overlaps the boundary"
                )));
            }
            if overlaps_any(&points[..i], &self.radius, p, r) {
                return Err(SimError::config(format!(
                    "ball {i} at {p} overlaps an earlier ball"
                )));
            }
        }
        self.loc = points.to_vec();
        Ok(())
    }

    pub fn set_velocities(&mut self, spec: &VelocitySpec) -> Result<()> {
        if let VelocitySpec::Speed(magnitude) | VelocitySpec::Momentum(magnitude) = spec {
            if !magnitude.is_finite() {
                return Err(SimError::config(format!(
                    "velocity magnitude must be finite (got {magnitude})"
                )));
            }
        }
        self.vel = match spec {
            VelocitySpec::Explicit(list) => {
                self.check_count("velocities", list.len())?;
                list.clone()
            }
            VelocitySpec::Speed(speed) => (0..self.n_balls)
                .map(|_| DVec2::from_angle(TAU * self.rng.random::<f64>()) * *speed)
                .collect(),
            VelocitySpec::Momentum(momentum) => {
                if self.mass.len() != self.n_balls {
                    return Err(SimError::Uninitialized("masses"));
                }
                (0..self.n_balls)
                    .map(|i| {
                        DVec2::from_angle(TAU * self.rng.random::<f64>()) * (*momentum / self.mass[i])
                    })
                    .collect()
            }
        };
        Ok(())
    }

    /// Overwrite positions from a 2×N matrix, without placement checks.
    /// Used to restore a saved state, where overlaps may legitimately exist.
    pub fn set_positions_matrix(&mut self, positions: &Matrix) -> Result<()> {
        let points = positions.to_points()?;
        self.check_count("positions", points.len())?;
        self.loc = points;
        Ok(())
    }

    /// Overwrite velocities from a 2×N matrix
    pub fn set_velocities_matrix(&mut self, velocities: &Matrix) -> Result<()> {
        let points = velocities.to_points()?;
        self.check_count("velocities", points.len())?;
        self.vel = points;
        Ok(())
    }

    pub fn set_dt(&mut self, dt: f64) -> Result<()> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::config(format!("timestep must be positive (got {dt})")));
        }
        self.dt = dt;
        Ok(())
    }

    pub(crate) fn set_tick_count(&mut self, ticks: u64) {
        self.ticks = ticks;
    }

    fn check_count(&self, what: &str, found: usize) -> Result<()> {
        if found != self.n_balls {
            return Err(SimError::dims(format!("{} {what}", self.n_balls), found));
        }
        Ok(())
    }

    fn require_radii(&self) -> Result<()> {
        if self.radius.len() != self.n_balls {
            return Err(SimError::Uninitialized("radii"));
        }
        Ok(())
    }

    /// Every per-ball array is populated
    fn require_ready(&self) -> Result<()> {
        self.require_radii()?;
        if self.mass.len() != self.n_balls {
            return Err(SimError::Uninitialized("masses"));
        }
        if self.loc.len() != self.n_balls {
            return Err(SimError::Uninitialized("positions"));
        }
        if self.vel.len() != self.n_balls {
            return Err(SimError::Uninitialized("velocities"));
        }
        Ok(())
    }

    // === Time evolution ===

    /// Free flight: `loc += vel·dt` for every ball
    pub fn advance(&mut self, dt: f64) {
        for (p, v) in self.loc.iter_mut().zip(&self.vel) {
            *p += *v * dt;
        }
    }

    /// Resolve overlapping pairs through the spatial grid, then wall contacts
    pub fn resolve_collisions(&mut self) -> Result<TickReport> {
        self.require_ready()?;
        let mut report = TickReport::default();

        let Self {
            grid,
            loc,
            vel,
            radius,
            mass,
            ..
        } = self;
        if let Some(grid) = grid.as_mut() {
            grid.rebuild(loc.as_slice());
            grid.for_each_candidate(|p, q| {
                try_collide(loc, vel, radius, mass, p, q, &mut report);
            });
        }

        self.resolve_walls(&mut report);
        Ok(report)
    }

    /// Reference O(n²) version of [`BallSystem::resolve_collisions`]
    pub fn resolve_collisions_naive(&mut self) -> Result<TickReport> {
        self.require_ready()?;
        let mut report = TickReport::default();
        for i in 0..self.n_balls {
            for j in i + 1..self.n_balls {
                try_collide(
                    &mut self.loc,
                    &mut self.vel,
                    &self.radius,
                    &self.mass,
                    i,
                    j,
                    &mut report,
                );
            }
        }
        self.resolve_walls(&mut report);
        Ok(report)
    }

    fn resolve_walls(&mut self, report: &mut TickReport) {
        for i in 0..self.n_balls {
            let (p, v, r) = (self.loc[i], self.vel[i], self.radius[i]);
            let Some(contact) = self.boundary.contact(p, r) else {
                continue;
            };
            match self.boundary.bounce_off(p, v, r, &contact) {
                Ok(bounce) => {
                    self.loc[i] = bounce.loc;
                    self.vel[i] = bounce.vel;
                    report.wall_bounces += 1;
                }
                Err(e) => {
                    log::debug!("Skipping wall contact for ball {i} this tick: {e}");
                    report.skipped += 1;
                }
            }
        }
    }

    /// One tick: advance by `dt`, then resolve collisions
    pub fn step(&mut self) -> Result<TickReport> {
        self.require_ready()?;
        self.advance(self.dt);
        let report = self.resolve_collisions()?;
        self.ticks += 1;
        log::trace!("Tick {}: {:?}", self.ticks, report);
        Ok(report)
    }

    /// Run `n_steps` ticks, handing the state to `on_tick` after each one
    pub fn simulate(&mut self, n_steps: u32, mut on_tick: impl FnMut(&BallSystem)) -> Result<()> {
        for _ in 0..n_steps {
            self.step()?;
            on_tick(self);
        }
        Ok(())
    }

    // === Accessors ===

    pub fn n_balls(&self) -> usize {
        self.n_balls
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed_time(&self) -> f64 {
        self.ticks as f64 * self.dt
    }

    pub fn boundary(&self) -> &dyn Boundary {
        self.boundary.as_ref()
    }

    pub fn grid(&self) -> Option<&SpatialGrid> {
        self.grid.as_ref()
    }

    pub fn radii(&self) -> &[f64] {
        &self.radius
    }

    pub fn masses(&self) -> &[f64] {
        &self.mass
    }

    pub fn position(&self, i: usize) -> DVec2 {
        self.loc[i]
    }

    pub fn velocity(&self, i: usize) -> DVec2 {
        self.vel[i]
    }

    /// Positions as a 2×N matrix, one column per ball
    pub fn positions(&self) -> Matrix {
        Matrix::from_columns(&self.loc)
    }

    /// Velocities as a 2×N matrix, one column per ball
    pub fn velocities(&self) -> Matrix {
        Matrix::from_columns(&self.vel)
    }

    /// Center and radius of every ball, for drawing
    pub fn balls(&self) -> impl Iterator<Item = (DVec2, f64)> + '_ {
        self.loc.iter().copied().zip(self.radius.iter().copied())
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.mass
            .iter()
            .zip(&self.vel)
            .map(|(m, v)| 0.5 * m * v.length_squared())
            .sum()
    }

    pub fn momentum(&self) -> DVec2 {
        self.mass.iter().zip(&self.vel).map(|(m, v)| *v * *m).sum()
    }
}

fn overlaps_any(placed: &[DVec2], radius: &[f64], p: DVec2, r: f64) -> bool {
    placed
        .iter()
        .zip(radius)
        .any(|(q, rq)| (*q - p).length() <= r + rq)
}

/// Resolve `i`/`j` if they overlap; a pair with no past contact time is
/// skipped for this tick
fn try_collide(
    loc: &mut [DVec2],
    vel: &mut [DVec2],
    radius: &[f64],
    mass: &[f64],
    i: usize,
    j: usize,
    report: &mut TickReport,
) {
    if (loc[i] - loc[j]).length() >= radius[i] + radius[j] {
        return;
    }
    match collide(loc, vel, radius, mass, i, j) {
        Ok(()) => report.pair_collisions += 1,
        Err(e) => {
            log::debug!("Skipping collision between balls {i} and {j} this tick: {e}");
            report.skipped += 1;
        }
    }
}

/// Elastic collision of two overlapping balls.
///
/// Both are rewound to the moment of contact, exchange momentum along the
/// line of centers, then replay the rewound time with their new velocities.
fn collide(
    loc: &mut [DVec2],
    vel: &mut [DVec2],
    radius: &[f64],
    mass: &[f64],
    i: usize,
    j: usize,
) -> Result<()> {
    let t = time_circles_intersected(loc[i], loc[j], vel[i], vel[j], radius[i], radius[j])?;
    let at_i = loc[i] - vel[i] * t;
    let at_j = loc[j] - vel[j] * t;

    let dx = at_i - at_j;
    let dv = vel[i] - vel[j];
    let inc = dx * (2.0 * dv.dot(dx) / ((mass[i] + mass[j]) * dx.dot(dx)));
    vel[i] -= inc * mass[j];
    vel[j] += inc * mass[i];

    loc[i] = at_i + vel[i] * t;
    loc[j] = at_j + vel[j] * t;
    Ok(())
}
