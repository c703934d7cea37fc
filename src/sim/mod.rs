//! Deterministic simulation module
//!
//! Everything that moves balls lives here. Given the same configuration and
//! seed, a run is reproducible bit for bit:
//! - Seeded RNG only
//! - Fixed timestep per tick
//! - Stable iteration order (grid cells, then ball index)

pub mod boundary;
pub mod config;
pub mod grid;
pub mod system;

pub use boundary::{Bounce, Boundary, BoundaryKind, Bounds, Contact, Outline, reflect};
pub use config::{MassSpec, PlacementSpec, RadiusSpec, SimConfig, VelocitySpec};
pub use grid::SpatialGrid;
pub use system::{BallSystem, TickReport};
