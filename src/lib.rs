//! Billiard Sim - hard-sphere balls bouncing inside 2D billiard tables
//!
//! Core modules:
//! - `math`: Vector/matrix primitives and the analytic contact-time kernel
//! - `sim`: Boundaries, spatial partition, configuration and the ball engine
//! - `persistence`: JSON snapshots of a running ensemble
//! - `error`: The shared error type

pub mod error;
pub mod math;
pub mod persistence;
pub mod sim;

pub use error::{Result, SimError};
pub use persistence::Snapshot;
pub use sim::{BallSystem, Boundary, BoundaryKind, SimConfig, TickReport};

/// Simulation constants
pub mod consts {
    /// Grid cell edge as a multiple of the largest ball radius
    pub const GRID_CELL_FACTOR: f64 = 2.25;
    /// Extra room around the boundary's bounding box covered by the grid
    pub const GRID_MARGIN: f64 = 1.0;
    /// Largest partition grid allowed, in cells
    pub const MAX_GRID_CELLS: usize = 1 << 22;

    /// Discriminants below this are treated as a repeated root
    pub const REPEATED_ROOT_TOLERANCE: f64 = 1e-10;

    /// Default timestep per tick
    pub const DEFAULT_DT: f64 = 0.05;
    /// Default cap on rejected draws when placing a single ball
    pub const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 1_000_000;
}
