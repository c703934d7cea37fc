//! Numeric primitives and the analytic contact-time kernel

pub mod formulae;
pub mod matrix;
pub mod vector;

pub use formulae::{Roots, quadratic_real_roots, time_circles_intersected};
pub use matrix::Matrix;
pub use vector::Vector;
