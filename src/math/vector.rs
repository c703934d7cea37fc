//! Fixed-dimension numeric vector with value semantics
//!
//! Every operation returns a new `Vector`; the receiver is never mutated.
//! The simulation itself runs on `glam::DVec2`, this type is the
//! dimension-checked carrier used at the matrix/persistence surface.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector {
    vals: Vec<f64>,
}

impl Vector {
    pub fn new(vals: Vec<f64>) -> Self {
        Self { vals }
    }

    /// Zero vector of dimension `dim`
    pub fn zeros(dim: usize) -> Self {
        Self::filled(dim, 0.0)
    }

    pub fn filled(dim: usize, value: f64) -> Self {
        Self {
            vals: vec![value; dim],
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.vals.len()
    }

    #[inline]
    pub fn get(&self, i: usize) -> f64 {
        self.vals[i]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.vals
    }

    fn check_dim(&self, other: &Vector) -> Result<()> {
        if self.dim() != other.dim() {
            return Err(SimError::dims(self.dim(), other.dim()));
        }
        Ok(())
    }

    pub fn add(&self, other: &Vector) -> Result<Vector> {
        self.check_dim(other)?;
        Ok(self.zip_with(other, |a, b| a + b))
    }

    pub fn sub(&self, other: &Vector) -> Result<Vector> {
        self.check_dim(other)?;
        Ok(self.zip_with(other, |a, b| a - b))
    }

    pub fn scale(&self, factor: f64) -> Vector {
        Vector::new(self.vals.iter().map(|v| v * factor).collect())
    }

    pub fn dot(&self, other: &Vector) -> Result<f64> {
        self.check_dim(other)?;
        Ok(self.vals.iter().zip(&other.vals).map(|(a, b)| a * b).sum())
    }

    /// Right-handed cross product, both operands must be 3-dimensional
    pub fn cross(&self, other: &Vector) -> Result<Vector> {
        if self.dim() != 3 || other.dim() != 3 {
            return Err(SimError::dims("3 and 3", format!("{} and {}", self.dim(), other.dim())));
        }
        let (a, b) = (&self.vals, &other.vals);
        Ok(Vector::new(vec![
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]))
    }

    pub fn magnitude(&self) -> f64 {
        self.vals.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Unit vector in the same direction, `None` for the zero vector
    pub fn unit(&self) -> Option<Vector> {
        let mag = self.magnitude();
        if mag == 0.0 {
            return None;
        }
        Some(self.scale(1.0 / mag))
    }

    fn zip_with(&self, other: &Vector, f: impl Fn(f64, f64) -> f64) -> Vector {
        Vector::new(
            self.vals
                .iter()
                .zip(&other.vals)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        )
    }
}

impl From<DVec2> for Vector {
    fn from(v: DVec2) -> Self {
        Vector::new(vec![v.x, v.y])
    }
}

impl TryFrom<&Vector> for DVec2 {
    type Error = SimError;

    fn try_from(v: &Vector) -> Result<Self> {
        match v.as_slice() {
            [x, y] => Ok(DVec2::new(*x, *y)),
            other => Err(SimError::dims(2, other.len())),
        }
    }
}
