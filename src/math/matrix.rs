//! Row/column numeric matrix with value semantics
//!
//! Ball state leaves the engine as 2×N matrices, one column per ball.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::vector::Vector;
use crate::error::{Result, SimError};

/// Dense matrix, stored row-major. Serialized as nested rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    vals: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            vals: vec![value; rows * cols],
        }
    }

    /// Build from nested rows; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut vals = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(SimError::dims(format!("{n_cols} columns"), row.len()));
            }
            vals.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            vals,
        })
    }

    /// 2×N matrix holding one point per column
    pub fn from_columns(points: &[DVec2]) -> Self {
        let cols = points.len();
        let mut m = Self::zeros(2, cols);
        for (j, p) in points.iter().enumerate() {
            m.vals[j] = p.x;
            m.vals[cols + j] = p.y;
        }
        m
    }

    /// Unpack a 2×N matrix into points
    pub fn to_points(&self) -> Result<Vec<DVec2>> {
        if self.rows != 2 {
            return Err(SimError::dims("2 rows", self.rows));
        }
        Ok((0..self.cols)
            .map(|j| DVec2::new(self.get(0, j), self.get(1, j)))
            .collect())
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    pub fn dim_string(&self) -> String {
        format!("{}x{}", self.rows, self.cols)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.vals[i * self.cols + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.vals[i * self.cols + j] = value;
    }

    pub fn row(&self, i: usize) -> Vector {
        Vector::new(self.vals[i * self.cols..(i + 1) * self.cols].to_vec())
    }

    pub fn column(&self, j: usize) -> Vector {
        Vector::new((0..self.rows).map(|i| self.get(i, j)).collect())
    }

    pub fn set_row(&mut self, i: usize, row: &Vector) -> Result<()> {
        if row.dim() != self.cols {
            return Err(SimError::dims(self.cols, row.dim()));
        }
        self.vals[i * self.cols..(i + 1) * self.cols].copy_from_slice(row.as_slice());
        Ok(())
    }

    pub fn set_column(&mut self, j: usize, col: &Vector) -> Result<()> {
        if col.dim() != self.rows {
            return Err(SimError::dims(self.rows, col.dim()));
        }
        for (i, v) in col.as_slice().iter().enumerate() {
            self.set(i, j, *v);
        }
        Ok(())
    }

    fn check_same_shape(&self, other: &Matrix) -> Result<()> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(SimError::dims(self.dim_string(), other.dim_string()));
        }
        Ok(())
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape(other)?;
        Ok(self.zip_with(other, |a, b| a + b))
    }

    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape(other)?;
        Ok(self.zip_with(other, |a, b| a - b))
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            vals: self.vals.iter().map(|v| v * factor).collect(),
        }
    }

    /// `self * other`, inner dimensions must agree
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(SimError::dims(
                format!("{} rows", self.cols),
                other.dim_string(),
            ));
        }
        let mut out = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let sum = (0..self.cols).map(|k| self.get(i, k) * other.get(k, j)).sum();
                out.set(i, j, sum);
            }
        }
        Ok(out)
    }

    pub fn multiply_vector(&self, v: &Vector) -> Result<Vector> {
        if self.cols != v.dim() {
            return Err(SimError::dims(self.cols, v.dim()));
        }
        Ok(Vector::new(
            (0..self.rows)
                .map(|i| (0..self.cols).map(|j| self.get(i, j) * v.get(j)).sum())
                .collect(),
        ))
    }

    fn zip_with(&self, other: &Matrix, f: impl Fn(f64, f64) -> f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            vals: self
                .vals
                .iter()
                .zip(&other.vals)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = SimError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Matrix::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self {
        (0..m.rows)
            .map(|i| m.vals[i * m.cols..(i + 1) * m.cols].to_vec())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_access() {
        let mut m = Matrix::from_columns(&[DVec2::new(1.0, 2.0), DVec2::new(3.0, 4.0)]);
        assert_eq!(m.dim_string(), "2x2");
        assert_eq!(m.column(1), Vector::new(vec![3.0, 4.0]));
        assert_eq!(m.row(0), Vector::new(vec![1.0, 3.0]));

        m.set_column(0, &Vector::new(vec![-1.0, -2.0])).unwrap();
        assert_eq!(m.to_points().unwrap()[0], DVec2::new(-1.0, -2.0));
        assert!(m.set_column(0, &Vector::zeros(3)).is_err());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, SimError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_add_requires_same_shape() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(3, 2);
        assert!(a.add(&b).is_err());
        assert!(a.sub(&a).is_ok());
    }

    #[test]
    fn test_multiply() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let id = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        assert_eq!(a.multiply(&id).unwrap(), a);

        let v = a.multiply_vector(&Vector::new(vec![1.0, 1.0])).unwrap();
        assert_eq!(v, Vector::new(vec![3.0, 7.0]));

        assert!(a.multiply(&Matrix::zeros(3, 1)).is_err());
    }

    #[test]
    fn test_to_points_requires_two_rows() {
        assert!(Matrix::zeros(3, 4).to_points().is_err());
    }

    #[test]
    fn test_serde_nested_rows() {
        let m = Matrix::from_columns(&[DVec2::new(0.5, 1.5)]);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[0.5],[1.5]]");
        let back: Matrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        assert!(serde_json::from_str::<Matrix>("[[1.0,2.0],[3.0]]").is_err());
    }
}
