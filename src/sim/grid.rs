//! Uniform grid broad phase for ball-ball collision checks
//!
//! Cells are a little wider than the largest ball's diameter, so two
//! overlapping balls always sit in the same or adjacent cells. The grid is
//! rebuilt from scratch every tick.

use glam::DVec2;

use super::boundary::Bounds;
use crate::consts::{GRID_CELL_FACTOR, GRID_MARGIN, MAX_GRID_CELLS};
use crate::error::{Result, SimError};

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f64,
    /// Lower-left corner of cell (0, 0)
    corner: DVec2,
    nx: usize,
    ny: usize,
    /// Ball indices per cell, row-major by x
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// Grid covering `bounds` plus a margin, sized for balls up to `max_radius`
    pub fn new(bounds: Bounds, max_radius: f64) -> Result<Self> {
        if !(max_radius.is_finite() && max_radius > 0.0) {
            return Err(SimError::config(format!(
                "largest ball radius must be positive (got {max_radius})"
            )));
        }
        let cell_size = GRID_CELL_FACTOR * max_radius;
        let lo = ((bounds.min() - GRID_MARGIN) / cell_size).floor();
        let hi = ((bounds.max() + GRID_MARGIN) / cell_size).ceil();
        let span = (hi - lo).max(DVec2::ONE);
        if span.x * span.y > MAX_GRID_CELLS as f64 {
            return Err(SimError::config(format!(
                "partition grid of {}x{} cells is too large, balls of radius {max_radius} are too small for these bounds",
                span.x, span.y
            )));
        }
        let nx = span.x as usize;
        let ny = span.y as usize;

        Ok(Self {
            cell_size,
            corner: lo * cell_size,
            nx,
            ny,
            cells: vec![Vec::new(); nx * ny],
        })
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of cells along x and y
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Cell containing `p`; points outside the grid land in the nearest edge cell
    pub fn cell_of(&self, p: DVec2) -> (usize, usize) {
        let rel = (p - self.corner) / self.cell_size;
        let ix = rel.x.floor();
        let iy = rel.y.floor();
        let in_grid =
            ix >= 0.0 && iy >= 0.0 && (ix as usize) < self.nx && (iy as usize) < self.ny;
        if !in_grid {
            log::warn!("Ball at {p} is outside the partition grid, clamping to edge cell");
        }
        (
            (ix.max(0.0) as usize).min(self.nx - 1),
            (iy.max(0.0) as usize).min(self.ny - 1),
        )
    }

    #[inline]
    fn index(&self, ix: usize, iy: usize) -> usize {
        ix * self.ny + iy
    }

    /// Re-bucket every ball by its current position
    pub fn rebuild(&mut self, locs: &[DVec2]) {
        for cell in &mut self.cells {
            cell.clear();
        }
        for (i, &p) in locs.iter().enumerate() {
            let (ix, iy) = self.cell_of(p);
            let idx = self.index(ix, iy);
            self.cells[idx].push(i);
        }
    }

    pub fn cell(&self, ix: usize, iy: usize) -> &[usize] {
        &self.cells[self.index(ix, iy)]
    }

    /// Visit each candidate pair `(p, q)` with `q < p` exactly once, where `q`
    /// is in the same cell as `p` or one of its 8 neighbors. Pairs are
    /// produced cell by cell in grid order.
    pub fn for_each_candidate(&self, mut visit: impl FnMut(usize, usize)) {
        for ix in 0..self.nx {
            for iy in 0..self.ny {
                let here = self.cell(ix, iy);
                if here.is_empty() {
                    continue;
                }
                let x_range = ix.saturating_sub(1)..=(ix + 1).min(self.nx - 1);
                for &p in here {
                    for jx in x_range.clone() {
                        for jy in iy.saturating_sub(1)..=(iy + 1).min(self.ny - 1) {
                            for &q in self.cell(jx, jy) {
                                if q < p {
                                    visit(p, q);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn grid() -> SpatialGrid {
        SpatialGrid::new(Bounds::symmetric(10.0, 10.0), 0.5).unwrap()
    }

    #[test]
    fn test_grid_covers_margin() {
        let g = grid();
        assert!((g.cell_size() - 1.125).abs() < 1e-12);
        let (nx, ny) = g.dims();
        let far = g.corner + DVec2::new(nx as f64, ny as f64) * g.cell_size();
        assert!(g.corner.x <= -11.0 && g.corner.y <= -11.0);
        assert!(far.x >= 11.0 && far.y >= 11.0);
    }

    #[test]
    fn test_rejects_zero_radius() {
        assert!(SpatialGrid::new(Bounds::symmetric(10.0, 10.0), 0.0).is_err());
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let err = SpatialGrid::new(Bounds::symmetric(1e4, 1e4), 1e-4).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
        // Just under the cap is still fine
        assert!(SpatialGrid::new(Bounds::symmetric(500.0, 500.0), 0.25).is_ok());
    }

    #[test]
    fn test_out_of_grid_points_are_clamped() {
        let g = grid();
        let (nx, ny) = g.dims();
        assert_eq!(g.cell_of(DVec2::new(-1e6, 1e6)), (0, ny - 1));
        assert_eq!(g.cell_of(DVec2::new(1e6, -1e6)), (nx - 1, 0));
    }

    #[test]
    fn test_candidates_are_unique_and_ordered() {
        let mut g = grid();
        let locs: Vec<DVec2> = (0..40)
            .map(|i| DVec2::new((i % 8) as f64 * 0.6 - 2.0, (i / 8) as f64 * 0.6 - 1.5))
            .collect();
        g.rebuild(&locs);

        let mut seen = HashSet::new();
        g.for_each_candidate(|p, q| {
            assert!(q < p);
            assert!(seen.insert((p, q)), "pair ({p}, {q}) visited twice");
        });

        // Every pair within one ball diameter must be a candidate
        for p in 0..locs.len() {
            for q in 0..p {
                if (locs[p] - locs[q]).length() < 1.0 {
                    assert!(seen.contains(&(p, q)));
                }
            }
        }
    }

    #[test]
    fn test_far_apart_balls_are_not_candidates() {
        let mut g = grid();
        g.rebuild(&[DVec2::new(-8.0, -8.0), DVec2::new(8.0, 8.0)]);
        let mut count = 0;
        g.for_each_candidate(|_, _| count += 1);
        assert_eq!(count, 0);
    }
}
