//! Elliptical billiard outline
//!
//! Only the bounding box and outline exist; contact geometry against the
//! ellipse has not been worked out, so `BoundaryKind::Ellipse` cannot be
//! built into a collision boundary.

use glam::DVec2;

use super::{BoundaryKind, Bounds, Outline, require_positive};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    semi_axes: DVec2,
}

impl Ellipse {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        require_positive("ellipse width", width)?;
        require_positive("ellipse height", height)?;
        Ok(Self {
            semi_axes: DVec2::new(width, height) / 2.0,
        })
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::symmetric(self.semi_axes.x, self.semi_axes.y)
    }

    pub fn kind(&self) -> BoundaryKind {
        BoundaryKind::Ellipse {
            width: self.semi_axes.x * 2.0,
            height: self.semi_axes.y * 2.0,
        }
    }

    pub fn outline(&self) -> Vec<Outline> {
        vec![Outline::Ellipse {
            center: DVec2::ZERO,
            semi_axes: self.semi_axes,
        }]
    }
}
