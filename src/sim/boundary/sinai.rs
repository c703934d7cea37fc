//! Sinai billiard: a square box with a concentric circular obstacle

use glam::DVec2;

use super::{Boundary, BoundaryKind, Bounds, Contact, Outline, box_walls, deepest, require_positive};
use crate::error::{Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sinai {
    /// Radius of the central obstacle
    radius: f64,
    /// Half side-length of the box
    half: f64,
}

impl Sinai {
    /// `radius` must be strictly smaller than `width / 2`
    pub fn new(radius: f64, width: f64) -> Result<Self> {
        require_positive("sinai radius", radius)?;
        require_positive("sinai width", width)?;
        if radius >= width / 2.0 {
            return Err(SimError::config(format!(
                "central obstacle (radius {radius}) must be smaller than the box (width {width})"
            )));
        }
        Ok(Self {
            radius,
            half: width / 2.0,
        })
    }

    fn obstacle(&self) -> Contact {
        Contact::Convex {
            center: DVec2::ZERO,
            radius: self.radius,
        }
    }
}

impl Boundary for Sinai {
    fn bounds(&self) -> Bounds {
        Bounds::symmetric(self.half, self.half)
    }

    fn contact(&self, loc: DVec2, radius: f64) -> Option<Contact> {
        let reach = self.radius + radius;
        if loc.length_squared() <= reach * reach {
            return Some(self.obstacle());
        }
        deepest(loc, radius, box_walls(loc, radius, DVec2::splat(self.half)))
    }

    fn kind(&self) -> BoundaryKind {
        BoundaryKind::Sinai {
            radius: self.radius,
            width: self.half * 2.0,
        }
    }

    fn outline(&self) -> Vec<Outline> {
        vec![
            Outline::Circle {
                center: DVec2::ZERO,
                radius: self.radius,
            },
            Outline::Rectangle {
                center: DVec2::ZERO,
                half_extents: DVec2::splat(self.half),
            },
        ]
    }
}
