//! Dispersive billiard: the curved diamond left between four corner circles
//! of radius `r` centered at `(±r, ±r)`

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec2;

use super::{Boundary, BoundaryKind, Bounds, Contact, Outline, require_positive};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispersive {
    radius: f64,
}

impl Dispersive {
    pub fn new(radius: f64) -> Result<Self> {
        require_positive("dispersive radius", radius)?;
        Ok(Self { radius })
    }

    /// Center of the corner circle in the same quadrant as `loc`
    fn corner(&self, loc: DVec2) -> DVec2 {
        let sx = if loc.x < 0.0 { -1.0 } else { 1.0 };
        let sy = if loc.y < 0.0 { -1.0 } else { 1.0 };
        DVec2::new(sx, sy) * self.radius
    }
}

impl Boundary for Dispersive {
    fn bounds(&self) -> Bounds {
        Bounds::symmetric(self.radius, self.radius)
    }

    fn contact(&self, loc: DVec2, radius: f64) -> Option<Contact> {
        let center = self.corner(loc);
        let reach = self.radius + radius;
        ((loc - center).length_squared() < reach * reach).then_some(Contact::Convex {
            center,
            radius: self.radius,
        })
    }

    fn kind(&self) -> BoundaryKind {
        BoundaryKind::Dispersive {
            radius: self.radius,
        }
    }

    fn outline(&self) -> Vec<Outline> {
        let r = self.radius;
        [
            (DVec2::new(r, r), PI, PI + FRAC_PI_2),
            (DVec2::new(r, -r), FRAC_PI_2, PI),
            (DVec2::new(-r, -r), 0.0, FRAC_PI_2),
            (DVec2::new(-r, r), PI + FRAC_PI_2, TAU),
        ]
        .into_iter()
        .map(|(center, start, end)| Outline::Arc {
            center,
            radius: r,
            start,
            end,
        })
        .collect()
    }
}
