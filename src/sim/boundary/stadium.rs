//! Stadium billiard: a rectangle capped by semicircles at each end

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec2;

use super::{Boundary, BoundaryKind, Bounds, Contact, Outline, require_positive};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stadium {
    /// Cap radius, also the half-height of the straight section
    radius: f64,
    /// Half-length of the straight section
    half_width: f64,
}

impl Stadium {
    pub fn new(radius: f64, width: f64) -> Result<Self> {
        require_positive("stadium radius", radius)?;
        require_positive("stadium width", width)?;
        Ok(Self {
            radius,
            half_width: width / 2.0,
        })
    }

    /// Center of the end cap nearest to `loc`
    fn cap_center(&self, loc: DVec2) -> DVec2 {
        if loc.x < 0.0 {
            DVec2::new(-self.half_width, 0.0)
        } else {
            DVec2::new(self.half_width, 0.0)
        }
    }
}

impl Boundary for Stadium {
    fn bounds(&self) -> Bounds {
        Bounds::symmetric(self.half_width + self.radius, self.radius)
    }

    fn contact(&self, loc: DVec2, radius: f64) -> Option<Contact> {
        if loc.x.abs() < self.half_width {
            if self.radius - loc.y.abs() < radius {
                let normal = DVec2::new(0.0, -loc.y.signum());
                return Some(Contact::wall(normal, -self.radius));
            }
            return None;
        }
        let center = self.cap_center(loc);
        ((loc - center).length() > self.radius - radius).then_some(Contact::Concave {
            center,
            radius: self.radius,
        })
    }

    fn kind(&self) -> BoundaryKind {
        BoundaryKind::Stadium {
            radius: self.radius,
            width: self.half_width * 2.0,
        }
    }

    fn outline(&self) -> Vec<Outline> {
        let (w, r) = (self.half_width, self.radius);
        vec![
            Outline::Arc {
                center: DVec2::new(-w, 0.0),
                radius: r,
                start: FRAC_PI_2,
                end: PI + FRAC_PI_2,
            },
            Outline::Arc {
                center: DVec2::new(w, 0.0),
                radius: r,
                start: -FRAC_PI_2,
                end: FRAC_PI_2,
            },
            Outline::Line {
                from: DVec2::new(-w, r),
                to: DVec2::new(w, r),
            },
            Outline::Line {
                from: DVec2::new(-w, -r),
                to: DVec2::new(w, -r),
            },
        ]
    }
}
