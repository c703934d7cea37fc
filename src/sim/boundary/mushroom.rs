//! Mushroom billiard: a semicircular cap sitting on a narrower rectangular stalk
//!
//! The cap is centered on the origin and spans `y >= 0`; the stalk hangs below
//! it, `|x| <= stalk_width / 2` and `-stalk_height <= y <= 0`.

use std::f64::consts::PI;

use glam::DVec2;

use super::{Boundary, BoundaryKind, Bounds, Contact, Outline, deepest, require_positive};
use crate::error::{Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mushroom {
    radius: f64,
    /// Half-width of the stalk
    half_stalk: f64,
    stalk_height: f64,
}

impl Mushroom {
    pub fn new(radius: f64, stalk_width: f64, stalk_height: f64) -> Result<Self> {
        require_positive("mushroom radius", radius)?;
        require_positive("mushroom stalk width", stalk_width)?;
        require_positive("mushroom stalk height", stalk_height)?;
        if stalk_width >= 2.0 * radius {
            return Err(SimError::config(format!(
                "stalk (width {stalk_width}) must be narrower than the cap (radius {radius})"
            )));
        }
        Ok(Self {
            radius,
            half_stalk: stalk_width / 2.0,
            stalk_height,
        })
    }
}

impl Boundary for Mushroom {
    fn bounds(&self) -> Bounds {
        Bounds::new(-self.radius, self.radius, -self.stalk_height, self.radius)
    }

    fn contact(&self, loc: DVec2, radius: f64) -> Option<Contact> {
        if loc.y > 0.0 {
            if loc.x.abs() >= self.half_stalk && loc.y < radius {
                // Underside ledge of the cap
                return Some(Contact::wall(DVec2::Y, 0.0));
            }
            let inner = self.radius - radius;
            return (loc.length_squared() > inner * inner).then_some(Contact::Concave {
                center: DVec2::ZERO,
                radius: self.radius,
            });
        }

        let mut hits = Vec::with_capacity(2);
        if self.half_stalk - loc.x.abs() < radius {
            let normal = DVec2::new(-loc.x.signum(), 0.0);
            hits.push(Contact::wall(normal, -self.half_stalk));
        }
        if self.stalk_height + loc.y < radius {
            hits.push(Contact::wall(DVec2::Y, -self.stalk_height));
        }
        deepest(loc, radius, hits)
    }

    fn kind(&self) -> BoundaryKind {
        BoundaryKind::Mushroom {
            radius: self.radius,
            stalk_width: self.half_stalk * 2.0,
            stalk_height: self.stalk_height,
        }
    }

    fn outline(&self) -> Vec<Outline> {
        let (r, w, h) = (self.radius, self.half_stalk, self.stalk_height);
        let line = |ax, ay, bx, by| Outline::Line {
            from: DVec2::new(ax, ay),
            to: DVec2::new(bx, by),
        };
        vec![
            Outline::Arc {
                center: DVec2::ZERO,
                radius: r,
                start: 0.0,
                end: PI,
            },
            line(-r, 0.0, -w, 0.0),
            line(-w, 0.0, -w, -h),
            line(-w, -h, w, -h),
            line(w, 0.0, w, -h),
            line(r, 0.0, w, 0.0),
        ]
    }
}
