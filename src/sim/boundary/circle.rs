//! Circular billiard of radius `r` centered on the origin

use glam::DVec2;

use super::{Boundary, BoundaryKind, Bounds, Contact, Outline, require_positive};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Result<Self> {
        require_positive("circle radius", radius)?;
        Ok(Self { radius })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Boundary for Circle {
    fn bounds(&self) -> Bounds {
        Bounds::symmetric(self.radius, self.radius)
    }

    fn contact(&self, loc: DVec2, radius: f64) -> Option<Contact> {
        (loc.length() + radius > self.radius).then_some(Contact::Concave {
            center: DVec2::ZERO,
            radius: self.radius,
        })
    }

    fn kind(&self) -> BoundaryKind {
        BoundaryKind::Circle {
            radius: self.radius,
        }
    }

    fn outline(&self) -> Vec<Outline> {
        vec![Outline::Circle {
            center: DVec2::ZERO,
            radius: self.radius,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn test_rejects_non_positive_radius() {
        assert!(matches!(Circle::new(0.0), Err(SimError::InvalidConfiguration(_))));
        assert!(matches!(Circle::new(-3.0), Err(SimError::InvalidConfiguration(_))));
        assert!(Circle::new(f64::NAN).is_err());
    }

    #[test]
    fn test_radial_exit_bounces_back_inside() {
        let circle = Circle::new(12.0).unwrap();
        let dir = DVec2::new(3.0, 4.0).normalize();
        let loc = dir * 11.6;
        let vel = dir * 2.0;

        assert!(circle.out_of_bounds(loc, 0.5));
        let contact = circle.contact(loc, 0.5).unwrap();
        // Normal points back toward the center
        assert!((circle.normal(loc, &contact) + dir).length() < 1e-12);

        let out = circle.bounce(loc, vel, 0.5).unwrap().unwrap();
        assert!(out.loc.length() <= 11.5 + 1e-12);
        assert!(out.vel.dot(dir) < 0.0);
        assert!((out.vel.length() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_touching_is_not_out_of_bounds() {
        let circle = Circle::new(12.0).unwrap();
        assert!(!circle.out_of_bounds(DVec2::new(11.5, 0.0), 0.5));
        assert!(circle.out_of_bounds(DVec2::new(11.500001, 0.0), 0.5));
    }

    #[test]
    fn test_glancing_exit_uses_contact_normal() {
        let circle = Circle::new(10.0).unwrap();
        // Oblique exit: tangential component survives, radial flips
        let loc = DVec2::new(9.0, 4.0);
        let vel = DVec2::new(1.0, 1.0);
        let contact = circle.contact(loc, 0.5).unwrap();
        let dt = circle.rewind_time(loc, vel, 0.5, &contact).unwrap();
        let touch = loc - vel * dt;
        assert!((touch.length() - 9.5).abs() < 1e-9);

        let out = circle.bounce_off(loc, vel, 0.5, &contact).unwrap();
        let n = touch.normalize();
        assert!((out.vel.dot(n) + vel.dot(n)).abs() < 1e-9);
        let tangent = n.perp();
        assert!((out.vel.dot(tangent) - vel.dot(tangent)).abs() < 1e-9);
    }
}
