//! Rectangular billiard centered on the origin

use glam::DVec2;

use super::{Boundary, BoundaryKind, Bounds, Contact, Outline, box_walls, deepest, require_positive};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    half: DVec2,
}

impl Rectangle {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        require_positive("rectangle width", width)?;
        require_positive("rectangle height", height)?;
        Ok(Self {
            half: DVec2::new(width, height) / 2.0,
        })
    }

    pub fn width(&self) -> f64 {
        self.half.x * 2.0
    }

    pub fn height(&self) -> f64 {
        self.half.y * 2.0
    }
}

impl Boundary for Rectangle {
    fn bounds(&self) -> Bounds {
        Bounds::symmetric(self.half.x, self.half.y)
    }

    /// In a corner both walls are touched; the deeper one is resolved first
    /// and the other is picked up on a later tick
    fn contact(&self, loc: DVec2, radius: f64) -> Option<Contact> {
        deepest(loc, radius, box_walls(loc, radius, self.half))
    }

    fn kind(&self) -> BoundaryKind {
        BoundaryKind::Rectangle {
            width: self.width(),
            height: self.height(),
        }
    }

    fn outline(&self) -> Vec<Outline> {
        vec![Outline::Rectangle {
            center: DVec2::ZERO,
            half_extents: self.half,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_wall_bounce() {
        let rect = Rectangle::new(20.0, 20.0).unwrap();
        // 0.1 from the left wall, mid-height
        let loc = DVec2::new(-9.9, 0.0);
        let vel = DVec2::new(-1.5, 0.0);

        assert!(rect.out_of_bounds(loc, 0.25));
        let contact = rect.contact(loc, 0.25).unwrap();
        assert_eq!(rect.normal(loc, &contact), DVec2::new(1.0, 0.0));

        let out = rect.bounce_off(loc, vel, 0.25, &contact).unwrap();
        assert_eq!(out.vel.x, -vel.x);
        assert_eq!(out.vel.y, vel.y);
        // Reflected about x = -9.75
        assert!((out.loc.x - (-9.6)).abs() < 1e-12);
    }

    #[test]
    fn test_oblique_top_wall() {
        let rect = Rectangle::new(20.0, 10.0).unwrap();
        let loc = DVec2::new(2.0, 4.9);
        let vel = DVec2::new(0.7, 1.0);
        let out = rect.bounce(loc, vel, 0.25).unwrap().unwrap();
        assert_eq!(out.vel, DVec2::new(0.7, -1.0));
        assert!(out.loc.y < 4.75);
    }

    #[test]
    fn test_corner_picks_deeper_wall() {
        let rect = Rectangle::new(20.0, 20.0).unwrap();
        let loc = DVec2::new(9.9, -9.8);
        let contact = rect.contact(loc, 0.25).unwrap();
        assert_eq!(contact, Contact::wall(DVec2::new(-1.0, 0.0), -10.0));
    }

    #[test]
    fn test_clear_interior() {
        let rect = Rectangle::new(20.0, 20.0).unwrap();
        assert!(!rect.out_of_bounds(DVec2::new(9.0, -9.0), 0.25));
        assert_eq!(rect.bounds(), Bounds::new(-10.0, 10.0, -10.0, 10.0));
    }
}
