//! Drawable outline primitives handed to visualization
//!
//! Angles are radians, counter-clockwise from +x.

use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Outline {
    Circle {
        center: DVec2,
        radius: f64,
    },
    Arc {
        center: DVec2,
        radius: f64,
        start: f64,
        end: f64,
    },
    Line {
        from: DVec2,
        to: DVec2,
    },
    Rectangle {
        center: DVec2,
        half_extents: DVec2,
    },
    Ellipse {
        center: DVec2,
        semi_axes: DVec2,
    },
}

impl Outline {
    /// Sample points along the primitive (for plotting or debugging)
    pub fn sample(&self, num_points: usize) -> Vec<DVec2> {
        let n = num_points.max(2);
        let along = |i: usize| i as f64 / (n - 1) as f64;
        match *self {
            Outline::Circle { center, radius } => {
                Outline::Arc {
                    center,
                    radius,
                    start: 0.0,
                    end: std::f64::consts::TAU,
                }
                .sample(n)
            }
            Outline::Arc {
                center,
                radius,
                start,
                end,
            } => (0..n)
                .map(|i| {
                    let theta = start + along(i) * (end - start);
                    center + DVec2::from_angle(theta) * radius
                })
                .collect(),
            Outline::Line { from, to } => (0..n).map(|i| from.lerp(to, along(i))).collect(),
            Outline::Rectangle {
                center,
                half_extents: h,
            } => vec![
                center + DVec2::new(-h.x, -h.y),
                center + DVec2::new(h.x, -h.y),
                center + DVec2::new(h.x, h.y),
                center + DVec2::new(-h.x, h.y),
                center + DVec2::new(-h.x, -h.y),
            ],
            Outline::Ellipse { center, semi_axes } => (0..n)
                .map(|i| {
                    let theta = along(i) * std::f64::consts::TAU;
                    center + DVec2::from_angle(theta) * semi_axes
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_arc_samples_lie_on_circle() {
        let arc = Outline::Arc {
            center: DVec2::new(1.0, 0.0),
            radius: 2.0,
            start: -PI / 2.0,
            end: PI / 2.0,
        };
        let pts = arc.sample(9);
        assert_eq!(pts.len(), 9);
        for p in &pts {
            assert!(((*p - DVec2::new(1.0, 0.0)).length() - 2.0).abs() < 1e-12);
        }
        assert!((pts[0] - DVec2::new(1.0, -2.0)).length() < 1e-12);
    }

    #[test]
    fn test_rectangle_closes() {
        let rect = Outline::Rectangle {
            center: DVec2::ZERO,
            half_extents: DVec2::new(10.0, 5.0),
        };
        let pts = rect.sample(0);
        assert_eq!(pts.first(), pts.last());
    }
}
