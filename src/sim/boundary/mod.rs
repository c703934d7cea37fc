//! Billiard boundaries: bounds, contact tests, normals and exact rewind
//!
//! A contact test returns the feature that was hit as a [`Contact`] value, and
//! the normal/rewind queries take that value back explicitly. Nothing about a
//! previous query is remembered by the shape.
//!
//! Normals point into the free region the balls move in (away from the wall).

pub mod circle;
pub mod dispersive;
pub mod ellipse;
pub mod mushroom;
pub mod outline;
pub mod rectangle;
pub mod sinai;
pub mod stadium;

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::math::time_circles_intersected;

pub use circle::Circle;
pub use dispersive::Dispersive;
pub use ellipse::Ellipse;
pub use mushroom::Mushroom;
pub use outline::Outline;
pub use rectangle::Rectangle;
pub use sinai::Sinai;
pub use stadium::Stadium;

/// Axis-aligned bounding box of a boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Box centered on the origin
    pub fn symmetric(half_width: f64, half_height: f64) -> Self {
        Self::new(-half_width, half_width, -half_height, half_height)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn min(&self) -> DVec2 {
        DVec2::new(self.x_min, self.y_min)
    }

    pub fn max(&self) -> DVec2 {
        DVec2::new(self.x_max, self.y_max)
    }
}

/// The wall feature a ball is touching
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Ball inside a circular wall of the given radius
    Concave { center: DVec2, radius: f64 },
    /// Ball outside a solid circular obstacle of the given radius
    Convex { center: DVec2, radius: f64 },
    /// Straight wall; the free side is `normal · x >= offset`
    Wall { normal: DVec2, offset: f64 },
}

impl Contact {
    /// Straight wall whose free side is `normal · x >= offset`
    pub fn wall(normal: DVec2, offset: f64) -> Self {
        Contact::Wall { normal, offset }
    }

    /// How far the ball of `radius` at `loc` has pushed into this feature
    pub fn penetration(&self, loc: DVec2, radius: f64) -> f64 {
        match *self {
            Contact::Concave { center, radius: r } => (loc - center).length() + radius - r,
            Contact::Convex { center, radius: r } => r + radius - (loc - center).length(),
            Contact::Wall { normal, offset } => radius - (normal.dot(loc) - offset),
        }
    }

    /// Unit normal at `loc`, pointing away from the wall
    pub fn normal(&self, loc: DVec2) -> DVec2 {
        match *self {
            Contact::Concave { center, .. } => (center - loc).normalize_or_zero(),
            Contact::Convex { center, .. } => (loc - center).normalize_or_zero(),
            Contact::Wall { normal, .. } => normal,
        }
    }

    /// Time elapsed since the ball's edge first touched this feature
    pub fn rewind_time(&self, loc: DVec2, vel: DVec2, radius: f64) -> Result<f64> {
        match *self {
            Contact::Concave { center, radius: r } => {
                time_circles_intersected(loc, center, vel, DVec2::ZERO, -radius, r)
            }
            Contact::Convex { center, radius: r } => {
                time_circles_intersected(loc, center, vel, DVec2::ZERO, radius, r)
            }
            Contact::Wall { normal, .. } => {
                let approach = -normal.dot(vel);
                if approach == 0.0 {
                    // Sliding along the wall, it was never hit
                    return Err(SimError::NoRealSolution { discriminant: 0.0 });
                }
                let t = self.penetration(loc, radius) / approach;
                if t < 0.0 {
                    return Err(SimError::NegativeTime(t));
                }
                Ok(t)
            }
        }
    }
}

/// Pick the feature the ball has pushed into the furthest
pub(crate) fn deepest(
    loc: DVec2,
    radius: f64,
    contacts: impl IntoIterator<Item = Contact>,
) -> Option<Contact> {
    contacts
        .into_iter()
        .map(|c| (c.penetration(loc, radius), c))
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, c)| c)
}

/// Walls of an origin-centered box the ball is touching
pub(crate) fn box_walls(loc: DVec2, radius: f64, half: DVec2) -> Vec<Contact> {
    let mut hits = Vec::new();
    if half.x - loc.x.abs() < radius {
        let normal = DVec2::new(-loc.x.signum(), 0.0);
        hits.push(Contact::wall(normal, -half.x));
    }
    if half.y - loc.y.abs() < radius {
        let normal = DVec2::new(0.0, -loc.y.signum());
        hits.push(Contact::wall(normal, -half.y));
    }
    hits
}

/// Reject non-positive or non-finite dimensions
pub(crate) fn require_positive(name: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(SimError::config(format!(
            "{name} must be greater than zero (got {value})"
        )));
    }
    Ok(())
}

/// Position and velocity after a wall bounce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    pub loc: DVec2,
    pub vel: DVec2,
}

/// Specular reflection `v' = v - 2(v·n)n`
#[inline]
pub fn reflect(vel: DVec2, normal: DVec2) -> DVec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

/// A closed region balls bounce around inside
pub trait Boundary: fmt::Debug {
    /// Bounding box, fixed at construction
    fn bounds(&self) -> Bounds;

    /// The feature a ball at `loc` is touching or penetrating, if any
    fn contact(&self, loc: DVec2, radius: f64) -> Option<Contact>;

    /// Shape name and parameters, enough to rebuild this boundary
    fn kind(&self) -> BoundaryKind;

    /// Drawable primitives
    fn outline(&self) -> Vec<Outline>;

    fn out_of_bounds(&self, loc: DVec2, radius: f64) -> bool {
        self.contact(loc, radius).is_some()
    }

    fn normal(&self, loc: DVec2, contact: &Contact) -> DVec2 {
        contact.normal(loc)
    }

    fn rewind_time(&self, loc: DVec2, vel: DVec2, radius: f64, contact: &Contact) -> Result<f64> {
        contact.rewind_time(loc, vel, radius)
    }

    /// Reflect a ball off the given feature.
    ///
    /// Rewinds to the moment of contact, reflects about the normal at the
    /// contact location, then replays the rewound time with the new velocity.
    fn bounce_off(&self, loc: DVec2, vel: DVec2, radius: f64, contact: &Contact) -> Result<Bounce> {
        let dt = self.rewind_time(loc, vel, radius, contact)?;
        let touch = loc - vel * dt;
        let vel = reflect(vel, self.normal(touch, contact));
        Ok(Bounce {
            loc: touch + vel * dt,
            vel,
        })
    }

    /// Contact test followed by [`Boundary::bounce_off`]; `None` when the
    /// ball is clear of every wall
    fn bounce(&self, loc: DVec2, vel: DVec2, radius: f64) -> Result<Option<Bounce>> {
        self.contact(loc, radius)
            .map(|contact| self.bounce_off(loc, vel, radius, &contact))
            .transpose()
    }
}

/// Shape name plus ordered numeric parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum BoundaryKind {
    Circle {
        radius: f64,
    },
    Rectangle {
        width: f64,
        height: f64,
    },
    Sinai {
        radius: f64,
        width: f64,
    },
    Stadium {
        radius: f64,
        width: f64,
    },
    Dispersive {
        radius: f64,
    },
    Mushroom {
        radius: f64,
        stalk_width: f64,
        stalk_height: f64,
    },
    Ellipse {
        width: f64,
        height: f64,
    },
}

impl BoundaryKind {
    pub fn name(&self) -> &'static str {
        match self {
            BoundaryKind::Circle { .. } => "circle",
            BoundaryKind::Rectangle { .. } => "rectangle",
            BoundaryKind::Sinai { .. } => "sinai",
            BoundaryKind::Stadium { .. } => "stadium",
            BoundaryKind::Dispersive { .. } => "dispersive",
            BoundaryKind::Mushroom { .. } => "mushroom",
            BoundaryKind::Ellipse { .. } => "ellipse",
        }
    }

    /// Ordered numeric parameters
    pub fn params(&self) -> Vec<f64> {
        match *self {
            BoundaryKind::Circle { radius } | BoundaryKind::Dispersive { radius } => vec![radius],
            BoundaryKind::Rectangle { width, height } | BoundaryKind::Ellipse { width, height } => {
                vec![width, height]
            }
            BoundaryKind::Sinai { radius, width } | BoundaryKind::Stadium { radius, width } => {
                vec![radius, width]
            }
            BoundaryKind::Mushroom {
                radius,
                stalk_width,
                stalk_height,
            } => vec![radius, stalk_width, stalk_height],
        }
    }

    /// Validate the parameters and construct the boundary
    pub fn build(&self) -> Result<Box<dyn Boundary>> {
        let boundary: Box<dyn Boundary> = match *self {
            BoundaryKind::Circle { radius } => Box::new(Circle::new(radius)?),
            BoundaryKind::Rectangle { width, height } => Box::new(Rectangle::new(width, height)?),
            BoundaryKind::Sinai { radius, width } => Box::new(Sinai::new(radius, width)?),
            BoundaryKind::Stadium { radius, width } => Box::new(Stadium::new(radius, width)?),
            BoundaryKind::Dispersive { radius } => Box::new(Dispersive::new(radius)?),
            BoundaryKind::Mushroom {
                radius,
                stalk_width,
                stalk_height,
            } => Box::new(Mushroom::new(radius, stalk_width, stalk_height)?),
            BoundaryKind::Ellipse { width, height } => {
                Ellipse::new(width, height)?;
                return Err(SimError::Unsupported("ellipse boundary collisions"));
            }
        };
        log::info!("Built {} boundary {:?}", self.name(), self.params());
        Ok(boundary)
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        for p in self.params() {
            write!(f, ", {p}")?;
        }
        Ok(())
    }
}
