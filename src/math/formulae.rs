//! Analytic kernels shared by every boundary and the pairwise resolver

use glam::DVec2;

use crate::consts::REPEATED_ROOT_TOLERANCE;
use crate::error::{Result, SimError};

/// Real roots of a quadratic
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Roots {
    /// Repeated root (discriminant within tolerance of zero)
    One(f64),
    Two(f64, f64),
}

impl Roots {
    /// Contact-time tie-break: a single root as-is, the smaller of two
    /// positive roots, otherwise the larger root.
    pub fn contact_time(self) -> f64 {
        match self {
            Roots::One(t) => t,
            Roots::Two(a, b) if a > 0.0 && b > 0.0 => a.min(b),
            Roots::Two(a, b) => a.max(b),
        }
    }
}

/// Solve `a·x² + b·x + c = 0` over the reals; `a == 0` is not a quadratic
/// and has no solution here
pub fn quadratic_real_roots(a: f64, b: f64, c: f64) -> Result<Roots> {
    if a == 0.0 {
        return Err(SimError::NoRealSolution { discriminant: b * b });
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 || disc.is_nan() {
        return Err(SimError::NoRealSolution { discriminant: disc });
    }
    if disc < REPEATED_ROOT_TOLERANCE {
        return Ok(Roots::One(-b / (2.0 * a)));
    }
    let sqrt_disc = disc.sqrt();
    Ok(Roots::Two(
        (-b + sqrt_disc) / (2.0 * a),
        (-b - sqrt_disc) / (2.0 * a),
    ))
}

/// How long ago two linearly moving circles first touched.
///
/// Solves `|Δx − Δv·t| = r1 + r2` for the elapsed time `t`. Passing a negated
/// radius for one circle turns exterior contact into interior containment
/// (ball of radius `r` inside a circular wall of radius `R` uses `-r, R`).
pub fn time_circles_intersected(
    loc1: DVec2,
    loc2: DVec2,
    vel1: DVec2,
    vel2: DVec2,
    r1: f64,
    r2: f64,
) -> Result<f64> {
    let dx = loc1 - loc2;
    let dv = vel1 - vel2;
    let reach = r1 + r2;

    let a = dv.dot(dv);
    if a == 0.0 {
        // No relative motion, contact time is undefined
        return Err(SimError::NoRealSolution { discriminant: 0.0 });
    }
    let b = -2.0 * dx.dot(dv);
    let c = dx.dot(dx) - reach * reach;

    let t = quadratic_real_roots(a, b, c)?.contact_time();
    if t < 0.0 {
        return Err(SimError::NegativeTime(t));
    }
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn residual(a: f64, b: f64, c: f64, x: f64) -> f64 {
        a * x * x + b * x + c
    }

    #[test]
    fn test_two_roots() {
        // (x - 1)(x - 3)
        let roots = quadratic_real_roots(1.0, -4.0, 3.0).unwrap();
        match roots {
            Roots::Two(a, b) => {
                assert!((a.max(b) - 3.0).abs() < 1e-12);
                assert!((a.min(b) - 1.0).abs() < 1e-12);
            }
            Roots::One(_) => panic!("expected two roots"),
        }
    }

    #[test]
    fn test_repeated_root() {
        // (x - 2)^2
        assert_eq!(quadratic_real_roots(1.0, -4.0, 4.0).unwrap(), Roots::One(2.0));
    }

    #[test]
    fn test_negative_discriminant() {
        let err = quadratic_real_roots(1.0, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, SimError::NoRealSolution { .. }));
    }

    #[test]
    fn test_linear_equation_is_rejected() {
        // 2x + 1 = 0 and 0 = 1 are not quadratics
        for (b, c) in [(2.0, 1.0), (0.0, 1.0), (0.0, 0.0)] {
            let err = quadratic_real_roots(0.0, b, c).unwrap_err();
            assert!(matches!(err, SimError::NoRealSolution { .. }));
        }
    }

    #[test]
    fn test_contact_time_tie_break() {
        assert_eq!(Roots::One(0.4).contact_time(), 0.4);
        assert_eq!(Roots::Two(0.5, 2.0).contact_time(), 0.5);
        assert_eq!(Roots::Two(-1.0, 0.25).contact_time(), 0.25);
        assert_eq!(Roots::Two(-1.0, -0.25).contact_time(), -0.25);
    }

    #[test]
    fn test_head_on_overlap() {
        // Balls 0.9 apart, radii 0.5 each, closing at 2 units/s -> touched 0.05s ago
        let t = time_circles_intersected(
            DVec2::new(-0.45, 0.0),
            DVec2::new(0.45, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(-1.0, 0.0),
            0.5,
            0.5,
        )
        .unwrap();
        assert!((t - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_interior_contact_with_negated_radius() {
        // Ball r=0.5 at 11.6 inside a circle of radius 12, moving outward at 1
        let t = time_circles_intersected(
            DVec2::new(11.6, 0.0),
            DVec2::ZERO,
            DVec2::new(1.0, 0.0),
            DVec2::ZERO,
            -0.5,
            12.0,
        )
        .unwrap();
        assert!((t - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_no_relative_motion() {
        let err = time_circles_intersected(
            DVec2::ZERO,
            DVec2::new(0.5, 0.0),
            DVec2::X,
            DVec2::X,
            0.5,
            0.5,
        )
        .unwrap_err();
        assert!(err.is_skippable());
    }

    #[test]
    fn test_separating_pair_is_negative_time() {
        // Already past each other's centers and separating: the relevant root
        // lies in the future
        let err = time_circles_intersected(
            DVec2::new(2.0, 0.0),
            DVec2::ZERO,
            DVec2::new(1.0, 0.0),
            DVec2::ZERO,
            0.5,
            0.5,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::NegativeTime(_)));
    }

    proptest! {
        #[test]
        fn prop_roots_satisfy_equation(
            a in prop_oneof![-50.0f64..-0.1, 0.1f64..50.0],
            r1 in -20.0f64..20.0,
            r2 in -20.0f64..20.0,
        ) {
            let b = -a * (r1 + r2);
            let c = a * r1 * r2;
            let scale = a.abs() * (1.0 + r1.abs() + r2.abs()).powi(2);
            match quadratic_real_roots(a, b, c).unwrap() {
                Roots::One(x) => prop_assert!(residual(a, b, c, x).abs() < 1e-6 * scale),
                Roots::Two(x, y) => {
                    prop_assert!(residual(a, b, c, x).abs() < 1e-9 * scale);
                    prop_assert!(residual(a, b, c, y).abs() < 1e-9 * scale);
                }
            }
        }

        #[test]
        fn prop_rewound_circles_touch(
            px in -5.0f64..5.0,
            py in -5.0f64..5.0,
            vx in -3.0f64..3.0,
            vy in -3.0f64..3.0,
            r1 in 0.1f64..1.0,
            r2 in 0.1f64..1.0,
            back in 0.01f64..0.5,
        ) {
            let rel_vel = DVec2::new(vx, vy);
            prop_assume!(rel_vel.length() > 0.1);
            // Start touching, then approach along the line of centers' opposite
            let dir = rel_vel.normalize();
            let contact1 = DVec2::new(px, py);
            let contact2 = contact1 + dir * (r1 + r2);
            let loc1 = contact1 + rel_vel * back;
            let loc2 = contact2;

            let t = time_circles_intersected(loc1, loc2, rel_vel, DVec2::ZERO, r1, r2).unwrap();
            let dist = ((loc1 - rel_vel * t) - loc2).length();
            prop_assert!((dist - (r1 + r2)).abs() < 1e-9);
        }
    }
}
