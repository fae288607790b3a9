//! Easing curves for time-based animations
//!
//! Every curve maps normalized progress `t` in `[0, 1]` to eased progress,
//! with `apply(0.0) == 0.0` and `apply(1.0) == 1.0`.

use serde::{Deserialize, Serialize};

/// Control points of the inertial `ease` curve: a slow start, reaching full speed at the end
const EASE: (f32, f32, f32, f32) = (0.42, 0.0, 1.0, 1.0);

/// Easing function applied to normalized progress
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Quadratic ease in
    EaseIn,
    /// Quadratic ease out
    EaseOut,
    /// Quadratic ease in-out
    EaseInOut,
    /// Inertial ease in, `cubic-bezier(0.42, 0, 1, 1)`
    Ease,
    /// `Ease` mirrored around the midpoint: eases in and out symmetrically.
    ///
    /// This is the default curve for card transitions.
    #[default]
    InOutEase,
    /// Arbitrary cubic bezier with control points `[x1, y1, x2, y2]`
    CubicBezier([f32; 4]),
}

impl Easing {
    /// Apply the easing to progress `t` (clamped to `[0, 1]`)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::Ease => cubic_bezier(EASE.0, EASE.1, EASE.2, EASE.3, t),
            Easing::InOutEase => {
                let ease = |t| cubic_bezier(EASE.0, EASE.1, EASE.2, EASE.3, t);
                if t < 0.5 {
                    ease(t * 2.0) / 2.0
                } else {
                    1.0 - ease((1.0 - t) * 2.0) / 2.0
                }
            }
            Easing::CubicBezier([x1, y1, x2, y2]) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

/// One coordinate of a unit cubic bezier (endpoints fixed at 0 and 1)
fn bezier_coord(t: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

fn bezier_slope(t: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// Evaluate the curve's y for a given x by solving x(t) = x
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    bezier_coord(solve_curve_t(x, x1, x2), y1, y2)
}

fn solve_curve_t(x: f32, x1: f32, x2: f32) -> f32 {
    const EPSILON: f32 = 1e-6;

    // Newton-Raphson converges in a few iterations for well-behaved curves
    let mut t = x;
    for _ in 0..8 {
        let err = bezier_coord(t, x1, x2) - x;
        if err.abs() < EPSILON {
            return t;
        }
        let slope = bezier_slope(t, x1, x2);
        if slope.abs() < EPSILON {
            break;
        }
        t -= err / slope;
    }

    // Fall back to bisection on flat segments
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    t = x;
    for _ in 0..32 {
        let value = bezier_coord(t, x1, x2);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::Ease,
        Easing::InOutEase,
        Easing::CubicBezier([0.42, 0.0, 0.58, 1.0]),
    ];

    #[test]
    fn test_easing_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-5, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-5, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_easing_clamps_input() {
        for easing in ALL {
            assert_eq!(easing.apply(-1.0), easing.apply(0.0));
            assert_eq!(easing.apply(2.0), easing.apply(1.0));
        }
    }

    #[test]
    fn test_in_out_ease_is_symmetric() {
        let easing = Easing::InOutEase;
        assert!((easing.apply(0.5) - 0.5).abs() < 1e-4);
        for i in 1..10 {
            let t = i as f32 / 20.0;
            let sum = easing.apply(t) + easing.apply(1.0 - t);
            assert!((sum - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_in_out_ease_curve_shape() {
        let easing = Easing::InOutEase;
        assert!((Easing::Ease.apply(0.5) - 0.3154).abs() < 1e-3);
        assert!((easing.apply(0.1) - 0.0311).abs() < 1e-3);
        assert!((easing.apply(0.25) - 0.1577).abs() < 1e-3);
        assert!((easing.apply(0.4) - 0.3458).abs() < 1e-3);
        assert!((easing.apply(0.75) - 0.8423).abs() < 1e-3);
    }

    #[test]
    fn test_ease_is_monotonic() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = Easing::Ease.apply(i as f32 / 100.0);
            assert!(v >= prev - 1e-5);
            prev = v;
        }
    }

    #[test]
    fn test_linear_bezier_matches_linear() {
        let linear = Easing::CubicBezier([0.0, 0.0, 1.0, 1.0]);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((linear.apply(t) - t).abs() < 1e-4);
        }
    }
}
