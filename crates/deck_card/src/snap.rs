//! Release destination selection
//!
//! A released card keeps travelling for a moment, so the drop position is
//! projected along the release velocity before picking the nearest snap point.

/// Pick the snap point nearest to `value` projected `projection` seconds along `velocity`.
///
/// Ties on the projected distance go to the point nearest `value` itself,
/// then to the earliest point in `points`. Returns `value` when `points` is empty.
pub fn snap_point(value: f32, velocity: f32, points: &[f32], projection: f32) -> f32 {
    let projected = value + projection * velocity;

    let mut best: Option<(f32, f32, f32)> = None;
    for &point in points {
        let projected_distance = (projected - point).abs();
        let current_distance = (value - point).abs();

        let better = match best {
            None => true,
            Some((_, best_projected, best_current)) => {
                projected_distance < best_projected
                    || (projected_distance == best_projected && current_distance < best_current)
            }
        };
        if better {
            best = Some((point, projected_distance, current_distance));
        }
    }

    best.map_or(value, |(point, _, _)| point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const POINTS: [f32; 3] = [-351.0, 0.0, 351.0];
    const PROJECTION: f32 = 0.2;

    #[test]
    fn test_rest_snaps_to_center() {
        assert_eq!(snap_point(0.0, 0.0, &POINTS, PROJECTION), 0.0);
    }

    #[test]
    fn test_strong_fling_snaps_to_side() {
        assert_eq!(snap_point(-5.0, -2000.0, &POINTS, PROJECTION), -351.0);
        assert_eq!(snap_point(5.0, 2000.0, &POINTS, PROJECTION), 351.0);
    }

    #[test]
    fn test_slow_drop_snaps_to_nearest() {
        assert_eq!(snap_point(120.0, 0.0, &POINTS, PROJECTION), 0.0);
        assert_eq!(snap_point(200.0, 0.0, &POINTS, PROJECTION), 351.0);
        assert_eq!(snap_point(-200.0, 50.0, &POINTS, PROJECTION), -351.0);
    }

    #[test]
    fn test_fling_against_position_can_return() {
        // Dragged far right but thrown back hard
        assert_eq!(snap_point(250.0, -1500.0, &POINTS, PROJECTION), 0.0);
    }

    #[test]
    fn test_on_candidate_with_small_velocity_stays() {
        assert_eq!(snap_point(351.0, -30.0, &POINTS, PROJECTION), 351.0);
        assert_eq!(snap_point(-351.0, 30.0, &POINTS, PROJECTION), -351.0);
        assert_eq!(snap_point(0.0, 40.0, &POINTS, PROJECTION), 0.0);
    }

    #[test]
    fn test_projected_tie_prefers_nearest_to_current() {
        // Projects to exactly 175.5, halfway between 0 and 351
        assert_eq!(snap_point(195.5, -100.0, &POINTS, PROJECTION), 351.0);
        assert_eq!(snap_point(155.5, 100.0, &POINTS, PROJECTION), 0.0);
    }

    #[test]
    fn test_empty_points_returns_value() {
        assert_eq!(snap_point(12.0, 500.0, &[], PROJECTION), 12.0);
    }

    proptest! {
        #[test]
        fn prop_snap_is_deterministic(x in -1000.0f32..1000.0, v in -5000.0f32..5000.0) {
            let first = snap_point(x, v, &POINTS, PROJECTION);
            let second = snap_point(x, v, &POINTS, PROJECTION);
            prop_assert_eq!(first, second);
            prop_assert!(POINTS.contains(&first));
        }

        #[test]
        fn prop_snap_is_nearest_to_projection(x in -1000.0f32..1000.0, v in -5000.0f32..5000.0) {
            let chosen = snap_point(x, v, &POINTS, PROJECTION);
            let projected = x + PROJECTION * v;
            for point in POINTS {
                prop_assert!((projected - chosen).abs() <= (projected - point).abs());
            }
        }
    }
}
