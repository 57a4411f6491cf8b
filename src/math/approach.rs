use glam::Vec3;

/// Below this distance the anchor is considered arrived and snapped exactly
pub const ARRIVAL_EPSILON: f32 = 0.015;

/// Eased approach speed in units per second for the remaining `distance`.
///
/// The multiplier `max(4 - distance, 1)` boosts close-range motion and never
/// drops below 1, so far targets are approached at `distance` units per second.
pub fn approach_speed(distance: f32) -> f32 {
    distance * (4.0 - distance).max(1.0)
}

/// Displacement that moves a point at `from` towards `to` for one step of `dt`
/// seconds. `boost` adds a constant one unit per second on top of the eased term.
pub fn approach_step(from: Vec3, to: Vec3, dt: f32, boost: bool) -> Vec3 {
    let delta = from - to;
    let direction = delta.normalize_or_zero();
    let eased = direction * dt * approach_speed(delta.length());

    if boost {
        -(eased + direction * dt)
    } else {
        -eased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_far_uses_unit_multiplier() {
        assert!((approach_speed(5.0) - 5.0).abs() < 1e-6);
        assert!((approach_speed(100.0) - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_speed_close_range_multiplier() {
        // 1 * (4 - 1)
        assert!((approach_speed(1.0) - 3.0).abs() < 1e-6);
        assert_eq!(approach_speed(0.0), 0.0);
    }

    #[test]
    fn test_multiplier_never_below_one() {
        for i in 0..200 {
            let distance = i as f32 * 0.05;
            assert!(approach_speed(distance) >= distance - 1e-5);
        }
    }

    #[test]
    fn test_step_moves_towards_target() {
        let step = approach_step(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, 0.02, false);
        assert!((step - Vec3::new(-0.1, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_boosted_step_adds_constant_term() {
        let step = approach_step(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, 0.02, true);
        assert!((step - Vec3::new(0.0, -0.12, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_step_at_target_is_zero() {
        let step = approach_step(Vec3::ONE, Vec3::ONE, 0.02, true);
        assert_eq!(step, Vec3::ZERO);
    }
}
