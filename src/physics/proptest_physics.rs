//! Property-based tests for the mass model and Euler propagator using proptest.
//!
//! These tests verify invariants across a wide range of sizes and orbits.

use bevy::math::DVec3;
use proptest::prelude::*;

use super::*;
use crate::mitigation::{ALL_METHODS, MitigationMethod};
use crate::test_utils::{assertions, fixtures};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Mass grows strictly with radius at fixed density.
    #[test]
    fn prop_mass_monotonic_in_radius(
        radius in 0.1f64..5000.0,
        growth in 1.001f64..3.0,
        density in 500.0f64..8000.0,
    ) {
        let small = calculate_mass(radius, density);
        let large = calculate_mass(radius * growth, density);
        prop_assert!(large > small);
    }

    /// Mass is linear in density.
    #[test]
    fn prop_mass_linear_in_density(radius in 0.1f64..5000.0, density in 500.0f64..8000.0) {
        let single = calculate_mass(radius, density);
        let double = calculate_mass(radius, 2.0 * density);
        prop_assert!(((double / single) - 2.0).abs() < 1e-12);
    }

    /// Every propagation yields 365 samples starting at the input position.
    #[test]
    fn prop_orbit_shape(
        distance_au in 0.5f64..5.0,
        angle in 0.0f64..std::f64::consts::TAU,
        inclination in -0.3f64..0.3,
        delta_v in 0.0f64..50.0,
        method_index in 0usize..4,
    ) {
        let (pos, vel) = fixtures::inclined_state_au(distance_au, angle, inclination);
        let method: MitigationMethod = ALL_METHODS[method_index];
        let orbit = calculate_new_orbit(pos, vel, delta_v, method).unwrap();

        prop_assert_eq!(orbit.len(), ORBIT_DAYS);
        prop_assert!((orbit[0].pos - pos).length() < 1e-12);
        for (i, sample) in orbit.iter().enumerate() {
            prop_assert_eq!(sample.day as usize, i);
            prop_assert!(sample.pos.is_finite());
        }
    }

    /// Updating velocity before position conserves angular momentum exactly,
    /// so consecutive samples sweep a constant `p_k × p_(k+1)`.
    #[test]
    fn prop_swept_area_constant(
        distance_au in 0.7f64..4.0,
        angle in 0.0f64..std::f64::consts::TAU,
        delta_v in 0.0f64..20.0,
    ) {
        let (pos, vel) = fixtures::inclined_state_au(distance_au, angle, 0.1);
        let orbit = calculate_new_orbit(pos, vel, delta_v, MitigationMethod::Kinetic).unwrap();

        let first = orbit[0].pos.cross(orbit[1].pos);
        for pair in orbit.windows(2).skip(1) {
            let swept = pair[0].pos.cross(pair[1].pos);
            prop_assert!(
                (swept - first).length() / first.length() < 1e-9,
                "swept area drifted: {:?} vs {:?}", swept, first
            );
        }
    }

    /// Velocity estimated from two samples reproduces their separation.
    #[test]
    fn prop_estimate_velocity_roundtrip(
        x in -3.0f64..3.0,
        y in -3.0f64..3.0,
        dx in -0.02f64..0.02,
        dy in -0.02f64..0.02,
    ) {
        let p0 = DVec3::new(x, y, 0.0);
        let p1 = p0 + DVec3::new(dx, dy, 0.0);
        let v = estimate_velocity([p0, p1]);
        let back = p0 + v * crate::types::SECONDS_PER_DAY * crate::types::METERS_TO_AU;
        prop_assert!((back - p1).length() < 1e-12);
    }
}

#[cfg(test)]
mod deterministic_tests {
    use super::*;
    use crate::types::{AU_TO_METERS, GM_SUN};

    #[test]
    fn test_inclined_fixture_is_circular() {
        let (pos, vel) = fixtures::inclined_state_au(1.0, 0.5, 0.2);
        let r = pos.length() * AU_TO_METERS;
        assert!((vel.length() - (GM_SUN / r).sqrt()).abs() < 1e-6);
        assert!(pos.dot(vel).abs() < 1e-6);
    }

    #[test]
    fn test_escape_velocity_formula() {
        let r = AU_TO_METERS;
        let v_esc = assertions::escape_velocity(r);
        let expected = (2.0 * GM_SUN / r).sqrt();
        assert!((v_esc - expected).abs() < 1.0);
    }
}
