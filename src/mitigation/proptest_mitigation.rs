//! Property-based tests for the mitigation formulas using proptest.

use chrono::Days;
use proptest::prelude::*;

use super::*;
use crate::test_utils::fixtures;
use crate::types::SAFE_MISS_DISTANCE_KM;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The safe flag is exactly `original + change > 3 Earth radii`.
    #[test]
    fn prop_safe_iff_beyond_threshold(
        delta_v in -10.0f64..10.0,
        miss_km in 0.0f64..1e7,
        lead_days in -3000i64..30000,
    ) {
        let now = fixtures::date(2025, 1, 1);
        let approach_date = if lead_days >= 0 {
            now + Days::new(lead_days as u64)
        } else {
            now - Days::new(lead_days.unsigned_abs())
        };
        let approach = CloseApproach::new(approach_date, miss_km, "Earth");
        let change = calculate_miss_distance_change(delta_v, &approach, now);

        prop_assert_eq!(change.safe, change.original + change.change > SAFE_MISS_DISTANCE_KM);
        prop_assert_eq!(change.new, change.original + change.change);
    }

    /// The change has the sign of Δv × lead time.
    #[test]
    fn prop_change_sign_follows_lead_time(
        delta_v in 1e-6f64..10.0,
        lead_days in 1i64..30000,
        ahead in any::<bool>(),
    ) {
        let now = fixtures::date(2030, 6, 1);
        let approach_date = if ahead {
            now + Days::new(lead_days as u64)
        } else {
            now - Days::new(lead_days as u64)
        };
        let approach = CloseApproach::new(approach_date, 50_000.0, "Earth");
        let change = calculate_miss_distance_change(delta_v, &approach, now);

        if ahead {
            prop_assert!(change.change > 0.0);
        } else {
            prop_assert!(change.change < 0.0);
        }
    }

    /// Kinetic delta-v scales inversely with asteroid mass.
    #[test]
    fn prop_kinetic_inverse_in_mass(mass in 1e6f64..1e15) {
        let approach = fixtures::approach("2040-01-01", 10_000.0);
        let params = ParamValues::defaults(MitigationMethod::Kinetic);
        let dv = |m: f64| {
            let ctx = MitigationContext {
                asteroid_mass_kg: m,
                approach: &approach,
                current_date: fixtures::date(2025, 1, 1),
            };
            MitigationMethod::Kinetic
                .calculate(&params, &ctx)
                .unwrap()
                .delta_v
                .meters_per_second()
                .unwrap()
        };
        let ratio = dv(mass) / dv(2.0 * mass);
        prop_assert!((ratio - 2.0).abs() < 1e-9, "ratio {}", ratio);
    }

    /// Any value written through `set` lands inside the schema bounds.
    #[test]
    fn prop_set_stays_in_bounds(value in -1e6f64..1e6, method_index in 0usize..4) {
        let method = ALL_METHODS[method_index];
        let mut params = ParamValues::defaults(method);
        for spec in method.params() {
            let stored = params.set(spec.id, value).unwrap();
            prop_assert!(stored >= spec.min && stored <= spec.max);
        }
    }
}
