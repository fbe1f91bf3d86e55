//! Test utilities shared by the unit tests.
//!
//! Provides catalog and approach fixtures, orbital states for the propagator
//! and a few physical-invariant helpers.

use bevy::math::DVec3;
use chrono::NaiveDate;

use crate::approach::{ApproachCursor, CloseApproach};
use crate::catalog::{
    AsteroidRecord, Catalog, CloseApproachRecord, MissDistanceRecord, PlanetTable, PositionRecord,
};
use crate::physics::calculate_mass;
use crate::types::{AU_TO_METERS, GM_SUN, parse_approach_date};

/// Fixtures for dates, catalog records and orbital states.
pub mod fixtures {
    use super::*;

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
    }

    /// Close approach to Earth on `date` (`YYYY-MM-DD` or `YYYY-Mon-DD`).
    pub fn approach(date: &str, miss_distance_km: f64) -> CloseApproach {
        let date = parse_approach_date(date).expect("valid fixture approach date");
        CloseApproach::new(date, miss_distance_km, "Earth")
    }

    pub fn approach_record(date: &str, miss_distance_km: f64) -> CloseApproachRecord {
        CloseApproachRecord {
            close_approach_date: Some(date.to_string()),
            miss_distance: Some(MissDistanceRecord {
                kilometers: Some(miss_distance_km),
                ..Default::default()
            }),
            orbiting_body: Some("Earth".to_string()),
        }
    }

    /// Cursor over `n` yearly approaches starting in 2030.
    pub fn cursor(n: usize) -> ApproachCursor {
        let approaches = (0..n)
            .map(|i| approach(&format!("{}-03-15", 2030 + i), 100_000.0 * (i + 1) as f64))
            .collect();
        ApproachCursor::new(approaches)
    }

    /// Mass of a 340 m rocky body (roughly Apophis).
    pub fn reference_mass() -> f64 {
        calculate_mass(170.0, 2600.0)
    }

    /// Circular orbit on the +x axis moving in +y.
    ///
    /// Position is in AU, velocity in m/s.
    pub fn circular_state_au(distance_au: f64) -> (DVec3, DVec3) {
        inclined_state_au(distance_au, 0.0, 0.0)
    }

    /// Circular orbit at orbital phase `angle` on a plane tilted by
    /// `inclination` about the x axis (radians).
    pub fn inclined_state_au(distance_au: f64, angle: f64, inclination: f64) -> (DVec3, DVec3) {
        let v = (GM_SUN / (distance_au * AU_TO_METERS)).sqrt();
        let (s, c) = angle.sin_cos();
        let (si, ci) = inclination.sin_cos();
        let tilt = |x: f64, y: f64| DVec3::new(x, y * ci, y * si);
        (tilt(distance_au * c, distance_au * s), tilt(-v * s, v * c))
    }

    /// Earth-crossing record with the given diameter and rocky density.
    pub fn asteroid_record(id: &str, diameter_m: f64) -> AsteroidRecord {
        AsteroidRecord {
            id: id.to_string(),
            name: Some(format!("({id})")),
            avg_diameter_m: diameter_m,
            assumed_density_kg_m3: 2600.0,
            avg_relative_velocity_earth_kms: 15.0 + diameter_m / 100.0,
            avg_impact_probability_percent: None,
            orbital_data: None,
            close_approach_data: vec![
                approach_record("2029-04-13", 38_000.0),
                approach_record("2036-04-13", 31_000_000.0),
            ],
            positions: Vec::new(),
        }
    }

    pub fn position(x: f64, y: f64, time_jd: f64) -> PositionRecord {
        PositionRecord {
            x,
            y,
            z: 0.0,
            time_jd: Some(time_jd),
        }
    }

    /// Three asteroids "big", "mid" and "small" listed out of size order.
    pub fn catalog() -> Catalog {
        Catalog::from_parts(
            vec![
                asteroid_record("mid", 300.0),
                asteroid_record("small", 40.0),
                asteroid_record("big", 1200.0),
            ],
            Vec::new(),
            PlanetTable::default(),
        )
    }
}

/// Assertions for physical invariants.
pub mod assertions {
    use super::*;

    /// Specific orbital energy, E = v²/2 - GM/r (SI units).
    pub fn orbital_energy(pos: DVec3, vel: DVec3) -> f64 {
        0.5 * vel.length_squared() - GM_SUN / pos.length()
    }

    pub fn escape_velocity(distance: f64) -> f64 {
        (2.0 * GM_SUN / distance).sqrt()
    }
}

/// Utilities for creating headless Bevy apps for testing.
pub mod bevy_test {
    use bevy::prelude::*;

    /// Create a minimal Bevy app for testing without rendering.
    pub fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circular_state_has_circular_speed() {
        let (pos, vel) = fixtures::circular_state_au(1.0);
        assert_eq!(pos, DVec3::X);
        assert_relative_eq!(vel.y, (GM_SUN / AU_TO_METERS).sqrt(), epsilon = 1e-6);
        assert!(assertions::orbital_energy(pos * AU_TO_METERS, vel) < 0.0);
    }

    #[test]
    fn test_cursor_fixture_is_chronological() {
        let cursor = fixtures::cursor(3);
        let years: Vec<i32> = cursor
            .approaches()
            .iter()
            .map(|a| chrono::Datelike::year(&a.date))
            .collect();
        assert_eq!(years, vec![2030, 2031, 2032]);
    }
}
