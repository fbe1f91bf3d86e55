//! Position synchronization from the catalog tables to scene transforms.
//!
//! Planets are looked up by calendar date, asteroids are interpolated by
//! Julian day. The focused asteroid follows its mitigated track while one is
//! applied and covers the current day.

use std::f64::consts::TAU;

use bevy::math::DVec3;
use bevy::prelude::*;
use chrono::NaiveDate;

use crate::catalog::{Catalog, CatalogAsteroid, PlanetId, PlanetTable, PositionTrack};
use crate::render::bodies::{AsteroidBody, PlanetBody};
use crate::render::scaling::scale_3d;
use crate::session::MitigationSession;
use crate::time::SimulationClock;
use crate::types::{DAYS_PER_YEAR, table_start_date};

/// System set label for position sync (runs before orbit drawing).
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyncPositionsSet;

/// Circular 1 AU Earth used when the planet table has no entry for `date`.
pub fn earth_fallback_position(date: NaiveDate) -> DVec3 {
    let days = (date - table_start_date()).num_days() as f64;
    let angle = days / DAYS_PER_YEAR * TAU;
    DVec3::new(angle.cos(), angle.sin(), 0.0)
}

/// Heliocentric position of a planet on `date` (AU).
pub fn planet_position(table: &PlanetTable, date: NaiveDate, id: PlanetId) -> Option<DVec3> {
    table.position(date, id).or_else(|| match id {
        PlanetId::Earth => Some(earth_fallback_position(date)),
        _ => None,
    })
}

/// Heliocentric position of an asteroid on `jd` (AU).
///
/// `mitigated` takes precedence over the catalog track while it covers `jd`.
pub fn asteroid_position(
    asteroid: &CatalogAsteroid,
    mitigated: Option<&PositionTrack>,
    jd: f64,
) -> Option<DVec3> {
    mitigated
        .and_then(|track| track.sample(jd).ok())
        .or_else(|| asteroid.track.sample(jd).ok())
}

fn visibility(shown: bool) -> Visibility {
    if shown {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// Move planets to the current date; planets without data are hidden.
pub fn sync_planet_positions(
    clock: Res<SimulationClock>,
    catalog: Option<Res<Catalog>>,
    session: Res<MitigationSession>,
    mut planets: Query<(&PlanetBody, &mut Transform, &mut Visibility)>,
) {
    let empty = PlanetTable::default();
    let table = catalog.as_ref().map_or(&empty, |c| c.planets());
    for (planet, mut transform, mut vis) in &mut planets {
        let pos = planet_position(table, clock.date(), planet.id);
        if let Some(pos) = pos {
            transform.translation = scale_3d(pos);
        }
        let focus_hidden = session.focus_mode && planet.id != PlanetId::Earth;
        vis.set_if_neq(visibility(pos.is_some() && !focus_hidden));
    }
}

/// Move tracked asteroids to the current Julian day.
pub fn sync_asteroid_positions(
    clock: Res<SimulationClock>,
    catalog: Option<Res<Catalog>>,
    session: Res<MitigationSession>,
    mut asteroids: Query<(&AsteroidBody, &mut Transform, &mut Visibility)>,
) {
    let jd = clock.julian_day();
    for (body, mut transform, mut vis) in &mut asteroids {
        let focused = session.selected() == Some(body.id.as_str());
        let mitigated = if focused {
            session.mitigated_track()
        } else {
            None
        };
        let pos = catalog
            .as_ref()
            .and_then(|c| c.get(&body.id))
            .and_then(|a| asteroid_position(a, mitigated, jd));

        if let Some(pos) = pos {
            transform.translation = scale_3d(pos);
        }
        let focus_hidden = session.focus_mode && !focused;
        vis.set_if_neq(visibility(pos.is_some() && !focus_hidden));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use approx::assert_relative_eq;

    #[test]
    fn test_earth_fallback_starts_on_x_axis() {
        let p = earth_fallback_position(table_start_date());
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 0.0);
    }

    #[test]
    fn test_earth_fallback_quarter_year() {
        let date = table_start_date() + chrono::Days::new(91);
        let p = earth_fallback_position(date);
        assert_relative_eq!(p.length(), 1.0, epsilon = 1e-12);
        assert!(p.y > 0.99);
    }

    #[test]
    fn test_only_earth_has_fallback() {
        let table = PlanetTable::default();
        let date = fixtures::date(2030, 1, 1);
        assert!(planet_position(&table, date, PlanetId::Earth).is_some());
        assert!(planet_position(&table, date, PlanetId::Mars).is_none());
    }

    #[test]
    fn test_table_beats_fallback() {
        let mut table = PlanetTable::default();
        let date = fixtures::date(2030, 1, 1);
        table.insert(date, PlanetId::Earth, DVec3::new(0.0, -1.0, 0.0));
        assert_eq!(
            planet_position(&table, date, PlanetId::Earth),
            Some(DVec3::new(0.0, -1.0, 0.0))
        );
    }

    #[test]
    fn test_mitigated_track_wins_inside_its_range() {
        let mut record = fixtures::asteroid_record("a", 100.0);
        record.positions = vec![
            fixtures::position(1.0, 0.0, 100.0),
            fixtures::position(1.0, 0.0, 200.0),
        ];
        let asteroid = CatalogAsteroid::new(record);
        let mitigated = PositionTrack::from_records(
            &[fixtures::position(2.0, 0.0, 100.0), fixtures::position(2.0, 0.0, 150.0)],
            0.0,
        );

        let inside = asteroid_position(&asteroid, Some(&mitigated), 120.0).unwrap();
        assert_eq!(inside.x, 2.0);
        let after = asteroid_position(&asteroid, Some(&mitigated), 180.0).unwrap();
        assert_eq!(after.x, 1.0);
        assert!(asteroid_position(&asteroid, None, 300.0).is_none());
    }
}
