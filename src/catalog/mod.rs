//! Asteroid and planet catalog loaded from static JSON tables.
//!
//! The data directory holds three files:
//! - `asteroid_info.json`: array of [`AsteroidRecord`]
//! - `pha_positions.json`: array of `{id, positions}` merged into the records by id
//! - `planet_positions.json`: `date -> planet -> {x, y, z}` in AU
//!
//! Missing files load as empty tables. Malformed JSON is an error; the
//! startup system logs it and continues with an empty catalog.

mod planets;
mod record;
mod track;
mod tracked;

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::physics::calculate_mass;
use crate::types::{julian_day, table_start_date};

pub use planets::{PlanetId, PlanetTable};
pub use record::{
    AsteroidRecord, CloseApproachRecord, MissDistanceRecord, OrbitalDataRecord,
    PhaPositionsRecord, PlanetPositionRecord, PositionRecord,
};
pub use track::{PositionTrack, TrackPoint, TrackSampleError};
pub use tracked::{DEFAULT_MAX_TRACKED, TrackError, TrackedAsteroids};

pub const ASTEROID_INFO_FILE: &str = "asteroid_info.json";
pub const PHA_POSITIONS_FILE: &str = "pha_positions.json";
pub const PLANET_POSITIONS_FILE: &str = "planet_positions.json";

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid date key '{0}' in planet table (expected YYYY-MM-DD)")]
    BadDateKey(String),
}

/// Plugin loading the catalog at startup.
pub struct CatalogPlugin;

impl Plugin for CatalogPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrackedAsteroids>().add_systems(
            Startup,
            load_catalog.run_if(not(resource_exists::<Catalog>)),
        );
    }
}

/// An asteroid record with its position track.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogAsteroid {
    pub record: AsteroidRecord,
    pub track: PositionTrack,
}

impl CatalogAsteroid {
    pub fn new(record: AsteroidRecord) -> Self {
        let track = PositionTrack::from_records(&record.positions, table_epoch_jd());
        Self { record, track }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    /// Mass (kg) from the average diameter and assumed density.
    pub fn mass_kg(&self) -> f64 {
        calculate_mass(self.record.radius_m(), self.record.assumed_density_kg_m3)
    }
}

/// Sortable asteroid list columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Diameter,
    Velocity,
    ImpactProbability,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Diameter, SortKey::Velocity, SortKey::ImpactProbability];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Diameter => "Diameter",
            SortKey::Velocity => "Velocity",
            SortKey::ImpactProbability => "Impact Prob",
        }
    }

    fn value(self, record: &AsteroidRecord) -> f64 {
        match self {
            SortKey::Diameter => record.avg_diameter_m,
            SortKey::Velocity => record.avg_relative_velocity_earth_kms,
            // Unknown probabilities rank below every known value
            SortKey::ImpactProbability => record
                .avg_impact_probability_percent
                .unwrap_or(f64::NEG_INFINITY),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Loaded asteroid records and planet table.
#[derive(Resource, Clone, Debug, Default)]
pub struct Catalog {
    asteroids: Vec<CatalogAsteroid>,
    index: HashMap<String, usize>,
    planets: PlanetTable,
}

impl Catalog {
    /// Assemble a catalog, merging PHA position tracks into the records by id.
    ///
    /// A record keeps its own positions when it already has some.
    pub fn from_parts(
        records: Vec<AsteroidRecord>,
        pha_positions: Vec<PhaPositionsRecord>,
        planets: PlanetTable,
    ) -> Self {
        let mut extra: HashMap<String, Vec<PositionRecord>> = pha_positions
            .into_iter()
            .map(|p| (p.id, p.positions))
            .collect();

        let mut asteroids = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());
        for mut record in records {
            if let Some(positions) = extra.remove(&record.id)
                && record.positions.is_empty()
            {
                record.positions = positions;
            }
            if index.contains_key(&record.id) {
                warn!("Duplicate asteroid id {} ignored", record.id);
                continue;
            }
            index.insert(record.id.clone(), asteroids.len());
            asteroids.push(CatalogAsteroid::new(record));
        }

        if !extra.is_empty() {
            debug!("{} position tracks have no matching asteroid record", extra.len());
        }

        Self {
            asteroids,
            index,
            planets,
        }
    }

    /// Load all tables from `dir`.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let records: Vec<AsteroidRecord> =
            read_optional_json(&dir.join(ASTEROID_INFO_FILE))?.unwrap_or_default();
        let pha: Vec<PhaPositionsRecord> =
            read_optional_json(&dir.join(PHA_POSITIONS_FILE))?.unwrap_or_default();
        let planets = match read_optional_json(&dir.join(PLANET_POSITIONS_FILE))? {
            Some(raw) => PlanetTable::from_raw(raw)?,
            None => PlanetTable::default(),
        };
        Ok(Self::from_parts(records, pha, planets))
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn asteroids(&self) -> &[CatalogAsteroid] {
        &self.asteroids
    }

    pub fn get(&self, id: &str) -> Option<&CatalogAsteroid> {
        self.index.get(id).map(|&i| &self.asteroids[i])
    }

    pub fn planets(&self) -> &PlanetTable {
        &self.planets
    }

    /// Asteroids ordered by `key`; ties keep catalog order.
    pub fn sorted(&self, key: SortKey, order: SortOrder) -> Vec<&CatalogAsteroid> {
        let mut list: Vec<&CatalogAsteroid> = self.asteroids.iter().collect();
        list.sort_by(|a, b| {
            let ordering = key.value(&a.record).total_cmp(&key.value(&b.record));
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        list
    }
}

/// Julian day used for position samples that carry no timestamp.
pub fn table_epoch_jd() -> f64 {
    julian_day(table_start_date()) as f64
}

fn read_optional_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, CatalogError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!("{} not found, using an empty table", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(CatalogError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        })
}

/// Load the catalog from the configured data directory.
fn load_catalog(mut commands: Commands, config: Option<Res<AppConfig>>) {
    let config = config.map(|c| c.clone()).unwrap_or_default();
    let catalog = match Catalog::load_from_dir(&config.data_dir) {
        Ok(catalog) => {
            info!(
                "Loaded {} asteroids and {} planet table days from {}",
                catalog.len(),
                catalog.planets().len(),
                config.data_dir.display()
            );
            catalog
        }
        Err(err) => {
            warn!("Catalog load failed, continuing with an empty catalog: {err}");
            Catalog::default()
        }
    };
    commands.insert_resource(catalog);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn test_pha_positions_merge_by_id() {
        let mut with_own = fixtures::asteroid_record("a", 100.0);
        with_own.positions = vec![fixtures::position(1.0, 0.0, 2460676.0)];
        let bare = fixtures::asteroid_record("b", 200.0);

        let pha = vec![
            PhaPositionsRecord {
                id: "a".into(),
                positions: vec![fixtures::position(9.0, 9.0, 2460676.0)],
            },
            PhaPositionsRecord {
                id: "b".into(),
                positions: vec![
                    fixtures::position(2.0, 0.0, 2460676.0),
                    fixtures::position(2.0, 0.1, 2460677.0),
                ],
            },
        ];
        let catalog = Catalog::from_parts(vec![with_own, bare], pha, PlanetTable::default());

        assert_eq!(catalog.get("a").unwrap().track.len(), 1);
        assert_eq!(catalog.get("a").unwrap().record.positions[0].x, 1.0);
        assert_eq!(catalog.get("b").unwrap().track.len(), 2);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let catalog = Catalog::from_parts(
            vec![
                fixtures::asteroid_record("x", 100.0),
                fixtures::asteroid_record("x", 900.0),
            ],
            Vec::new(),
            PlanetTable::default(),
        );
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("x").unwrap().record.avg_diameter_m, 100.0);
    }

    #[test]
    fn test_sorted_by_diameter() {
        let catalog = fixtures::catalog();
        let desc: Vec<&str> = catalog
            .sorted(SortKey::Diameter, SortOrder::Descending)
            .iter()
            .map(|a| a.id())
            .collect();
        let asc: Vec<&str> = catalog
            .sorted(SortKey::Diameter, SortOrder::Ascending)
            .iter()
            .map(|a| a.id())
            .collect();
        assert_eq!(desc, vec!["big", "mid", "small"]);
        assert_eq!(asc, vec!["small", "mid", "big"]);
    }

    #[test]
    fn test_unknown_probability_sorts_last_descending() {
        let mut catalog_records = vec![
            fixtures::asteroid_record("known", 100.0),
            fixtures::asteroid_record("unknown", 100.0),
        ];
        catalog_records[0].avg_impact_probability_percent = Some(0.001);
        let catalog = Catalog::from_parts(catalog_records, Vec::new(), PlanetTable::default());
        let order: Vec<&str> = catalog
            .sorted(SortKey::ImpactProbability, SortOrder::Descending)
            .iter()
            .map(|a| a.id())
            .collect();
        assert_eq!(order, vec!["known", "unknown"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let catalog = Catalog::load_from_dir("/nonexistent/neo-data").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.planets().is_empty());
    }

    #[test]
    fn test_mass_from_record() {
        let asteroid = CatalogAsteroid::new(fixtures::asteroid_record("m", 2.0));
        assert!((asteroid.mass_kg() - calculate_mass(1.0, 2600.0)).abs() < 1e-9);
    }
}
