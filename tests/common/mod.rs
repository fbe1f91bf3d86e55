//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::f64::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use bevy::prelude::*;
use chrono::NaiveDate;
use neo_mitigation::SimulationPlugin;
use neo_mitigation::catalog::{
    AsteroidRecord, Catalog, CloseApproachRecord, MissDistanceRecord, PlanetTable, PositionRecord,
};
use neo_mitigation::config::AppConfig;
use serde_json::{Value, json};

/// Julian day of 2025-01-01.
pub const EPOCH_JD: f64 = 2460676.0;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Scratch data directory removed on drop.
pub struct DataDir {
    path: PathBuf,
}

impl DataDir {
    pub fn new(name: &str) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let path = std::env::temp_dir().join(format!(
            "neo-mitigation-{name}-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_json(&self, file: &str, value: &Value) {
        fs::write(self.path.join(file), serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    pub fn write_raw(&self, file: &str, text: &str) {
        fs::write(self.path.join(file), text).unwrap();
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            data_dir: self.path.clone(),
            ..Default::default()
        }
    }
}

impl Drop for DataDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Asteroid entry as it appears in `asteroid_info.json`, with numeric
/// strings the way the exported tables carry them.
pub fn asteroid_json(id: &str, diameter_m: f64) -> Value {
    json!({
        "id": id,
        "name": format!("({id})"),
        "avg_diameter_m": diameter_m.to_string(),
        "assumed_density_kg_m3": 2600,
        "avg_relative_velocity_earth_kms": "12.5",
        "orbital_data": { "inclination": "6.0", "orbit_uncertainty": "1" },
        "close_approach_data": [
            {
                "close_approach_date": "2036-Apr-13",
                "miss_distance": { "kilometers": "31000000.0" },
                "orbiting_body": "Earth"
            },
            {
                "close_approach_date": "2029-04-13",
                "miss_distance": { "kilometers": "38012.2" },
                "orbiting_body": "Earth"
            },
            {
                "close_approach_date": "2012-01-01",
                "miss_distance": { "kilometers": "1000000.0" },
                "orbiting_body": "Earth"
            }
        ]
    })
}

/// `n` daily samples of a circular 1 AU orbit starting on the table epoch.
pub fn circular_positions(n: usize) -> Vec<PositionRecord> {
    (0..n)
        .map(|day| {
            let angle = day as f64 / 365.25 * TAU;
            PositionRecord {
                x: angle.cos(),
                y: angle.sin(),
                z: 0.0,
                time_jd: Some(EPOCH_JD + day as f64),
            }
        })
        .collect()
}

fn approach(date: &str, km: f64) -> CloseApproachRecord {
    CloseApproachRecord {
        close_approach_date: Some(date.to_string()),
        miss_distance: Some(MissDistanceRecord {
            kilometers: Some(km),
            ..Default::default()
        }),
        orbiting_body: Some("Earth".to_string()),
    }
}

/// Rocky asteroid with two upcoming approaches and a week of positions.
pub fn asteroid(id: &str, diameter_m: f64) -> AsteroidRecord {
    AsteroidRecord {
        id: id.to_string(),
        name: Some(format!("({id})")),
        avg_diameter_m: diameter_m,
        assumed_density_kg_m3: 2600.0,
        avg_relative_velocity_earth_kms: 12.5,
        avg_impact_probability_percent: None,
        orbital_data: None,
        close_approach_data: vec![
            approach("2029-04-13", 38_000.0),
            approach("2036-04-13", 31_000_000.0),
        ],
        positions: circular_positions(7),
    }
}

/// Catalog with "apophis" (340 m), "pebble" (40 m) and "bare" (no positions).
pub fn catalog() -> Catalog {
    let mut bare = asteroid("bare", 120.0);
    bare.positions.clear();
    Catalog::from_parts(
        vec![asteroid("apophis", 340.0), asteroid("pebble", 40.0), bare],
        Vec::new(),
        PlanetTable::default(),
    )
}

/// Headless app with the simulation plugins and the given catalog.
pub fn simulation_app(catalog: Catalog, config: AppConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(config)
        .insert_resource(catalog)
        .add_plugins(SimulationPlugin);
    app.update();
    app
}

/// Queue a message and run one frame.
pub fn send<M: Message>(app: &mut App, message: M) {
    app.world_mut().write_message(message);
    app.update();
}
