//! Runtime configuration from environment variables and an optional `.env` file.
//!
//! | Variable           | Default       | Meaning                                   |
//! |--------------------|---------------|-------------------------------------------|
//! | `NEO_DATA_DIR`     | `assets/data` | Directory holding the JSON tables         |
//! | `NEO_START_DATE`   | `2025-01-01`  | Initial simulated date                    |
//! | `NEO_MAX_TRACKED`  | `5`           | Asteroids rendered at once                |
//! | `NEO_ORBIT_POINTS` | `1024`        | Max polyline points per planet orbit path |

use std::path::PathBuf;
use std::str::FromStr;

use bevy::prelude::*;
use chrono::NaiveDate;

use crate::catalog::{DEFAULT_MAX_TRACKED, TrackedAsteroids};
use crate::types::{in_table_window, table_start_date};

pub const DATA_DIR_VAR: &str = "NEO_DATA_DIR";
pub const START_DATE_VAR: &str = "NEO_START_DATE";
pub const MAX_TRACKED_VAR: &str = "NEO_MAX_TRACKED";
pub const ORBIT_POINTS_VAR: &str = "NEO_ORBIT_POINTS";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: cannot parse '{value}'")]
    Invalid { var: &'static str, value: String },

    #[error("{var}: {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        var: &'static str,
        value: String,
        min: String,
        max: String,
    },
}

/// Plugin inserting [`AppConfig`] from the environment unless one is
/// already present, together with the tracking set it sizes.
///
/// Add it after `DefaultPlugins` so the log subscriber exists.
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let config = match app.world().get_resource::<AppConfig>() {
            Some(config) => config.clone(),
            None => {
                let config = AppConfig::from_env();
                app.insert_resource(config.clone());
                config
            }
        };
        if !app.world().contains_resource::<TrackedAsteroids>() {
            app.insert_resource(config.tracked_asteroids());
        }
        info!(
            "Data directory {}, start date {}, tracking up to {} asteroids",
            config.data_dir.display(),
            config.start_date,
            config.max_tracked
        );
    }
}

/// Application settings.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub start_date: NaiveDate,
    pub max_tracked: usize,
    pub orbit_points: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("assets/data"),
            start_date: table_start_date(),
            max_tracked: DEFAULT_MAX_TRACKED,
            orbit_points: 1024,
        }
    }
}

impl AppConfig {
    /// Load `.env` (if present), then read the process environment.
    ///
    /// Invalid values are logged and replaced by their defaults.
    pub fn from_env() -> Self {
        match dotenv::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(err) => debug!("No .env file loaded: {err}"),
        }
        let (config, errors) = Self::from_lookup(|key| std::env::var(key).ok());
        for err in errors {
            warn!("Ignoring invalid configuration, using default: {err}");
        }
        config
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Returns the config with defaults substituted for every invalid value,
    /// together with the errors that caused the substitutions.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<ConfigError>) {
        let defaults = Self::default();
        let mut errors = Vec::new();

        let data_dir = lookup(DATA_DIR_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map_or(defaults.data_dir.clone(), PathBuf::from);

        let start_date = collect(
            parse_date(lookup(START_DATE_VAR)),
            defaults.start_date,
            &mut errors,
        );
        let max_tracked = collect(
            parse_bounded(&lookup, MAX_TRACKED_VAR, 1usize, 50),
            defaults.max_tracked,
            &mut errors,
        );
        let orbit_points = collect(
            parse_bounded(&lookup, ORBIT_POINTS_VAR, 16usize, 100_000),
            defaults.orbit_points,
            &mut errors,
        );

        (
            Self {
                data_dir,
                start_date,
                max_tracked,
                orbit_points,
            },
            errors,
        )
    }

    /// Tracking set sized by `max_tracked`.
    pub fn tracked_asteroids(&self) -> TrackedAsteroids {
        TrackedAsteroids::with_limit(self.max_tracked)
    }
}

fn collect<T>(
    parsed: Result<Option<T>, ConfigError>,
    default: T,
    errors: &mut Vec<ConfigError>,
) -> T {
    match parsed {
        Ok(value) => value.unwrap_or(default),
        Err(err) => {
            errors.push(err);
            default
        }
    }
}

fn parse_date(raw: Option<String>) -> Result<Option<NaiveDate>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        ConfigError::Invalid {
            var: START_DATE_VAR,
            value: raw.clone(),
        }
    })?;
    if !in_table_window(date) {
        return Err(ConfigError::OutOfRange {
            var: START_DATE_VAR,
            value: raw,
            min: "2025-01-01".into(),
            max: "2100-12-31".into(),
        });
    }
    Ok(Some(date))
}

fn parse_bounded<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    min: T,
    max: T,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr + PartialOrd + ToString,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let value: T = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: raw.clone(),
    })?;
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            var,
            value: raw,
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(Some(value))
}
