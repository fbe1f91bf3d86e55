//! Serde records for the asteroid data files.
//!
//! Field names follow the NeoWs JSON the tables were exported from. Numbers
//! may arrive either as JSON numbers or as numeric strings.

use serde::{Deserialize, Serialize};

/// One asteroid from `asteroid_info.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AsteroidRecord {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::f64")]
    pub avg_diameter_m: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub assumed_density_kg_m3: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub avg_relative_velocity_earth_kms: f64,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub avg_impact_probability_percent: Option<f64>,
    #[serde(default)]
    pub orbital_data: Option<OrbitalDataRecord>,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproachRecord>,
    #[serde(default)]
    pub positions: Vec<PositionRecord>,
}

impl AsteroidRecord {
    /// Name for display, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn radius_m(&self) -> f64 {
        self.avg_diameter_m / 2.0
    }

    /// NeoWs orbit condition code (0 = well determined); absent counts as 0.
    pub fn orbit_uncertainty(&self) -> f64 {
        self.orbital_data
            .as_ref()
            .and_then(|o| o.orbit_uncertainty)
            .unwrap_or(0.0)
    }

    /// Orbit inclination in degrees, if known.
    pub fn inclination_deg(&self) -> Option<f64> {
        self.orbital_data.as_ref().and_then(|o| o.inclination)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrbitalDataRecord {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub eccentricity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub semi_major_axis: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub inclination: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub orbit_uncertainty: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub perihelion_distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub aphelion_distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub orbital_period: Option<f64>,
    /// Degrees.
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub mean_anomaly: Option<f64>,
    /// Degrees per day.
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub mean_motion: Option<f64>,
    #[serde(default)]
    pub first_observation_date: Option<String>,
    #[serde(default)]
    pub last_observation_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CloseApproachRecord {
    #[serde(default)]
    pub close_approach_date: Option<String>,
    #[serde(default)]
    pub miss_distance: Option<MissDistanceRecord>,
    #[serde(default)]
    pub orbiting_body: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MissDistanceRecord {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub kilometers: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub astronomical: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub lunar: Option<f64>,
}

/// Heliocentric position sample (AU).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PositionRecord {
    #[serde(deserialize_with = "lenient::f64")]
    pub x: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub y: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub z: f64,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub time_jd: Option<f64>,
}

/// One entry of `pha_positions.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaPositionsRecord {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default)]
    pub positions: Vec<PositionRecord>,
}

/// Planet position in `planet_positions.json` (AU).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlanetPositionRecord {
    #[serde(deserialize_with = "lenient::f64")]
    pub x: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub y: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub z: f64,
}

mod lenient {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdValue {
        Integer(u64),
        Text(String),
    }

    pub fn f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => Ok(n),
            NumberOrText::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid number '{s}'"))),
        }
    }

    /// Absent, null and unparseable values all become `None`.
    pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(
            match Option::<NumberOrText>::deserialize(deserializer).ok().flatten() {
                Some(NumberOrText::Number(n)) => Some(n),
                Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
                None => None,
            },
        )
    }

    pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match IdValue::deserialize(deserializer)? {
            IdValue::Integer(n) => n.to_string(),
            IdValue::Text(s) => s,
        })
    }
}
