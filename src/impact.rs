//! Impact-site state and impact-energy estimates for the map overlay.
//!
//! The estimate runs on [`ImpactorParams`]. Those are seeded from the selected
//! asteroid, or from a custom impactor the user edits in the impact window.

use std::ops::RangeInclusive;

use bevy::prelude::*;

use crate::catalog::AsteroidRecord;
use crate::physics::calculate_mass;
use crate::types::{JOULES_PER_MEGATON_TNT, JOULES_PER_TON_TNT};

/// Default impact site latitude (degrees).
pub const DEFAULT_LAT: f64 = 20.0;

/// Default impact site longitude (degrees).
pub const DEFAULT_LON: f64 = 0.0;

/// Entry angle used when none is given (degrees).
pub const DEFAULT_ENTRY_ANGLE_DEG: f64 = 90.0;

/// Entry angle assumed for catalog asteroids (degrees).
pub const CATALOG_ENTRY_ANGLE_DEG: f64 = 45.0;

/// Custom impactor defaults.
pub const CUSTOM_DENSITY_KG_M3: f64 = 1500.0;
pub const CUSTOM_RADIUS_M: f64 = 50.0;
pub const CUSTOM_VELOCITY_KMS: f64 = 10.0;

/// Editable ranges of the impactor sliders.
pub const DENSITY_RANGE: RangeInclusive<f64> = 500.0..=8000.0;
pub const RADIUS_RANGE: RangeInclusive<f64> = 1.0..=5000.0;
pub const VELOCITY_RANGE: RangeInclusive<f64> = 1.0..=72.0;
pub const ENTRY_ANGLE_RANGE: RangeInclusive<f64> = 1.0..=90.0;

/// Selected impact location on the map.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ImpactSite {
    pub lat: f64,
    pub lon: f64,
}

impl Default for ImpactSite {
    fn default() -> Self {
        Self {
            lat: DEFAULT_LAT,
            lon: DEFAULT_LON,
        }
    }
}

impl ImpactSite {
    /// Build a site, clamping latitude and wrapping longitude.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: lat.clamp(-90.0, 90.0),
            lon: wrap_longitude(lon),
        }
    }

    /// Site from normalized equirectangular map coordinates (`u`, `v` in 0..1, `v` down).
    pub fn from_map_uv(u: f64, v: f64) -> Self {
        Self::new(90.0 - v * 180.0, u * 360.0 - 180.0)
    }

    /// Normalized equirectangular coordinates of the site.
    pub fn map_uv(&self) -> (f64, f64) {
        ((self.lon + 180.0) / 360.0, (90.0 - self.lat) / 180.0)
    }
}

/// Wrap a longitude into `[-180, 180)`.
pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Kinetic energy delivered along the entry direction (J).
///
/// `0.5 · m · (v · 1000)² · sin(angle)` with `v` in km/s and the angle in degrees.
pub fn effective_kinetic_energy(
    density: f64,
    radius_m: f64,
    velocity_kms: f64,
    angle_deg: f64,
) -> f64 {
    let mass = calculate_mass(radius_m, density);
    let total = 0.5 * mass * (velocity_kms * 1000.0).powi(2);
    total * angle_deg.to_radians().sin()
}

/// TNT equivalent of an energy in tons.
pub fn tnt_tons(energy_j: f64) -> f64 {
    energy_j / JOULES_PER_TON_TNT
}

/// TNT equivalent of an energy in megatons.
pub fn tnt_megatons(energy_j: f64) -> f64 {
    energy_j / JOULES_PER_MEGATON_TNT
}

/// Impactor body driving the energy estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactorParams {
    pub density_kg_m3: f64,
    pub radius_m: f64,
    pub velocity_kms: f64,
    pub entry_angle_deg: f64,
}

impl Default for ImpactorParams {
    fn default() -> Self {
        Self {
            density_kg_m3: CUSTOM_DENSITY_KG_M3,
            radius_m: CUSTOM_RADIUS_M,
            velocity_kms: CUSTOM_VELOCITY_KMS,
            entry_angle_deg: DEFAULT_ENTRY_ANGLE_DEG,
        }
    }
}

impl ImpactorParams {
    /// Body values of a catalog asteroid, entering at 45°.
    pub fn from_record(record: &AsteroidRecord) -> Self {
        Self {
            density_kg_m3: record.assumed_density_kg_m3,
            radius_m: record.radius_m(),
            velocity_kms: record.avg_relative_velocity_earth_kms,
            entry_angle_deg: CATALOG_ENTRY_ANGLE_DEG,
        }
    }

    pub fn estimate(&self) -> ImpactEstimate {
        ImpactEstimate::from_energy(effective_kinetic_energy(
            self.density_kg_m3,
            self.radius_m,
            self.velocity_kms,
            self.entry_angle_deg,
        ))
    }
}

/// Energy estimate shown under the impact map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactEstimate {
    pub energy_j: f64,
    pub tnt_tons: f64,
    pub tnt_megatons: f64,
}

impl ImpactEstimate {
    pub fn from_energy(energy_j: f64) -> Self {
        Self {
            energy_j,
            tnt_tons: tnt_tons(energy_j),
            tnt_megatons: tnt_megatons(energy_j),
        }
    }
}

/// Where the impactor parameters come from.
#[derive(Clone, Debug, PartialEq)]
pub enum ImpactSource {
    /// Reseeded whenever the selected asteroid changes. Holds the id last seeded from.
    Selection(Option<String>),
    /// User-edited body, kept until the user switches back.
    Custom,
}

/// Impactor parameters edited in the impact window.
#[derive(Resource, Clone, Debug)]
pub struct ImpactInputs {
    pub params: ImpactorParams,
    source: ImpactSource,
}

impl Default for ImpactInputs {
    fn default() -> Self {
        Self {
            params: ImpactorParams::default(),
            source: ImpactSource::Selection(None),
        }
    }
}

impl ImpactInputs {
    pub fn source(&self) -> &ImpactSource {
        &self.source
    }

    pub fn is_custom(&self) -> bool {
        self.source == ImpactSource::Custom
    }

    /// Reseed from `selected` when following the selection and it changed.
    ///
    /// Slider edits on a followed asteroid last until the selection changes.
    pub fn follow_selection(&mut self, selected: Option<&AsteroidRecord>) {
        let ImpactSource::Selection(seeded) = &self.source else {
            return;
        };
        if seeded.as_deref() == selected.map(|r| r.id.as_str()) {
            return;
        }
        self.use_selection(selected);
    }

    /// Follow the selection again, seeding from `selected` right away.
    pub fn use_selection(&mut self, selected: Option<&AsteroidRecord>) {
        self.params = selected.map(ImpactorParams::from_record).unwrap_or_default();
        self.source = ImpactSource::Selection(selected.map(|r| r.id.clone()));
    }

    /// Switch to a custom impactor with the default body.
    pub fn use_custom(&mut self) {
        self.params = ImpactorParams::default();
        self.source = ImpactSource::Custom;
    }
}

/// Compact formatting with `K`, `M` and `B` suffixes.
pub fn format_large_number(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else {
        format!("{value}")
    }
}
