//! Physics helpers for the mitigation model.
//!
//! Everything here is a pure function: asteroid mass from size and density,
//! and the naive-Euler orbit propagation used to preview a deflected track.

mod propagator;

#[cfg(test)]
mod proptest_physics;

use std::f64::consts::PI;

pub use propagator::{
    ORBIT_DAYS, OrbitSample, PropagationError, calculate_new_orbit, estimate_velocity,
};

/// Mass of a homogeneous sphere: (4/3)·π·r³·ρ.
///
/// # Arguments
/// * `radius_m` - Radius in meters
/// * `density` - Bulk density in kg/m³
pub fn calculate_mass(radius_m: f64, density: f64) -> f64 {
    (4.0 / 3.0) * PI * radius_m.powi(3) * density
}
