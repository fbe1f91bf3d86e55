//! Naive-Euler orbit propagation for previewing a deflected trajectory.
//!
//! Sun-only gravity, fixed one-day steps, forward Euler. The result drifts
//! and is meant for visualization, not for prediction.

use bevy::math::DVec3;
use bevy::prelude::debug;

use crate::mitigation::MitigationMethod;
use crate::types::{AU_TO_METERS, GM_SUN, METERS_TO_AU, SECONDS_PER_DAY};

/// Number of daily samples produced by one propagation.
pub const ORBIT_DAYS: usize = 365;

/// One propagated point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSample {
    /// Heliocentric position (AU).
    pub pos: DVec3,
    /// Day offset from the propagation epoch.
    pub day: u32,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum PropagationError {
    #[error("degenerate heliocentric radius {radius} m at day {day}")]
    DegenerateRadius { radius: f64, day: u32 },
}

/// Velocity (m/s) estimated from the first two position samples (AU).
///
/// The samples are assumed to be one day apart. Returns zero when fewer than
/// two samples exist.
pub fn estimate_velocity(positions: impl IntoIterator<Item = DVec3>) -> DVec3 {
    let mut iter = positions.into_iter();
    match (iter.next(), iter.next()) {
        (Some(p0), Some(p1)) => (p1 - p0) * AU_TO_METERS / SECONDS_PER_DAY,
        _ => DVec3::ZERO,
    }
}

/// Propagate a deflected orbit for [`ORBIT_DAYS`] days.
///
/// The delta-v is applied by scaling every velocity component by
/// `(v_circ + Δv) / v_circ`, where `v_circ = sqrt(GM/r)`. This is a uniform
/// scale rather than a push along the velocity unit vector, so the effective
/// change is `|v|·Δv/v_circ`.
///
/// Each day's position is recorded before stepping, so sample 0 equals the
/// input position.
///
/// # Arguments
/// * `position_au` - Heliocentric position in AU
/// * `velocity` - Heliocentric velocity in m/s
/// * `delta_v` - Velocity change in m/s
/// * `method` - Method that produced the delta-v (logged only)
pub fn calculate_new_orbit(
    position_au: DVec3,
    velocity: DVec3,
    delta_v: f64,
    method: MitigationMethod,
) -> Result<Vec<OrbitSample>, PropagationError> {
    let mut pos = position_au * AU_TO_METERS;
    let r = checked_radius(pos, 0)?;

    let v_orbital = (GM_SUN / r).sqrt();
    let factor = (v_orbital + delta_v) / v_orbital;
    let mut vel = velocity * factor;

    debug!(
        "Propagating {:?} deflection: Δv = {:.6} m/s, velocity factor {:.9}",
        method, delta_v, factor
    );

    let dt = SECONDS_PER_DAY;
    let mut samples = Vec::with_capacity(ORBIT_DAYS);

    for day in 0..ORBIT_DAYS as u32 {
        samples.push(OrbitSample {
            pos: pos * METERS_TO_AU,
            day,
        });

        let r = checked_radius(pos, day)?;
        let acc = -GM_SUN / (r * r) * (pos / r);

        vel += acc * dt;
        pos += vel * dt;
    }

    Ok(samples)
}

fn checked_radius(pos: DVec3, day: u32) -> Result<f64, PropagationError> {
    let radius = pos.length();
    if radius > 0.0 && radius.is_finite() {
        Ok(radius)
    } else {
        Err(PropagationError::DegenerateRadius { radius, day })
    }
}
