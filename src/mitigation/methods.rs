//! Per-method delta-v formulas and fact sheets.

use super::{DeltaV, MitigationError, ParamValues};
use crate::types::{G, JOULES_PER_MEGATON_TNT, JOULES_PER_TON_TNT, SECONDS_PER_YEAR};

/// Fixed kinetic impactor transit time (days).
const KINETIC_TRANSIT_DAYS: f64 = 150.0;

/// Fraction of spacecraft mass budgeted as xenon for station keeping.
const XENON_FRACTION: f64 = 0.3;

/// Ablation plume exhaust velocity (m/s).
const LASER_EXHAUST_VELOCITY: f64 = 1000.0;

/// Vaporized-material exhaust velocity for nuclear standoff (m/s).
const NUCLEAR_EXHAUST_VELOCITY: f64 = 10_000.0;

/// Share of nuclear yield released as X-rays.
const XRAY_FRACTION: f64 = 0.7;

type Calculation = Result<(DeltaV, Vec<String>), MitigationError>;

/// Kinetic impactor: Δv = β × m × v / M.
pub(super) fn kinetic(params: &ParamValues, asteroid_mass: f64) -> Calculation {
    let impactor_mass = params.get("impactorMass")?;
    let impact_velocity = params.get("impactVelocity")? * 1000.0;
    let beta = params.get("beta")?;

    let delta_v = beta * impactor_mass * impact_velocity / asteroid_mass;
    let ejecta = if beta > 2.0 { "excellent" } else { "moderate" };

    let facts = vec![
        format!(
            "Momentum transfer: {:.2} × 10⁶ kg⋅m/s",
            impactor_mass * impact_velocity / 1e6
        ),
        format!(
            "Impact energy: {:.3} tons TNT equivalent",
            0.5 * impactor_mass * impact_velocity.powi(2) / JOULES_PER_TON_TNT
        ),
        format!("β factor of {beta} indicates {ejecta} ejecta contribution"),
        format!(
            "Mission duration: ~{:.1} years transit time",
            KINETIC_TRANSIT_DAYS / 365.25
        ),
        format!("Deflection at impact: {:.2} mm/s", delta_v * 1000.0),
    ];

    Ok((DeltaV::Valid(delta_v), facts))
}

/// Gravity tractor: F = G·m·M/d², a = F/M, Δv = a·t.
pub(super) fn gravity(params: &ParamValues, asteroid_mass: f64) -> Calculation {
    let spacecraft_mass = params.get("spacecraftMass")?;
    let distance = params.get("distance")?;
    let years = params.get("duration")?;
    let seconds = years * SECONDS_PER_YEAR;

    let force = G * spacecraft_mass * asteroid_mass / (distance * distance);
    let acceleration = force / asteroid_mass;
    let delta_v = acceleration * seconds;

    let facts = vec![
        format!("Gravitational force: {:.3} micronewtons", force * 1e6),
        format!("Acceleration: {:.3} nm/s²", acceleration * 1e9),
        format!(
            "Total thrust time: {:.0} hours continuous",
            years * 365.25 * 24.0
        ),
        format!(
            "Fuel mass (ion propulsion): ~{:.0} kg xenon",
            spacecraft_mass * XENON_FRACTION
        ),
        format!("Cumulative deflection: {:.4} mm/s", delta_v * 1000.0),
    ];

    Ok((DeltaV::Valid(delta_v), facts))
}

/// Laser ablation: ṁ = 2ηP/v², m_ej = ṁ·t, Δv = v·ln(M / (M − m_ej)).
///
/// Ablated mass is never fed back into the propagation; once it would reach
/// the whole asteroid the delta-v is reported as [`DeltaV::ExceedsCapacity`].
pub(super) fn laser(params: &ParamValues, asteroid_mass: f64) -> Calculation {
    let power_mw = params.get("laserPower")?;
    let efficiency = params.get("efficiency")? / 100.0;
    let years = params.get("duration")?;

    let power = power_mw * 1e6;
    let seconds = years * SECONDS_PER_YEAR;
    let v = LASER_EXHAUST_VELOCITY;
    let mass_rate = 2.0 * efficiency * power / (v * v);
    let ejected = mass_rate * seconds;

    let delta_v = if ejected >= asteroid_mass {
        DeltaV::ExceedsCapacity {
            ejected_kg: ejected,
            asteroid_kg: asteroid_mass,
        }
    } else {
        DeltaV::Valid(v * (asteroid_mass / (asteroid_mass - ejected)).ln())
    };

    let facts = vec![
        format!("Material ablation rate: {:.2} kg/hour", mass_rate * 3600.0),
        format!("Total mass removed: {:.1} metric tons", ejected / 1000.0),
        format!("Thrust force: {:.1} millinewtons", mass_rate * v * 1000.0),
        format!("Power requirement: {power_mw} MW (area of ~10 football fields of solar panels)"),
        "Surface temperature: ~3000K during ablation".to_string(),
    ];

    Ok((delta_v, facts))
}

/// Nuclear standoff: E = Y·η, m_ej = √(2·E·M)/v, Δv = m_ej·v/M.
pub(super) fn nuclear(params: &ParamValues, asteroid_mass: f64) -> Calculation {
    let yield_mt = params.get("yieldMT")?;
    let standoff = params.get("standoff")?;
    let coupling = params.get("coupling")? / 100.0;

    let yield_j = yield_mt * JOULES_PER_MEGATON_TNT;
    let effective = yield_j * coupling;
    let v = NUCLEAR_EXHAUST_VELOCITY;
    let ejected = (2.0 * effective * asteroid_mass).sqrt() / v;
    let delta_v = ejected * v / asteroid_mass;

    let crater = if standoff == 0.0 {
        format!(
            "Crater depth: ~{:.0} m",
            (yield_j / JOULES_PER_MEGATON_TNT).powf(0.33) * 50.0
        )
    } else {
        "Crater depth: Surface blast only".to_string()
    };

    let facts = vec![
        format!(
            "X-ray energy: {:.2} MT ({:.0}% of total yield)",
            yield_j * XRAY_FRACTION / JOULES_PER_MEGATON_TNT,
            XRAY_FRACTION * 100.0
        ),
        format!("Impulse delivered: {:.1} × 10⁹ N⋅s", ejected * v / 1e9),
        crater,
        "Warning time needed: minimum 0.5 to 1.5 years for mission prep".to_string(),
        format!("Deflection: {delta_v:.3} m/s instantaneous"),
    ];

    Ok((DeltaV::Valid(delta_v), facts))
}
