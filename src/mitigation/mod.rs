//! Deflection methods and their delta-v calculations.
//!
//! Implements four simplified mitigation models:
//! - Kinetic impactor (DART-style momentum transfer with ejecta enhancement)
//! - Gravity tractor (mutual attraction over a long hover)
//! - Laser ablation (rocket equation on ablated surface material)
//! - Nuclear standoff (X-ray driven surface vaporization)
//!
//! Every calculation is a pure function of the slider values and a
//! [`MitigationContext`]. Results feed the miss-distance estimate and the
//! orbit propagator; they are recomputed on every apply.

mod methods;
mod miss_distance;
mod params;

#[cfg(test)]
mod proptest_mitigation;

use chrono::NaiveDate;

use crate::approach::CloseApproach;

pub use miss_distance::{MissChange, calculate_miss_distance_change};
pub use params::{ParamSpec, ParamValues};

/// Errors raised by the mitigation layer.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MitigationError {
    #[error("unknown parameter '{id}' for {method:?}")]
    UnknownParameter { method: MitigationMethod, id: String },

    #[error("parameters belong to {got:?}, expected {expected:?}")]
    MethodMismatch {
        expected: MitigationMethod,
        got: MitigationMethod,
    },

    #[error("ablated mass {ejected_kg:.3e} kg exceeds asteroid mass {asteroid_kg:.3e} kg")]
    ExceedsCapacity { ejected_kg: f64, asteroid_kg: f64 },
}

/// Available deflection methods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MitigationMethod {
    #[default]
    Kinetic,
    Gravity,
    Laser,
    Nuclear,
}

/// All methods in panel order.
pub const ALL_METHODS: [MitigationMethod; 4] = [
    MitigationMethod::Kinetic,
    MitigationMethod::Gravity,
    MitigationMethod::Laser,
    MitigationMethod::Nuclear,
];

impl MitigationMethod {
    pub fn title(self) -> &'static str {
        match self {
            MitigationMethod::Kinetic => "Kinetic Impactor",
            MitigationMethod::Gravity => "Gravity Tractor",
            MitigationMethod::Laser => "Laser Ablation",
            MitigationMethod::Nuclear => "Nuclear Deflection",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MitigationMethod::Kinetic => {
                "Launch a spacecraft to collide with the asteroid at high velocity. \
                 NASA's DART mission (2022) changed the orbital period of Dimorphos by \
                 32 minutes. Momentum transfer efficiency (β) is typically 1.5 to 4.0."
            }
            MitigationMethod::Gravity => {
                "A spacecraft hovers near the asteroid and uses mutual gravitational \
                 attraction for a gentle trajectory change. Needs a long lead time but \
                 avoids fragmentation risk."
            }
            MitigationMethod::Laser => {
                "High-powered lasers vaporize surface material and the ejected gas \
                 produces thrust. The DE-STAR concept proposes space-based laser arrays \
                 with continuous, adjustable thrust and no physical contact."
            }
            MitigationMethod::Nuclear => {
                "A nuclear device detonated near or on the asteroid. X-ray energy \
                 vaporizes surface material and creates thrust. Most effective for large \
                 asteroids with short warning times."
            }
        }
    }

    /// Parameter schema in display order.
    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            MitigationMethod::Kinetic => params::KINETIC_PARAMS,
            MitigationMethod::Gravity => params::GRAVITY_PARAMS,
            MitigationMethod::Laser => params::LASER_PARAMS,
            MitigationMethod::Nuclear => params::NUCLEAR_PARAMS,
        }
    }

    /// Compute delta-v, miss-distance change and facts for this method.
    pub fn calculate(
        self,
        params: &ParamValues,
        ctx: &MitigationContext<'_>,
    ) -> Result<MitigationResult, MitigationError> {
        if params.method() != self {
            return Err(MitigationError::MethodMismatch {
                expected: self,
                got: params.method(),
            });
        }

        let (delta_v, facts) = match self {
            MitigationMethod::Kinetic => methods::kinetic(params, ctx.asteroid_mass_kg)?,
            MitigationMethod::Gravity => methods::gravity(params, ctx.asteroid_mass_kg)?,
            MitigationMethod::Laser => methods::laser(params, ctx.asteroid_mass_kg)?,
            MitigationMethod::Nuclear => methods::nuclear(params, ctx.asteroid_mass_kg)?,
        };

        let miss_change = match delta_v {
            DeltaV::Valid(dv) => Some(calculate_miss_distance_change(
                dv,
                ctx.approach,
                ctx.current_date,
            )),
            DeltaV::ExceedsCapacity { .. } => None,
        };

        Ok(MitigationResult {
            method: self,
            delta_v,
            miss_change,
            facts,
        })
    }
}

/// Inputs shared by every method calculation.
#[derive(Clone, Copy, Debug)]
pub struct MitigationContext<'a> {
    /// Asteroid mass (kg), from [`crate::physics::calculate_mass`].
    pub asteroid_mass_kg: f64,
    /// The close approach being mitigated.
    pub approach: &'a CloseApproach,
    /// Simulated date the mitigation is applied on.
    pub current_date: NaiveDate,
}

/// Velocity change produced by a method.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeltaV {
    /// Delta-v in m/s.
    Valid(f64),
    /// Laser ablation would remove more mass than the asteroid has.
    ExceedsCapacity { ejected_kg: f64, asteroid_kg: f64 },
}

impl DeltaV {
    /// Delta-v in m/s, or the capacity error.
    pub fn meters_per_second(&self) -> Result<f64, MitigationError> {
        match *self {
            DeltaV::Valid(dv) => Ok(dv),
            DeltaV::ExceedsCapacity {
                ejected_kg,
                asteroid_kg,
            } => Err(MitigationError::ExceedsCapacity {
                ejected_kg,
                asteroid_kg,
            }),
        }
    }
}

/// Outcome of one mitigation calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct MitigationResult {
    pub method: MitigationMethod,
    pub delta_v: DeltaV,
    /// Absent when the delta-v is not physical.
    pub miss_change: Option<MissChange>,
    /// Human-readable facts in display order.
    pub facts: Vec<String>,
}

impl MitigationResult {
    /// Whether the new miss distance clears the safety threshold.
    pub fn is_safe(&self) -> bool {
        self.miss_change.is_some_and(|m| m.safe)
    }
}
