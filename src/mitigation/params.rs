//! Slider-bound parameter schemas and values.

use super::{MitigationError, MitigationMethod};

/// One adjustable parameter of a mitigation method.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSpec {
    /// Stable identifier used for lookups.
    pub id: &'static str,
    /// Human-readable label including units.
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl ParamSpec {
    /// Clamp into `[min, max]` and snap to the step grid anchored at `min`.
    pub fn normalize(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        // Rounding can leave residue like 6.6000000000000005; trim it back to the grid
        let snapped = self.min + steps * self.step;
        let decimals = step_decimals(self.step);
        let factor = 10f64.powi(decimals as i32);
        ((snapped * factor).round() / factor).clamp(self.min, self.max)
    }

    /// Number of decimals needed to display values of this parameter.
    pub fn decimals(&self) -> usize {
        step_decimals(self.step)
    }
}

fn step_decimals(step: f64) -> usize {
    let mut decimals = 0;
    let mut scaled = step;
    while decimals < 6 && (scaled - scaled.round()).abs() > 1e-9 {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

pub(super) const KINETIC_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        id: "impactorMass",
        label: "Impactor Mass (kg)",
        min: 300.0,
        max: 10_000.0,
        default: 500.0,
        step: 100.0,
    },
    ParamSpec {
        id: "impactVelocity",
        label: "Impact Velocity (km/s)",
        min: 5.0,
        max: 30.0,
        default: 6.6,
        step: 0.5,
    },
    ParamSpec {
        id: "beta",
        label: "Momentum Enhancement (β)",
        min: 1.0,
        max: 5.0,
        default: 3.6,
        step: 0.1,
    },
];

pub(super) const GRAVITY_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        id: "spacecraftMass",
        label: "Spacecraft Mass (kg)",
        min: 5_000.0,
        max: 50_000.0,
        default: 20_000.0,
        step: 1_000.0,
    },
    ParamSpec {
        id: "distance",
        label: "Hovering Distance (m)",
        min: 50.0,
        max: 500.0,
        default: 200.0,
        step: 10.0,
    },
    ParamSpec {
        id: "duration",
        label: "Operation Duration (years)",
        min: 1.0,
        max: 20.0,
        default: 10.0,
        step: 1.0,
    },
];

pub(super) const LASER_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        id: "laserPower",
        label: "Laser Power (MW)",
        min: 10.0,
        max: 500.0,
        default: 100.0,
        step: 10.0,
    },
    ParamSpec {
        id: "efficiency",
        label: "Conversion Efficiency (%)",
        min: 1.0,
        max: 10.0,
        default: 5.0,
        step: 0.5,
    },
    ParamSpec {
        id: "duration",
        label: "Operation Duration (years)",
        min: 1.0,
        max: 15.0,
        default: 5.0,
        step: 1.0,
    },
];

pub(super) const NUCLEAR_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        id: "yieldMT",
        label: "Nuclear Yield (Megatons)",
        min: 0.1,
        max: 100.0,
        default: 1.0,
        step: 0.1,
    },
    ParamSpec {
        id: "standoff",
        label: "Standoff Distance (m)",
        min: 0.0,
        max: 1000.0,
        default: 100.0,
        step: 50.0,
    },
    ParamSpec {
        id: "coupling",
        label: "Energy Coupling (%)",
        min: 1.0,
        max: 30.0,
        default: 10.0,
        step: 1.0,
    },
];

/// Current values for one method's parameters, in schema order.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamValues {
    method: MitigationMethod,
    values: Vec<f64>,
}

impl ParamValues {
    /// Values initialized from the schema defaults.
    pub fn defaults(method: MitigationMethod) -> Self {
        Self {
            method,
            values: method.params().iter().map(|p| p.default).collect(),
        }
    }

    pub fn method(&self) -> MitigationMethod {
        self.method
    }

    /// Value of parameter `id`.
    pub fn get(&self, id: &str) -> Result<f64, MitigationError> {
        let index = self.index_of(id)?;
        Ok(self.values[index])
    }

    /// Set parameter `id`, returning the normalized value actually stored.
    pub fn set(&mut self, id: &str, value: f64) -> Result<f64, MitigationError> {
        let index = self.index_of(id)?;
        let normalized = self.method.params()[index].normalize(value);
        self.values[index] = normalized;
        Ok(normalized)
    }

    /// Schema and value pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static ParamSpec, f64)> + '_ {
        self.method.params().iter().zip(self.values.iter().copied())
    }

    /// Restore defaults.
    pub fn reset(&mut self) {
        *self = Self::defaults(self.method);
    }

    fn index_of(&self, id: &str) -> Result<usize, MitigationError> {
        self.method
            .params()
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| MitigationError::UnknownParameter {
                method: self.method,
                id: id.to_string(),
            })
    }
}
