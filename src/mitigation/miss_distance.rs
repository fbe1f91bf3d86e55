use chrono::NaiveDate;

use crate::approach::CloseApproach;
use crate::types::{SAFE_MISS_DISTANCE_KM, SECONDS_PER_YEAR, years_between};

/// Linearized effect of a delta-v on a close approach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MissChange {
    /// Catalog miss distance (km).
    pub original: f64,
    /// Miss distance after deflection (km).
    pub new: f64,
    /// `new - original` (km).
    pub change: f64,
    /// Whether `new` exceeds three Earth radii.
    pub safe: bool,
}

/// First-order miss-distance change: the offset grows linearly as Δv × lead time.
///
/// A negative lead time (approach already passed) yields a negative change.
pub fn calculate_miss_distance_change(
    delta_v: f64,
    approach: &CloseApproach,
    current_date: NaiveDate,
) -> MissChange {
    let original = approach.miss_distance_km;
    let years_until = years_between(current_date, approach.date);
    let change = delta_v * years_until * SECONDS_PER_YEAR / 1000.0;
    let new = original + change;

    MissChange {
        original,
        new,
        change,
        safe: new > SAFE_MISS_DISTANCE_KM,
    }
}
