//! Close-approach selection and the impact-probability heuristic.

use chrono::NaiveDate;

use crate::catalog::CloseApproachRecord;
use crate::types::{EARTH_RADIUS_KM, LUNAR_DISTANCE_KM, in_table_window, parse_approach_date};

/// Lower bound reported by [`impact_probability`].
pub const MIN_IMPACT_PROBABILITY: f64 = 1e-5;

/// Probabilities above this are highlighted as elevated.
pub const ELEVATED_PROBABILITY: f64 = 0.01;

/// A parsed close-approach record.
#[derive(Clone, Debug, PartialEq)]
pub struct CloseApproach {
    pub date: NaiveDate,
    /// Miss distance (km).
    pub miss_distance_km: f64,
    pub orbiting_body: String,
}

impl CloseApproach {
    pub fn new(date: NaiveDate, miss_distance_km: f64, orbiting_body: impl Into<String>) -> Self {
        Self {
            date,
            miss_distance_km,
            orbiting_body: orbiting_body.into(),
        }
    }

    /// Parse a catalog record; `None` when the date or miss distance is unusable.
    pub fn from_record(record: &CloseApproachRecord) -> Option<Self> {
        let date = parse_approach_date(record.close_approach_date.as_deref()?)?;
        let miss_distance_km = record.miss_distance.as_ref()?.kilometers?;
        Some(Self {
            date,
            miss_distance_km,
            orbiting_body: record
                .orbiting_body
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
        })
    }

    /// Miss distance in lunar distances.
    pub fn lunar_distances(&self) -> f64 {
        self.miss_distance_km / LUNAR_DISTANCE_KM
    }
}

/// Approaches inside the 2025..=2100 window, sorted by date.
///
/// Records with unparseable dates are dropped. Equal dates keep catalog order.
pub fn select_approaches(records: &[CloseApproachRecord]) -> Vec<CloseApproach> {
    let mut approaches: Vec<CloseApproach> = records
        .iter()
        .filter_map(CloseApproach::from_record)
        .filter(|a| in_table_window(a.date))
        .collect();
    approaches.sort_by_key(|a| a.date);
    approaches
}

/// Cyclic cursor over a selectable approach list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApproachCursor {
    approaches: Vec<CloseApproach>,
    index: usize,
}

impl ApproachCursor {
    pub fn new(approaches: Vec<CloseApproach>) -> Self {
        Self {
            approaches,
            index: 0,
        }
    }

    pub fn from_records(records: &[CloseApproachRecord]) -> Self {
        Self::new(select_approaches(records))
    }

    pub fn len(&self) -> usize {
        self.approaches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approaches.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    /// The selected approach; `None` for an empty list.
    pub fn current(&self) -> Option<&CloseApproach> {
        self.approaches.get(self.index)
    }

    /// Advance, wrapping from the last entry to the first.
    pub fn next(&mut self) -> Option<&CloseApproach> {
        if self.approaches.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.approaches.len();
        self.current()
    }

    /// Step back, wrapping from the first entry to the last.
    pub fn prev(&mut self) -> Option<&CloseApproach> {
        if self.approaches.is_empty() {
            return None;
        }
        self.index = self
            .index
            .checked_sub(1)
            .unwrap_or(self.approaches.len() - 1);
        self.current()
    }

    /// Select by index; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> Option<&CloseApproach> {
        if index < self.approaches.len() {
            self.index = index;
        }
        self.current()
    }
}

/// Heuristic impact probability for a close approach.
///
/// With no orbit uncertainty the answer is binary: 1 inside one Earth radius,
/// otherwise the floor. With uncertainty `U` (the 0..9 condition code) it is
/// `(R_earth / miss) × (U / 10)` clamped to `[1e-5, 1]`.
pub fn impact_probability(miss_km: f64, orbit_uncertainty: f64) -> f64 {
    if orbit_uncertainty == 0.0 {
        return if miss_km < EARTH_RADIUS_KM {
            1.0
        } else {
            MIN_IMPACT_PROBABILITY
        };
    }
    let scaled = (EARTH_RADIUS_KM / miss_km) * (orbit_uncertainty / 10.0);
    if scaled.is_nan() {
        return MIN_IMPACT_PROBABILITY;
    }
    scaled.clamp(MIN_IMPACT_PROBABILITY, 1.0)
}

/// Whether a probability should be flagged in the UI.
pub fn is_elevated(probability: f64) -> bool {
    probability > ELEVATED_PROBABILITY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn test_select_filters_and_sorts() {
        let records = vec![
            fixtures::approach_record("2090-Jan-05", 70_000.0),
            fixtures::approach_record("2024-12-31", 1_000.0),
            fixtures::approach_record("2029-04-13", 38_000.0),
            fixtures::approach_record("2101-01-01", 5_000.0),
            fixtures::approach_record("garbage", 5_000.0),
            fixtures::approach_record("2036-Mar-27", 300_000.0),
        ];
        let approaches = select_approaches(&records);
        let years: Vec<i32> = approaches
            .iter()
            .map(|a| chrono::Datelike::year(&a.date))
            .collect();
        assert_eq!(years, vec![2029, 2036, 2090]);
    }

    #[test]
    fn test_missing_miss_distance_is_dropped() {
        let mut record = fixtures::approach_record("2030-01-01", 1.0);
        record.miss_distance = None;
        assert!(CloseApproach::from_record(&record).is_none());
    }

    #[test]
    fn test_cursor_wraps_forward() {
        let mut cursor = fixtures::cursor(3);
        assert_eq!(cursor.index(), 0);
        cursor.next();
        cursor.next();
        assert_eq!(cursor.index(), 2);
        cursor.next();
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_cursor_wraps_backward() {
        let mut cursor = fixtures::cursor(4);
        cursor.prev();
        assert_eq!(cursor.index(), 3);
        cursor.prev();
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn test_empty_cursor_has_no_current() {
        let mut cursor = ApproachCursor::default();
        assert!(cursor.current().is_none());
        assert!(cursor.next().is_none());
        assert!(cursor.prev().is_none());
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_select_ignores_out_of_range() {
        let mut cursor = fixtures::cursor(2);
        cursor.select(1);
        assert_eq!(cursor.index(), 1);
        cursor.select(9);
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn test_impact_probability_without_uncertainty() {
        assert_eq!(impact_probability(6000.0, 0.0), 1.0);
        assert_eq!(impact_probability(6371.0, 0.0), MIN_IMPACT_PROBABILITY);
        assert_eq!(impact_probability(1e7, 0.0), MIN_IMPACT_PROBABILITY);
    }

    #[test]
    fn test_impact_probability_with_uncertainty() {
        // (6371 / 63710) × (5 / 10) = 0.05
        let p = impact_probability(63_710.0, 5.0);
        assert!((p - 0.05).abs() < 1e-12);
        assert!(is_elevated(p));

        assert_eq!(impact_probability(100.0, 9.0), 1.0);
        assert_eq!(impact_probability(1e12, 1.0), MIN_IMPACT_PROBABILITY);
        assert!(!is_elevated(MIN_IMPACT_PROBABILITY));
    }

    #[test]
    fn test_lunar_distances() {
        let approach = fixtures::approach("2029-04-13", LUNAR_DISTANCE_KM / 10.0);
        assert!((approach.lunar_distances() - 0.1).abs() < 1e-12);
    }
}
