//! Core physics types and constants for the mitigation model.

use chrono::{Datelike, NaiveDate};

/// Physical constants (SI units)

/// Gravitational constant (m³·kg⁻¹·s⁻²)
pub const G: f64 = 6.674e-11;

/// Solar mass in kilograms
pub const M_SUN: f64 = 1.989e30;

/// Sun's gravitational parameter (m³/s²)
pub const GM_SUN: f64 = G * M_SUN;

/// Astronomical unit in meters (the rounded value the position tables were scaled with)
pub const AU_TO_METERS: f64 = 1.496e11;

/// Meters to AU
pub const METERS_TO_AU: f64 = 1.0 / AU_TO_METERS;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Miss distance above which an encounter counts as safe (km).
pub const SAFE_MISS_DISTANCE_KM: f64 = 3.0 * EARTH_RADIUS_KM;

/// Average Earth-Moon distance in kilometers (one lunar distance)
pub const LUNAR_DISTANCE_KM: f64 = 384_400.0;

/// Joules per ton of TNT
pub const JOULES_PER_TON_TNT: f64 = 4.184e9;

/// Joules per megaton of TNT
pub const JOULES_PER_MEGATON_TNT: f64 = 4.184e15;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Days per Julian year
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Seconds per Julian year
pub const SECONDS_PER_YEAR: f64 = DAYS_PER_YEAR * SECONDS_PER_DAY;

/// Julian date of the J2000.0 epoch (January 1, 2000, 12:00 TT)
pub const J2000_JD: f64 = 2451545.0;

/// First calendar year covered by the position tables.
pub const FIRST_TABLE_YEAR: i32 = 2025;

/// Last calendar year covered by the position tables.
pub const LAST_TABLE_YEAR: i32 = 2100;

/// First day of the table window.
pub fn table_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(FIRST_TABLE_YEAR, 1, 1).unwrap_or_default()
}

/// Whether a date falls inside the 2025..=2100 window.
pub fn in_table_window(date: NaiveDate) -> bool {
    (FIRST_TABLE_YEAR..=LAST_TABLE_YEAR).contains(&date.year())
}

/// Julian day number of a calendar date (taken at local midnight), floored.
///
/// Matches the day index used by the position tables:
/// `floor(2451545 + (date - 2000-01-01T12:00) / 1 day)`.
pub fn julian_day(date: NaiveDate) -> i64 {
    let j2000 = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    let days = (date - j2000).num_days() as f64;
    (J2000_JD + days - 0.5).floor() as i64
}

/// Parse a close-approach style date.
///
/// Accepts `2029-04-13` and the NeoWs long form `2029-Apr-13` (an optional
/// ` HH:MM` suffix is ignored).
pub fn parse_approach_date(raw: &str) -> Option<NaiveDate> {
    let day_part = raw.trim().split_whitespace().next()?;
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(day_part, "%Y-%b-%d"))
        .ok()
}

/// Years between two dates (Julian years, may be negative).
pub fn years_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64 / DAYS_PER_YEAR
}

/// Format a date for display.
pub fn date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
