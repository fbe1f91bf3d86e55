use bevy::math::DVec3;
use wide::f64x4;

use super::record::PositionRecord;
use crate::physics::OrbitSample;

/// Time-tagged heliocentric position (AU).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackPoint {
    pub pos: DVec3,
    pub time_jd: f64,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum TrackSampleError {
    #[error("position track is empty")]
    Empty,

    #[error("requested day {jd} outside track range [{start}, {end}]")]
    OutOfRange { jd: f64, start: f64, end: f64 },
}

/// Time-sorted position samples with linear interpolation in Julian days.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionTrack {
    points: Vec<TrackPoint>,
}

impl PositionTrack {
    /// Build from catalog records.
    ///
    /// Records without `time_jd` are placed one day after their predecessor
    /// (the first one at `fallback_epoch_jd`).
    pub fn from_records(records: &[PositionRecord], fallback_epoch_jd: f64) -> Self {
        let mut previous: Option<f64> = None;
        let points = records
            .iter()
            .map(|r| {
                let time_jd = r
                    .time_jd
                    .unwrap_or_else(|| previous.map_or(fallback_epoch_jd, |t| t + 1.0));
                previous = Some(time_jd);
                TrackPoint {
                    pos: DVec3::new(r.x, r.y, r.z),
                    time_jd,
                }
            })
            .collect();
        Self::from_points(points)
    }

    /// Build from a propagated orbit whose day 0 falls on `epoch_jd`.
    pub fn from_orbit(epoch_jd: f64, orbit: &[OrbitSample]) -> Self {
        let points = orbit
            .iter()
            .map(|s| TrackPoint {
                pos: s.pos,
                time_jd: epoch_jd + s.day as f64,
            })
            .collect();
        Self::from_points(points)
    }

    fn from_points(mut points: Vec<TrackPoint>) -> Self {
        points.retain(|p| p.pos.is_finite() && p.time_jd.is_finite());
        points.sort_by(|a, b| a.time_jd.total_cmp(&b.time_jd));
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    /// Positions in time order.
    pub fn positions(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.points.iter().map(|p| p.pos)
    }

    /// First sample, used as the propagation epoch.
    pub fn first(&self) -> Option<&TrackPoint> {
        self.points.first()
    }

    pub fn start_jd(&self) -> Option<f64> {
        self.points.first().map(|p| p.time_jd)
    }

    pub fn end_jd(&self) -> Option<f64> {
        self.points.last().map(|p| p.time_jd)
    }

    /// Interpolate the position at `jd`.
    ///
    /// Uses f64x4 to blend all three components of the bracketing samples in
    /// one pass (the fourth lane is padding).
    pub fn sample(&self, jd: f64) -> Result<DVec3, TrackSampleError> {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return Err(TrackSampleError::Empty);
        };
        if jd < first.time_jd || jd > last.time_jd {
            return Err(TrackSampleError::OutOfRange {
                jd,
                start: first.time_jd,
                end: last.time_jd,
            });
        }
        if self.points.len() == 1 {
            return Ok(first.pos);
        }

        // Index of the first sample strictly after jd, kept inside [1, len - 1]
        let upper = self
            .points
            .partition_point(|p| p.time_jd <= jd)
            .clamp(1, self.points.len() - 1);
        let p0 = &self.points[upper - 1];
        let p1 = &self.points[upper];

        let span = p1.time_jd - p0.time_jd;
        let s = if span > 0.0 {
            (jd - p0.time_jd) / span
        } else {
            0.0
        };

        let a = f64x4::new([p0.pos.x, p0.pos.y, p0.pos.z, 0.0]);
        let b = f64x4::new([p1.pos.x, p1.pos.y, p1.pos.z, 0.0]);
        let r = (a + (b - a) * f64x4::splat(s)).to_array();

        Ok(DVec3::new(r[0], r[1], r[2]))
    }
}
