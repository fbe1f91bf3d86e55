use std::collections::{BTreeMap, HashMap};

use bevy::math::DVec3;
use bevy::prelude::debug;
use chrono::NaiveDate;

use super::CatalogError;
use super::record::PlanetPositionRecord;

/// Planets present in the position table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlanetId {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
}

impl PlanetId {
    pub const ALL: &'static [PlanetId] = &[
        PlanetId::Mercury,
        PlanetId::Venus,
        PlanetId::Earth,
        PlanetId::Mars,
        PlanetId::Jupiter,
        PlanetId::Saturn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlanetId::Mercury => "Mercury",
            PlanetId::Venus => "Venus",
            PlanetId::Earth => "Earth",
            PlanetId::Mars => "Mars",
            PlanetId::Jupiter => "Jupiter",
            PlanetId::Saturn => "Saturn",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Planet positions keyed by calendar date (AU, heliocentric ecliptic).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanetTable {
    days: BTreeMap<NaiveDate, HashMap<PlanetId, DVec3>>,
}

impl PlanetTable {
    /// Build from the raw `date -> planet -> {x,y,z}` map.
    pub fn from_raw(
        raw: HashMap<String, HashMap<String, PlanetPositionRecord>>,
    ) -> Result<Self, CatalogError> {
        let mut days = BTreeMap::new();
        for (key, planets) in raw {
            let date = NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d")
                .map_err(|_| CatalogError::BadDateKey(key.clone()))?;
            let mut entry = HashMap::with_capacity(planets.len());
            for (name, p) in planets {
                match PlanetId::from_name(&name) {
                    Some(id) => {
                        entry.insert(id, DVec3::new(p.x, p.y, p.z));
                    }
                    None => debug!("Ignoring unknown planet '{}' on {}", name, date),
                }
            }
            days.insert(date, entry);
        }
        Ok(Self { days })
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of dated entries.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn insert(&mut self, date: NaiveDate, planet: PlanetId, pos: DVec3) {
        self.days.entry(date).or_default().insert(planet, pos);
    }

    /// Position of `planet` on `date`, if the table has it.
    pub fn position(&self, date: NaiveDate, planet: PlanetId) -> Option<DVec3> {
        self.days.get(&date)?.get(&planet).copied()
    }

    /// Every recorded position of `planet` in date order.
    pub fn orbit(&self, planet: PlanetId) -> impl Iterator<Item = DVec3> + '_ {
        self.days
            .values()
            .filter_map(move |entry| entry.get(&planet).copied())
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }
}
