use bevy::prelude::*;

/// Default number of asteroids rendered at once.
pub const DEFAULT_MAX_TRACKED: usize = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    #[error("at most {limit} asteroids can be tracked")]
    LimitReached { limit: usize },

    #[error("asteroid {0} is already tracked")]
    AlreadyTracked(String),
}

/// Asteroid ids shown in the scene, in the order they were picked.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct TrackedAsteroids {
    ids: Vec<String>,
    limit: usize,
}

impl Default for TrackedAsteroids {
    fn default() -> Self {
        Self::with_limit(DEFAULT_MAX_TRACKED)
    }
}

impl TrackedAsteroids {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            ids: Vec::with_capacity(limit),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|t| t == id)
    }

    pub fn track(&mut self, id: &str) -> Result<(), TrackError> {
        if self.contains(id) {
            return Err(TrackError::AlreadyTracked(id.to_string()));
        }
        if self.ids.len() >= self.limit {
            return Err(TrackError::LimitReached { limit: self.limit });
        }
        self.ids.push(id.to_string());
        Ok(())
    }

    /// Returns whether the id was tracked.
    pub fn untrack(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|t| t != id);
        self.ids.len() != before
    }

    /// Track when absent, untrack when present. Returns the new tracked state.
    pub fn toggle(&mut self, id: &str) -> Result<bool, TrackError> {
        if self.untrack(id) {
            Ok(false)
        } else {
            self.track(id).map(|()| true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_enforced() {
        let mut tracked = TrackedAsteroids::default();
        for i in 0..DEFAULT_MAX_TRACKED {
            tracked.track(&i.to_string()).unwrap();
        }
        assert_eq!(
            tracked.track("extra"),
            Err(TrackError::LimitReached { limit: 5 })
        );
        assert_eq!(tracked.len(), 5);
    }

    #[test]
    fn test_toggle() {
        let mut tracked = TrackedAsteroids::with_limit(1);
        assert_eq!(tracked.toggle("a"), Ok(true));
        assert!(tracked.contains("a"));
        assert!(tracked.toggle("b").is_err());
        assert_eq!(tracked.toggle("a"), Ok(false));
        assert!(tracked.is_empty());
    }

    #[test]
    fn test_duplicate_track_is_rejected() {
        let mut tracked = TrackedAsteroids::default();
        tracked.track("a").unwrap();
        assert!(matches!(tracked.track("a"), Err(TrackError::AlreadyTracked(_))));
        assert!(tracked.untrack("a"));
        assert!(!tracked.untrack("a"));
    }
}
