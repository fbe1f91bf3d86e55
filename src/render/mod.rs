//! Rendering systems for the mitigation viewer.
//!
//! This module provides the 3D scene: Sun, planets, tracked asteroids,
//! orbit polylines, body labels and the starfield.

mod background;
pub mod bodies;
pub mod labels;
pub mod orbits;
pub mod scaling;
pub mod sync;

use bevy::prelude::*;

use self::background::BackgroundPlugin;
use self::bodies::CelestialBodyPlugin;
use self::labels::LabelPlugin;
use self::orbits::{OrbitPathPlugin, draw_asteroid_orbits, draw_planet_orbits};
use self::sync::{SyncPositionsSet, sync_asteroid_positions, sync_planet_positions};

pub use self::bodies::{AsteroidBody, PlanetBody, Sun};
pub use self::labels::LabelSettings;
pub use self::orbits::OrbitPathSettings;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CelestialBodyPlugin, BackgroundPlugin, OrbitPathPlugin, LabelPlugin))
            // Positions first, then paths drawn against the final transforms
            .add_systems(
                Update,
                (sync_planet_positions, sync_asteroid_positions).in_set(SyncPositionsSet),
            )
            .add_systems(
                Update,
                (draw_planet_orbits, draw_asteroid_orbits).after(SyncPositionsSet),
            );
    }
}
