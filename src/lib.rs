//! NEO Mitigation Viewer
//!
//! A desktop viewer for near-Earth asteroids: their recorded positions from
//! 2025 to 2100, upcoming close approaches with impact probabilities, and
//! the effect of four deflection methods on the miss distance.
//!
//! The library crate exposes the simulation state and its plugins for the
//! binary and for headless testing.

use bevy::prelude::*;

pub mod approach;
pub mod camera;
pub mod catalog;
pub mod config;
pub mod impact;
pub mod input;
pub mod mitigation;
pub mod physics;
pub mod render;
pub mod session;
pub mod time;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;

/// Window-independent plugins: configuration, catalog, clock and the
/// mitigation session.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            config::ConfigPlugin,
            catalog::CatalogPlugin,
            time::TimePlugin,
            session::SessionPlugin,
        ));
    }
}
