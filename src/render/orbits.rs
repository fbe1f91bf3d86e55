//! Orbit path rendering using Bevy Gizmos.
//!
//! Planet paths come from the planet table (Earth falls back to a 1 AU
//! circle) and are scaled once per catalog load. Asteroid paths are drawn
//! from their position tracks each frame; when a mitigation is applied the
//! focused asteroid's original path dims and the deflected path is drawn in
//! green next to it.

use std::collections::HashMap;
use std::f64::consts::TAU;

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::catalog::{Catalog, PlanetId, TrackedAsteroids};
use crate::config::AppConfig;
use crate::render::bodies::{hex_color, planet_style};
use crate::render::scaling::scale_3d;
use crate::session::MitigationSession;

/// Original asteroid orbit color.
pub const ORIGINAL_ORBIT_COLOR: u32 = 0xffaa66;

/// Deflected asteroid orbit color.
pub const MITIGATED_ORBIT_COLOR: u32 = 0x44ff44;

/// Plugin providing orbit path visualization.
pub struct OrbitPathPlugin;

impl Plugin for OrbitPathPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<AppConfig>()
            .map(OrbitPathSettings::from_config)
            .unwrap_or_default();
        app.insert_resource(settings)
            .init_resource::<PlanetPaths>()
            .add_systems(
                Update,
                build_planet_paths.run_if(resource_exists_and_changed::<Catalog>),
            );
    }
}

/// Settings for orbit path rendering.
#[derive(Resource)]
pub struct OrbitPathSettings {
    pub visible: bool,
    /// Alpha of planet paths.
    pub planet_alpha: f32,
    /// Alpha of an asteroid's original path once a mitigation is applied.
    pub dimmed_alpha: f32,
    /// Max polyline points per path.
    pub max_points: usize,
}

impl Default for OrbitPathSettings {
    fn default() -> Self {
        Self {
            visible: true,
            planet_alpha: 0.35,
            dimmed_alpha: 0.3,
            max_points: 1024,
        }
    }
}

impl OrbitPathSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_points: config.orbit_points,
            ..default()
        }
    }
}

/// Scaled planet polylines.
#[derive(Resource, Default)]
pub struct PlanetPaths(pub HashMap<PlanetId, Vec<Vec3>>);

/// Keep at most `max` evenly spaced items, always including the last one.
pub fn downsample<T: Copy>(points: &[T], max: usize) -> Vec<T> {
    if points.len() <= max || max < 2 {
        return points.to_vec();
    }
    let stride = (points.len() - 1) as f64 / (max - 1) as f64;
    (0..max)
        .map(|i| points[((i as f64 * stride).round() as usize).min(points.len() - 1)])
        .collect()
}

/// Closed 1 AU circle in the ecliptic used for Earth without table data.
pub fn fallback_earth_orbit(segments: usize) -> Vec<DVec3> {
    let segments = segments.max(8);
    (0..=segments)
        .map(|i| {
            let angle = i as f64 / segments as f64 * TAU;
            DVec3::new(angle.cos(), angle.sin(), 0.0)
        })
        .collect()
}

fn build_planet_paths(
    catalog: Res<Catalog>,
    settings: Res<OrbitPathSettings>,
    mut paths: ResMut<PlanetPaths>,
) {
    paths.0.clear();
    for &id in PlanetId::ALL {
        let mut raw: Vec<DVec3> = catalog.planets().orbit(id).collect();
        if raw.is_empty() && id == PlanetId::Earth {
            raw = fallback_earth_orbit(256);
        }
        if raw.len() < 2 {
            continue;
        }
        let scaled: Vec<Vec3> = downsample(&raw, settings.max_points)
            .into_iter()
            .map(scale_3d)
            .collect();
        paths.0.insert(id, scaled);
    }
    debug!("Built {} planet orbit paths", paths.0.len());
}

/// Draw planet orbit paths.
pub fn draw_planet_orbits(
    mut gizmos: Gizmos,
    settings: Res<OrbitPathSettings>,
    paths: Res<PlanetPaths>,
    session: Res<MitigationSession>,
) {
    if !settings.visible {
        return;
    }
    for (&id, path) in &paths.0 {
        if session.focus_mode && id != PlanetId::Earth {
            continue;
        }
        let (color, _) = planet_style(id);
        gizmos.linestrip(path.iter().copied(), hex_color(color).with_alpha(settings.planet_alpha));
    }
}

/// Draw tracked asteroid paths and the deflected path of the focused one.
pub fn draw_asteroid_orbits(
    mut gizmos: Gizmos,
    settings: Res<OrbitPathSettings>,
    tracked: Res<TrackedAsteroids>,
    session: Res<MitigationSession>,
    catalog: Option<Res<Catalog>>,
) {
    if !settings.visible {
        return;
    }
    let Some(catalog) = catalog else {
        return;
    };

    for id in tracked.ids() {
        let focused = session.selected() == Some(id.as_str());
        if session.focus_mode && !focused {
            continue;
        }
        let Some(asteroid) = catalog.get(id) else {
            continue;
        };
        let positions: Vec<DVec3> = asteroid.track.positions().collect();
        if positions.len() < 2 {
            continue;
        }

        let mut color = hex_color(ORIGINAL_ORBIT_COLOR);
        if focused && session.mitigated_track().is_some() {
            color = color.with_alpha(settings.dimmed_alpha);
        }
        gizmos.linestrip(
            downsample(&positions, settings.max_points).into_iter().map(scale_3d),
            color,
        );
    }

    if let Some(track) = session.mitigated_track() {
        let positions: Vec<DVec3> = track.positions().collect();
        gizmos.linestrip(
            positions.into_iter().map(scale_3d),
            hex_color(MITIGATED_ORBIT_COLOR),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downsample_keeps_ends() {
        let points: Vec<u32> = (0..1000).collect();
        let sampled = downsample(&points, 10);
        assert_eq!(sampled.len(), 10);
        assert_eq!(sampled[0], 0);
        assert_eq!(*sampled.last().unwrap(), 999);
        assert!(sampled.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_downsample_short_input_untouched() {
        let points = [1, 2, 3];
        assert_eq!(downsample(&points, 10), vec![1, 2, 3]);
    }

    #[test]
    fn test_fallback_orbit_is_closed_unit_circle() {
        let orbit = fallback_earth_orbit(64);
        assert_eq!(orbit.len(), 65);
        assert!((orbit[0] - orbit[64]).length() < 1e-12);
        assert!(orbit.iter().all(|p| (p.length() - 1.0).abs() < 1e-12));
    }
}
