//! Sun, planet and asteroid entities.
//!
//! Planets are spawned once at startup. Asteroid entities follow the
//! [`TrackedAsteroids`] set: one sphere per tracked id.

use bevy::prelude::*;

use crate::catalog::{PlanetId, TrackedAsteroids};

/// Sun sphere radius (scene units).
pub const SUN_RADIUS: f32 = 20.0;

/// Asteroid sphere radius (scene units).
pub const ASTEROID_RADIUS: f32 = 10.0;

/// Marker for the Sun entity.
#[derive(Component)]
pub struct Sun;

/// A rendered planet.
#[derive(Component, Clone, Copy, Debug)]
pub struct PlanetBody {
    pub id: PlanetId,
}

/// A rendered tracked asteroid.
#[derive(Component, Clone, Debug)]
pub struct AsteroidBody {
    pub id: String,
}

/// Shared mesh and materials for asteroid spheres.
#[derive(Resource)]
pub struct AsteroidAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

/// Plugin providing body spawning.
pub struct CelestialBodyPlugin;

impl Plugin for CelestialBodyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_solar_system)
            .add_systems(Update, sync_tracked_asteroid_entities);
    }
}

/// Display color (sRGB hex) and sphere radius of each planet.
pub fn planet_style(id: PlanetId) -> (u32, f32) {
    match id {
        PlanetId::Mercury => (0xaaaaaa, 3.0),
        PlanetId::Venus => (0xffddaa, 4.0),
        PlanetId::Earth => (0x3399ff, 4.0),
        PlanetId::Mars => (0xff3300, 3.5),
        PlanetId::Jupiter => (0xffaa55, 8.0),
        PlanetId::Saturn => (0xffcc77, 7.0),
    }
}

/// Convert a `0xRRGGBB` value to a Bevy color.
pub fn hex_color(hex: u32) -> Color {
    let [_, r, g, b] = hex.to_be_bytes();
    Color::srgb_u8(r, g, b)
}

fn spawn_solar_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let sun_color = hex_color(0xffaa00);
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SUN_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: sun_color,
            emissive: sun_color.to_linear() * 2.0,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Sun,
    ));

    for &id in PlanetId::ALL {
        let (color, radius) = planet_style(id);
        commands.spawn((
            Mesh3d(meshes.add(Sphere::new(radius))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: hex_color(color),
                perceptual_roughness: 0.8,
                ..default()
            })),
            Transform::default(),
            Visibility::Hidden,
            PlanetBody { id },
        ));
    }

    let asteroid_color = hex_color(0xff8888);
    commands.insert_resource(AsteroidAssets {
        mesh: meshes.add(Sphere::new(ASTEROID_RADIUS)),
        material: materials.add(StandardMaterial {
            base_color: asteroid_color,
            emissive: hex_color(0xff4444).to_linear(),
            ..default()
        }),
    });

    info!("Spawned the Sun and {} planets", PlanetId::ALL.len());
}

/// Spawn and despawn asteroid spheres so they match the tracked set.
fn sync_tracked_asteroid_entities(
    mut commands: Commands,
    tracked: Res<TrackedAsteroids>,
    assets: Option<Res<AsteroidAssets>>,
    existing: Query<(Entity, &AsteroidBody)>,
) {
    if !tracked.is_changed() {
        return;
    }
    let Some(assets) = assets else {
        return;
    };

    for (entity, body) in &existing {
        if !tracked.contains(&body.id) {
            commands.entity(entity).despawn();
        }
    }

    for id in tracked.ids() {
        if existing.iter().any(|(_, body)| &body.id == id) {
            continue;
        }
        commands.spawn((
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
            Transform::default(),
            Visibility::Hidden,
            AsteroidBody { id: id.clone() },
        ));
        debug!("Spawned asteroid entity for {id}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_channels() {
        let c = hex_color(0x3399ff).to_srgba();
        assert!((c.red - 0x33 as f32 / 255.0).abs() < 1e-6);
        assert!((c.green - 0x99 as f32 / 255.0).abs() < 1e-6);
        assert!((c.blue - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_gas_giants_are_largest() {
        let (_, jupiter) = planet_style(PlanetId::Jupiter);
        for &id in PlanetId::ALL {
            assert!(planet_style(id).1 <= jupiter);
        }
    }
}
