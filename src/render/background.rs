//! Starfield and scene lighting.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

/// Number of background stars.
pub const STAR_COUNT: usize = 2000;

/// Stars are placed in a shell between these radii (scene units).
pub const STAR_SHELL: std::ops::Range<f32> = 1500.0..2000.0;

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_starfield, spawn_lighting));
    }
}

/// Point on a sphere of `radius` from a cosine of the polar angle in
/// `[-1, 1]` and an azimuth. Uniform inputs give a uniform distribution.
pub fn star_position(cos_theta: f32, phi: f32, radius: f32) -> Vec3 {
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    Vec3::new(
        sin_theta * phi.cos(),
        cos_theta,
        sin_theta * phi.sin(),
    ) * radius
}

fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::WHITE * 0.5,
        unlit: true,
        ..default()
    });
    let star_mesh = meshes.add(Sphere::new(1.5));

    let mut rng = rand::rng();
    for _ in 0..STAR_COUNT {
        let pos = star_position(
            rng.random_range(-1.0..=1.0),
            rng.random_range(0.0..TAU),
            rng.random_range(STAR_SHELL),
        );
        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_material.clone()),
            Transform::from_translation(pos),
        ));
    }

    info!("Spawned {STAR_COUNT} background stars");
}

/// Light the planets from the Sun.
fn spawn_lighting(mut commands: Commands) {
    commands.spawn((
        PointLight {
            intensity: 2.0e9,
            range: 4000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::default(),
    ));

    // Weak fill light so the night sides stay readable
    commands.spawn((
        DirectionalLight {
            illuminance: 300.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 1000.0, 500.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!("Scene lighting initialized");
}
