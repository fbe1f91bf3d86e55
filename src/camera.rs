//! Orbit camera for the 3D scene.
//!
//! Left-drag rotates around the target, right-drag pans, the scroll wheel
//! zooms. In focus mode the target follows the focused asteroid.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};
use bevy_egui::EguiContexts;

use crate::render::AsteroidBody;
use crate::render::sync::SyncPositionsSet;
use crate::session::MitigationSession;

/// Closest allowed camera distance (scene units).
pub const MIN_DISTANCE: f32 = 50.0;

/// Furthest allowed camera distance (scene units).
pub const MAX_DISTANCE: f32 = 3000.0;

/// Initial camera position, above and in front of the ecliptic.
pub const START_POSITION: Vec3 = Vec3::new(0.0, 500.0, 800.0);

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Radians per pixel of drag.
pub const ROTATE_SPEED: f32 = 0.005;

/// Pan speed multiplier.
pub const PAN_SPEED: f32 = 0.002;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Spherical camera placement around a target point.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Rotation about +Y (radians), 0 looks down -Z.
    pub yaw: f32,
    /// Elevation above the XZ plane (radians).
    pub pitch: f32,
    /// Whether the target is following the focused asteroid.
    following: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(START_POSITION, Vec3::ZERO)
    }
}

impl OrbitCamera {
    /// Camera at `eye` looking at `target`.
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        Self {
            target,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / offset.length().max(f32::EPSILON)).clamp(-1.0, 1.0).asin(),
            following: false,
        }
    }

    /// Eye position.
    pub fn translation(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation()).looking_at(self.target, Vec3::Y)
    }

    /// Multiply the distance by `factor`, clamped to the allowed range.
    pub fn zoom(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn rotate(&mut self, delta: Vec2) {
        let limit = std::f32::consts::FRAC_PI_2 - 0.01;
        self.yaw -= delta.x * ROTATE_SPEED;
        self.pitch = (self.pitch + delta.y * ROTATE_SPEED).clamp(-limit, limit);
    }

    /// Shift the target in the camera's screen plane.
    pub fn pan(&mut self, delta: Vec2) {
        let transform = self.transform();
        let scale = self.distance * PAN_SPEED;
        self.target += (transform.left() * delta.x + transform.up() * delta.y) * scale;
        self.following = false;
    }
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera).add_systems(
            Update,
            (camera_controls, follow_focus, apply_orbit_camera)
                .chain()
                .after(SyncPositionsSet),
        );
    }
}

fn setup_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 60f32.to_radians(),
            near: 1.0,
            far: 10_000.0,
            ..default()
        }),
        orbit.transform(),
        orbit,
        MainCamera,
    ));
}

/// Mouse rotate, pan and zoom, skipped while egui owns the pointer.
fn camera_controls(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut cameras: Query<&mut OrbitCamera, With<MainCamera>>,
    mut contexts: EguiContexts,
) {
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_pointer_input()
    {
        return;
    }
    let Ok(mut orbit) = cameras.single_mut() else {
        return;
    };

    if mouse_scroll.delta.y != 0.0 {
        orbit.zoom(1.0 - mouse_scroll.delta.y * ZOOM_SPEED);
    }
    if mouse_motion.delta == Vec2::ZERO {
        return;
    }
    if mouse_buttons.pressed(MouseButton::Left) {
        orbit.rotate(mouse_motion.delta);
    } else if mouse_buttons.pressed(MouseButton::Right) {
        orbit.pan(mouse_motion.delta);
    }
}

/// Track the focused asteroid in focus mode; return to the Sun afterwards.
fn follow_focus(
    session: Res<MitigationSession>,
    asteroids: Query<(&AsteroidBody, &Transform)>,
    mut cameras: Query<&mut OrbitCamera, With<MainCamera>>,
) {
    let Ok(mut orbit) = cameras.single_mut() else {
        return;
    };
    let focused = session
        .focus_mode
        .then(|| session.selected())
        .flatten()
        .and_then(|id| asteroids.iter().find(|(body, _)| body.id == id))
        .map(|(_, transform)| transform.translation);

    match focused {
        Some(target) => {
            orbit.target = target;
            orbit.following = true;
        }
        None if orbit.following => {
            orbit.target = Vec3::ZERO;
            orbit.following = false;
        }
        None => {}
    }
}

fn apply_orbit_camera(
    mut cameras: Query<(&OrbitCamera, &mut Transform), (With<MainCamera>, Changed<OrbitCamera>)>,
) {
    for (orbit, mut transform) in &mut cameras {
        *transform = orbit.transform();
    }
}
