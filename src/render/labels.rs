//! Body labels using egui for text rendering.
//!
//! Anchors are collected in `Update` from the visible planet and asteroid
//! entities, then painted over the scene in the egui pass. A body hidden by
//! focus mode or missing data has no label.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use crate::camera::MainCamera;
use crate::catalog::{Catalog, PlanetId};
use crate::render::bodies::{AsteroidBody, PlanetBody};
use crate::render::sync::SyncPositionsSet;
use crate::session::MitigationSession;

/// Plugin providing body label rendering.
pub struct LabelPlugin;

impl Plugin for LabelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LabelSettings>()
            .init_resource::<BodyLabels>()
            .add_systems(Update, collect_body_labels.after(SyncPositionsSet))
            .add_systems(EguiPrimaryContextPass, draw_body_labels);
    }
}

/// Settings for label rendering.
#[derive(Resource)]
pub struct LabelSettings {
    pub visible: bool,
    /// Offset from body center in screen pixels.
    pub offset: f32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            visible: true,
            offset: 12.0,
        }
    }
}

/// A label anchored at a scene position.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyLabel {
    pub text: String,
    pub anchor: Vec3,
    pub asteroid: bool,
}

/// Labels to paint this frame.
#[derive(Resource, Default, Debug)]
pub struct BodyLabels(pub Vec<BodyLabel>);

/// Whether a planet label is drawn.
pub fn planet_label_shown(id: PlanetId, visibility: Visibility, focus_mode: bool) -> bool {
    visibility != Visibility::Hidden && !(focus_mode && id != PlanetId::Earth)
}

pub fn collect_body_labels(
    settings: Res<LabelSettings>,
    session: Res<MitigationSession>,
    catalog: Option<Res<Catalog>>,
    planets: Query<(&PlanetBody, &Transform, &Visibility)>,
    asteroids: Query<(&AsteroidBody, &Transform, &Visibility)>,
    mut labels: ResMut<BodyLabels>,
) {
    labels.0.clear();
    if !settings.visible {
        return;
    }

    for (planet, transform, vis) in &planets {
        if planet_label_shown(planet.id, *vis, session.focus_mode) {
            labels.0.push(BodyLabel {
                text: planet.id.name().to_string(),
                anchor: transform.translation,
                asteroid: false,
            });
        }
    }

    for (body, transform, vis) in &asteroids {
        if *vis == Visibility::Hidden {
            continue;
        }
        let text = catalog
            .as_ref()
            .and_then(|c| c.get(&body.id))
            .map_or(body.id.as_str(), |a| a.record.display_name());
        labels.0.push(BodyLabel {
            text: text.to_string(),
            anchor: transform.translation,
            asteroid: true,
        });
    }
}

/// Paint the collected labels next to their bodies.
pub fn draw_body_labels(
    mut contexts: EguiContexts,
    labels: Res<BodyLabels>,
    settings: Res<LabelSettings>,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) {
    if labels.0.is_empty() {
        return;
    }
    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("body_labels"),
    ));
    let font = egui::FontId::proportional(13.0);

    for label in &labels.0 {
        let Ok(screen) = camera.world_to_viewport(camera_transform, label.anchor) else {
            continue;
        };
        let pos = egui::pos2(screen.x + settings.offset, screen.y - settings.offset);
        let color = if label.asteroid {
            egui::Color32::from_rgb(255, 190, 150)
        } else {
            egui::Color32::from_rgba_unmultiplied(220, 220, 220, 230)
        };

        // Shadow
        painter.text(
            pos + egui::vec2(1.0, 1.0),
            egui::Align2::LEFT_BOTTOM,
            &label.text,
            font.clone(),
            egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180),
        );
        painter.text(pos, egui::Align2::LEFT_BOTTOM, &label.text, font.clone(), color);
    }
}
