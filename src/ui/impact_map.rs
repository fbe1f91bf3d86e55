//! Equirectangular impact map with the selected site and energy estimate.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{DANGER_COLOR, MUTED_COLOR, UiState, icons};
use crate::catalog::Catalog;
use crate::impact::{
    DENSITY_RANGE, ENTRY_ANGLE_RANGE, ImpactInputs, ImpactSite, ImpactSource, ImpactorParams,
    RADIUS_RANGE, VELOCITY_RANGE, format_large_number,
};
use crate::session::MitigationSession;

/// Map size in points (2:1 aspect).
const MAP_SIZE: egui::Vec2 = egui::vec2(360.0, 180.0);

fn impactor_sliders(ui: &mut egui::Ui, params: &mut ImpactorParams) {
    ui.add(
        egui::Slider::new(&mut params.radius_m, RADIUS_RANGE)
            .logarithmic(true)
            .suffix(" m")
            .text("Radius"),
    );
    ui.add(
        egui::Slider::new(&mut params.density_kg_m3, DENSITY_RANGE)
            .step_by(50.0)
            .suffix(" kg/m³")
            .text("Density"),
    );
    ui.add(
        egui::Slider::new(&mut params.velocity_kms, VELOCITY_RANGE)
            .fixed_decimals(2)
            .suffix(" km/s")
            .text("Velocity"),
    );
    ui.add(
        egui::Slider::new(&mut params.entry_angle_deg, ENTRY_ANGLE_RANGE)
            .fixed_decimals(0)
            .suffix("°")
            .text("Entry angle"),
    );
}

/// Map-relative position of `pos` within `rect`, as `u, v` in `0..1`.
fn rect_uv(rect: egui::Rect, pos: egui::Pos2) -> (f64, f64) {
    let rel = pos - rect.min;
    (
        (rel.x / rect.width()).clamp(0.0, 1.0) as f64,
        (rel.y / rect.height()).clamp(0.0, 1.0) as f64,
    )
}

pub fn impact_map_window(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<UiState>,
    mut site: ResMut<ImpactSite>,
    mut inputs: ResMut<ImpactInputs>,
    session: Res<MitigationSession>,
    catalog: Option<Res<Catalog>>,
) {
    if !ui_state.impact_map_open {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut open = ui_state.impact_map_open;
    egui::Window::new(format!("{} Impact Map", icons::MAP))
        .open(&mut open)
        .resizable(false)
        .default_pos(egui::pos2(320.0, 80.0))
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(MAP_SIZE, egui::Sense::click());
            let rect = response.rect;

            painter.rect_filled(rect, 2.0, egui::Color32::from_rgb(18, 42, 78));
            let grid = egui::Stroke::new(0.5, egui::Color32::from_rgb(60, 90, 130));
            for lon in (-150..=150).step_by(30) {
                let x = rect.left() + rect.width() * ((lon as f32 + 180.0) / 360.0);
                painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], grid);
            }
            for lat in (-60..=60).step_by(30) {
                let y = rect.top() + rect.height() * ((90.0 - lat as f32) / 180.0);
                painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], grid);
            }

            if response.clicked()
                && let Some(pos) = response.interact_pointer_pos()
            {
                let (u, v) = rect_uv(rect, pos);
                *site = ImpactSite::from_map_uv(u, v);
                debug!("Impact site moved to {:.2}, {:.2}", site.lat, site.lon);
            }

            let (u, v) = site.map_uv();
            let marker = egui::pos2(
                rect.left() + rect.width() * u as f32,
                rect.top() + rect.height() * v as f32,
            );
            painter.circle_filled(marker, 5.0, DANGER_COLOR);
            painter.text(
                marker + egui::vec2(8.0, -8.0),
                egui::Align2::LEFT_BOTTOM,
                format!("{:.1}°, {:.1}°", site.lat, site.lon),
                egui::FontId::proportional(12.0),
                egui::Color32::WHITE,
            );

            ui.add_space(4.0);
            let record = session
                .selected()
                .and_then(|id| catalog.as_ref().and_then(|c| c.get(id)))
                .map(|a| &a.record);
            inputs.follow_selection(record);

            ui.horizontal(|ui| {
                if ui
                    .selectable_label(!inputs.is_custom(), format!("{} Selected asteroid", icons::ASTEROID))
                    .on_hover_text("Estimate with the selected asteroid at a 45° entry")
                    .clicked()
                {
                    inputs.use_selection(record);
                }
                if ui
                    .selectable_label(inputs.is_custom(), format!("{} Custom asteroid", icons::TARGET))
                    .on_hover_text("Start from a 50 m, 1500 kg/m³ body at 10 km/s")
                    .clicked()
                {
                    inputs.use_custom();
                }
            });

            if let ImpactSource::Selection(None) = inputs.source() {
                ui.colored_label(MUTED_COLOR, "Select an asteroid or create a custom one.");
                return;
            }
            if let Some(record) = record
                && !inputs.is_custom()
            {
                ui.label(record.display_name());
            }

            impactor_sliders(ui, &mut inputs.params);

            let estimate = inputs.params.estimate();
            egui::Grid::new("impact_estimate").num_columns(2).show(ui, |ui| {
                ui.label("Impact energy");
                ui.label(format!("{:.3e} J", estimate.energy_j));
                ui.end_row();
                ui.label("TNT equivalent");
                ui.label(format!(
                    "{} tons ({:.2} Mt)",
                    format_large_number(estimate.tnt_tons),
                    estimate.tnt_megatons
                ));
                ui.end_row();
            });
        });
    ui_state.impact_map_open = open;
}
