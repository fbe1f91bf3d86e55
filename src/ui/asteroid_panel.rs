//! Left panel: sortable asteroid list and the focused asteroid's details.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{MUTED_COLOR, UiState, icons, panel_frame};
use crate::catalog::{Catalog, CatalogAsteroid, SortKey, SortOrder, TrackedAsteroids};
use crate::session::{MitigationSession, SessionCommand};

/// Whether `asteroid` matches a case-insensitive name or id filter.
pub fn matches_search(asteroid: &CatalogAsteroid, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    needle.is_empty()
        || asteroid.record.display_name().to_lowercase().contains(&needle)
        || asteroid.id().to_lowercase().contains(&needle)
}

fn optional(value: Option<f64>, decimals: usize, unit: &str) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.decimals$}{unit}"))
}

fn optional_text(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("N/A")
}

pub fn asteroid_panel(
    mut contexts: EguiContexts,
    catalog: Option<Res<Catalog>>,
    tracked: Res<TrackedAsteroids>,
    session: Res<MitigationSession>,
    mut ui_state: ResMut<UiState>,
    mut session_commands: MessageWriter<SessionCommand>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::left("asteroid_panel")
        .resizable(true)
        .default_width(280.0)
        .frame(panel_frame())
        .show(ctx, |ui| {
            ui.heading(format!("{} Asteroids", icons::ASTEROID));

            let Some(catalog) = catalog.as_ref().filter(|c| !c.is_empty()) else {
                ui.colored_label(MUTED_COLOR, "No asteroid data loaded.");
                return;
            };

            ui.horizontal(|ui| {
                ui.label(icons::SEARCH);
                ui.text_edit_singleline(&mut ui_state.search);
            });
            ui.horizontal(|ui| {
                for key in SortKey::ALL {
                    if ui
                        .selectable_label(ui_state.sort_key == key, key.label())
                        .clicked()
                    {
                        ui_state.sort_key = key;
                    }
                }
                let (icon, next) = match ui_state.sort_order {
                    SortOrder::Ascending => (icons::SORT_ASC, SortOrder::Descending),
                    SortOrder::Descending => (icons::SORT_DESC, SortOrder::Ascending),
                };
                if ui.button(icon).on_hover_text("Reverse order").clicked() {
                    ui_state.sort_order = next;
                }
            });
            ui.label(format!("Tracked {} / {}", tracked.len(), tracked.limit()));
            ui.separator();

            let list = catalog.sorted(ui_state.sort_key, ui_state.sort_order);
            egui::ScrollArea::vertical()
                .id_salt("asteroid_list")
                .max_height(ui.available_height() * 0.55)
                .show(ui, |ui| {
                    for asteroid in list
                        .into_iter()
                        .filter(|a| matches_search(a, &ui_state.search))
                    {
                        let id = asteroid.id();
                        ui.horizontal(|ui| {
                            let mut is_tracked = tracked.contains(id);
                            if ui
                                .checkbox(&mut is_tracked, "")
                                .on_hover_text("Show in scene")
                                .changed()
                            {
                                session_commands.write(SessionCommand::ToggleTracked(id.to_string()));
                            }
                            let focused = session.selected() == Some(id);
                            let label = format!(
                                "{}  {:.0} m",
                                asteroid.record.display_name(),
                                asteroid.record.avg_diameter_m
                            );
                            if ui.selectable_label(focused, label).clicked() && !focused {
                                session_commands.write(SessionCommand::Select(id.to_string()));
                            }
                        });
                    }
                });

            ui.separator();

            let Some(asteroid) = session.selected().and_then(|id| catalog.get(id)) else {
                ui.colored_label(MUTED_COLOR, "Select an asteroid from the list.");
                return;
            };
            asteroid_details(ui, asteroid);

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let label = format!("{} Focus", icons::TARGET);
                if ui
                    .selectable_label(session.focus_mode, label)
                    .on_hover_text("Show only this asteroid and Earth (F)")
                    .clicked()
                {
                    session_commands.write(SessionCommand::ToggleFocusMode);
                }
                if ui.button(format!("{} Clear", icons::CLOSE)).clicked() {
                    session_commands.write(SessionCommand::Deselect);
                }
            });
        });
}

fn asteroid_details(ui: &mut egui::Ui, asteroid: &CatalogAsteroid) {
    let record = &asteroid.record;
    ui.heading(record.display_name());
    egui::Grid::new("asteroid_details")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            ui.label("ID");
            ui.label(&record.id);
            ui.end_row();
            ui.label("Diameter");
            ui.label(format!("{:.1} m", record.avg_diameter_m));
            ui.end_row();
            ui.label("Density");
            ui.label(format!("{:.0} kg/m³", record.assumed_density_kg_m3));
            ui.end_row();
            ui.label("Mass");
            ui.label(format!("{:.3e} kg", asteroid.mass_kg()));
            ui.end_row();
            ui.label("Velocity");
            ui.label(format!("{:.2} km/s", record.avg_relative_velocity_earth_kms));
            ui.end_row();
            ui.label("Impact probability");
            ui.label(optional(record.avg_impact_probability_percent, 6, " %"));
            ui.end_row();

            if let Some(orbit) = &record.orbital_data {
                ui.label("Eccentricity");
                ui.label(optional(orbit.eccentricity, 4, ""));
                ui.end_row();
                ui.label("Semi-major axis");
                ui.label(optional(orbit.semi_major_axis, 4, " AU"));
                ui.end_row();
                ui.label("Inclination");
                ui.label(optional(orbit.inclination, 2, "°"));
                ui.end_row();
                ui.label("Perihelion");
                ui.label(optional(orbit.perihelion_distance, 4, " AU"));
                ui.end_row();
                ui.label("Aphelion");
                ui.label(optional(orbit.aphelion_distance, 4, " AU"));
                ui.end_row();
                ui.label("Period");
                ui.label(optional(orbit.orbital_period, 1, " d"));
                ui.end_row();
                ui.label("Orbit uncertainty");
                ui.label(format!("{:.0}", record.orbit_uncertainty()));
                ui.end_row();
                ui.label("Mean anomaly");
                ui.label(optional(orbit.mean_anomaly, 2, "°"));
                ui.end_row();
                ui.label("Mean motion");
                ui.label(optional(orbit.mean_motion, 2, "°/day"));
                ui.end_row();
                ui.label("First observed");
                ui.label(optional_text(orbit.first_observation_date.as_deref()));
                ui.end_row();
                ui.label("Last observed");
                ui.label(optional_text(orbit.last_observation_date.as_deref()));
                ui.end_row();
            }
        });
}
