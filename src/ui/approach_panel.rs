//! Close-approach navigator shown at the top of the mitigation panel.

use bevy::prelude::*;
use bevy_egui::egui;

use super::{DANGER_COLOR, MUTED_COLOR, icons};
use crate::approach::{CloseApproach, impact_probability, is_elevated};
use crate::catalog::CatalogAsteroid;
use crate::session::{MitigationSession, SessionCommand};
use crate::types::date_string;

/// Probability as a percentage with five decimals.
pub fn format_probability(probability: f64) -> String {
    format!("{:.5}%", probability * 100.0)
}

/// Red for elevated probabilities.
pub fn probability_color(probability: f64) -> egui::Color32 {
    if is_elevated(probability) {
        DANGER_COLOR
    } else {
        egui::Color32::LIGHT_GRAY
    }
}

// Browsing approaches leaves the clock where it is; only "Go to date" moves it.
const PREV_HINT: &str = "Previous approach (↑). The clock stays put; use Go to date to jump there";
const NEXT_HINT: &str = "Next approach (↓). The clock stays put; use Go to date to jump there";
const GO_TO_HINT: &str = "Move the clock to this approach";

/// `"<km> km (<ld> LD)"`.
pub fn format_miss_distance(approach: &CloseApproach) -> String {
    format!(
        "{} km ({:.2} LD)",
        super::format_km(approach.miss_distance_km),
        approach.lunar_distances()
    )
}

pub(super) fn approach_section(
    ui: &mut egui::Ui,
    asteroid: &CatalogAsteroid,
    session: &MitigationSession,
    commands: &mut MessageWriter<SessionCommand>,
) {
    ui.heading(format!("{} Close Approaches", icons::PLANET));
    let cursor = session.cursor();
    let Some(current) = cursor.current() else {
        ui.colored_label(MUTED_COLOR, "No close approaches between 2025 and 2100.");
        return;
    };

    ui.horizontal(|ui| {
        if ui.button(icons::STEP_BACK).on_hover_text(PREV_HINT).clicked() {
            commands.write(SessionCommand::PrevApproach);
        }
        ui.label(format!("{} / {}", cursor.index() + 1, cursor.len()));
        if ui.button(icons::STEP_FORWARD).on_hover_text(NEXT_HINT).clicked() {
            commands.write(SessionCommand::NextApproach);
        }
        if ui
            .button(format!("{} Go to date", icons::CALENDAR))
            .on_hover_text(GO_TO_HINT)
            .clicked()
        {
            commands.write(SessionCommand::GoToApproach);
        }
    });

    let probability = impact_probability(
        current.miss_distance_km,
        asteroid.record.orbit_uncertainty(),
    );
    egui::Grid::new("approach_details")
        .num_columns(2)
        .show(ui, |ui| {
            ui.label("Date");
            ui.label(date_string(current.date));
            ui.end_row();
            ui.label("Miss distance");
            ui.label(format_miss_distance(current));
            ui.end_row();
            ui.label("Orbiting body");
            ui.label(&current.orbiting_body);
            ui.end_row();
            ui.label("Impact probability");
            ui.colored_label(probability_color(probability), format_probability(probability));
            ui.end_row();
        });

    egui::CollapsingHeader::new(format!("All approaches ({})", cursor.len()))
        .id_salt("approach_list")
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("approach_scroll")
                .max_height(140.0)
                .show(ui, |ui| {
                    for (i, approach) in cursor.approaches().iter().enumerate() {
                        let label = format!(
                            "{}  {} km",
                            date_string(approach.date),
                            super::format_km(approach.miss_distance_km)
                        );
                        if ui.selectable_label(i == cursor.index(), label).clicked() {
                            commands.write(SessionCommand::SelectApproach(i));
                        }
                    }
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approach::MIN_IMPACT_PROBABILITY;
    use crate::test_utils::fixtures;

    #[test]
    fn test_format_probability() {
        assert_eq!(format_probability(MIN_IMPACT_PROBABILITY), "0.00100%");
        assert_eq!(format_probability(0.05), "5.00000%");
    }

    #[test]
    fn test_probability_color_threshold() {
        assert_eq!(probability_color(0.02), DANGER_COLOR);
        assert_eq!(probability_color(0.005), egui::Color32::LIGHT_GRAY);
    }

    #[test]
    fn test_step_hints_point_at_go_to_date() {
        for hint in [PREV_HINT, NEXT_HINT] {
            assert!(hint.contains("clock stays put"), "{hint}");
            assert!(hint.contains("Go to date"), "{hint}");
        }
        assert!(GO_TO_HINT.contains("Move the clock"));
    }

    #[test]
    fn test_format_miss_distance() {
        let approach = fixtures::approach("2029-04-13", 384_400.0);
        assert_eq!(format_miss_distance(&approach), "384,400 km (1.00 LD)");
    }
}
