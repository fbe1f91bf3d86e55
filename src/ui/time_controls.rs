//! Time controls panel at the bottom of the screen.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use chrono::NaiveDate;

use super::{UiState, icons, panel_frame};
use crate::render::{LabelSettings, OrbitPathSettings};
use crate::time::{ClockCommand, SimulationClock};
use crate::types::date_string;

/// Parse the "go to date" field.
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

pub fn time_controls_panel(
    mut contexts: EguiContexts,
    clock: Res<SimulationClock>,
    mut ui_state: ResMut<UiState>,
    mut orbit_settings: ResMut<OrbitPathSettings>,
    mut label_settings: ResMut<LabelSettings>,
    mut clock_commands: MessageWriter<ClockCommand>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::bottom("time_controls")
        .frame(panel_frame().inner_margin(egui::Margin::symmetric(16, 8)))
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                let (icon, hint) = if clock.playing {
                    (icons::PAUSE, "Pause (Space)")
                } else {
                    (icons::PLAY, "Play (Space)")
                };
                if ui.button(icon).on_hover_text(hint).clicked() {
                    clock_commands.write(ClockCommand::TogglePlay);
                }
                if ui
                    .button(icons::STEP_BACK)
                    .on_hover_text("One day back (←)")
                    .clicked()
                {
                    clock_commands.write(ClockCommand::Step(-1));
                }
                if ui
                    .button(icons::STEP_FORWARD)
                    .on_hover_text("One day forward (→)")
                    .clicked()
                {
                    clock_commands.write(ClockCommand::Step(1));
                }

                ui.separator();

                ui.label(egui::RichText::new(date_string(clock.date())).monospace().strong());

                ui.separator();

                if ui
                    .button(format!("{} {}x", icons::SPEED, clock.speed()))
                    .on_hover_text("Cycle speed (S)")
                    .clicked()
                {
                    clock_commands.write(ClockCommand::CycleSpeed);
                }

                ui.separator();

                ui.label(icons::CALENDAR);
                let field = ui.add(
                    egui::TextEdit::singleline(&mut ui_state.date_input)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(90.0),
                );
                let submitted =
                    field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Go").clicked() || submitted {
                    match parse_date_input(&ui_state.date_input) {
                        Some(date) => {
                            clock_commands.write(ClockCommand::JumpTo(date));
                        }
                        None => warn!("'{}' is not a YYYY-MM-DD date", ui_state.date_input),
                    }
                }

                ui.separator();

                let orbit_icon = if orbit_settings.visible {
                    icons::EYE
                } else {
                    icons::EYE_OFF
                };
                if ui
                    .button(format!("{orbit_icon} {}", icons::ORBIT))
                    .on_hover_text("Show or hide orbit paths")
                    .clicked()
                {
                    orbit_settings.visible = !orbit_settings.visible;
                }
                let label_icon = if label_settings.visible {
                    icons::EYE
                } else {
                    icons::EYE_OFF
                };
                if ui
                    .button(format!("{label_icon} {}", icons::LABEL))
                    .on_hover_text("Show or hide body names")
                    .clicked()
                {
                    label_settings.visible = !label_settings.visible;
                }
                if ui
                    .selectable_label(ui_state.impact_map_open, format!("{} Impact map", icons::MAP))
                    .clicked()
                {
                    ui_state.impact_map_open = !ui_state.impact_map_open;
                }
            });
        });
}
