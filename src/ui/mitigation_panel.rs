//! Right panel: approach navigator, deflection method sliders and results.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::approach_panel::approach_section;
use super::results_panel::results_section;
use super::{MUTED_COLOR, icons, panel_frame};
use crate::catalog::Catalog;
use crate::mitigation::ALL_METHODS;
use crate::session::{MitigationSession, SessionCommand};

pub fn mitigation_panel(
    mut contexts: EguiContexts,
    catalog: Option<Res<Catalog>>,
    session: Res<MitigationSession>,
    mut commands: MessageWriter<SessionCommand>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let Some(asteroid) = session
        .selected()
        .and_then(|id| catalog.as_ref().and_then(|c| c.get(id)))
    else {
        return;
    };

    egui::SidePanel::right("mitigation_panel")
        .resizable(true)
        .default_width(320.0)
        .frame(panel_frame())
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                approach_section(ui, asteroid, &session, &mut commands);
                ui.separator();

                ui.heading(format!("{} Deflection", icons::TARGET));
                ui.horizontal_wrapped(|ui| {
                    for method in ALL_METHODS {
                        let label = format!("{} {}", icons::method_icon(method), method.title());
                        if ui
                            .selectable_label(session.method() == method, label)
                            .clicked()
                        {
                            commands.write(SessionCommand::SetMethod(method));
                        }
                    }
                });
                ui.label(
                    egui::RichText::new(session.method().description())
                        .italics()
                        .color(MUTED_COLOR),
                );
                ui.add_space(4.0);

                for (spec, value) in session.params().iter() {
                    let mut edited = value;
                    let slider = egui::Slider::new(&mut edited, spec.min..=spec.max)
                        .step_by(spec.step)
                        .fixed_decimals(spec.decimals())
                        .text(spec.label);
                    if ui.add(slider).changed() {
                        commands.write(SessionCommand::SetParam {
                            id: spec.id,
                            value: edited,
                        });
                    }
                }

                ui.horizontal(|ui| {
                    if ui.button(format!("{} Reset", icons::RESET)).clicked() {
                        commands.write(SessionCommand::ResetParams);
                    }
                    let can_apply = session.cursor().current().is_some();
                    if ui
                        .add_enabled(can_apply, egui::Button::new("Apply Mitigation"))
                        .on_hover_text("Compute delta-V and the deflected orbit (Enter)")
                        .clicked()
                    {
                        commands.write(SessionCommand::Apply);
                    }
                    if session.applied().is_some() && ui.button("Clear").clicked() {
                        commands.write(SessionCommand::ClearMitigation);
                    }
                });

                ui.separator();
                results_section(ui, session.applied());
            });
        });
}
