//! Mitigation results section.

use bevy_egui::egui;

use super::{DANGER_COLOR, MUTED_COLOR, SAFE_COLOR, icons};
use crate::mitigation::{DeltaV, MitigationResult};
use crate::session::AppliedMitigation;
use crate::types::date_string;

/// Round to whole kilometers with thousands separators.
pub fn format_km(km: f64) -> String {
    if !km.is_finite() {
        return km.to_string();
    }
    let rounded = km.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Headline verdict and whether it is the safe outcome.
pub fn status_text(result: &MitigationResult) -> (&'static str, bool) {
    match result.delta_v {
        DeltaV::ExceedsCapacity { .. } => ("ABLATION EXCEEDS ASTEROID MASS", false),
        DeltaV::Valid(_) if result.is_safe() => ("SAFE", true),
        DeltaV::Valid(_) => ("REQUIRES ADDITIONAL MITIGATION", false),
    }
}

pub(super) fn results_section(ui: &mut egui::Ui, applied: Option<&AppliedMitigation>) {
    ui.heading(format!("{} Results", icons::INFO));
    let Some(applied) = applied else {
        ui.colored_label(MUTED_COLOR, "Apply a method to see its effect.");
        return;
    };
    let result = &applied.result;

    let (status, safe) = status_text(result);
    let (icon, color) = if safe {
        (icons::SUCCESS, SAFE_COLOR)
    } else {
        (icons::WARNING, DANGER_COLOR)
    };
    ui.label(
        egui::RichText::new(format!("{icon} {status}"))
            .color(color)
            .strong()
            .size(16.0),
    );

    egui::Grid::new("mitigation_results")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            ui.label("Method");
            ui.label(result.method.title());
            ui.end_row();
            ui.label("Delta-V");
            match result.delta_v {
                DeltaV::Valid(dv) => ui.label(format!("{dv:.4} m/s")),
                DeltaV::ExceedsCapacity {
                    ejected_kg,
                    asteroid_kg,
                } => ui.colored_label(
                    DANGER_COLOR,
                    format!("{ejected_kg:.3e} kg ablated > {asteroid_kg:.3e} kg"),
                ),
            };
            ui.end_row();
            ui.label("Mission date");
            ui.label(date_string(applied.applied_on));
            ui.end_row();
            ui.label("Approach");
            ui.label(date_string(applied.approach.date));
            ui.end_row();

            if let Some(change) = result.miss_change {
                ui.label("Original miss distance");
                ui.label(format!("{} km", format_km(change.original)));
                ui.end_row();
                ui.label("New miss distance");
                ui.colored_label(color, format!("{} km", format_km(change.new)));
                ui.end_row();
                ui.label("Change");
                let sign = if change.change >= 0.0 { "+" } else { "" };
                ui.label(format!("{sign}{} km", format_km(change.change)));
                ui.end_row();
            }
        });

    if applied.track.is_none() && matches!(result.delta_v, DeltaV::Valid(_)) {
        ui.colored_label(MUTED_COLOR, "Not enough position data to draw the new orbit.");
    }

    ui.add_space(6.0);
    ui.label(egui::RichText::new("Scientific Facts").strong());
    for fact in &result.facts {
        ui.label(format!("• {fact}"));
    }
}
