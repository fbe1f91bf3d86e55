//! UI module providing the egui panels.
//!
//! Panels read resources and emit [`SessionCommand`] / [`ClockCommand`]
//! messages; they never run mitigation physics themselves.
//!
//! [`SessionCommand`]: crate::session::SessionCommand
//! [`ClockCommand`]: crate::time::ClockCommand

mod approach_panel;
mod asteroid_panel;
pub mod icons;
mod impact_map;
mod mitigation_panel;
mod results_panel;
mod time_controls;

use bevy::prelude::*;
use bevy_egui::{EguiPrimaryContextPass, egui};

use crate::catalog::{SortKey, SortOrder};
use crate::impact::{ImpactInputs, ImpactSite};

pub use approach_panel::{format_probability, probability_color};
pub use results_panel::{format_km, status_text};

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .init_resource::<ImpactSite>()
            .init_resource::<ImpactInputs>()
            .init_resource::<icons::FontsInitialized>()
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            // Panels claim screen edges in order: bottom bar, then left, then right
            .add_systems(
                EguiPrimaryContextPass,
                (
                    time_controls::time_controls_panel,
                    asteroid_panel::asteroid_panel,
                    mitigation_panel::mitigation_panel,
                    impact_map::impact_map_window,
                )
                    .chain()
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}

/// Panel-local state that is not part of the simulation.
#[derive(Resource, Default)]
pub struct UiState {
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    /// Case-insensitive name filter for the asteroid list.
    pub search: String,
    /// Text buffer of the "go to date" field.
    pub date_input: String,
    pub impact_map_open: bool,
}

/// Semi-transparent dark frame shared by the panels.
pub(crate) fn panel_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 30, 220))
        .inner_margin(egui::Margin::same(12))
}

pub(crate) const SAFE_COLOR: egui::Color32 = egui::Color32::from_rgb(80, 220, 100);
pub(crate) const DANGER_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 80, 80);
pub(crate) const MUTED_COLOR: egui::Color32 = egui::Color32::from_rgb(150, 150, 160);
