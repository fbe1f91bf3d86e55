//! Phosphor icon definitions for the UI.
//!
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::mitigation::MitigationMethod;

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

// Browse all icons at https://phosphoricons.com/

pub const PLAY: &str = egui_phosphor::regular::PLAY;
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
pub const STEP_BACK: &str = egui_phosphor::regular::CARET_LEFT;
pub const STEP_FORWARD: &str = egui_phosphor::regular::CARET_RIGHT;
pub const SPEED: &str = egui_phosphor::regular::FAST_FORWARD;
pub const CALENDAR: &str = egui_phosphor::regular::CALENDAR;
pub const RESET: &str = egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE;
pub const CLOSE: &str = egui_phosphor::regular::X;

pub const ASTEROID: &str = egui_phosphor::regular::ASTERISK;
pub const PLANET: &str = egui_phosphor::regular::GLOBE;
pub const ORBIT: &str = egui_phosphor::regular::PATH;
pub const TARGET: &str = egui_phosphor::regular::CROSSHAIR;
pub const MAP: &str = egui_phosphor::regular::MAP_TRIFOLD;
pub const LABEL: &str = egui_phosphor::regular::TAG;
pub const EYE: &str = egui_phosphor::regular::EYE;
pub const EYE_OFF: &str = egui_phosphor::regular::EYE_SLASH;
pub const SORT_ASC: &str = egui_phosphor::regular::SORT_ASCENDING;
pub const SORT_DESC: &str = egui_phosphor::regular::SORT_DESCENDING;
pub const SEARCH: &str = egui_phosphor::regular::MAGNIFYING_GLASS;

pub const WARNING: &str = egui_phosphor::regular::WARNING;
pub const SUCCESS: &str = egui_phosphor::regular::CHECK_CIRCLE;
pub const INFO: &str = egui_phosphor::regular::INFO;

/// Icon shown next to a deflection method.
pub fn method_icon(method: MitigationMethod) -> &'static str {
    match method {
        MitigationMethod::Kinetic => egui_phosphor::regular::ROCKET,
        MitigationMethod::Gravity => egui_phosphor::regular::MAGNET,
        MitigationMethod::Laser => egui_phosphor::regular::LIGHTNING,
        MitigationMethod::Nuclear => egui_phosphor::regular::RADIOACTIVE,
    }
}
