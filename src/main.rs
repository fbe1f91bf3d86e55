//! NEO Mitigation Viewer
//!
//! Explore near-Earth asteroid close approaches and preview how kinetic,
//! nuclear, gravity-tractor and laser deflection change the miss distance.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use neo_mitigation::SimulationPlugin;
use neo_mitigation::camera::CameraPlugin;
use neo_mitigation::input::InputPlugin;
use neo_mitigation::render::RenderPlugin;
use neo_mitigation::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "NEO Mitigation Viewer".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .insert_resource(ClearColor(Color::BLACK))
        // Configuration first: the render plugin sizes its paths from it
        .add_plugins(SimulationPlugin)
        .add_plugins((RenderPlugin, CameraPlugin, InputPlugin, UiPlugin))
        .run();
}
