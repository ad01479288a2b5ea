//! Bevy application setup

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_picking::DefaultPickingPlugins;
use sensorbars_scene::SensorBarsScenePlugin;

use crate::dashboard::DashboardPlugin;
use crate::network::NetworkPlugin;
use crate::ui::UiPlugin;

/// Run the Bevy application
pub fn run() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "SensorBars".to_string(),
                canvas: Some("#sensorbars-canvas".to_string()),
                fit_canvas_to_parent: true,
                prevent_default_event_handling: false,
                ..default()
            }),
            ..default()
        }))
        // bevy_egui looks for the bevy_picking crate's plugin, add it first
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(EguiPlugin::default())
        .add_plugins(SensorBarsScenePlugin)
        .add_plugins(NetworkPlugin)
        .add_plugins(DashboardPlugin)
        .add_plugins(UiPlugin)
        .run();
}
