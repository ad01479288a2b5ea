//! SensorBars Scene - Bevy scene host for the bar view
//!
//! This crate owns everything rendering-specific: lights and ground grid,
//! the damped orbit camera that drives per-frame repaint, the bevy backend
//! for the core bar renderer, and the egui widgets shown next to the view.

pub mod bars;
pub mod camera;
pub mod scene;
pub mod ui;

use bevy::prelude::*;

/// Plugin that sets up the shared 3D scene components
pub struct SensorBarsScenePlugin;

impl Plugin for SensorBarsScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(camera::CameraPlugin)
            .add_plugins(scene::SceneSetupPlugin);
    }
}

pub use bars::{BarEntity, BevyBarScene};
pub use camera::{MainCamera, OrbitCamera};
pub use scene::GridSettings;
