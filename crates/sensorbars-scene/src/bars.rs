//! Bevy backend for the bar renderer

use bevy::prelude::*;
use sensorbars_core::{BarColor, BarSpec, SceneAdapter};

/// Marker component for bar entities
#[derive(Component, Debug)]
pub struct BarEntity {
    pub sensor_id: String,
    pub value: f64,
}

/// Height used for bars whose value is missing, so they still show up
const PLACEHOLDER_HEIGHT: f32 = 0.02;

/// Convert a bar color to a bevy color
pub fn bar_color(color: BarColor) -> Color {
    let [r, g, b] = color.rgb();
    Color::srgb_u8(r, g, b)
}

/// Spawns and despawns bar entities for the duration of one system call
pub struct BevyBarScene<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<StandardMaterial>,
}

impl<'a, 'w, 's> BevyBarScene<'a, 'w, 's> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        meshes: &'a mut Assets<Mesh>,
        materials: &'a mut Assets<StandardMaterial>,
    ) -> Self {
        Self {
            commands,
            meshes,
            materials,
        }
    }
}

impl SceneAdapter for BevyBarScene<'_, '_, '_> {
    type Handle = Entity;

    fn add_bar(&mut self, bar: &BarSpec) -> Entity {
        let [width, height, depth] = bar.size.map(|v| v as f32);
        let [x, y, z] = bar.position.map(|v| v as f32);

        // Cuboid extents must be finite and positive; a negative height keeps
        // its negative center and hangs below the ground plane
        let (mesh_height, center_y) = if height.is_finite() {
            (height.abs(), y)
        } else {
            tracing::warn!(sensor = %bar.sensor_id, "No value for sensor, drawing placeholder");
            (PLACEHOLDER_HEIGHT, PLACEHOLDER_HEIGHT / 2.0)
        };

        let mesh = self.meshes.add(Cuboid::new(width, mesh_height, depth));
        let material = self.materials.add(StandardMaterial {
            base_color: bar_color(bar.color),
            perceptual_roughness: 0.6,
            ..default()
        });

        self.commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_xyz(x, center_y, z),
                BarEntity {
                    sensor_id: bar.sensor_id.clone(),
                    value: bar.value,
                },
            ))
            .id()
    }

    fn remove_bar(&mut self, entity: Entity) {
        // Each bar owns its mesh and material, dropping the handles frees them
        self.commands.entity(entity).despawn();
    }
}
