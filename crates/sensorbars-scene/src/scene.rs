//! Scene setup - background, lights, and ground grid

use bevy::prelude::*;

/// Marker component for the main point light
#[derive(Component)]
pub struct MainLight;

/// Marker component for grid lines
#[derive(Component)]
pub struct GridLine;

/// Ground grid settings
#[derive(Debug, Clone, Resource)]
pub struct GridSettings {
    pub show_grid: bool,
    /// Lines on each side of the origin
    pub half_lines: i32,
    pub spacing: f32,
    pub line_thickness: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            half_lines: 10,
            spacing: 1.0,
            line_thickness: 0.02,
        }
    }
}

/// Plugin for scene setup
pub struct SceneSetupPlugin;

impl Plugin for SceneSetupPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb_u8(0x11, 0x11, 0x11)))
            .init_resource::<GridSettings>()
            .add_systems(Startup, setup_scene)
            .add_systems(Update, update_grid_visibility);
    }
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    grid: Res<GridSettings>,
) {
    // Key light above and in front of the bar row
    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            range: 100.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(20.0, 20.0, 20.0),
        MainLight,
    ));

    // Soft fill from the opposite side so back faces are readable
    commands.spawn((
        DirectionalLight {
            illuminance: 1500.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-10.0, 15.0, -10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let visibility = if grid.show_grid {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };

    let line_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.4, 0.4, 0.4, 0.6),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    let extent = grid.half_lines as f32 * grid.spacing;
    let line_along_x = meshes.add(Cuboid::new(extent * 2.0, grid.line_thickness, grid.line_thickness));
    let line_along_z = meshes.add(Cuboid::new(grid.line_thickness, grid.line_thickness, extent * 2.0));

    // Grid on the X-Z ground plane, bars stand on it
    for i in -grid.half_lines..=grid.half_lines {
        let offset = i as f32 * grid.spacing;
        commands.spawn((
            Mesh3d(line_along_x.clone()),
            MeshMaterial3d(line_material.clone()),
            Transform::from_xyz(0.0, 0.0, offset),
            GridLine,
            visibility,
        ));
        commands.spawn((
            Mesh3d(line_along_z.clone()),
            MeshMaterial3d(line_material.clone()),
            Transform::from_xyz(offset, 0.0, 0.0),
            GridLine,
            visibility,
        ));
    }
}

fn update_grid_visibility(
    grid: Res<GridSettings>,
    mut lines: Query<&mut Visibility, With<GridLine>>,
) {
    if !grid.is_changed() {
        return;
    }

    let visibility = if grid.show_grid {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut line in &mut lines {
        *line = visibility;
    }
}
