//! Orbit camera with damping
//!
//! Input only moves the `target_*` fields; [`OrbitCamera::advance`] eases the
//! live values toward them every frame, which keeps the camera drifting to
//! rest after the pointer is released.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;

/// Orbit camera state (Y-up)
#[derive(Debug, Clone, Resource)]
pub struct OrbitCamera {
    pub distance: f32,
    pub target_distance: f32,
    /// Rotation around the Y axis, 0 looks down -Z from +Z
    pub azimuth: f32,
    pub target_azimuth: f32,
    pub elevation: f32,
    pub target_elevation: f32,
    pub focus: Vec3,
    pub target_focus: Vec3,
    pub sensitivity: f32,
    pub zoom_speed: f32,
    pub smooth_factor: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        // Eye at (10, 10, 20) looking at the origin
        let eye = Vec3::new(10.0, 10.0, 20.0);
        let distance = eye.length();
        let azimuth = eye.x.atan2(eye.z);
        let elevation = (eye.y / distance).asin();

        Self {
            distance,
            target_distance: distance,
            azimuth,
            target_azimuth: azimuth,
            elevation,
            target_elevation: elevation,
            focus: Vec3::ZERO,
            target_focus: Vec3::ZERO,
            sensitivity: 0.005,
            zoom_speed: 0.1,
            smooth_factor: 0.15,
        }
    }
}

impl OrbitCamera {
    pub const MIN_DISTANCE: f32 = 2.0;
    pub const MAX_DISTANCE: f32 = 200.0;
    pub const MAX_ELEVATION: f32 = 1.5;

    /// Rotate by a pointer delta in pixels
    pub fn orbit(&mut self, delta: Vec2) {
        self.target_azimuth -= delta.x * self.sensitivity;
        self.target_elevation = (self.target_elevation + delta.y * self.sensitivity)
            .clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
    }

    /// Slide the focus point in the camera's view plane
    pub fn pan(&mut self, delta: Vec2) {
        let right = Vec3::new(self.azimuth.cos(), 0.0, -self.azimuth.sin());
        let speed = self.distance * 0.002;
        self.target_focus -= right * delta.x * speed;
        self.target_focus += Vec3::Y * delta.y * speed;
    }

    /// Zoom by wheel lines; positive zooms in
    pub fn zoom(&mut self, lines: f32) {
        let factor = 1.0 - lines * self.zoom_speed;
        self.target_distance =
            (self.target_distance * factor).clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }

    /// Ease live values toward their targets
    pub fn advance(&mut self, dt: f32) {
        let t = 1.0 - (-self.smooth_factor * 60.0 * dt).exp();
        self.distance += (self.target_distance - self.distance) * t;
        self.azimuth += (self.target_azimuth - self.azimuth) * t;
        self.elevation += (self.target_elevation - self.elevation) * t;
        self.focus += (self.target_focus - self.focus) * t;
    }

    /// Camera position for the live values
    pub fn eye(&self) -> Vec3 {
        let horizontal = self.distance * self.elevation.cos();
        self.focus
            + Vec3::new(
                horizontal * self.azimuth.sin(),
                self.distance * self.elevation.sin(),
                horizontal * self.azimuth.cos(),
            )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Y)
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Plugin for camera controls and per-frame damping
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitCamera>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, (orbit_input, apply_damping).chain());
    }
}

fn spawn_camera(mut commands: Commands, orbit: Res<OrbitCamera>) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 60f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        orbit.transform(),
        MainCamera,
    ));
}

fn orbit_input(
    mut orbit: ResMut<OrbitCamera>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut contexts: bevy_egui::EguiContexts,
) {
    // Leave the pointer to egui while it is over a panel
    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false);
    if egui_wants_pointer {
        return;
    }

    if mouse_button.pressed(MouseButton::Left) {
        orbit.orbit(motion.delta);
    }
    if mouse_button.pressed(MouseButton::Right) {
        orbit.pan(motion.delta);
    }
    if scroll.delta.y != 0.0 {
        orbit.zoom(scroll.delta.y);
    }
}

fn apply_damping(
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    orbit.advance(time.delta_secs());

    if let Ok(mut transform) = camera_query.single_mut() {
        *transform = orbit.transform();
    }
}
