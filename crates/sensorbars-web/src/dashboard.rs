//! Dashboard lifecycle: apply the loaded dataset, react to selection changes

use bevy::prelude::*;
use sensorbars_core::Dashboard;
use sensorbars_scene::BevyBarScene;

use crate::network::{LoadState, PendingLoad};

pub struct DashboardPlugin;

impl Plugin for DashboardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveDashboard>()
            .add_message::<SelectionChanged>()
            .add_systems(Update, (finish_load, handle_selection).chain());
    }
}

/// The dashboard for the loaded dataset, `None` until loading succeeds
#[derive(Resource, Default)]
pub struct ActiveDashboard(pub Option<Dashboard<Entity>>);

/// Sent by the time selector when the user picks a reading
#[derive(Message, Debug, Clone, Copy)]
pub struct SelectionChanged {
    pub index: usize,
}

/// Take the async load result, if it arrived, and build the dashboard
fn finish_load(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    pending: Res<PendingLoad>,
    mut state: ResMut<LoadState>,
    mut active: ResMut<ActiveDashboard>,
) {
    let Some(result) = pending.0.try_lock().ok().and_then(|mut slot| slot.take()) else {
        return;
    };

    let dataset = match result {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!(endpoint = %e.endpoint(), "Failed to load data: {}", e);
            *state = LoadState::Failed(e.to_string());
            return;
        }
    };

    dataset.log_integrity_issues();

    let mut scene = BevyBarScene::new(&mut commands, &mut meshes, &mut materials);
    if let Some(previous) = active.0.take() {
        previous.teardown(&mut scene);
    }

    match Dashboard::start(dataset, &mut scene) {
        Ok(dashboard) => {
            tracing::info!(
                sensors = dashboard.dataset().sensors.len(),
                readings = dashboard.selector().len(),
                "Dashboard ready"
            );
            active.0 = Some(dashboard);
            *state = LoadState::Ready;
        }
        Err(e) => {
            tracing::error!("Failed to render initial reading: {}", e);
            *state = LoadState::Failed(e.to_string());
        }
    }
}

/// Re-render for every selection change; failures are logged, never fatal
fn handle_selection(
    mut events: MessageReader<SelectionChanged>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut active: ResMut<ActiveDashboard>,
) {
    let Some(dashboard) = active.0.as_mut() else {
        // Nothing loaded yet, drop stale selections
        events.clear();
        return;
    };

    for event in events.read() {
        let mut scene = BevyBarScene::new(&mut commands, &mut meshes, &mut materials);
        if let Err(e) = dashboard.select(&mut scene, event.index) {
            tracing::error!(index = event.index, "Failed to render reading: {}", e);
        }
    }
}
