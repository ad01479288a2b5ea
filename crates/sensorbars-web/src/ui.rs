//! UI overlays using bevy_egui

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use sensorbars_scene::{ui as widgets, GridSettings};

use crate::dashboard::{ActiveDashboard, SelectionChanged};
use crate::network::{DataServer, LoadState};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Main UI system runs in EguiPrimaryContextPass for proper input handling (bevy_egui 0.38+)
        app.add_systems(EguiPrimaryContextPass, ui_system);
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    state: Res<LoadState>,
    active: Res<ActiveDashboard>,
    server: Res<DataServer>,
    mut grid: ResMut<GridSettings>,
    mut selection: MessageWriter<SelectionChanged>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    egui::Window::new("Sensor Readings")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(20.0, 20.0))
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| {
            match &*state {
                LoadState::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading data...");
                    });
                }
                LoadState::Failed(message) => {
                    ui.colored_label(egui::Color32::RED, "Failed to load data");
                    ui.label(egui::RichText::new(message).small());
                    ui.label(
                        egui::RichText::new("Reload the page to try again")
                            .small()
                            .color(egui::Color32::GRAY),
                    );
                }
                LoadState::Ready => {}
            }

            if let Some(dashboard) = &active.0 {
                if let Some(index) = widgets::time_selector_combo(ui, dashboard.selector()) {
                    selection.write(SelectionChanged { index });
                }

                ui.separator();
                widgets::render_dataset_summary(ui, dashboard);
            }

            ui.separator();
            widgets::render_legend(ui);

            let mut show_grid = grid.show_grid;
            if ui.checkbox(&mut show_grid, "Ground grid").changed() {
                grid.show_grid = show_grid;
            }

            if !server.http_url.is_empty() {
                ui.label(
                    egui::RichText::new(format!("Server: {}", server.http_url))
                        .small()
                        .color(egui::Color32::GRAY),
                );
            }
        });
}
