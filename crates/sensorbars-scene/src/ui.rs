//! Shared egui widgets

use bevy_egui::egui;
use sensorbars_core::{BarColor, Dashboard, TimeSelector};

/// egui color for a bar color
pub fn egui_color(color: BarColor) -> egui::Color32 {
    let [r, g, b] = color.rgb();
    egui::Color32::from_rgb(r, g, b)
}

/// Combo box over the reading timestamps
///
/// Returns the newly picked index, if the user picked a different one.
pub fn time_selector_combo(ui: &mut egui::Ui, selector: &TimeSelector) -> Option<usize> {
    let current = selector.selected();
    let selected_text = selector.selected_label().unwrap_or("No readings");
    let mut picked = None;

    egui::ComboBox::from_label("Time")
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for option in selector.options() {
                if ui
                    .selectable_label(current == Some(option.index), option.label.as_str())
                    .clicked()
                    && current != Some(option.index)
                {
                    picked = Some(option.index);
                }
            }
        });

    picked
}

/// Color legend for the threshold classes
pub fn render_legend(ui: &mut egui::Ui) {
    ui.collapsing("Legend", |ui| {
        for color in [BarColor::Green, BarColor::Amber, BarColor::Red] {
            ui.horizontal(|ui| {
                ui.colored_label(egui_color(color), "■");
                ui.label(color.label());
            });
        }
    });
}

/// Sensor and reading counts for a loaded dashboard
pub fn render_dataset_summary<H>(ui: &mut egui::Ui, dashboard: &Dashboard<H>) {
    let dataset = dashboard.dataset();
    ui.label(format!("Sensors: {}", dataset.sensors.len()));
    ui.label(format!("Readings: {}", dataset.readings.len()));
    ui.label(
        egui::RichText::new(format!("Bars in scene: {}", dashboard.bar_count()))
            .small()
            .color(egui::Color32::GRAY),
    );
}
