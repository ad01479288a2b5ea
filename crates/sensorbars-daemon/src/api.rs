//! Data endpoint handlers

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

/// Threshold rules keyed by sensor type
pub async fn get_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.dataset.config.clone())
}

/// Sensor list in display order
pub async fn list_sensors(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.dataset.sensors.clone())
}

/// Readings in selection order
pub async fn list_readings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.dataset.readings.clone())
}

/// Dataset summary for health checks
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub version: &'static str,
    pub rules: usize,
    pub sensors: usize,
    pub readings: usize,
    pub integrity_issues: Vec<String>,
}

pub async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dataset = &state.dataset;
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        rules: dataset.config.len(),
        sensors: dataset.sensors.len(),
        readings: dataset.readings.len(),
        integrity_issues: dataset
            .integrity_issues()
            .iter()
            .map(|issue| issue.to_string())
            .collect(),
    })
}
