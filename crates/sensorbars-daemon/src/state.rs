//! Application state management

use anyhow::{Context, Result};
use sensorbars_core::{DataSource, Dataset, Endpoint, FetchError};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;

/// Shared application state
pub struct AppState {
    /// Dataset served to clients, immutable after startup
    pub dataset: Dataset,
    /// Configuration
    pub config: Config,
}

impl AppState {
    /// Load the dataset from the configured directory
    pub async fn new(config: Config) -> Result<Arc<Self>> {
        let source = DirSource::new(config.data.path.clone());
        let dataset = sensorbars_core::load(&source)
            .await
            .with_context(|| format!("Failed to load dataset from {}", config.data.path.display()))?;

        let issues = dataset.log_integrity_issues();
        if issues > 0 {
            warn!(issues, "Dataset has integrity issues, affected renders will fail or show gaps");
        }

        info!(
            path = %config.data.path.display(),
            sensors = dataset.sensors.len(),
            readings = dataset.readings.len(),
            "Dataset ready"
        );

        Ok(Arc::new(Self { dataset, config }))
    }
}

/// Reads each endpoint from `<dir>/<endpoint file name>`
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl DataSource for DirSource {
    async fn fetch_text(&self, endpoint: Endpoint) -> Result<String, FetchError> {
        let path = self.dir.join(endpoint.file_name());
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FetchError::Request {
                endpoint,
                message: format!("{}: {}", path.display(), e),
            })
    }
}
