//! SensorBars Core - Data model, loading, and bar layout
//!
//! This crate provides everything SensorBars needs that does not depend on
//! a rendering backend:
//! - Threshold configuration, sensor metadata, and reading types
//! - The asynchronous three-endpoint loader
//! - The index-based time selector
//! - Bar layout, threshold coloring, and the scene adapter seam
//! - The dashboard state object tying them together

pub mod bars;
pub mod dashboard;
pub mod loader;
pub mod model;
pub mod selector;

pub use bars::{BarColor, BarRenderer, BarSpec, RenderError, SceneAdapter};
pub use dashboard::{Dashboard, SelectError};
pub use loader::{load, DataSource, Endpoint, FetchError};
pub use model::{Dataset, IntegrityIssue, Reading, Sensor, ThresholdConfig, ThresholdRule};
pub use selector::{SelectorOption, TimeSelector};
