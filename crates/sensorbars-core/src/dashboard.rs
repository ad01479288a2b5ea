//! Application state: the loaded dataset, its selector, and the live bars
//!
//! A [`Dashboard`] is created once per successful load and replaced
//! wholesale if the data is reloaded. The scene backend is passed in on
//! every call rather than owned, so bevy systems can hand over their
//! `Commands` for the duration of one call.

use thiserror::Error;
use tracing::{debug, info};

use crate::bars::{BarRenderer, BarSpec, RenderError, SceneAdapter};
use crate::model::Dataset;
use crate::selector::TimeSelector;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("reading index {index} out of range ({len} readings)")]
    OutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug)]
pub struct Dashboard<H> {
    dataset: Dataset,
    selector: TimeSelector,
    renderer: BarRenderer<H>,
}

impl<H> Dashboard<H> {
    /// Build the selector and render the first reading, if there is one
    ///
    /// With no readings the selector is empty and the scene is not touched.
    pub fn start<S>(dataset: Dataset, scene: &mut S) -> Result<Self, RenderError>
    where
        S: SceneAdapter<Handle = H>,
    {
        let selector = TimeSelector::build(&dataset.readings);
        let mut dashboard = Self {
            dataset,
            selector,
            renderer: BarRenderer::new(),
        };

        match dashboard.dataset.readings.first() {
            Some(first) => {
                dashboard
                    .renderer
                    .render(scene, &dashboard.dataset, &first.values)?;
                dashboard.selector.select(0);
            }
            None => info!("No readings available, nothing to render"),
        }

        Ok(dashboard)
    }

    /// Selection-changed handler: render `readings[index]`
    pub fn select<S>(&mut self, scene: &mut S, index: usize) -> Result<Vec<BarSpec>, SelectError>
    where
        S: SceneAdapter<Handle = H>,
    {
        let reading = self
            .dataset
            .readings
            .get(index)
            .ok_or(SelectError::OutOfRange {
                index,
                len: self.dataset.readings.len(),
            })?;

        let bars = self.renderer.render(scene, &self.dataset, &reading.values)?;
        self.selector.select(index);
        debug!(index, timestamp = %reading.timestamp, "Reading selected");
        Ok(bars)
    }

    /// Remove every bar this dashboard put in the scene
    pub fn teardown<S>(mut self, scene: &mut S)
    where
        S: SceneAdapter<Handle = H>,
    {
        self.renderer.clear(scene);
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selector(&self) -> &TimeSelector {
        &self.selector
    }

    /// Number of bars currently in the scene
    pub fn bar_count(&self) -> usize {
        self.renderer.len()
    }
}
