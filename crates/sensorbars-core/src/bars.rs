//! Bar layout, threshold coloring, and scene bookkeeping
//!
//! One bar is laid out per sensor, left to right in sensor order. Height is
//! the raw value scaled by [`HEIGHT_DIVISOR`] and is deliberately not clamped.
//! Scene mutation goes through [`SceneAdapter`] so the renderer can run
//! against bevy or against an in-memory recorder.

use thiserror::Error;
use tracing::debug;

use crate::model::{Dataset, ThresholdRule};

/// X position of the first bar
pub const START_X: f64 = -5.0;
/// Horizontal distance between consecutive bars
pub const STEP_X: f64 = 2.5;
/// Value units per unit of bar height
pub const HEIGHT_DIVISOR: f64 = 10.0;
/// Bar footprint (width along X, depth along Z)
pub const BAR_WIDTH: f64 = 1.0;
pub const BAR_DEPTH: f64 = 1.0;

/// Threshold classification of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarColor {
    Green,
    Amber,
    Red,
}

impl BarColor {
    /// Pick a color for `value` under `rule`
    ///
    /// `warn_above` is checked first and wins when both thresholds match.
    /// NaN never matches either threshold.
    pub fn classify(rule: &ThresholdRule, value: f64) -> Self {
        match (rule.warn_above, rule.warn_below) {
            (Some(above), _) if value > above => BarColor::Red,
            (_, Some(below)) if value < below => BarColor::Amber,
            _ => BarColor::Green,
        }
    }

    /// 0xRRGGBB
    pub fn hex(&self) -> u32 {
        match self {
            BarColor::Green => 0x00ff00,
            BarColor::Amber => 0xffaa00,
            BarColor::Red => 0xff0000,
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        let hex = self.hex();
        [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
    }

    pub fn label(&self) -> &'static str {
        match self {
            BarColor::Green => "normal",
            BarColor::Amber => "below threshold",
            BarColor::Red => "above threshold",
        }
    }
}

/// Geometry and color of one bar
#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub sensor_id: String,
    /// NaN when the reading has no value for this sensor
    pub value: f64,
    pub height: f64,
    pub color: BarColor,
    /// Box center; the bar stands on the ground plane at y = 0
    pub position: [f64; 3],
    /// Width, height, depth
    pub size: [f64; 3],
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("no threshold rule for type '{sensor_type}' of sensor '{sensor_id}'")]
    MissingRule { sensor_id: String, sensor_type: String },
}

/// Lay out one bar per sensor for a reading's values
///
/// Fails on the first sensor whose type has no threshold rule.
pub fn layout_bars(
    dataset: &Dataset,
    values: &std::collections::HashMap<String, f64>,
) -> Result<Vec<BarSpec>, RenderError> {
    let mut x = START_X;
    let mut bars = Vec::with_capacity(dataset.sensors.len());

    for sensor in &dataset.sensors {
        let value = values.get(&sensor.id).copied().unwrap_or(f64::NAN);
        let height = value / HEIGHT_DIVISOR;

        let rule = dataset
            .config
            .rule(&sensor.sensor_type)
            .ok_or_else(|| RenderError::MissingRule {
                sensor_id: sensor.id.clone(),
                sensor_type: sensor.sensor_type.clone(),
            })?;

        bars.push(BarSpec {
            sensor_id: sensor.id.clone(),
            value,
            height,
            color: BarColor::classify(rule, value),
            position: [x, height / 2.0, 0.0],
            size: [BAR_WIDTH, height, BAR_DEPTH],
        });

        x += STEP_X;
    }

    Ok(bars)
}

/// The rendering backend as seen by [`BarRenderer`]
pub trait SceneAdapter {
    /// Whatever the backend needs to remove a bar later
    type Handle;

    fn add_bar(&mut self, bar: &BarSpec) -> Self::Handle;

    fn remove_bar(&mut self, handle: Self::Handle);
}

/// Owns the handles of the bars currently in the scene
#[derive(Debug)]
pub struct BarRenderer<H> {
    bars: Vec<H>,
}

impl<H> Default for BarRenderer<H> {
    fn default() -> Self {
        Self { bars: Vec::new() }
    }
}

impl<H> BarRenderer<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bars currently in the scene
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Remove every bar this renderer added
    pub fn clear<S>(&mut self, scene: &mut S)
    where
        S: SceneAdapter<Handle = H>,
    {
        for handle in self.bars.drain(..) {
            scene.remove_bar(handle);
        }
    }

    /// Replace the bars in the scene with one bar per sensor
    ///
    /// The layout is computed before the scene is touched, so on error the
    /// previous bars stay where they are.
    pub fn render<S>(
        &mut self,
        scene: &mut S,
        dataset: &Dataset,
        values: &std::collections::HashMap<String, f64>,
    ) -> Result<Vec<BarSpec>, RenderError>
    where
        S: SceneAdapter<Handle = H>,
    {
        let specs = layout_bars(dataset, values)?;

        self.clear(scene);
        for spec in &specs {
            self.bars.push(scene.add_bar(spec));
        }

        debug!(bars = specs.len(), "Rendered bars");
        Ok(specs)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{Reading, Sensor, ThresholdConfig};
    use std::collections::BTreeMap;

    /// Records bars by handle so tests can inspect the live scene
    #[derive(Default)]
    pub(crate) struct RecordingScene {
        next: usize,
        pub(crate) live: BTreeMap<usize, BarSpec>,
        pub(crate) removed: Vec<usize>,
    }

    impl SceneAdapter for RecordingScene {
        type Handle = usize;

        fn add_bar(&mut self, bar: &BarSpec) -> usize {
            let handle = self.next;
            self.next += 1;
            self.live.insert(handle, bar.clone());
            handle
        }

        fn remove_bar(&mut self, handle: usize) {
            assert!(self.live.remove(&handle).is_some(), "bar {} removed twice", handle);
            self.removed.push(handle);
        }
    }

    fn rule(above: Option<f64>, below: Option<f64>) -> ThresholdRule {
        ThresholdRule {
            warn_above: above,
            warn_below: below,
        }
    }

    fn dataset(rules: &[(&str, ThresholdRule)], sensors: &[(&str, &str)]) -> Dataset {
        let config: ThresholdConfig = rules
            .iter()
            .map(|(name, rule)| (name.to_string(), *rule))
            .collect();
        Dataset::new(
            config,
            sensors.iter().map(|(id, ty)| Sensor::new(*id, *ty)).collect(),
            Vec::new(),
        )
    }

    #[test]
    fn test_classify() {
        assert_eq!(BarColor::classify(&rule(None, None), 1e9), BarColor::Green);
        assert_eq!(BarColor::classify(&rule(Some(30.0), None), 30.0), BarColor::Green);
        assert_eq!(BarColor::classify(&rule(Some(30.0), None), 30.5), BarColor::Red);
        assert_eq!(BarColor::classify(&rule(None, Some(20.0)), 20.0), BarColor::Green);
        assert_eq!(BarColor::classify(&rule(None, Some(20.0)), 19.0), BarColor::Amber);
        assert_eq!(BarColor::classify(&rule(Some(0.0), None), 0.5), BarColor::Red);
        assert_eq!(BarColor::classify(&rule(Some(30.0), Some(20.0)), f64::NAN), BarColor::Green);
    }

    #[test]
    fn test_contradictory_rule_prefers_red() {
        // warn_above below warn_below: 15 satisfies both
        let contradictory = rule(Some(10.0), Some(20.0));
        assert_eq!(BarColor::classify(&contradictory, 15.0), BarColor::Red);
        assert_eq!(BarColor::classify(&contradictory, 5.0), BarColor::Amber);
        assert_eq!(BarColor::classify(&contradictory, 25.0), BarColor::Red);
    }

    #[test]
    fn test_color_values() {
        assert_eq!(BarColor::Green.hex(), 0x00ff00);
        assert_eq!(BarColor::Amber.rgb(), [0xff, 0xaa, 0x00]);
        assert_eq!(BarColor::Red.rgb(), [0xff, 0x00, 0x00]);
    }

    #[test]
    fn test_layout_positions_and_heights() {
        let data = dataset(
            &[("temp", rule(Some(30.0), None))],
            &[("a", "temp"), ("b", "temp"), ("c", "temp")],
        );
        let reading = Reading::new("t0", [("a", 25.0), ("b", 0.0), ("c", -10.0)]);

        let bars = layout_bars(&data, &reading.values).unwrap();
        assert_eq!(bars.len(), 3);

        let xs: Vec<f64> = bars.iter().map(|b| b.position[0]).collect();
        assert_eq!(xs, vec![-5.0, -2.5, 0.0]);

        assert_eq!(bars[0].height, 2.5);
        assert_eq!(bars[0].position, [-5.0, 1.25, 0.0]);
        assert_eq!(bars[0].size, [1.0, 2.5, 1.0]);

        // Zero and negative values are not clamped
        assert_eq!(bars[1].height, 0.0);
        assert_eq!(bars[2].height, -1.0);
        assert_eq!(bars[2].position[1], -0.5);
    }

    #[test]
    fn test_missing_value_gives_nan_height() {
        let data = dataset(&[("temp", rule(Some(30.0), Some(20.0)))], &[("a", "temp")]);
        let reading = Reading::new("t0", std::iter::empty::<(String, f64)>());

        let bars = layout_bars(&data, &reading.values).unwrap();
        assert_eq!(bars.len(), 1);
        assert!(bars[0].value.is_nan());
        assert!(bars[0].height.is_nan());
        assert_eq!(bars[0].color, BarColor::Green);
    }

    #[test]
    fn test_missing_rule_is_an_error() {
        let data = dataset(&[("temp", rule(None, None))], &[("a", "temp"), ("p", "pressure")]);
        let reading = Reading::new("t0", [("a", 1.0), ("p", 2.0)]);

        let err = layout_bars(&data, &reading.values).unwrap_err();
        assert_eq!(
            err,
            RenderError::MissingRule {
                sensor_id: "p".to_string(),
                sensor_type: "pressure".to_string(),
            }
        );
    }

    #[test]
    fn test_rerender_replaces_previous_bars() {
        let data = dataset(&[("temp", rule(Some(30.0), None))], &[("a", "temp"), ("b", "temp")]);
        let mut scene = RecordingScene::default();
        let mut renderer = BarRenderer::new();

        renderer
            .render(&mut scene, &data, &Reading::new("t0", [("a", 1.0), ("b", 2.0)]).values)
            .unwrap();
        assert_eq!(renderer.len(), 2);
        let first: Vec<usize> = scene.live.keys().copied().collect();

        renderer
            .render(&mut scene, &data, &Reading::new("t1", [("a", 40.0), ("b", 3.0)]).values)
            .unwrap();
        assert_eq!(renderer.len(), 2);
        assert_eq!(scene.removed, first);
        assert_eq!(scene.live.len(), 2);
        assert!(first.iter().all(|h| !scene.live.contains_key(h)));

        let colors: Vec<BarColor> = scene.live.values().map(|b| b.color).collect();
        assert_eq!(colors, vec![BarColor::Red, BarColor::Green]);
    }

    #[test]
    fn test_failed_render_keeps_previous_bars() {
        let good = dataset(&[("temp", rule(None, None))], &[("a", "temp")]);
        let bad = dataset(&[("temp", rule(None, None))], &[("a", "temp"), ("p", "pressure")]);
        let values = Reading::new("t0", [("a", 1.0), ("p", 1.0)]).values;
        let mut scene = RecordingScene::default();
        let mut renderer = BarRenderer::new();

        renderer.render(&mut scene, &good, &values).unwrap();
        assert!(renderer.render(&mut scene, &bad, &values).is_err());

        assert_eq!(renderer.len(), 1);
        assert_eq!(scene.live.len(), 1);
        assert!(scene.removed.is_empty());
    }

    #[test]
    fn test_clear() {
        let data = dataset(&[("temp", rule(None, None))], &[("a", "temp"), ("b", "temp")]);
        let mut scene = RecordingScene::default();
        let mut renderer = BarRenderer::new();

        renderer
            .render(&mut scene, &data, &Reading::new("t0", [("a", 1.0), ("b", 1.0)]).values)
            .unwrap();
        renderer.clear(&mut scene);

        assert!(renderer.is_empty());
        assert!(scene.live.is_empty());
        assert_eq!(scene.removed.len(), 2);
    }
}
