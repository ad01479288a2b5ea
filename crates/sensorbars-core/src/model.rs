//! Threshold configuration, sensors, and readings

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Warning thresholds for one sensor type
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    /// Values strictly above this are flagged red
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warn_above: Option<f64>,
    /// Values strictly below this are flagged amber
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warn_below: Option<f64>,
}

/// Threshold rules keyed by sensor type (the `/config` document)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdConfig {
    pub rules: HashMap<String, ThresholdRule>,
}

impl ThresholdConfig {
    /// Look up the rule for a sensor type
    pub fn rule(&self, sensor_type: &str) -> Option<&ThresholdRule> {
        self.rules.get(sensor_type)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<(String, ThresholdRule)> for ThresholdConfig {
    fn from_iter<I: IntoIterator<Item = (String, ThresholdRule)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

/// A sensor as listed by `/sensors`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: String,
    /// Sensor type, used as the key into [`ThresholdConfig`]
    #[serde(rename = "type")]
    pub sensor_type: String,
}

impl Sensor {
    pub fn new(id: impl Into<String>, sensor_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sensor_type: sensor_type.into(),
        }
    }
}

/// One timestamped set of sensor values as listed by `/readings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: String,
    /// Sensor id -> value
    pub values: HashMap<String, f64>,
}

impl Reading {
    pub fn new<I, K>(timestamp: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            timestamp: timestamp.into(),
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Everything fetched at startup. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub config: ThresholdConfig,
    pub sensors: Vec<Sensor>,
    pub readings: Vec<Reading>,
}

/// A violation of the dataset's referential invariants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// Sensor type has no threshold rule; rendering will fail
    MissingRule { sensor_id: String, sensor_type: String },
    /// Reading has no value for a sensor; the bar height is NaN
    MissingValue { sensor_id: String, timestamp: String },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::MissingRule { sensor_id, sensor_type } => write!(
                f,
                "sensor '{}' has type '{}' with no threshold rule",
                sensor_id, sensor_type
            ),
            IntegrityIssue::MissingValue { sensor_id, timestamp } => write!(
                f,
                "reading '{}' has no value for sensor '{}'",
                timestamp, sensor_id
            ),
        }
    }
}

impl Dataset {
    pub fn new(config: ThresholdConfig, sensors: Vec<Sensor>, readings: Vec<Reading>) -> Self {
        Self {
            config,
            sensors,
            readings,
        }
    }

    /// List every missing rule and missing value, rules first
    pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
        let mut issues: Vec<IntegrityIssue> = self
            .sensors
            .iter()
            .filter(|s| self.config.rule(&s.sensor_type).is_none())
            .map(|s| IntegrityIssue::MissingRule {
                sensor_id: s.id.clone(),
                sensor_type: s.sensor_type.clone(),
            })
            .collect();

        for reading in &self.readings {
            for sensor in &self.sensors {
                if !reading.values.contains_key(&sensor.id) {
                    issues.push(IntegrityIssue::MissingValue {
                        sensor_id: sensor.id.clone(),
                        timestamp: reading.timestamp.clone(),
                    });
                }
            }
        }

        issues
    }

    /// Log integrity issues as warnings and return how many there were
    pub fn log_integrity_issues(&self) -> usize {
        let issues = self.integrity_issues();
        for issue in &issues {
            tracing::warn!(%issue, "Dataset integrity issue");
        }
        issues.len()
    }
}
