//! Three-endpoint data loading
//!
//! The dataset is assembled from three JSON documents fetched concurrently.
//! All three must arrive and decode before anything downstream runs; the
//! first failure aborts the load.

use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{Dataset, Reading, Sensor, ThresholdConfig};

/// The three resources a dataset is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Config,
    Sensors,
    Readings,
}

impl Endpoint {
    pub const ALL: [Endpoint; 3] = [Endpoint::Config, Endpoint::Sensors, Endpoint::Readings];

    /// HTTP path on the data server
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Config => "/config",
            Endpoint::Sensors => "/sensors",
            Endpoint::Readings => "/readings",
        }
    }

    /// File name used when the dataset is stored on disk
    pub fn file_name(&self) -> &'static str {
        match self {
            Endpoint::Config => "config.json",
            Endpoint::Sensors => "sensors.json",
            Endpoint::Readings => "readings.json",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {message}")]
    Request { endpoint: Endpoint, message: String },
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: Endpoint, status: u16 },
    #[error("{endpoint} is not valid JSON: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            FetchError::Request { endpoint, .. }
            | FetchError::Status { endpoint, .. }
            | FetchError::Decode { endpoint, .. } => *endpoint,
        }
    }
}

/// Something that can return the raw body of an endpoint
///
/// Implementations only move bytes; decoding happens in [`load`].
#[allow(async_fn_in_trait)]
pub trait DataSource {
    async fn fetch_text(&self, endpoint: Endpoint) -> Result<String, FetchError>;
}

async fn fetch_json<T, S>(source: &S, endpoint: Endpoint) -> Result<T, FetchError>
where
    T: DeserializeOwned,
    S: DataSource,
{
    let body = source.fetch_text(endpoint).await?;
    debug!(%endpoint, bytes = body.len(), "Fetched resource");
    serde_json::from_str(&body).map_err(|source| FetchError::Decode { endpoint, source })
}

/// Fetch config, sensors and readings concurrently and assemble a [`Dataset`]
pub async fn load<S: DataSource>(source: &S) -> Result<Dataset, FetchError> {
    let (config, sensors, readings) = futures_util::future::try_join3(
        fetch_json::<ThresholdConfig, _>(source, Endpoint::Config),
        fetch_json::<Vec<Sensor>, _>(source, Endpoint::Sensors),
        fetch_json::<Vec<Reading>, _>(source, Endpoint::Readings),
    )
    .await?;

    info!(
        rules = config.len(),
        sensors = sensors.len(),
        readings = readings.len(),
        "Dataset loaded"
    );

    Ok(Dataset::new(config, sensors, readings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory source; endpoints without a body fail with HTTP 404
    #[derive(Default)]
    struct MemorySource {
        bodies: HashMap<Endpoint, String>,
        requested: RefCell<Vec<Endpoint>>,
    }

    impl MemorySource {
        fn with(mut self, endpoint: Endpoint, body: &str) -> Self {
            self.bodies.insert(endpoint, body.to_string());
            self
        }
    }

    impl DataSource for MemorySource {
        async fn fetch_text(&self, endpoint: Endpoint) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(endpoint);
            self.bodies
                .get(&endpoint)
                .cloned()
                .ok_or(FetchError::Status { endpoint, status: 404 })
        }
    }

    fn complete_source() -> MemorySource {
        MemorySource::default()
            .with(Endpoint::Config, r#"{"temp": {"warn_above": 30}}"#)
            .with(Endpoint::Sensors, r#"[{"id": "s1", "type": "temp"}]"#)
            .with(
                Endpoint::Readings,
                r#"[{"timestamp": "t0", "values": {"s1": 25}}, {"timestamp": "t1", "values": {"s1": 35}}]"#,
            )
    }

    #[tokio::test]
    async fn test_load_all_three() {
        let source = complete_source();
        let dataset = load(&source).await.unwrap();

        assert_eq!(dataset.config.rule("temp").unwrap().warn_above, Some(30.0));
        assert_eq!(dataset.sensors.len(), 1);
        assert_eq!(dataset.readings.len(), 2);
        assert_eq!(dataset.readings[1].timestamp, "t1");

        let mut requested = source.requested.borrow().clone();
        requested.sort_by_key(|e| e.path());
        assert_eq!(requested, vec![Endpoint::Config, Endpoint::Readings, Endpoint::Sensors]);
    }

    #[tokio::test]
    async fn test_missing_endpoint_fails_whole_load() {
        let source = MemorySource::default()
            .with(Endpoint::Config, "{}")
            .with(Endpoint::Sensors, "[]");

        let err = load(&source).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status { endpoint: Endpoint::Readings, status: 404 }
        ));
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let source = complete_source().with(Endpoint::Sensors, "<html>oops</html>");

        let err = load(&source).await.unwrap_err();
        assert_eq!(err.endpoint(), Endpoint::Sensors);
        assert!(matches!(err, FetchError::Decode { .. }));
        assert!(err.to_string().starts_with("/sensors is not valid JSON"));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_decode_error() {
        let source = complete_source().with(Endpoint::Readings, r#"{"timestamp": "t0"}"#);

        let err = load(&source).await.unwrap_err();
        assert_eq!(err.endpoint(), Endpoint::Readings);
    }

    #[tokio::test]
    async fn test_empty_readings_load_fine() {
        let source = complete_source().with(Endpoint::Readings, "[]");
        let dataset = load(&source).await.unwrap();
        assert!(dataset.readings.is_empty());
    }

    #[test]
    fn test_endpoint_paths() {
        let paths: Vec<_> = Endpoint::ALL.iter().map(|e| e.path()).collect();
        assert_eq!(paths, vec!["/config", "/sensors", "/readings"]);
        assert_eq!(Endpoint::Readings.file_name(), "readings.json");
    }
}
