//! Data loading from the SensorBars server

use bevy::prelude::*;
use sensorbars_core::{Dataset, FetchError};
use std::sync::{Arc, Mutex};

pub struct NetworkPlugin;

/// Resource storing where the data endpoints live
#[derive(Resource, Clone, Debug, PartialEq, Eq, Default)]
pub struct DataServer {
    /// HTTP(S) base URL, empty for same-origin relative requests
    pub http_url: String,
}

impl DataServer {
    /// Create config from the `?server=` query parameter or same-origin fallback
    #[cfg(target_arch = "wasm32")]
    pub fn from_browser() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let location = window.location();

        if let Ok(search) = location.search() {
            if let Some(server) = Self::parse_query_param(&search, "server") {
                tracing::info!("Using data server from URL parameter: {}", server);
                return Self::from_address(&server);
            }
        }

        // Relative URLs resolve against the page origin
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_browser() -> Self {
        Self::default()
    }

    /// Create config from a server address (host:port or full URL)
    pub fn from_address(addr: &str) -> Self {
        let addr = addr.trim_end_matches('/');
        let http_url = if addr.starts_with("https://") || addr.starts_with("http://") {
            addr.to_string()
        } else {
            format!("http://{}", addr)
        };
        Self { http_url }
    }

    /// Full URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.http_url, path)
    }

    /// Parse a query parameter from a search string
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    fn parse_query_param(search: &str, param: &str) -> Option<String> {
        let search = search.trim_start_matches('?');
        for pair in search.split('&') {
            let mut parts = pair.splitn(2, '=');
            if let (Some(key), Some(value)) = (parts.next(), parts.next()) {
                if key == param && !value.is_empty() {
                    return Some(value.replace("%3A", ":").replace("%2F", "/"));
                }
            }
        }
        None
    }
}

/// Where the startup load currently stands
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Failed(String),
    Ready,
}

/// Result slot filled by the async load and drained by a Bevy system
#[derive(Resource, Default, Clone)]
pub struct PendingLoad(pub Arc<Mutex<Option<Result<Dataset, FetchError>>>>);

impl Plugin for NetworkPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DataServer::from_browser())
            .init_resource::<LoadState>()
            .init_resource::<PendingLoad>()
            .add_systems(Startup, start_load);
    }
}

/// Data source backed by browser HTTP requests
#[cfg(target_arch = "wasm32")]
pub struct HttpSource {
    server: DataServer,
}

#[cfg(target_arch = "wasm32")]
impl sensorbars_core::DataSource for HttpSource {
    async fn fetch_text(&self, endpoint: sensorbars_core::Endpoint) -> Result<String, FetchError> {
        let url = self.server.url(endpoint.path());
        tracing::debug!("Fetching {}", url);

        let response = gloo_net::http::Request::get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                endpoint,
                message: e.to_string(),
            })?;

        if !response.ok() {
            return Err(FetchError::Status {
                endpoint,
                status: response.status(),
            });
        }

        response.text().await.map_err(|e| FetchError::Request {
            endpoint,
            message: e.to_string(),
        })
    }
}

#[cfg(target_arch = "wasm32")]
fn start_load(server: Res<DataServer>, pending: Res<PendingLoad>) {
    use wasm_bindgen_futures::spawn_local;

    let slot = pending.0.clone();
    let source = HttpSource {
        server: server.clone(),
    };

    spawn_local(async move {
        let result = sensorbars_core::load(&source).await;
        if let Ok(mut slot) = slot.lock() {
            *slot = Some(result);
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn start_load(mut state: ResMut<LoadState>) {
    tracing::warn!("Data loading is only available in the browser build");
    *state = LoadState::Failed("data loading requires the wasm32 build".to_string());
}
