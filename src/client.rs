//! Dashboard backend client.
//!
//! Thin layer over an [`HttpClient`] that knows the backend's base URL and
//! endpoint paths, and turns a raw response into parsed JSON or a typed
//! [`FetchError`].

use std::sync::Arc;

use serde_json::Value;

use crate::error::{FetchResult, ShapeError, TransportError};
use crate::traits::{Headers, HttpClient};

/// Default backend address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Current air-quality reading endpoint.
pub const AIR_QUALITY_PATH: &str = "/api/airquality";

/// PM2.5 forecast endpoint.
pub const FORECAST_PATH: &str = "/api/forecast/pm25";

/// Client for the dashboard backend API.
///
/// Cloning is cheap; clones share the underlying HTTP client.
#[derive(Clone)]
pub struct DashboardClient {
    /// Base URL for the backend, without a trailing slash
    base_url: String,
    /// Transport used for every request
    http: Arc<dyn HttpClient>,
}

impl DashboardClient {
    /// Create a client for the default base URL.
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, http)
    }

    /// Create a client for a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a path against the base URL. Absolute URLs pass through.
    pub fn url_for(&self, path_or_url: &str) -> String {
        if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
            return path_or_url.to_string();
        }
        if path_or_url.starts_with('/') {
            format!("{}{}", self.base_url, path_or_url)
        } else {
            format!("{}/{}", self.base_url, path_or_url)
        }
    }

    pub fn air_quality_url(&self) -> String {
        self.url_for(AIR_QUALITY_PATH)
    }

    pub fn forecast_url(&self) -> String {
        self.url_for(FORECAST_PATH)
    }

    /// Perform one GET and parse the body as JSON.
    ///
    /// A single attempt: no retries, no caching. A non-2xx status is a
    /// [`TransportError::Status`]; when the body carries the backend's
    /// `{"error": "..."}` message it becomes the reason.
    pub async fn fetch_json(&self, path_or_url: &str) -> FetchResult<Value> {
        let url = self.url_for(path_or_url);
        tracing::debug!("GET {}", url);

        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        let response = self.http.get(&url, &headers).await?;
        tracing::debug!("GET {} -> {}", url, response.status);

        if !response.is_success() {
            let reported = response
                .json::<Value>()
                .ok()
                .and_then(|body| body.get("error").and_then(Value::as_str).map(String::from));
            let err = match reported {
                Some(reason) => TransportError::Status {
                    status: response.status,
                    reason,
                },
                None => TransportError::from_status(response.status),
            };
            return Err(err.into());
        }

        response.json::<Value>().map_err(|e| {
            ShapeError::MalformedJson {
                message: e.to_string(),
            }
            .into()
        })
    }
}

impl std::fmt::Debug for DashboardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
