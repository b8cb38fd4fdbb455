//! Common test utilities for integration tests.
//!
//! Builds mock backends and settled [`App`] instances so each test can
//! focus on what the dashboard shows.
//!
//! # Example
//!
//! ```ignore
//! mod common;
//!
//! let mock = common::mock_backend(common::full_reading(), common::two_day_forecast());
//! let app = common::settled_app(&mock, common::test_config()).await;
//! ```

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use aqdash::adapters::mock::{MockHttpClient, MockResponse};
use aqdash::app::App;
use aqdash::startup::DashboardConfig;
use aqdash::ui::{render_to_string, StatusInfo};
use serde_json::{json, Value};

pub const BASE_URL: &str = "http://backend.test";
pub const AIR_URL: &str = "http://backend.test/api/airquality";
pub const FORECAST_URL: &str = "http://backend.test/api/forecast/pm25";

/// Config pointing at the mock backend.
pub fn test_config() -> DashboardConfig {
    DashboardConfig::default().with_base_url(BASE_URL)
}

/// A complete air-quality payload.
pub fn full_reading() -> Value {
    json!({
        "pm25": 12.3,
        "pm25_category": "Good",
        "o3": 0.04,
        "o3_category": "Moderate",
        "temperature": 72.5,
        "humidity": 40
    })
}

/// A two-point forecast payload.
pub fn two_day_forecast() -> Value {
    json!({
        "forecast": [
            {"ds": "2024-01-01", "yhat": 10},
            {"ds": "2024-01-02", "yhat": 12}
        ]
    })
}

/// Mock backend answering both endpoints with 200 and the given bodies.
pub fn mock_backend(air: Value, forecast: Value) -> MockHttpClient {
    let mock = MockHttpClient::new();
    mock.set_response(AIR_URL, MockResponse::json(air));
    mock.set_response(FORECAST_URL, MockResponse::json(forecast));
    mock
}

/// Start an app and feed it fetch results until both panels settle.
pub async fn settled_app(mock: &MockHttpClient, config: DashboardConfig) -> App {
    let mut app = App::with_http(config, Arc::new(mock.clone()));
    let mut rx = app.message_rx.take().expect("fresh app owns its receiver");
    app.start();

    while !app.is_settled() {
        let msg = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("fetch results arrive")
            .expect("channel stays open");
        app.handle_message(msg);
    }

    app.message_rx = Some(rx);
    app
}

/// Render the app's current view as plain text.
pub fn screen(app: &App, width: u16, height: u16) -> String {
    let status = StatusInfo {
        base_url: BASE_URL.to_string(),
        ..StatusInfo::default()
    };
    render_to_string(&app.view(), &status, width, height).expect("test backend draws")
}
