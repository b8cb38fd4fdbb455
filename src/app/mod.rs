//! Application state for the dashboard.
//!
//! [`App`] owns both view-models and the channel their fetch tasks report
//! back on. The event loop in `main.rs` feeds it messages, key and mouse
//! events; [`crate::ui::render`] draws it.

mod handlers;
mod messages;

pub use messages::AppMessage;

use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::mpsc;

use crate::adapters::ReqwestHttpClient;
use crate::client::DashboardClient;
use crate::startup::DashboardConfig;
use crate::traits::HttpClient;
use crate::ui::{build_view, DashboardView, RenderOptions, StatusInfo};
use crate::view_model::{AirQualityViewModel, ForecastViewModel};

/// Main application state.
pub struct App {
    pub config: DashboardConfig,
    pub air: AirQualityViewModel,
    pub forecast: ForecastViewModel,
    /// Sender cloned into every fetch task
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    pub should_quit: bool,
    /// Set whenever visible state changes
    pub needs_redraw: bool,
    /// Forecast point under the tooltip
    pub selected_point: Option<usize>,
    /// When the last result was applied
    pub last_updated: Option<DateTime<Local>>,
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub tick_count: u64,
}

impl App {
    /// Build an app on top of any transport.
    pub fn with_http(config: DashboardConfig, http: Arc<dyn HttpClient>) -> Self {
        let client = DashboardClient::with_base_url(config.base_url.clone(), http);
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        Self {
            air: AirQualityViewModel::new(client.clone()),
            forecast: ForecastViewModel::new(client),
            config,
            message_tx,
            message_rx: Some(message_rx),
            should_quit: false,
            needs_redraw: true,
            selected_point: None,
            last_updated: None,
            terminal_width: 80,
            terminal_height: 24,
            tick_count: 0,
        }
    }

    /// Build an app talking to the configured backend over HTTP.
    pub fn new(config: DashboardConfig) -> Self {
        let http = match config.request_timeout {
            Some(timeout) => ReqwestHttpClient::with_timeout(timeout),
            None => ReqwestHttpClient::new(),
        };
        Self::with_http(config, Arc::new(http))
    }

    /// Issue the initial fetches. Must run inside a tokio runtime.
    pub fn start(&mut self) {
        tracing::info!("Starting dashboard against {}", self.config.base_url);
        self.air.load(&self.message_tx);
        self.forecast.load(&self.message_tx);
        self.mark_dirty();
    }

    /// Reload both panels, abandoning any fetch still in flight.
    pub fn refresh(&mut self) {
        tracing::debug!("Refreshing both panels");
        self.air.reload(&self.message_tx);
        self.forecast.reload(&self.message_tx);
        self.mark_dirty();
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    pub fn update_terminal_dimensions(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
        self.mark_dirty();
    }

    /// Both panels have left `Loading`.
    pub fn is_settled(&self) -> bool {
        self.air.state().is_settled() && self.forecast.state().is_settled()
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            distinguish_empty_forecast: self.config.distinguish_empty_forecast,
            selected_point: self.selected_point,
        }
    }

    pub fn view(&self) -> DashboardView {
        build_view(self.air.state(), self.forecast.state(), &self.render_options())
    }

    pub fn status(&self) -> StatusInfo {
        StatusInfo {
            base_url: self.config.base_url.clone(),
            last_updated: self.last_updated,
            in_flight: self.air.is_in_flight() || self.forecast.is_in_flight(),
            refresh_interval: self.config.refresh_interval,
        }
    }

    /// Number of points in the loaded forecast (0 when not ready).
    pub fn forecast_len(&self) -> usize {
        self.forecast.state().ready().map_or(0, |series| series.len())
    }
}
