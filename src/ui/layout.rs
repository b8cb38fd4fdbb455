//! Screen layout.
//!
//! Kept separate from drawing so that mouse handling can find the chart
//! without a frame.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use super::view::{AirQualityView, DashboardView};

/// Minimum height of the forecast panel, borders included.
pub const MIN_FORECAST_HEIGHT: u16 = 6;

/// Areas of the four dashboard rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub title: Rect,
    pub air: Rect,
    pub forecast: Rect,
    pub footer: Rect,
}

impl DashboardLayout {
    /// Forecast panel area inside its border.
    pub fn forecast_inner(&self) -> Rect {
        Block::default().borders(Borders::ALL).inner(self.forecast)
    }
}

/// Height of the air-quality panel, borders included.
pub fn air_panel_height(air: &AirQualityView) -> u16 {
    let rows = air.lines.len() + usize::from(air.error.is_some());
    rows as u16 + 2
}

pub fn dashboard_layout(area: Rect, view: &DashboardView) -> DashboardLayout {
    let [title, air, forecast, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(air_panel_height(&view.air)),
        Constraint::Min(MIN_FORECAST_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(area);

    DashboardLayout {
        title,
        air,
        forecast,
        footer,
    }
}
