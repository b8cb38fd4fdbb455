//! Terminal rendering for the dashboard.
//!
//! Rendering is split in two:
//! - [`view`] maps fetch state to plain data ([`DashboardView`]); pure and
//!   independent of ratatui.
//! - [`panels`] and [`chart`] draw a `DashboardView` into a frame.
//!
//! Screen layout, top to bottom: title bar, "Air Quality Data" panel,
//! "PM2.5 Forecast" panel, footer with key hints and update time.

pub mod chart;
pub mod layout;
mod panels;
mod theme;
pub mod view;

pub use layout::{dashboard_layout, DashboardLayout};
pub use theme::{COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_SERIES};
pub use view::{
    build_view, AirQualityView, ChartView, DashboardView, ForecastView, RenderOptions, Tooltip,
};

use std::time::Duration;

use chrono::{DateTime, Local};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

use crate::app::App;

/// Everything the title bar and footer show besides the view itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusInfo {
    pub base_url: String,
    pub last_updated: Option<DateTime<Local>>,
    /// A fetch is running
    pub in_flight: bool,
    pub refresh_interval: Option<Duration>,
}

/// Render the app's current state.
pub fn render(frame: &mut Frame, app: &App) {
    render_dashboard(frame, &app.view(), &app.status());
}

/// Render a prepared view.
pub fn render_dashboard(frame: &mut Frame, view: &DashboardView, status: &StatusInfo) {
    let layout = dashboard_layout(frame.area(), view);

    panels::render_title(frame, layout.title, status);
    panels::render_air_quality(frame, layout.air, &view.air);
    panels::render_forecast(frame, layout.forecast, &view.forecast);
    panels::render_footer(frame, layout.footer, status);
}

/// Draw one frame off-screen and return it as text, one line per row with
/// trailing spaces removed.
pub fn render_to_string(
    view: &DashboardView,
    status: &StatusInfo,
    width: u16,
    height: u16,
) -> std::io::Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).map_err(io_error)?;
    terminal
        .draw(|frame| render_dashboard(frame, view, status))
        .map_err(io_error)?;
    Ok(buffer_to_string(terminal.backend().buffer()))
}

fn io_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

/// Plain-text contents of a buffer.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AirQualityReading, ForecastSeries};
    use crate::view_model::FetchState;

    fn screen(
        air: FetchState<AirQualityReading>,
        forecast: FetchState<ForecastSeries>,
        options: RenderOptions,
    ) -> String {
        let view = build_view(&air, &forecast, &options);
        let status = StatusInfo {
            base_url: "http://127.0.0.1:8000".to_string(),
            ..Default::default()
        };
        render_to_string(&view, &status, 80, 24).unwrap()
    }

    #[test]
    fn test_loading_screen() {
        let text = screen(FetchState::Loading, FetchState::Loading, RenderOptions::default());
        assert!(text.lines().next().unwrap().contains(panels::APP_TITLE));
        assert!(text.contains("Air Quality Data"));
        assert!(text.contains("PM2.5 Forecast"));
        assert!(text.contains("PM2.5: Loading... ()"));
        assert!(text.contains("Loading forecast..."));
        assert!(text.contains("q quit"));
    }

    #[test]
    fn test_failed_screen() {
        let text = screen(
            FetchState::Failed("HTTP 500: Internal Server Error".into()),
            FetchState::Failed("Error fetching forecast data".into()),
            RenderOptions::default(),
        );
        assert!(text.contains("Error fetching air quality data: HTTP 500"));
        assert!(text.contains("Error fetching forecast data"));
    }

    #[test]
    fn test_buffer_to_string_trims_rows() {
        let buffer = Buffer::with_lines(["ab  ", "    "]);
        assert_eq!(buffer_to_string(&buffer), "ab\n\n");
    }
}
