//! Pure mapping from fetch state to what the dashboard shows.
//!
//! Nothing here touches the terminal. [`build_view`] is a function of the
//! two fetch states and the render options, so every string the user sees
//! can be tested without a backend.

use crate::models::{AirQualityReading, ForecastSeries, Measurement};
use crate::view_model::FetchState;

pub const LOADING: &str = "Loading...";
pub const UNAVAILABLE: &str = "Unavailable";
pub const LOADING_FORECAST: &str = "Loading forecast...";
pub const NO_FORECAST: &str = "No forecast data available";
pub const AIR_QUALITY_ERROR_PREFIX: &str = "Error fetching air quality data";

/// Number of y-axis ticks (including both bounds).
const Y_TICKS: usize = 5;
/// Show every x label up to this many points, else first/middle/last.
const MAX_X_LABELS: usize = 5;
/// Tick labels switch to scientific notation from this magnitude.
const LARGE_TICK: f64 = 1e9;

/// Caller-controlled rendering choices.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderOptions {
    /// Render a loaded-but-empty forecast as [`NO_FORECAST`] instead of
    /// [`LOADING_FORECAST`].
    pub distinguish_empty_forecast: bool,
    /// Forecast point under the tooltip
    pub selected_point: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub air: AirQualityView,
    pub forecast: ForecastView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirQualityView {
    /// PM2.5, ozone, temperature and humidity lines, in that order
    pub lines: Vec<String>,
    /// Shown below the lines when the fetch failed
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForecastView {
    /// Plain text in place of the chart
    Message(String),
    Chart(ChartView),
}

/// Everything needed to draw the forecast line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    /// `(index, yhat)` in sequence order
    pub points: Vec<(f64, f64)>,
    /// `ds` of every point, in sequence order
    pub labels: Vec<String>,
    pub x_bounds: [f64; 2],
    /// Labels spread evenly along the x axis
    pub x_ticks: Vec<String>,
    pub y_bounds: [f64; 2],
    /// Tick values from low to high, both bounds included
    pub y_ticks: Vec<f64>,
    /// Heights of the horizontal grid lines
    pub grid: Vec<f64>,
    pub tooltip: Option<Tooltip>,
}

/// Raw values of the selected point.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub index: usize,
    pub timestamp: String,
    pub value: String,
    pub x: f64,
    pub y: f64,
}

impl Tooltip {
    pub fn lines(&self) -> [String; 2] {
        [self.timestamp.clone(), format!("yhat: {}", self.value)]
    }
}

impl ChartView {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Formatted y tick labels, low to high.
    pub fn y_tick_labels(&self) -> Vec<String> {
        let step = if self.y_ticks.len() > 1 {
            self.y_ticks[1] - self.y_ticks[0]
        } else {
            1.0
        };
        let magnitude = self.y_ticks.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        if magnitude >= LARGE_TICK {
            return self.y_ticks.iter().map(|v| format!("{:.1e}", v)).collect();
        }
        let decimals = if step >= 1.0 { 0 } else if step >= 0.1 { 1 } else { 2 };
        self.y_ticks
            .iter()
            .map(|v| format!("{:.*}", decimals, v))
            .collect()
    }
}

/// Build the whole dashboard view.
pub fn build_view(
    air: &FetchState<AirQualityReading>,
    forecast: &FetchState<ForecastSeries>,
    options: &RenderOptions,
) -> DashboardView {
    DashboardView {
        air: air_quality_view(air),
        forecast: forecast_view(forecast, options),
    }
}

pub fn air_quality_view(state: &FetchState<AirQualityReading>) -> AirQualityView {
    let reading = state.ready();
    let value = |get: fn(&AirQualityReading) -> Option<&Measurement>| -> String {
        match state {
            FetchState::Loading => LOADING.to_string(),
            FetchState::Ready(_) => reading
                .and_then(get)
                .map(|m| m.to_string())
                .unwrap_or_else(|| UNAVAILABLE.to_string()),
            FetchState::Failed(_) => UNAVAILABLE.to_string(),
        }
    };
    let category = |get: fn(&AirQualityReading) -> Option<&String>| -> String {
        reading.and_then(get).cloned().unwrap_or_default()
    };

    let lines = vec![
        format!(
            "PM2.5: {} ({})",
            value(|r| r.pm25.as_ref()),
            category(|r| r.pm25_category.as_ref())
        ),
        format!(
            "Ozone (O₃): {} ({})",
            value(|r| r.o3.as_ref()),
            category(|r| r.o3_category.as_ref())
        ),
        format!("Temperature: {}°F", value(|r| r.temperature.as_ref())),
        format!("Humidity: {}%", value(|r| r.humidity.as_ref())),
    ];

    let error = state
        .failure()
        .map(|reason| format!("{}: {}", AIR_QUALITY_ERROR_PREFIX, reason));

    AirQualityView { lines, error }
}

pub fn forecast_view(state: &FetchState<ForecastSeries>, options: &RenderOptions) -> ForecastView {
    match state {
        FetchState::Loading => ForecastView::Message(LOADING_FORECAST.to_string()),
        FetchState::Failed(message) => ForecastView::Message(message.clone()),
        FetchState::Ready(series) if series.is_empty() => {
            if options.distinguish_empty_forecast {
                ForecastView::Message(NO_FORECAST.to_string())
            } else {
                ForecastView::Message(LOADING_FORECAST.to_string())
            }
        }
        FetchState::Ready(series) => ForecastView::Chart(chart_view(series, options.selected_point)),
    }
}

/// Chart geometry for a non-empty series.
pub fn chart_view(series: &ForecastSeries, selected: Option<usize>) -> ChartView {
    let points: Vec<(f64, f64)> = series
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.predicted.value()))
        .collect();
    let labels: Vec<String> = series.labels().map(String::from).collect();

    let (x_bounds, x_ticks) = x_axis(&labels);
    let y_bounds = y_bounds(series.value_range());
    let y_ticks = y_ticks(y_bounds);
    let grid = y_ticks[1..y_ticks.len() - 1].to_vec();

    let tooltip = selected.and_then(|index| {
        let point = series.get(index)?;
        Some(Tooltip {
            index,
            timestamp: point.timestamp.clone(),
            value: point.predicted.to_string(),
            x: points[index].0,
            y: points[index].1,
        })
    });

    ChartView {
        points,
        labels,
        x_bounds,
        x_ticks,
        y_bounds,
        y_ticks,
        grid,
        tooltip,
    }
}

fn x_axis(labels: &[String]) -> ([f64; 2], Vec<String>) {
    match labels.len() {
        0 => ([0.0, 1.0], Vec::new()),
        // Centre a lone point, with its label in the middle
        1 => ([-1.0, 1.0], vec![String::new(), labels[0].clone(), String::new()]),
        n if n <= MAX_X_LABELS => ([0.0, (n - 1) as f64], labels.to_vec()),
        n => {
            // An even count has no point at the exact middle; take the
            // nearest one to its left.
            let ticks = vec![
                labels[0].clone(),
                labels[(n - 1) / 2].clone(),
                labels[n - 1].clone(),
            ];
            ([0.0, (n - 1) as f64], ticks)
        }
    }
}

/// Pad around the data; never dip below zero for non-negative data.
fn y_bounds(range: Option<(f64, f64)>) -> [f64; 2] {
    let (lo, hi) = range.unwrap_or((0.0, 1.0));
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.1
    } else if hi.abs() > 0.0 {
        hi.abs() * 0.1
    } else {
        1.0
    };

    // Near f64::MAX the padding overflows; stop at the largest finite value
    let mut low = (lo - pad).max(f64::MIN);
    if lo >= 0.0 && low < 0.0 {
        low = 0.0;
    }
    [low, (hi + pad).min(f64::MAX)]
}

fn y_ticks(bounds: [f64; 2]) -> Vec<f64> {
    let [low, high] = bounds;
    let last = (Y_TICKS - 1) as f64;
    // Interpolate rather than step so a span wider than f64::MAX stays finite
    (0..Y_TICKS)
        .map(|i| {
            let t = i as f64 / last;
            low * (1.0 - t) + high * t
        })
        .collect()
}
