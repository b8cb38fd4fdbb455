//! View-models: one per dashboard panel.
//!
//! Each view-model exclusively owns a [`FetchState`] and the task fetching
//! it. Fetch results come back through the app's message channel tagged
//! with a generation number so that results from superseded requests are
//! discarded.

mod air_quality;
mod fetch_state;
mod forecast;
mod task;

pub use air_quality::AirQualityViewModel;
pub use fetch_state::FetchState;
pub use forecast::{ForecastSignal, ForecastViewModel, FORECAST_ERROR_MESSAGE};
pub use task::FetchTask;
