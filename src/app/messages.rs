//! AppMessage enum for async communication within the application.

use crate::error::FetchResult;
use crate::models::{AirQualityReading, ForecastDecode};

/// Results delivered by spawned fetch tasks.
///
/// Each carries the generation of the load that produced it so the
/// receiving view-model can discard results from superseded loads.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Air-quality fetch finished
    AirQualityLoaded {
        generation: u64,
        result: FetchResult<AirQualityReading>,
    },
    /// Forecast fetch finished
    ForecastLoaded {
        generation: u64,
        result: FetchResult<ForecastDecode>,
    },
}
