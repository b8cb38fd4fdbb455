//! Data model for the dashboard's two endpoints.
//!
//! Decoding is permissive about individual fields (a missing or mistyped
//! field becomes `None`, a malformed forecast entry is skipped) but strict
//! about the overall shape of a payload.

pub mod air_quality;
pub mod forecast;
pub mod measurement;

pub use air_quality::AirQualityReading;
pub use forecast::{ForecastDecode, ForecastPoint, ForecastSeries};
pub use measurement::Measurement;
