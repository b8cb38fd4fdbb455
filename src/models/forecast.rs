//! PM2.5 forecast series (`GET /api/forecast/pm25`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::measurement::Measurement;
use crate::error::json_kind;

/// One predicted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Date label (`ds` on the wire)
    pub timestamp: String,
    /// Predicted PM2.5 (`yhat` on the wire)
    pub predicted: Measurement,
}

/// Wire shape of a single forecast entry.
#[derive(Deserialize)]
struct RawPoint {
    ds: String,
    yhat: serde_json::Number,
}

impl ForecastPoint {
    pub fn new(timestamp: impl Into<String>, predicted: Measurement) -> Self {
        Self {
            timestamp: timestamp.into(),
            predicted,
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        let raw: RawPoint = serde_json::from_value(value.clone()).ok()?;
        Some(Self {
            timestamp: raw.ds,
            predicted: Measurement::new(raw.yhat),
        })
    }
}

/// Ordered forecast points, in response order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

/// Outcome of decoding a forecast payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastDecode {
    /// `forecast` held a sequence (possibly empty).
    Series(ForecastSeries),
    /// `forecast` was absent or not a sequence. Not an error.
    NoData { reason: String },
}

impl ForecastSeries {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    /// Decode a response body.
    ///
    /// Entries lacking a string `ds` or numeric `yhat` are dropped; the
    /// remaining entries keep their order.
    pub fn from_json(value: &Value) -> ForecastDecode {
        let field = match value.get("forecast") {
            Some(field) => field,
            None => {
                let reason = match value.get("error").and_then(Value::as_str) {
                    Some(message) => format!("backend reported: {}", message),
                    None => "response has no `forecast` field".to_string(),
                };
                return ForecastDecode::NoData { reason };
            }
        };

        let Some(entries) = field.as_array() else {
            let reason = match field.get("error").and_then(Value::as_str) {
                Some(message) => format!("backend reported: {}", message),
                None => format!("`forecast` is {}, not an array", json_kind(field)),
            };
            return ForecastDecode::NoData { reason };
        };

        let mut points = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match ForecastPoint::from_json(entry) {
                Some(point) => points.push(point),
                None => tracing::warn!("Skipping malformed forecast entry #{}: {}", index, entry),
            }
        }

        ForecastDecode::Series(Self { points })
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ForecastPoint> {
        self.points.get(index)
    }

    /// Date labels in sequence order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.timestamp.as_str())
    }

    /// Smallest and largest predicted value, `None` when empty.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .map(|p| p.predicted.value())
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn series(decode: ForecastDecode) -> ForecastSeries {
        match decode {
            ForecastDecode::Series(series) => series,
            other => panic!("expected a series, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_keeps_response_order() {
        let decoded = series(ForecastSeries::from_json(&json!({
            "forecast": [
                {"ds": "2024-01-03", "yhat": 9},
                {"ds": "2024-01-01", "yhat": 10},
                {"ds": "2024-01-02", "yhat": 12}
            ]
        })));

        let labels: Vec<&str> = decoded.labels().collect();
        assert_eq!(labels, vec!["2024-01-03", "2024-01-01", "2024-01-02"]);
        assert_eq!(decoded.get(1).unwrap().predicted.to_string(), "10");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let decoded = series(ForecastSeries::from_json(&json!({
            "forecast": [
                {"ds": "2024-01-01", "yhat": 10},
                {"ds": "2024-01-01", "yhat": 10}
            ]
        })));
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn test_empty_sequence_is_a_series() {
        let decoded = series(ForecastSeries::from_json(&json!({"forecast": []})));
        assert!(decoded.is_empty());
        assert_eq!(decoded.value_range(), None);
    }

    #[test]
    fn test_missing_field_is_no_data() {
        assert!(matches!(
            ForecastSeries::from_json(&json!({})),
            ForecastDecode::NoData { .. }
        ));
    }

    #[test]
    fn test_non_array_field_is_no_data() {
        match ForecastSeries::from_json(&json!({"forecast": "soon"})) {
            ForecastDecode::NoData { reason } => assert!(reason.contains("a string")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_nested_backend_error_is_no_data() {
        match ForecastSeries::from_json(&json!({
            "forecast": {"error": "Not enough PM2.5 data for forecasting."}
        })) {
            ForecastDecode::NoData { reason } => {
                assert_eq!(reason, "backend reported: Not enough PM2.5 data for forecasting.")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_top_level_backend_error_is_no_data() {
        match ForecastSeries::from_json(&json!({"error": "Failed to generate PM2.5 forecast"})) {
            ForecastDecode::NoData { reason } => assert!(reason.contains("Failed to generate")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_malformed_entries_are_skipped_in_place() {
        let decoded = series(ForecastSeries::from_json(&json!({
            "forecast": [
                {"ds": "2024-01-01", "yhat": 10},
                {"ds": "2024-01-02"},
                "garbage",
                {"ds": "2024-01-04", "yhat": "high"},
                {"ds": "2024-01-05", "yhat": 7.25, "yhat_lower": 3.1}
            ]
        })));

        let labels: Vec<&str> = decoded.labels().collect();
        assert_eq!(labels, vec!["2024-01-01", "2024-01-05"]);
    }

    #[test]
    fn test_value_range() {
        let decoded = series(ForecastSeries::from_json(&json!({
            "forecast": [
                {"ds": "a", "yhat": 10},
                {"ds": "b", "yhat": 4.5},
                {"ds": "c", "yhat": 12}
            ]
        })));
        assert_eq!(decoded.value_range(), Some((4.5, 12.0)));
    }
}
