//! Current air-quality reading (`GET /api/airquality`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::measurement::{lenient_measurement, lenient_string, Measurement};
use crate::error::{json_kind, ShapeError};

/// Snapshot of the most recent air-quality fetch.
///
/// Every field is optional: the backend omits or nulls values it could not
/// obtain, and that is not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReading {
    /// PM2.5 index
    #[serde(default, deserialize_with = "lenient_measurement")]
    pub pm25: Option<Measurement>,
    /// PM2.5 category label, e.g. "Good"
    #[serde(default, deserialize_with = "lenient_string")]
    pub pm25_category: Option<String>,
    /// Ozone index
    #[serde(default, deserialize_with = "lenient_measurement")]
    pub o3: Option<Measurement>,
    /// Ozone category label
    #[serde(default, deserialize_with = "lenient_string")]
    pub o3_category: Option<String>,
    /// Temperature in °F
    #[serde(default, deserialize_with = "lenient_measurement")]
    pub temperature: Option<Measurement>,
    /// Relative humidity in percent
    #[serde(default, deserialize_with = "lenient_measurement")]
    pub humidity: Option<Measurement>,
}

impl AirQualityReading {
    /// Validate and decode a response body.
    ///
    /// The payload must be an object. An object carrying a string `error`
    /// field is the backend reporting its own failure and is rejected;
    /// otherwise fields are read permissively.
    pub fn from_json(value: &Value) -> Result<Self, ShapeError> {
        let object = value.as_object().ok_or_else(|| ShapeError::NotAnObject {
            found: json_kind(value).to_string(),
        })?;

        if let Some(message) = object.get("error").and_then(Value::as_str) {
            return Err(ShapeError::BackendReported {
                message: message.to_string(),
            });
        }

        // `{"message": "No data available. ..."}` carries no readings; every
        // field decodes as missing
        if let Some(message) = object.get("message").and_then(Value::as_str) {
            tracing::warn!("Air quality backend says: {}", message);
        }

        serde_json::from_value(value.clone()).map_err(|e| ShapeError::MalformedJson {
            message: e.to_string(),
        })
    }

    /// Names of the fields the backend did not provide.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.pm25.is_none() {
            missing.push("pm25");
        }
        if self.pm25_category.is_none() {
            missing.push("pm25_category");
        }
        if self.o3.is_none() {
            missing.push("o3");
        }
        if self.o3_category.is_none() {
            missing.push("o3_category");
        }
        if self.temperature.is_none() {
            missing.push("temperature");
        }
        if self.humidity.is_none() {
            missing.push("humidity");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_reading() {
        let reading = AirQualityReading::from_json(&json!({
            "pm25": 12.3,
            "pm25_category": "Good",
            "o3": 0.04,
            "o3_category": "Moderate",
            "temperature": 72.5,
            "humidity": 40
        }))
        .unwrap();

        assert_eq!(reading.pm25.as_ref().unwrap().to_string(), "12.3");
        assert_eq!(reading.pm25_category.as_deref(), Some("Good"));
        assert_eq!(reading.o3.as_ref().unwrap().to_string(), "0.04");
        assert_eq!(reading.o3_category.as_deref(), Some("Moderate"));
        assert_eq!(reading.temperature.as_ref().unwrap().to_string(), "72.5");
        assert_eq!(reading.humidity.as_ref().unwrap().to_string(), "40");
        assert!(reading.missing_fields().is_empty());
    }

    #[test]
    fn test_missing_fields_are_none() {
        let reading = AirQualityReading::from_json(&json!({"pm25": 8})).unwrap();
        assert!(reading.pm25.is_some());
        assert_eq!(
            reading.missing_fields(),
            vec!["pm25_category", "o3", "o3_category", "temperature", "humidity"]
        );
    }

    #[test]
    fn test_empty_object_is_all_missing() {
        let reading = AirQualityReading::from_json(&json!({})).unwrap();
        assert_eq!(reading, AirQualityReading::default());
        assert_eq!(reading.missing_fields().len(), 6);
    }

    #[test]
    fn test_backend_placeholders_decode_as_missing() {
        // What the backend sends when AirNow/NOAA data is unavailable
        let reading = AirQualityReading::from_json(&json!({
            "pm25": null,
            "pm25_category": "Unavailable",
            "o3": null,
            "o3_category": "Unavailable",
            "temperature": "Unavailable",
            "humidity": "Unavailable"
        }))
        .unwrap();

        assert!(reading.pm25.is_none());
        assert_eq!(reading.pm25_category.as_deref(), Some("Unavailable"));
        assert!(reading.temperature.is_none());
        assert!(reading.humidity.is_none());
    }

    #[test]
    fn test_no_data_message_is_an_empty_reading() {
        let reading = AirQualityReading::from_json(&json!({
            "message": "No data available. Try again later."
        }))
        .unwrap();
        assert_eq!(reading, AirQualityReading::default());
        assert_eq!(reading.missing_fields().len(), 6);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let reading =
            AirQualityReading::from_json(&json!({"pm25": 5, "station": "Downtown"})).unwrap();
        assert_eq!(reading.pm25, Some(Measurement::from(5)));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = AirQualityReading::from_json(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            err,
            ShapeError::NotAnObject {
                found: "an array".to_string()
            }
        );
    }

    #[test]
    fn test_backend_error_object_is_rejected() {
        let err = AirQualityReading::from_json(&json!({
            "error": "Failed to fetch air quality data"
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch air quality data");
    }
}
