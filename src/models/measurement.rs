use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A numeric reading exactly as the backend sent it.
///
/// Keeps the JSON number's original representation so `40` prints as `40`
/// and `72.5` as `72.5`, with no rounding or unit conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Measurement(serde_json::Number);

impl Measurement {
    /// Wrap a JSON number.
    pub fn new(number: serde_json::Number) -> Self {
        Self(number)
    }

    /// Build from an `f64`; `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        serde_json::Number::from_f64(value).map(Self)
    }

    /// Numeric value for plotting.
    pub fn value(&self) -> f64 {
        // Every JSON number has an f64 approximation unless arbitrary precision is on
        self.0.as_f64().unwrap_or(f64::NAN)
    }

    /// Interpret a JSON value as a measurement, if it is a number.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => Some(Self(n.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Measurement {
    fn from(value: i64) -> Self {
        Self(value.into())
    }
}

/// Deserialize an optional number, mapping anything else to `None`.
///
/// The backend sends `"Unavailable"` or `null` in place of numbers it
/// could not obtain.
pub(crate) fn lenient_measurement<'de, D>(deserializer: D) -> Result<Option<Measurement>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(Measurement::from_json(&value))
}

/// Deserialize an optional string, mapping anything else to `None`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}
