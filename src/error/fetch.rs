//! Fetch and decode errors.

use thiserror::Error;

use crate::traits::HttpError;

/// Result alias used by the HTTP client and decoders.
pub type FetchResult<T> = Result<T, FetchError>;

/// Any failure while fetching one endpoint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The request did not produce a successful response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be used.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Network unreachable or a non-2xx status.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// Server answered with a non-success status.
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    /// No response was received.
    #[error("Network error: {message}")]
    Network { message: String },
}

/// The body decoded (or failed to) into something other than what we expect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// Body was not valid JSON.
    #[error("Malformed JSON: {message}")]
    MalformedJson { message: String },

    /// Body was JSON but not an object.
    #[error("Expected a JSON object, got {found}")]
    NotAnObject { found: String },

    /// Backend answered 200 with an `{"error": "..."}` object.
    #[error("{message}")]
    BackendReported { message: String },
}

impl FetchError {
    /// Human-readable reason, suitable for a `Failed` state.
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// True for transport failures (network, HTTP status).
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Short code for log lines.
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::Transport(TransportError::Status { .. }) => "E_FETCH_STATUS",
            FetchError::Transport(TransportError::Network { .. }) => "E_FETCH_NETWORK",
            FetchError::Shape(ShapeError::MalformedJson { .. }) => "E_SHAPE_JSON",
            FetchError::Shape(ShapeError::NotAnObject { .. }) => "E_SHAPE_OBJECT",
            FetchError::Shape(ShapeError::BackendReported { .. }) => "E_SHAPE_BACKEND",
        }
    }
}

impl TransportError {
    /// Build a status error, using the canonical reason phrase when known.
    pub fn from_status(status: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unexpected status")
            .to_string();
        TransportError::Status { status, reason }
    }
}

impl From<HttpError> for TransportError {
    fn from(err: HttpError) -> Self {
        TransportError::Network {
            message: err.to_string(),
        }
    }
}

impl From<HttpError> for FetchError {
    fn from(err: HttpError) -> Self {
        FetchError::Transport(err.into())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Shape(ShapeError::MalformedJson {
            message: err.to_string(),
        })
    }
}

/// Name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
