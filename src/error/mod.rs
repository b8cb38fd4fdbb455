//! Error types for fetching and decoding dashboard data.
//!
//! Failures split into two families:
//!
//! | Family | Meaning | Examples |
//! |--------|---------|----------|
//! | Transport | No usable HTTP response | connection refused, HTTP 500 |
//! | Shape | A response arrived but its JSON is unusable | malformed body, backend `{"error": ...}` |
//!
//! Neither family is fatal: view-models turn them into `Failed` or
//! degraded-but-ready states.

mod fetch;

pub use fetch::{FetchError, FetchResult, ShapeError, TransportError};
pub(crate) use fetch::json_kind;
