//! Trait abstractions for dependency injection and testability.
//!
//! The dashboard talks to its backend through [`HttpClient`], so the
//! view-models can be driven by the production reqwest adapter or by the
//! in-memory mock in tests.

pub mod http;

pub use http::{Headers, HttpClient, HttpError, Response};
