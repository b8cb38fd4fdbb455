//! aqdash - a terminal dashboard for current air quality and the PM2.5
//! forecast served by the air-quality backend.
//!
//! This library exposes modules for use in integration tests and benches.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod client;
pub mod error;
pub mod models;
pub mod startup;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod view_model;
