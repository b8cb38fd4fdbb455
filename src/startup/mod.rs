//! Startup: configuration layering and logging setup.
//!
//! - [`config`] - [`DashboardConfig`] from defaults, environment and flags
//! - [`logging`] - file-backed `tracing` subscriber
//!
//! # Usage
//!
//! ```ignore
//! use aqdash::startup::{init_logging, DashboardConfig};
//!
//! let config = DashboardConfig::from_env()?.apply_overrides(&overrides)?;
//! let _ = init_logging(&config.log_file);
//! ```

pub mod config;
pub mod logging;

pub use config::{ConfigError, DashboardConfig};
pub use logging::init_logging;
