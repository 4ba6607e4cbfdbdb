//! flock-config
//!
//! Persistent report settings: which category counts as tithe, how long the
//! contributor window is, where the record snapshots live and how verbose logs are.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::ReportConfig;
