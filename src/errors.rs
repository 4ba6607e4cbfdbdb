use std::result::Result as StdResult;

use flock_config::ConfigError;
use flock_core::CoreError;
use thiserror::Error;

/// Unified error type for the dashboard facade and the CLI.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, DashboardError>;

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Storage(err.to_string())
    }
}

impl From<CoreError> for DashboardError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Provider(message) => DashboardError::Provider(message),
            CoreError::Io(err) => DashboardError::Storage(err.to_string()),
            CoreError::Serde(message) => DashboardError::Storage(message),
            err @ CoreError::InvalidDate { .. } => DashboardError::InvalidInput(err.to_string()),
            CoreError::Validation(message) => DashboardError::InvalidInput(message),
        }
    }
}

impl From<ConfigError> for DashboardError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => DashboardError::Storage(io.to_string()),
            ConfigError::Serde(message) => DashboardError::Config(message),
            err @ ConfigError::InvalidSetting { .. } => DashboardError::Config(err.to_string()),
        }
    }
}
