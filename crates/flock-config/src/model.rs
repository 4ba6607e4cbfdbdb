use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ConfigError;

/// Environment variable overriding the application home directory.
pub const HOME_ENV: &str = "FLOCK_HOME";
const DEFAULT_DIR_NAME: &str = ".flock";
const DATA_DIR: &str = "data";

/// Report settings shared by the CLI and any embedding dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportConfig {
    /// Category identifier whose income counts towards contributor summaries.
    #[serde(default = "ReportConfig::default_tithe_category")]
    pub tithe_category: String,
    /// Length of the rolling contributor window in months.
    #[serde(default = "ReportConfig::default_window_months")]
    pub window_months: u32,
    /// Restricts records to one branch or congregation when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_id: Option<Uuid>,
    /// Directory holding `people.json`, `transactions.json` and `alerts.json`.
    /// Defaults to `<home>/data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    #[serde(default = "ReportConfig::default_log_filter")]
    pub log_filter: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            tithe_category: Self::default_tithe_category(),
            window_months: Self::default_window_months(),
            scope_id: None,
            data_dir: None,
            log_filter: Self::default_log_filter(),
        }
    }
}

impl ReportConfig {
    pub fn default_tithe_category() -> String {
        "tithe".into()
    }

    pub fn default_window_months() -> u32 {
        12
    }

    pub fn default_log_filter() -> String {
        "flock_dashboard=info".into()
    }

    /// Application home: `$FLOCK_HOME`, else `~/.flock`.
    pub fn home_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => Self::home_dir().join(DATA_DIR),
        }
    }

    /// Applies a `key=value` style update coming from the command line.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidSetting {
            key: key.to_string(),
            message,
        };
        match key {
            "tithe_category" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(invalid("category must not be empty".into()));
                }
                self.tithe_category = value.to_string();
            }
            "window_months" => {
                let months: u32 = value
                    .trim()
                    .parse()
                    .map_err(|err| invalid(format!("{err}")))?;
                if months == 0 {
                    return Err(invalid("window must cover at least one month".into()));
                }
                self.window_months = months;
            }
            "scope_id" => {
                self.scope_id = match value.trim() {
                    "" | "none" => None,
                    raw => Some(Uuid::parse_str(raw).map_err(|err| invalid(err.to_string()))?),
                };
            }
            "data_dir" => {
                self.data_dir = match value.trim() {
                    "" => None,
                    raw => Some(PathBuf::from(raw)),
                };
            }
            "log_filter" => self.log_filter = value.trim().to_string(),
            _ => return Err(invalid("unknown setting".into())),
        }
        Ok(())
    }
}
