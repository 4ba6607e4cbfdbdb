#![doc(test(attr(deny(warnings))))]

//! Flock Dashboard wires the membership reporting engine to a record provider,
//! a clock and persisted report settings, and ships the `flock_report` CLI.

pub mod dashboard;
pub mod errors;
pub mod utils;

pub use dashboard::{Dashboard, Snapshot};
pub use errors::{DashboardError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup info log.
pub fn init() {
    init_with_filter(&flock_config::ReportConfig::default_log_filter());
}

/// Initializes global tracing; `RUST_LOG` still takes precedence over `directive`.
pub fn init_with_filter(directive: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(directive);
        let build = utils::build_info::current();
        tracing::info!(version = %build.long_version(), "Flock Dashboard tracing initialized.");
    });
}
