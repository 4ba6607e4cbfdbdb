//! flock-core
//!
//! Reporting and aggregation engine for the membership dashboard.
//! Depends on flock-domain. No terminal I/O, no storage access: callers hand in
//! already-fetched records and a reference `now`.

pub mod cache;
pub mod cohort_service;
pub mod dates;
pub mod error;
pub mod filter;
pub mod provider;
pub mod recurrence_service;
pub mod stats_service;
pub mod summary_service;
pub mod time;

pub use cache::*;
pub use cohort_service::*;
pub use error::{AggregationWarning, CoreError, DateField};
pub use filter::*;
pub use provider::RecordProvider;
pub use recurrence_service::*;
pub use stats_service::*;
pub use summary_service::*;
pub use time::*;

#[cfg(test)]
mod tests;
