use chrono::NaiveDate;

use flock_domain::{AlertRecord, PersonRecord, TransactionRecord};

use crate::CoreError;

/// Source of the record sets the reports are computed from.
///
/// Implementations own every provider-side invariant: people are restricted to
/// active records of the configured scope, and transactions to the scope and to
/// dates on or after `since`. The aggregation services never perform I/O.
pub trait RecordProvider: Send + Sync {
    fn fetch_people(&self) -> Result<Vec<PersonRecord>, CoreError>;
    fn fetch_transactions(&self, since: NaiveDate) -> Result<Vec<TransactionRecord>, CoreError>;
    fn fetch_alerts(&self) -> Result<Vec<AlertRecord>, CoreError>;
}
