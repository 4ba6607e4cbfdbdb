use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use uuid::Uuid;

use flock_core::{dates::parse_record_date, CoreError, RecordProvider};
use flock_domain::{AlertRecord, PersonRecord, TransactionRecord};

pub const PEOPLE_FILE: &str = "people.json";
pub const TRANSACTIONS_FILE: &str = "transactions.json";
pub const ALERTS_FILE: &str = "alerts.json";

/// Reads record snapshots exported as JSON arrays from a directory.
///
/// A missing file is an empty record set. Filtering by scope, activity and date
/// happens here so the aggregation services receive provider-ready data.
#[derive(Debug, Clone)]
pub struct JsonRecordProvider {
    data_dir: PathBuf,
    scope_id: Option<Uuid>,
}

impl JsonRecordProvider {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            scope_id: None,
        }
    }

    pub fn with_scope(mut self, scope_id: Option<Uuid>) -> Self {
        self.scope_id = scope_id;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn people_path(&self) -> PathBuf {
        self.data_dir.join(PEOPLE_FILE)
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.data_dir.join(TRANSACTIONS_FILE)
    }

    pub fn alerts_path(&self) -> PathBuf {
        self.data_dir.join(ALERTS_FILE)
    }

    fn in_scope(&self, scope: Option<Uuid>) -> bool {
        match self.scope_id {
            Some(wanted) => scope == Some(wanted),
            None => true,
        }
    }
}

impl RecordProvider for JsonRecordProvider {
    fn fetch_people(&self) -> Result<Vec<PersonRecord>, CoreError> {
        let people: Vec<PersonRecord> = load_records(&self.people_path())?;
        let total = people.len();
        let kept: Vec<PersonRecord> = people
            .into_iter()
            .filter(|person| person.active && self.in_scope(person.scope_id))
            .collect();
        debug!(total, kept = kept.len(), "people loaded");
        Ok(kept)
    }

    fn fetch_transactions(&self, since: NaiveDate) -> Result<Vec<TransactionRecord>, CoreError> {
        let transactions: Vec<TransactionRecord> = load_records(&self.transactions_path())?;
        let total = transactions.len();
        let kept: Vec<TransactionRecord> = transactions
            .into_iter()
            .filter(|txn| self.in_scope(txn.scope_id))
            // Unparsable dates are handed on so the report can flag them.
            .filter(|txn| parse_record_date(&txn.date).map_or(true, |date| date >= since))
            .collect();
        debug!(total, kept = kept.len(), %since, "transactions loaded");
        Ok(kept)
    }

    fn fetch_alerts(&self) -> Result<Vec<AlertRecord>, CoreError> {
        let alerts: Vec<AlertRecord> = load_records(&self.alerts_path())?;
        Ok(alerts.into_iter().filter(|alert| !alert.read).collect())
    }
}

/// Reads a JSON array of records; a missing file yields an empty list.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CoreError> {
    if !path.exists() {
        info!(path = %path.display(), "record file missing, treating as empty");
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data)
        .map_err(|err| CoreError::Serde(format!("{}: {}", path.display(), err)))
}
