use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Invalid date `{value}`: {reason}")]
    InvalidDate { value: String, reason: String },
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Record field a warning refers to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    BirthDate,
    AnniversaryDate,
    TransactionDate,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DateField::BirthDate => "birth_date",
            DateField::AnniversaryDate => "anniversary_date",
            DateField::TransactionDate => "date",
        };
        f.write_str(label)
    }
}

/// A record skipped because one of its fields could not be interpreted.
///
/// Warnings travel with the computed snapshot; one bad record never blanks the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregationWarning {
    pub record_id: Uuid,
    pub field: DateField,
    pub value: String,
    pub reason: String,
}

impl AggregationWarning {
    pub fn from_error(record_id: Uuid, field: DateField, err: CoreError) -> Self {
        match err {
            CoreError::InvalidDate { value, reason } => Self {
                record_id,
                field,
                value,
                reason,
            },
            other => Self {
                record_id,
                field,
                value: String::new(),
                reason: other.to_string(),
            },
        }
    }
}

impl fmt::Display for AggregationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record {} has unusable {} `{}`: {}",
            self.record_id, self.field, self.value, self.reason
        )
    }
}
