//! Financial transaction records.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single financial movement as delivered by the data provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub amount: f64,
    /// Calendar date (`YYYY-MM-DD`); kept raw so malformed values can be reported.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor_name: Option<String>,
    /// Stable category identifier, never a display label.
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransactionRecord {
    pub fn new(
        amount: f64,
        date: impl Into<String>,
        category: impl Into<String>,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            date: date.into(),
            contributor_id: None,
            contributor_name: None,
            category: category.into(),
            kind,
            scope_id: None,
            description: None,
        }
    }

    pub fn income(amount: f64, date: impl Into<String>, category: impl Into<String>) -> Self {
        Self::new(amount, date, category, TransactionType::Income)
    }

    pub fn with_contributor(mut self, id: Uuid, name: Option<&str>) -> Self {
        self.contributor_id = Some(id);
        self.contributor_name = name.map(str::to_string);
        self
    }

    pub fn with_scope(mut self, scope_id: Uuid) -> Self {
        self.scope_id = Some(scope_id);
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_type_field() {
        let json = r#"{
            "id": "0b4f3f06-6f55-4a55-8c1d-0d6c1b6f2f11",
            "amount": 100.0,
            "date": "2024-01-05",
            "contributor_id": null,
            "category": "tithe",
            "type": "income"
        }"#;
        let txn: TransactionRecord = serde_json::from_str(json).expect("valid transaction");
        assert!(txn.is_income());
        assert_eq!(txn.contributor_id, None);
        assert_eq!(txn.category, "tithe");
    }
}
