//! Selection of the transactions that count towards contributor summaries.

use flock_domain::{normalize_label, TransactionRecord};

/// Decides whether a transaction's category qualifies for the rollup.
pub trait TransactionFilter {
    fn accepts(&self, txn: &TransactionRecord) -> bool;

    /// Income-typed, attributed to a contributor and accepted by the category check.
    fn qualifies(&self, txn: &TransactionRecord) -> bool {
        txn.is_income() && txn.contributor_id.is_some() && self.accepts(txn)
    }
}

impl<F> TransactionFilter for F
where
    F: Fn(&TransactionRecord) -> bool,
{
    fn accepts(&self, txn: &TransactionRecord) -> bool {
        self(txn)
    }
}

/// Matches a category identifier, ignoring case and separator differences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    category: String,
}

impl CategoryFilter {
    pub fn new(category: impl AsRef<str>) -> Self {
        Self {
            category: normalize_label(category.as_ref()),
        }
    }

    pub fn tithe() -> Self {
        Self::new(TITHE_CATEGORY)
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl TransactionFilter for CategoryFilter {
    fn accepts(&self, txn: &TransactionRecord) -> bool {
        normalize_label(&txn.category) == self.category
    }
}

/// Default category identifier for tithes.
pub const TITHE_CATEGORY: &str = "tithe";
