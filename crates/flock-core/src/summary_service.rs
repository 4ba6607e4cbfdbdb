//! Per-contributor and per-month rollups of qualifying transactions.

use std::{
    cmp::Ordering,
    collections::{btree_map::Entry, BTreeMap, HashMap},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use flock_domain::TransactionRecord;

use crate::{dates::parse_record_date, time::MonthKey, AggregationWarning, DateField};

/// Contributions of one person across the rolling window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContributorSummary {
    pub contributor_id: Uuid,
    pub contributor_name: String,
    pub total_year: f64,
    /// Distinct months with at least one transaction.
    pub months_paid: usize,
    pub monthly_data: BTreeMap<MonthKey, f64>,
}

impl ContributorSummary {
    fn new(contributor_id: Uuid, contributor_name: Option<&str>) -> Self {
        Self {
            contributor_id,
            contributor_name: display_name(contributor_id, contributor_name),
            total_year: 0.0,
            months_paid: 0,
            monthly_data: BTreeMap::new(),
        }
    }

    pub fn paid_in(&self, month: &MonthKey) -> bool {
        self.monthly_data.contains_key(month)
    }
}

/// Total of all qualifying transactions in one month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyPoint {
    pub month: MonthKey,
    pub label: String,
    pub total: f64,
}

/// Output of [`SummaryService::rollup`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Rollup {
    pub summaries: Vec<ContributorSummary>,
    pub monthly_series: Vec<MonthlyPoint>,
    pub warnings: Vec<AggregationWarning>,
}

pub struct SummaryService;

impl SummaryService {
    /// Groups transactions by contributor and by month.
    ///
    /// The input is expected to be pre-filtered to qualifying rows; the month of each
    /// row is taken from its own date, whatever window it belongs to. The global series
    /// has one entry per key in `months`, zero when nothing was given that month.
    pub fn rollup(transactions: &[TransactionRecord], months: &[MonthKey]) -> Rollup {
        let mut warnings = Vec::new();
        let mut summaries: Vec<ContributorSummary> = Vec::new();
        let mut index: HashMap<Uuid, usize> = HashMap::new();
        let mut month_totals: HashMap<MonthKey, f64> = HashMap::new();

        for txn in transactions {
            let Some(contributor) = txn.contributor_id else {
                debug!(transaction = %txn.id, "skipping unattributed transaction");
                continue;
            };
            let month = match parse_record_date(&txn.date) {
                Ok(date) => MonthKey::of(date),
                Err(err) => {
                    warn!(
                        transaction = %txn.id,
                        value = %txn.date,
                        "skipping transaction with unparsable date"
                    );
                    warnings.push(AggregationWarning::from_error(
                        txn.id,
                        DateField::TransactionDate,
                        err,
                    ));
                    continue;
                }
            };

            let slot = *index.entry(contributor).or_insert_with(|| {
                summaries.push(ContributorSummary::new(
                    contributor,
                    txn.contributor_name.as_deref(),
                ));
                summaries.len() - 1
            });
            let summary = &mut summaries[slot];
            let unnamed = summary.contributor_name == contributor.to_string();
            if unnamed && txn.contributor_name.is_some() {
                summary.contributor_name =
                    display_name(contributor, txn.contributor_name.as_deref());
            }
            accumulate(summary, month, txn.amount);
            *month_totals.entry(month).or_insert(0.0) += txn.amount;
        }

        for summary in &mut summaries {
            summary.total_year = summary.monthly_data.values().sum();
        }
        summaries.sort_by(|a, b| {
            b.total_year
                .partial_cmp(&a.total_year)
                .unwrap_or(Ordering::Equal)
        });

        let monthly_series = months
            .iter()
            .map(|month| MonthlyPoint {
                month: *month,
                label: month.label(),
                total: month_totals.get(month).copied().unwrap_or(0.0),
            })
            .collect();

        Rollup {
            summaries,
            monthly_series,
            warnings,
        }
    }
}

/// The first transaction of a month opens that month's bucket at zero and counts the
/// month as paid; later ones in the same month only add to the bucket. `total_year`
/// is summed from the buckets once every transaction is in.
fn accumulate(summary: &mut ContributorSummary, month: MonthKey, amount: f64) {
    match summary.monthly_data.entry(month) {
        Entry::Vacant(slot) => {
            summary.months_paid += 1;
            *slot.insert(0.0) += amount;
        }
        Entry::Occupied(mut slot) => *slot.get_mut() += amount,
    }
}

fn display_name(id: Uuid, name: Option<&str>) -> String {
    name.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| id.to_string())
}
