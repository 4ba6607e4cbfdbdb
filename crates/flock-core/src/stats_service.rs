//! Composition of the windowing, recurrence, cohort and rollup services into the two
//! snapshots the dashboard displays.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use flock_domain::{AlertRecord, PersonRecord, TransactionRecord};

use crate::{
    cohort_service::{CohortService, CohortTally},
    dates::parse_record_date,
    filter::TransactionFilter,
    recurrence_service::{RecurrencePeriod, RecurrenceService},
    summary_service::{ContributorSummary, MonthlyPoint, SummaryService},
    time::{MonthKey, RollingWindow, TimeWindow},
    AggregationWarning, DateField,
};

/// Immutable snapshot behind the dashboard home page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub reference_date: NaiveDate,
    pub week: TimeWindow,
    pub month: TimeWindow,
    pub total_people: usize,
    pub tally: CohortTally,
    pub birthdays_this_month: Vec<PersonRecord>,
    pub birthdays_this_week: Vec<PersonRecord>,
    pub anniversaries_this_month: Vec<PersonRecord>,
    pub anniversaries_this_week: Vec<PersonRecord>,
    pub alerts: Vec<AlertRecord>,
    pub warnings: Vec<AggregationWarning>,
}

impl DashboardStats {
    /// Snapshot of an empty congregation, used when the provider could not deliver.
    pub fn empty(now: NaiveDateTime) -> Self {
        StatsService::compute_dashboard_stats(&[], &[], now)
    }
}

/// Contributor table plus the global monthly series for the rolling window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContributorReport {
    pub summaries: Vec<ContributorSummary>,
    pub monthly_series: Vec<MonthlyPoint>,
    pub months: Vec<MonthKey>,
    pub window: TimeWindow,
    pub warnings: Vec<AggregationWarning>,
}

impl ContributorReport {
    pub fn grand_total(&self) -> f64 {
        self.monthly_series.iter().map(|point| point.total).sum()
    }
}

pub struct StatsService;

impl StatsService {
    /// Counts, recurrence lists and pass-through alerts for the day of `now`.
    ///
    /// `people` is expected to be already restricted to active records of the
    /// intended scope. Time of day is ignored.
    pub fn compute_dashboard_stats(
        people: &[PersonRecord],
        alerts: &[AlertRecord],
        now: NaiveDateTime,
    ) -> DashboardStats {
        let today = now.date();
        let mut warnings = Vec::new();

        let mut select = |field: DateField, period: RecurrencePeriod| {
            RecurrenceService::select(people, field, period, today, &mut warnings)
        };
        let birthdays_this_month = select(DateField::BirthDate, RecurrencePeriod::ThisMonth);
        let birthdays_this_week = select(DateField::BirthDate, RecurrencePeriod::ThisWeek);
        let anniversaries_this_month =
            select(DateField::AnniversaryDate, RecurrencePeriod::ThisMonth);
        let anniversaries_this_week =
            select(DateField::AnniversaryDate, RecurrencePeriod::ThisWeek);

        let stats = DashboardStats {
            reference_date: today,
            week: TimeWindow::week_of(today),
            month: TimeWindow::month_of(today),
            total_people: people.len(),
            tally: CohortService::tally(people),
            birthdays_this_month,
            birthdays_this_week,
            anniversaries_this_month,
            anniversaries_this_week,
            alerts: alerts.to_vec(),
            warnings: dedup_warnings(warnings),
        };
        debug!(
            %today,
            people = stats.total_people,
            birthdays = stats.birthdays_this_month.len(),
            warnings = stats.warnings.len(),
            "dashboard stats computed"
        );
        stats
    }

    /// Per-contributor rollup over the `window_months` months ending with the month of
    /// `now`.
    ///
    /// Only transactions accepted by `filter` (income, attributed, qualifying category)
    /// and dated inside the window are aggregated, whatever the provider delivered.
    pub fn compute_contributor_summaries<F>(
        transactions: &[TransactionRecord],
        now: NaiveDateTime,
        window_months: u32,
        filter: &F,
    ) -> ContributorReport
    where
        F: TransactionFilter + ?Sized,
    {
        let window = RollingWindow::ending_at(now.date(), window_months);
        let mut outside = 0usize;
        let qualifying: Vec<TransactionRecord> = transactions
            .iter()
            .filter(|txn| filter.qualifies(txn))
            .filter(|txn| match parse_record_date(&txn.date) {
                Ok(date) if !window.contains(date) => {
                    outside += 1;
                    false
                }
                // Unparsable dates go through so the rollup can report them.
                _ => true,
            })
            .cloned()
            .collect();
        if outside > 0 {
            debug!(
                outside,
                start = %window.start,
                end = %window.end,
                "dropped transactions outside the window"
            );
        }

        let rollup = SummaryService::rollup(&qualifying, &window.months);
        ContributorReport {
            summaries: rollup.summaries,
            monthly_series: rollup.monthly_series,
            window: window.as_time_window(),
            months: window.months,
            warnings: rollup.warnings,
        }
    }
}

fn dedup_warnings(warnings: Vec<AggregationWarning>) -> Vec<AggregationWarning> {
    let mut seen: HashSet<(Uuid, DateField)> = HashSet::new();
    warnings
        .into_iter()
        .filter(|warning| seen.insert((warning.record_id, warning.field)))
        .collect()
}
