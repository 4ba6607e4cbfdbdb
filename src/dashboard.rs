//! Facade binding a [`RecordProvider`], a [`Clock`] and the report settings to the
//! aggregation services.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use flock_config::ReportConfig;
use flock_core::{
    CategoryFilter, Clock, ContributorReport, CoreError, DashboardStats, RecordProvider,
    RollingWindow, StatsCache, SystemClock,
};
use flock_domain::{AlertRecord, PersonRecord, TransactionRecord};

/// A computed report plus the provider failures it was computed around.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub report: Arc<T>,
    /// One message per record source that could not be fetched; those sources were
    /// treated as empty.
    pub provider_errors: Vec<String>,
}

impl<T> Snapshot<T> {
    pub fn is_degraded(&self) -> bool {
        !self.provider_errors.is_empty()
    }
}

struct RecordSets {
    loaded_for: Option<NaiveDate>,
    people: Arc<[PersonRecord]>,
    alerts: Arc<[AlertRecord]>,
    transactions: Arc<[TransactionRecord]>,
    people_errors: Vec<String>,
    transaction_errors: Vec<String>,
}

impl Default for RecordSets {
    fn default() -> Self {
        Self {
            loaded_for: None,
            people: Vec::new().into(),
            alerts: Vec::new().into(),
            transactions: Vec::new().into(),
            people_errors: Vec::new(),
            transaction_errors: Vec::new(),
        }
    }
}

pub struct Dashboard<P, C = SystemClock> {
    provider: P,
    clock: C,
    config: ReportConfig,
    filter: CategoryFilter,
    cache: StatsCache,
    records: RecordSets,
}

impl<P: RecordProvider> Dashboard<P, SystemClock> {
    pub fn new(provider: P, config: ReportConfig) -> Self {
        Self::with_clock(provider, config, SystemClock)
    }
}

impl<P: RecordProvider, C: Clock> Dashboard<P, C> {
    pub fn with_clock(provider: P, config: ReportConfig, clock: C) -> Self {
        let filter = CategoryFilter::new(&config.tithe_category);
        Self {
            provider,
            clock,
            config,
            filter,
            cache: StatsCache::new(),
            records: RecordSets::default(),
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn cache(&self) -> &StatsCache {
        &self.cache
    }

    /// Re-fetches every record set. A failing source is logged and replaced by an
    /// empty set so the rest of the dashboard still renders.
    pub fn refresh(&mut self) {
        let today = self.clock.today();
        let window = RollingWindow::ending_at(today, self.config.window_months);
        let mut people_errors = Vec::new();
        let mut transaction_errors = Vec::new();

        let people = fetch_or_empty("people", self.provider.fetch_people(), &mut people_errors);
        let alerts = fetch_or_empty("alerts", self.provider.fetch_alerts(), &mut people_errors);
        let transactions = fetch_or_empty(
            "transactions",
            self.provider.fetch_transactions(window.start),
            &mut transaction_errors,
        );
        info!(
            %today,
            people = people.len(),
            alerts = alerts.len(),
            transactions = transactions.len(),
            "records refreshed"
        );

        self.records = RecordSets {
            loaded_for: Some(today),
            people: people.into(),
            alerts: alerts.into(),
            transactions: transactions.into(),
            people_errors,
            transaction_errors,
        };
    }

    /// Birthday, anniversary and cohort statistics for the clock's current day.
    pub fn stats(&mut self) -> Snapshot<DashboardStats> {
        let now = self.clock.now();
        self.ensure_loaded(now.date());
        let report = self
            .cache
            .dashboard_stats(&self.records.people, &self.records.alerts, now);
        Snapshot {
            report,
            provider_errors: self.records.people_errors.clone(),
        }
    }

    /// Contributor table for the configured rolling window.
    pub fn contributors(&mut self) -> Snapshot<ContributorReport> {
        let now = self.clock.now();
        self.ensure_loaded(now.date());
        let report = self.cache.contributor_report(
            &self.records.transactions,
            now,
            self.config.window_months,
            &self.filter,
        );
        Snapshot {
            report,
            provider_errors: self.records.transaction_errors.clone(),
        }
    }

    fn ensure_loaded(&mut self, today: NaiveDate) {
        if self.records.loaded_for != Some(today) {
            self.refresh();
        }
    }
}

fn fetch_or_empty<T>(
    source: &str,
    result: Result<Vec<T>, CoreError>,
    errors: &mut Vec<String>,
) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(err) => {
            warn!(source, error = %err, "record fetch failed; continuing with an empty set");
            errors.push(format!("{source}: {err}"));
            Vec::new()
        }
    }
}
