//! Memoization of computed snapshots keyed on input identity.
//!
//! Record sets are shared as `Arc<[T]>`; a lookup hits only when the caller hands
//! back the very same allocation for the same day. Any change of inputs produces a
//! new allocation upstream and therefore a full recomputation. The cache never
//! influences results, only how often they are computed.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::trace;

use flock_domain::{AlertRecord, PersonRecord, TransactionRecord};

use crate::{
    filter::CategoryFilter,
    stats_service::{ContributorReport, DashboardStats, StatsService},
};

struct DashboardEntry {
    people: Arc<[PersonRecord]>,
    alerts: Arc<[AlertRecord]>,
    today: NaiveDate,
    stats: Arc<DashboardStats>,
}

struct ContributorEntry {
    transactions: Arc<[TransactionRecord]>,
    today: NaiveDate,
    window_months: u32,
    filter: CategoryFilter,
    report: Arc<ContributorReport>,
}

/// Hit and miss counters, mostly useful in tests and debug logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Default)]
pub struct StatsCache {
    dashboard: Option<DashboardEntry>,
    contributors: Option<ContributorEntry>,
    stats: CacheStats,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drops every memoized snapshot.
    pub fn clear(&mut self) {
        self.dashboard = None;
        self.contributors = None;
    }

    pub fn dashboard_stats(
        &mut self,
        people: &Arc<[PersonRecord]>,
        alerts: &Arc<[AlertRecord]>,
        now: NaiveDateTime,
    ) -> Arc<DashboardStats> {
        let today = now.date();
        if let Some(entry) = &self.dashboard {
            if Arc::ptr_eq(&entry.people, people)
                && Arc::ptr_eq(&entry.alerts, alerts)
                && entry.today == today
            {
                self.stats.hits += 1;
                trace!("dashboard stats served from cache");
                return Arc::clone(&entry.stats);
            }
        }
        self.stats.misses += 1;
        let stats = Arc::new(StatsService::compute_dashboard_stats(people, alerts, now));
        self.dashboard = Some(DashboardEntry {
            people: Arc::clone(people),
            alerts: Arc::clone(alerts),
            today,
            stats: Arc::clone(&stats),
        });
        stats
    }

    pub fn contributor_report(
        &mut self,
        transactions: &Arc<[TransactionRecord]>,
        now: NaiveDateTime,
        window_months: u32,
        filter: &CategoryFilter,
    ) -> Arc<ContributorReport> {
        let today = now.date();
        if let Some(entry) = &self.contributors {
            if Arc::ptr_eq(&entry.transactions, transactions)
                && entry.today == today
                && entry.window_months == window_months
                && &entry.filter == filter
            {
                self.stats.hits += 1;
                trace!("contributor report served from cache");
                return Arc::clone(&entry.report);
            }
        }
        self.stats.misses += 1;
        let report = Arc::new(StatsService::compute_contributor_summaries(
            transactions,
            now,
            window_months,
            filter,
        ));
        self.contributors = Some(ContributorEntry {
            transactions: Arc::clone(transactions),
            today,
            window_months,
            filter: filter.clone(),
            report: Arc::clone(&report),
        });
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn same_inputs_hit_the_cache() {
        let people: Arc<[PersonRecord]> =
            vec![PersonRecord::new("Ana").with_birth_date("1990-05-20")].into();
        let alerts: Arc<[AlertRecord]> = Vec::new().into();
        let mut cache = StatsCache::new();

        let first = cache.dashboard_stats(&people, &alerts, noon(2024, 5, 15));
        let second = cache.dashboard_stats(&people, &alerts, noon(2024, 5, 15));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn new_allocation_or_new_day_recomputes() {
        let people: Arc<[PersonRecord]> = vec![PersonRecord::new("Ana")].into();
        let alerts: Arc<[AlertRecord]> = Vec::new().into();
        let mut cache = StatsCache::new();

        let first = cache.dashboard_stats(&people, &alerts, noon(2024, 5, 15));
        let copy: Arc<[PersonRecord]> = people.to_vec().into();
        let second = cache.dashboard_stats(&copy, &alerts, noon(2024, 5, 15));
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);

        cache.dashboard_stats(&copy, &alerts, noon(2024, 5, 16));
        assert_eq!(cache.stats().misses, 3);
    }

    #[test]
    fn contributor_report_keys_on_window_and_filter() {
        let a = Uuid::new_v4();
        let txns: Arc<[TransactionRecord]> = vec![
            TransactionRecord::income(10.0, "2024-05-01", "tithe").with_contributor(a, None),
        ]
        .into();
        let mut cache = StatsCache::new();
        let tithe = CategoryFilter::tithe();

        cache.contributor_report(&txns, noon(2024, 5, 15), 12, &tithe);
        cache.contributor_report(&txns, noon(2024, 5, 15), 12, &tithe);
        cache.contributor_report(&txns, noon(2024, 5, 15), 6, &tithe);
        let offerings = cache.contributor_report(
            &txns,
            noon(2024, 5, 15),
            6,
            &CategoryFilter::new("offering"),
        );
        assert!(offerings.summaries.is_empty());
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 3 });

        cache.clear();
        cache.contributor_report(&txns, noon(2024, 5, 15), 6, &tithe);
        assert_eq!(cache.stats().misses, 4);
    }
}
