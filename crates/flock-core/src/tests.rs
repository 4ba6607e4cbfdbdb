use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::{
    filter::CategoryFilter,
    stats_service::StatsService,
    time::{MonthKey, DEFAULT_WINDOW_MONTHS},
};
use flock_domain::{PersonRecord, TransactionRecord, TransactionType};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(9, 45, 0)
        .unwrap()
}

fn names(people: &[PersonRecord]) -> Vec<&str> {
    people.iter().map(|person| person.name.as_str()).collect()
}

#[test]
fn birthdays_this_month_sorted_by_day() {
    let people = vec![
        PersonRecord::new("Twentieth").with_birth_date("1970-05-20"),
        PersonRecord::new("No date"),
        PersonRecord::new("Third").with_birth_date("2001-05-03"),
        PersonRecord::new("June").with_birth_date("2001-06-03"),
        PersonRecord::new("Also third").with_birth_date("1988-05-03"),
    ];
    let stats = StatsService::compute_dashboard_stats(&people, &[], at(2024, 5, 15));
    assert_eq!(
        names(&stats.birthdays_this_month),
        vec!["Third", "Also third", "Twentieth"]
    );
}

#[test]
fn wednesday_week_includes_saturday_not_sunday_after() {
    let people = vec![
        PersonRecord::new("Saturday").with_birth_date("1990-05-18"),
        PersonRecord::new("Next Sunday").with_birth_date("1990-05-19"),
        PersonRecord::new("Sunday").with_birth_date("1990-05-12"),
    ];
    let stats = StatsService::compute_dashboard_stats(&people, &[], at(2024, 5, 15));
    assert_eq!(stats.week.days(), 7);
    assert_eq!(names(&stats.birthdays_this_week), vec!["Sunday", "Saturday"]);
}

#[test]
fn new_year_week_catches_december_birthday() {
    let people = vec![PersonRecord::new("Eve").with_birth_date("1979-12-31")];
    let stats = StatsService::compute_dashboard_stats(&people, &[], at(2025, 1, 2));
    assert_eq!(stats.week.start, NaiveDate::from_ymd_opt(2024, 12, 29).unwrap());
    assert_eq!(names(&stats.birthdays_this_week), vec!["Eve"]);
    assert!(stats.birthdays_this_month.is_empty());
}

#[test]
fn anniversaries_follow_the_same_rules() {
    let people = vec![
        PersonRecord::new("Couple").with_anniversary_date("2010-05-16"),
        PersonRecord::new("Single"),
    ];
    let stats = StatsService::compute_dashboard_stats(&people, &[], at(2024, 5, 15));
    assert_eq!(names(&stats.anniversaries_this_month), vec!["Couple"]);
    assert_eq!(names(&stats.anniversaries_this_week), vec!["Couple"]);
    assert!(stats.birthdays_this_week.is_empty());
}

#[test]
fn null_birth_date_never_listed() {
    let person: PersonRecord = serde_json::from_str(
        r#"{"id":"3c1f1a0e-2d9b-4c7e-9a57-1f0f1d2c3b4a","name":"Null","birth_date":null}"#,
    )
    .unwrap();
    let stats = StatsService::compute_dashboard_stats(&[person], &[], at(2024, 1, 1));
    assert!(stats.birthdays_this_month.is_empty());
    assert!(stats.birthdays_this_week.is_empty());
    assert!(stats.warnings.is_empty());
}

#[test]
fn contributor_scenario_matches_expected_rollup() {
    let a = Uuid::new_v4();
    let txns = vec![
        TransactionRecord::income(100.0, "2024-01-05", "tithe").with_contributor(a, Some("A")),
        TransactionRecord::income(50.0, "2024-01-20", "tithe").with_contributor(a, Some("A")),
        TransactionRecord::income(200.0, "2024-02-01", "tithe").with_contributor(a, Some("A")),
    ];
    let report = StatsService::compute_contributor_summaries(
        &txns,
        at(2024, 2, 15),
        DEFAULT_WINDOW_MONTHS,
        &CategoryFilter::tithe(),
    );
    let summary = &report.summaries[0];
    assert_eq!(summary.contributor_name, "A");
    assert_eq!(summary.total_year, 350.0);
    assert_eq!(summary.months_paid, 2);
    let monthly: Vec<(String, f64)> = summary
        .monthly_data
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect();
    assert_eq!(
        monthly,
        vec![("2024-01".to_string(), 150.0), ("2024-02".to_string(), 200.0)]
    );
}

#[test]
fn months_always_span_the_requested_window() {
    for (now, length) in [(at(2024, 1, 31), 12u32), (at(2024, 2, 29), 3), (at(2023, 12, 1), 24)] {
        let report =
            StatsService::compute_contributor_summaries(&[], now, length, &CategoryFilter::tithe());
        assert_eq!(report.months.len(), length as usize);
        assert!(report.months.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(*report.months.last().unwrap(), MonthKey::of(now.date()));
        assert_eq!(report.monthly_series.len(), length as usize);
    }
}

#[test]
fn totals_equal_monthly_sums_and_months_paid_counts_buckets() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let txns = vec![
        TransactionRecord::income(12.5, "2024-03-01", "tithe").with_contributor(a, None),
        TransactionRecord::income(7.5, "2024-03-31", "tithe").with_contributor(a, None),
        TransactionRecord::income(40.0, "2024-04-10", "tithe").with_contributor(b, None),
        TransactionRecord::income(1.0, "2024-05-10", "tithe").with_contributor(a, None),
        TransactionRecord::new(99.0, "2024-05-10", "tithe", TransactionType::Expense)
            .with_contributor(b, None),
        TransactionRecord::income(99.0, "2024-05-10", "tithe"),
    ];
    let report = StatsService::compute_contributor_summaries(
        &txns,
        at(2024, 5, 20),
        DEFAULT_WINDOW_MONTHS,
        &CategoryFilter::tithe(),
    );
    assert_eq!(report.summaries.len(), 2);
    for summary in &report.summaries {
        let sum: f64 = summary.monthly_data.values().sum();
        assert_eq!(summary.total_year, sum);
        assert_eq!(summary.months_paid, summary.monthly_data.len());
    }
    assert_eq!(report.summaries[0].contributor_id, b);
    assert_eq!(report.grand_total(), 61.0);
}

#[test]
fn cent_amounts_keep_total_equal_to_monthly_sum() {
    let a = Uuid::new_v4();
    let txns: Vec<TransactionRecord> = [
        (0.1, "2024-01-03"),
        (0.2, "2024-02-03"),
        (0.3, "2024-01-20"),
        (0.7, "2024-03-03"),
        (0.6, "2024-02-25"),
    ]
    .into_iter()
    .map(|(amount, date)| {
        TransactionRecord::income(amount, date, "tithe").with_contributor(a, Some("A"))
    })
    .collect();
    let report = StatsService::compute_contributor_summaries(
        &txns,
        at(2024, 3, 31),
        DEFAULT_WINDOW_MONTHS,
        &CategoryFilter::tithe(),
    );
    let summary = &report.summaries[0];
    let sum: f64 = summary.monthly_data.values().sum();
    assert_eq!(summary.total_year, sum);
    assert_eq!(summary.months_paid, 3);
}

#[test]
fn recomputation_is_idempotent() {
    let a = Uuid::new_v4();
    let txns = vec![
        TransactionRecord::income(5.0, "2024-04-02", "tithe").with_contributor(a, None),
        TransactionRecord::income(5.0, "broken", "tithe").with_contributor(a, None),
    ];
    let run = || {
        StatsService::compute_contributor_summaries(
            &txns,
            at(2024, 5, 1),
            DEFAULT_WINDOW_MONTHS,
            &CategoryFilter::tithe(),
        )
    };
    let first = run();
    let second = run();
    assert_eq!(first, second);
    assert_eq!(first.warnings.len(), 1);
}
