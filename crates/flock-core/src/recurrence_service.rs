//! Matching of yearly-recurring dates (birthdays, anniversaries) against calendar windows.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use flock_domain::PersonRecord;

use crate::{
    dates::parse_optional_date,
    time::{days_in_month, TimeWindow},
    AggregationWarning, DateField,
};

/// Month and day of a date that repeats every year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecurringDate {
    pub month: u32,
    pub day: u32,
}

impl RecurringDate {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    /// Concrete date in `year`. A day past the end of the month (Feb 29 in a
    /// common year) lands on the month's last day.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day).or_else(|| {
            let last = days_in_month(year, self.month);
            NaiveDate::from_ymd_opt(year, self.month, self.day.min(last))
        })
    }
}

/// Which calendar window a recurrence list is built for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecurrencePeriod {
    ThisWeek,
    ThisMonth,
}

/// Stateless checks over yearly-recurring dates.
pub struct RecurrenceService;

impl RecurrenceService {
    /// True when the recurring date falls in the month of `today`; year and day are ignored.
    pub fn matches_month(date: NaiveDate, today: NaiveDate) -> bool {
        date.month() == today.month()
    }

    /// True when an occurrence of the recurring date lies in the week of `today`.
    pub fn matches_week(date: NaiveDate, today: NaiveDate) -> bool {
        Self::occurrence_in(date, today.year(), &TimeWindow::week_of(today)).is_some()
    }

    /// Occurrence of `date` inside `window`, trying the year before, the year of and the
    /// year after `reference_year` so windows spanning New Year are covered.
    pub fn occurrence_in(
        date: NaiveDate,
        reference_year: i32,
        window: &TimeWindow,
    ) -> Option<NaiveDate> {
        let recurring = RecurringDate::from_date(date);
        [reference_year - 1, reference_year, reference_year + 1]
            .into_iter()
            .filter_map(|year| recurring.in_year(year))
            .find(|candidate| window.contains(*candidate))
    }

    pub fn matches(period: RecurrencePeriod, date: NaiveDate, today: NaiveDate) -> bool {
        match period {
            RecurrencePeriod::ThisWeek => Self::matches_week(date, today),
            RecurrencePeriod::ThisMonth => Self::matches_month(date, today),
        }
    }

    /// People whose `field` recurs within `period`, ordered by day of month (stable).
    ///
    /// Records without a date are skipped silently; unparsable dates are skipped and
    /// reported through `warnings`.
    pub fn select(
        people: &[PersonRecord],
        field: DateField,
        period: RecurrencePeriod,
        today: NaiveDate,
        warnings: &mut Vec<AggregationWarning>,
    ) -> Vec<PersonRecord> {
        let mut hits: Vec<(u32, &PersonRecord)> = Vec::new();
        for person in people {
            let raw = match field {
                DateField::BirthDate => person.birth_date.as_deref(),
                DateField::AnniversaryDate => person.anniversary_date.as_deref(),
                DateField::TransactionDate => None,
            };
            let date = match parse_optional_date(raw) {
                Ok(Some(date)) => date,
                Ok(None) => continue,
                Err(err) => {
                    debug!(person = %person.id, %field, "skipping unparsable date");
                    warnings.push(AggregationWarning::from_error(person.id, field, err));
                    continue;
                }
            };
            if Self::matches(period, date, today) {
                hits.push((date.day(), person));
            }
        }
        hits.sort_by_key(|(day, _)| *day);
        hits.into_iter().map(|(_, person)| person.clone()).collect()
    }
}
