//! Clock abstraction and the calendar windows every report is anchored to.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Length of the contributor summary window when callers do not pick one.
pub const DEFAULT_WINDOW_MONTHS: u32 = 12;

/// Clock abstracts access to the current timestamp so reports remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current local wall-clock timestamp.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current local date. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the host clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    pub fn at_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::default()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Inclusive day range `[start, end]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if end < start {
            return Err(CoreError::Validation(
                "window end must not be before start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Sunday through Saturday of the week containing `today`.
    pub fn week_of(today: NaiveDate) -> Self {
        let offset = today.weekday().num_days_from_sunday() as i64;
        let start = today - Duration::days(offset);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// First through last day of the month containing `today`.
    pub fn month_of(today: NaiveDate) -> Self {
        let key = MonthKey::of(today);
        Self {
            start: key.first_day(),
            end: key.last_day(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// A calendar month, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MonthKey(NaiveDate);

impl MonthKey {
    /// Month of `date`, taken from the date's own calendar fields.
    pub fn of(date: NaiveDate) -> Self {
        Self(date - Duration::days(date.day0() as i64))
    }

    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.0
            .with_day(days_in_month(self.year(), self.month()))
            .unwrap_or(self.0)
    }

    /// Moves by `months` calendar months; saturates at the edges of the supported range.
    pub fn shift(&self, months: i32) -> Self {
        let step = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.0.checked_add_months(step)
        } else {
            self.0.checked_sub_months(step)
        };
        Self(shifted.unwrap_or(self.0))
    }

    /// Short human-readable label such as `Jan 2024`.
    pub fn label(&self) -> String {
        self.0.format("%b %Y").to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthKey {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CoreError::InvalidDate {
            value: raw.to_string(),
            reason: reason.to_string(),
        };
        let (year, month) = raw
            .trim()
            .split_once('-')
            .ok_or_else(|| invalid("expected YYYY-MM"))?;
        let year: i32 = year.parse().map_err(|_| invalid("invalid year"))?;
        let month: u32 = month.parse().map_err(|_| invalid("invalid month"))?;
        MonthKey::new(year, month).ok_or_else(|| invalid("month out of range"))
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for MonthKey {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Consecutive calendar months ending with the month of the reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingWindow {
    /// Oldest first; the last entry is the current month.
    pub months: Vec<MonthKey>,
    /// First day of the oldest month: the lower bound handed to the provider.
    pub start: NaiveDate,
    /// Last day of the current month.
    pub end: NaiveDate,
}

impl RollingWindow {
    /// Builds a window of `months` months; zero is treated as one.
    pub fn ending_at(today: NaiveDate, months: u32) -> Self {
        let length = months.max(1);
        let current = MonthKey::of(today);
        let keys: Vec<MonthKey> = (0..length)
            .rev()
            .map(|back| current.shift(-(back as i32)))
            .collect();
        let start = keys.first().map(MonthKey::first_day).unwrap_or(today);
        Self {
            months: keys,
            start,
            end: current.last_day(),
        }
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn as_time_window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start,
            end: self.end,
        }
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
        Some(first_next) => (first_next - Duration::days(1)).day(),
        None => 28,
    }
}
