//! Calendar period keys used as idempotency tokens and page directory names.
//!
//! Both keys are derived in UTC so that a job run near midnight in a local
//! timezone still lands on a single, stable key.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

use crate::ConfigError;

/// A UTC calendar day, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DailyKey(NaiveDate);

impl DailyKey {
    #[must_use]
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.date_naive())
    }

    #[must_use]
    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// The ISO week this day belongs to.
    #[must_use]
    pub fn week(self) -> WeekKey {
        let iso = self.0.iso_week();
        WeekKey {
            year: iso.year(),
            week: iso.week(),
        }
    }
}

impl fmt::Display for DailyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DailyKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 10 {
            return Err(ConfigError::InvalidPeriodKey(s.to_string()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ConfigError::InvalidPeriodKey(s.to_string()))
    }
}

/// An ISO-8601 week in UTC, rendered as `YYYY-Www`.
///
/// The year is the ISO week-numbering year, which differs from the calendar
/// year for the first and last few days of some years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey {
    year: i32,
    week: u32,
}

impl WeekKey {
    #[must_use]
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        let iso = at.date_naive().iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn week(self) -> u32 {
        self.week
    }

    /// Monday of this ISO week.
    #[must_use]
    pub fn monday(self) -> Option<NaiveDate> {
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

impl FromStr for WeekKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidPeriodKey(s.to_string());
        let (year, week) = s.split_once("-W").ok_or_else(invalid)?;
        if year.len() != 4 || week.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let week: u32 = week.parse().map_err(|_| invalid())?;
        NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).ok_or_else(invalid)?;
        Ok(Self { year, week })
    }
}
