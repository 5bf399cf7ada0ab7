//! Calendar months used as the unit of budgeting and reporting.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Month};

use crate::Error;

/// A calendar month in a specific year, written as `YYYY-MM`.
///
/// Months order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BudgetMonth {
    year: i32,
    month: u8,
}

impl BudgetMonth {
    /// The month that `date` falls in.
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month() as u8,
        }
    }

    /// The year of the month.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month of the year.
    pub fn month(&self) -> Month {
        // `month` is validated to be in 1..=12 on construction.
        Month::try_from(self.month).unwrap_or(Month::January)
    }

    /// The first day of the month.
    pub fn first_day(&self) -> Date {
        Date::from_calendar_date(self.year, self.month(), 1).unwrap_or(Date::MIN)
    }

    /// The last day of the month.
    pub fn last_day(&self) -> Date {
        self.next()
            .first_day()
            .previous_day()
            .unwrap_or(Date::MAX)
    }

    /// The month after this one.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Whether `date` falls within this month.
    pub fn contains(&self, date: Date) -> bool {
        Self::from_date(date) == *self
    }
}

impl FromStr for BudgetMonth {
    type Err = Error;

    /// Parse a month from the format `YYYY-MM`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidMonth] if `s` is not exactly four digits, a
    /// hyphen and two digits, or if the month is not in 01..=12.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(s.to_owned());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;

        let is_digits = |part: &str, len: usize| {
            part.len() == len && part.bytes().all(|byte| byte.is_ascii_digit())
        };

        if !is_digits(year, 4) || !is_digits(month, 2) {
            return Err(invalid());
        }

        let year = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;

        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Self { year, month })
    }
}

impl Display for BudgetMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for BudgetMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BudgetMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl ToSql for BudgetMonth {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for BudgetMonth {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// The three-letter abbreviation of a month, e.g. "Jan".
pub fn month_abbreviation(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// The month for a three-letter abbreviation, e.g. "Mar" is March.
pub fn month_from_abbreviation(abbreviation: &str) -> Option<Month> {
    let mut month = Month::January;

    for _ in 0..12 {
        if month_abbreviation(month) == abbreviation {
            return Some(month);
        }
        month = month.next();
    }

    None
}

/// The span of time a summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// A month in a specific year, matched like a `YYYY-MM` prefix of the date.
    Month(BudgetMonth),
    /// The same month of every year, e.g. every March.
    MonthOfYear(Month),
}

impl Period {
    /// Whether `date` falls within the period.
    pub fn contains(&self, date: Date) -> bool {
        match self {
            Period::Month(month) => month.contains(date),
            Period::MonthOfYear(month) => date.month() == *month,
        }
    }
}

impl FromStr for Period {
    type Err = Error;

    /// Parse a period from either `YYYY-MM` or a month abbreviation like `Mar`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidPeriod] if `s` is neither.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(month) = month_from_abbreviation(s) {
            return Ok(Period::MonthOfYear(month));
        }

        s.parse()
            .map(Period::Month)
            .map_err(|_| Error::InvalidPeriod(s.to_owned()))
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Month(month) => write!(f, "{month}"),
            Period::MonthOfYear(month) => write!(f, "{}", month_abbreviation(*month)),
        }
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod budget_month_tests {
    use time::{Month, macros::date};

    use crate::{Error, month::BudgetMonth};

    #[test]
    fn parses_and_displays_round_trip() {
        let month: BudgetMonth = "2025-07".parse().unwrap();

        assert_eq!(month.year(), 2025);
        assert_eq!(month.month(), Month::July);
        assert_eq!(month.to_string(), "2025-07");
    }

    #[test]
    fn rejects_malformed_months() {
        for raw in ["", "2025", "2025-7", "2025-13", "2025-00", "25-07", "2025/07", "2025-07-01"] {
            assert_eq!(
                raw.parse::<BudgetMonth>(),
                Err(Error::InvalidMonth(raw.to_owned())),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn first_and_last_day() {
        let february: BudgetMonth = "2024-02".parse().unwrap();

        assert_eq!(february.first_day(), date!(2024 - 02 - 01));
        assert_eq!(february.last_day(), date!(2024 - 02 - 29));
    }

    #[test]
    fn contains_only_dates_in_same_year_and_month() {
        let month: BudgetMonth = "2025-01".parse().unwrap();

        assert!(month.contains(date!(2025 - 01 - 01)));
        assert!(month.contains(date!(2025 - 01 - 31)));
        assert!(!month.contains(date!(2025 - 02 - 01)));
        assert!(!month.contains(date!(2024 - 01 - 15)));
    }

    #[test]
    fn orders_chronologically() {
        let mut months: Vec<BudgetMonth> = ["2025-03", "2024-12", "2025-01"]
            .into_iter()
            .map(|raw| raw.parse().unwrap())
            .collect();

        months.sort();

        let labels: Vec<String> = months.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["2024-12", "2025-01", "2025-03"]);
    }

    #[test]
    fn deserializes_from_json_string() {
        let month: BudgetMonth = serde_json::from_str("\"2025-01\"").unwrap();

        assert_eq!(month.to_string(), "2025-01");
        assert!(serde_json::from_str::<BudgetMonth>("\"January\"").is_err());
    }
}
