//! Dues period representation
//!
//! Deposits carry a month name and a year; expenses carry a calendar date.
//! Both series must key their aggregates on the same `Period` value so the
//! summaries merge, which is why the month naming lives here in one place.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month, displayed with its full English name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Full English name, matching the stored month field on deposits
    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Month number (1-12)
    pub fn number(&self) -> u32 {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0) as u32 + 1
    }

    /// Month of a calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self::ALL[(date.month() - 1) as usize]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| PeriodParseError::InvalidMonth(s.to_string()))
    }
}

/// A dues period: one month of one year
///
/// Ordered chronologically (year first, then month), so period-keyed maps
/// iterate in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub month: Month,
    pub year: i32,
}

impl Period {
    /// Create a period from a month and year
    pub fn new(month: Month, year: i32) -> Self {
        Self { month, year }
    }

    /// Derive the period of a calendar date (used for expense aggregation)
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: Month::from_date(date),
            year: date.year(),
        }
    }

    /// Period label in the report key format, e.g. "January-2024"
    pub fn label(&self) -> String {
        format!("{}-{}", self.month, self.year)
    }

    /// Parse a period label of the form "January-2024"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let (month, year) = s
            .rsplit_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: Month = month.parse()?;
        let year: i32 = year
            .trim()
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        Ok(Self { month, year })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.month, self.year)
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.month).cmp(&(other.year, other.month))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name_round_trip() {
        for month in Month::ALL {
            let parsed: Month = month.name().parse().unwrap();
            assert_eq!(parsed, month);
        }
    }

    #[test]
    fn test_month_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        assert_eq!(Month::from_date(date), Month::March);
        assert_eq!(Month::from_date(date).name(), "March");
    }

    #[test]
    fn test_period_label() {
        let period = Period::new(Month::January, 2024);
        assert_eq!(period.label(), "January-2024");
    }

    #[test]
    fn test_period_from_date_matches_deposit_key() {
        // An expense dated inside January 2024 must key identically to a
        // deposit stored as ("January", 2024).
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(
            Period::from_date(date),
            Period::new(Month::January, 2024)
        );
    }

    #[test]
    fn test_period_parse() {
        let period = Period::parse("September-2023").unwrap();
        assert_eq!(period, Period::new(Month::September, 2023));
        assert!(Period::parse("Smarch-2023").is_err());
        assert!(Period::parse("January").is_err());
    }

    #[test]
    fn test_period_ordering() {
        let dec_2023 = Period::new(Month::December, 2023);
        let jan_2024 = Period::new(Month::January, 2024);
        let feb_2024 = Period::new(Month::February, 2024);
        assert!(dec_2023 < jan_2024);
        assert!(jan_2024 < feb_2024);
    }

    #[test]
    fn test_serialization() {
        let period = Period::new(Month::May, 2025);
        let json = serde_json::to_string(&period).unwrap();
        let deserialized: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(period, deserialized);
    }
}
