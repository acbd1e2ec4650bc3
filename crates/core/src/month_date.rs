//! Month-year date convention.
//!
//! Subscriptions only track the month they start and end in. Externally the
//! value is always the string `MM-YYYY`; internally it is a [`NaiveDate`]
//! pinned to the first day of that month.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::error::CoreError;

/// The only accepted external pattern, used in error messages.
pub const PATTERN: &str = "MM-YYYY";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonthDateError {
    #[error("invalid date '{0}', expected {PATTERN}")]
    InvalidFormat(String),
}

impl MonthDateError {
    /// Attach the offending request field, producing a validation error.
    pub fn for_field(self, field: &'static str) -> CoreError {
        match self {
            MonthDateError::InvalidFormat(_) => {
                CoreError::validation(field, format!("invalid format, expected {PATTERN}"))
            }
        }
    }
}

/// A calendar month. The day component is always 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDate(NaiveDate);

impl MonthDate {
    /// Build from a year and a 1-based month.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Parse exactly `MM-YYYY`: two-digit month `01`-`12`, four-digit year.
    pub fn parse(raw: &str) -> Result<Self, MonthDateError> {
        let invalid = || MonthDateError::InvalidFormat(raw.to_string());

        let [m1, m2, b'-', y1, y2, y3, y4] = raw.as_bytes() else {
            return Err(invalid());
        };
        let digits = [*m1, *m2, *y1, *y2, *y3, *y4];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }

        let month = u32::from(m1 - b'0') * 10 + u32::from(m2 - b'0');
        let year = [y1, y2, y3, y4]
            .iter()
            .fold(0_i32, |acc, d| acc * 10 + i32::from(**d - b'0'));

        if !(1..=12).contains(&month) || year == 0 {
            return Err(invalid());
        }
        Self::new(year, month).ok_or_else(invalid)
    }

    /// Render as `MM-YYYY`.
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// The first-of-month date stored in the database.
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for MonthDate {
    fn from(date: NaiveDate) -> Self {
        // with_day(1) never fails for a valid date.
        Self(date.with_day(1).unwrap_or(date))
    }
}

impl fmt::Display for MonthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.0.month(), self.0.year())
    }
}

impl FromStr for MonthDate {
    type Err = MonthDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MonthDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
