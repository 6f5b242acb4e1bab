//! Leap-year and day-of-year helpers for `YYYYMMDD` date stamps.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Calendar errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The stamp is not eight digits or not a real calendar date.
    #[error("invalid date stamp: {0:?}")]
    InvalidStamp(String),
}

/// Year, leap flag, and 1-based day-of-year of one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateParts {
    /// Calendar year.
    pub year: i32,
    /// 1 when `year` is a leap year, otherwise 0.
    pub leap: u8,
    /// Day of year, 1..=366.
    pub julian: u32,
}

impl DateParts {
    /// Parts for a chrono date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            leap: u8::from(is_leap_year(date.year())),
            julian: date.ordinal(),
        }
    }

    /// Parts for the current UTC date.
    pub fn today_utc() -> Self {
        Self::from_date(Utc::now().date_naive())
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// Parses an eight-digit `YYYYMMDD` stamp.
pub fn date_parts(stamp: &str) -> Result<DateParts, CalendarError> {
    let stamp = stamp.trim();
    if stamp.len() != 8 || !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalendarError::InvalidStamp(stamp.to_string()));
    }
    let date = NaiveDate::parse_from_str(stamp, "%Y%m%d")
        .map_err(|_| CalendarError::InvalidStamp(stamp.to_string()))?;
    Ok(DateParts::from_date(date))
}
