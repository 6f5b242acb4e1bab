//! Activity record and its backing-store line format.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::DateParts;

/// Callsign of the trailing sentinel record.
pub const SENTINEL_CALL: &str = "ZZZZZZ";

/// One past contact, keyed by callsign.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Uppercase callsign; primary sort key.
    pub callsign: String,
    /// Uppercase mode label.
    pub mode: String,
    /// Uppercase band label.
    pub band: String,
    /// Contact year.
    pub year: i32,
    /// 1 when `year` is a leap year.
    pub leap: u8,
    /// Day of year of the contact.
    pub julian: u32,
}

impl ActivityRecord {
    /// Builds a record, uppercasing the text fields.
    pub fn new(callsign: &str, mode: &str, band: &str, date: DateParts) -> Self {
        Self {
            callsign: callsign.trim().to_uppercase(),
            mode: mode.trim().to_uppercase(),
            band: band.trim().to_uppercase(),
            year: date.year,
            leap: date.leap,
            julian: date.julian,
        }
    }

    /// The trailing record whose callsign sorts after every real call.
    pub fn sentinel() -> Self {
        Self {
            callsign: SENTINEL_CALL.to_string(),
            mode: "NONE".to_string(),
            band: "NONE".to_string(),
            year: 2001,
            leap: 0,
            julian: 1,
        }
    }

    /// True for the sentinel record.
    pub fn is_sentinel(&self) -> bool {
        self.callsign == SENTINEL_CALL
    }

    /// Date parts of the contact.
    pub fn date(&self) -> DateParts {
        DateParts {
            year: self.year,
            leap: self.leap,
            julian: self.julian,
        }
    }

    /// Parses one `CALL,MODE,BAND,YEAR,LEAP,JULIAN` line.
    pub fn parse_line(line: &str) -> Result<Self, LineError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = line.split(',').collect();
        let [callsign, mode, band, year, leap, julian] = fields.as_slice() else {
            return Err(LineError::FieldCount(fields.len()));
        };

        Ok(Self {
            callsign: callsign.to_string(),
            mode: mode.to_string(),
            band: band.to_string(),
            year: year.parse().map_err(|_| LineError::Number("year"))?,
            leap: leap.parse().map_err(|_| LineError::Number("leap"))?,
            julian: julian.parse().map_err(|_| LineError::Number("julian"))?,
        })
    }
}

/// Writes the record without a trailing newline.
impl fmt::Display for ActivityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.callsign, self.mode, self.band, self.year, self.leap, self.julian
        )
    }
}

/// A backing-store line that does not decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    /// Wrong number of comma-separated fields.
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),
    /// A numeric field did not parse.
    #[error("field {0} is not a number")]
    Number(&'static str),
}
