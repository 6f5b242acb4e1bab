//! Historical contact log input.

/// ADIF log reader.
pub mod adif;
/// Frequency to band label table.
pub mod band;

use std::path::PathBuf;

use thiserror::Error;

/// One contact read from the historical log. Missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoricalContact {
    /// Worked callsign.
    pub call: String,
    /// Mode as logged.
    pub mode: String,
    /// Band as logged.
    pub band: String,
    /// `YYYYMMDD` contact date.
    pub qso_date: String,
}

/// Historical log read failures.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The log could not be read.
    #[error("reading {path}: {source}")]
    Io {
        /// Log path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A data specifier was cut short or malformed.
    #[error("malformed ADIF at byte {offset}: {reason}")]
    Malformed {
        /// Byte offset of the bad specifier.
        offset: usize,
        /// What went wrong.
        reason: &'static str,
    },
}
