use crate::{calendar::date_parts, persist::IndexSink, record::ActivityRecord};

use super::{IndexError, index::ActivityIndex};

/// A contact reported by the radio application as just logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedContact<'a> {
    /// Worked callsign.
    pub callsign: &'a str,
    /// Current mode.
    pub mode: &'a str,
    /// Current band.
    pub band: &'a str,
    /// `YYYYMMDD` date of the contact.
    pub date_stamp: &'a str,
}

/// Adds one contact in sorted position and rewrites the whole backing store.
///
/// The index is left untouched when the date stamp is bad. A failed write
/// leaves the new record in memory and returns the error.
pub fn record_contact<S>(
    contact: LoggedContact<'_>,
    index: &mut ActivityIndex,
    sink: &mut S,
) -> Result<ActivityRecord, IndexError>
where
    S: IndexSink + ?Sized,
{
    let date = date_parts(contact.date_stamp)?;
    let record = ActivityRecord::new(contact.callsign, contact.mode, contact.band, date);
    index.insert(record.clone());
    sink.write_records(index.records())?;
    Ok(record)
}
