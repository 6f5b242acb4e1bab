//! Activity index, its builder, live updates, and recency classification.

/// Bulk construction from a historical log.
pub mod builder;
/// Sorted index and callsign lookup.
pub mod index;
/// Highlight-level classification.
pub mod recency;
/// Appending newly logged contacts.
pub mod updater;

use thiserror::Error;

use crate::{calendar::CalendarError, persist::PersistError};

/// Index build and update failures.
#[derive(Debug, Error)]
pub enum IndexError {
    /// A historical contact carried an unusable date.
    #[error("contact {position} ({callsign}): {source}")]
    BadDate {
        /// 1-based position in the historical log.
        position: usize,
        /// Callsign of the offending contact.
        callsign: String,
        /// Date parse failure.
        #[source]
        source: CalendarError,
    },
    /// A live contact carried an unusable date.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    /// Writing the backing store failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
}
