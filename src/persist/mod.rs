pub mod flat;

use crate::record::{ActivityRecord, LineError};

/// Backing-store failures.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// File system error.
    #[error("backing store I/O: {0}")]
    Io(#[from] std::io::Error),
    /// A stored line did not decode.
    #[error("backing store line {line}: {source}")]
    Line {
        /// 1-based line number.
        line: usize,
        /// Decode failure.
        #[source]
        source: LineError,
    },
}

/// Result alias for persistence calls.
pub type PersistResult<T> = Result<T, PersistError>;

/// Destination for full rewrites of the activity index.
pub trait IndexSink {
    /// Replaces the stored sequence with `records`, sentinel included.
    fn write_records(&mut self, records: &[ActivityRecord]) -> PersistResult<()>;
}

/// Keeps the last written sequence in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Last sequence written.
    pub records: Vec<ActivityRecord>,
    /// Number of writes so far.
    pub writes: usize,
}

impl IndexSink for MemorySink {
    fn write_records(&mut self, records: &[ActivityRecord]) -> PersistResult<()> {
        self.records = records.to_vec();
        self.writes += 1;
        Ok(())
    }
}
