//! Flat text backing store, one `CALL,MODE,BAND,YEAR,LEAP,JULIAN` line per record.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::SystemTime,
};

use tracing::debug;

use crate::record::ActivityRecord;

use super::{IndexSink, PersistError, PersistResult};

/// Backing store file at a fixed path.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    path: PathBuf,
}

impl FlatFileStore {
    /// Store at `path`; nothing is touched until read or written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Last modification time.
    pub fn modified(&self) -> PersistResult<SystemTime> {
        Ok(fs::metadata(&self.path)?.modified()?)
    }

    /// Reads every line, sentinel included. Blank lines are skipped.
    pub fn load(&self) -> PersistResult<Vec<ActivityRecord>> {
        let text = fs::read_to_string(&self.path)?;
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                ActivityRecord::parse_line(line)
                    .map_err(|source| PersistError::Line { line: n + 1, source })
            })
            .collect()
    }
}

/// Writes to a sibling temp file and renames it over the store so a failed
/// write never leaves a truncated store behind.
impl IndexSink for FlatFileStore {
    fn write_records(&mut self, records: &[ActivityRecord]) -> PersistResult<()> {
        let mut body = String::with_capacity(records.len() * 24);
        for record in records {
            body.push_str(&record.to_string());
            body.push('\n');
        }

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(body.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), records = records.len(), "backing store written");
        Ok(())
    }
}
