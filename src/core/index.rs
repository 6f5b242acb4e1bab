use tracing::warn;

use crate::record::ActivityRecord;

/// Sorted in-memory copy of the backing store.
///
/// Records are ascending by callsign and the last record is always
/// [`ActivityRecord::sentinel`]. Records sharing a callsign keep the order in
/// which they were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityIndex {
    records: Vec<ActivityRecord>,
}

impl Default for ActivityIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityIndex {
    /// Index holding only the sentinel.
    pub fn new() -> Self {
        Self {
            records: vec![ActivityRecord::sentinel()],
        }
    }

    /// Sorts `records` by callsign (stable) and appends the sentinel.
    pub fn from_records(mut records: Vec<ActivityRecord>) -> Self {
        records.retain(|r| *r != ActivityRecord::sentinel());
        records.sort_by(|a, b| a.callsign.cmp(&b.callsign));
        records.push(ActivityRecord::sentinel());
        Self { records }
    }

    /// Adopts records read back from the backing store, repairing order or a
    /// missing sentinel if the file was edited by hand.
    pub fn from_stored(records: Vec<ActivityRecord>) -> Self {
        let sentinel_last = records.last().is_some_and(ActivityRecord::is_sentinel);
        let sorted = records.is_sorted_by(|a, b| a.callsign <= b.callsign);
        if sentinel_last && sorted {
            return Self { records };
        }

        warn!(sentinel_last, sorted, "backing store out of order, re-sorting");
        Self::from_records(records)
    }

    /// All records, sentinel included.
    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    /// Real records, sentinel excluded.
    pub fn contacts(&self) -> &[ActivityRecord] {
        &self.records[..self.records.len() - 1]
    }

    /// Number of real records.
    pub fn len(&self) -> usize {
        self.records.len() - 1
    }

    /// True when no contacts are indexed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the first record for `callsign`, or `None` if absent.
    pub fn locate(&self, callsign: &str) -> Option<usize> {
        let contacts = self.contacts();
        let first = contacts.partition_point(|r| r.callsign.as_str() < callsign);
        contacts
            .get(first)
            .is_some_and(|r| r.callsign == callsign)
            .then_some(first)
    }

    /// The same-callsign run starting at `first`.
    pub fn run_from(&self, first: usize) -> impl Iterator<Item = &ActivityRecord> {
        let call = self.records.get(first).map(|r| r.callsign.as_str());
        self.records
            .get(first..)
            .unwrap_or_default()
            .iter()
            .take_while(move |r| Some(r.callsign.as_str()) == call && !r.is_sentinel())
    }

    /// Inserts after any existing records with the same callsign and returns
    /// the position used. The sentinel stays last.
    pub fn insert(&mut self, record: ActivityRecord) -> usize {
        let at = self
            .contacts()
            .partition_point(|r| r.callsign <= record.callsign);
        self.records.insert(at, record);
        at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DateParts;

    fn rec(call: &str, julian: u32) -> ActivityRecord {
        ActivityRecord::new(call, "FT8", "20M", DateParts { year: 2024, leap: 1, julian })
    }

    #[test]
    fn empty_index_is_just_the_sentinel() {
        let index = ActivityIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.records(), &[ActivityRecord::sentinel()]);
        assert_eq!(index.locate("W1AW"), None);
    }

    #[test]
    fn run_stops_before_next_call() {
        let index = ActivityIndex::from_records(vec![rec("K1ABC", 1), rec("W1AW", 2), rec("K1ABC", 3)]);
        let first = index.locate("K1ABC").unwrap();
        let julians: Vec<u32> = index.run_from(first).map(|r| r.julian).collect();
        assert_eq!(julians, vec![1, 3]);
    }

    #[test]
    fn stored_records_without_sentinel_are_repaired() {
        let index = ActivityIndex::from_stored(vec![rec("W1AW", 1), rec("K1ABC", 2)]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.records()[0].callsign, "K1ABC");
        assert!(index.records().last().unwrap().is_sentinel());
    }

    #[test]
    fn insert_keeps_arrival_order_within_a_call() {
        let mut index = ActivityIndex::from_records(vec![rec("W1AW", 1)]);
        index.insert(rec("W1AW", 2));
        index.insert(rec("AA1A", 3));
        let calls: Vec<(&str, u32)> = index
            .records()
            .iter()
            .map(|r| (r.callsign.as_str(), r.julian))
            .collect();
        assert_eq!(calls, vec![("AA1A", 3), ("W1AW", 1), ("W1AW", 2), ("ZZZZZZ", 1)]);
    }
}
