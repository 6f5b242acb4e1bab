use tracing::info;

use crate::{
    calendar::date_parts,
    history::HistoricalContact,
    persist::IndexSink,
    record::ActivityRecord,
};

use super::{IndexError, index::ActivityIndex};

/// Builds a sorted index from historical contacts.
///
/// Any contact with a bad date fails the whole build.
pub fn build<I>(contacts: I) -> Result<ActivityIndex, IndexError>
where
    I: IntoIterator<Item = HistoricalContact>,
{
    let records = contacts
        .into_iter()
        .enumerate()
        .map(|(n, contact)| {
            let date = date_parts(&contact.qso_date).map_err(|source| IndexError::BadDate {
                position: n + 1,
                callsign: contact.call.clone(),
                source,
            })?;
            Ok(ActivityRecord::new(&contact.call, &contact.mode, &contact.band, date))
        })
        .collect::<Result<Vec<_>, IndexError>>()?;

    Ok(ActivityIndex::from_records(records))
}

/// Builds the index and overwrites the backing store with it.
pub fn rebuild<I, S>(contacts: I, sink: &mut S) -> Result<ActivityIndex, IndexError>
where
    I: IntoIterator<Item = HistoricalContact>,
    S: IndexSink + ?Sized,
{
    let index = build(contacts)?;
    sink.write_records(index.records())?;
    info!(contacts = index.len(), "activity index rebuilt");
    Ok(index)
}
