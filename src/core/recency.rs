use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{calendar::DateParts, context::SessionContext, record::ActivityRecord};

use super::index::ActivityIndex;

/// How strongly a decoded callsign should be flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HighlightLevel {
    /// Not worked recently on this band and mode.
    None,
    /// Worked within the recency threshold.
    Recent,
    /// Worked today.
    Today,
}

impl HighlightLevel {
    /// Numeric level: 0, 1, or 2.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Recent => 1,
            Self::Today => 2,
        }
    }
}

/// Days between a contact and `today`, or `None` when the contact is from
/// neither this year nor last year.
pub fn day_delta(contact: DateParts, today: DateParts) -> Option<i64> {
    let today_julian = i64::from(today.julian);
    let contact_julian = i64::from(contact.julian);
    match i64::from(today.year) - i64::from(contact.year) {
        0 => Some(today_julian - contact_julian),
        1 => Some(today_julian + i64::from(contact.leap) + 365 - contact_julian),
        _ => None,
    }
}

fn matches_operating(record: &ActivityRecord, ctx: &SessionContext) -> bool {
    !record.mode.is_empty()
        && !record.band.is_empty()
        && record.mode == ctx.mode
        && record.band == ctx.band
}

/// Classifies the run of `callsign` records starting at `first`.
///
/// Only records on the current band and mode count. A contact today returns
/// [`HighlightLevel::Today`] at once; a contact fewer than
/// `ctx.threshold_days` days ago raises the result to
/// [`HighlightLevel::Recent`] while the scan continues.
pub fn classify(
    callsign: &str,
    first: usize,
    index: &ActivityIndex,
    ctx: &SessionContext,
) -> HighlightLevel {
    let run = index.run_from(first).take_while(|r| r.callsign == callsign);

    let mut level = HighlightLevel::None;
    for record in run {
        if !matches_operating(record, ctx) {
            continue;
        }
        let Some(delta) = day_delta(record.date(), ctx.today) else {
            continue;
        };

        if delta == 0 {
            debug!(callsign, "logged today");
            return HighlightLevel::Today;
        }
        if delta > 0 && delta < i64::from(ctx.threshold_days) && level == HighlightLevel::None {
            debug!(callsign, days_ago = delta, "logged recently");
            level = HighlightLevel::Recent;
        }
    }
    level
}

/// Locates `callsign` and classifies it; absent calls are
/// [`HighlightLevel::None`].
pub fn highlight_level(callsign: &str, index: &ActivityIndex, ctx: &SessionContext) -> HighlightLevel {
    index
        .locate(callsign)
        .map(|first| classify(callsign, first, index, ctx))
        .unwrap_or(HighlightLevel::None)
}
