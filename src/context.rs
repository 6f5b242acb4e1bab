//! Band, mode, date, and threshold state tracked by the session loop.

use crate::calendar::DateParts;

/// Smallest accepted recency threshold.
pub const MIN_THRESHOLD_DAYS: u32 = 2;

/// Current operating context used when classifying a callsign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Band from the last status event, empty before the first one.
    pub band: String,
    /// Mode from the last status event, empty before the first one.
    pub mode: String,
    /// Today's date, refreshed on heartbeats.
    pub today: DateParts,
    /// Contacts fewer than this many days old are a soft match.
    pub threshold_days: u32,
}

impl SessionContext {
    /// Context for `today` with no band or mode yet.
    pub fn new(today: DateParts, threshold_days: u32) -> Self {
        Self {
            band: String::new(),
            mode: String::new(),
            today,
            threshold_days,
        }
    }

    /// Context dated from the UTC wall clock.
    pub fn starting_now(threshold_days: u32) -> Self {
        Self::new(DateParts::today_utc(), threshold_days)
    }

    /// Applies a status report.
    pub fn set_operating(&mut self, band: &str, mode: &str) {
        self.band = band.trim().to_uppercase();
        self.mode = mode.trim().to_uppercase();
    }

    /// Refreshes the date; returns true when the day changed.
    pub fn set_today(&mut self, today: DateParts) -> bool {
        let changed = self.today != today;
        self.today = today;
        changed
    }
}
