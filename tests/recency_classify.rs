use qsoflag::{
    calendar::{DateParts, date_parts},
    context::SessionContext,
    core::{
        index::ActivityIndex,
        recency::{HighlightLevel, classify, highlight_level},
    },
    record::ActivityRecord,
};

fn rec(call: &str, mode: &str, band: &str, stamp: &str) -> ActivityRecord {
    ActivityRecord::new(call, mode, band, date_parts(stamp).expect("stamp"))
}

fn ctx(today: &str, threshold_days: u32) -> SessionContext {
    let mut ctx = SessionContext::new(date_parts(today).expect("today"), threshold_days);
    ctx.set_operating("20M", "FT8");
    ctx
}

#[test]
fn same_day_is_today() {
    let index = ActivityIndex::from_records(vec![rec("W1AW", "FT8", "20M", "20240610")]);
    assert_eq!(highlight_level("W1AW", &index, &ctx("20240610", 7)), HighlightLevel::Today);
}

#[test]
fn threshold_boundary_is_exclusive() {
    let index = ActivityIndex::from_records(vec![rec("W1AW", "FT8", "20M", "20240601")]);
    // 20240601 is day 153; 20240607 is six days later.
    assert_eq!(highlight_level("W1AW", &index, &ctx("20240607", 7)), HighlightLevel::Recent);
    assert_eq!(highlight_level("W1AW", &index, &ctx("20240608", 7)), HighlightLevel::None);
}

#[test]
fn year_rollover_yields_recent() {
    let index = ActivityIndex::from_records(vec![rec("W1AW", "FT8", "20M", "20231231")]);
    let today = ctx("20240101", 7);
    assert_eq!(today.today, DateParts { year: 2024, leap: 1, julian: 1 });
    assert_eq!(highlight_level("W1AW", &index, &today), HighlightLevel::Recent);
}

#[test]
fn two_years_back_never_matches() {
    let index = ActivityIndex::from_records(vec![rec("W1AW", "FT8", "20M", "20221231")]);
    assert_eq!(highlight_level("W1AW", &index, &ctx("20240101", 30)), HighlightLevel::None);
}

#[test]
fn later_same_day_record_upgrades_recent() {
    let index = ActivityIndex::from_records(vec![
        rec("W1AW", "FT8", "20M", "20240608"),
        rec("W1AW", "FT8", "20M", "20240610"),
    ]);
    let first = index.locate("W1AW").expect("located");
    assert_eq!(classify("W1AW", first, &index, &ctx("20240610", 7)), HighlightLevel::Today);
}

#[test]
fn older_record_after_recent_does_not_lower_level() {
    let index = ActivityIndex::from_records(vec![
        rec("W1AW", "FT8", "20M", "20240608"),
        rec("W1AW", "FT8", "20M", "20240101"),
    ]);
    assert_eq!(highlight_level("W1AW", &index, &ctx("20240610", 7)), HighlightLevel::Recent);
}

#[test]
fn other_band_or_mode_is_ignored() {
    let index = ActivityIndex::from_records(vec![
        rec("W1AW", "CW", "20M", "20240610"),
        rec("W1AW", "FT8", "40M", "20240610"),
    ]);
    assert_eq!(highlight_level("W1AW", &index, &ctx("20240610", 7)), HighlightLevel::None);
}

#[test]
fn empty_fields_never_match_before_first_status() {
    let index = ActivityIndex::from_records(vec![rec("W1AW", "", "", "20240610")]);
    let fresh = SessionContext::new(date_parts("20240610").expect("today"), 7);
    assert_eq!(highlight_level("W1AW", &index, &fresh), HighlightLevel::None);
}

#[test]
fn future_dated_record_is_not_recent() {
    let index = ActivityIndex::from_records(vec![rec("W1AW", "FT8", "20M", "20240612")]);
    assert_eq!(highlight_level("W1AW", &index, &ctx("20240610", 7)), HighlightLevel::None);
}

#[test]
fn neighbouring_calls_do_not_leak_into_the_run() {
    let index = ActivityIndex::from_records(vec![
        rec("W1AV", "FT8", "20M", "20240610"),
        rec("W1AW", "FT8", "20M", "20240101"),
        rec("W1AWA", "FT8", "20M", "20240610"),
    ]);
    assert_eq!(highlight_level("W1AW", &index, &ctx("20240610", 7)), HighlightLevel::None);
    assert_eq!(highlight_level("N0CALL", &index, &ctx("20240610", 7)), HighlightLevel::None);
}
