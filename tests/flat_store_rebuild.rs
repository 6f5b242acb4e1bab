use tempfile::TempDir;

use qsoflag::{
    core::{
        IndexError,
        builder::rebuild,
        index::ActivityIndex,
        updater::{LoggedContact, record_contact},
    },
    history::{HistoricalContact, HistoryError, adif},
    persist::{MemorySink, PersistError, flat::FlatFileStore},
};

const ADIF_LOG: &str = "WSJT-X ADIF Export<eoh>\n\
<call:4>W1AW <mode:3>FT8 <qso_date:8>20240301 <band:3>20m <eor>\n\
<call:5>k1abc <mode:2>cw <qso_date:8>20231231 <band:3>40m <eor>\n\
<call:4>W1AW <mode:3>FT8 <qso_date:8>20240305 <band:3>40m <eor>\n\
<call:4>AA1A <mode:3>FT4 <qso_date:8>20240101 <eor>\n";

fn contact(call: &str, date: &str) -> HistoricalContact {
    HistoricalContact {
        call: call.to_string(),
        mode: "FT8".to_string(),
        band: "20M".to_string(),
        qso_date: date.to_string(),
    }
}

#[test]
fn rebuild_writes_sorted_lines_and_sentinel() {
    let tmp = TempDir::new().expect("tmp");
    let log_path = tmp.path().join("wsjtx_log.adi");
    std::fs::write(&log_path, ADIF_LOG).expect("write log");

    let mut store = FlatFileStore::new(tmp.path().join("logdata.csv"));
    let contacts = adif::read_file(&log_path).expect("read log");
    let index = rebuild(contacts, &mut store).expect("rebuild");
    assert_eq!(index.len(), 4);

    let text = std::fs::read_to_string(store.path()).expect("read store");
    assert_eq!(
        text,
        "AA1A,FT4,,2024,1,1\n\
         K1ABC,CW,40M,2023,0,365\n\
         W1AW,FT8,20M,2024,1,61\n\
         W1AW,FT8,40M,2024,1,65\n\
         ZZZZZZ,NONE,NONE,2001,0,1\n"
    );
}

#[test]
fn rebuilding_unchanged_log_is_byte_identical() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = FlatFileStore::new(tmp.path().join("logdata.csv"));

    rebuild(adif::parse_str(ADIF_LOG).expect("parse"), &mut store).expect("first");
    let first = std::fs::read(store.path()).expect("read first");
    rebuild(adif::parse_str(ADIF_LOG).expect("parse"), &mut store).expect("second");
    let second = std::fs::read(store.path()).expect("read second");

    assert_eq!(first, second);
}

#[test]
fn bad_date_aborts_without_touching_store() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = FlatFileStore::new(tmp.path().join("logdata.csv"));
    rebuild(vec![contact("W1AW", "20240301")], &mut store).expect("seed");
    let before = std::fs::read(store.path()).expect("read");

    let err = rebuild(
        vec![contact("K1ABC", "20240301"), contact("N0AX", "20240230")],
        &mut store,
    )
    .expect_err("bad date");
    assert!(matches!(err, IndexError::BadDate { position: 2, .. }));
    assert_eq!(std::fs::read(store.path()).expect("read"), before);
}

#[test]
fn stored_index_loads_back_identically() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = FlatFileStore::new(tmp.path().join("logdata.csv"));
    let built = rebuild(adif::parse_str(ADIF_LOG).expect("parse"), &mut store).expect("rebuild");

    let loaded = ActivityIndex::from_stored(store.load().expect("load"));
    assert_eq!(loaded, built);
}

#[test]
fn live_contact_is_inserted_and_persisted() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = FlatFileStore::new(tmp.path().join("logdata.csv"));
    let mut index = rebuild(
        vec![contact("W1AW", "20240301"), contact("AA1A", "20240301")],
        &mut store,
    )
    .expect("rebuild");

    let added = record_contact(
        LoggedContact {
            callsign: "k1abc",
            mode: "FT8",
            band: "20M",
            date_stamp: "20240610",
        },
        &mut index,
        &mut store,
    )
    .expect("record");
    assert_eq!(added.callsign, "K1ABC");

    let calls: Vec<String> = store
        .load()
        .expect("load")
        .into_iter()
        .map(|r| r.callsign)
        .collect();
    assert_eq!(calls, vec!["AA1A", "K1ABC", "W1AW", "ZZZZZZ"]);
    assert_eq!(index.locate("K1ABC"), Some(1));
}

#[test]
fn live_contact_with_bad_date_leaves_index_alone() {
    let mut store = MemorySink::default();
    let mut index = ActivityIndex::new();

    let err = record_contact(
        LoggedContact {
            callsign: "W1AW",
            mode: "FT8",
            band: "20M",
            date_stamp: "2024061",
        },
        &mut index,
        &mut store,
    )
    .expect_err("bad date");
    assert!(matches!(err, IndexError::Calendar(_)));
    assert!(index.is_empty());
    assert_eq!(store.writes, 0);
}

#[test]
fn malformed_store_line_is_reported_with_line_number() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("logdata.csv");
    std::fs::write(&path, "W1AW,FT8,20M,2024,1,61\nbroken\nZZZZZZ,NONE,NONE,2001,0,1\n").expect("write");

    let err = FlatFileStore::new(&path).load().expect_err("malformed");
    assert!(matches!(err, PersistError::Line { line: 2, .. }));
}

#[test]
fn unreadable_log_is_an_error_not_an_empty_rebuild() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = FlatFileStore::new(tmp.path().join("logdata.csv"));
    rebuild(adif::parse_str(ADIF_LOG).expect("parse"), &mut store).expect("seed");
    let before = std::fs::read(store.path()).expect("read");

    let log_path = tmp.path().join("wsjtx_log.adi");
    std::fs::write(&log_path, "Exported by logger\n<call:4>W1AW <qso_date:8>20240301 <eor>\n").expect("write log");
    let err = adif::read_file(&log_path).expect_err("no <eoh>");
    assert!(matches!(err, HistoryError::Malformed { .. }));
    assert_eq!(std::fs::read(store.path()).expect("read"), before);
}

#[test]
fn log_with_byte_order_mark_rebuilds_every_contact() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = FlatFileStore::new(tmp.path().join("logdata.csv"));
    let text = format!("\u{feff}\n{}", ADIF_LOG.split_once("<eoh>\n").expect("header").1);

    let index = rebuild(adif::parse_str(&text).expect("parse"), &mut store).expect("rebuild");
    assert_eq!(index.len(), 4);
}
