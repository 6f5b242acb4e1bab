//! Recent-contact highlighting for decoded amateur-radio calls.
//!
//! A sorted activity index of past contacts is built from an ADIF log and
//! kept in a flat text backing store. Each decoded `CQ` is looked up and
//! classified against the current band, mode, and date.
//!
//! # Examples
//!
//! Building an index and classifying a call:
//! ```
//! use qsoflag::{
//!     calendar::date_parts,
//!     context::SessionContext,
//!     core::{builder::build, recency::{highlight_level, HighlightLevel}},
//!     history::HistoricalContact,
//! };
//!
//! let index = build(vec![HistoricalContact {
//!     call: "W1AW".to_string(),
//!     mode: "FT8".to_string(),
//!     band: "20m".to_string(),
//!     qso_date: "20240301".to_string(),
//! }]).expect("build");
//!
//! let mut ctx = SessionContext::new(date_parts("20240304").expect("date"), 7);
//! ctx.set_operating("20M", "FT8");
//! assert_eq!(highlight_level("W1AW", &index, &ctx), HighlightLevel::Recent);
//! ```
//!
//! Running a session against the UDP/JSON monitor:
//! ```no_run
//! use std::time::Duration;
//!
//! use qsoflag::{
//!     context::SessionContext,
//!     core::index::ActivityIndex,
//!     persist::flat::FlatFileStore,
//!     runtime::{monitor::UdpJsonMonitor, session::Session},
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = FlatFileStore::new("logdata.csv");
//! let index = ActivityIndex::from_stored(store.load().expect("load"));
//! let monitor = UdpJsonMonitor::bind("127.0.0.1:2237".parse().unwrap(), Duration::from_secs(16))
//!     .await
//!     .expect("bind");
//! let mut session = Session::new(monitor, store, index, SessionContext::starting_now(7));
//! let end = session.run(std::future::pending()).await.expect("session");
//! println!("{end:?}");
//! # }
//! ```
#![deny(missing_docs)]

/// Leap years and day-of-year conversion.
pub mod calendar;
/// Callsign extraction from decoded text.
pub mod callsign;
/// Runtime configuration.
pub mod config;
/// Band, mode, and date context.
pub mod context;
/// Activity index, builder, updater, and recency evaluator.
pub mod core;
/// Historical log reading.
pub mod history;
/// Backing-store persistence.
pub mod persist;
/// Activity records and their line format.
pub mod record;
/// Session loop and monitor boundary.
pub mod runtime;
