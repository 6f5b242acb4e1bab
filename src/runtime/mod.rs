//! Single-threaded session loop and the monitor boundary.

/// Event and command payloads.
pub mod events;
/// Monitor trait and UDP/JSON adapter.
pub mod monitor;
/// Session loop.
pub mod session;
