//! Callsign extraction from decoded message text.

use std::sync::LazyLock;

use regex::Regex;

static CALLSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]{1,3}[0-9][A-Z0-9]{0,3}[A-Z]").expect("callsign pattern is valid")
});

/// First token after the leading `CQ`/`DE`/call word that starts with a
/// callsign, returned whole. Empty when none matches.
pub fn extract_callsign(message: &str) -> &str {
    message
        .split_whitespace()
        .skip(1)
        .find(|token| CALLSIGN.is_match(token))
        .unwrap_or("")
}

/// True for a general call (`CQ ...`).
pub fn is_general_call(message: &str) -> bool {
    message.starts_with("CQ")
}
