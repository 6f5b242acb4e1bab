//! Monitor events consumed by the session loop and commands sent back.

use serde::{Deserialize, Serialize};

use crate::core::recency::HighlightLevel;

/// Background colour for contacts within the recency threshold.
pub const COLOR_ORANGE: &str = "#ffa500";
/// Background colour for contacts made today.
pub const COLOR_RED: &str = "#ff0000";
/// Foreground colour for every highlight.
pub const COLOR_WHITE: &str = "#ffffff";

/// Fields of one decoded message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeFields {
    /// Milliseconds since UTC midnight.
    pub time_ms: u32,
    /// Signal report in dB.
    pub snr: i32,
    /// Time offset in seconds.
    pub delta_time: f32,
    /// Audio offset in Hz.
    pub delta_frequency: u32,
    /// Mode symbol reported with the decode.
    pub mode: String,
    /// Decoded text, e.g. `CQ W1AW FN31`.
    pub message: String,
}

/// Events delivered by a [`super::monitor::Monitor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MonitorEvent {
    /// A message was decoded.
    Decode(DecodeFields),
    /// Periodic status with dial frequency and mode.
    Status {
        /// Dial frequency in Hz.
        frequency_hz: u64,
        /// Current mode.
        mode: String,
    },
    /// Keep-alive from the radio application.
    Heartbeat,
    /// A contact was logged.
    QsoLogged {
        /// `YYYYMMDD` date of the contact.
        date: String,
        /// Worked callsign.
        call: String,
    },
    /// The radio application closed.
    Close,
    /// Nothing arrived within the receive timeout.
    Timeout,
    /// The transport failed.
    SocketError {
        /// Transport error text.
        #[serde(default)]
        reason: String,
    },
}

/// Ask the radio application to colour a callsign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    /// Callsign to colour.
    pub call: String,
    /// Background colour.
    pub background: String,
    /// Foreground colour.
    pub foreground: String,
}

impl Highlight {
    /// Command for `level`, or `None` for [`HighlightLevel::None`].
    pub fn for_level(call: &str, level: HighlightLevel) -> Option<Self> {
        let background = match level {
            HighlightLevel::None => return None,
            HighlightLevel::Recent => COLOR_ORANGE,
            HighlightLevel::Today => COLOR_RED,
        };
        Some(Self {
            call: call.to_string(),
            background: background.to_string(),
            foreground: COLOR_WHITE.to_string(),
        })
    }
}

/// Commands sent to the radio application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MonitorCommand {
    /// Colour a callsign.
    Highlight(Highlight),
}
