//! Playback Channel
//!
//! Inbound messages from the embedded video player. A message is accepted
//! only if it comes from the trusted origin and parses into a known state
//! change; everything else is dropped with a reason.

use serde::Deserialize;
use std::fmt;
use tracing::debug;

/// Player state the gate reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Ended,
    Started,
    Paused,
}

impl PlaybackStatus {
    /// Map the player's numeric state code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(PlaybackStatus::Ended),
            1 => Some(PlaybackStatus::Started),
            2 => Some(PlaybackStatus::Paused),
            _ => None,
        }
    }
}

/// Why a message was dropped. Never surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoredSignal {
    UntrustedOrigin(String),
    Malformed,
    UnrelatedEvent(String),
    UnknownState(String),
}

impl fmt::Display for IgnoredSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoredSignal::UntrustedOrigin(origin) => write!(f, "untrusted origin {}", origin),
            IgnoredSignal::Malformed => f.write_str("malformed payload"),
            IgnoredSignal::UnrelatedEvent(event) => write!(f, "unrelated event {}", event),
            IgnoredSignal::UnknownState(info) => write!(f, "unknown player state {}", info),
        }
    }
}

const STATE_CHANGE_EVENT: &str = "onStateChange";

#[derive(Debug, Deserialize)]
struct PlayerMessage {
    event: String,
    #[serde(default)]
    info: serde_json::Value,
}

/// Origin- and schema-checked receiver for player messages.
#[derive(Debug, Clone)]
pub struct PlaybackChannel {
    trusted_origin: String,
}

impl PlaybackChannel {
    pub fn new(trusted_origin: impl Into<String>) -> Self {
        Self {
            trusted_origin: trusted_origin.into(),
        }
    }

    pub fn trusted_origin(&self) -> &str {
        &self.trusted_origin
    }

    pub fn accept(&self, origin: &str, raw: &str) -> Result<PlaybackStatus, IgnoredSignal> {
        let result = self.decode(origin, raw);
        if let Err(reason) = &result {
            debug!(origin, %reason, "Playback message ignored");
        }
        result
    }

    fn decode(&self, origin: &str, raw: &str) -> Result<PlaybackStatus, IgnoredSignal> {
        if origin != self.trusted_origin {
            return Err(IgnoredSignal::UntrustedOrigin(origin.to_string()));
        }

        let msg: PlayerMessage = serde_json::from_str(raw).map_err(|_| IgnoredSignal::Malformed)?;
        if msg.event != STATE_CHANGE_EVENT {
            return Err(IgnoredSignal::UnrelatedEvent(msg.event));
        }

        // Integral floats (`0.0`) are the same state code.
        msg.info
            .as_i64()
            .or_else(|| msg.info.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(PlaybackStatus::from_code)
            .ok_or_else(|| IgnoredSignal::UnknownState(msg.info.to_string()))
    }
}

impl Default for PlaybackChannel {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TRUSTED_ORIGIN)
    }
}
