//! Configuration
//!
//! Defaults overridden from the environment. `.env` files are honoured by the
//! binary before `AppConfig::from_env` runs.

use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_TRUSTED_ORIGIN: &str = "https://www.youtube.com";
pub const DEFAULT_TUTORIAL_URL: &str = "https://www.youtube.com/embed/VbISk2VL0G8?enablejsapi=1&rel=0";
pub const DEFAULT_NEXT_STAGE: &str = "/simulation";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8002";

/// Settings for the video-gated tutorial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TutorialConfig {
    /// Embed URL, with the player JS API enabled so state events are posted.
    pub embed_url: String,
    /// Only playback messages from this origin are trusted.
    pub trusted_origin: String,
    /// Where "proceed" navigates to.
    pub next_stage: String,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            embed_url: DEFAULT_TUTORIAL_URL.to_string(),
            trusted_origin: DEFAULT_TRUSTED_ORIGIN.to_string(),
            next_stage: DEFAULT_NEXT_STAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Dataset file; the bundled dataset is used when unset.
    pub data_path: Option<PathBuf>,
    pub bind_addr: String,
    pub tutorial: TutorialConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            tutorial: TutorialConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            data_path: get("WILDFIRE_DATA").map(PathBuf::from),
            bind_addr: get("WILDFIRE_BIND").unwrap_or(defaults.bind_addr),
            tutorial: TutorialConfig {
                embed_url: get("WILDFIRE_TUTORIAL_URL").unwrap_or(defaults.tutorial.embed_url),
                trusted_origin: get("WILDFIRE_TRUSTED_ORIGIN").unwrap_or(defaults.tutorial.trusted_origin),
                next_stage: get("WILDFIRE_NEXT_STAGE").unwrap_or(defaults.tutorial.next_stage),
            },
        }
    }
}
