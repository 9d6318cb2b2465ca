//! Tutorial Gate
//!
//! Navigation to the simulation is locked until the tutorial video has been
//! watched to the end. The gate is a two-state machine driven by playback
//! messages from the embedded player; once `Watched` it never goes back.

mod channel;

pub use channel::{IgnoredSignal, PlaybackChannel, PlaybackStatus};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::TutorialConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GateState {
    NotWatched,
    Watched,
}

/// Effect of one signal on the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTransition {
    Unchanged,
    Unlocked,
}

/// Outbound request to advance past the tutorial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NavigationRequest {
    Proceed { target: String },
}

/// Outbound request to the media element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MediaRequest {
    /// Re-assign the embed source, restarting playback.
    Reload { src: String },
}

/// Static copy shown on the tutorial page.
#[derive(Debug, Clone, Serialize)]
pub struct TutorialPage {
    pub heading: &'static str,
    pub intro: &'static str,
    pub embed_url: String,
    pub learning_points: [&'static str; 4],
}

const HEADING: &str = "Before You Begin the Simulation";
const INTRO: &str = "Please watch this tutorial video to understand how the wildfire crisis simulation works. \
The video will explain the interface, decision-making process, and what to expect during the simulation.";
const LEARNING_POINTS: [&str; 4] = [
    "How to evaluate different decision options in the simulation",
    "Understanding the metrics and their impact on your decisions",
    "How to explore alternative options and make informed choices",
    "What to expect as you progress through the wildfire crisis scenarios",
];
const LOCKED_NOTICE: &str = "The \"Proceed to Simulation\" button will become active once you've watched the video. \
You can pause and resume the video at any time using the player controls.";
const READY_NOTICE: &str = "You can now proceed to the simulation. If you'd like to review anything, \
feel free to replay the video before continuing.";

/// Per-visit gate. Owned by a single view; not shared.
#[derive(Debug)]
pub struct TutorialGate {
    session_id: String,
    config: TutorialConfig,
    channel: PlaybackChannel,
    state: GateState,
    is_playing: bool,
    replays: u32,
    watched_at: Option<DateTime<Utc>>,
}

impl TutorialGate {
    pub fn new(config: TutorialConfig) -> Self {
        let channel = PlaybackChannel::new(config.trusted_origin.clone());
        Self {
            session_id: Uuid::new_v4().to_string(),
            config,
            channel,
            state: GateState::NotWatched,
            is_playing: false,
            replays: 0,
            watched_at: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn can_proceed(&self) -> bool {
        self.state == GateState::Watched
    }

    pub fn replays(&self) -> u32 {
        self.replays
    }

    /// When the video first reached its end.
    pub fn watched_at(&self) -> Option<DateTime<Utc>> {
        self.watched_at
    }

    /// Feed a raw message from the player. Untrusted or malformed messages
    /// leave the gate untouched.
    pub fn handle_message(&mut self, origin: &str, raw: &str) -> GateTransition {
        match self.channel.accept(origin, raw) {
            Ok(status) => self.apply(status),
            Err(_) => GateTransition::Unchanged,
        }
    }

    /// Apply a decoded playback status. Safe under duplicates and any order.
    pub fn apply(&mut self, status: PlaybackStatus) -> GateTransition {
        match status {
            PlaybackStatus::Started => {
                self.is_playing = true;
                GateTransition::Unchanged
            }
            PlaybackStatus::Paused => {
                self.is_playing = false;
                GateTransition::Unchanged
            }
            PlaybackStatus::Ended => {
                self.is_playing = false;
                if self.state == GateState::Watched {
                    return GateTransition::Unchanged;
                }
                self.state = GateState::Watched;
                self.watched_at = Some(Utc::now());
                info!(session = %self.session_id, "Tutorial watched, navigation unlocked");
                GateTransition::Unlocked
            }
        }
    }

    /// Restart the video. Allowed in either state and never re-locks the gate.
    pub fn replay(&mut self) -> MediaRequest {
        self.is_playing = true;
        self.replays += 1;
        info!(session = %self.session_id, replays = self.replays, "Tutorial replay requested");
        MediaRequest::Reload {
            src: self.config.embed_url.clone(),
        }
    }

    /// `None` while the video has not been watched; the button is disabled.
    pub fn proceed(&self) -> Option<NavigationRequest> {
        if !self.can_proceed() {
            return None;
        }
        info!(session = %self.session_id, target = %self.config.next_stage, "Proceeding past tutorial");
        Some(NavigationRequest::Proceed {
            target: self.config.next_stage.clone(),
        })
    }

    /// Banner text for the current state.
    pub fn notice(&self) -> &'static str {
        match self.state {
            GateState::NotWatched => LOCKED_NOTICE,
            GateState::Watched => READY_NOTICE,
        }
    }

    pub fn page(&self) -> TutorialPage {
        tutorial_page(&self.config)
    }
}

impl Default for TutorialGate {
    fn default() -> Self {
        Self::new(TutorialConfig::default())
    }
}

pub fn tutorial_page(config: &TutorialConfig) -> TutorialPage {
    TutorialPage {
        heading: HEADING,
        intro: INTRO,
        embed_url: config.embed_url.clone(),
        learning_points: LEARNING_POINTS,
    }
}
