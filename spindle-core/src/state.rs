//! Playback-intent state

use serde::{Deserialize, Serialize};

/// Playback-intent flag carried by the playlist
///
/// Advisory bookkeeping only: it records whether the caller asked for
/// playback, and does not itself drive audio output. The audio sink is an
/// external collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    Paused,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Playing => write!(f, "playing"),
            PlaybackState::Paused => write!(f, "paused"),
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState::Paused
    }
}
