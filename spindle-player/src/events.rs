//! Player events for the UI layer
//!
//! The controller hands these back to its caller synchronously (returned
//! from the operation that produced them, no broadcast channel) so the UI
//! can refresh its display.

use serde::Serialize;

/// Something the UI layer should reflect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerEvent {
    /// A track began playing (fresh start, not resume)
    TrackStarted { title: String, artist: String },

    /// The playing track reached its end
    TrackFinished { title: String },

    /// The last track finished and there is nothing left to play
    PlaylistEnded,

    /// Playback paused
    Paused,

    /// Paused playback picked up where it left off
    Resumed,
}
