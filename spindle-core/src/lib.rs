//! # Spindle Core
//!
//! Playlist engine for the Spindle music player:
//! - Song metadata model with play counts
//! - Ordered playlist with a current-song cursor
//! - Shuffle and stable multi-key sort that preserve the current song
//! - Playback-intent state (playing/paused)
//!
//! Audio output, file scanning, and the user interface are external
//! collaborators; see the `spindle-player` crate.

pub mod playlist;
pub mod song;
pub mod state;

pub use playlist::{Playlist, PlaylistEntry};
pub use song::{Song, SortKey};
pub use state::PlaybackState;
