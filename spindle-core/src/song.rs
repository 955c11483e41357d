//! Song metadata model and sort keys

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One song in a playlist
///
/// Metadata is fixed at creation; only `play_count` changes, incremented
/// each time the song is started or resumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Source the audio sink loads (file path)
    pub path: String,

    /// Times this song has been started or resumed
    #[serde(default)]
    pub play_count: u64,
}

impl Song {
    /// Create a new song with a zero play count
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            path: path.into(),
            play_count: 0,
        }
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.artist)
    }
}

/// Sort key for [`Playlist::sort_by`](crate::Playlist::sort_by)
///
/// Title and artist sort ascending; play count sorts descending so the
/// most-played songs come first. All three sorts are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    Artist,
    PlayCount,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Title => write!(f, "title"),
            SortKey::Artist => write!(f, "artist"),
            SortKey::PlayCount => write!(f, "play_count"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortKey::Title),
            "artist" => Ok(SortKey::Artist),
            "play_count" | "playcount" | "plays" => Ok(SortKey::PlayCount),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}
