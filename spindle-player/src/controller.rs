//! Player controller
//!
//! Owns the playlist and the audio sink and keeps them in step: cursor
//! moves reload the sink, end-of-track polls auto-advance, and the
//! playback-intent flag on the playlist mirrors what the sink was told to
//! do. One controller instance per player; there is no global state.

use crate::audio::AudioSink;
use crate::config::PlayerConfig;
use crate::error::{Error, Result};
use crate::events::PlayerEvent;
use spindle_core::{Playlist, SortKey};
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// Music player: playlist plus audio sink
pub struct Player<S: AudioSink> {
    playlist: Playlist,
    sink: S,
    volume: f64,
    /// Entry id of the track loaded in the sink, when this controller
    /// started it. Entry identity, not the path: two playlist slots may
    /// share a file, and only the started slot counts as resumable.
    loaded: Option<Uuid>,
}

impl<S: AudioSink> Player<S> {
    /// Create a player with an empty playlist
    pub fn new(sink: S) -> Self {
        Self {
            playlist: Playlist::new(),
            sink,
            volume: 0.5,
            loaded: None,
        }
    }

    /// Apply startup configuration: volume and seed songs
    pub fn apply_config(&mut self, config: &PlayerConfig) {
        self.set_volume(config.volume);
        for song in &config.songs {
            self.playlist
                .add_song(&song.title, &song.artist, &song.path);
        }
        if !config.songs.is_empty() {
            info!("Seeded playlist with {} songs", config.songs.len());
        }
    }

    /// Read access to the playlist for display
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// The audio sink (mainly for inspection in tests and the CLI)
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Append a song at the end of the playlist
    pub fn add_song(
        &mut self,
        title: impl Into<String>,
        artist: impl Into<String>,
        path: impl Into<String>,
    ) {
        self.playlist.add_song(title, artist, path);
    }

    /// Start or resume the current song
    ///
    /// Resumes when the sink already holds the current entry and playback
    /// was paused; otherwise loads it and starts from the beginning. Either
    /// way the song's play count goes up by one. Returns the event produced
    /// (`TrackStarted` or `Resumed`), or `Ok(None)` when there is nothing
    /// to play.
    pub fn play(&mut self) -> Result<Option<PlayerEvent>> {
        let Some(entry) = self.playlist.current_entry() else {
            return Ok(None);
        };

        if self.loaded == Some(entry.entry_id) {
            self.sink.unpause();
            self.playlist.mark_playing();
            Ok(Some(PlayerEvent::Resumed))
        } else {
            Ok(Some(self.start_current()?))
        }
    }

    /// Pause playback
    ///
    /// Returns the `Paused` event, or `None` when playback was not running.
    pub fn pause(&mut self) -> Option<PlayerEvent> {
        if !self.playlist.mark_paused() {
            return None;
        }
        self.sink.pause();
        Some(PlayerEvent::Paused)
    }

    /// Pause if playing, play otherwise
    pub fn toggle(&mut self) -> Result<Option<PlayerEvent>> {
        if self.playlist.is_playing() {
            Ok(self.pause())
        } else {
            self.play()
        }
    }

    /// Step to the next song
    ///
    /// When playback is running the new song starts immediately. Returns
    /// `Ok(false)` at the tail or on an empty playlist.
    pub fn next(&mut self) -> Result<bool> {
        if !self.playlist.advance() {
            return Ok(false);
        }
        if self.playlist.is_playing() {
            self.start_current()?;
        }
        Ok(true)
    }

    /// Step to the previous song
    pub fn previous(&mut self) -> Result<bool> {
        if !self.playlist.retreat() {
            return Ok(false);
        }
        if self.playlist.is_playing() {
            self.start_current()?;
        }
        Ok(true)
    }

    /// Jump to the song at `index` (UI list selection)
    pub fn select(&mut self, index: usize) -> Result<bool> {
        if !self.playlist.select(index) {
            return Ok(false);
        }
        if self.playlist.is_playing() {
            self.start_current()?;
        }
        Ok(true)
    }

    /// Remove the song at `index`
    ///
    /// If the removed song was both current and playing, playback moves to
    /// the song the cursor lands on, or stops when the playlist empties.
    pub fn remove(&mut self, index: usize) -> Result<bool> {
        let was_current = self.playlist.current_index() == Some(index);
        if !self.playlist.remove_at(index) {
            return Ok(false);
        }

        if was_current {
            self.loaded = None;
            if self.playlist.is_playing() {
                if self.playlist.current_song().is_some() {
                    self.start_current()?;
                } else {
                    self.playlist.mark_paused();
                    self.sink.pause();
                }
            }
        }
        Ok(true)
    }

    /// Shuffle the playlist; the playing song keeps playing
    pub fn shuffle(&mut self) -> bool {
        self.playlist.shuffle()
    }

    /// Sort the playlist; the playing song keeps playing
    pub fn sort_by(&mut self, key: SortKey) -> bool {
        self.playlist.sort_by(key)
    }

    /// Empty the playlist and stop playback
    pub fn clear(&mut self) {
        self.playlist.clear();
        self.sink.pause();
        self.loaded = None;
    }

    /// Set output volume, clamped to `0.0..=1.0`
    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
        self.sink.set_volume(self.volume);
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Poll the sink for end-of-track and auto-advance
    ///
    /// Call periodically from the UI loop. Returns the events produced:
    /// nothing most of the time; `TrackFinished` plus either `TrackStarted`
    /// or `PlaylistEnded` when the playing track ran out.
    pub fn tick(&mut self) -> Result<Vec<PlayerEvent>> {
        let mut events = Vec::new();
        if !self.playlist.is_playing() || !self.sink.finished() {
            return Ok(events);
        }

        if let Some(song) = self.playlist.current_song() {
            events.push(PlayerEvent::TrackFinished {
                title: song.title.clone(),
            });
        }

        if self.playlist.advance() {
            events.push(self.start_current()?);
        } else {
            debug!("Playlist finished");
            self.playlist.mark_paused();
            self.sink.pause();
            self.loaded = None;
            events.push(PlayerEvent::PlaylistEnded);
        }
        Ok(events)
    }

    /// Load the current song into the sink and start it from the beginning
    fn start_current(&mut self) -> Result<PlayerEvent> {
        let (entry_id, title, artist, path) = match self.playlist.current_entry() {
            Some(entry) => (
                entry.entry_id,
                entry.song.title.clone(),
                entry.song.artist.clone(),
                entry.song.path.clone(),
            ),
            None => return Err(Error::Audio("no track selected".into())),
        };

        self.sink.load(Path::new(&path))?;
        self.sink.play()?;
        self.playlist.mark_playing();
        self.loaded = Some(entry_id);
        debug!("Started {} - {}", title, artist);
        Ok(PlayerEvent::TrackStarted { title, artist })
    }
}
