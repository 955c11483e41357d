//! Audio sink collaborator seam
//!
//! The playlist core never touches audio. Everything that makes sound sits
//! behind [`AudioSink`], which the player controller drives: load a track,
//! start/pause/resume it, adjust volume, and poll for end-of-track so the
//! controller can auto-advance.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Playback backend driven by the player controller
///
/// Implementations are not required to be thread-safe; the controller is
/// the single caller, matching the one-logical-caller model of the core.
pub trait AudioSink {
    /// Load a track, replacing whatever was loaded before
    fn load(&mut self, path: &Path) -> Result<()>;

    /// Start playback of the loaded track from the beginning
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping position
    fn pause(&mut self);

    /// Resume paused playback
    fn unpause(&mut self);

    /// Set output volume; `volume` is already clamped to `0.0..=1.0`
    fn set_volume(&mut self, volume: f64);

    /// End-of-track poll: true once the loaded track has played to its end
    ///
    /// Cleared by the next `load`/`play`.
    fn finished(&self) -> bool;
}

/// Silent sink for headless operation and tests
///
/// Accepts every track, produces no sound, and never finishes on its own;
/// callers simulate end-of-track with [`NullSink::finish_current`].
#[derive(Debug, Default)]
pub struct NullSink {
    loaded: Option<PathBuf>,
    playing: bool,
    finished: bool,
    volume: f64,
}

impl NullSink {
    pub fn new() -> Self {
        Self {
            volume: 1.0,
            ..Self::default()
        }
    }

    /// Path of the currently loaded track, if any
    pub fn loaded(&self) -> Option<&Path> {
        self.loaded.as_deref()
    }

    /// Whether the sink believes it is producing output
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Last volume handed to the sink
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Simulate the loaded track reaching its end
    pub fn finish_current(&mut self) {
        if self.loaded.is_some() {
            self.finished = true;
            self.playing = false;
        }
    }
}

impl AudioSink for NullSink {
    fn load(&mut self, path: &Path) -> Result<()> {
        debug!("NullSink loading {}", path.display());
        self.loaded = Some(path.to_path_buf());
        self.finished = false;
        self.playing = false;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.playing = true;
        self.finished = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn unpause(&mut self) {
        self.playing = true;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sink_load_clears_finished() {
        let mut sink = NullSink::new();
        sink.load(Path::new("a.mp3")).unwrap();
        sink.play().unwrap();
        sink.finish_current();
        assert!(sink.finished());

        sink.load(Path::new("b.mp3")).unwrap();
        assert!(!sink.finished());
        assert_eq!(sink.loaded(), Some(Path::new("b.mp3")));
    }

    #[test]
    fn test_null_sink_finish_requires_loaded_track() {
        let mut sink = NullSink::new();
        sink.finish_current();
        assert!(!sink.finished());
    }

    #[test]
    fn test_null_sink_pause_and_resume() {
        let mut sink = NullSink::new();
        sink.load(Path::new("a.mp3")).unwrap();
        sink.play().unwrap();
        assert!(sink.is_playing());
        sink.pause();
        assert!(!sink.is_playing());
        sink.unpause();
        assert!(sink.is_playing());
    }
}
