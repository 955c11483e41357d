//! Player configuration
//!
//! TOML config file with an initial volume and an optional seed playlist:
//!
//! ```toml
//! volume = 0.6
//!
//! [[songs]]
//! title = "Blinding Lights"
//! artist = "The Weeknd"
//! path = "music/blinding_lights.mp3"
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One seed playlist entry from the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongEntry {
    pub title: String,
    pub artist: String,
    pub path: String,
}

/// Player configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial output volume, clamped to `0.0..=1.0` on apply
    pub volume: f64,

    /// Songs added to the playlist at startup
    pub songs: Vec<SongEntry>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 0.5,
            songs: Vec::new(),
        }
    }
}

impl PlayerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        debug!(
            "Loaded config from {} ({} seed songs)",
            path.display(),
            config.songs.len()
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PlayerConfig::default();
        assert_eq!(config.volume, 0.5);
        assert!(config.songs.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
volume = 0.8

[[songs]]
title = "Dance Monkey"
artist = "Tones and I"
path = "music/dance_monkey.mp3"

[[songs]]
title = "Watermelon Sugar"
artist = "Harry Styles"
path = "music/watermelon_sugar.mp3"
"#
        )
        .unwrap();

        let config = PlayerConfig::load(file.path()).unwrap();
        assert_eq!(config.volume, 0.8);
        assert_eq!(config.songs.len(), 2);
        assert_eq!(config.songs[0].title, "Dance Monkey");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "volume = 0.3").unwrap();

        let config = PlayerConfig::load(file.path()).unwrap();
        assert_eq!(config.volume, 0.3);
        assert!(config.songs.is_empty());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "volume = [not toml").unwrap();

        let err = PlayerConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = PlayerConfig::load(Path::new("/nonexistent/spindle.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
