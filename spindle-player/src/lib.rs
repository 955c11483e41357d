//! # Spindle Player
//!
//! Player controller layer for the Spindle music player:
//! - [`AudioSink`] collaborator trait and the silent [`NullSink`]
//! - [`Player`] controller binding a playlist to a sink
//! - TOML configuration and player events for the UI layer
//!
//! The playlist engine itself lives in `spindle-core`.

pub mod audio;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;

pub use audio::{AudioSink, NullSink};
pub use config::PlayerConfig;
pub use controller::Player;
pub use error::{Error, Result};
pub use events::PlayerEvent;
