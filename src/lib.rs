//! Playback queue controller for a "now playing" surface
//!
//! A `PlaybackController` owns an ordered queue of tracks, a pointer to the
//! one that is playing, transport state driven by a progress timer, debounced
//! seeking, and queue editing that keeps the playing track's identity stable.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;

pub use config::PlaybackConfig;
pub use controller::{PlaybackController, PlaybackEvent};
pub use error::{ConfigError, QueueError};
pub use model::{
    Album, AlbumRef, PlayableItem, PlaybackSnapshot, PreviousAction, TrackId, TransportState,
};
