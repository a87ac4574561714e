//! Model module - Playback state and data types
//!
//! - `types`: Core type definitions (items, albums, transport state)
//! - `playback`: The playback session and its queue/transport rules
//! - `snapshot`: Read model handed to observers
//! - `catalog`: Queue files and the built-in sample catalog

mod types;
mod playback;
mod snapshot;
mod catalog;

pub use types::{Album, AlbumRef, PlayableItem, TrackId, TransportState};

pub use playback::{PlaybackSession, PreviousAction, TickOutcome};

pub use snapshot::PlaybackSnapshot;

pub use catalog::{load_queue_file, sample_albums, sample_queue};
