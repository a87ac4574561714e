//! Discrete notifications emitted alongside snapshot updates

use std::time::Duration;

use crate::model::TrackId;

#[derive(Clone, Debug, PartialEq)]
pub enum PlaybackEvent {
    TransportChanged { is_playing: bool },
    TrackChanged { index: usize, track_id: TrackId },
    /// A seek (or a restart from "previous") landed at `position`
    Seeked { position: Duration },
    TrackFinished { track_id: TrackId },
    QueueChanged { len: usize, current_index: Option<usize> },
    VolumeChanged { volume: f32 },
    FavoriteChanged { track_id: TrackId, is_favorite: bool },
}
