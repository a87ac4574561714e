//! Read model published to observers after every state change

use std::time::Duration;

use super::types::{AlbumRef, PlayableItem, TransportState};

/// Complete playback information for rendering the UI
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackSnapshot {
    /// Increases by one with every published change
    pub revision: u64,
    pub queue: Vec<PlayableItem>,
    pub current_index: Option<usize>,
    pub current_item: Option<PlayableItem>,
    /// Album the queue was started from, while the current item belongs to it
    pub current_album: Option<AlbumRef>,
    pub transport: TransportState,
    pub is_playing: bool,
    pub elapsed: Duration,
    pub duration: Duration,
    pub progress: f64,
    pub volume: f32,
    pub is_favorite: bool,
    pub is_scrubbing: bool,
    pub can_go_next: bool,
    pub can_go_previous: bool,
}

impl PlaybackSnapshot {
    pub fn lyrics(&self) -> Option<&str> {
        self.current_item.as_ref().and_then(|item| item.lyrics.as_deref())
    }

    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    pub fn is_current(&self, index: usize) -> bool {
        self.current_index == Some(index)
    }
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self {
            revision: 0,
            queue: Vec::new(),
            current_index: None,
            current_item: None,
            current_album: None,
            transport: TransportState::Idle,
            is_playing: false,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            progress: 0.0,
            volume: 0.0,
            is_favorite: false,
            is_scrubbing: false,
            can_go_next: false,
            can_go_previous: false,
        }
    }
}
