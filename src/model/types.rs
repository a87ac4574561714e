//! Core type definitions for the playback model

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

/// Stable identifier of a playable item
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Album a track belongs to, as shown next to the track
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlbumRef {
    pub name: String,
    pub cover_art: String,
}

/// One audio track. Never mutated once it is in a queue.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PlayableItem {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: AlbumRef,
    #[serde(rename = "duration_secs", deserialize_with = "duration_from_secs")]
    pub duration: Duration,
    #[serde(default)]
    pub lyrics: Option<String>,
}

impl PlayableItem {
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            album: AlbumRef::default(),
            duration,
            lyrics: None,
        }
    }

    pub fn with_album(mut self, name: impl Into<String>, cover_art: impl Into<String>) -> Self {
        self.album = AlbumRef {
            name: name.into(),
            cover_art: cover_art.into(),
        };
        self
    }

    pub fn with_lyrics(mut self, lyrics: impl Into<String>) -> Self {
        self.lyrics = Some(lyrics.into());
        self
    }
}

fn duration_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}

/// A released album and its track listing
#[derive(Clone, Debug, PartialEq)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub cover_art: String,
    pub release_year: u16,
    pub songs: Vec<PlayableItem>,
}

impl Album {
    pub fn position_of(&self, track_id: &TrackId) -> Option<usize> {
        self.songs.iter().position(|song| &song.id == track_id)
    }

    /// Reference shown alongside its tracks
    pub fn album_ref(&self) -> AlbumRef {
        AlbumRef {
            name: self.title.clone(),
            cover_art: self.cover_art.clone(),
        }
    }
}

/// Transport state derived from the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportState {
    /// Nothing queued, transport controls disabled
    Idle,
    Paused,
    Playing,
}
