//! Playback control methods

use crate::model::PreviousAction;

use super::{PlaybackController, PlaybackEvent};

impl PlaybackController {
    /// Start playback. Returns false if nothing changed (empty queue,
    /// already playing, or the current track has finished).
    pub async fn play(&self) -> bool {
        let mut inner = self.inner.lock().await;
        if !inner.session.play() {
            return false;
        }
        tracing::debug!("Playback started");
        inner.restart_ticker();
        inner.emit(PlaybackEvent::TransportChanged { is_playing: true });
        inner.publish();
        true
    }

    /// Pause playback. Returns false if it was not playing.
    pub async fn pause(&self) -> bool {
        let mut inner = self.inner.lock().await;
        if !inner.session.pause() {
            return false;
        }
        tracing::debug!("Playback paused");
        inner.stop_ticker();
        inner.emit(PlaybackEvent::TransportChanged { is_playing: false });
        inner.publish();
        true
    }

    /// Returns whether playback is running afterwards
    pub async fn toggle_play_pause(&self) -> bool {
        let mut inner = self.inner.lock().await;
        let was_playing = inner.session.is_playing();
        let is_playing = inner.session.toggle_play_pause();
        tracing::debug!(was_playing, is_playing, "Toggling playback");

        if is_playing != was_playing {
            inner.restart_ticker();
            inner.emit(PlaybackEvent::TransportChanged { is_playing });
            inner.publish();
        }
        is_playing
    }

    /// Skip to the next item. No-op at the end of the queue.
    pub async fn next(&self) -> bool {
        let mut inner = self.inner.lock().await;
        let was_playing = inner.session.is_playing();
        let autoplay = inner.config.autoplay_on_skip;

        if !inner.session.next(autoplay) {
            tracing::debug!("Already at the last item, ignoring next");
            return false;
        }

        inner.restart_ticker();
        inner.emit_track_changed();
        inner.emit_transport_if_changed(was_playing);
        inner.publish();
        true
    }

    /// Restart the current item if it has been playing for a while, otherwise
    /// step back one item.
    pub async fn previous(&self) -> PreviousAction {
        let mut inner = self.inner.lock().await;
        let was_playing = inner.session.is_playing();
        let autoplay = inner.config.autoplay_on_skip;
        let threshold = inner.config.restart_threshold();

        let action = inner.session.previous(autoplay, threshold);
        match action {
            PreviousAction::Restarted => {
                tracing::debug!("Restarting current track");
                inner.restart_ticker();
                inner.emit(PlaybackEvent::Seeked {
                    position: inner.session.elapsed(),
                });
            }
            PreviousAction::SteppedBack => {
                inner.restart_ticker();
                inner.emit_track_changed();
                inner.emit_transport_if_changed(was_playing);
            }
            PreviousAction::Ignored => return action,
        }
        inner.publish();
        action
    }

    /// Move on from a finished track to the next one and play it.
    /// Returns false while the current track is still running.
    pub async fn advance_after_finish(&self) -> bool {
        let mut inner = self.inner.lock().await;
        let was_playing = inner.session.is_playing();
        if !inner.session.advance_after_finish() {
            return false;
        }

        inner.restart_ticker();
        inner.emit_track_changed();
        inner.emit_transport_if_changed(was_playing);
        inner.publish();
        true
    }

    /// Clamp into `[0, 1]` and store. Returns the stored value.
    pub async fn set_volume(&self, volume: f32) -> f32 {
        let mut inner = self.inner.lock().await;
        let stored = inner.session.set_volume(volume);
        tracing::debug!(requested = volume, volume = stored, "Volume set");
        inner.emit(PlaybackEvent::VolumeChanged { volume: stored });
        inner.publish();
        stored
    }

    /// Flip the favourite flag of the current item. None without one.
    pub async fn toggle_favorite(&self) -> Option<bool> {
        let mut inner = self.inner.lock().await;
        let is_favorite = inner.session.toggle_favorite()?;

        if let Some(item) = inner.session.current_item() {
            tracing::info!(track = %item.title, is_favorite, "Favourite toggled");
            inner.emit(PlaybackEvent::FavoriteChanged {
                track_id: item.id.clone(),
                is_favorite,
            });
        }
        inner.publish();
        Some(is_favorite)
    }
}
