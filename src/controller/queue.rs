//! Queue editing

use crate::error::QueueError;
use crate::model::{Album, PlayableItem, TrackId};

use super::PlaybackController;

impl PlaybackController {
    /// Move the item at `from` to land before the item at `to` (`to == len`
    /// appends). The now-playing item keeps playing without interruption.
    pub async fn move_item(&self, from: usize, to: usize) -> Result<(), QueueError> {
        let mut inner = self.inner.lock().await;
        let before = inner.session.current_index();

        // Index re-resolution happens inside the session; notify only afterwards
        inner.session.move_item(from, to).inspect_err(|e| {
            tracing::debug!(from, to, error = %e, "Move refused");
        })?;

        tracing::info!(from, to, ?before, after = ?inner.session.current_index(), "Queue item moved");
        inner.emit_queue_changed();
        inner.publish();
        Ok(())
    }

    /// Remove a queued item. The currently playing item cannot be removed.
    pub async fn remove_item(&self, index: usize) -> Result<PlayableItem, QueueError> {
        let mut inner = self.inner.lock().await;
        let removed = inner.session.remove_item(index).inspect_err(|e| {
            tracing::debug!(index, error = %e, "Removal refused");
        })?;

        tracing::info!(index, track = %removed.title, "Removed from queue");
        inner.emit_queue_changed();
        inner.publish();
        Ok(removed)
    }

    /// Replace the whole queue; playback pauses at the first item
    pub async fn replace_queue(&self, items: Vec<PlayableItem>) {
        let mut inner = self.inner.lock().await;
        inner.cancel_pending_seek();
        inner.stop_ticker();

        let was_playing = inner.session.is_playing();
        inner.session.replace_queue(items);

        tracing::info!(len = inner.session.queue().len(), "Queue replaced");
        inner.emit_queue_changed();
        inner.emit_track_changed();
        inner.emit_transport_if_changed(was_playing);
        inner.publish();
    }

    /// Queue up an album's songs and start playing at `start_index`
    pub async fn play_album(&self, album: &Album, start_index: usize) -> Result<(), QueueError> {
        let mut inner = self.inner.lock().await;
        let was_playing = inner.session.is_playing();

        inner
            .session
            .play_album(album, start_index)
            .inspect_err(|e| {
                tracing::warn!(album = %album.title, start_index, error = %e, "Cannot play album");
            })?;

        tracing::info!(album = %album.title, artist = %album.artist, start_index, "Playing album");
        inner.cancel_pending_seek();
        inner.restart_ticker();
        inner.emit_queue_changed();
        inner.emit_track_changed();
        inner.emit_transport_if_changed(was_playing);
        inner.publish();
        Ok(())
    }

    /// Play `album` starting from the given track
    pub async fn play_track_from_album(&self, album: &Album, track_id: &TrackId) -> Result<(), QueueError> {
        let Some(index) = album.position_of(track_id) else {
            tracing::warn!(album = %album.title, %track_id, "Track not found in album");
            return Err(QueueError::TrackNotFound(track_id.clone()));
        };
        self.play_album(album, index).await
    }
}
