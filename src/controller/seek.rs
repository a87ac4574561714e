//! Debounced seeking and scrubbing

use std::sync::Weak;
use std::time::Duration;
use tokio::sync::Mutex;

use super::{ControllerInner, PlaybackController, PlaybackEvent};

impl PlaybackController {
    /// Request a seek to `progress` (a fraction of the current duration).
    ///
    /// The request is applied once the debounce window passes without a newer
    /// one; a newer request replaces the pending one. Dragging a scrubber can
    /// call this on every movement.
    pub async fn seek(&self, progress: f64) {
        let mut inner = self.inner.lock().await;
        inner.cancel_pending_seek();

        inner.seek_generation += 1;
        let delay = inner.config.seek_debounce();
        let handle = tokio::spawn(apply_after(inner.self_ref.clone(), delay, progress, inner.seek_generation));
        inner.pending_seek = Some(handle);
        tracing::trace!(progress, "Seek scheduled");
    }

    /// The user started (`true`) or stopped (`false`) dragging the progress
    /// control. The timer is suspended while dragging; the playing flag is not
    /// touched.
    pub async fn seeking_did_change(&self, is_editing: bool) {
        let mut inner = self.inner.lock().await;
        if !inner.session.set_scrubbing(is_editing) {
            return;
        }

        if is_editing {
            inner.stop_ticker();
        } else {
            inner.restart_ticker();
        }
        tracing::debug!(is_editing, "Scrubbing changed");
        inner.publish();
    }
}

async fn apply_after(inner: Weak<Mutex<ControllerInner>>, delay: Duration, progress: f64, generation: u64) {
    tokio::time::sleep(delay).await;

    let Some(inner) = inner.upgrade() else {
        return;
    };
    let mut guard = inner.lock().await;
    if guard.seek_generation != generation {
        return;
    }
    guard.pending_seek.take();
    guard.apply_seek(progress);
}

impl ControllerInner {
    fn apply_seek(&mut self, progress: f64) {
        let was_playing = self.session.is_playing();
        let Some(position) = self.session.seek(progress) else {
            tracing::debug!(progress, "Nothing to seek in, ignoring");
            return;
        };

        tracing::debug!(progress, position_ms = position.as_millis() as u64, "Seek applied");
        // Keep the timer suspended while the user is still dragging
        if !self.session.is_scrubbing() {
            self.restart_ticker();
        }
        self.emit(PlaybackEvent::Seeked { position });
        self.emit_transport_if_changed(was_playing);
        self.publish();
    }
}
