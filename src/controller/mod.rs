//! Controller module - Playback commands, progress timer and change notification
//!
//! The controller owns one `PlaybackSession` behind a mutex and is the only
//! path through which it changes. It is organized into submodules by
//! responsibility:
//!
//! - `transport`: play/pause, next/previous, volume, favourite
//! - `seek`: debounced seeking and scrubbing
//! - `queue`: reorder, removal and queue replacement
//! - `ticker`: the progress timer task
//! - `events`: discrete notifications for observers

mod events;
mod queue;
mod seek;
mod ticker;
mod transport;

pub use events::PlaybackEvent;

use std::sync::{Arc, Weak};
use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;

use crate::config::PlaybackConfig;
use crate::model::{PlayableItem, PlaybackSession, PlaybackSnapshot};

const EVENT_CAPACITY: usize = 100;

/// Handle to a playback session. Clones share the same session; the timer and
/// any pending seek are cancelled once the last clone is dropped.
#[derive(Clone)]
pub struct PlaybackController {
    pub(crate) inner: Arc<Mutex<ControllerInner>>,
    snapshots: watch::Receiver<PlaybackSnapshot>,
    events: broadcast::Sender<PlaybackEvent>,
}

impl PlaybackController {
    pub fn new(queue: Vec<PlayableItem>, config: PlaybackConfig) -> Self {
        // Hand-built configs skip the TOML path; the accessors fall back to safe values
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "Invalid playback configuration, falling back where needed");
        }
        let session = PlaybackSession::new(queue, config.initial_volume);
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot(0));
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);

        tracing::info!(
            queue_len = session.queue().len(),
            tick_ms = config.tick_interval().as_millis() as u64,
            debounce_ms = config.seek_debounce_ms,
            "Playback controller created"
        );

        let events = event_tx.clone();
        let inner = Arc::new_cyclic(|self_ref| {
            Mutex::new(ControllerInner {
                session,
                config,
                revision: 0,
                ticker: None,
                ticker_generation: 0,
                pending_seek: None,
                seek_generation: 0,
                snapshots: snapshot_tx,
                events: event_tx,
                self_ref: self_ref.clone(),
            })
        });

        Self {
            inner,
            snapshots: snapshot_rx,
            events,
        }
    }

    /// Latest published state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified whenever the session state changes
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshots.clone()
    }

    pub fn events(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    pub async fn current_lyrics(&self) -> Option<String> {
        let inner = self.inner.lock().await;
        inner.session.current_lyrics().map(str::to_owned)
    }

    /// Stop the timer, drop any pending seek and pause
    pub async fn shutdown(&self) {
        let mut inner = self.inner.lock().await;
        inner.stop_ticker();
        inner.cancel_pending_seek();
        if inner.session.pause() {
            inner.emit(PlaybackEvent::TransportChanged { is_playing: false });
            inner.publish();
        }
        tracing::info!("Playback controller shut down");
    }
}

pub(crate) struct ControllerInner {
    session: PlaybackSession,
    config: PlaybackConfig,
    revision: u64,
    ticker: Option<JoinHandle<()>>,
    ticker_generation: u64,
    pending_seek: Option<JoinHandle<()>>,
    seek_generation: u64,
    snapshots: watch::Sender<PlaybackSnapshot>,
    events: broadcast::Sender<PlaybackEvent>,
    self_ref: Weak<Mutex<ControllerInner>>,
}

impl ControllerInner {
    /// Push the current session state to every subscriber
    fn publish(&mut self) {
        self.revision += 1;
        self.snapshots.send_replace(self.session.snapshot(self.revision));
    }

    fn emit(&self, event: PlaybackEvent) {
        tracing::trace!(?event, "Playback event");
        // No receivers is fine
        let _ = self.events.send(event);
    }

    fn emit_transport_if_changed(&self, was_playing: bool) {
        let is_playing = self.session.is_playing();
        if is_playing != was_playing {
            self.emit(PlaybackEvent::TransportChanged { is_playing });
        }
    }

    fn emit_track_changed(&self) {
        if let (Some(index), Some(item)) = (self.session.current_index(), self.session.current_item()) {
            tracing::info!(index, track = %item.title, artist = %item.artist, "Track changed");
            self.emit(PlaybackEvent::TrackChanged {
                index,
                track_id: item.id.clone(),
            });
        }
    }

    fn emit_queue_changed(&self) {
        self.emit(PlaybackEvent::QueueChanged {
            len: self.session.queue().len(),
            current_index: self.session.current_index(),
        });
    }

    /// Stop the timer and start a fresh one if the session should be ticking
    fn restart_ticker(&mut self) {
        self.stop_ticker();
        if self.session.should_tick() {
            self.ticker_generation += 1;
            let period = self.config.tick_interval();
            let handle = tokio::spawn(ticker::run(self.self_ref.clone(), period, self.ticker_generation));
            self.ticker = Some(handle);
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    fn cancel_pending_seek(&mut self) {
        if let Some(handle) = self.pending_seek.take() {
            tracing::trace!("Cancelling pending seek");
            handle.abort();
        }
    }
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        self.stop_ticker();
        self.cancel_pending_seek();
        tracing::debug!("Playback session torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransportState;
    use std::time::Duration;

    fn item(id: &str, secs: u64) -> PlayableItem {
        PlayableItem::new(id, id.to_uppercase(), "Artist", Duration::from_secs(secs))
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_last_handle_closes_observers() {
        let controller = PlaybackController::new(vec![item("a", 10)], PlaybackConfig::default());
        let mut snapshots = controller.subscribe();
        let mut events = controller.events();

        controller.play().await;
        controller.seek(0.5).await;
        snapshots.borrow_and_update();

        drop(controller);
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(snapshots.changed().await.is_err());
        loop {
            match events.recv().await {
                Ok(_) => continue,
                Err(err) => {
                    assert_eq!(err, broadcast::error::RecvError::Closed);
                    break;
                }
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_one_session() {
        let controller = PlaybackController::new(vec![item("a", 10), item("b", 10)], PlaybackConfig::default());
        let other = controller.clone();

        other.next().await;
        assert_eq!(controller.snapshot().current_index, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_pauses_and_stops_progress() {
        let controller = PlaybackController::new(vec![item("a", 10)], PlaybackConfig::default());
        controller.play().await;
        tokio::time::sleep(Duration::from_millis(350)).await;

        controller.shutdown().await;
        let at_shutdown = controller.snapshot().elapsed;
        tokio::time::sleep(Duration::from_secs(1)).await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.transport, TransportState::Paused);
        assert_eq!(snapshot.elapsed, at_shutdown);
    }

    #[tokio::test(start_paused = true)]
    async fn every_change_bumps_the_revision() {
        let controller = PlaybackController::new(vec![item("a", 10)], PlaybackConfig::default());
        let mut snapshots = controller.subscribe();
        assert_eq!(snapshots.borrow_and_update().revision, 0);

        controller.toggle_favorite().await;
        snapshots.changed().await.unwrap();
        let snapshot = snapshots.borrow_and_update().clone();
        assert_eq!(snapshot.revision, 1);
        assert!(snapshot.is_favorite);
    }

    #[tokio::test(start_paused = true)]
    async fn current_lyrics_follow_the_current_item() {
        let controller = PlaybackController::new(
            vec![item("a", 10).with_lyrics("first verse"), item("b", 10)],
            PlaybackConfig::default(),
        );
        assert_eq!(controller.current_lyrics().await.as_deref(), Some("first verse"));

        controller.next().await;
        assert_eq!(controller.current_lyrics().await, None);
    }
}
