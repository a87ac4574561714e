//! Playback session state and the rules that keep it consistent
//!
//! `PlaybackSession` is deliberately synchronous and free of timers: the
//! controller decides *when* things happen (ticks, debounced seeks), the
//! session decides *what* they do to the queue, index and transport state.

use std::collections::HashSet;
use std::time::Duration;

use crate::error::QueueError;
use super::snapshot::PlaybackSnapshot;
use super::types::{Album, AlbumRef, PlayableItem, TransportState};

/// What `previous()` ended up doing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviousAction {
    /// Current track rewound to zero, index unchanged
    Restarted,
    /// Moved one position back in the queue
    SteppedBack,
    Ignored,
}

/// Result of feeding one timer period into the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    /// Elapsed reached the duration; playback stopped at the end of the track
    Finished,
    /// Not playing (or scrubbing), nothing changed
    Idle,
}

/// State owned by a single playback surface
#[derive(Clone, Debug)]
pub struct PlaybackSession {
    queue: Vec<PlayableItem>,
    current_index: Option<usize>,
    is_playing: bool,
    elapsed: Duration,
    volume: f32,
    is_favorite: bool,
    is_scrubbing: bool,
    /// Set while the queue is an album started with `play_album`
    album: Option<AlbumRef>,
}

impl PlaybackSession {
    pub fn new(queue: Vec<PlayableItem>, volume: f32) -> Self {
        let mut session = Self {
            queue: Vec::new(),
            current_index: None,
            is_playing: false,
            elapsed: Duration::ZERO,
            volume: clamp_volume(volume),
            is_favorite: false,
            is_scrubbing: false,
            album: None,
        };
        session.replace_queue(queue);
        session
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn queue(&self) -> &[PlayableItem] {
        &self.queue
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_item(&self) -> Option<&PlayableItem> {
        self.current_index.and_then(|index| self.queue.get(index))
    }

    pub fn current_album(&self) -> Option<&AlbumRef> {
        self.album.as_ref()
    }

    pub fn current_lyrics(&self) -> Option<&str> {
        self.current_item().and_then(|item| item.lyrics.as_deref())
    }

    /// Duration of the current item, zero without one
    pub fn duration(&self) -> Duration {
        self.current_item().map(|item| item.duration).unwrap_or(Duration::ZERO)
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed as a fraction of the duration, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        let duration = self.duration();
        if duration.is_zero() {
            0.0
        } else {
            (self.elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn is_scrubbing(&self) -> bool {
        self.is_scrubbing
    }

    pub fn transport_state(&self) -> TransportState {
        if self.current_index.is_none() {
            TransportState::Idle
        } else if self.is_playing {
            TransportState::Playing
        } else {
            TransportState::Paused
        }
    }

    pub fn can_go_next(&self) -> bool {
        matches!(self.current_index, Some(index) if index + 1 < self.queue.len())
    }

    pub fn can_go_previous(&self) -> bool {
        matches!(self.current_index, Some(index) if index > 0)
    }

    /// The current track has played to its end
    pub fn is_finished(&self) -> bool {
        self.current_item().is_some() && self.elapsed >= self.duration()
    }

    /// Whether the progress timer should be running right now
    pub fn should_tick(&self) -> bool {
        self.is_playing && !self.is_scrubbing && !self.is_finished()
    }

    pub fn snapshot(&self, revision: u64) -> PlaybackSnapshot {
        PlaybackSnapshot {
            revision,
            queue: self.queue.clone(),
            current_index: self.current_index,
            current_item: self.current_item().cloned(),
            current_album: self.album.clone(),
            transport: self.transport_state(),
            is_playing: self.is_playing,
            elapsed: self.elapsed,
            duration: self.duration(),
            progress: self.progress(),
            volume: self.volume,
            is_favorite: self.is_favorite,
            is_scrubbing: self.is_scrubbing,
            can_go_next: self.can_go_next(),
            can_go_previous: self.can_go_previous(),
        }
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Returns true if playback went from paused to playing
    pub fn play(&mut self) -> bool {
        if self.current_index.is_none() || self.is_playing {
            return false;
        }
        // A finished track stays paused until it is rewound or replaced
        if self.is_finished() {
            tracing::debug!("Refusing to play a track that has already finished");
            return false;
        }
        self.is_playing = true;
        true
    }

    /// Returns true if playback went from playing to paused
    pub fn pause(&mut self) -> bool {
        if !self.is_playing {
            return false;
        }
        self.is_playing = false;
        true
    }

    /// Returns the new playing flag
    pub fn toggle_play_pause(&mut self) -> bool {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
        self.is_playing
    }

    pub fn next(&mut self, autoplay: bool) -> bool {
        if !self.can_go_next() {
            return false;
        }
        if let Some(index) = self.current_index {
            self.select(index + 1, autoplay);
        }
        true
    }

    pub fn previous(&mut self, autoplay: bool, restart_threshold: Duration) -> PreviousAction {
        let Some(index) = self.current_index else {
            return PreviousAction::Ignored;
        };

        if self.elapsed > restart_threshold {
            self.elapsed = Duration::ZERO;
            PreviousAction::Restarted
        } else if index == 0 {
            PreviousAction::Ignored
        } else {
            self.select(index - 1, autoplay);
            PreviousAction::SteppedBack
        }
    }

    /// Jump to the next item after the current one finished.
    /// Returns false if the track is still running or there is nothing after it.
    pub fn advance_after_finish(&mut self) -> bool {
        if !self.is_finished() || !self.can_go_next() {
            return false;
        }
        self.next(true)
    }

    /// Move elapsed to `progress` of the current duration.
    /// Returns the new position, or None when there is nothing to seek in.
    pub fn seek(&mut self, progress: f64) -> Option<Duration> {
        let duration = self.duration();
        if duration.is_zero() {
            return None;
        }

        let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
        self.elapsed = duration.mul_f64(progress).min(duration);
        if self.is_finished() {
            self.is_playing = false;
        }
        Some(self.elapsed)
    }

    /// Returns true if the scrubbing flag changed
    pub fn set_scrubbing(&mut self, is_scrubbing: bool) -> bool {
        if self.is_scrubbing == is_scrubbing {
            return false;
        }
        self.is_scrubbing = is_scrubbing;
        true
    }

    /// Stores the clamped volume and returns it
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.volume = clamp_volume(volume);
        self.volume
    }

    /// Returns the new flag, or None without a current item
    pub fn toggle_favorite(&mut self) -> Option<bool> {
        self.current_item()?;
        self.is_favorite = !self.is_favorite;
        Some(self.is_favorite)
    }

    pub fn tick(&mut self, period: Duration) -> TickOutcome {
        if !self.should_tick() {
            return TickOutcome::Idle;
        }

        let duration = self.duration();
        self.elapsed = self.elapsed.saturating_add(period);
        if self.elapsed >= duration {
            self.elapsed = duration;
            self.is_playing = false;
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced
        }
    }

    // ========================================================================
    // Queue editing
    // ========================================================================

    /// Move the item at `from` so that it lands before the item currently at
    /// `to` (`to == len` appends). The now-playing item keeps its identity.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), QueueError> {
        let len = self.queue.len();
        if from >= len {
            return Err(QueueError::IndexOutOfRange { index: from, len });
        }
        if to > len {
            return Err(QueueError::IndexOutOfRange { index: to, len });
        }

        let current_id = self.current_item().map(|item| item.id.clone());

        let item = self.queue.remove(from);
        let destination = if to > from { to - 1 } else { to };
        self.queue.insert(destination, item);

        if let Some(id) = current_id {
            let resolved = self.queue.iter().position(|item| item.id == id);
            if resolved.is_none() {
                tracing::warn!(track_id = %id, "Current item lost after reorder, falling back to index 0");
            }
            self.current_index = Some(resolved.unwrap_or(0));
        }

        tracing::debug!(from, to = destination, current_index = ?self.current_index, "Queue reordered");
        Ok(())
    }

    /// Remove a queued item that is not playing and return it
    pub fn remove_item(&mut self, index: usize) -> Result<PlayableItem, QueueError> {
        let len = self.queue.len();
        if index >= len {
            return Err(QueueError::IndexOutOfRange { index, len });
        }
        if self.current_index == Some(index) {
            return Err(QueueError::CannotRemoveCurrent);
        }

        let removed = self.queue.remove(index);
        if let Some(current) = self.current_index {
            if index < current {
                self.current_index = Some(current - 1);
            }
        }

        tracing::debug!(index, track_id = %removed.id, current_index = ?self.current_index, "Removed item from queue");
        Ok(removed)
    }

    /// Install a new queue, paused at its first item
    pub fn replace_queue(&mut self, items: Vec<PlayableItem>) {
        warn_on_duplicate_ids(&items);
        self.queue = items;
        self.current_index = if self.queue.is_empty() { None } else { Some(0) };
        self.is_playing = false;
        self.is_scrubbing = false;
        self.elapsed = Duration::ZERO;
        self.is_favorite = false;
        self.album = None;
    }

    /// Install a new queue and start playing at `start_index`
    pub fn start_queue_at(&mut self, items: Vec<PlayableItem>, start_index: usize) -> Result<(), QueueError> {
        if items.is_empty() {
            return Err(QueueError::EmptyQueue);
        }
        if start_index >= items.len() {
            return Err(QueueError::IndexOutOfRange {
                index: start_index,
                len: items.len(),
            });
        }

        self.replace_queue(items);
        self.select(start_index, true);
        Ok(())
    }

    /// Queue up `album`'s songs, play from `start_index` and remember the album
    pub fn play_album(&mut self, album: &Album, start_index: usize) -> Result<(), QueueError> {
        self.start_queue_at(album.songs.clone(), start_index)?;
        self.album = Some(album.album_ref());
        Ok(())
    }

    fn select(&mut self, index: usize, autoplay: bool) {
        self.current_index = Some(index);
        self.elapsed = Duration::ZERO;
        // Favourite status is scoped to whichever item is current
        self.is_favorite = false;
        if autoplay {
            self.is_playing = true;
        }
        if self.is_finished() {
            self.is_playing = false;
        }
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) }
}

fn warn_on_duplicate_ids(items: &[PlayableItem]) {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(&item.id) {
            tracing::warn!(track_id = %item.id, "Queue contains duplicate ids, lookups resolve to the first match");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrackId;

    fn item(id: &str, secs: u64) -> PlayableItem {
        PlayableItem::new(id, id.to_uppercase(), "Artist", Duration::from_secs(secs))
    }

    fn abc() -> PlaybackSession {
        PlaybackSession::new(vec![item("a", 10), item("b", 20), item("c", 15)], 0.6)
    }

    fn current_id(session: &PlaybackSession) -> &str {
        session.current_item().unwrap().id.as_str()
    }

    #[test]
    fn new_session_is_paused_at_first_item() {
        let session = abc();
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.transport_state(), TransportState::Paused);
        assert!(session.can_go_next());
        assert!(!session.can_go_previous());
    }

    #[test]
    fn empty_session_is_idle_and_ignores_transport() {
        let mut session = PlaybackSession::new(Vec::new(), 0.6);
        assert_eq!(session.transport_state(), TransportState::Idle);
        assert!(!session.play());
        assert!(!session.toggle_play_pause());
        assert!(!session.next(true));
        assert_eq!(session.previous(true, Duration::from_secs(3)), PreviousAction::Ignored);
        assert_eq!(session.seek(0.5), None);
        assert_eq!(session.toggle_favorite(), None);
        assert_eq!(session.tick(Duration::from_millis(100)), TickOutcome::Idle);
    }

    #[test]
    fn reorder_keeps_current_identity_for_every_move() {
        for current in 0..4 {
            for from in 0..4 {
                for to in 0..=4 {
                    let mut session = PlaybackSession::new(
                        vec![item("a", 10), item("b", 20), item("c", 15), item("d", 30)],
                        0.6,
                    );
                    session.current_index = Some(current);
                    let before = current_id(&session).to_string();

                    session.move_item(from, to).unwrap();

                    assert_eq!(current_id(&session), before, "current={current} from={from} to={to}");
                    assert_eq!(session.queue().len(), 4);
                }
            }
        }
    }

    #[test]
    fn move_uses_insert_before_semantics() {
        let mut session = abc();
        session.move_item(0, 3).unwrap();
        let order: Vec<_> = session.queue().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, ["b", "c", "a"]);
        assert_eq!(session.current_index(), Some(2));
    }

    #[test]
    fn move_rejects_out_of_range_indices() {
        let mut session = abc();
        assert_eq!(
            session.move_item(3, 0),
            Err(QueueError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            session.move_item(0, 4),
            Err(QueueError::IndexOutOfRange { index: 4, len: 3 })
        );
        assert_eq!(current_id(&session), "a");
    }

    #[test]
    fn duplicate_ids_resolve_to_first_match() {
        let mut session = PlaybackSession::new(vec![item("a", 10), item("x", 20), item("x", 30)], 0.6);
        session.current_index = Some(2);
        session.move_item(0, 3).unwrap();
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.current_item().unwrap().id, TrackId::new("x"));
    }

    #[test]
    fn removal_before_current_shifts_index() {
        let mut session = abc();
        session.current_index = Some(2);
        let removed = session.remove_item(0).unwrap();
        assert_eq!(removed.id.as_str(), "a");
        assert_eq!(session.current_index(), Some(1));
        assert_eq!(current_id(&session), "c");
    }

    #[test]
    fn removal_after_current_keeps_index() {
        let mut session = abc();
        session.current_index = Some(1);
        session.remove_item(2).unwrap();
        assert_eq!(session.current_index(), Some(1));
        assert_eq!(current_id(&session), "b");
    }

    #[test]
    fn removing_current_is_refused() {
        let mut session = abc();
        session.current_index = Some(1);
        assert_eq!(session.remove_item(1), Err(QueueError::CannotRemoveCurrent));
        assert_eq!(session.queue().len(), 3);
        assert_eq!(session.current_index(), Some(1));
        assert_eq!(
            session.remove_item(7),
            Err(QueueError::IndexOutOfRange { index: 7, len: 3 })
        );
    }

    #[test]
    fn ticking_past_duration_clamps_and_stops() {
        let mut session = abc();
        assert!(session.play());

        let mut finished = false;
        for _ in 0..150 {
            if session.tick(Duration::from_millis(100)) == TickOutcome::Finished {
                finished = true;
                break;
            }
        }

        assert!(finished);
        assert_eq!(session.elapsed(), Duration::from_secs(10));
        assert!(!session.is_playing());
        assert_eq!(session.tick(Duration::from_millis(100)), TickOutcome::Idle);
        assert_eq!(session.elapsed(), Duration::from_secs(10));
    }

    #[test]
    fn uneven_period_still_lands_exactly_on_duration() {
        let mut session = abc();
        session.play();
        session.seek(0.99);
        assert_eq!(session.tick(Duration::from_millis(700)), TickOutcome::Finished);
        assert_eq!(session.elapsed(), Duration::from_secs(10));
    }

    #[test]
    fn finished_track_refuses_play_until_rewound() {
        let mut session = abc();
        session.seek(1.0);
        assert!(session.is_finished());
        assert!(!session.play());

        assert_eq!(session.previous(false, Duration::from_secs(3)), PreviousAction::Restarted);
        assert!(session.play());
    }

    #[test]
    fn volume_is_clamped() {
        let mut session = abc();
        assert_eq!(session.set_volume(-0.5), 0.0);
        assert_eq!(session.set_volume(1.7), 1.0);
        assert_eq!(session.set_volume(f32::NAN), 0.0);
        assert_eq!(session.set_volume(0.4), 0.4);
    }

    #[test]
    fn previous_restarts_after_threshold() {
        let mut session = abc();
        session.current_index = Some(1);
        session.elapsed = Duration::from_secs(5);

        assert_eq!(session.previous(false, Duration::from_secs(3)), PreviousAction::Restarted);
        assert_eq!(session.current_index(), Some(1));
        assert_eq!(session.elapsed(), Duration::ZERO);
    }

    #[test]
    fn previous_steps_back_within_threshold() {
        let mut session = abc();
        session.current_index = Some(1);
        session.elapsed = Duration::from_secs(1);

        assert_eq!(session.previous(false, Duration::from_secs(3)), PreviousAction::SteppedBack);
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.elapsed(), Duration::ZERO);
    }

    #[test]
    fn previous_at_exact_threshold_steps_back() {
        let mut session = abc();
        session.current_index = Some(2);
        session.elapsed = Duration::from_secs(3);
        assert_eq!(session.previous(false, Duration::from_secs(3)), PreviousAction::SteppedBack);
    }

    #[test]
    fn previous_at_start_of_first_track_is_ignored() {
        let mut session = abc();
        session.elapsed = Duration::from_secs(2);
        assert_eq!(session.previous(false, Duration::from_secs(3)), PreviousAction::Ignored);
        assert_eq!(session.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn next_stops_at_end_and_resets_track_state() {
        let mut session = abc();
        session.elapsed = Duration::from_secs(4);
        session.toggle_favorite();

        assert!(session.next(false));
        assert_eq!(session.current_index(), Some(1));
        assert_eq!(session.elapsed(), Duration::ZERO);
        assert!(!session.is_favorite());
        assert!(!session.is_playing());

        assert!(session.next(true));
        assert!(session.is_playing());
        assert!(!session.next(true));
        assert_eq!(session.current_index(), Some(2));
    }

    #[test]
    fn seek_sets_fraction_of_duration() {
        let mut session = abc();
        session.current_index = Some(1);
        assert_eq!(session.seek(0.25), Some(Duration::from_secs(5)));
        assert_eq!(session.seek(-3.0), Some(Duration::ZERO));
        assert_eq!(session.seek(9.0), Some(Duration::from_secs(20)));
    }

    #[test]
    fn scrubbing_suspends_ticks_but_keeps_playing_flag() {
        let mut session = abc();
        session.play();
        assert!(session.set_scrubbing(true));
        assert_eq!(session.tick(Duration::from_millis(100)), TickOutcome::Idle);
        assert!(session.is_playing());
        assert!(!session.set_scrubbing(true));
        assert!(session.set_scrubbing(false));
        assert_eq!(session.tick(Duration::from_millis(100)), TickOutcome::Advanced);
    }

    #[test]
    fn advance_after_finish_only_when_finished() {
        let mut session = abc();
        session.play();
        assert!(!session.advance_after_finish());

        session.seek(1.0);
        assert!(session.advance_after_finish());
        assert_eq!(session.current_index(), Some(1));
        assert!(session.is_playing());
    }

    #[test]
    fn start_queue_at_validates_before_replacing() {
        let mut session = abc();
        assert_eq!(session.start_queue_at(Vec::new(), 0), Err(QueueError::EmptyQueue));
        assert_eq!(
            session.start_queue_at(vec![item("z", 5)], 1),
            Err(QueueError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(session.queue().len(), 3);

        session.start_queue_at(vec![item("y", 5), item("z", 5)], 1).unwrap();
        assert_eq!(current_id(&session), "z");
        assert!(session.is_playing());
    }

    #[test]
    fn album_context_lasts_until_queue_is_replaced() {
        let album = Album {
            id: "link".to_string(),
            title: "LINK".to_string(),
            artist: "Hoàng Thuỳ Linh".to_string(),
            cover_art: "htl-album".to_string(),
            release_year: 2022,
            songs: vec![item("x", 30), item("y", 40), item("z", 20)],
        };
        let mut session = abc();
        assert_eq!(session.current_album(), None);

        assert_eq!(session.play_album(&album, 3), Err(QueueError::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(session.current_album(), None);

        session.play_album(&album, 1).unwrap();
        assert_eq!(session.current_album().map(|a| a.name.as_str()), Some("LINK"));

        session.next(false);
        session.move_item(0, 3).unwrap();
        assert_eq!(session.snapshot(1).current_album, Some(album.album_ref()));

        session.replace_queue(vec![item("q", 5)]);
        assert_eq!(session.current_album(), None);
        assert_eq!(session.snapshot(2).current_album, None);
    }

    #[test]
    fn end_to_end_reorder_and_remove() {
        let mut session = abc();
        session.current_index = Some(1);

        session.move_item(1, 0).unwrap();
        let order: Vec<_> = session.queue().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, ["b", "a", "c"]);
        assert_eq!(session.current_index(), Some(0));

        session.remove_item(2).unwrap();
        assert_eq!(session.queue().len(), 2);
        assert_eq!(session.current_index(), Some(0));

        assert_eq!(session.remove_item(0), Err(QueueError::CannotRemoveCurrent));
        assert_eq!(session.queue().len(), 2);
        assert_eq!(current_id(&session), "b");
    }

    #[test]
    fn lyrics_follow_current_item() {
        let mut session = PlaybackSession::new(
            vec![item("a", 10).with_lyrics("la la"), item("b", 10)],
            0.6,
        );
        assert_eq!(session.current_lyrics(), Some("la la"));
        session.next(false);
        assert_eq!(session.current_lyrics(), None);
    }
}
