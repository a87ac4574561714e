//! Progress timer task
//!
//! One task per running timer. It holds only a weak reference to the
//! controller state, so a dropped controller ends it at the next tick even if
//! the abort from `Drop` has not been observed yet.

use std::sync::Weak;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::model::TickOutcome;
use super::{ControllerInner, PlaybackEvent};

pub(super) async fn run(inner: Weak<Mutex<ControllerInner>>, period: Duration, generation: u64) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::trace!(generation, "Progress timer started");

    loop {
        interval.tick().await;

        let Some(inner) = inner.upgrade() else {
            tracing::trace!(generation, "Controller gone, progress timer exiting");
            break;
        };
        let mut guard = inner.lock().await;

        // A newer timer has replaced this one
        if guard.ticker_generation != generation {
            break;
        }
        if !guard.on_tick(period) {
            break;
        }
    }
}

impl ControllerInner {
    /// Apply one timer period. Returns false once this timer should stop.
    fn on_tick(&mut self, period: Duration) -> bool {
        match self.session.tick(period) {
            TickOutcome::Advanced => {
                self.publish();
                true
            }
            TickOutcome::Finished => {
                // Forget our own handle without aborting it; we are about to return
                self.ticker.take();

                if let Some(item) = self.session.current_item() {
                    tracing::info!(track = %item.title, "Track finished");
                    self.emit(PlaybackEvent::TrackFinished {
                        track_id: item.id.clone(),
                    });
                }
                self.emit(PlaybackEvent::TransportChanged { is_playing: false });

                if self.config.auto_advance && self.session.advance_after_finish() {
                    self.emit_track_changed();
                    self.emit_transport_if_changed(false);
                    self.restart_ticker();
                }

                self.publish();
                false
            }
            TickOutcome::Idle => {
                self.ticker.take();
                false
            }
        }
    }
}
