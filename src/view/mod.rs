//! View module - UI rendering
//!
//! Renders a `PlaybackSnapshot` with ratatui. Nothing here touches the
//! controller; the screen is a pure function of the snapshot and `UiState`.
//!
//! - `utils`: Shared formatting and layout helpers
//! - `queue`: Queue list and lyrics panel
//! - `progress`: Progress bar with now-playing info
//! - `overlays`: Status notification and help popup

mod utils;
mod queue;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use now_playing::PlaybackSnapshot;
use crate::input::UiState;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, playback: &PlaybackSnapshot, ui_state: &UiState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Queue (and lyrics)
                Constraint::Length(3), // Progress bar with playback info
            ])
            .split(frame.area());

        if ui_state.show_lyrics {
            let main_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[0]);
            queue::render_queue(frame, main_chunks[0], playback, ui_state);
            queue::render_lyrics(frame, main_chunks[1], playback);
        } else {
            queue::render_queue(frame, chunks[0], playback, ui_state);
        }

        progress::render_progress_bar(frame, chunks[1], playback);

        if ui_state.status.is_some() {
            overlays::render_status_notification(frame, chunks[0], ui_state);
        }

        if ui_state.show_help {
            overlays::render_help_popup(frame);
        }
    }
}
