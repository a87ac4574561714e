//! Key event handling for the terminal front-end

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use now_playing::PlaybackController;

const SEEK_STEP: f64 = 0.05;
const VOLUME_STEP: f32 = 0.05;
const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

/// Screen state that belongs to the front-end, not to the playback session
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub selected: usize,
    pub show_lyrics: bool,
    pub show_help: bool,
    pub status: Option<String>,
    status_set_at: Option<Instant>,
    pub should_quit: bool,
}

impl UiState {
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.status_set_at = Some(Instant::now());
    }

    /// Returns true if a status message expired and was cleared
    pub fn auto_clear_status(&mut self) -> bool {
        if self.status_set_at.is_some_and(|at| at.elapsed() >= STATUS_TIMEOUT) {
            self.status = None;
            self.status_set_at = None;
            return true;
        }
        false
    }

    /// Keep the selection inside a queue of `len` rows
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

pub async fn handle_key_event(controller: &PlaybackController, ui: &mut UiState, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    // Help popup swallows everything except its own dismiss keys
    if ui.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
            ui.show_help = false;
        }
        return Ok(());
    }

    let snapshot = controller.snapshot();
    let queue_len = snapshot.queue.len();

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            ui.should_quit = true;
        }
        KeyCode::Char(' ') => {
            controller.toggle_play_pause().await;
        }
        KeyCode::Char('n') | KeyCode::Char('N') => {
            if !controller.next().await {
                ui.set_status("Already at the end of the queue");
            }
        }
        KeyCode::Char('p') | KeyCode::Char('P') => {
            controller.previous().await;
        }
        KeyCode::Left => {
            controller.seek((snapshot.progress - SEEK_STEP).max(0.0)).await;
        }
        KeyCode::Right => {
            controller.seek((snapshot.progress + SEEK_STEP).min(1.0)).await;
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            controller.set_volume(snapshot.volume + VOLUME_STEP).await;
        }
        KeyCode::Char('-') => {
            controller.set_volume(snapshot.volume - VOLUME_STEP).await;
        }
        KeyCode::Char('f') | KeyCode::Char('F') => {
            controller.toggle_favorite().await;
        }
        KeyCode::Up => {
            ui.selected = ui.selected.saturating_sub(1);
        }
        KeyCode::Down => {
            if ui.selected + 1 < queue_len {
                ui.selected += 1;
            }
        }
        // Move the selected row up / down
        KeyCode::Char('K') => {
            if ui.selected > 0 && controller.move_item(ui.selected, ui.selected - 1).await.is_ok() {
                ui.selected -= 1;
            }
        }
        KeyCode::Char('J') => {
            // Insert-before semantics: landing one row lower means targeting two rows down
            if ui.selected + 1 < queue_len && controller.move_item(ui.selected, ui.selected + 2).await.is_ok() {
                ui.selected += 1;
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            match controller.remove_item(ui.selected).await {
                Ok(removed) => {
                    ui.set_status(format!("Removed \"{}\"", removed.title));
                    ui.clamp_selection(queue_len - 1);
                }
                Err(e) => ui.set_status(e.to_string()),
            }
        }
        KeyCode::Char('l') | KeyCode::Char('L') => {
            ui.show_lyrics = !ui.show_lyrics;
        }
        KeyCode::Char('h') | KeyCode::Char('H') => {
            ui.show_help = true;
        }
        _ => {}
    }
    Ok(())
}
