//! Queue list and lyrics panel rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use now_playing::PlaybackSnapshot;
use crate::input::UiState;
use super::utils::{format_duration, truncate_string};

pub fn render_queue(frame: &mut Frame, area: Rect, playback: &PlaybackSnapshot, ui_state: &UiState) {
    // borders (2) + marker (3) + separators (6) + duration (5)
    let content_width = area.width.saturating_sub(16) as usize;
    let title_width = content_width * 55 / 100;
    let artist_width = content_width.saturating_sub(title_width);

    let items: Vec<ListItem> = playback
        .queue
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let is_current = playback.is_current(i);
            let marker = if is_current { " ▶ " } else { "   " };
            let text = format!(
                "{}{}   {}   {}",
                marker,
                truncate_string(&item.title, title_width),
                truncate_string(&item.artist, artist_width),
                format_duration(item.duration)
            );

            let style = if i == ui_state.selected {
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let title = match &playback.current_album {
        Some(album) => format!(" Queue ({}) · {} ", playback.queue.len(), album.name),
        None => format!(" Queue ({}) ", playback.queue.len()),
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

    let mut list_state = ListState::default();
    if !playback.queue.is_empty() {
        list_state.select(Some(ui_state.selected));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn render_lyrics(frame: &mut Frame, area: Rect, playback: &PlaybackSnapshot) {
    let text = playback.lyrics().unwrap_or("No lyrics for this track");
    let lyrics = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Lyrics "));
    frame.render_widget(lyrics, area);
}
