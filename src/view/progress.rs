//! Progress bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use now_playing::PlaybackSnapshot;
use super::utils::format_duration;

pub fn render_progress_bar(frame: &mut Frame, area: Rect, playback: &PlaybackSnapshot) {
    let status_text = match &playback.current_item {
        None => " Queue is empty".to_string(),
        Some(item) => {
            let icon = if playback.is_playing { "▶" } else { "⏸" };
            let favorite = if playback.is_favorite { " ♥" } else { "" };
            format!("{} {} | {} ({}){}", icon, item.title, item.artist, item.album.name, favorite)
        }
    };

    let scrubbing = if playback.is_scrubbing { "Scrubbing | " } else { "" };
    let controls_info = format!(
        " {}Vol: {}% ",
        scrubbing,
        (playback.volume * 100.0).round() as u8
    );

    let time_str = format!(
        "{} / {} (-{})",
        format_duration(playback.elapsed),
        format_duration(playback.duration),
        format_duration(playback.remaining())
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ", status_text))
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(playback.progress.clamp(0.0, 1.0))
        .label(time_str);

    frame.render_widget(gauge, area);
}
