//! Overlay rendering (status notification, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::input::UiState;
use super::utils::centered_rect;

const HELP_ENTRIES: &[(&str, &str)] = &[
    ("Space", "Play / pause"),
    ("n / p", "Next / previous (restarts after 3s)"),
    ("← / →", "Seek back / forward"),
    ("+ / -", "Volume up / down"),
    ("f", "Toggle favourite"),
    ("↑ / ↓", "Select queue row"),
    ("K / J", "Move selected row up / down"),
    ("d", "Remove selected row"),
    ("l", "Toggle lyrics"),
    ("h / Esc", "Close help"),
    ("q", "Quit"),
];

pub fn render_status_notification(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    if let Some(ref message) = ui_state.status {
        let width = (message.chars().count() as u16 + 4).clamp(20, 60);
        let popup_area = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y: area.y + 1,
            width: width.min(area.width),
            height: 3.min(area.height),
        };

        frame.render_widget(Clear, popup_area);
        let widget = Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .style(Style::default().bg(Color::Black)),
            );
        frame.render_widget(widget, popup_area);
    }
}

pub fn render_help_popup(frame: &mut Frame) {
    let popup_area = centered_rect(frame.area(), 50, HELP_ENTRIES.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = HELP_ENTRIES
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!(" {:<10}", keys), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw(*action),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Keys (h to close) ")
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(help, popup_area);
}
