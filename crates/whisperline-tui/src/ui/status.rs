//! Status bar.
//!
//! Connection state, logged-in account, and the last status or error line.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::View;

/// Render the status bar.
pub fn render(frame: &mut Frame, view: &View, area: Rect) {
    let connection = if view.connected {
        Span::styled("Connected", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("Disconnected", Style::default().fg(Color::Red))
    };

    let account = view.snapshot.username.as_ref().map_or_else(String::new, |name| {
        format!(" | {name}")
    });

    let message = view
        .status
        .as_ref()
        .map_or_else(String::new, |status| format!(" | {status}"));

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection,
        Span::styled(account, Style::default().fg(Color::White)),
        Span::styled(message, Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
