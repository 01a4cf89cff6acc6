//! Lobby, match, and result views.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::View;

/// Render the pre-match lobby view (hosting or joined).
pub fn render_lobby(frame: &mut Frame, view: &View, area: Rect) {
    let Some(lobby) = view.snapshot.current_lobby.as_ref() else {
        // State and lobby are kept in lockstep by the session; nothing
        // sensible to draw if they ever diverge.
        return;
    };

    let (title, hint) = if lobby.is_host {
        (" Your lobby ", "/start <0|1> to begin, /leave to close it")
    } else {
        (" Lobby ", "waiting for the host to start; /leave to go back")
    };

    let items = vec![
        ListItem::new(Line::from(vec![
            Span::raw("id: "),
            Span::styled(lobby.id.clone(), Style::default().fg(Color::Yellow)),
        ])),
        ListItem::new(""),
        ListItem::new(hint),
    ];

    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(List::new(items).block(block), area);
}

/// Render the waiting view while another player holds the turn.
pub fn render_waiting(frame: &mut Frame, view: &View, area: Rect) {
    let phrase = view
        .snapshot
        .turn
        .as_ref()
        .map_or(String::new(), |turn| turn.current_phrase.clone());

    let mut lines = vec![Line::from(Span::styled(
        "Another player is writing...",
        Style::default().fg(Color::DarkGray),
    ))];
    if !phrase.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("so far: {phrase}")));
    }

    let block = Block::default().borders(Borders::ALL).title(" Match ");
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
}

/// Render the phrase prompt while this client holds the turn.
pub fn render_prompt(frame: &mut Frame, view: &View, area: Rect) {
    let current = view
        .snapshot
        .turn
        .as_ref()
        .map_or(String::new(), |turn| turn.current_phrase.clone());

    let mut lines = vec![Line::from(Span::styled(
        "Your turn!",
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::from(""));
    if current.is_empty() {
        lines.push(Line::from("You open the story. Type the first phrase and press Enter."));
    } else {
        lines.push(Line::from(format!("continue: {current}")));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("phrases are at most {} characters", whisperline_proto::MAX_PHRASE_LEN),
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default().borders(Borders::ALL).title(" Match ");
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
}

/// Render the finished story.
pub fn render_story(frame: &mut Frame, view: &View, area: Rect) {
    let mut items: Vec<ListItem> =
        view.story.iter().map(|line| ListItem::new(line.clone())).collect();
    items.push(ListItem::new(""));
    items.push(ListItem::new(Span::styled(
        "/leave to return home",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default().borders(Borders::ALL).title(" The story ");
    frame.render_widget(List::new(items).block(block), area);
}
