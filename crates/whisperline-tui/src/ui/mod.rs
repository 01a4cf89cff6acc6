//! UI rendering.
//!
//! Rendering functions that convert the [`View`] into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! drawing into the frame.

mod game;
mod input;
mod lobbies;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem},
};
use whisperline_client::ClientState;

use crate::{InputState, View, commands};

/// Render the entire UI.
pub fn render(frame: &mut Frame, view: &View, line: &InputState, help_visible: bool) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    if help_visible {
        render_help(frame, *main_area);
    } else {
        render_main_area(frame, view, *main_area);
    }
    input::render(frame, line, *input_area);
    status::render(frame, view, *status_area);
}

/// Render whichever view the session state calls for.
fn render_main_area(frame: &mut Frame, view: &View, area: Rect) {
    match view.snapshot.state {
        ClientState::LoggedOut => render_welcome(frame, area),
        ClientState::Home => lobbies::render(frame, view, area),
        ClientState::LobbyHost | ClientState::LobbyMember => game::render_lobby(frame, view, area),
        ClientState::AwaitingTurn => game::render_waiting(frame, view, area),
        ClientState::MyTurn => game::render_prompt(frame, view, area),
        ClientState::MatchEnded => game::render_story(frame, view, area),
    }
}

/// Login screen: the command summary doubles as the welcome text.
fn render_welcome(frame: &mut Frame, area: Rect) {
    let mut items = vec![
        ListItem::new("Whisperline: a story, one phrase at a time."),
        ListItem::new(""),
    ];
    items.extend(commands::HELP.iter().map(|line| ListItem::new(*line)));

    let block = Block::default().borders(Borders::ALL).title(" Welcome ");
    frame.render_widget(List::new(items).block(block), area);
}

/// Full-screen command summary, toggled by `/help`.
fn render_help(frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = commands::HELP.iter().map(|line| ListItem::new(*line)).collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help (press Enter to dismiss) ")
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(List::new(items).block(block), area);
}
