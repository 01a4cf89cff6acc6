//! Home screen lobby table.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::View;

/// Render the lobby listing.
pub fn render(frame: &mut Frame, view: &View, area: Rect) {
    const ID_WIDTH: u16 = 36;
    const HOST_WIDTH: u16 = 16;
    const PLAYERS_WIDTH: u16 = 9;

    let header = Row::new([Cell::from("Lobby"), Cell::from("Host"), Cell::from("Players")])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = view
        .snapshot
        .lobbies
        .iter()
        .map(|lobby| {
            Row::new([
                Cell::from(lobby.id.clone()),
                Cell::from(lobby.host.clone()),
                Cell::from(format!("{}/{}", lobby.current_players, lobby.max_players)),
            ])
        })
        .collect();

    let title = if rows.is_empty() {
        " Lobbies (none open; /create to host one) "
    } else {
        " Lobbies (/join <id> or /create) "
    };

    let table = Table::new(rows, [
        Constraint::Length(ID_WIDTH),
        Constraint::Length(HOST_WIDTH),
        Constraint::Length(PLAYERS_WIDTH),
    ])
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}
