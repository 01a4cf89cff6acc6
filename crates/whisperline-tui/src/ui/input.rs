//! Input line.
//!
//! A thin shell around [`InputState::viewport`]: the state decides which
//! slice of the buffer shows and where the cursor sits, this widget only
//! draws the result and parks the terminal cursor on it.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::InputState;

const PROMPT: &str = "> ";

/// Render the input line, scrolling long text to keep the cursor in view.
pub fn render(frame: &mut Frame, line: &InputState, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);

    let prompt_width = PROMPT.chars().count() as u16;
    let text_width = inner.width.saturating_sub(prompt_width);
    let (visible, column) = line.viewport(text_width as usize);

    let content = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(Color::Cyan)),
        Span::raw(visible),
    ]);
    frame.render_widget(Paragraph::new(content).block(block), area);

    // viewport keeps the column within text_width, so this never leaves
    // the inner area.
    frame.set_cursor_position((inner.x + prompt_width + column as u16, inner.y));
}
