//! Input line state and key handling.
//!
//! Owns the text buffer and cursor; command parsing happens on Enter. Keys
//! translate into [`UiAction`]s for the runtime to execute, so none of this
//! touches the bridge or the terminal directly.

use whisperline_client::Intent;

use crate::commands::{self, UserCommand};

/// Keyboard input, decoupled from the terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter key (submit the line).
    Enter,
    /// Backspace (delete before the cursor).
    Backspace,
    /// Delete (delete at the cursor).
    Delete,
    /// Escape key (quit).
    Esc,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
}

/// What the runtime should do in response to a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Redraw the screen.
    Redraw,
    /// Exit the application.
    Quit,
    /// Forward an intent to the bridge.
    Intent(Intent),
    /// (Re)connect to the server.
    Connect,
    /// Show a status line.
    Status(String),
    /// Show the command help.
    ShowHelp,
}

/// Text buffer and cursor for the input line.
#[derive(Debug, Default)]
pub struct InputState {
    buffer: String,
    cursor: usize,
}

impl InputState {
    /// Empty input line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current buffer contents.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The slice of the buffer that fits in `width` columns with the
    /// cursor kept in view, plus the cursor's column inside that slice.
    ///
    /// When the line outgrows the widget the text scrolls left rather than
    /// the cursor clamping, so the tail of a long phrase stays editable.
    pub fn viewport(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        // The last column stays free for the cursor to sit past the end.
        let start = self.cursor.saturating_sub(width - 1);
        let visible = self.buffer.chars().skip(start).take(width).collect();
        (visible, self.cursor - start)
    }

    /// Handle one key.
    pub fn handle_key(&mut self, key: KeyInput) -> Vec<UiAction> {
        match key {
            KeyInput::Char(c) => {
                self.buffer.insert(self.byte_cursor(), c);
                self.cursor += 1;
                vec![UiAction::Redraw]
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.buffer.remove(self.byte_cursor());
                }
                vec![UiAction::Redraw]
            },
            KeyInput::Delete => {
                if self.cursor < self.buffer.chars().count() {
                    self.buffer.remove(self.byte_cursor());
                }
                vec![UiAction::Redraw]
            },
            KeyInput::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![UiAction::Redraw]
            },
            KeyInput::Right => {
                if self.cursor < self.buffer.chars().count() {
                    self.cursor += 1;
                }
                vec![UiAction::Redraw]
            },
            KeyInput::Home => {
                self.cursor = 0;
                vec![UiAction::Redraw]
            },
            KeyInput::End => {
                self.cursor = self.buffer.chars().count();
                vec![UiAction::Redraw]
            },
            KeyInput::Enter => self.handle_enter(),
            KeyInput::Esc => vec![UiAction::Quit],
        }
    }

    /// Byte offset of the character cursor.
    fn byte_cursor(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map_or(self.buffer.len(), |(offset, _)| offset)
    }

    fn handle_enter(&mut self) -> Vec<UiAction> {
        let text = std::mem::take(&mut self.buffer);
        self.cursor = 0;

        if text.trim().is_empty() {
            return vec![UiAction::Redraw];
        }

        let action = match commands::parse(&text) {
            UserCommand::Intent(intent) => UiAction::Intent(intent),
            UserCommand::Connect => UiAction::Connect,
            UserCommand::Quit => UiAction::Quit,
            UserCommand::Help => UiAction::ShowHelp,
            UserCommand::Unknown { input } => {
                UiAction::Status(format!("unknown command: {input}"))
            },
            UserCommand::InvalidArgs { command, error } => {
                UiAction::Status(format!("/{command}: {error}"))
            },
        };
        vec![action, UiAction::Redraw]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_moves_the_cursor() {
        let mut input = InputState::new();
        input.handle_key(KeyInput::Char('h'));
        input.handle_key(KeyInput::Char('i'));

        assert_eq!(input.buffer(), "hi");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn backspace_deletes_before_the_cursor() {
        let mut input = InputState::new();
        input.handle_key(KeyInput::Char('a'));
        input.handle_key(KeyInput::Char('b'));
        input.handle_key(KeyInput::Left);
        input.handle_key(KeyInput::Backspace);

        assert_eq!(input.buffer(), "b");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn enter_submits_and_clears() {
        let mut input = InputState::new();
        for c in "/quit".chars() {
            input.handle_key(KeyInput::Char(c));
        }

        let actions = input.handle_key(KeyInput::Enter);

        assert!(actions.contains(&UiAction::Quit));
        assert!(input.buffer().is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn enter_on_empty_line_does_nothing() {
        let mut input = InputState::new();
        let actions = input.handle_key(KeyInput::Enter);
        assert_eq!(actions, vec![UiAction::Redraw]);
    }

    #[test]
    fn short_lines_render_unscrolled() {
        let mut input = InputState::new();
        for c in "hello".chars() {
            input.handle_key(KeyInput::Char(c));
        }

        assert_eq!(input.viewport(20), ("hello".into(), 5));
    }

    #[test]
    fn long_lines_scroll_to_keep_the_cursor_in_view() {
        let mut input = InputState::new();
        for c in "abcdefghij".chars() {
            input.handle_key(KeyInput::Char(c));
        }

        // Cursor at the end of a 10-char line in a 4-column viewport:
        // the last 3 chars show and the cursor sits in the free column.
        assert_eq!(input.viewport(4), ("hij".into(), 3));

        input.handle_key(KeyInput::Home);
        assert_eq!(input.viewport(4), ("abcd".into(), 0));
    }

    #[test]
    fn zero_width_viewport_is_empty() {
        let mut input = InputState::new();
        input.handle_key(KeyInput::Char('a'));

        assert_eq!(input.viewport(0), (String::new(), 0));
    }

    #[test]
    fn multibyte_input_is_safe() {
        let mut input = InputState::new();
        input.handle_key(KeyInput::Char('é'));
        input.handle_key(KeyInput::Char('x'));
        input.handle_key(KeyInput::Home);
        input.handle_key(KeyInput::Delete);

        assert_eq!(input.buffer(), "x");
    }
}
