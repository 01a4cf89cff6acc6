//! Async runtime.
//!
//! Event loop that drives terminal I/O and coordinates between the input
//! line, the [`Bridge`], and the TCP transport. Uses `tokio::select!` to
//! handle terminal events, server envelopes, and refresh ticks on a single
//! task, so the bridge is never touched concurrently.

use std::io::{self, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::sync::mpsc;
use whisperline_app::{AppEvent, Bridge, LobbyRefresher, RefreshTick};
use whisperline_client::{
    ClientState, Intent,
    transport::{self, Connection, TransportEvent},
};

use crate::{
    input::{InputState, KeyInput, UiAction},
    ui,
    view::View,
};

/// Depth of the refresh-tick channel. Ticks are periodic and cheap to drop.
const REFRESH_CHANNEL_DEPTH: usize = 4;

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// I/O error from terminal operations.
    #[error("terminal i/o error: {0}")]
    Io(#[from] io::Error),
}

/// One completed wait of the event loop.
///
/// The select arms only produce a `Step`; all mutation happens afterwards,
/// once the connection borrow is released.
enum Step {
    Terminal(Option<Result<Event, io::Error>>),
    Transport(Option<TransportEvent>),
    Refresh(Option<RefreshTick>),
}

/// Async runtime for the TUI.
///
/// Manages terminal setup/teardown and the main event loop. The session
/// lives behind the bridge; this type only moves events between channels,
/// the bridge, and the screen.
pub struct Runtime {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    bridge: Bridge,
    view: View,
    line: InputState,
    connection: Option<Connection>,
    refresher: LobbyRefresher,
    refresh_tx: mpsc::Sender<RefreshTick>,
    refresh_rx: mpsc::Receiver<RefreshTick>,
    server_addr: String,
    help_visible: bool,
}

impl Runtime {
    /// Set up the terminal and create a runtime targeting `server_addr`.
    pub fn new(server_addr: String) -> Result<Self, RuntimeError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let (refresh_tx, refresh_rx) = mpsc::channel(REFRESH_CHANNEL_DEPTH);

        Ok(Self {
            terminal,
            bridge: Bridge::new(),
            view: View::default(),
            line: InputState::new(),
            connection: None,
            refresher: LobbyRefresher::new(),
            refresh_tx,
            refresh_rx,
            server_addr,
            help_visible: false,
        })
    }

    /// Run the main event loop until the user quits or stdin closes.
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        self.connect().await;
        self.render()?;

        let mut event_stream = EventStream::new();

        loop {
            let step = if let Some(conn) = self.connection.as_mut() {
                tokio::select! {
                    maybe_event = event_stream.next() => Step::Terminal(maybe_event),
                    event = conn.from_server.recv() => Step::Transport(event),
                    tick = self.refresh_rx.recv() => Step::Refresh(tick),
                }
            } else {
                tokio::select! {
                    maybe_event = event_stream.next() => Step::Terminal(maybe_event),
                    tick = self.refresh_rx.recv() => Step::Refresh(tick),
                }
            };

            let should_quit = match step {
                Step::Terminal(maybe_event) => match maybe_event {
                    Some(Ok(event)) => self.handle_terminal_event(event).await?,
                    Some(Err(e)) => return Err(RuntimeError::Io(e)),
                    None => true,
                },
                Step::Transport(event) => {
                    self.handle_transport_event(event).await?;
                    false
                },
                Step::Refresh(Some(RefreshTick)) => {
                    self.handle_refresh_tick().await?;
                    false
                },
                Step::Refresh(None) => false,
            };

            if should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle a terminal event and return whether to quit.
    async fn handle_terminal_event(&mut self, event: Event) -> Result<bool, RuntimeError> {
        let key = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char(c) => KeyInput::Char(c),
                KeyCode::Enter => KeyInput::Enter,
                KeyCode::Backspace => KeyInput::Backspace,
                KeyCode::Delete => KeyInput::Delete,
                KeyCode::Esc => KeyInput::Esc,
                KeyCode::Left => KeyInput::Left,
                KeyCode::Right => KeyInput::Right,
                KeyCode::Home => KeyInput::Home,
                KeyCode::End => KeyInput::End,
                _ => return Ok(false),
            },
            Event::Resize(_, _) => {
                self.render()?;
                return Ok(false);
            },
            _ => return Ok(false),
        };

        // Any submit dismisses the help overlay.
        if key == KeyInput::Enter {
            self.help_visible = false;
        }

        let actions = self.line.handle_key(key);
        self.process_ui_actions(actions).await
    }

    /// Execute the actions the input line produced. Returns true on quit.
    async fn process_ui_actions(&mut self, actions: Vec<UiAction>) -> Result<bool, RuntimeError> {
        for action in actions {
            match action {
                UiAction::Redraw => self.render()?,
                UiAction::Quit => return Ok(true),
                UiAction::ShowHelp => {
                    self.help_visible = true;
                    self.render()?;
                },
                UiAction::Status(message) => {
                    self.view.status = Some(message);
                    self.render()?;
                },
                UiAction::Connect => {
                    self.connect().await;
                    self.render()?;
                },
                UiAction::Intent(intent) => {
                    self.handle_intent(intent).await?;
                },
            }
        }
        Ok(false)
    }

    /// Run one user intent through the bridge and flush its commands.
    async fn handle_intent(&mut self, intent: Intent) -> Result<(), RuntimeError> {
        if self.connection.is_none() {
            self.view.status = Some("not connected; /connect first".to_string());
            self.render()?;
            return Ok(());
        }

        let events = self.bridge.process_intent(intent);
        self.flush_outgoing().await;
        self.apply_events(events);
        self.sync_refresher();
        self.render()
    }

    /// Handle one transport event (or the transport channel closing).
    async fn handle_transport_event(
        &mut self,
        event: Option<TransportEvent>,
    ) -> Result<(), RuntimeError> {
        match event {
            Some(TransportEvent::Envelope(envelope)) => {
                let events = self.bridge.handle_envelope(envelope);
                self.flush_outgoing().await;
                self.apply_events(events);
                self.sync_refresher();
                self.render()
            },
            // Closed covers both the explicit event and the channel going
            // away with the transport tasks.
            Some(TransportEvent::Closed) | None => {
                self.connection = None;
                self.refresher.cancel();
                let events = self.bridge.handle_closed();
                self.apply_events(events);
                self.render()
            },
        }
    }

    /// A refresh tick elapsed; re-list lobbies if still at home.
    async fn handle_refresh_tick(&mut self) -> Result<(), RuntimeError> {
        if self.bridge.snapshot().state != ClientState::Home {
            // The timer is cancelled on leaving Home, but a tick already in
            // the channel can still arrive afterwards.
            return Ok(());
        }

        let events = self.bridge.process_intent(Intent::ListLobbies);
        self.flush_outgoing().await;
        self.apply_events(events);
        self.render()
    }

    /// Connect to the server. Idempotent: a live connection is kept.
    async fn connect(&mut self) {
        if self.connection.is_some() {
            self.view.status = Some("already connected".to_string());
            return;
        }

        match transport::connect(&self.server_addr).await {
            Ok(conn) => {
                self.connection = Some(conn);
                self.view.connected = true;
                self.view.status = Some(format!("connected to {}", self.server_addr));
                self.sync_refresher();
            },
            Err(e) => {
                tracing::warn!(addr = %self.server_addr, error = %e, "connect failed");
                self.view.connected = false;
                self.view.status = Some(format!("connect failed: {e}"));
            },
        }
    }

    /// Send all pending outgoing commands to the server.
    async fn flush_outgoing(&mut self) {
        let commands = self.bridge.take_outgoing();
        if commands.is_empty() {
            return;
        }

        let Some(conn) = &self.connection else {
            tracing::warn!(count = commands.len(), "dropping commands: no connection");
            return;
        };

        for command in commands {
            if conn.to_server.send(command).await.is_err() {
                // The write task is gone; the Closed event will follow.
                tracing::warn!("command channel closed while flushing");
                break;
            }
        }
    }

    /// Fold bridge events into the render model.
    fn apply_events(&mut self, events: Vec<AppEvent>) {
        for event in events {
            self.view.apply(event);
        }
    }

    /// Keep the refresh timer in lockstep with the session: running at Home
    /// while connected, stopped everywhere else.
    fn sync_refresher(&mut self) {
        let at_home = self.connection.is_some()
            && self.bridge.snapshot().state == ClientState::Home;
        if at_home {
            self.refresher.start(self.refresh_tx.clone());
        } else {
            self.refresher.cancel();
        }
    }

    /// Render the UI.
    fn render(&mut self) -> Result<(), RuntimeError> {
        self.terminal.draw(|frame| {
            ui::render(frame, &self.view, &self.line, self.help_visible);
        })?;
        Ok(())
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        // Connection and refresher tasks stop via their own Drop impls.
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
