//! Client session state machine.
//!
//! [`Session`] is the canonical client state: exactly one [`ClientState`] is
//! active at a time, and every transition is keyed by a server status code
//! or a user intent. Failure codes and unknown codes never move the state;
//! they only produce presentation effects (resilience over rejection, so
//! server protocol drift cannot kill a running session).

use whisperline_proto::{Command, Envelope, LobbySummary, ServerCode, StatusCode, TurnPrompt};

use crate::{
    error::SessionError,
    event::{Effect, Intent, SessionAction, SessionEvent, Snapshot},
};

/// Where the player sits in the login → lobby → match → result lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClientState {
    /// No authenticated account.
    #[default]
    LoggedOut,
    /// Logged in, browsing the lobby list.
    Home,
    /// Hosting a lobby that has not started.
    LobbyHost,
    /// Sitting in someone else's lobby.
    LobbyMember,
    /// Match running, another player holds the turn.
    AwaitingTurn,
    /// Match running, this client holds the turn.
    MyTurn,
    /// Match finished; the story is on screen.
    MatchEnded,
}

impl ClientState {
    /// All states, for table-driven tests.
    pub const ALL: [ClientState; 7] = [
        ClientState::LoggedOut,
        ClientState::Home,
        ClientState::LobbyHost,
        ClientState::LobbyMember,
        ClientState::AwaitingTurn,
        ClientState::MyTurn,
        ClientState::MatchEnded,
    ];
}

/// The lobby this client currently sits in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentLobby {
    /// Lobby UUID.
    pub id: String,
    /// True when this client created the lobby.
    pub is_host: bool,
}

/// Turn state, valid only while a match is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnContext {
    /// The phrase written so far.
    pub current_phrase: String,
    /// True while this client holds the turn.
    pub my_turn: bool,
}

/// Last intent awaiting a server reply.
///
/// Several legacy reply codes are not self-describing (the join ack carries
/// no lobby id), so the reply is disambiguated against the intent that
/// caused it. Consumed by the first matching reply, cleared by any failure.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingIntent {
    Login { username: String },
    JoinLobby { lobby_id: String },
}

/// The client session aggregate.
///
/// Owns every piece of client state the presentation layer renders from; no
/// module-wide globals, no sharing across threads.
#[derive(Debug, Default)]
pub struct Session {
    state: ClientState,
    username: Option<String>,
    current_lobby: Option<CurrentLobby>,
    lobbies: Vec<LobbySummary>,
    turn: Option<TurnContext>,
    pending: Option<PendingIntent>,
    last_error: Option<String>,
    unknown_codes: u64,
}

impl Session {
    /// Fresh session in [`ClientState::LoggedOut`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ClientState {
        self.state
    }

    /// Diagnostic counter of envelopes with unrecognized status codes.
    pub fn unknown_codes(&self) -> u64 {
        self.unknown_codes
    }

    /// Clone out the presentation view of this session.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state(),
            username: self.username.clone(),
            current_lobby: self.current_lobby.clone(),
            lobbies: self.lobbies.clone(),
            turn: self.turn.clone(),
            last_error: self.last_error.clone(),
            unknown_codes: self.unknown_codes,
        }
    }

    /// Process one event and return the resulting actions.
    ///
    /// # Errors
    ///
    /// [`SessionError`] for intents issued in the wrong state; the session
    /// is left exactly as it was.
    pub fn handle(&mut self, event: SessionEvent) -> Result<Vec<SessionAction>, SessionError> {
        match event {
            SessionEvent::Intent(intent) => self.handle_intent(intent),
            SessionEvent::EnvelopeReceived(envelope) => Ok(self.handle_envelope(envelope)),
            SessionEvent::ConnectionClosed => Ok(self.handle_closed()),
        }
    }

    fn handle_intent(&mut self, intent: Intent) -> Result<Vec<SessionAction>, SessionError> {
        match intent {
            Intent::Login { username, password } => {
                if self.state() != ClientState::LoggedOut {
                    return Err(SessionError::AlreadyLoggedIn);
                }
                self.pending = Some(PendingIntent::Login { username: username.clone() });
                Ok(vec![SessionAction::Send(Command::Login { username, password })])
            },
            Intent::Signup { language, username, password } => {
                if self.state() != ClientState::LoggedOut {
                    return Err(SessionError::AlreadyLoggedIn);
                }
                Ok(vec![SessionAction::Send(Command::Signup { language, username, password })])
            },
            Intent::CreateLobby => {
                self.require_home("create-lobby")?;
                Ok(vec![SessionAction::Send(Command::CreateLobby)])
            },
            Intent::JoinLobby { lobby_id } => {
                self.require_home("join-lobby")?;
                self.pending = Some(PendingIntent::JoinLobby { lobby_id: lobby_id.clone() });
                Ok(vec![SessionAction::Send(Command::JoinLobby { lobby_id })])
            },
            Intent::ListLobbies => {
                self.require_home("list-lobbies")?;
                Ok(vec![SessionAction::Send(Command::ListLobbies)])
            },
            Intent::StartMatch { clockwise } => {
                if self.state() != ClientState::LobbyHost {
                    return Err(SessionError::NotHost);
                }
                Ok(vec![SessionAction::Send(Command::StartMatch { clockwise })])
            },
            Intent::SendPhrase { text } => {
                if self.state() != ClientState::MyTurn {
                    return Err(SessionError::NotYourTurn);
                }
                let command = Command::SendPhrase { text };
                // Surface an over-long phrase before anything hits the wire.
                command.encode()?;
                Ok(vec![SessionAction::Send(command)])
            },
            Intent::Leave => self.handle_leave(),
        }
    }

    fn require_home(&self, intent: &'static str) -> Result<(), SessionError> {
        match self.state() {
            ClientState::Home => Ok(()),
            ClientState::LoggedOut => Err(SessionError::NotLoggedIn),
            _ => Err(SessionError::NotAtHome { intent }),
        }
    }

    /// Leave always lands in Home, from any logged-in state.
    fn handle_leave(&mut self) -> Result<Vec<SessionAction>, SessionError> {
        if self.state() == ClientState::LoggedOut {
            return Err(SessionError::NotLoggedIn);
        }
        // Only tell the server when there is something to leave.
        let send = self.current_lobby.is_some() || self.turn.is_some();
        self.enter_home();
        let mut actions = Vec::new();
        if send {
            actions.push(SessionAction::Send(Command::LeaveLobby));
        }
        actions.push(SessionAction::Send(Command::ListLobbies));
        Ok(actions)
    }

    /// Transition into Home. Invariant: Home never carries lobby or turn
    /// context.
    fn enter_home(&mut self) {
        self.state = ClientState::Home;
        self.current_lobby = None;
        self.turn = None;
        self.pending = None;
    }

    fn handle_envelope(&mut self, envelope: Envelope) -> Vec<SessionAction> {
        let Envelope { code, body } = envelope;
        match code {
            ServerCode::Status(status) => self.handle_status(status, body),
            ServerCode::LobbyList => {
                // Replaced wholesale, never merged.
                self.lobbies = body
                    .iter()
                    .filter_map(|line| LobbySummary::parse_line(line))
                    .collect();
                vec![SessionAction::Present(Effect::LobbiesUpdated)]
            },
            ServerCode::Unknown(token) => {
                self.unknown_codes += 1;
                vec![SessionAction::Present(Effect::LogUnknown { code: token, body })]
            },
        }
    }

    #[allow(clippy::too_many_lines)]
    fn handle_status(&mut self, status: StatusCode, body: Vec<String>) -> Vec<SessionAction> {
        if status.is_failure() {
            // Failure codes never alter client state.
            self.pending = None;
            let message = failure_message(status, &body);
            self.last_error = Some(message.clone());
            return vec![SessionAction::Present(Effect::ShowError(message))];
        }

        let state = self.state();
        match (state, status) {
            (ClientState::LoggedOut, StatusCode::LoginOk) => {
                if let Some(PendingIntent::Login { username }) = self.pending.take() {
                    self.username = Some(username);
                }
                self.enter_home();
                self.last_error = None;
                vec![
                    SessionAction::Present(Effect::LoggedIn),
                    SessionAction::Send(Command::ListLobbies),
                ]
            },
            (ClientState::LoggedOut, StatusCode::SignupOk) => {
                vec![SessionAction::Present(Effect::PleaseLogin)]
            },
            (ClientState::Home, StatusCode::LobbyCreated) => {
                let id = body.first().map(|line| line.trim().to_string()).unwrap_or_default();
                self.current_lobby = Some(CurrentLobby { id, is_host: true });
                self.state = ClientState::LobbyHost;
                self.pending = None;
                vec![SessionAction::Present(Effect::OpenLobby)]
            },
            (ClientState::Home, StatusCode::LobbyJoined) => {
                // The join ack carries no lobby id; it comes from the intent.
                let id = match self.pending.take() {
                    Some(PendingIntent::JoinLobby { lobby_id }) => lobby_id,
                    _ => body.first().map(|line| line.trim().to_string()).unwrap_or_default(),
                };
                self.current_lobby = Some(CurrentLobby { id, is_host: false });
                self.state = ClientState::LobbyMember;
                vec![SessionAction::Present(Effect::OpenLobby)]
            },
            (
                ClientState::LobbyHost | ClientState::LobbyMember,
                StatusCode::LobbyClosed,
            ) => {
                self.enter_home();
                vec![
                    SessionAction::Present(Effect::ShowNotice(
                        "the host left, lobby closed".to_string(),
                    )),
                    SessionAction::Send(Command::ListLobbies),
                ]
            },
            (
                ClientState::LobbyHost | ClientState::LobbyMember,
                StatusCode::MatchStarted,
            ) => {
                self.state = ClientState::AwaitingTurn;
                self.turn = Some(TurnContext { current_phrase: String::new(), my_turn: false });
                vec![SessionAction::Present(Effect::ShowWaiting)]
            },
            (ClientState::AwaitingTurn, StatusCode::TurnStart) => {
                let prompt = TurnPrompt::from_body(&body);
                self.state = ClientState::MyTurn;
                self.turn = Some(TurnContext {
                    current_phrase: prompt.current.clone(),
                    my_turn: true,
                });
                vec![SessionAction::Present(Effect::PromptPhrase { current: prompt.current })]
            },
            (ClientState::MyTurn, StatusCode::TurnWait) => {
                self.state = ClientState::AwaitingTurn;
                if let Some(turn) = &mut self.turn {
                    turn.my_turn = false;
                }
                vec![SessionAction::Present(Effect::ShowWaiting)]
            },
            (
                ClientState::AwaitingTurn | ClientState::MyTurn,
                StatusCode::MatchEnded,
            ) => {
                self.state = ClientState::MatchEnded;
                self.turn = None;
                vec![SessionAction::Present(Effect::ShowStory { lines: body })]
            },
            (_, StatusCode::NoLobbies) => {
                self.lobbies = Vec::new();
                vec![SessionAction::Present(Effect::LobbiesUpdated)]
            },
            (_, StatusCode::PlayerLeft) => {
                vec![SessionAction::Present(Effect::ShowNotice("a player left".to_string()))]
            },
            (_, StatusCode::Queued) => {
                vec![SessionAction::Present(Effect::ShowNotice(
                    "lobby full, waiting in queue".to_string(),
                ))]
            },
            (_, StatusCode::QueueLeft) => {
                vec![SessionAction::Present(Effect::ShowNotice("left the queue".to_string()))]
            },
            (_, StatusCode::InQueue) => {
                vec![SessionAction::Present(Effect::ShowNotice(
                    "still waiting in queue".to_string(),
                ))]
            },
            // A known code in a state it has no rule for: stale or
            // out-of-order. State stays untouched, the payload stays
            // observable.
            (_, status) => {
                vec![SessionAction::Present(Effect::LogUnknown {
                    code: status.as_str().to_string(),
                    body,
                })]
            },
        }
    }

    /// The transport closed. A reconnect is a brand-new login, so the whole
    /// aggregate resets; only the drift counter survives for diagnostics.
    fn handle_closed(&mut self) -> Vec<SessionAction> {
        let unknown_codes = self.unknown_codes;
        *self = Session::default();
        self.unknown_codes = unknown_codes;
        vec![SessionAction::Present(Effect::Disconnected)]
    }
}

fn failure_message(status: StatusCode, body: &[String]) -> String {
    let label = match status {
        StatusCode::ServerError => "server error",
        StatusCode::BadRequest => "bad request",
        StatusCode::Conflict => "conflict",
        StatusCode::Unauthorized => "unauthorized",
        _ => "error",
    };
    let detail = body.join(" ");
    if detail.trim().is_empty() {
        label.to_string()
    } else {
        format!("{label}: {}", detail.trim())
    }
}
