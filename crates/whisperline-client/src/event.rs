//! Session events, actions, and the presentation snapshot.

use whisperline_proto::{Envelope, LobbySummary};

use crate::session::{ClientState, CurrentLobby, TurnContext};

/// User-initiated requests, translated 1:1 into wire commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Authenticate an existing account.
    Login {
        /// Account name.
        username: String,
        /// Account password.
        password: String,
    },
    /// Register a new account.
    Signup {
        /// Preferred language tag.
        language: String,
        /// Account name.
        username: String,
        /// Account password.
        password: String,
    },
    /// Create a lobby and become its host.
    CreateLobby,
    /// Join an existing lobby by id.
    JoinLobby {
        /// 36-character lobby UUID.
        lobby_id: String,
    },
    /// Submit the next phrase of the story.
    SendPhrase {
        /// Phrase text.
        text: String,
    },
    /// Start the match (host only).
    StartMatch {
        /// Turn direction bit.
        clockwise: bool,
    },
    /// Leave the current lobby, queue, or finished match.
    Leave,
    /// Refresh the lobby listing.
    ListLobbies,
}

/// Inputs to the session machine.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A user intent from the presentation layer.
    Intent(Intent),
    /// A decoded server message from the receive path.
    EnvelopeReceived(Envelope),
    /// The transport closed; the session resets to logged-out.
    ConnectionClosed,
}

/// Outputs of the session machine for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Send this command to the server.
    Send(whisperline_proto::Command),
    /// Update the presentation layer.
    Present(Effect),
}

/// Presentation instructions.
///
/// Effects say what to show, never how; rendering is the frontend's
/// business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Informational status line.
    ShowNotice(String),
    /// An error to surface without changing the current view.
    ShowError(String),
    /// Login confirmed; the home view (lobby list) opens.
    LoggedIn,
    /// Signup confirmed; the account must log in before playing.
    PleaseLogin,
    /// A lobby view opens (hosting or joined, per the snapshot).
    OpenLobby,
    /// The match is running and another player holds the turn.
    ShowWaiting,
    /// It is this client's turn; prompt for the next phrase.
    PromptPhrase {
        /// The phrase written so far; empty when opening the story.
        current: String,
    },
    /// The match ended; show the assembled story.
    ShowStory {
        /// Story lines in order.
        lines: Vec<String>,
    },
    /// The lobby listing was replaced; re-render it from the snapshot.
    LobbiesUpdated,
    /// The connection is gone; only an explicit reconnect recovers.
    Disconnected,
    /// A message outside the code table arrived; keep it visible in logs.
    LogUnknown {
        /// The unrecognized (or out-of-place) wire token.
        code: String,
        /// Raw body lines.
        body: Vec<String>,
    },
}

/// Read-only state view pushed to the presentation layer after every
/// processed event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Where the player sits in the lifecycle.
    pub state: ClientState,
    /// Confirmed account name, once logged in.
    pub username: Option<String>,
    /// The lobby this client sits in, if any.
    pub current_lobby: Option<CurrentLobby>,
    /// The last full lobby listing.
    pub lobbies: Vec<LobbySummary>,
    /// Turn context while a match is running.
    pub turn: Option<TurnContext>,
    /// Last application error shown to the user.
    pub last_error: Option<String>,
    /// How many unknown status codes this session has swallowed.
    pub unknown_codes: u64,
}
