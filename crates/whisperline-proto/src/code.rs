//! Server status code table.
//!
//! The deployed server went through several protocol dialects; the lettered
//! table is canonical here. `A`-codes are lobby/match notifications,
//! `B`-codes are authentication acks, `Z`-codes are failures. Failure codes
//! never drive a state transition; they only surface an error to the user.

use std::fmt;

/// Canonical server status codes.
///
/// Each informational code is bound to exactly one state-transition rule in
/// the client session machine; the four failure codes are bound to none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// `A00`: lobby created, body carries the new lobby id.
    LobbyCreated,
    /// `A01`: joined a lobby.
    LobbyJoined,
    /// `A02`: the host left and the lobby was closed.
    LobbyClosed,
    /// `A03`: another player left the lobby.
    PlayerLeft,
    /// `A04`: lobby full, added to its queue.
    Queued,
    /// `A05`: no active lobbies.
    NoLobbies,
    /// `A06`: removed from a lobby queue.
    QueueLeft,
    /// `A07`: still waiting in a lobby queue.
    InQueue,
    /// `A10`: the match started.
    MatchStarted,
    /// `A11`: it is this client's turn; body carries the current phrase.
    TurnStart,
    /// `A12`: the match ended; body carries the final story.
    MatchEnded,
    /// `A13`: phrase accepted, wait for the other players.
    TurnWait,
    /// `B01`: signup succeeded.
    SignupOk,
    /// `B02`: login succeeded.
    LoginOk,
    /// `Z00`: server error.
    ServerError,
    /// `Z01`: bad request.
    BadRequest,
    /// `Z02`: conflict.
    Conflict,
    /// `Z03`: unauthorized.
    Unauthorized,
}

impl StatusCode {
    /// All codes, in wire order. Used by table-driven tests.
    pub const ALL: [StatusCode; 18] = [
        StatusCode::LobbyCreated,
        StatusCode::LobbyJoined,
        StatusCode::LobbyClosed,
        StatusCode::PlayerLeft,
        StatusCode::Queued,
        StatusCode::NoLobbies,
        StatusCode::QueueLeft,
        StatusCode::InQueue,
        StatusCode::MatchStarted,
        StatusCode::TurnStart,
        StatusCode::MatchEnded,
        StatusCode::TurnWait,
        StatusCode::SignupOk,
        StatusCode::LoginOk,
        StatusCode::ServerError,
        StatusCode::BadRequest,
        StatusCode::Conflict,
        StatusCode::Unauthorized,
    ];

    /// Wire token for this code.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::LobbyCreated => "A00",
            StatusCode::LobbyJoined => "A01",
            StatusCode::LobbyClosed => "A02",
            StatusCode::PlayerLeft => "A03",
            StatusCode::Queued => "A04",
            StatusCode::NoLobbies => "A05",
            StatusCode::QueueLeft => "A06",
            StatusCode::InQueue => "A07",
            StatusCode::MatchStarted => "A10",
            StatusCode::TurnStart => "A11",
            StatusCode::MatchEnded => "A12",
            StatusCode::TurnWait => "A13",
            StatusCode::SignupOk => "B01",
            StatusCode::LoginOk => "B02",
            StatusCode::ServerError => "Z00",
            StatusCode::BadRequest => "Z01",
            StatusCode::Conflict => "Z02",
            StatusCode::Unauthorized => "Z03",
        }
    }

    /// Parse a wire token. `None` for anything outside the table.
    pub fn parse(token: &str) -> Option<StatusCode> {
        match token {
            "A00" => Some(StatusCode::LobbyCreated),
            "A01" => Some(StatusCode::LobbyJoined),
            "A02" => Some(StatusCode::LobbyClosed),
            "A03" => Some(StatusCode::PlayerLeft),
            "A04" => Some(StatusCode::Queued),
            "A05" => Some(StatusCode::NoLobbies),
            "A06" => Some(StatusCode::QueueLeft),
            "A07" => Some(StatusCode::InQueue),
            "A10" => Some(StatusCode::MatchStarted),
            "A11" => Some(StatusCode::TurnStart),
            "A12" => Some(StatusCode::MatchEnded),
            "A13" => Some(StatusCode::TurnWait),
            "B01" => Some(StatusCode::SignupOk),
            "B02" => Some(StatusCode::LoginOk),
            "Z00" => Some(StatusCode::ServerError),
            "Z01" => Some(StatusCode::BadRequest),
            "Z02" => Some(StatusCode::Conflict),
            "Z03" => Some(StatusCode::Unauthorized),
            _ => None,
        }
    }

    /// True for the `Z`-codes, which never alter client state.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            StatusCode::ServerError
                | StatusCode::BadRequest
                | StatusCode::Conflict
                | StatusCode::Unauthorized
        )
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved leading token of a server message.
///
/// The legacy server sends lobby listings with no status line at all, so the
/// decoder keeps three cases apart: a known code, a token shaped like a code
/// but outside the table (protocol drift, kept non-fatal), and no code at
/// all (a bare listing payload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerCode {
    /// A code from the canonical table.
    Status(StatusCode),
    /// A token matching the code grammar but unknown to this client.
    Unknown(String),
    /// No recognizable code; the message is a legacy lobby listing.
    LobbyList,
}

impl ServerCode {
    /// True when this code is shaped like a code but not in the table.
    pub fn is_unknown(&self) -> bool {
        matches!(self, ServerCode::Unknown(_))
    }
}

/// Whether a token matches the `[A-Z][0-9][0-9]` status code grammar.
///
/// Tokens outside this grammar mark a legacy bare lobby-listing payload
/// rather than a malformed message.
pub(crate) fn looks_like_code(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 3
        && bytes[0].is_ascii_uppercase()
        && bytes[1].is_ascii_digit()
        && bytes[2].is_ascii_digit()
}
