//! Decoded server messages and payload helpers.

use crate::code::{ServerCode, StatusCode};

/// One decoded server message: a status code plus ordered body lines.
///
/// Envelopes are immutable after creation; the decoder builds them and the
/// session machine only reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Resolved leading token.
    pub code: ServerCode,
    /// Body lines in wire order, newline stripped.
    pub body: Vec<String>,
}

impl Envelope {
    /// Envelope with a known status code.
    pub fn status(code: StatusCode, body: Vec<String>) -> Self {
        Self { code: ServerCode::Status(code), body }
    }

    /// Parse the body as a lobby listing, skipping malformed lines.
    pub fn lobbies(&self) -> Vec<LobbySummary> {
        self.body.iter().filter_map(|line| LobbySummary::parse_line(line)).collect()
    }
}

/// One row of the lobby listing.
///
/// The server emits one line per lobby: `<id> <host> <max> <current>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbySummary {
    /// Lobby UUID.
    pub id: String,
    /// Username of the host.
    pub host: String,
    /// Maximum player count.
    pub max_players: u32,
    /// Players currently seated.
    pub current_players: u32,
}

impl LobbySummary {
    /// Parse one listing line. `None` for anything that does not fit the
    /// four-column shape; callers skip such lines rather than failing the
    /// whole listing.
    pub fn parse_line(line: &str) -> Option<LobbySummary> {
        let mut parts = line.split_whitespace();
        let id = parts.next()?;
        let host = parts.next()?;
        let max_players = parts.next()?.parse().ok()?;
        let current_players = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(LobbySummary {
            id: id.to_string(),
            host: host.to_string(),
            max_players,
            current_players,
        })
    }
}

/// Marker prefix the server uses to carry the running phrase in a turn-start
/// body.
const PHRASE_MARKER: &str = "the current phrase is: ";

/// Sentinel line sent to the first player of a match instead of a phrase.
const OPENING_SENTINEL: &str = "you start the story";

/// Resolved turn-start payload.
///
/// The server signals a turn with one of two textual conventions: a marker
/// line carrying the phrase written so far, or a start-of-match sentinel
/// when there is no phrase yet. Both resolve to a single string here so the
/// session machine never re-parses wire text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnPrompt {
    /// The phrase written so far; empty at the start of a match.
    pub current: String,
    /// True when the sentinel fired, i.e. this client opens the story.
    pub opening: bool,
}

impl TurnPrompt {
    /// Resolve a turn-start body.
    ///
    /// Falls back to the first non-empty body line verbatim when neither
    /// convention matches, so an unexpected server wording still reaches the
    /// player instead of being dropped.
    pub fn from_body(body: &[String]) -> TurnPrompt {
        for line in body {
            if let Some(rest) = line.strip_prefix(PHRASE_MARKER) {
                return TurnPrompt { current: rest.to_string(), opening: false };
            }
            if line.trim() == OPENING_SENTINEL {
                return TurnPrompt { current: String::new(), opening: true };
            }
        }
        let fallback = body.iter().find(|l| !l.trim().is_empty()).cloned().unwrap_or_default();
        TurnPrompt { current: fallback, opening: false }
    }
}
