//! Session errors.

use thiserror::Error;
use whisperline_proto::ProtocolError;

/// Guard failures for intents issued in the wrong state.
///
/// These are user mistakes, not protocol faults: the caller shows them as a
/// status line and the session state is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The intent requires being logged in.
    #[error("not logged in")]
    NotLoggedIn,

    /// The intent is only valid while logged out.
    #[error("already logged in")]
    AlreadyLoggedIn,

    /// The intent requires being at the home screen.
    #[error("{intent} is only available from the lobby list")]
    NotAtHome {
        /// Human name of the rejected intent.
        intent: &'static str,
    },

    /// Only the lobby host may start the match.
    #[error("only the host can start the match")]
    NotHost,

    /// A phrase was submitted outside this client's turn.
    #[error("it is not your turn")]
    NotYourTurn,

    /// Command encoding failed (e.g. an over-long phrase).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
