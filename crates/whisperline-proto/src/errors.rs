//! Protocol error taxonomy.
//!
//! Protocol errors are never fatal to a session: the decoder drops the
//! offending line and keeps going, and command encoding errors are surfaced
//! to the user as a rejected intent.

use thiserror::Error;

/// Errors produced while encoding commands or decoding server payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A phrase exceeded the wire limit for the send-phrase command.
    #[error("phrase is {len} characters, limit is {max}", max = crate::MAX_PHRASE_LEN)]
    PhraseTooLong {
        /// Character count of the rejected phrase.
        len: usize,
    },

    /// A line could not be parsed as a client command.
    #[error("not a valid command line: {line:?}")]
    InvalidCommand {
        /// The offending line, newline stripped.
        line: String,
    },

    /// A received line was not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}
