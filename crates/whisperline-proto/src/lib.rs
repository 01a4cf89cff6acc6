//! Wire protocol for the Whisperline word game.
//!
//! The server speaks a line-oriented UTF-8 protocol over a single TCP
//! connection. Each server message is a status-coded envelope: the first
//! line's leading token is a three-character status code, the remaining
//! lines are the ordered body. Client requests are single lines carrying a
//! numeric opcode plus space-separated arguments.
//!
//! # Components
//!
//! - [`StatusCode`] / [`ServerCode`]: the canonical reply code table
//! - [`Envelope`]: one decoded server message
//! - [`Decoder`]: reframes raw byte chunks into envelopes, buffering
//!   incomplete lines across reads
//! - [`Command`]: client request encoding (and parsing, for tests/tools)
//! - [`LobbySummary`] / [`TurnPrompt`]: payload helpers for listing lines
//!   and turn-start bodies

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod code;
mod command;
mod decoder;
mod envelope;
mod errors;

pub use code::{ServerCode, StatusCode};
pub use command::Command;
pub use decoder::Decoder;
pub use envelope::{Envelope, LobbySummary, TurnPrompt};
pub use errors::ProtocolError;

/// Maximum phrase length accepted by the `111` send-phrase command.
pub const MAX_PHRASE_LEN: usize = 30;
