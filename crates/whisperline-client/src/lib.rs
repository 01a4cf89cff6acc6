//! Client session engine for the Whisperline word game.
//!
//! # Architecture
//!
//! The session machine is sans-IO and action-based: callers feed it
//! [`SessionEvent`]s (user intents, decoded envelopes, a closed connection)
//! and execute the [`SessionAction`]s it returns. All state lives in one
//! owned [`Session`] aggregate; nothing here touches a socket or a screen.
//!
//! # Components
//!
//! - [`Session`]: the client state machine (login → lobby → match → result)
//! - [`SessionEvent`] / [`SessionAction`]: inputs and outputs
//! - [`Intent`]: user-initiated requests, encoded 1:1 into wire commands
//! - [`Effect`]: presentation instructions carried by actions
//! - [`Snapshot`]: the read-only state view pushed to the presentation layer
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, [`transport::connect`] provides the
//! TCP receive/send paths as channels, so all session mutation stays on the
//! caller's single presentation task.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod event;
mod session;

#[cfg(feature = "transport")]
pub mod transport;

pub use error::SessionError;
pub use event::{Effect, Intent, SessionAction, SessionEvent, Snapshot};
pub use session::{ClientState, CurrentLobby, Session, TurnContext};
