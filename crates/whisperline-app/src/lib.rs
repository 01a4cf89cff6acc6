//! Application layer for Whisperline.
//!
//! Sits between the sans-IO session machine and a frontend. The [`Bridge`]
//! translates user intents and decoded envelopes into frontend events plus
//! accumulated outgoing commands; the [`LobbyRefresher`] owns the periodic
//! lobby re-listing that runs while the player sits at the home screen.
//!
//! # Components
//!
//! - [`Bridge`]: intent/envelope processing, snapshot publication
//! - [`AppEvent`]: what the frontend reacts to
//! - [`LobbyRefresher`]: cancellable periodic refresh timer

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bridge;
mod event;
mod refresher;

pub use bridge::Bridge;
pub use event::AppEvent;
pub use refresher::{LobbyRefresher, RefreshTick};
