//! Session-to-frontend translation layer.
//!
//! The [`Bridge`] wraps the low-level [`whisperline_client::Session`] and
//! adapts it to the frontend lifecycle:
//!
//! - user intents and decoded envelopes go in;
//! - [`crate::AppEvent`]s come out, always closing with a fresh snapshot;
//! - outgoing [`whisperline_proto::Command`]s accumulate for the frontend
//!   to flush through its transport in the next I/O cycle.
//!
//! Guard errors (an intent in the wrong state) become status lines, never
//! aborts: the user typed something invalid, the session is untouched.

use whisperline_client::{
    Effect, Intent, Session, SessionAction, SessionError, SessionEvent, Snapshot,
};
use whisperline_proto::{Command, Envelope};

use crate::AppEvent;

/// Bridge between the session machine and a frontend.
#[derive(Debug, Default)]
pub struct Bridge {
    session: Session,
    outgoing: Vec<Command>,
}

impl Bridge {
    /// Bridge around a fresh logged-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session view.
    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    /// Process a user intent.
    pub fn process_intent(&mut self, intent: Intent) -> Vec<AppEvent> {
        let result = self.session.handle(SessionEvent::Intent(intent));
        self.finish(result)
    }

    /// Process one decoded server envelope.
    pub fn handle_envelope(&mut self, envelope: Envelope) -> Vec<AppEvent> {
        let result = self.session.handle(SessionEvent::EnvelopeReceived(envelope));
        self.finish(result)
    }

    /// The transport reported the connection closed.
    pub fn handle_closed(&mut self) -> Vec<AppEvent> {
        let result = self.session.handle(SessionEvent::ConnectionClosed);
        self.finish(result)
    }

    /// Take the commands accumulated since the last call.
    pub fn take_outgoing(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outgoing)
    }

    fn finish(&mut self, result: Result<Vec<SessionAction>, SessionError>) -> Vec<AppEvent> {
        let mut events = match result {
            Ok(actions) => self.apply_actions(actions),
            Err(err) => vec![AppEvent::Error(err.to_string())],
        };
        events.push(AppEvent::Snapshot(self.session.snapshot()));
        events
    }

    fn apply_actions(&mut self, actions: Vec<SessionAction>) -> Vec<AppEvent> {
        let mut events = Vec::new();

        for action in actions {
            match action {
                SessionAction::Send(command) => self.outgoing.push(command),
                SessionAction::Present(effect) => {
                    if let Some(event) = translate_effect(effect) {
                        events.push(event);
                    }
                },
            }
        }

        events
    }
}

/// Map a presentation effect to a frontend event.
///
/// View-opening effects return `None`: the snapshot closing every batch
/// already carries the state the frontend renders from.
fn translate_effect(effect: Effect) -> Option<AppEvent> {
    match effect {
        Effect::ShowNotice(message) => Some(AppEvent::Status(message)),
        Effect::ShowError(message) => Some(AppEvent::Error(message)),
        Effect::LoggedIn => Some(AppEvent::Status("logged in".to_string())),
        Effect::PleaseLogin => {
            Some(AppEvent::Status("signup complete, please log in".to_string()))
        },
        Effect::ShowStory { lines } => Some(AppEvent::Story(lines)),
        Effect::Disconnected => Some(AppEvent::Disconnected),
        Effect::LogUnknown { code, body } => {
            tracing::warn!(%code, ?body, "unrecognized server message");
            None
        },
        Effect::OpenLobby
        | Effect::ShowWaiting
        | Effect::PromptPhrase { .. }
        | Effect::LobbiesUpdated => None,
    }
}
