//! Fuzz target for the session state machine.
//!
//! Drives a session with an arbitrary interleaving of user intents,
//! decoded envelopes, and disconnects. The session must never panic:
//! guard violations are structured errors, unexpected codes are absorbed.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use whisperline_client::{Intent, Session, SessionEvent};
use whisperline_proto::{Envelope, ServerCode, StatusCode};

#[derive(Debug, Arbitrary)]
enum Input {
    Intent(FuzzIntent),
    Status { code: u8, body: Vec<String> },
    Unknown { token: String, body: Vec<String> },
    Listing { lines: Vec<String> },
    Disconnect,
}

#[derive(Debug, Arbitrary)]
enum FuzzIntent {
    Login { username: String, password: String },
    Signup { language: String, username: String, password: String },
    CreateLobby,
    JoinLobby { lobby_id: String },
    SendPhrase { text: String },
    StartMatch { clockwise: bool },
    Leave,
    ListLobbies,
}

impl From<FuzzIntent> for Intent {
    fn from(intent: FuzzIntent) -> Intent {
        match intent {
            FuzzIntent::Login { username, password } => Intent::Login { username, password },
            FuzzIntent::Signup { language, username, password } => {
                Intent::Signup { language, username, password }
            },
            FuzzIntent::CreateLobby => Intent::CreateLobby,
            FuzzIntent::JoinLobby { lobby_id } => Intent::JoinLobby { lobby_id },
            FuzzIntent::SendPhrase { text } => Intent::SendPhrase { text },
            FuzzIntent::StartMatch { clockwise } => Intent::StartMatch { clockwise },
            FuzzIntent::Leave => Intent::Leave,
            FuzzIntent::ListLobbies => Intent::ListLobbies,
        }
    }
}

fuzz_target!(|inputs: Vec<Input>| {
    let mut session = Session::new();

    for input in inputs {
        let event = match input {
            Input::Intent(intent) => SessionEvent::Intent(intent.into()),
            Input::Status { code, body } => {
                let code = StatusCode::ALL[(code as usize) % StatusCode::ALL.len()];
                SessionEvent::EnvelopeReceived(Envelope::status(code, body))
            },
            Input::Unknown { token, body } => SessionEvent::EnvelopeReceived(Envelope {
                code: ServerCode::Unknown(token),
                body,
            }),
            Input::Listing { lines } => SessionEvent::EnvelopeReceived(Envelope {
                code: ServerCode::LobbyList,
                body: lines,
            }),
            Input::Disconnect => SessionEvent::ConnectionClosed,
        };

        // Errors are fine; panics are not. The snapshot must stay
        // internally consistent after every event.
        let _ = session.handle(event);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, session.state());
    }
});
