//! Property-based tests for the session state machine.
//!
//! The resilience policy (unknown and failure codes must never move the
//! state machine) has to hold for every reachable state, not just the ones
//! a scripted test happens to visit.

use proptest::prelude::*;
use whisperline_client::{ClientState, Intent, Session, SessionEvent};
use whisperline_proto::{Envelope, ServerCode, StatusCode};

const LOBBY_ID: &str = "9f3c2d1e-5a4b-4c3d-8e7f-0a1b2c3d4e5f";

/// Drive a fresh session into the requested state via the wire protocol.
fn session_in(state: ClientState) -> Session {
    let mut session = Session::new();
    let feed = |s: &mut Session, code, body: &[&str]| {
        let envelope = Envelope::status(code, body.iter().map(ToString::to_string).collect());
        s.handle(SessionEvent::EnvelopeReceived(envelope)).unwrap();
    };

    if state == ClientState::LoggedOut {
        return session;
    }
    session
        .handle(SessionEvent::Intent(Intent::Login {
            username: "alice".into(),
            password: "pw".into(),
        }))
        .unwrap();
    feed(&mut session, StatusCode::LoginOk, &[]);
    if state == ClientState::Home {
        return session;
    }
    match state {
        ClientState::LobbyHost => feed(&mut session, StatusCode::LobbyCreated, &[LOBBY_ID]),
        _ => {
            session
                .handle(SessionEvent::Intent(Intent::JoinLobby { lobby_id: LOBBY_ID.into() }))
                .unwrap();
            feed(&mut session, StatusCode::LobbyJoined, &[]);
        },
    }
    if matches!(state, ClientState::LobbyHost | ClientState::LobbyMember) {
        return session;
    }
    feed(&mut session, StatusCode::MatchStarted, &[]);
    if state == ClientState::AwaitingTurn {
        return session;
    }
    feed(&mut session, StatusCode::TurnStart, &["you start the story"]);
    if state == ClientState::MyTurn {
        return session;
    }
    feed(&mut session, StatusCode::MatchEnded, &["the end"]);
    assert_eq!(session.state(), ClientState::MatchEnded);
    session
}

fn arbitrary_state() -> impl Strategy<Value = ClientState> {
    prop::sample::select(ClientState::ALL.to_vec())
}

/// Unknown-but-code-shaped tokens, excluding the canonical table.
fn arbitrary_unknown_token() -> impl Strategy<Value = String> {
    "[A-Z][0-9][0-9]".prop_filter("token must be outside the code table", |token| {
        StatusCode::parse(token).is_none()
    })
}

proptest! {
    /// Unknown codes never move the state machine or corrupt lobby/turn
    /// context, but each one bumps the drift counter.
    #[test]
    fn prop_unknown_codes_change_nothing(
        state in arbitrary_state(),
        token in arbitrary_unknown_token(),
        body in prop::collection::vec(".{0,40}", 0..4),
    ) {
        let mut session = session_in(state);
        let before = session.snapshot();

        let envelope = Envelope { code: ServerCode::Unknown(token), body };
        session.handle(SessionEvent::EnvelopeReceived(envelope)).unwrap();

        let after = session.snapshot();
        prop_assert_eq!(after.state, before.state);
        prop_assert_eq!(after.current_lobby, before.current_lobby);
        prop_assert_eq!(after.turn, before.turn);
        prop_assert_eq!(after.unknown_codes, before.unknown_codes + 1);
    }

    /// Failure codes never move the state machine from any state.
    #[test]
    fn prop_failure_codes_only_set_last_error(
        state in arbitrary_state(),
        code in prop::sample::select(vec![
            StatusCode::ServerError,
            StatusCode::BadRequest,
            StatusCode::Conflict,
            StatusCode::Unauthorized,
        ]),
        detail in ".{0,40}",
    ) {
        let mut session = session_in(state);
        let before = session.snapshot();

        let envelope = Envelope::status(code, vec![detail]);
        session.handle(SessionEvent::EnvelopeReceived(envelope)).unwrap();

        let after = session.snapshot();
        prop_assert_eq!(after.state, before.state);
        prop_assert_eq!(after.current_lobby, before.current_lobby);
        prop_assert_eq!(after.turn, before.turn);
        prop_assert!(after.last_error.is_some());
    }

    /// Leave from any logged-in state lands in Home with lobby and turn
    /// context cleared.
    #[test]
    fn prop_leave_always_clears_context(state in arbitrary_state()) {
        let mut session = session_in(state);
        let result = session.handle(SessionEvent::Intent(Intent::Leave));

        if state == ClientState::LoggedOut {
            prop_assert!(result.is_err());
            prop_assert_eq!(session.state(), ClientState::LoggedOut);
        } else {
            prop_assert!(result.is_ok());
            let snapshot = session.snapshot();
            prop_assert_eq!(snapshot.state, ClientState::Home);
            prop_assert!(snapshot.current_lobby.is_none());
            prop_assert!(snapshot.turn.is_none());
        }
    }

    /// A lobby listing always replaces the previous one wholesale.
    #[test]
    fn prop_listings_never_accumulate(
        first in prop::collection::vec("[a-f0-9]{8} [a-z]{3,8} [2-8] [0-8]", 0..6),
        second in prop::collection::vec("[a-f0-9]{8} [a-z]{3,8} [2-8] [0-8]", 0..6),
    ) {
        let mut session = session_in(ClientState::Home);

        for body in [&first, &second] {
            let envelope = Envelope { code: ServerCode::LobbyList, body: body.clone() };
            session.handle(SessionEvent::EnvelopeReceived(envelope)).unwrap();
        }

        prop_assert_eq!(session.snapshot().lobbies.len(), second.len());
    }
}
