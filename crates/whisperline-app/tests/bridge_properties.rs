//! Property-based tests for the bridge contract.
//!
//! Whatever a frontend throws at the bridge (intents in any state, any
//! envelope, disconnects), every batch must close with a snapshot that
//! matches the session, and guard failures must never queue wire commands.

use proptest::prelude::*;
use whisperline_app::{AppEvent, Bridge};
use whisperline_client::Intent;
use whisperline_proto::{Envelope, StatusCode};

/// Any user intent, with small printable arguments.
fn arbitrary_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        ("[a-z]{1,8}", "[a-z]{1,8}")
            .prop_map(|(username, password)| Intent::Login { username, password }),
        ("[a-z]{2}", "[a-z]{1,8}", "[a-z]{1,8}").prop_map(|(language, username, password)| {
            Intent::Signup { language, username, password }
        }),
        Just(Intent::CreateLobby),
        "[a-f0-9]{8,36}".prop_map(|lobby_id| Intent::JoinLobby { lobby_id }),
        "[a-z ]{0,40}".prop_map(|text| Intent::SendPhrase { text }),
        any::<bool>().prop_map(|clockwise| Intent::StartMatch { clockwise }),
        Just(Intent::Leave),
        Just(Intent::ListLobbies),
    ]
}

/// One frontend-visible input to the bridge.
#[derive(Debug, Clone)]
enum Drive {
    Intent(Intent),
    Envelope(StatusCode, Vec<String>),
    Closed,
}

fn arbitrary_drive() -> impl Strategy<Value = Drive> {
    prop_oneof![
        arbitrary_intent().prop_map(Drive::Intent),
        (
            prop::sample::select(StatusCode::ALL.to_vec()),
            prop::collection::vec("[a-z0-9 ]{0,30}", 0..3),
        )
            .prop_map(|(code, body)| Drive::Envelope(code, body)),
        Just(Drive::Closed),
    ]
}

/// Intents that are guard errors from a fresh logged-out session.
fn guarded_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::CreateLobby),
        "[a-f0-9]{8}".prop_map(|lobby_id| Intent::JoinLobby { lobby_id }),
        "[a-z ]{0,30}".prop_map(|text| Intent::SendPhrase { text }),
        any::<bool>().prop_map(|clockwise| Intent::StartMatch { clockwise }),
        Just(Intent::Leave),
        Just(Intent::ListLobbies),
    ]
}

proptest! {
    /// Every processed input, no matter the sequence leading up to it,
    /// produces a batch that closes with the session's current snapshot.
    #[test]
    fn prop_every_batch_closes_with_the_current_snapshot(
        drives in prop::collection::vec(arbitrary_drive(), 1..40),
    ) {
        let mut bridge = Bridge::new();

        for drive in drives {
            let events = match drive {
                Drive::Intent(intent) => bridge.process_intent(intent),
                Drive::Envelope(code, body) => {
                    bridge.handle_envelope(Envelope::status(code, body))
                },
                Drive::Closed => bridge.handle_closed(),
            };

            match events.last() {
                Some(AppEvent::Snapshot(snapshot)) => {
                    prop_assert_eq!(snapshot, &bridge.snapshot());
                },
                other => prop_assert!(false, "batch closed with {:?}", other),
            }
        }
    }

    /// A guard failure surfaces as an error event and queues nothing on the
    /// wire.
    #[test]
    fn prop_guard_errors_never_queue_commands(intent in guarded_intent()) {
        let mut bridge = Bridge::new();

        let events = bridge.process_intent(intent);

        prop_assert!(matches!(events.first(), Some(AppEvent::Error(_))));
        prop_assert!(bridge.take_outgoing().is_empty());
    }
}
