//! Property-based round-trip tests for client commands.

use proptest::prelude::*;
use whisperline_proto::{Command, MAX_PHRASE_LEN};

/// The 36-character UUID shape lobby ids take on the wire.
fn arbitrary_lobby_id() -> impl Strategy<Value = String> {
    "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
}

proptest! {
    #[test]
    fn prop_join_lobby_round_trips_full_uuids(id in arbitrary_lobby_id()) {
        prop_assert_eq!(id.len(), 36);
        let cmd = Command::JoinLobby { lobby_id: id };

        let encoded = cmd.encode().unwrap();
        prop_assert_eq!(Command::parse(&encoded).unwrap(), cmd);
    }

    #[test]
    fn prop_phrases_within_the_limit_round_trip(text in "[a-zA-Z0-9 ]{0,30}") {
        let cmd = Command::SendPhrase { text };

        let encoded = cmd.encode().unwrap();
        prop_assert!(encoded.starts_with("111 "));
        prop_assert_eq!(Command::parse(&encoded).unwrap(), cmd);
    }

    #[test]
    fn prop_over_long_phrases_never_encode(
        text in proptest::string::string_regex("[a-z]{31,64}").unwrap(),
    ) {
        prop_assert!(text.chars().count() > MAX_PHRASE_LEN);
        let cmd = Command::SendPhrase { text };
        prop_assert!(cmd.encode().is_err());
    }
}
