//! Property-based tests for the chunk decoder.
//!
//! The decoder must produce the same envelopes no matter how the TCP stack
//! slices the byte stream, as long as each slice boundary does not fall on
//! the newline separating two body lines of one multi-line message (single
//! line messages can be cut anywhere).

use proptest::prelude::*;
use whisperline_proto::{Decoder, Envelope, ServerCode, StatusCode};

/// Single-line wire messages: a status code with no body.
fn arbitrary_code_message() -> impl Strategy<Value = (StatusCode, Vec<u8>)> {
    prop::sample::select(StatusCode::ALL.to_vec())
        .prop_map(|code| (code, format!("{code}\n").into_bytes()))
}

fn decode_all(decoder: &mut Decoder, chunks: &[Vec<u8>]) -> Vec<Envelope> {
    let mut out = Vec::new();
    for chunk in chunks {
        out.extend(decoder.feed(chunk));
    }
    out
}

proptest! {
    /// Arbitrary byte-level chunking of a stream of single-line messages
    /// yields exactly the same envelopes as feeding the stream whole.
    #[test]
    fn prop_chunking_is_invisible_for_single_line_messages(
        messages in prop::collection::vec(arbitrary_code_message(), 1..20),
        splits in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let stream: Vec<u8> = messages.iter().flat_map(|(_, bytes)| bytes.clone()).collect();

        // Reference decode: the whole stream in one read.
        let mut reference = Decoder::new();
        let expected = reference.feed(&stream);

        // Split the stream at arbitrary byte offsets.
        let mut offsets: Vec<usize> = splits.iter().map(|ix| ix.index(stream.len())).collect();
        offsets.sort_unstable();
        offsets.dedup();

        let mut chunks = Vec::new();
        let mut start = 0;
        for offset in offsets {
            chunks.push(stream[start..offset].to_vec());
            start = offset;
        }
        chunks.push(stream[start..].to_vec());

        let mut decoder = Decoder::new();
        let actual = decode_all(&mut decoder, &chunks);

        prop_assert_eq!(actual, expected);
    }

    /// Every decoded envelope's code is one of the three documented cases,
    /// and unknown tokens are preserved verbatim for diagnostics.
    #[test]
    fn prop_arbitrary_bytes_never_panic_the_decoder(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..128), 0..8),
    ) {
        let mut decoder = Decoder::new();
        for envelope in decode_all(&mut decoder, &chunks) {
            match envelope.code {
                ServerCode::Status(_) | ServerCode::LobbyList => {},
                ServerCode::Unknown(token) => prop_assert_eq!(token.len(), 3),
            }
        }
    }

    /// A lobby listing round-trips: lines formatted the way the server
    /// writes them parse back to the same summaries.
    #[test]
    fn prop_listing_lines_parse_back(
        rows in prop::collection::vec(
            ("[a-f0-9-]{36}", "[a-z]{1,12}", 2u32..8, 0u32..8),
            1..10,
        ),
    ) {
        let mut wire = Vec::new();
        for (id, host, max, current) in &rows {
            wire.extend_from_slice(format!("{id} {host} {max} {current}\n").as_bytes());
        }

        let mut decoder = Decoder::new();
        let envelopes = decoder.feed(&wire);
        prop_assert_eq!(envelopes.len(), 1);
        prop_assert_eq!(&envelopes[0].code, &ServerCode::LobbyList);

        let lobbies = envelopes[0].lobbies();
        prop_assert_eq!(lobbies.len(), rows.len());
        for (summary, (id, host, max, current)) in lobbies.iter().zip(&rows) {
            prop_assert_eq!(&summary.id, id);
            prop_assert_eq!(&summary.host, host);
            prop_assert_eq!(summary.max_players, *max);
            prop_assert_eq!(summary.current_players, *current);
        }
    }
}
