//! Fuzz target for the chunk decoder.
//!
//! Feeds arbitrary bytes to the decoder in arbitrary-sized chunks to find:
//! - Panics on malformed or non-UTF-8 input
//! - Slicing errors at chunk and line boundaries
//! - Envelope grouping that depends on chunking in unsound ways
//!
//! The decoder must NEVER panic: garbage lines are dropped and counted,
//! never fatal.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use whisperline_proto::Decoder;

#[derive(Debug, Arbitrary)]
struct ChunkedStream {
    data: Vec<u8>,
    cuts: Vec<u8>,
}

fuzz_target!(|stream: ChunkedStream| {
    let mut decoder = Decoder::new();

    let mut rest = stream.data.as_slice();
    for cut in stream.cuts {
        if rest.is_empty() {
            break;
        }
        let at = (cut as usize) % (rest.len() + 1);
        let (chunk, tail) = rest.split_at(at);
        rest = tail;

        for envelope in decoder.feed(chunk) {
            // Every decoded envelope must carry printable state; touching
            // the fields catches latent slicing bugs.
            let _ = format!("{:?}", envelope.code);
            let _ = envelope.body.len();
        }
    }
    let _ = decoder.feed(rest);
    let _ = decoder.invalid_lines();
});
