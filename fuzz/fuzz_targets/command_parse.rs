//! Fuzz target for command parsing and encoding.
//!
//! Arbitrary lines must parse to a structured command or a structured
//! error, never panic. Commands that parse must re-encode, and encoding
//! must preserve the opcode.

#![no_main]

use libfuzzer_sys::fuzz_target;
use whisperline_proto::Command;

fuzz_target!(|line: &str| {
    let Ok(command) = Command::parse(line) else {
        return;
    };

    // A parsed command is by construction within limits, so it encodes.
    let encoded = match command.encode() {
        Ok(encoded) => encoded,
        Err(e) => panic!("parsed command failed to encode: {e}"),
    };
    assert!(encoded.ends_with('\n'));

    // Re-parsing the canonical form gives the same command back.
    let reparsed = Command::parse(encoded.trim_end_matches('\n'));
    assert_eq!(reparsed.ok().as_ref(), Some(&command));
});
