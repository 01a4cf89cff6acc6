//! Chunk-to-envelope reframing.
//!
//! TCP hands the receive loop byte chunks of arbitrary length: a single read
//! may carry zero, one, or many newline-terminated lines, and may cut a line
//! anywhere. [`Decoder`] buffers the incomplete tail across reads and groups
//! complete lines into [`Envelope`]s.
//!
//! Grouping rules, matching how the deployed server writes (one `send()` per
//! logical message):
//!
//! - a line whose leading token matches the status-code grammar starts a new
//!   envelope, closing the previous one;
//! - code-less lines extend the envelope in progress, or open a legacy
//!   [`ServerCode::LobbyList`] envelope when none is in progress;
//! - an envelope whose trailing line was cut by the read boundary stays open
//!   until the line completes, so a message split mid-body is not torn apart;
//! - everything else completed in a chunk is emitted at the end of that
//!   chunk.

use crate::code::{ServerCode, StatusCode, looks_like_code};
use crate::envelope::Envelope;

/// Incremental decoder, one per connection.
#[derive(Debug, Default)]
pub struct Decoder {
    /// Bytes of an incomplete trailing line.
    partial: Vec<u8>,
    /// Envelope whose trailing line was cut by the previous chunk boundary.
    open: Option<Envelope>,
    /// Lines dropped for invalid UTF-8.
    invalid_lines: u64,
}

impl Decoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of lines dropped because they were not valid UTF-8.
    ///
    /// Dropping is deliberate (a garbled line must not kill the session);
    /// the counter keeps the drops observable.
    pub fn invalid_lines(&self) -> u64 {
        self.invalid_lines
    }

    /// Feed one raw chunk, returning every envelope it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Envelope> {
        self.partial.extend_from_slice(chunk);
        let buffered = std::mem::take(&mut self.partial);

        let mut pieces = buffered.split(|&b| b == b'\n');
        // split() always yields at least one piece; the last has no newline.
        let tail = pieces.next_back().unwrap_or_default();
        if tail.len() == buffered.len() {
            // No newline at all: the whole chunk is an incomplete line.
            self.partial = tail.to_vec();
            return Vec::new();
        }

        let mut done = Vec::new();
        let mut current = self.open.take();

        for piece in pieces {
            let Ok(line) = std::str::from_utf8(piece) else {
                self.invalid_lines += 1;
                continue;
            };
            let line = line.trim_end_matches('\r');
            self.push_line(line, &mut current, &mut done);
        }

        if tail.is_empty() {
            // Chunk ended on a newline: the message is complete.
            done.extend(current);
        } else {
            // Trailing line was cut; keep its envelope open across reads.
            self.open = current;
        }
        self.partial = tail.to_vec();
        done
    }

    fn push_line(&mut self, line: &str, current: &mut Option<Envelope>, done: &mut Vec<Envelope>) {
        let (token, rest) = match line.split_once(' ') {
            Some((token, rest)) => (token, rest),
            None => (line, ""),
        };

        if looks_like_code(token) {
            if let Some(finished) = current.take() {
                done.push(finished);
            }
            let code = match StatusCode::parse(token) {
                Some(known) => ServerCode::Status(known),
                None => ServerCode::Unknown(token.to_string()),
            };
            let mut body = Vec::new();
            if !rest.is_empty() {
                body.push(rest.to_string());
            }
            *current = Some(Envelope { code, body });
            return;
        }

        match current {
            Some(envelope) => envelope.body.push(line.to_string()),
            None if line.trim().is_empty() => {},
            None => {
                *current =
                    Some(Envelope { code: ServerCode::LobbyList, body: vec![line.to_string()] });
            },
        }
    }
}
