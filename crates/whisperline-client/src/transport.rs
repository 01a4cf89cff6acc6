//! TCP transport for the client.
//!
//! Provides [`connect`], which owns the socket and exposes frame transport
//! as channels. This is a thin layer: all protocol logic stays in the
//! sans-IO [`crate::Session`].
//!
//! Concurrency model: the read task blocks on socket reads and touches
//! nothing but its decoder and the outbound channel; the write task drains
//! the command channel. The caller's presentation task hands commands to the
//! channel and never blocks on the socket. Closing the socket (via
//! [`Connection::stop`]) is the cancellation mechanism for the blocked read;
//! there is no independent timeout, and there is no automatic reconnect.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use thiserror::Error;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
    sync::mpsc,
};
use whisperline_proto::{Command, Decoder, Envelope};

/// Socket read buffer size.
const READ_BUF_SIZE: usize = 4096;

/// Channel depth for both directions.
const CHANNEL_DEPTH: usize = 32;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection could not be established.
    #[error("connect failed: {0}")]
    Connect(#[source] std::io::Error),

    /// I/O failure on an established connection.
    #[error("connection i/o failed: {0}")]
    Io(#[source] std::io::Error),
}

/// Events surfaced by the receive path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// One decoded server message.
    Envelope(Envelope),
    /// The connection is gone (end-of-stream, read error, or write
    /// failure). Emitted exactly once per connection.
    Closed,
}

/// Handle to a connected session transport.
///
/// Dropping the handle (or calling [`Connection::stop`]) aborts the I/O
/// tasks, which closes the socket and unblocks the pending read.
pub struct Connection {
    /// Commands to encode and write to the server.
    pub to_server: mpsc::Sender<Command>,
    /// Envelopes and lifecycle events from the server.
    pub from_server: mpsc::Receiver<TransportEvent>,
    read_abort: tokio::task::AbortHandle,
    write_abort: tokio::task::AbortHandle,
}

impl Connection {
    /// Close the socket and stop both I/O tasks.
    pub fn stop(&self) {
        self.read_abort.abort();
        self.write_abort.abort();
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Connect to a Whisperline server.
///
/// Returns a [`Connection`] with channels for command and envelope
/// transport. Callers that are already connected should not call this
/// again; idempotent connect lives at the runtime layer, which keeps the
/// existing handle and treats a second request as a no-op.
pub async fn connect(addr: &str) -> Result<Connection, TransportError> {
    let stream = TcpStream::connect(addr).await.map_err(TransportError::Connect)?;
    let (read_half, write_half) = stream.into_split();

    let (to_server_tx, to_server_rx) = mpsc::channel::<Command>(CHANNEL_DEPTH);
    let (from_server_tx, from_server_rx) = mpsc::channel::<TransportEvent>(CHANNEL_DEPTH);

    let closed = Arc::new(AtomicBool::new(false));

    let read_task = tokio::spawn(run_read(read_half, from_server_tx.clone(), Arc::clone(&closed)));
    let write_task = tokio::spawn(run_write(write_half, to_server_rx, from_server_tx, closed));

    Ok(Connection {
        to_server: to_server_tx,
        from_server: from_server_rx,
        read_abort: read_task.abort_handle(),
        write_abort: write_task.abort_handle(),
    })
}

/// Receive loop: blocking reads feeding the chunk decoder.
async fn run_read(
    mut read_half: tokio::net::tcp::OwnedReadHalf,
    events: mpsc::Sender<TransportEvent>,
    closed: Arc<AtomicBool>,
) {
    let mut decoder = Decoder::new();
    let mut buf = [0u8; READ_BUF_SIZE];

    loop {
        match read_half.read(&mut buf).await {
            // End-of-stream and read errors both end the connection.
            Ok(0) | Err(_) => break,
            Ok(n) => {
                for envelope in decoder.feed(&buf[..n]) {
                    if events.send(TransportEvent::Envelope(envelope)).await.is_err() {
                        return;
                    }
                }
            },
        }
    }

    emit_closed(&events, &closed).await;
}

/// Send loop: drains the command channel and writes encoded lines.
async fn run_write(
    mut write_half: tokio::net::tcp::OwnedWriteHalf,
    mut commands: mpsc::Receiver<Command>,
    events: mpsc::Sender<TransportEvent>,
    closed: Arc<AtomicBool>,
) {
    while let Some(command) = commands.recv().await {
        // The session validates before sending; an unencodable command here
        // is a bug upstream and is dropped rather than killing the link.
        let Ok(line) = command.encode() else { continue };

        if write_half.write_all(line.as_bytes()).await.is_err() {
            // A send failure ends the connection. No implicit retry.
            emit_closed(&events, &closed).await;
            return;
        }
    }
}

/// Emit [`TransportEvent::Closed`] exactly once per connection, whichever
/// task gets there first.
async fn emit_closed(events: &mpsc::Sender<TransportEvent>, closed: &AtomicBool) {
    if !closed.swap(true, Ordering::SeqCst) {
        let _ = events.send(TransportEvent::Closed).await;
    }
}
