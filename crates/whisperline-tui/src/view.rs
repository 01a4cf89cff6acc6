//! What the terminal renders from.

use whisperline_app::AppEvent;
use whisperline_client::Snapshot;

/// Render model: the latest session snapshot plus terminal-local extras.
///
/// The snapshot is replaced wholesale on every bridge batch; nothing in the
/// view is patched incrementally.
#[derive(Debug, Clone, Default)]
pub struct View {
    /// Latest session snapshot.
    pub snapshot: Snapshot,
    /// Transient status line (last notice or error).
    pub status: Option<String>,
    /// The finished story, kept after the match-end snapshot.
    pub story: Vec<String>,
    /// Whether a transport connection is up.
    pub connected: bool,
}

impl View {
    /// Apply one bridge event.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Snapshot(snapshot) => self.snapshot = snapshot,
            AppEvent::Status(message) => self.status = Some(message),
            AppEvent::Error(message) => self.status = Some(format!("error: {message}")),
            AppEvent::Story(lines) => self.story = lines,
            AppEvent::Disconnected => {
                self.connected = false;
                self.status = Some("disconnected; /connect to reconnect".to_string());
            },
        }
    }
}
