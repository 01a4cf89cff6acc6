//! Events the frontend reacts to.

use whisperline_client::Snapshot;

/// Outputs of the [`crate::Bridge`] for the frontend to apply.
///
/// Every processed intent or envelope ends with a [`AppEvent::Snapshot`], so
/// the frontend always renders from the complete, current session view
/// rather than patching incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Fresh session view; replaces whatever the frontend rendered before.
    Snapshot(Snapshot),
    /// Transient status line.
    Status(String),
    /// An error to show without leaving the current view.
    Error(String),
    /// The finished story, in order.
    Story(Vec<String>),
    /// The connection is gone; only an explicit reconnect recovers.
    Disconnected,
}
