//! Terminal UI for Whisperline.
//!
//! A thin shell over [`whisperline_app::Bridge`]: the runtime drains the
//! transport and refresh-timer channels on one task, feeds the bridge, and
//! renders from the latest snapshot. This crate only handles terminal I/O
//! and drawing.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commands;
pub mod input;
pub mod runtime;
pub mod ui;
pub mod view;

pub use input::InputState;
pub use runtime::{Runtime, RuntimeError};
pub use view::View;
