//! Engine helpers built on top of the core crate.
//!
//! The core resolves a whole cascade synchronously; this crate turns the recorded
//! result into timed frames the presentation layer can step through with its own
//! clock.

pub mod playback;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use playback::{Frame, FrameKind, Playback};
