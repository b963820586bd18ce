//! Terminal input module.
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`] and tracks the board cursor and the
//! selected tile, turning them into swap requests for the session.

pub mod handler;
pub mod map;

pub use tui_match3_types as types;

pub use handler::{InputEvent, InputHandler};
pub use map::{handle_key_event, should_quit};
