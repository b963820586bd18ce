//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the board is drawn into a plain
//! framebuffer which is then flushed to the terminal as a diff.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: session snapshot + cursor/selection/highlight to framebuffer
//! - [`renderer`]: crossterm backend with changed-run diffing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_look, BoardOverlay, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
