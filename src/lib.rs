//! TUI Match-3 (workspace facade crate).
//!
//! Re-exports the workspace crates under `tui_match3::{core,engine,input,term,types}`
//! and hosts the pieces only the binary needs: configuration loading and the
//! event log.

pub mod config;
pub mod event_log;

pub use tui_match3_core as core;
pub use tui_match3_engine as engine;
pub use tui_match3_input as input;
pub use tui_match3_term as term;
pub use tui_match3_types as types;

pub use config::GameConfig;
pub use event_log::{EventLog, LogEvent};
