//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board rules and the cascade state machine. It has
//! **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical boards and refills
//! - **Testable**: Every rule is a plain function over a [`Grid`]
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: rows x cols tile grid with flat row-major storage
//! - [`rng`]: small LCG used for generation and refills
//! - [`generator`]: starting grids with no pre-existing run of 3
//! - [`matcher`]: horizontal/vertical run detection
//! - [`gravity`]: clearing, column compaction and refill
//! - [`scoring`]: per-iteration score deltas
//! - [`session`]: the cascade controller that owns a level's state
//! - [`snapshot`]: read-only session view for renderers
//!
//! # Game Rules
//!
//! - A swap must exchange two edge-adjacent tiles.
//! - A swap that creates no run of 3+ is undone and costs nothing.
//! - A swap that does create a run costs one move; runs clear, tiles fall, the
//!   top refills, and this repeats until the board is stable.
//! - Each cascade iteration scores `n * per_tile`, plus
//!   `(n - 3) * bonus_per_extra_tile * n` when more than three tiles cleared.
//! - The level is won once the score reaches the target, and failed when the
//!   moves run out first.
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{Session, Phase, SwapResult};
//! use tui_match3_types::{Coord, Rules, DEFAULT_LEVELS};
//!
//! let mut session = Session::start(DEFAULT_LEVELS[0], Rules::default(), 12345).unwrap();
//! assert_eq!(session.moves_remaining(), 18);
//!
//! // Non-adjacent swaps are ignored.
//! let result = session.request_swap(Coord::new(0, 0), Coord::new(2, 2));
//! assert!(matches!(result, SwapResult::Ignored(_)));
//! assert_eq!(session.moves_remaining(), 18);
//! assert_eq!(session.phase(), Phase::Idle);
//! ```

pub mod error;
pub mod generator;
pub mod gravity;
pub mod grid;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use error::{validate_level, ConfigError};
pub use generator::generate;
pub use gravity::{collapse, collapse_and_refill, refill};
pub use grid::Grid;
pub use matcher::{find_matches, find_runs, Axis, MatchSet, Run};
pub use rng::SimpleRng;
pub use scoring::{calculate_score, score_for, ScoreResult};
pub use session::{Cascade, CascadeStep, IgnoreReason, Outcome, Phase, Session, SwapResult};
pub use snapshot::SessionSnapshot;
