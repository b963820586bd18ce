//! Configuration errors raised when a level cannot be started.

use std::fmt;

use crate::types::{Coord, LevelConfig, MIN_TILE_KINDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Fewer tile kinds than a board can be filled with.
    TooFewTileKinds { kinds: u8 },
    /// Zero rows or zero columns.
    EmptyBoard { rows: usize, cols: usize },
    /// Every generation attempt dead-ended (only reachable with two kinds).
    GenerationExhausted { attempts: u32 },
    /// A prepared grid does not have the level's dimensions.
    GridShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// A prepared grid holds an empty cell or an out-of-range kind.
    GridCell { at: Coord },
    /// A level that grants no moves can never be played.
    NoMoves { level: u32 },
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::TooFewTileKinds { .. } => "too_few_tile_kinds",
            ConfigError::EmptyBoard { .. } => "empty_board",
            ConfigError::GenerationExhausted { .. } => "generation_exhausted",
            ConfigError::GridShape { .. } => "grid_shape",
            ConfigError::GridCell { .. } => "grid_cell",
            ConfigError::NoMoves { .. } => "no_moves",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TooFewTileKinds { kinds } => {
                write!(f, "need at least {MIN_TILE_KINDS} tile kinds, got {kinds}")
            }
            ConfigError::EmptyBoard { rows, cols } => {
                write!(f, "board must be at least 1x1, got {rows}x{cols}")
            }
            ConfigError::GenerationExhausted { attempts } => {
                write!(f, "no match-free grid found after {attempts} attempts")
            }
            ConfigError::GridShape { expected, actual } => write!(
                f,
                "grid is {}x{}, level expects {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            ConfigError::GridCell { at } => {
                write!(f, "invalid cell at row {}, col {}", at.row, at.col)
            }
            ConfigError::NoMoves { level } => write!(f, "level {level} has no moves"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Fail fast on parameters that cannot produce a board.
pub fn validate_board(rows: usize, cols: usize, tile_kinds: u8) -> Result<(), ConfigError> {
    if tile_kinds < MIN_TILE_KINDS {
        return Err(ConfigError::TooFewTileKinds { kinds: tile_kinds });
    }
    if rows < 1 || cols < 1 {
        return Err(ConfigError::EmptyBoard { rows, cols });
    }
    Ok(())
}

/// Board checks plus a non-zero move budget.
pub fn validate_level(level: &LevelConfig, tile_kinds: u8) -> Result<(), ConfigError> {
    validate_board(level.rows, level.cols, tile_kinds)?;
    if level.moves == 0 {
        return Err(ConfigError::NoMoves { level: level.id });
    }
    Ok(())
}
