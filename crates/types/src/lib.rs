//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data (plus serde derives for the configuration
//! surface), usable from core logic, the terminal view and the input layer alike.
//!
//! # Coordinates
//!
//! Cells are addressed as `(row, col)`, both zero-based. Row 0 is the top of the
//! board and rows increase downward, so "falling" means increasing `row`.
//!
//! # Default Levels
//!
//! | Level | Size | Moves | Target |
//! |-------|------|-------|--------|
//! | 1 | 7x7 | 18 | 900 |
//! | 2 | 8x8 | 16 | 1500 |
//! | 3 | 9x9 | 15 | 2200 |
//! | 4 | 9x9 | 13 | 2900 |
//! | 5 | 10x10 | 12 | 3700 |
//!
//! # Animation Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep of the terminal loop (~60 FPS) |
//! | `SWAP_REVERT_MS` | 80 | How long a non-matching swap stays visible |
//! | `POP_MS` | 120 | How long matched tiles flash before clearing |
//! | `FALL_DELAY_MS` | 60 | Per-row fall delay (a fall frame lasts `rows * 60`) |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{Coord, Direction, GameAction, DEFAULT_LEVELS};
//!
//! let a = Coord::new(2, 3);
//! assert!(a.is_adjacent(Coord::new(2, 4)));
//! assert!(!a.is_adjacent(Coord::new(3, 4)));
//!
//! assert_eq!(a.step(Direction::Up, 7, 7), Some(Coord::new(1, 3)));
//! assert_eq!(Coord::new(0, 0).step(Direction::Left, 7, 7), None);
//!
//! assert_eq!(GameAction::from_str("swapLeft"), Some(GameAction::Swap(Direction::Left)));
//! assert_eq!(DEFAULT_LEVELS[0].target_score, 900);
//! ```

use serde::{Deserialize, Serialize};

/// Tile kind identifier, always in `[0, tile_kinds)`.
pub type TileKind = u8;

/// Cell on the board (None = transiently empty during a cascade step).
pub type Cell = Option<TileKind>;

/// Minimum length of a matching run.
pub const MIN_RUN: usize = 3;

/// Fewer kinds than this cannot fill a board at all.
pub const MIN_TILE_KINDS: u8 = 2;

/// Number of tile kinds in the stock tile set.
pub const DEFAULT_TILE_KINDS: u8 = 5;

/// Base points per cleared tile.
pub const DEFAULT_PER_TILE: u32 = 20;

/// Bonus factor for every tile past the third in one clear.
pub const DEFAULT_BONUS_PER_EXTRA_TILE: u32 = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// How long a rejected swap is shown before it reverts.
pub const SWAP_REVERT_MS: u32 = 80;

/// How long matched tiles are highlighted before they clear.
pub const POP_MS: u32 = 120;

/// Per-row delay of the fall animation.
pub const FALL_DELAY_MS: u32 = 60;

/// A board position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to `other`.
    pub fn distance(self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when `other` shares an edge with `self`.
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.distance(other) == 1
    }

    /// True when the coordinate lies on a `rows` x `cols` board.
    pub fn in_bounds(self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }

    /// Neighbor in `dir`, or None when it would leave the board.
    pub fn step(self, dir: Direction, rows: usize, cols: usize) -> Option<Coord> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let next = Coord { row, col };
        next.in_bounds(rows, cols).then_some(next)
    }
}

/// Orthogonal direction on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (row, col) offset.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

}

/// Immutable per-level parameters.
///
/// Field names serialize in camelCase (`targetScore`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub id: u32,
    pub rows: usize,
    pub cols: usize,
    pub moves: u32,
    pub target_score: u32,
}

impl LevelConfig {
    pub const fn new(id: u32, rows: usize, cols: usize, moves: u32, target_score: u32) -> Self {
        Self {
            id,
            rows,
            cols,
            moves,
            target_score,
        }
    }
}

/// Stock level table.
pub const DEFAULT_LEVELS: [LevelConfig; 5] = [
    LevelConfig::new(1, 7, 7, 18, 900),
    LevelConfig::new(2, 8, 8, 16, 1500),
    LevelConfig::new(3, 9, 9, 15, 2200),
    LevelConfig::new(4, 9, 9, 13, 2900),
    LevelConfig::new(5, 10, 10, 12, 3700),
];

/// Global game rules shared by every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rules {
    pub tile_kinds: u8,
    pub per_tile: u32,
    pub bonus_per_extra_tile: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            tile_kinds: DEFAULT_TILE_KINDS,
            per_tile: DEFAULT_PER_TILE,
            bonus_per_extra_tile: DEFAULT_BONUS_PER_EXTRA_TILE,
        }
    }
}

/// Presentation pacing. Never consulted by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationConfig {
    pub swap_ms: u32,
    pub pop_ms: u32,
    pub fall_delay_ms: u32,
}

impl AnimationConfig {
    /// Duration of one fall frame on a board with `rows` rows.
    pub fn fall_ms(&self, rows: usize) -> u32 {
        self.fall_delay_ms.saturating_mul(rows as u32)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            swap_ms: SWAP_REVERT_MS,
            pop_ms: POP_MS,
            fall_delay_ms: FALL_DELAY_MS,
        }
    }
}

/// Player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    /// Select the tile under the cursor, or swap with the selected tile.
    Select,
    /// Swap the selected (or hovered) tile with its neighbor.
    Swap(Direction),
    Cancel,
    Restart,
    NextLevel,
}

impl GameAction {
    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "select" => Some(GameAction::Select),
            "swapup" => Some(GameAction::Swap(Direction::Up)),
            "swapdown" => Some(GameAction::Swap(Direction::Down)),
            "swapleft" => Some(GameAction::Swap(Direction::Left)),
            "swapright" => Some(GameAction::Swap(Direction::Right)),
            "cancel" => Some(GameAction::Cancel),
            "restart" => Some(GameAction::Restart),
            "nextlevel" => Some(GameAction::NextLevel),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::Select => "select",
            GameAction::Swap(Direction::Up) => "swapUp",
            GameAction::Swap(Direction::Down) => "swapDown",
            GameAction::Swap(Direction::Left) => "swapLeft",
            GameAction::Swap(Direction::Right) => "swapRight",
            GameAction::Cancel => "cancel",
            GameAction::Restart => "restart",
            GameAction::NextLevel => "nextLevel",
        }
    }

    /// Cursor movement direction, if this is a cursor action.
    pub fn cursor_direction(&self) -> Option<Direction> {
        match self {
            GameAction::CursorUp => Some(Direction::Up),
            GameAction::CursorDown => Some(Direction::Down),
            GameAction::CursorLeft => Some(Direction::Left),
            GameAction::CursorRight => Some(Direction::Right),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_table_matches_stock_game() {
        let ids: Vec<u32> = DEFAULT_LEVELS.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(DEFAULT_LEVELS[0], LevelConfig::new(1, 7, 7, 18, 900));
        assert_eq!(DEFAULT_LEVELS[4], LevelConfig::new(5, 10, 10, 12, 3700));
    }

    #[test]
    fn coord_adjacency_is_manhattan_one() {
        let c = Coord::new(3, 3);
        assert!(c.is_adjacent(Coord::new(2, 3)));
        assert!(c.is_adjacent(Coord::new(3, 4)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coord::new(4, 4)));
        assert!(!c.is_adjacent(Coord::new(3, 5)));
    }

    #[test]
    fn coord_step_stays_on_board() {
        let corner = Coord::new(6, 6);
        assert_eq!(corner.step(Direction::Down, 7, 7), None);
        assert_eq!(corner.step(Direction::Right, 7, 7), None);
        assert_eq!(corner.step(Direction::Up, 7, 7), Some(Coord::new(5, 6)));
        assert_eq!(Coord::new(0, 3).step(Direction::Up, 7, 7), None);
    }

    #[test]
    fn coord_orders_row_major() {
        assert!(Coord::new(0, 5) < Coord::new(1, 0));
        assert!(Coord::new(2, 1) < Coord::new(2, 2));
    }

    #[test]
    fn game_action_string_roundtrip() {
        for action in [
            GameAction::CursorUp,
            GameAction::Select,
            GameAction::Swap(Direction::Right),
            GameAction::Restart,
            GameAction::NextLevel,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
        assert_eq!(GameAction::from_str("jump"), None);
    }

    #[test]
    fn fall_frame_scales_with_rows() {
        let anim = AnimationConfig::default();
        assert_eq!(anim.fall_ms(7), 420);
        assert_eq!(anim.fall_ms(10), 600);
    }
}
