use crate::grid::Grid;
use crate::session::Phase;
use crate::types::{Coord, TileKind};

/// Read-only view of a session for renderers and logs.
///
/// Cells use the byte encoding of [`Grid::write_u8_cells`]: 0 = empty,
/// `kind + 1` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<u8>,
    pub board_hash: u64,
    pub level_id: u32,
    pub score: u32,
    pub moves_remaining: u32,
    pub target_score: u32,
    pub phase: Phase,
    pub episode_id: u32,
    pub seed: u32,
}

impl SessionSnapshot {
    /// Overwrite the board part (cells, size, hash) from `grid`.
    ///
    /// Playback uses this to show intermediate cascade grids without touching
    /// the score/moves part.
    pub fn write_grid(&mut self, grid: &Grid) {
        self.rows = grid.rows();
        self.cols = grid.cols();
        grid.write_u8_cells(&mut self.cells);
        self.board_hash = fnv1a64(&self.cells);
    }

    /// Kind at `at`, None when empty or out of bounds.
    pub fn kind(&self, at: Coord) -> Option<TileKind> {
        if !at.in_bounds(self.rows, self.cols) {
            return None;
        }
        match self.cells[at.row * self.cols + at.col] {
            0 => None,
            v => Some(v - 1),
        }
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            cells: Vec::new(),
            board_hash: fnv1a64(&[]),
            level_id: 0,
            score: 0,
            moves_remaining: 0,
            target_score: 0,
            phase: Phase::Idle,
            episode_id: 0,
            seed: 0,
        }
    }
}

/// FNV-1a 64-bit.
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}
