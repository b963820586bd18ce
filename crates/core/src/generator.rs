//! Starting-grid generation.
//!
//! Cells are filled in row-major order. Each cell draws uniformly from the kinds
//! that would not complete a 3-run with the two cells to its left or the two
//! cells above it, so the finished grid has no run of 3 anywhere.
//!
//! Drawing from the allowed set is one draw per cell. At most two kinds are ever
//! excluded, so with three or more kinds a candidate always exists. With exactly
//! two kinds a cell can dead-end; the grid is then regenerated from scratch, up
//! to [`MAX_GENERATION_ATTEMPTS`] times.

use arrayvec::ArrayVec;

use crate::error::{validate_board, ConfigError};
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::types::{Coord, TileKind};

/// Whole-grid retries before giving up on a two-kind board.
pub const MAX_GENERATION_ATTEMPTS: u32 = 64;

/// Generate a rows x cols grid with no pre-existing run of 3.
pub fn generate(
    rows: usize,
    cols: usize,
    tile_kinds: u8,
    rng: &mut SimpleRng,
) -> Result<Grid, ConfigError> {
    validate_board(rows, cols, tile_kinds)?;

    for _ in 0..MAX_GENERATION_ATTEMPTS {
        if let Some(grid) = try_fill(rows, cols, tile_kinds, rng) {
            return Ok(grid);
        }
    }
    Err(ConfigError::GenerationExhausted {
        attempts: MAX_GENERATION_ATTEMPTS,
    })
}

fn try_fill(rows: usize, cols: usize, tile_kinds: u8, rng: &mut SimpleRng) -> Option<Grid> {
    let mut grid = Grid::new(rows, cols);
    let mut candidates: Vec<TileKind> = Vec::with_capacity(tile_kinds as usize);

    for row in 0..rows {
        for col in 0..cols {
            let at = Coord::new(row, col);
            let blocked = blocked_kinds(&grid, at);

            candidates.clear();
            candidates.extend((0..tile_kinds).filter(|k| !blocked.contains(k)));

            let kind = rng.pick(&candidates)?;
            grid.set(at, Some(kind));
        }
    }
    Some(grid)
}

/// Kinds that would complete a run ending at `at` with already placed cells.
pub fn blocked_kinds(grid: &Grid, at: Coord) -> ArrayVec<TileKind, 2> {
    let mut blocked = ArrayVec::new();

    if at.col >= 2 {
        let a = grid.kind(Coord::new(at.row, at.col - 1));
        let b = grid.kind(Coord::new(at.row, at.col - 2));
        if let (Some(a), Some(b)) = (a, b) {
            if a == b {
                blocked.push(a);
            }
        }
    }

    if at.row >= 2 {
        let a = grid.kind(Coord::new(at.row - 1, at.col));
        let b = grid.kind(Coord::new(at.row - 2, at.col));
        if let (Some(a), Some(b)) = (a, b) {
            if a == b && !blocked.contains(&a) {
                blocked.push(a);
            }
        }
    }

    blocked
}
