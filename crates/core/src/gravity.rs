//! Gravity - column compaction and refill
//!
//! Each column is compacted independently with a bottom-up write pointer, the
//! same two-pointer sweep used for clearing full rows: surviving tiles keep their
//! relative order and settle at the bottom. Vacated cells at the top are then
//! refilled with fresh draws.

use crate::grid::Grid;
use crate::matcher::MatchSet;
use crate::rng::SimpleRng;
use crate::types::Coord;

/// Empty every matched cell. Returns how many cells were cleared.
pub fn clear_matches(grid: &mut Grid, matches: &MatchSet) -> usize {
    matches
        .iter()
        .filter(|&&at| grid.set(at, None))
        .count()
}

/// Let tiles fall. Returns the number of empty cells left at the top.
pub fn collapse(grid: &mut Grid) -> usize {
    let rows = grid.rows();
    let mut vacated = 0;

    for col in 0..grid.cols() {
        let mut write_row = rows;

        // Scan from bottom to top
        for read_row in (0..rows).rev() {
            let cell = grid.get(Coord::new(read_row, col)).flatten();
            if cell.is_some() {
                write_row -= 1;
                if write_row != read_row {
                    grid.set(Coord::new(write_row, col), cell);
                    grid.set(Coord::new(read_row, col), None);
                }
            }
        }

        vacated += write_row;
    }

    vacated
}

/// Fill every empty cell with a fresh kind in [0, tile_kinds).
pub fn refill(grid: &mut Grid, tile_kinds: u8, rng: &mut SimpleRng) -> usize {
    let mut filled = 0;
    for col in 0..grid.cols() {
        for row in (0..grid.rows()).rev() {
            let at = Coord::new(row, col);
            if grid.get(at) == Some(None) {
                grid.set(at, Some(rng.next_kind(tile_kinds)));
                filled += 1;
            }
        }
    }
    filled
}

/// Collapse then refill. Afterwards no cell is empty.
pub fn collapse_and_refill(grid: &mut Grid, tile_kinds: u8, rng: &mut SimpleRng) {
    collapse(grid);
    refill(grid, tile_kinds, rng);
    debug_assert!(!grid.has_empty());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(grid: &Grid, col: usize) -> Vec<Option<u8>> {
        (0..grid.rows())
            .map(|r| grid.get(Coord::new(r, col)).flatten())
            .collect()
    }

    #[test]
    fn collapse_preserves_order_of_survivors() {
        let mut grid = Grid::from_rows(&[[1u8], [2], [3], [4], [0]]).unwrap();
        grid.set(Coord::new(1, 0), None);
        grid.set(Coord::new(3, 0), None);

        let vacated = collapse(&mut grid);
        assert_eq!(vacated, 2);
        assert_eq!(column(&grid, 0), vec![None, None, Some(1), Some(3), Some(0)]);
    }

    #[test]
    fn collapse_is_per_column() {
        let mut grid = Grid::from_rows(&[[1u8, 2], [3, 4], [0, 1]]).unwrap();
        grid.set(Coord::new(2, 0), None);

        collapse(&mut grid);
        assert_eq!(column(&grid, 0), vec![None, Some(1), Some(3)]);
        assert_eq!(column(&grid, 1), vec![Some(2), Some(4), Some(1)]);
    }

    #[test]
    fn collapse_full_column_is_noop() {
        let mut grid = Grid::from_rows(&[[1u8], [2], [3]]).unwrap();
        let before = grid.clone();
        assert_eq!(collapse(&mut grid), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn refill_leaves_no_empty_cells() {
        let mut grid = Grid::from_rows(&[[1u8, 2, 3], [3, 4, 0], [0, 1, 2]]).unwrap();
        for c in 0..3 {
            grid.set(Coord::new(1, c), None);
        }
        let mut rng = SimpleRng::new(9);
        collapse_and_refill(&mut grid, 5, &mut rng);

        assert!(!grid.has_empty());
        assert!(grid.cells().iter().all(|c| matches!(c, Some(k) if *k < 5)));
        // Survivors sit at the bottom in their original order.
        assert_eq!(grid.kind(Coord::new(1, 0)), Some(1));
        assert_eq!(grid.kind(Coord::new(2, 0)), Some(0));
        assert_eq!(grid.kind(Coord::new(1, 2)), Some(3));
    }

    #[test]
    fn clear_matches_counts_cleared_cells() {
        let mut grid = Grid::from_rows(&[[1u8, 1, 1]]).unwrap();
        let matches: MatchSet = [Coord::new(0, 0), Coord::new(0, 2), Coord::new(5, 5)]
            .into_iter()
            .collect();
        assert_eq!(clear_matches(&mut grid, &matches), 2);
        assert_eq!(grid.cells().iter().filter(|c| c.is_none()).count(), 2);
    }
}
