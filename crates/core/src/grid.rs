//! Grid module - the tile board
//!
//! A rows x cols table of tile kinds stored as a flat row-major vector.
//! Coordinates: (row, col), row 0 at the top, rows increase downward.
//! A cell is `None` only transiently, between clearing a match and refilling.

use crate::types::{Cell, Coord, TileKind};

/// The game grid using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Build a fully populated grid from rows of kinds.
    ///
    /// Returns None when the rows are ragged.
    pub fn from_rows<R: AsRef<[TileKind]>>(rows: &[R]) -> Option<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if rows.iter().any(|r| r.as_ref().len() != cols) {
            return None;
        }
        let cells = rows
            .iter()
            .flat_map(|r| r.as_ref().iter().map(|&k| Some(k)))
            .collect();
        Some(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, at: Coord) -> Option<usize> {
        if !at.in_bounds(self.rows, self.cols) {
            return None;
        }
        Some(at.row * self.cols + at.col)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, at: Coord) -> bool {
        at.in_bounds(self.rows, self.cols)
    }

    /// Get cell at `at`.
    /// Returns None if out of bounds
    pub fn get(&self, at: Coord) -> Option<Cell> {
        self.index(at).map(|idx| self.cells[idx])
    }

    /// Kind at `at`, or None when out of bounds or empty.
    pub fn kind(&self, at: Coord) -> Option<TileKind> {
        self.get(at).flatten()
    }

    /// Set cell at `at`.
    /// Returns false if out of bounds
    pub fn set(&mut self, at: Coord, cell: Cell) -> bool {
        match self.index(at) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange two cells. Returns false (and leaves the grid alone) if either is
    /// out of bounds.
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// True when any cell is empty.
    pub fn has_empty(&self) -> bool {
        self.cells.iter().any(|c| c.is_none())
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate `(Coord, Cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (Coord::new(i / cols, i % cols), cell))
    }

    /// Encode cells as bytes for snapshots: 0 = empty, kind + 1 otherwise.
    pub fn write_u8_cells(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|c| c.map_or(0, |k| k.saturating_add(1))));
    }
}
