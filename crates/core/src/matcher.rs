//! Match detection - horizontal and vertical runs of 3 or more
//!
//! Every row is scanned left to right and every column top to bottom, tracking
//! the current run's kind, start and length. A run ends when the kind changes,
//! an empty cell is met, or the line ends. Empty cells never belong to a run.

use std::collections::BTreeSet;

use crate::grid::Grid;
use crate::types::{Coord, TileKind, MIN_RUN};

/// Set of matched coordinates. Membership is all that matters; the ordered set
/// just keeps logs and tests stable.
pub type MatchSet = BTreeSet<Coord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A maximal line of at least [`MIN_RUN`] identical kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    pub axis: Axis,
    /// Leftmost (horizontal) or topmost (vertical) cell.
    pub start: Coord,
    pub len: usize,
    pub kind: TileKind,
}

impl Run {
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.len).map(move |k| match self.axis {
            Axis::Horizontal => Coord::new(self.start.row, self.start.col + k),
            Axis::Vertical => Coord::new(self.start.row + k, self.start.col),
        })
    }
}

/// All runs on the grid, horizontal runs first (row-major), then vertical ones.
pub fn find_runs(grid: &Grid) -> Vec<Run> {
    let mut runs = Vec::new();

    for row in 0..grid.rows() {
        scan_line(
            grid.cols(),
            |c| grid.kind(Coord::new(row, c)),
            |start, len, kind| {
                runs.push(Run {
                    axis: Axis::Horizontal,
                    start: Coord::new(row, start),
                    len,
                    kind,
                })
            },
        );
    }

    for col in 0..grid.cols() {
        scan_line(
            grid.rows(),
            |r| grid.kind(Coord::new(r, col)),
            |start, len, kind| {
                runs.push(Run {
                    axis: Axis::Vertical,
                    start: Coord::new(start, col),
                    len,
                    kind,
                })
            },
        );
    }

    runs
}

/// Every coordinate that belongs to at least one run.
pub fn find_matches(grid: &Grid) -> MatchSet {
    let mut matched = MatchSet::new();
    for run in find_runs(grid) {
        matched.extend(run.cells());
    }
    matched
}

/// True when the grid holds at least one run.
pub fn has_match(grid: &Grid) -> bool {
    let mut found = false;
    for row in 0..grid.rows() {
        scan_line(grid.cols(), |c| grid.kind(Coord::new(row, c)), |_, _, _| {
            found = true
        });
        if found {
            return true;
        }
    }
    for col in 0..grid.cols() {
        scan_line(grid.rows(), |r| grid.kind(Coord::new(r, col)), |_, _, _| {
            found = true
        });
        if found {
            return true;
        }
    }
    false
}

/// Run-length scan over one line of `len` cells.
///
/// `emit(start, len, kind)` fires for each qualifying run.
fn scan_line(
    len: usize,
    kind_at: impl Fn(usize) -> Option<TileKind>,
    mut emit: impl FnMut(usize, usize, TileKind),
) {
    if len == 0 {
        return;
    }

    let mut run_kind = kind_at(0);
    let mut run_start = 0;
    let mut run_len = 1;

    for i in 1..len {
        let v = kind_at(i);
        if v.is_some() && v == run_kind {
            run_len += 1;
        } else {
            if let Some(kind) = run_kind {
                if run_len >= MIN_RUN {
                    emit(run_start, run_len, kind);
                }
            }
            run_kind = v;
            run_start = i;
            run_len = 1;
        }
    }

    if let Some(kind) = run_kind {
        if run_len >= MIN_RUN {
            emit(run_start, run_len, kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[u8]]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn no_matches_on_checkerboard() {
        let g = grid(&[&[0, 1, 0], &[1, 0, 1], &[0, 1, 0]]);
        assert!(find_matches(&g).is_empty());
        assert!(find_runs(&g).is_empty());
        assert!(!has_match(&g));
    }

    #[test]
    fn has_match_agrees_with_find_matches_after_every_swap() {
        use crate::generator::generate;
        use crate::rng::SimpleRng;

        let base = generate(6, 6, 4, &mut SimpleRng::new(2024)).unwrap();
        let mut agreed = 0;
        for (at, _) in base.iter() {
            for next in [Coord::new(at.row, at.col + 1), Coord::new(at.row + 1, at.col)] {
                let mut g = base.clone();
                if !g.swap(at, next) {
                    continue;
                }
                assert_eq!(has_match(&g), !find_matches(&g).is_empty(), "{at:?} <-> {next:?}");
                agreed += 1;
            }
        }
        assert_eq!(agreed, 60);
    }

    #[test]
    fn vertical_run_is_found_by_has_match() {
        let g = grid(&[&[0, 1], &[1, 1], &[0, 1]]);
        assert!(has_match(&g));
    }

    #[test]
    fn horizontal_run_at_row_end() {
        let g = grid(&[&[0, 1, 2, 2, 2], &[1, 0, 1, 0, 1]]);
        let runs = find_runs(&g);
        assert_eq!(
            runs,
            vec![Run {
                axis: Axis::Horizontal,
                start: Coord::new(0, 2),
                len: 3,
                kind: 2
            }]
        );
        let m = find_matches(&g);
        assert_eq!(m.len(), 3);
        assert!(m.contains(&Coord::new(0, 4)));
    }

    #[test]
    fn vertical_run_of_four() {
        let g = grid(&[&[3, 0], &[3, 1], &[3, 0], &[3, 1]]);
        let runs = find_runs(&g);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].axis, Axis::Vertical);
        assert_eq!(runs[0].len, 4);
        assert_eq!(find_matches(&g).len(), 4);
    }

    #[test]
    fn crossing_runs_share_a_cell_once() {
        // L/T shape: row 1 has 0,0,0 and column 1 has 0,0,0.
        let g = grid(&[&[1, 0, 2], &[0, 0, 0], &[2, 0, 1]]);
        let runs = find_runs(&g);
        assert_eq!(runs.len(), 2);
        let m = find_matches(&g);
        assert_eq!(m.len(), 5);
        assert!(m.contains(&Coord::new(1, 1)));
    }

    #[test]
    fn empty_cells_break_runs() {
        let mut g = grid(&[&[4, 4, 4, 4, 4]]);
        g.set(Coord::new(0, 2), None);
        assert!(find_matches(&g).is_empty());

        let mut g = grid(&[&[4, 4, 4, 4, 1]]);
        g.set(Coord::new(0, 0), None);
        let m = find_matches(&g);
        assert_eq!(
            m.into_iter().collect::<Vec<_>>(),
            vec![Coord::new(0, 1), Coord::new(0, 2), Coord::new(0, 3)]
        );
    }

    #[test]
    fn empty_cells_never_form_runs() {
        let g = Grid::new(3, 3);
        assert!(find_matches(&g).is_empty());
    }

    #[test]
    fn two_separate_runs_in_one_row() {
        let g = grid(&[&[1, 1, 1, 2, 0, 0, 0]]);
        let runs = find_runs(&g);
        assert_eq!(runs.len(), 2);
        assert_eq!(find_matches(&g).len(), 6);
    }

    #[test]
    fn detection_is_idempotent() {
        let g = grid(&[&[1, 1, 1], &[2, 0, 2], &[2, 0, 2]]);
        assert_eq!(find_matches(&g), find_matches(&g));
    }

    #[test]
    fn run_cells_follow_axis() {
        let run = Run {
            axis: Axis::Vertical,
            start: Coord::new(1, 2),
            len: 3,
            kind: 0,
        };
        let cells: Vec<Coord> = run.cells().collect();
        assert_eq!(
            cells,
            vec![Coord::new(1, 2), Coord::new(2, 2), Coord::new(3, 2)]
        );
    }
}
