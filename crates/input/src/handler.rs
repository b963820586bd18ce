//! Cursor and selection handling for swap requests.
//!
//! Turns a stream of [`GameAction`]s into swap requests. A swap can be made two
//! ways: select a tile, move the cursor to a neighbour and select again, or
//! press a directional swap key to exchange the tile under the cursor (or the
//! selected tile) with its neighbour.

use crate::types::{Coord, GameAction};

/// What the game loop should do in response to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Swap { from: Coord, to: Coord },
    Restart,
    NextLevel,
}

#[derive(Debug, Clone)]
pub struct InputHandler {
    cursor: Coord,
    selected: Option<Coord>,
    rows: usize,
    cols: usize,
}

impl InputHandler {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cursor: Coord::new(0, 0),
            selected: None,
            rows,
            cols,
        }
    }

    /// Adopt a new board size. Keeps the cursor on the board and drops any
    /// selection.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.cursor = Coord::new(
            self.cursor.row.min(rows.saturating_sub(1)),
            self.cursor.col.min(cols.saturating_sub(1)),
        );
        self.selected = None;
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn handle_action(&mut self, action: GameAction) -> Option<InputEvent> {
        if let Some(dir) = action.cursor_direction() {
            if let Some(next) = self.cursor.step(dir, self.rows, self.cols) {
                self.cursor = next;
            }
            return None;
        }

        match action {
            GameAction::Select => self.select(),
            GameAction::Swap(dir) => {
                let from = self.selected.unwrap_or(self.cursor);
                let to = from.step(dir, self.rows, self.cols)?;
                self.cursor = to;
                self.selected = None;
                Some(InputEvent::Swap { from, to })
            }
            GameAction::Cancel => {
                self.selected = None;
                None
            }
            GameAction::Restart => {
                self.selected = None;
                Some(InputEvent::Restart)
            }
            GameAction::NextLevel => Some(InputEvent::NextLevel),
            _ => None,
        }
    }

    fn select(&mut self) -> Option<InputEvent> {
        match self.selected {
            None => {
                self.selected = Some(self.cursor);
                None
            }
            Some(sel) if sel == self.cursor => {
                self.selected = None;
                None
            }
            Some(sel) if sel.is_adjacent(self.cursor) => {
                self.selected = None;
                Some(InputEvent::Swap {
                    from: sel,
                    to: self.cursor,
                })
            }
            Some(_) => {
                self.selected = Some(self.cursor);
                None
            }
        }
    }
}
