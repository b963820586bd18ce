//! Key mapping from terminal events to game actions.

use crate::types::{Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Arrows and hjkl move the cursor; Shift+arrow and WASD swap toward a
/// direction.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        // Cursor (or swap with Shift held)
        KeyCode::Up if shift => Some(GameAction::Swap(Direction::Up)),
        KeyCode::Down if shift => Some(GameAction::Swap(Direction::Down)),
        KeyCode::Left if shift => Some(GameAction::Swap(Direction::Left)),
        KeyCode::Right if shift => Some(GameAction::Swap(Direction::Right)),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(GameAction::CursorUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(GameAction::CursorDown),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(GameAction::CursorLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(GameAction::CursorRight)
        }

        // Directional swaps
        KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::Swap(Direction::Up)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::Swap(Direction::Down)),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::Swap(Direction::Left)),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::Swap(Direction::Right)),

        // Selection
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameAction::Select),
        KeyCode::Esc => Some(GameAction::Cancel),

        // Level flow
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(GameAction::NextLevel),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
