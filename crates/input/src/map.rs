//! Key mapping from terminal events to input commands.

use crate::types::{GameMode, GameStatus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// What the player asked for, before it is resolved against the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Start a new game in the given mode (menu)
    Start(GameMode),
    /// Start again in the same mode (game over)
    Restart,
    /// Leave for the menu
    Menu,
    /// Move the board cursor; `d_row > 0` is up
    MoveCursor { d_row: i8, d_col: i8 },
    /// Toggle the block under the cursor
    SelectAtCursor,
    /// Left click at terminal coordinates
    Click { x: u16, y: u16 },
    Quit,
}

/// Map keyboard input to a command for the current screen.
pub fn map_key(key: KeyEvent, status: GameStatus) -> Option<InputCommand> {
    if should_quit(key) {
        return Some(InputCommand::Quit);
    }

    match status {
        GameStatus::Menu => match key.code {
            KeyCode::Char('1') | KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Enter => {
                Some(InputCommand::Start(GameMode::Classic))
            }
            KeyCode::Char('2') | KeyCode::Char('t') | KeyCode::Char('T') => {
                Some(InputCommand::Start(GameMode::Time))
            }
            _ => None,
        },
        GameStatus::Playing => match key.code {
            // Cursor
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
                Some(InputCommand::MoveCursor { d_row: 1, d_col: 0 })
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
                Some(InputCommand::MoveCursor { d_row: -1, d_col: 0 })
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
                Some(InputCommand::MoveCursor { d_row: 0, d_col: -1 })
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
                Some(InputCommand::MoveCursor { d_row: 0, d_col: 1 })
            }

            // Actions
            KeyCode::Char(' ') | KeyCode::Enter => Some(InputCommand::SelectAtCursor),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('m') | KeyCode::Char('M') => {
                Some(InputCommand::Menu)
            }
            _ => None,
        },
        GameStatus::GameOver => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(InputCommand::Restart),
            KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('M') => Some(InputCommand::Menu),
            _ => None,
        },
    }
}

/// Map a mouse event. Only left presses are meaningful.
pub fn map_mouse(event: MouseEvent) -> Option<InputCommand> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputCommand::Click {
            x: event.column,
            y: event.row,
        }),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
