use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use sumstack::input::{map_key, map_mouse, Cursor, InputCommand};
use sumstack::types::{GameMode, GameStatus, GRID_COLS, GRID_ROWS};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn same_key_means_different_things_per_screen() {
    assert_eq!(
        map_key(key(KeyCode::Enter), GameStatus::Menu),
        Some(InputCommand::Start(GameMode::Classic))
    );
    assert_eq!(
        map_key(key(KeyCode::Enter), GameStatus::Playing),
        Some(InputCommand::SelectAtCursor)
    );
    assert_eq!(
        map_key(key(KeyCode::Enter), GameStatus::GameOver),
        Some(InputCommand::Restart)
    );
}

#[test]
fn ctrl_c_quits_everywhere() {
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    for status in [GameStatus::Menu, GameStatus::Playing, GameStatus::GameOver] {
        assert_eq!(map_key(ctrl_c, status), Some(InputCommand::Quit));
    }
}

#[test]
fn cursor_walk_stays_on_the_board() {
    let mut cursor = Cursor::default();
    for _ in 0..20 {
        if let Some(InputCommand::MoveCursor { d_row, d_col }) =
            map_key(key(KeyCode::Up), GameStatus::Playing)
        {
            cursor.move_by(d_row, d_col);
        }
        if let Some(InputCommand::MoveCursor { d_row, d_col }) =
            map_key(key(KeyCode::Right), GameStatus::Playing)
        {
            cursor.move_by(d_row, d_col);
        }
    }
    assert_eq!(cursor.position(), (GRID_ROWS - 1, GRID_COLS - 1));
}

#[test]
fn only_left_press_clicks() {
    let ev = |kind| MouseEvent {
        kind,
        column: 12,
        row: 4,
        modifiers: KeyModifiers::NONE,
    };
    assert_eq!(
        map_mouse(ev(MouseEventKind::Down(MouseButton::Left))),
        Some(InputCommand::Click { x: 12, y: 4 })
    );
    assert_eq!(map_mouse(ev(MouseEventKind::Up(MouseButton::Left))), None);
    assert_eq!(map_mouse(ev(MouseEventKind::Down(MouseButton::Right))), None);
    assert_eq!(map_mouse(ev(MouseEventKind::Moved)), None);
}
