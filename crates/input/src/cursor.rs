//! Board cursor for keyboard play.

use crate::types::{GRID_COLS, GRID_ROWS};

/// A `(row, col)` position on the board, always in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    row: u8,
    col: u8,
}

impl Cursor {
    pub fn new(row: u8, col: u8) -> Self {
        Self {
            row: row.min(GRID_ROWS - 1),
            col: col.min(GRID_COLS - 1),
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    pub fn position(&self) -> (u8, u8) {
        (self.row, self.col)
    }

    /// Move by a delta, stopping at the board edges
    pub fn move_by(&mut self, d_row: i8, d_col: i8) {
        self.row = (self.row as i16 + d_row as i16).clamp(0, GRID_ROWS as i16 - 1) as u8;
        self.col = (self.col as i16 + d_col as i16).clamp(0, GRID_COLS as i16 - 1) as u8;
    }

    pub fn set(&mut self, row: u8, col: u8) {
        *self = Self::new(row, col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_bottom_left() {
        assert_eq!(Cursor::default().position(), (0, 0));
    }

    #[test]
    fn clamps_at_edges() {
        let mut c = Cursor::default();
        c.move_by(-1, -1);
        assert_eq!(c.position(), (0, 0));

        c.move_by(100, 100);
        assert_eq!(c.position(), (GRID_ROWS - 1, GRID_COLS - 1));
    }

    #[test]
    fn new_clamps_out_of_range() {
        assert_eq!(Cursor::new(200, 200).position(), (GRID_ROWS - 1, GRID_COLS - 1));
    }

    #[test]
    fn moves_one_step() {
        let mut c = Cursor::new(3, 2);
        c.move_by(1, -1);
        assert_eq!(c.position(), (4, 1));
    }
}
