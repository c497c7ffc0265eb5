//! Board module - flat block collection with gravity and row-shift rules
//!
//! The board stores blocks as a flat list; `(row, col)` is placement only.
//! Row 0 is the bottom row. Spawning a row pushes everything up by one, and a
//! block pushed to `row >= GRID_ROWS` means the board overflowed.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;
use crate::types::{BlockId, GRID_COLS, GRID_ROWS, MAX_BLOCKS, MAX_BLOCK_VALUE};

/// A numbered block on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub value: u8,
    pub row: u8,
    pub col: u8,
}

impl Block {
    pub fn new(id: BlockId, value: u8, row: u8, col: u8) -> Self {
        Self { id, value, row, col }
    }
}

/// Draw a uniformly random block value in `[1, MAX_BLOCK_VALUE]`.
pub fn random_value(rng: &mut impl RandomSource) -> u8 {
    rng.range_inclusive(1, MAX_BLOCK_VALUE as u32) as u8
}

/// Grid view of the board, indexed `[row][col]`.
pub type Grid = [[Option<Block>; GRID_COLS as usize]; GRID_ROWS as usize];

/// Flat collection of blocks
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    blocks: Vec<Block>,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            blocks: Vec::with_capacity(MAX_BLOCKS + GRID_COLS as usize),
        }
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.get(id).is_some()
    }

    /// Block placed at `(row, col)`, if any
    pub fn at(&self, row: u8, col: u8) -> Option<&Block> {
        self.blocks.iter().find(|b| b.row == row && b.col == col)
    }

    /// Number of blocks stacked in a column
    pub fn column_height(&self, col: u8) -> u8 {
        self.blocks.iter().filter(|b| b.col == col).count() as u8
    }

    /// Highest occupied row, if the board has any blocks
    pub fn max_row(&self) -> Option<u8> {
        self.blocks.iter().map(|b| b.row).max()
    }

    /// Add a block
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Append a full row of random blocks at `row`, allocating ids from `next_id`.
    pub fn spawn_row(&mut self, row: u8, next_id: &mut u32, rng: &mut impl RandomSource) {
        for col in 0..GRID_COLS {
            let id = BlockId(*next_id);
            *next_id = next_id.wrapping_add(1);
            self.blocks.push(Block::new(id, random_value(rng), row, col));
        }
    }

    /// Remove every block whose id is listed, returning how many were removed.
    pub fn remove_ids(&mut self, ids: &[BlockId]) -> u32 {
        let before = self.blocks.len();
        self.blocks.retain(|b| !ids.contains(&b.id));
        (before - self.blocks.len()) as u32
    }

    /// Apply gravity: within each column, blocks keep their relative order and
    /// are renumbered to rows `0, 1, 2, ...` with no gaps.
    pub fn compact(&mut self) {
        for col in 0..GRID_COLS {
            let mut column: ArrayVec<usize, MAX_BLOCKS> = ArrayVec::new();
            for (i, b) in self.blocks.iter().enumerate() {
                if b.col == col && column.try_push(i).is_err() {
                    break;
                }
            }

            // Stable: ties keep their list order.
            column.sort_by_key(|&i| self.blocks[i].row);

            for (row, &i) in column.iter().enumerate() {
                self.blocks[i].row = row as u8;
            }
        }
    }

    /// Push every block up by one row (room for a new bottom row).
    pub fn shift_rows(&mut self) {
        for b in &mut self.blocks {
            b.row = b.row.saturating_add(1);
        }
    }

    /// Whether any block sits outside the board
    pub fn overflows(&self) -> bool {
        self.blocks.iter().any(|b| b.row >= GRID_ROWS)
    }

    /// Whether every column is a dense stack `0..k` with no floating blocks
    pub fn is_compact(&self) -> bool {
        (0..GRID_COLS).all(|col| {
            let mut rows: ArrayVec<u8, MAX_BLOCKS> = ArrayVec::new();
            for b in self.blocks.iter().filter(|b| b.col == col) {
                if rows.try_push(b.row).is_err() {
                    return false;
                }
            }
            rows.sort_unstable();
            rows.iter().enumerate().all(|(i, &r)| r as usize == i)
        })
    }

    /// Whether all ids are distinct
    pub fn ids_unique(&self) -> bool {
        self.blocks
            .iter()
            .enumerate()
            .all(|(i, a)| self.blocks[i + 1..].iter().all(|b| b.id != a.id))
    }

    /// Write the on-board blocks into a `[row][col]` grid (blocks outside are skipped).
    pub fn write_grid(&self, out: &mut Grid) {
        *out = [[None; GRID_COLS as usize]; GRID_ROWS as usize];
        for b in &self.blocks {
            if b.row < GRID_ROWS && b.col < GRID_COLS {
                out[b.row as usize][b.col as usize] = Some(*b);
            }
        }
    }

    pub fn grid(&self) -> Grid {
        let mut g = [[None; GRID_COLS as usize]; GRID_ROWS as usize];
        self.write_grid(&mut g);
        g
    }
}
