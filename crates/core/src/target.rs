//! Target module - picks the sum the player has to hit
//!
//! A target is the sum of a random handful of blocks currently on the board,
//! clamped to `[TARGET_MIN, TARGET_MAX]`. The clamp can leave a target that the
//! originally drawn blocks no longer add up to; larger combinations may still
//! reach it.

use arrayvec::ArrayVec;

use crate::board::Block;
use crate::rng::RandomSource;
use crate::types::{
    FALLBACK_TARGET, MAX_BLOCKS, TARGET_MAX, TARGET_MIN, TARGET_PICK_MAX, TARGET_PICK_MIN,
};

/// Generate a target sum from the blocks on the board.
///
/// - Empty board: [`FALLBACK_TARGET`]
/// - Otherwise: draw `k` in `[2, 4]` (at most the number of blocks), sample `k`
///   blocks without replacement, sum their values and clamp to `[5, 30]`.
pub fn generate_target(blocks: &[Block], rng: &mut impl RandomSource) -> u32 {
    if blocks.is_empty() {
        return FALLBACK_TARGET;
    }

    let mut picks: ArrayVec<usize, MAX_BLOCKS> = (0..blocks.len().min(MAX_BLOCKS)).collect();
    let count = (rng.range_inclusive(TARGET_PICK_MIN, TARGET_PICK_MAX) as usize).min(picks.len());
    rng.shuffle_prefix(&mut picks, count);

    let sum: u32 = picks[..count].iter().map(|&i| blocks[i].value as u32).sum();
    sum.clamp(TARGET_MIN, TARGET_MAX)
}
