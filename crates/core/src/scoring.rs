//! Scoring module - points for cleared blocks

use crate::types::POINTS_PER_BLOCK;

/// Points awarded for a match that removed `removed` blocks
///
/// # Examples
///
/// ```
/// use sumstack_core::match_points;
///
/// assert_eq!(match_points(2), 20);
/// assert_eq!(match_points(0), 0);
/// ```
pub fn match_points(removed: u32) -> u32 {
    removed.saturating_mul(POINTS_PER_BLOCK)
}

/// Fraction of the target already selected, in whole percent (capped at 100)
///
/// Used by frontends for the sum progress bar. A zero target reads as empty.
pub fn sum_progress_percent(current_sum: u32, target_sum: u32) -> u32 {
    if target_sum == 0 {
        return 0;
    }
    (current_sum.saturating_mul(100) / target_sum).min(100)
}
