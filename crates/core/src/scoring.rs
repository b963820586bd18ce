//! Scoring module
//!
//! One delta per cascade iteration, computed from that iteration's cleared-tile
//! count. Clears larger than three earn `extra * bonus * count` on top of the base
//! points, so the bonus grows with the square of the clear size.

use crate::types::{Rules, MIN_RUN};

/// Score calculation result for one cascade iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// `cleared * per_tile`.
    pub base: u32,
    /// Over-three bonus added on top of `base`.
    pub bonus: u32,
    pub total: u32,
}

/// Score delta for clearing `cleared` tiles at once.
pub fn score_for(cleared: usize, per_tile: u32, bonus_per_extra_tile: u32) -> u32 {
    calculate_score(cleared, per_tile, bonus_per_extra_tile).total
}

/// Score delta with its base/bonus breakdown.
pub fn calculate_score(cleared: usize, per_tile: u32, bonus_per_extra_tile: u32) -> ScoreResult {
    let count = u32::try_from(cleared).unwrap_or(u32::MAX);
    let base = count.saturating_mul(per_tile);

    let extra = count.saturating_sub(MIN_RUN as u32);
    let bonus = extra
        .saturating_mul(bonus_per_extra_tile)
        .saturating_mul(count);

    ScoreResult {
        base,
        bonus,
        total: base.saturating_add(bonus),
    }
}

/// Score delta under a rule set.
pub fn score_with_rules(cleared: usize, rules: &Rules) -> ScoreResult {
    calculate_score(cleared, rules.per_tile, rules.bonus_per_extra_tile)
}
