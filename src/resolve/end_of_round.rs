//! End-of-round goal scoring.
//!
//! Converts one round's placements into points using that round's table.
//! Tied players pool the points of the ranks their tie occupies and split
//! them evenly, rounding down. The leftover from an uneven split is lost.

use crate::game::{Placement, RoundNumber, ALL_ROUNDS, PODIUM, ROUND_COUNT};

/// Returns the points for each player, parallel to `placements`.
///
/// Tiers are processed first, second, third. A tie of `k` players at a tier
/// consumes that rank and the `k - 1` ranks below it, so a later tier whose
/// rank was consumed scores nothing.
pub fn resolve_end_of_round_scores(placements: &[Placement], round: RoundNumber) -> Vec<u32> {
    let mut result = vec![0; placements.len()];
    // First rank not yet consumed by a higher tier.
    let mut next_rank = 0;

    for (rank, tier) in PODIUM.iter().enumerate() {
        let group: Vec<usize> = placements
            .iter()
            .enumerate()
            .filter(|(_, p)| *p == tier)
            .map(|(i, _)| i)
            .collect();
        if group.is_empty() || rank < next_rank {
            continue;
        }

        let tie_size = group.len();
        let pooled: u32 = (rank..rank + tie_size).map(|r| round.rank_points(r)).sum();
        let each = pooled / tie_size as u32;
        for i in group {
            result[i] = each;
        }
        next_rank = rank + tie_size;
    }

    result
}

/// Sums all four rounds for each player's game-wide placement record.
pub fn resolve_end_of_round_goals(records: &[[Placement; ROUND_COUNT]]) -> Vec<u32> {
    let mut totals = vec![0; records.len()];

    for round in ALL_ROUNDS {
        let placements: Vec<Placement> = records.iter().map(|r| r[round.index()]).collect();
        for (total, points) in totals.iter_mut().zip(resolve_end_of_round_scores(&placements, round)) {
            *total += points;
        }
    }

    totals
}
