//! Round repair after an edit.
//!
//! Changing one player's placement can invalidate others (a second first
//! place closes second, which can in turn reopen third). Tiers are settled
//! from the top down: firsts are always kept, seconds are checked against
//! the firsts, and thirds against the firsts and the surviving seconds.
//! Players of one tier share the same constraint, so they are checked
//! against the same snapshot and the result does not depend on player
//! order.

use tracing::debug;

use crate::game::{Placement, PODIUM};

use super::options::is_choice_open;
use super::RoundAssignment;

/// Resets every placement no longer open to its player to unplaced.
///
/// Idempotent: a normalized assignment is returned unchanged.
pub fn normalize_placements_for_round(
    assignment: &RoundAssignment,
    total_players: usize,
) -> RoundAssignment {
    let mut normalized = assignment.clone();

    for tier in PODIUM {
        let snapshot = normalized.clone();
        for (player_id, placement) in normalized.iter_mut() {
            if *placement != tier {
                continue;
            }
            if !is_choice_open(&snapshot, player_id, tier, total_players) {
                debug!(player = %player_id, from = tier.label(), "placement reset to unplaced");
                *placement = Placement::Unplaced;
            }
        }
    }

    normalized
}
