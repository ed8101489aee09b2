//! Round assignment validation.
//!
//! An assignment is legal when its podium tiers could have come from an
//! actual ranking with ties: nobody is second or third without a first, a
//! tie for first leaves no second place, and a third place needs exactly
//! two players ahead of it.

use crate::game::Placement;

use super::{RoundAssignment, TierCounts};

/// Returns true if the round's placements are legal. An all-unplaced round is legal.
pub fn is_round_placement_valid(assignment: &RoundAssignment) -> bool {
    placements_valid(assignment.values())
}

/// Same check over bare placements, in any order.
pub fn placements_valid<'a>(placements: impl IntoIterator<Item = &'a Placement>) -> bool {
    counts_valid(TierCounts::tally(placements))
}

fn counts_valid(c: TierCounts) -> bool {
    if c.podium() == 0 {
        return true;
    }
    if c.first == 0 {
        return false;
    }
    if c.first >= 2 && c.second > 0 {
        return false;
    }
    if c.third > 0 && c.ahead_of_third() != 2 {
        return false;
    }
    true
}

/// Returns true if too many players are ahead of a tier for that tier to
/// exist. A merely missing higher tier (a second place with no first yet)
/// is not over-occupancy.
pub fn is_round_over_occupied(assignment: &RoundAssignment) -> bool {
    counts_overflow(TierCounts::tally(assignment.values()))
}

fn counts_overflow(c: TierCounts) -> bool {
    (c.first >= 2 && c.second > 0) || (c.third > 0 && c.ahead_of_third() > 2)
}
