//! Placement legality for a single round.
//!
//! Validates a round's assignment, lists the placements still open to a
//! player, and repairs an assignment after an edit.

pub mod normalize;
pub mod options;
pub mod validate;

use std::collections::BTreeMap;

use crate::game::Placement;

pub use normalize::normalize_placements_for_round;
pub use options::valid_placements;
pub use validate::{is_round_over_occupied, is_round_placement_valid};

/// Player id to placement for exactly one round.
pub type RoundAssignment = BTreeMap<String, Placement>;

/// Number of players occupying each podium tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCounts {
    pub first: usize,
    pub second: usize,
    pub third: usize,
}

impl TierCounts {
    /// Counts podium tiers, ignoring unplaced entries.
    pub fn tally<'a>(placements: impl IntoIterator<Item = &'a Placement>) -> Self {
        let mut counts = TierCounts::default();
        for p in placements {
            counts.add(*p);
        }
        counts
    }

    /// Counts podium tiers of every player except `player_id`.
    pub fn excluding(assignment: &RoundAssignment, player_id: &str) -> Self {
        TierCounts::tally(
            assignment
                .iter()
                .filter(|(id, _)| id.as_str() != player_id)
                .map(|(_, p)| p),
        )
    }

    pub fn add(&mut self, placement: Placement) {
        match placement {
            Placement::First => self.first += 1,
            Placement::Second => self.second += 1,
            Placement::Third => self.third += 1,
            Placement::Unplaced => {}
        }
    }

    /// Players at first or second.
    pub const fn ahead_of_third(&self) -> usize {
        self.first + self.second
    }

    pub const fn podium(&self) -> usize {
        self.first + self.second + self.third
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_ignores_unplaced() {
        let counts = TierCounts::tally(&[
            Placement::First,
            Placement::Unplaced,
            Placement::Third,
            Placement::First,
        ]);
        assert_eq!(counts, TierCounts { first: 2, second: 0, third: 1 });
        assert_eq!(counts.podium(), 3);
        assert_eq!(counts.ahead_of_third(), 2);
    }

    #[test]
    fn excluding_skips_target_player() {
        let mut a = RoundAssignment::new();
        a.insert("ana".to_string(), Placement::First);
        a.insert("ben".to_string(), Placement::Second);
        let counts = TierCounts::excluding(&a, "ana");
        assert_eq!(counts, TierCounts { first: 0, second: 1, third: 0 });
    }
}
