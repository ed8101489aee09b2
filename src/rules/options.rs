//! Placement choices still open to one player.

use crate::game::Placement;

use super::{RoundAssignment, TierCounts};

/// Returns the placements `player_id` may pick, in order first, second,
/// third, unplaced. The player's own current value is not counted.
///
/// First and unplaced are always offered. Second closes once two other
/// players share first. Third needs a free podium seat among
/// `total_players` and at most two other players at first or second.
pub fn valid_placements(
    assignment: &RoundAssignment,
    player_id: &str,
    total_players: usize,
) -> Vec<Placement> {
    placements_for_others(TierCounts::excluding(assignment, player_id), total_players)
}

/// Choices given the tier counts of every other player.
pub fn placements_for_others(others: TierCounts, total_players: usize) -> Vec<Placement> {
    let mut choices = Vec::with_capacity(4);
    choices.push(Placement::First);
    if others.first < 2 {
        choices.push(Placement::Second);
    }
    if others.podium() < total_players && others.ahead_of_third() < 3 {
        choices.push(Placement::Third);
    }
    choices.push(Placement::Unplaced);
    choices
}

/// Returns true if `placement` is among the choices open to the player.
pub fn is_choice_open(
    assignment: &RoundAssignment,
    player_id: &str,
    placement: Placement,
    total_players: usize,
) -> bool {
    placements_for_others(TierCounts::excluding(assignment, player_id), total_players)
        .contains(&placement)
}
