//! Per-category points, totals, and final ranking.

use crate::game::{CategoryId, InProgressGame, ScoringMode, NECTAR_CATEGORIES};

use super::end_of_round::resolve_end_of_round_goals;
use super::nectar::{resolve_nectar_scores, NectarCounts};

/// The resolved results sheet of a game.
///
/// `points[c][p]` holds the points of player `p` in category `categories[c]`,
/// with players in seating order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSheet {
    pub player_ids: Vec<String>,
    pub categories: Vec<CategoryId>,
    pub points: Vec<Vec<u32>>,
    pub totals: Vec<u32>,
    pub ranks: Vec<u32>,
}

impl ScoreSheet {
    pub fn total(&self, player_id: &str) -> Option<u32> {
        self.index_of(player_id).map(|i| self.totals[i])
    }

    pub fn rank(&self, player_id: &str) -> Option<u32> {
        self.index_of(player_id).map(|i| self.ranks[i])
    }

    pub fn points(&self, player_id: &str, category: CategoryId) -> Option<u32> {
        let p = self.index_of(player_id)?;
        let c = self.categories.iter().position(|&cat| cat == category)?;
        Some(self.points[c][p])
    }

    /// Ids of every player sharing the best total.
    pub fn winners(&self) -> Vec<&str> {
        winners(&self.totals)
            .into_iter()
            .map(|i| self.player_ids[i].as_str())
            .collect()
    }

    fn index_of(&self, player_id: &str) -> Option<usize> {
        self.player_ids.iter().position(|id| id == player_id)
    }
}

/// Resolves one category for every player, in seating order.
pub fn category_points(game: &InProgressGame, category: CategoryId) -> Vec<u32> {
    match category.entry_mode(game.goal_mode) {
        ScoringMode::Numeric => game
            .players
            .iter()
            .map(|p| game.numeric(&p.id, category))
            .collect(),
        ScoringMode::Placement => {
            let records: Vec<_> = game.players.iter().map(|p| game.placements(&p.id)).collect();
            resolve_end_of_round_goals(&records)
        }
        ScoringMode::Derived => {
            let counts: Vec<NectarCounts> = game
                .players
                .iter()
                .map(|p| {
                    let mut counts = NectarCounts::default();
                    for c in NECTAR_CATEGORIES {
                        counts.set(c, game.numeric(&p.id, c));
                    }
                    counts
                })
                .collect();
            resolve_nectar_scores(&counts)
        }
    }
}

/// Resolves every active category and totals the ones that count as points.
/// Totals saturate at `u32::MAX`.
pub fn score_sheet(game: &InProgressGame) -> ScoreSheet {
    let categories = game.active_categories();
    let points: Vec<Vec<u32>> = categories.iter().map(|&c| category_points(game, c)).collect();

    let mut totals: Vec<u32> = vec![0; game.player_count()];
    for (category, row) in categories.iter().zip(&points) {
        if !category.counts_toward_total() {
            continue;
        }
        for (total, &value) in totals.iter_mut().zip(row) {
            *total = total.saturating_add(value);
        }
    }

    ScoreSheet {
        player_ids: game.players.iter().map(|p| p.id.clone()).collect(),
        ranks: rank_totals(&totals),
        categories,
        points,
        totals,
    }
}

/// Competition ranking: tied totals share a rank and the next rank skips (1, 1, 3).
pub fn rank_totals(totals: &[u32]) -> Vec<u32> {
    totals
        .iter()
        .map(|t| 1 + totals.iter().filter(|&other| other > t).count() as u32)
        .collect()
}

/// Indices of every total equal to the maximum. Empty input has no winners.
pub fn winners(totals: &[u32]) -> Vec<usize> {
    let Some(&best) = totals.iter().max() else {
        return Vec::new();
    };
    totals
        .iter()
        .enumerate()
        .filter(|(_, &t)| t == best)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Placement::{First as F, Second as S};
    use crate::game::{ExpansionId, GameLimits, GameUpdate, GoalMode, PlayerSnapshot, RoundNumber};

    fn game(expansions: Vec<ExpansionId>) -> InProgressGame {
        let players = ["ana", "ben", "cy"].iter().map(|id| PlayerSnapshot::named(id)).collect();
        InProgressGame::new("g", players, expansions, GoalMode::Green, 0, &GameLimits::default()).unwrap()
    }

    fn set(game: InProgressGame, player: &str, category: CategoryId, value: u32) -> InProgressGame {
        game.apply(GameUpdate::SetScore {
            player: player.to_string(),
            category,
            value,
        })
        .unwrap()
    }

    #[test]
    fn competition_ranking() {
        assert_eq!(rank_totals(&[50, 70, 50, 40]), vec![2, 1, 2, 4]);
        assert_eq!(rank_totals(&[10, 10, 10]), vec![1, 1, 1]);
        assert!(rank_totals(&[]).is_empty());
    }

    #[test]
    fn winners_share_the_best_total() {
        assert_eq!(winners(&[3, 9, 9, 1]), vec![1, 2]);
        assert!(winners(&[]).is_empty());
    }

    #[test]
    fn sheet_sums_numeric_and_placement_categories() {
        let mut g = game(vec![ExpansionId::Base]);
        g = set(g, "ana", CategoryId::BirdScores, 30);
        g = set(g, "ben", CategoryId::BirdScores, 25);
        g = set(g, "cy", CategoryId::Eggs, 12);
        g = g
            .apply(GameUpdate::SetPlacement {
                player: "ben".to_string(),
                round: RoundNumber::Three,
                placement: F,
            })
            .unwrap()
            .apply(GameUpdate::SetPlacement {
                player: "ana".to_string(),
                round: RoundNumber::Three,
                placement: S,
            })
            .unwrap();

        let sheet = score_sheet(&g);
        assert_eq!(sheet.points("ben", CategoryId::EndOfRoundGoals), Some(6));
        assert_eq!(sheet.points("ana", CategoryId::EndOfRoundGoals), Some(3));
        assert_eq!(sheet.totals, vec![33, 31, 12]);
        assert_eq!(sheet.ranks, vec![1, 2, 3]);
        assert_eq!(sheet.winners(), vec!["ana"]);
    }

    #[test]
    fn nectar_counts_feed_derived_score_only() {
        let mut g = game(vec![ExpansionId::Base, ExpansionId::Oceania]);
        g = set(g, "ana", CategoryId::NectarForest, 3);
        g = set(g, "ben", CategoryId::NectarForest, 3);
        g = set(g, "cy", CategoryId::NectarWetland, 1);

        let sheet = score_sheet(&g);
        assert_eq!(sheet.points("ana", CategoryId::NectarForest), Some(3));
        assert_eq!(sheet.points("ana", CategoryId::NectarScore), Some(3));
        assert_eq!(sheet.points("cy", CategoryId::NectarScore), Some(5));
        // Raw counts are not added on top of the nectar score.
        assert_eq!(sheet.totals, vec![3, 3, 5]);
        assert_eq!(sheet.winners(), vec!["cy"]);
    }

    #[test]
    fn huge_scores_saturate_instead_of_overflowing() {
        let mut g = game(vec![ExpansionId::Base]);
        g = set(g, "ana", CategoryId::BirdScores, u32::MAX);
        g = set(g, "ana", CategoryId::Eggs, 1);
        g = set(g, "ben", CategoryId::Eggs, 3);

        let sheet = score_sheet(&g);
        assert_eq!(sheet.total("ana"), Some(u32::MAX));
        assert_eq!(sheet.rank("ana"), Some(1));
        assert_eq!(g.finish(0).totals["ana"], u32::MAX);
    }

    #[test]
    fn inactive_categories_are_left_out() {
        let g = game(vec![ExpansionId::Base]);
        let sheet = score_sheet(&g);
        assert!(!sheet.categories.contains(&CategoryId::HummingbirdScores));
        assert_eq!(sheet.points("ana", CategoryId::NectarScore), None);
        assert_eq!(sheet.total("zed"), None);
    }
}
