//! Completed game records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::{CategoryId, ExpansionId, GoalMode};
use super::state::{InProgressGame, PlayerSnapshot, SCHEMA_VERSION};
use crate::resolve::score_sheet;

/// A player's final standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankEntry {
    pub player_id: String,
    pub rank: u32,
}

/// A finished game with every category resolved to points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub players: Vec<PlayerSnapshot>,
    pub expansions: Vec<ExpansionId>,
    pub goal_mode: GoalMode,
    pub started_at: u64,
    pub ended_at: u64,
    pub scores: BTreeMap<String, BTreeMap<CategoryId, u32>>,
    pub totals: BTreeMap<String, u32>,
    /// Best first; ties keep seating order.
    pub ranking: Vec<RankEntry>,
    pub schema_version: u32,
}

impl Game {
    /// Resolves a draft into its final record.
    pub fn from_draft(draft: &InProgressGame, ended_at: u64) -> Game {
        let sheet = score_sheet(draft);

        let mut scores: BTreeMap<String, BTreeMap<CategoryId, u32>> = BTreeMap::new();
        for (c, &category) in sheet.categories.iter().enumerate() {
            for (p, player_id) in sheet.player_ids.iter().enumerate() {
                scores
                    .entry(player_id.clone())
                    .or_default()
                    .insert(category, sheet.points[c][p]);
            }
        }

        let totals = sheet
            .player_ids
            .iter()
            .cloned()
            .zip(sheet.totals.iter().copied())
            .collect();

        let mut ranking: Vec<RankEntry> = sheet
            .player_ids
            .iter()
            .zip(&sheet.ranks)
            .map(|(id, &rank)| RankEntry {
                player_id: id.clone(),
                rank,
            })
            .collect();
        ranking.sort_by_key(|e| e.rank);

        Game {
            id: draft.id.clone(),
            players: draft.players.clone(),
            expansions: draft.expansions.clone(),
            goal_mode: draft.goal_mode,
            started_at: draft.started_at,
            ended_at,
            scores,
            totals,
            ranking,
            schema_version: SCHEMA_VERSION,
        }
    }

    /// Ids of the players ranked first.
    pub fn winners(&self) -> Vec<&str> {
        self.ranking
            .iter()
            .filter(|e| e.rank == 1)
            .map(|e| e.player_id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameLimits, GameUpdate};

    fn finished() -> Game {
        let players = ["ana", "ben", "cy"].iter().map(|id| PlayerSnapshot::named(id)).collect();
        let mut draft = InProgressGame::new(
            "game-7",
            players,
            vec![ExpansionId::Base],
            GoalMode::Green,
            100,
            &GameLimits::default(),
        )
        .unwrap();
        for (player, value) in [("ana", 40), ("ben", 52), ("cy", 40)] {
            draft = draft
                .apply(GameUpdate::SetScore {
                    player: player.to_string(),
                    category: CategoryId::BirdScores,
                    value,
                })
                .unwrap();
        }
        draft.finish(200)
    }

    #[test]
    fn ranking_is_sorted_with_shared_ranks() {
        let game = finished();
        let ranking: Vec<(&str, u32)> = game
            .ranking
            .iter()
            .map(|e| (e.player_id.as_str(), e.rank))
            .collect();
        assert_eq!(ranking, vec![("ben", 1), ("ana", 2), ("cy", 2)]);
        assert_eq!(game.winners(), vec!["ben"]);
    }

    #[test]
    fn record_keeps_per_category_points() {
        let game = finished();
        assert_eq!(game.scores["ben"][&CategoryId::BirdScores], 52);
        assert_eq!(game.scores["ben"][&CategoryId::EndOfRoundGoals], 0);
        assert_eq!(game.totals["cy"], 40);
        assert_eq!((game.started_at, game.ended_at), (100, 200));
    }

    #[test]
    fn record_serializes_camel_case() {
        let json = serde_json::to_string(&finished()).unwrap();
        assert!(json.contains("\"endedAt\":200"));
        assert!(json.contains("\"playerId\":\"ben\""));
        assert!(json.contains("\"bird_scores\":52"));
    }
}
