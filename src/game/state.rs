//! In-progress game state.
//!
//! The draft is a plain value: every edit goes through [`InProgressGame::apply`],
//! which consumes the current version and returns the next one with its
//! `revision` bumped. Placement edits re-normalize the whole round so the
//! stored record never holds an over-occupied tier.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::category::{entry_categories, scored_categories, CategoryId, ExpansionId, GoalMode, ScoringMode};
use super::placement::{Placement, RoundNumber, ALL_ROUNDS, ROUND_COUNT};
use super::record::Game;
use crate::rules::{
    is_round_placement_valid, normalize_placements_for_round, valid_placements, RoundAssignment,
};

/// Current draft schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors raised when creating or updating a draft game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("a game needs {min}-{max} players, got {count}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("player '{0}' appears more than once")]
    DuplicatePlayer(String),

    #[error("a game needs the base game or asia")]
    NoStandaloneSet,

    #[error("unknown player '{0}'")]
    UnknownPlayer(String),

    #[error("category '{}' is not active in this game", .0.id())]
    InactiveCategory(CategoryId),

    #[error("category '{}' is not entered as a number", .0.id())]
    NotNumeric(CategoryId),

    #[error("unsupported schema version {found}, expected {expected}")]
    SchemaVersion { found: u32, expected: u32 },

    #[error("round {} holds placements that are no longer open", .0.number())]
    UnsettledRound(RoundNumber),

    #[error("end-of-round goals are scored by count in blue mode")]
    PlacementScoringOff,

    #[error("placement {} is not open to player '{player}' in round {}", .placement.label(), .round.number())]
    PlacementUnavailable {
        player: String,
        round: RoundNumber,
        placement: Placement,
    },
}

/// Player count bounds for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLimits {
    pub min_players: usize,
    pub max_players: usize,
}

impl Default for GameLimits {
    fn default() -> Self {
        GameLimits {
            min_players: 2,
            max_players: 5,
        }
    }
}

/// A player as captured when the game started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl PlayerSnapshot {
    /// Creates a snapshot whose display name is its id.
    pub fn named(id: &str) -> Self {
        PlayerSnapshot {
            id: id.to_string(),
            name: id.to_string(),
            color: None,
        }
    }
}

/// One score-sheet cell, tagged by how it was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreValue {
    Numeric { value: u32 },
    Placement { placements: [Placement; ROUND_COUNT] },
}

impl ScoreValue {
    /// The empty cell for a category's entry mode. Derived categories have none.
    pub const fn initial(mode: ScoringMode) -> Option<ScoreValue> {
        match mode {
            ScoringMode::Numeric => Some(ScoreValue::Numeric { value: 0 }),
            ScoringMode::Placement => Some(ScoreValue::Placement {
                placements: [Placement::Unplaced; ROUND_COUNT],
            }),
            ScoringMode::Derived => None,
        }
    }

    pub const fn numeric(&self) -> Option<u32> {
        match self {
            ScoreValue::Numeric { value } => Some(*value),
            ScoreValue::Placement { .. } => None,
        }
    }

    pub const fn placements(&self) -> Option<[Placement; ROUND_COUNT]> {
        match self {
            ScoreValue::Placement { placements } => Some(*placements),
            ScoreValue::Numeric { .. } => None,
        }
    }
}

/// An edit to the draft game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameUpdate {
    /// Enter a number for a numeric category.
    SetScore {
        player: String,
        category: CategoryId,
        value: u32,
    },

    /// Pick a player's placement for one round of end-of-round goals.
    SetPlacement {
        player: String,
        round: RoundNumber,
        placement: Placement,
    },

    /// Change the expansions in play. Existing scores are kept.
    SetExpansions { expansions: Vec<ExpansionId> },
}

/// The game currently being scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InProgressGame {
    pub id: String,
    pub players: Vec<PlayerSnapshot>,
    pub expansions: Vec<ExpansionId>,
    #[serde(default)]
    pub goal_mode: GoalMode,
    pub started_at: u64,
    pub scores: BTreeMap<String, BTreeMap<CategoryId, ScoreValue>>,
    #[serde(default)]
    pub revision: u64,
    pub schema_version: u32,
}

impl InProgressGame {
    /// Starts a draft with every entry category initialized for every player.
    pub fn new(
        id: impl Into<String>,
        players: Vec<PlayerSnapshot>,
        expansions: Vec<ExpansionId>,
        goal_mode: GoalMode,
        started_at: u64,
        limits: &GameLimits,
    ) -> Result<Self, GameError> {
        let mut game = InProgressGame {
            id: id.into(),
            players,
            expansions,
            goal_mode,
            started_at,
            scores: BTreeMap::new(),
            revision: 0,
            schema_version: SCHEMA_VERSION,
        };
        game.validate(limits)?;
        game.fill_missing_scores();
        Ok(game)
    }

    /// Checks a draft built elsewhere, such as one read back from a snapshot.
    ///
    /// Rejects a player count outside `limits`, repeated player ids, scores
    /// for players not in the game, a missing standalone set, a foreign
    /// schema version, and any round that normalization would change.
    pub fn validate(&self, limits: &GameLimits) -> Result<(), GameError> {
        let count = self.players.len();
        if count < limits.min_players || count > limits.max_players {
            return Err(GameError::PlayerCount {
                count,
                min: limits.min_players,
                max: limits.max_players,
            });
        }
        for (i, p) in self.players.iter().enumerate() {
            if self.players[..i].iter().any(|q| q.id == p.id) {
                return Err(GameError::DuplicatePlayer(p.id.clone()));
            }
        }
        if let Some(stray) = self.scores.keys().find(|id| !self.has_player(id)) {
            return Err(GameError::UnknownPlayer(stray.clone()));
        }
        check_standalone(&self.expansions)?;
        if self.schema_version != SCHEMA_VERSION {
            return Err(GameError::SchemaVersion {
                found: self.schema_version,
                expected: SCHEMA_VERSION,
            });
        }
        for round in ALL_ROUNDS {
            let assignment = self.round_assignment(round);
            if normalize_placements_for_round(&assignment, count) != assignment {
                return Err(GameError::UnsettledRound(round));
            }
        }
        Ok(())
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    /// Categories shown on the results sheet, derived ones included.
    pub fn active_categories(&self) -> Vec<CategoryId> {
        scored_categories(&self.expansions)
    }

    pub fn score(&self, player_id: &str, category: CategoryId) -> Option<&ScoreValue> {
        self.scores.get(player_id).and_then(|s| s.get(&category))
    }

    /// Returns the entered number, or 0 when nothing numeric is stored.
    pub fn numeric(&self, player_id: &str, category: CategoryId) -> u32 {
        self.score(player_id, category)
            .and_then(ScoreValue::numeric)
            .unwrap_or(0)
    }

    /// Returns the player's placement in each round; unplaced when unset.
    pub fn placements(&self, player_id: &str) -> [Placement; ROUND_COUNT] {
        self.score(player_id, CategoryId::EndOfRoundGoals)
            .and_then(ScoreValue::placements)
            .unwrap_or([Placement::Unplaced; ROUND_COUNT])
    }

    /// Returns the player-to-placement view of one round.
    pub fn round_assignment(&self, round: RoundNumber) -> RoundAssignment {
        self.players
            .iter()
            .map(|p| (p.id.clone(), self.placements(&p.id)[round.index()]))
            .collect()
    }

    pub fn round_valid(&self, round: RoundNumber) -> bool {
        is_round_placement_valid(&self.round_assignment(round))
    }

    /// True when every round may be left; gates moving past the goals category.
    pub fn all_rounds_valid(&self) -> bool {
        ALL_ROUNDS.iter().all(|&r| self.round_valid(r))
    }

    /// Placements the player may still pick in the round.
    pub fn valid_placements(&self, round: RoundNumber, player_id: &str) -> Vec<Placement> {
        valid_placements(&self.round_assignment(round), player_id, self.player_count())
    }

    /// Applies one edit and returns the next version of the draft.
    pub fn apply(mut self, update: GameUpdate) -> Result<Self, GameError> {
        match update {
            GameUpdate::SetScore { player, category, value } => {
                self.require_player(&player)?;
                if !entry_categories(&self.expansions).contains(&category) {
                    return Err(GameError::InactiveCategory(category));
                }
                if category.entry_mode(self.goal_mode) != ScoringMode::Numeric {
                    return Err(GameError::NotNumeric(category));
                }
                debug!(player = %player, category = category.id(), value, "score set");
                self.scores
                    .entry(player)
                    .or_default()
                    .insert(category, ScoreValue::Numeric { value });
            }
            GameUpdate::SetPlacement { player, round, placement } => {
                self.require_player(&player)?;
                if self.goal_mode != GoalMode::Green {
                    return Err(GameError::PlacementScoringOff);
                }
                if !self.valid_placements(round, &player).contains(&placement) {
                    return Err(GameError::PlacementUnavailable { player, round, placement });
                }

                let mut assignment = self.round_assignment(round);
                assignment.insert(player.clone(), placement);
                let normalized = normalize_placements_for_round(&assignment, self.player_count());
                debug!(player = %player, round = round.number(), placement = placement.label(), "placement set");
                for (player_id, p) in normalized {
                    self.set_round_placement(&player_id, round, p);
                }
            }
            GameUpdate::SetExpansions { expansions } => {
                check_standalone(&expansions)?;
                debug!(?expansions, "expansions changed");
                self.expansions = expansions;
                self.fill_missing_scores();
            }
        }

        self.revision += 1;
        Ok(self)
    }

    /// Closes the draft into a completed game record.
    pub fn finish(&self, ended_at: u64) -> Game {
        Game::from_draft(self, ended_at)
    }

    fn require_player(&self, player_id: &str) -> Result<(), GameError> {
        if self.has_player(player_id) {
            Ok(())
        } else {
            Err(GameError::UnknownPlayer(player_id.to_string()))
        }
    }

    fn set_round_placement(&mut self, player_id: &str, round: RoundNumber, placement: Placement) {
        let mut placements = self.placements(player_id);
        placements[round.index()] = placement;
        self.scores
            .entry(player_id.to_string())
            .or_default()
            .insert(CategoryId::EndOfRoundGoals, ScoreValue::Placement { placements });
    }

    /// Adds the empty cell for every active entry category a player lacks.
    /// A cell whose kind no longer matches the goal mode is replaced.
    fn fill_missing_scores(&mut self) {
        let categories = entry_categories(&self.expansions);
        for player in &self.players {
            let cells = self.scores.entry(player.id.clone()).or_default();
            for &category in &categories {
                let mode = category.entry_mode(self.goal_mode);
                let matches_mode = match cells.get(&category) {
                    Some(ScoreValue::Numeric { .. }) => mode == ScoringMode::Numeric,
                    Some(ScoreValue::Placement { .. }) => mode == ScoringMode::Placement,
                    None => false,
                };
                if matches_mode {
                    continue;
                }
                if let Some(initial) = ScoreValue::initial(mode) {
                    cells.insert(category, initial);
                }
            }
        }
    }
}

fn check_standalone(expansions: &[ExpansionId]) -> Result<(), GameError> {
    if expansions.iter().any(|e| e.is_standalone()) {
        Ok(())
    } else {
        Err(GameError::NoStandaloneSet)
    }
}
