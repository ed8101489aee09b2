//! Scoring categories, expansions, and how each category is entered.
//!
//! Categories are enumerated in score-sheet order. Which ones are active
//! depends on the selected expansions: the base set is always present,
//! Oceania adds the nectar categories and Americas adds hummingbirds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when parsing category, expansion, or goal-mode identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("unknown expansion '{0}'")]
    UnknownExpansion(String),

    #[error("unknown goal mode '{0}', expected green or blue")]
    UnknownGoalMode(String),
}

/// A published expansion (or the base game).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpansionId {
    Base,
    Europe,
    Oceania,
    Asia,
    Americas,
    FanPack1,
}

/// All expansions in menu order.
pub const ALL_EXPANSIONS: [ExpansionId; 6] = [
    ExpansionId::Base,
    ExpansionId::Europe,
    ExpansionId::Oceania,
    ExpansionId::Asia,
    ExpansionId::Americas,
    ExpansionId::FanPack1,
];

impl ExpansionId {
    pub const fn id(self) -> &'static str {
        match self {
            ExpansionId::Base => "base",
            ExpansionId::Europe => "europe",
            ExpansionId::Oceania => "oceania",
            ExpansionId::Asia => "asia",
            ExpansionId::Americas => "americas",
            ExpansionId::FanPack1 => "fanPack1",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ExpansionId::Base => "Base Game",
            ExpansionId::Europe => "Europe",
            ExpansionId::Oceania => "Oceania",
            ExpansionId::Asia => "Asia",
            ExpansionId::Americas => "Americas",
            ExpansionId::FanPack1 => "Fan Pack 1",
        }
    }

    /// Base and Asia are the two standalone boxes; a game needs at least one.
    pub const fn is_standalone(self) -> bool {
        matches!(self, ExpansionId::Base | ExpansionId::Asia)
    }

    pub fn from_id(s: &str) -> Result<ExpansionId, CategoryError> {
        ALL_EXPANSIONS
            .iter()
            .copied()
            .find(|e| e.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| CategoryError::UnknownExpansion(s.to_string()))
    }
}

/// How end-of-round goals are scored for the whole game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalMode {
    /// Majority per item: players are ranked and scored by placement.
    #[default]
    Green,
    /// One point per item: scores are entered as plain numbers.
    Blue,
}

impl GoalMode {
    pub const fn id(self) -> &'static str {
        match self {
            GoalMode::Green => "green",
            GoalMode::Blue => "blue",
        }
    }

    pub fn from_id(s: &str) -> Result<GoalMode, CategoryError> {
        match s {
            "green" => Ok(GoalMode::Green),
            "blue" => Ok(GoalMode::Blue),
            other => Err(CategoryError::UnknownGoalMode(other.to_string())),
        }
    }
}

/// How a category's per-player value is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoringMode {
    /// A number typed in per player.
    Numeric,
    /// Per-round placements resolved against the round point tables.
    Placement,
    /// Computed from other categories; never entered.
    Derived,
}

/// A row of the score sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    BirdScores,
    BonusCards,
    EndOfRoundGoals,
    Eggs,
    CachedFood,
    TuckedCards,
    NectarForest,
    NectarGrassland,
    NectarWetland,
    NectarScore,
    HummingbirdScores,
}

pub const BASE_CATEGORIES: [CategoryId; 6] = [
    CategoryId::BirdScores,
    CategoryId::BonusCards,
    CategoryId::EndOfRoundGoals,
    CategoryId::Eggs,
    CategoryId::CachedFood,
    CategoryId::TuckedCards,
];

pub const OCEANIA_CATEGORIES: [CategoryId; 4] = [
    CategoryId::NectarForest,
    CategoryId::NectarGrassland,
    CategoryId::NectarWetland,
    CategoryId::NectarScore,
];

pub const AMERICAS_CATEGORIES: [CategoryId; 1] = [CategoryId::HummingbirdScores];

/// The per-habitat nectar count categories, in resolution order.
pub const NECTAR_CATEGORIES: [CategoryId; 3] = [
    CategoryId::NectarForest,
    CategoryId::NectarGrassland,
    CategoryId::NectarWetland,
];

pub const ALL_CATEGORIES: [CategoryId; 11] = [
    CategoryId::BirdScores,
    CategoryId::BonusCards,
    CategoryId::EndOfRoundGoals,
    CategoryId::Eggs,
    CategoryId::CachedFood,
    CategoryId::TuckedCards,
    CategoryId::NectarForest,
    CategoryId::NectarGrassland,
    CategoryId::NectarWetland,
    CategoryId::NectarScore,
    CategoryId::HummingbirdScores,
];

impl CategoryId {
    /// Returns the snake_case identifier used in records and commands.
    pub const fn id(self) -> &'static str {
        match self {
            CategoryId::BirdScores => "bird_scores",
            CategoryId::BonusCards => "bonus_cards",
            CategoryId::EndOfRoundGoals => "end_of_round_goals",
            CategoryId::Eggs => "eggs",
            CategoryId::CachedFood => "cached_food",
            CategoryId::TuckedCards => "tucked_cards",
            CategoryId::NectarForest => "nectar_forest",
            CategoryId::NectarGrassland => "nectar_grassland",
            CategoryId::NectarWetland => "nectar_wetland",
            CategoryId::NectarScore => "nectar_score",
            CategoryId::HummingbirdScores => "hummingbird_scores",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CategoryId::BirdScores => "Bird Scores",
            CategoryId::BonusCards => "Bonus Cards",
            CategoryId::EndOfRoundGoals => "End-of-Round Goals",
            CategoryId::Eggs => "Eggs",
            CategoryId::CachedFood => "Cached Food",
            CategoryId::TuckedCards => "Tucked Cards",
            CategoryId::NectarForest => "Nectar on Forest",
            CategoryId::NectarGrassland => "Nectar on Grassland",
            CategoryId::NectarWetland => "Nectar on Wetland",
            CategoryId::NectarScore => "Nectar Scores",
            CategoryId::HummingbirdScores => "Hummingbird Scores",
        }
    }

    pub fn from_id(s: &str) -> Result<CategoryId, CategoryError> {
        ALL_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.id() == s)
            .ok_or_else(|| CategoryError::UnknownCategory(s.to_string()))
    }

    /// Returns how this category is entered under the given goal mode.
    pub const fn entry_mode(self, goal_mode: GoalMode) -> ScoringMode {
        match (self, goal_mode) {
            (CategoryId::EndOfRoundGoals, GoalMode::Green) => ScoringMode::Placement,
            (CategoryId::NectarScore, _) => ScoringMode::Derived,
            _ => ScoringMode::Numeric,
        }
    }

    /// Nectar counts only feed the derived nectar score; they are not points.
    pub const fn counts_toward_total(self) -> bool {
        !matches!(
            self,
            CategoryId::NectarForest | CategoryId::NectarGrassland | CategoryId::NectarWetland
        )
    }

    pub const fn is_derived(self) -> bool {
        matches!(self, CategoryId::NectarScore)
    }
}

/// Returns every category active for the expansions, derived ones included.
pub fn scored_categories(expansions: &[ExpansionId]) -> Vec<CategoryId> {
    let mut categories = BASE_CATEGORIES.to_vec();
    if expansions.contains(&ExpansionId::Oceania) {
        categories.extend_from_slice(&OCEANIA_CATEGORIES);
    }
    if expansions.contains(&ExpansionId::Americas) {
        categories.extend_from_slice(&AMERICAS_CATEGORIES);
    }
    categories
}

/// Returns the categories a player enters values for, in entry order.
pub fn entry_categories(expansions: &[ExpansionId]) -> Vec<CategoryId> {
    scored_categories(expansions)
        .into_iter()
        .filter(|c| !c.is_derived())
        .collect()
}
