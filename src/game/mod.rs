//! Game data types.
//!
//! Placements and rounds, scoring categories and expansions, the draft game
//! being scored, and the completed game record.

pub mod category;
pub mod placement;
pub mod record;
pub mod state;

pub use category::{
    entry_categories, scored_categories, CategoryError, CategoryId, ExpansionId, GoalMode,
    ScoringMode, ALL_CATEGORIES, ALL_EXPANSIONS, NECTAR_CATEGORIES,
};
pub use placement::{
    Placement, PlacementError, RoundNumber, ALL_PLACEMENTS, ALL_ROUNDS, PODIUM, ROUND_COUNT,
};
pub use record::{Game, RankEntry};
pub use state::{
    GameError, GameLimits, GameUpdate, InProgressGame, PlayerSnapshot, ScoreValue, SCHEMA_VERSION,
};
