//! Score resolution.
//!
//! Turns entered placements and counts into points: end-of-round goals
//! (tie splits round down), nectar majorities (tie splits round up), and
//! the totals and ranking built from every category.

pub mod end_of_round;
pub mod nectar;
pub mod totals;

pub use end_of_round::{resolve_end_of_round_goals, resolve_end_of_round_scores};
pub use nectar::{resolve_nectar_category, resolve_nectar_scores, NectarCounts};
pub use totals::{category_points, rank_totals, score_sheet, winners, ScoreSheet};
