//! Placement tiers and round numbers.
//!
//! A placement is a player's qualitative rank within one end-of-round goal.
//! Each of the four rounds has its own point table for the podium tiers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The number of end-of-round scoring checkpoints in a game.
pub const ROUND_COUNT: usize = 4;

/// Podium points per round, indexed by `[round - 1][rank]` where rank 0 is first.
const END_OF_ROUND_POINTS: [[u32; 3]; ROUND_COUNT] = [
    [4, 1, 0],
    [5, 2, 1],
    [6, 3, 2],
    [7, 4, 3],
];

/// Errors raised when decoding placements or rounds from raw values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("invalid placement value {0}, expected 0-3")]
    InvalidPlacement(u8),

    #[error("invalid placement notation '{0}', expected one of - 1 2 3")]
    InvalidNotation(String),

    #[error("invalid round number {0}, expected 1-4")]
    InvalidRound(u8),
}

/// A player's tier within one round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Placement {
    #[default]
    Unplaced,
    First,
    Second,
    Third,
}

/// Podium tiers in scoring order.
pub const PODIUM: [Placement; 3] = [Placement::First, Placement::Second, Placement::Third];

/// Every placement in the order a choice control lists them.
pub const ALL_PLACEMENTS: [Placement; 4] = [
    Placement::First,
    Placement::Second,
    Placement::Third,
    Placement::Unplaced,
];

impl Placement {
    /// Returns the zero-based podium rank, or `None` for unplaced.
    pub const fn podium_rank(self) -> Option<usize> {
        match self {
            Placement::Unplaced => None,
            Placement::First => Some(0),
            Placement::Second => Some(1),
            Placement::Third => Some(2),
        }
    }

    pub const fn is_podium(self) -> bool {
        !matches!(self, Placement::Unplaced)
    }

    /// Returns the integer encoding: 0 for unplaced, 1-3 for the podium.
    pub const fn value(self) -> u8 {
        match self {
            Placement::Unplaced => 0,
            Placement::First => 1,
            Placement::Second => 2,
            Placement::Third => 3,
        }
    }

    /// Returns the single-token text notation.
    pub const fn notation(self) -> &'static str {
        match self {
            Placement::Unplaced => "-",
            Placement::First => "1",
            Placement::Second => "2",
            Placement::Third => "3",
        }
    }

    /// Parses the text notation produced by [`Placement::notation`].
    pub fn from_notation(s: &str) -> Result<Placement, PlacementError> {
        match s {
            "-" | "0" => Ok(Placement::Unplaced),
            "1" => Ok(Placement::First),
            "2" => Ok(Placement::Second),
            "3" => Ok(Placement::Third),
            other => Err(PlacementError::InvalidNotation(other.to_string())),
        }
    }

    /// Returns the label shown next to a choice.
    pub const fn label(self) -> &'static str {
        match self {
            Placement::Unplaced => "unplaced",
            Placement::First => "1st",
            Placement::Second => "2nd",
            Placement::Third => "3rd",
        }
    }
}

impl TryFrom<u8> for Placement {
    type Error = PlacementError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Placement::Unplaced),
            1 => Ok(Placement::First),
            2 => Ok(Placement::Second),
            3 => Ok(Placement::Third),
            other => Err(PlacementError::InvalidPlacement(other)),
        }
    }
}

impl From<Placement> for u8 {
    fn from(p: Placement) -> u8 {
        p.value()
    }
}

/// One of the four end-of-round scoring checkpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RoundNumber {
    One,
    Two,
    Three,
    Four,
}

/// All rounds in play order.
pub const ALL_ROUNDS: [RoundNumber; ROUND_COUNT] = [
    RoundNumber::One,
    RoundNumber::Two,
    RoundNumber::Three,
    RoundNumber::Four,
];

impl RoundNumber {
    /// Returns the 1-based round number.
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Returns the 0-based index into per-round arrays.
    pub const fn index(self) -> usize {
        match self {
            RoundNumber::One => 0,
            RoundNumber::Two => 1,
            RoundNumber::Three => 2,
            RoundNumber::Four => 3,
        }
    }

    /// Returns the podium point table for this round (first, second, third).
    pub const fn podium_points(self) -> [u32; 3] {
        END_OF_ROUND_POINTS[self.index()]
    }

    /// Returns the points for the zero-based podium rank. Ranks past third are worth nothing.
    pub const fn rank_points(self, rank: usize) -> u32 {
        if rank < 3 {
            END_OF_ROUND_POINTS[self.index()][rank]
        } else {
            0
        }
    }

    /// Returns the undivided points for a placement.
    pub const fn points(self, placement: Placement) -> u32 {
        match placement.podium_rank() {
            Some(rank) => self.rank_points(rank),
            None => 0,
        }
    }
}

impl TryFrom<u8> for RoundNumber {
    type Error = PlacementError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RoundNumber::One),
            2 => Ok(RoundNumber::Two),
            3 => Ok(RoundNumber::Three),
            4 => Ok(RoundNumber::Four),
            other => Err(PlacementError::InvalidRound(other)),
        }
    }
}

impl From<RoundNumber> for u8 {
    fn from(r: RoundNumber) -> u8 {
        r.number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_value_roundtrip() {
        for p in ALL_PLACEMENTS {
            assert_eq!(Placement::try_from(p.value()), Ok(p));
        }
        assert_eq!(Placement::try_from(4), Err(PlacementError::InvalidPlacement(4)));
    }

    #[test]
    fn placement_notation_roundtrip() {
        for p in ALL_PLACEMENTS {
            assert_eq!(Placement::from_notation(p.notation()), Ok(p));
        }
        assert!(Placement::from_notation("4th").is_err());
    }

    #[test]
    fn podium_excludes_unplaced() {
        assert!(!Placement::Unplaced.is_podium());
        assert!(PODIUM.iter().all(|p| p.is_podium()));
    }

    #[test]
    fn round_point_tables() {
        assert_eq!(RoundNumber::One.podium_points(), [4, 1, 0]);
        assert_eq!(RoundNumber::Two.podium_points(), [5, 2, 1]);
        assert_eq!(RoundNumber::Three.podium_points(), [6, 3, 2]);
        assert_eq!(RoundNumber::Four.podium_points(), [7, 4, 3]);
    }

    #[test]
    fn unplaced_scores_nothing_every_round() {
        for round in ALL_ROUNDS {
            assert_eq!(round.points(Placement::Unplaced), 0);
            assert_eq!(round.rank_points(3), 0);
        }
    }

    #[test]
    fn round_number_bounds() {
        assert_eq!(RoundNumber::try_from(0), Err(PlacementError::InvalidRound(0)));
        assert_eq!(RoundNumber::try_from(5), Err(PlacementError::InvalidRound(5)));
        for round in ALL_ROUNDS {
            assert_eq!(RoundNumber::try_from(round.number()), Ok(round));
        }
    }

    #[test]
    fn serde_uses_integer_encoding() {
        let json = serde_json::to_string(&[Placement::First, Placement::Unplaced]).unwrap();
        assert_eq!(json, "[1,0]");
        let round: RoundNumber = serde_json::from_str("3").unwrap();
        assert_eq!(round, RoundNumber::Three);
        assert!(serde_json::from_str::<Placement>("7").is_err());
    }
}
