//! Round assignment notation.
//!
//! A compact single-token form of one round's placements, used by the
//! `check`, `normalize`, and `round` commands: comma-separated
//! `player:placement` pairs where the placement is `1`, `2`, `3`, or `-`
//! for unplaced.
//!
//! Example: `ana:1,ben:-,cy:2`

use thiserror::Error;

use crate::game::{Placement, PlacementError};
use crate::rules::RoundAssignment;

/// Errors that can occur when parsing notation strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("malformed entry '{0}', expected <player>:<placement>")]
    MalformedEntry(String),

    #[error("empty player id in '{0}'")]
    EmptyPlayer(String),

    #[error("player '{0}' appears more than once")]
    DuplicatePlayer(String),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Parses `player:placement` pairs into a round assignment.
pub fn parse_assignment(s: &str) -> Result<RoundAssignment, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::EmptyInput);
    }

    let mut assignment = RoundAssignment::new();
    for entry in s.split(',') {
        let entry = entry.trim();
        let (player, placement) = entry
            .split_once(':')
            .ok_or_else(|| NotationError::MalformedEntry(entry.to_string()))?;
        let player = player.trim();
        if player.is_empty() {
            return Err(NotationError::EmptyPlayer(entry.to_string()));
        }
        let placement = Placement::from_notation(placement.trim())?;
        if assignment.insert(player.to_string(), placement).is_some() {
            return Err(NotationError::DuplicatePlayer(player.to_string()));
        }
    }

    Ok(assignment)
}

/// Formats entries in the order given.
pub fn format_assignment<'a>(entries: impl IntoIterator<Item = (&'a str, Placement)>) -> String {
    entries
        .into_iter()
        .map(|(player, p)| format!("{}:{}", player, p.notation()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Formats a placement list as space-separated notation tokens.
pub fn format_placements(placements: &[Placement]) -> String {
    placements
        .iter()
        .map(|p| p.notation())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a comma-separated list of ids, rejecting blanks and repeats.
pub fn parse_id_list(s: &str) -> Result<Vec<String>, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::EmptyInput);
    }

    let mut ids: Vec<String> = Vec::new();
    for part in s.split(',') {
        let id = part.trim();
        if id.is_empty() {
            return Err(NotationError::EmptyPlayer(s.to_string()));
        }
        if ids.iter().any(|existing| existing == id) {
            return Err(NotationError::DuplicatePlayer(id.to_string()));
        }
        ids.push(id.to_string());
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Placement::{First as F, Second as S, Unplaced as U};

    #[test]
    fn parse_simple_assignment() {
        let a = parse_assignment("ana:1,ben:-,cy:2").unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(a["ana"], F);
        assert_eq!(a["ben"], U);
        assert_eq!(a["cy"], S);
    }

    #[test]
    fn parse_accepts_zero_for_unplaced() {
        let a = parse_assignment("ana:0").unwrap();
        assert_eq!(a["ana"], U);
    }

    #[test]
    fn format_keeps_given_order() {
        let s = format_assignment([("cy", S), ("ana", F)]);
        assert_eq!(s, "cy:2,ana:1");
    }

    #[test]
    fn parse_then_format_sorted() {
        let a = parse_assignment("ben:3,ana:1").unwrap();
        let s = format_assignment(a.iter().map(|(k, v)| (k.as_str(), *v)));
        assert_eq!(s, "ana:1,ben:3");
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse_assignment(""), Err(NotationError::EmptyInput));
        assert_eq!(
            parse_assignment("ana1"),
            Err(NotationError::MalformedEntry("ana1".to_string()))
        );
        assert_eq!(
            parse_assignment(":1"),
            Err(NotationError::EmptyPlayer(":1".to_string()))
        );
        assert_eq!(
            parse_assignment("ana:1,ana:2"),
            Err(NotationError::DuplicatePlayer("ana".to_string()))
        );
        assert_eq!(
            parse_assignment("ana:4"),
            Err(NotationError::Placement(PlacementError::InvalidNotation("4".to_string())))
        );
    }

    #[test]
    fn format_placement_list() {
        assert_eq!(format_placements(&[F, S, U]), "1 2 -");
        assert_eq!(format_placements(&[]), "");
    }

    #[test]
    fn id_lists() {
        assert_eq!(
            parse_id_list("ana,ben, cy").unwrap(),
            vec!["ana".to_string(), "ben".to_string(), "cy".to_string()]
        );
        assert!(parse_id_list("ana,,ben").is_err());
        assert_eq!(
            parse_id_list("ana,ana"),
            Err(NotationError::DuplicatePlayer("ana".to_string()))
        );
    }
}
