//! Command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the main loop can dispatch on.

use tracing::warn;

use crate::game::{CategoryId, ExpansionId, GoalMode, Placement, RoundNumber};

use super::notation::parse_id_list;

/// Players and setup passed with the `newgame` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGameParams {
    pub players: Vec<String>,
    pub expansions: Vec<ExpansionId>,
    pub goal_mode: GoalMode,
}

impl NewGameParams {
    /// Base game only, green goals.
    pub fn with_players(players: Vec<String>) -> Self {
        NewGameParams {
            players,
            expansions: vec![ExpansionId::Base],
            goal_mode: GoalMode::Green,
        }
    }
}

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new draft, replacing any current one.
    NewGame(NewGameParams),

    /// Enter a number for a numeric category.
    Score {
        player: String,
        category: CategoryId,
        value: u32,
    },

    /// Pick a player's end-of-round placement.
    Place {
        round: RoundNumber,
        player: String,
        placement: Placement,
    },

    /// List the placements still open to a player.
    Options { round: RoundNumber, player: String },

    /// Show one round of the draft.
    Round { round: RoundNumber },

    /// Change the expansions in play.
    Expansions { expansions: Vec<ExpansionId> },

    /// Validate a standalone round assignment.
    Check { notation: String },

    /// Normalize a standalone round assignment.
    Normalize { total_players: usize, notation: String },

    /// Print totals, ranks and winners of the draft.
    Results,

    /// Dump the draft as JSON.
    Snapshot,

    /// Replace the draft with a JSON snapshot.
    Restore { json: String },

    /// Close the draft into a completed game record.
    Finish,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "hello" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "results" => Some(Command::Results),
        "snapshot" => Some(Command::Snapshot),
        "finish" => Some(Command::Finish),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(&tokens),
        "newgame" => parse_newgame(&tokens),
        "score" => parse_score(&tokens),
        "place" => parse_place(&tokens),
        "options" => parse_options(&tokens),
        "round" => parse_round_command(&tokens),
        "expansions" => parse_expansions_command(&tokens),
        "check" => parse_check(&tokens),
        "normalize" => parse_normalize(&tokens),
        "restore" => parse_restore(&tokens, trimmed),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let name = name_parts.join(" ");
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name, value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `newgame <p1,p2,..> [expansions <e1,e2>] [goals green|blue]`.
fn parse_newgame(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed newgame: expected 'newgame <p1,p2,..> [expansions <e1,e2>] [goals green|blue]'");
        return None;
    }
    let players = match parse_id_list(tokens[1]) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "invalid player list");
            return None;
        }
    };
    let mut params = NewGameParams::with_players(players);

    let mut i = 2;
    while i < tokens.len() {
        match tokens[i] {
            "expansions" => {
                i += 1;
                params.expansions = parse_expansion_list(tokens.get(i).copied())?;
            }
            "goals" => {
                i += 1;
                let Some(&mode) = tokens.get(i) else {
                    warn!("missing goal mode after 'goals'");
                    return None;
                };
                match GoalMode::from_id(mode) {
                    Ok(m) => params.goal_mode = m,
                    Err(e) => {
                        warn!(error = %e, "invalid goal mode");
                        return None;
                    }
                }
            }
            other => {
                warn!(param = other, "unknown newgame parameter");
            }
        }
        i += 1;
    }

    Some(Command::NewGame(params))
}

/// Parses `score <player> <category> <value>`.
fn parse_score(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 4 {
        warn!("malformed score: expected 'score <player> <category> <value>'");
        return None;
    }
    let category = match CategoryId::from_id(tokens[2]) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "invalid category");
            return None;
        }
    };
    let value = match tokens[3].parse::<u32>() {
        Ok(v) => v,
        Err(_) => {
            warn!(value = tokens[3], "invalid score value");
            return None;
        }
    };
    Some(Command::Score {
        player: tokens[1].to_string(),
        category,
        value,
    })
}

/// Parses `place <round> <player> <-|1|2|3>`.
fn parse_place(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 4 {
        warn!("malformed place: expected 'place <round> <player> <-|1|2|3>'");
        return None;
    }
    let round = parse_round(tokens[1])?;
    let placement = match Placement::from_notation(tokens[3]) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "invalid placement");
            return None;
        }
    };
    Some(Command::Place {
        round,
        player: tokens[2].to_string(),
        placement,
    })
}

/// Parses `options <round> <player>`.
fn parse_options(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 {
        warn!("malformed options: expected 'options <round> <player>'");
        return None;
    }
    let round = parse_round(tokens[1])?;
    Some(Command::Options {
        round,
        player: tokens[2].to_string(),
    })
}

/// Parses `round <r>`.
fn parse_round_command(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed round: expected 'round <r>'");
        return None;
    }
    let round = parse_round(tokens[1])?;
    Some(Command::Round { round })
}

/// Parses `expansions <e1,e2>`.
fn parse_expansions_command(tokens: &[&str]) -> Option<Command> {
    let expansions = parse_expansion_list(tokens.get(1).copied())?;
    Some(Command::Expansions { expansions })
}

/// Parses `check <notation>`.
fn parse_check(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed check: expected 'check <notation>'");
        return None;
    }
    Some(Command::Check {
        notation: tokens[1..].join(""),
    })
}

/// Parses `normalize <total> <notation>`.
fn parse_normalize(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 {
        warn!("malformed normalize: expected 'normalize <total> <notation>'");
        return None;
    }
    let total_players = match tokens[1].parse::<usize>() {
        Ok(n) => n,
        Err(_) => {
            warn!(total = tokens[1], "invalid player total");
            return None;
        }
    };
    Some(Command::Normalize {
        total_players,
        notation: tokens[2..].join(""),
    })
}

/// Parses `restore <json>`, capturing everything after "restore" as raw text.
fn parse_restore(tokens: &[&str], full_line: &str) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed restore: expected 'restore <json>'");
        return None;
    }
    let json = full_line
        .trim()
        .strip_prefix("restore")
        .unwrap_or("")
        .trim()
        .to_string();
    Some(Command::Restore { json })
}

fn parse_round(token: &str) -> Option<RoundNumber> {
    let parsed = token
        .parse::<u8>()
        .ok()
        .and_then(|n| RoundNumber::try_from(n).ok());
    if parsed.is_none() {
        warn!(round = token, "invalid round, expected 1-4");
    }
    parsed
}

fn parse_expansion_list(token: Option<&str>) -> Option<Vec<ExpansionId>> {
    let Some(token) = token else {
        warn!("missing expansion list");
        return None;
    };
    let ids = match parse_id_list(token) {
        Ok(ids) => ids,
        Err(e) => {
            warn!(error = %e, "invalid expansion list");
            return None;
        }
    };
    let mut expansions = Vec::with_capacity(ids.len());
    for id in &ids {
        match ExpansionId::from_id(id) {
            Ok(e) => expansions.push(e),
            Err(e) => {
                warn!(error = %e, "invalid expansion");
                return None;
            }
        }
    }
    Some(expansions)
}
