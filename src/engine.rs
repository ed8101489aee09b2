//! Engine state management.
//!
//! Holds the draft game being scored and the engine options, and answers
//! each protocol command by writing its response lines to `out`.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::game::{
    CategoryId, ExpansionId, GameError, GameLimits, GameUpdate, InProgressGame, Placement,
    PlayerSnapshot, RoundNumber, ALL_ROUNDS,
};
use crate::protocol::notation::{
    format_assignment, format_placements, parse_assignment, NotationError,
};
use crate::protocol::parser::NewGameParams;
use crate::resolve::score_sheet;
use crate::rules::{is_round_placement_valid, normalize_placements_for_round};

/// Errors reported back to the client as a single `error <message>` line.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no game in progress")]
    NoGame,

    #[error("round {} placements are incomplete", .0.number())]
    IncompleteRound(RoundNumber),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("output failed: {0}")]
    Io(#[from] io::Error),
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub draft: Option<InProgressGame>,
    pub options: HashMap<String, String>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates a new engine with no game in progress.
    pub fn new() -> Self {
        Engine {
            draft: None,
            options: HashMap::new(),
        }
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        let value = value.unwrap_or_default();
        if let Some((lo, hi)) = spin_range(&name) {
            match value.parse::<usize>() {
                Ok(v) if (lo..=hi).contains(&v) => {}
                _ => warn!(option = %name, value = %value, lo, hi, "option out of range, clamping"),
            }
        }
        self.options.insert(name, value);

        let limits = self.limits();
        if self.spin_option("MinPlayers", limits.min_players) > limits.max_players {
            warn!(
                max = limits.max_players,
                "MinPlayers above MaxPlayers, using MaxPlayers for both"
            );
        }
    }

    /// Returns the player count bounds from options, or the defaults.
    ///
    /// Values are clamped to their advertised ranges and the minimum never
    /// exceeds the maximum.
    pub fn limits(&self) -> GameLimits {
        let defaults = GameLimits::default();
        let max_players = self.spin_option("MaxPlayers", defaults.max_players);
        let min_players = self
            .spin_option("MinPlayers", defaults.min_players)
            .min(max_players);
        GameLimits {
            min_players,
            max_players,
        }
    }

    fn usize_option(&self, name: &str) -> Option<usize> {
        self.options.get(name).and_then(|v| v.parse::<usize>().ok())
    }

    fn spin_option(&self, name: &str, default: usize) -> usize {
        let value = self.usize_option(name).unwrap_or(default);
        match spin_range(name) {
            Some((lo, hi)) => value.clamp(lo, hi),
            None => value,
        }
    }

    /// Handles the handshake: writes id, options, protocol_version, and hellook.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> Result<(), EngineError> {
        writeln!(out, "id name scorepad")?;
        writeln!(out, "id author scorepad")?;
        writeln!(out, "option name MinPlayers type spin default 2 min 1 max 5")?;
        writeln!(out, "option name MaxPlayers type spin default 5 min 2 max 5")?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "hellook")?;
        out.flush()?;
        Ok(())
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> Result<(), EngineError> {
        writeln!(out, "readyok")?;
        out.flush()?;
        Ok(())
    }

    /// Starts a new draft, replacing any current one.
    pub fn new_game<W: Write>(
        &mut self,
        params: NewGameParams,
        out: &mut W,
    ) -> Result<(), EngineError> {
        let started_at = now_ms();
        let players = params.players.iter().map(|id| PlayerSnapshot::named(id)).collect();
        let draft = InProgressGame::new(
            format!("game-{}", started_at),
            players,
            params.expansions,
            params.goal_mode,
            started_at,
            &self.limits(),
        )?;
        info!(id = %draft.id, players = draft.player_count(), "game started");
        writeln!(out, "game {}", draft.id)?;
        out.flush()?;
        self.draft = Some(draft);
        Ok(())
    }

    /// Enters a number for a numeric category.
    pub fn set_score(
        &mut self,
        player: String,
        category: CategoryId,
        value: u32,
    ) -> Result<(), EngineError> {
        self.apply(GameUpdate::SetScore {
            player,
            category,
            value,
        })
    }

    /// Changes the expansions in play.
    pub fn set_expansions(&mut self, expansions: Vec<ExpansionId>) -> Result<(), EngineError> {
        self.apply(GameUpdate::SetExpansions { expansions })
    }

    /// Sets a placement and prints the round as it stands afterwards.
    pub fn handle_place<W: Write>(
        &mut self,
        round: RoundNumber,
        player: String,
        placement: Placement,
        out: &mut W,
    ) -> Result<(), EngineError> {
        self.apply(GameUpdate::SetPlacement {
            player,
            round,
            placement,
        })?;
        self.handle_round(round, out)
    }

    /// Handles `options <round> <player>`.
    pub fn handle_options<W: Write>(
        &self,
        round: RoundNumber,
        player: &str,
        out: &mut W,
    ) -> Result<(), EngineError> {
        let draft = self.draft()?;
        if !draft.has_player(player) {
            return Err(GameError::UnknownPlayer(player.to_string()).into());
        }
        let choices = draft.valid_placements(round, player);
        writeln!(
            out,
            "options {} {} {}",
            round.number(),
            player,
            format_placements(&choices)
        )?;
        out.flush()?;
        Ok(())
    }

    /// Handles `round <r>`: the round in seating order, then its validity.
    pub fn handle_round<W: Write>(
        &self,
        round: RoundNumber,
        out: &mut W,
    ) -> Result<(), EngineError> {
        let draft = self.draft()?;
        let notation = format_assignment(
            draft
                .players
                .iter()
                .map(|p| (p.id.as_str(), draft.placements(&p.id)[round.index()])),
        );
        writeln!(out, "round {} {}", round.number(), notation)?;
        writeln!(out, "valid {}", draft.round_valid(round))?;
        out.flush()?;
        Ok(())
    }

    /// Handles `check <notation>`.
    pub fn handle_check<W: Write>(&self, notation: &str, out: &mut W) -> Result<(), EngineError> {
        let assignment = parse_assignment(notation)?;
        writeln!(out, "valid {}", is_round_placement_valid(&assignment))?;
        out.flush()?;
        Ok(())
    }

    /// Handles `normalize <total> <notation>`.
    pub fn handle_normalize<W: Write>(
        &self,
        total_players: usize,
        notation: &str,
        out: &mut W,
    ) -> Result<(), EngineError> {
        let assignment = parse_assignment(notation)?;
        let normalized = normalize_placements_for_round(&assignment, total_players);
        let formatted = format_assignment(normalized.iter().map(|(k, v)| (k.as_str(), *v)));
        writeln!(out, "normalized {}", formatted)?;
        out.flush()?;
        Ok(())
    }

    /// Handles `results`: one total line per player, then the winners.
    pub fn handle_results<W: Write>(&self, out: &mut W) -> Result<(), EngineError> {
        let sheet = score_sheet(self.draft()?);
        for ((player, total), rank) in sheet.player_ids.iter().zip(&sheet.totals).zip(&sheet.ranks) {
            writeln!(out, "total {} {} rank {}", player, total, rank)?;
        }
        writeln!(out, "winners {}", sheet.winners().join(","))?;
        out.flush()?;
        Ok(())
    }

    /// Handles `snapshot`: the draft as one line of JSON.
    pub fn handle_snapshot<W: Write>(&self, out: &mut W) -> Result<(), EngineError> {
        let json = serde_json::to_string(self.draft()?)?;
        writeln!(out, "snapshot {}", json)?;
        out.flush()?;
        Ok(())
    }

    /// Replaces the draft with a JSON snapshot. A snapshot that fails
    /// validation leaves the current draft in place.
    pub fn restore(&mut self, json: &str) -> Result<(), EngineError> {
        let draft: InProgressGame = serde_json::from_str(json)?;
        draft.validate(&self.limits())?;
        info!(id = %draft.id, revision = draft.revision, "game restored");
        self.draft = Some(draft);
        Ok(())
    }

    /// Handles `finish`: prints the completed record and clears the draft.
    ///
    /// Refuses while any round has a missing higher tier.
    pub fn handle_finish<W: Write>(&mut self, out: &mut W) -> Result<(), EngineError> {
        let draft = self.draft()?;
        if let Some(&round) = ALL_ROUNDS.iter().find(|&&r| !draft.round_valid(r)) {
            return Err(EngineError::IncompleteRound(round));
        }
        let game = draft.finish(now_ms());
        let json = serde_json::to_string(&game)?;
        writeln!(out, "game {}", json)?;
        out.flush()?;
        info!(id = %game.id, winners = ?game.winners(), "game finished");
        self.draft = None;
        Ok(())
    }

    fn draft(&self) -> Result<&InProgressGame, EngineError> {
        self.draft.as_ref().ok_or(EngineError::NoGame)
    }

    fn apply(&mut self, update: GameUpdate) -> Result<(), EngineError> {
        let next = self.draft()?.clone().apply(update)?;
        debug!(revision = next.revision, "draft updated");
        self.draft = Some(next);
        Ok(())
    }
}

/// Advertised bounds of the numeric options.
fn spin_range(name: &str) -> Option<(usize, usize)> {
    match name {
        "MinPlayers" => Some((1, 5)),
        "MaxPlayers" => Some((2, 5)),
        _ => None,
    }
}

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
