//! scorepad -- an end-of-round placement scoring engine.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Logs go to stderr, filtered by the `SCOREPAD_LOG` environment variable.

use std::io::{self, BufRead, Write};

use tracing::warn;
use tracing_subscriber::EnvFilter;

use scorepad::engine::{Engine, EngineError};
use scorepad::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    let filter =
        EnvFilter::try_from_env("SCOREPAD_LOG").unwrap_or_else(|_| EnvFilter::new("scorepad=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let result = match cmd {
            Command::Hello => engine.handle_hello(&mut out),
            Command::IsReady => engine.handle_isready(&mut out),
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
                Ok(())
            }
            Command::NewGame(params) => engine.new_game(params, &mut out),
            Command::Score {
                player,
                category,
                value,
            } => engine.set_score(player, category, value),
            Command::Place {
                round,
                player,
                placement,
            } => engine.handle_place(round, player, placement, &mut out),
            Command::Options { round, player } => engine.handle_options(round, &player, &mut out),
            Command::Round { round } => engine.handle_round(round, &mut out),
            Command::Expansions { expansions } => engine.set_expansions(expansions),
            Command::Check { notation } => engine.handle_check(&notation, &mut out),
            Command::Normalize {
                total_players,
                notation,
            } => engine.handle_normalize(total_players, &notation, &mut out),
            Command::Results => engine.handle_results(&mut out),
            Command::Snapshot => engine.handle_snapshot(&mut out),
            Command::Restore { json } => engine.restore(&json),
            Command::Finish => engine.handle_finish(&mut out),
            Command::Quit => break,
        };

        if let Err(e) = result {
            if let EngineError::Io(_) = e {
                break;
            }
            warn!(error = %e, command = %line.trim(), "command rejected");
            if writeln!(out, "error {}", e).and_then(|_| out.flush()).is_err() {
                break;
            }
        }
    }
}
