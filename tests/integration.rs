//! Integration tests for the scorepad engine binary.
//!
//! Tests full protocol sessions by spawning the engine process, sending
//! commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_scorepad");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start scorepad");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

#[test]
fn hello_handshake_with_protocol_version() {
    let lines = run_engine(&["hello", "quit"]);

    assert!(lines.iter().any(|l| l == "id name scorepad"));
    assert!(lines.iter().any(|l| l == "protocol_version 1"));
    assert!(lines.iter().any(|l| l.starts_with("option name MaxPlayers")));

    let ok_idx = lines.iter().position(|l| l == "hellook").unwrap();
    let proto_idx = lines.iter().position(|l| l == "protocol_version 1").unwrap();
    assert!(proto_idx < ok_idx, "protocol_version must appear before hellook");
    assert_eq!(ok_idx, lines.len() - 1);
}

#[test]
fn isready_responds_readyok() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn unknown_and_malformed_lines_are_ignored() {
    let lines = run_engine(&["", "foobar", "place 9 ana 1", "score ana", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn commands_after_quit_are_not_processed() {
    let lines = run_engine(&["quit", "isready"]);
    assert!(lines.is_empty());
}

#[test]
fn full_scoring_session() {
    let lines = run_engine(&[
        "newgame ana,ben,cy",
        "score ana bird_scores 40",
        "score ben bird_scores 35",
        "score cy bird_scores 38",
        "place 1 ana 1",
        "place 1 ben 1",
        "place 2 cy 1",
        "place 2 ana 2",
        "place 2 ben 3",
        "results",
        "quit",
    ]);

    assert!(lines[0].starts_with("game game-"));
    assert!(lines.contains(&"round 1 ana:1,ben:1,cy:-".to_string()));
    assert!(lines.contains(&"round 2 ana:2,ben:3,cy:1".to_string()));

    // Round 1: ana and ben share 4+1 and each get 2. Round 2: 5/2/1.
    let totals: Vec<&str> = lines
        .iter()
        .filter(|l| l.starts_with("total "))
        .map(|l| l.as_str())
        .collect();
    assert_eq!(
        totals,
        vec!["total ana 44 rank 1", "total ben 38 rank 3", "total cy 43 rank 2"]
    );
    assert_eq!(lines.last().unwrap(), "winners ana");
}

#[test]
fn closed_placement_reports_error() {
    let lines = run_engine(&[
        "newgame ana,ben,cy",
        "place 3 ana 1",
        "place 3 ben 1",
        "place 3 cy 2",
        "options 3 cy",
        "quit",
    ]);

    let error = lines.iter().find(|l| l.starts_with("error ")).unwrap();
    assert!(error.contains("not open"), "unexpected error line: {}", error);
    assert_eq!(lines.last().unwrap(), "options 3 cy 1 3 -");
}

#[test]
fn commands_without_game_report_error() {
    let lines = run_engine(&["results", "quit"]);
    assert_eq!(lines, vec!["error no game in progress"]);
}

#[test]
fn check_and_normalize_without_game() {
    let lines = run_engine(&[
        "check ana:1,ben:1,cy:3",
        "check ana:1,ben:1,cy:2",
        "check ana:-,ben:-",
        "normalize 3 ana:1,ben:1,cy:2",
        "check ana:x",
        "quit",
    ]);

    assert_eq!(lines[0], "valid true");
    assert_eq!(lines[1], "valid false");
    assert_eq!(lines[2], "valid true");
    assert_eq!(lines[3], "normalized ana:1,ben:1,cy:-");
    assert!(lines[4].starts_with("error "));
}

#[test]
fn player_limits_follow_options() {
    let lines = run_engine(&[
        "setoption name MaxPlayers value 2",
        "newgame ana,ben,cy",
        "setoption name MaxPlayers value 5",
        "newgame ana,ben,cy",
        "quit",
    ]);

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("error "), "expected error, got {}", lines[0]);
    assert!(lines[1].starts_with("game game-"));
}

#[test]
fn snapshot_restore_continues_game() {
    let first = run_engine(&["newgame ana,ben", "score ana eggs 6", "snapshot", "quit"]);
    let snapshot = first.iter().find(|l| l.starts_with("snapshot ")).unwrap();
    let json = snapshot.strip_prefix("snapshot ").unwrap();
    let restore = format!("restore {}", json);

    let second = run_engine(&[restore.as_str(), "score ben eggs 9", "results", "quit"]);
    assert_eq!(
        second,
        vec!["total ana 6 rank 2", "total ben 9 rank 1", "winners ben"]
    );
}

#[test]
fn finish_emits_record_and_clears_draft() {
    let lines = run_engine(&[
        "newgame ana,ben expansions base,oceania goals blue",
        "score ana end_of_round_goals 7",
        "score ben nectar_grassland 2",
        "finish",
        "results",
        "quit",
    ]);

    let record = lines.iter().find(|l| l.starts_with("game {")).unwrap();
    let json: serde_json::Value = serde_json::from_str(record.strip_prefix("game ").unwrap()).unwrap();
    assert_eq!(json["goalMode"], "blue");
    assert_eq!(json["totals"]["ana"], 7);
    assert_eq!(json["totals"]["ben"], 5);
    assert_eq!(json["scores"]["ben"]["nectar_score"], 5);
    assert_eq!(lines.last().unwrap(), "error no game in progress");
}

#[test]
fn restore_rejects_duplicate_players() {
    let first = run_engine(&["newgame ana,ben", "snapshot", "quit"]);
    let snapshot = first.iter().find(|l| l.starts_with("snapshot ")).unwrap();
    let mut draft: serde_json::Value =
        serde_json::from_str(snapshot.strip_prefix("snapshot ").unwrap()).unwrap();
    let ana = draft["players"][0].clone();
    draft["players"].as_array_mut().unwrap().push(ana);
    let restore = format!("restore {}", draft);

    let second = run_engine(&[restore.as_str(), "results", "quit"]);
    assert_eq!(second.len(), 2);
    assert!(second[0].starts_with("error "), "expected error, got {}", second[0]);
    assert!(second[0].contains("more than once"));
    assert_eq!(second[1], "error no game in progress");
}

#[test]
fn huge_scores_do_not_crash_results() {
    let lines = run_engine(&[
        "newgame ana,ben",
        "score ana bird_scores 4294967295",
        "score ana eggs 1",
        "results",
        "quit",
    ]);

    assert_eq!(lines[1], "total ana 4294967295 rank 1");
    assert_eq!(lines[2], "total ben 0 rank 2");
    assert_eq!(lines[3], "winners ana");
}
