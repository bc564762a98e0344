//! Integration tests for the yutnori engine binary.
//!
//! Tests full protocol sessions by spawning the engine process, sending
//! commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine_with_args(args: &[&str], commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_yutnori");
    let mut child = Command::new(exe)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start yutnori");

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

fn run_engine(commands: &[&str]) -> Vec<String> {
    run_engine_with_args(&[], commands)
}

#[test]
fn handshake_lists_options_then_yutok() {
    let lines = run_engine(&["yut", "quit"]);

    assert_eq!(lines[0], "id name yutnori");
    assert!(lines[1].starts_with("id author "));
    for name in ["Pieces", "FinishRule", "CaptureBonus", "StickBias", "Seed"] {
        assert!(
            lines.iter().any(|l| l.starts_with(&format!("option name {} ", name))
                || *l == format!("option name {} type string", name)),
            "missing option {}",
            name
        );
    }
    assert_eq!(lines.last().map(String::as_str), Some("yutok"));
}

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn unknown_and_malformed_commands_are_ignored() {
    let lines = run_engine(&[
        "foobar",
        "",
        "   ",
        "throw 7",
        "targets somewhere",
        "move r1",
        "setoption Pieces",
        "isready",
        "quit",
    ]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn throw_targets_move_session() {
    let lines = run_engine(&[
        "newgame",
        "throw 4",
        "throw 2",
        "targets new",
        "move new r4",
        "targets r4",
        "move r4 t1",
        "state",
        "quit",
    ]);
    assert_eq!(
        lines,
        vec![
            "rolled yut turn red phase throw",
            "rolled gae turn red phase move",
            "targets r2/gae r4/yut",
            "moved new r4 yut path br,r1,r2,r3,r4 advance",
            "targets t1/gae",
            "moved r4 t1 gae path r4,tr,t1 advance",
            "state turn blue phase throw rolls - board t1=red1 reserve 3,4 home 0,0",
        ]
    );
}

#[test]
fn shortcut_route_queries() {
    let lines = run_engine(&[
        "route tr1 bl",
        "route tl1 br",
        "route c bl1",
        "route r2 c",
        "route tr tr",
        "quit",
    ]);
    assert_eq!(
        lines,
        vec![
            "route tr1,tr2,c,bl1,bl2,bl",
            "route tl1,tl2,c,br1,br2,br",
            "route none",
            "route none",
            "route tr",
        ]
    );
}

#[test]
fn refused_moves_report_errors_and_keep_state() {
    let lines = run_engine(&[
        "move new r1",
        "throw 1",
        "move new r3",
        "score new",
        "move new r1",
        "quit",
    ]);
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("error "));
    assert_eq!(lines[1], "rolled do turn red phase move");
    assert_eq!(lines[2], "error no unused roll reaches 'r3'");
    assert_eq!(lines[3], "error no unused roll finishes the selected stack");
    assert_eq!(lines[4], "moved new r1 do path br,r1 advance");
}

#[test]
fn capture_grants_another_throw() {
    let lines = run_engine(&["throw 2", "move new r2", "throw 2", "move new r2", "state", "quit"]);
    assert_eq!(lines[3], "moved new r2 gae path br,r1,r2 capture red 1");
    assert_eq!(
        lines[4],
        "state turn blue phase throw rolls - board r2=blue1 reserve 4,3 home 0,0"
    );
}

#[test]
fn setoption_applies_at_newgame() {
    let lines = run_engine(&[
        "setoption name Pieces value 1",
        "setoption name FinishRule value exact",
        "state",
        "newgame",
        "state",
        "quit",
    ]);
    assert_eq!(
        lines,
        vec![
            "state turn red phase throw rolls - board - reserve 4,4 home 0,0",
            "state turn red phase throw rolls - board - reserve 1,1 home 0,0",
        ]
    );
}

#[test]
fn invalid_setoption_is_ignored() {
    let lines = run_engine(&[
        "setoption name Pieces value lots",
        "setoption name Colour value green",
        "newgame",
        "state",
        "quit",
    ]);
    assert_eq!(
        lines,
        vec!["state turn red phase throw rolls - board - reserve 4,4 home 0,0"]
    );
}

#[test]
fn seeded_random_throws_repeat() {
    let session = ["setoption name Seed value 99", "throw", "newgame", "throw", "quit"];
    let a = run_engine(&session);
    let b = run_engine(&session);
    assert_eq!(a.len(), 2);
    assert_eq!(a, b);
    assert!(a.iter().all(|l| l.starts_with("rolled ")));
}

#[test]
fn game_to_completion_announces_winner() {
    let lines = run_engine(&[
        "setoption name Pieces value 1",
        "newgame",
        "throw 0",
        "throw 3",
        "move new tr",
        "move tr c",
        "throw 1",
        "move new r1",
        "throw 4",
        "throw 1",
        "score c",
        "throw 1",
        "quit",
    ]);
    let moved = lines.iter().rposition(|l| l.starts_with("moved c br")).unwrap();
    assert_eq!(lines[moved], "moved c br yut path c,br1,br2,br score 1");
    assert_eq!(lines[moved + 1], "winner red");
    assert_eq!(lines.last().map(String::as_str), Some("error the game is over"));
}

#[test]
fn rules_file_sets_defaults() {
    let dir = std::env::temp_dir().join(format!("yutnori-rules-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("rules.json");
    std::fs::write(&path, r#"{"pieces_per_player": 2, "capture_bonus": false}"#).unwrap();

    let lines = run_engine_with_args(&["--rules", path.to_str().unwrap()], &["state", "quit"]);
    assert_eq!(
        lines,
        vec!["state turn red phase throw rolls - board - reserve 2,2 home 0,0"]
    );
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn eof_exits_cleanly() {
    let lines = run_engine(&["isready"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn rust_log_level_reaches_stderr() {
    let run = |level: &str| {
        let mut child = Command::new(env!("CARGO_BIN_EXE_yutnori"))
            .env("RUST_LOG", level)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to start yutnori");
        let mut stdin = child.stdin.take().unwrap();
        writeln!(stdin, "throw 2").unwrap();
        writeln!(stdin, "quit").unwrap();
        drop(stdin);
        let output = child.wait_with_output().expect("failed to wait on child");
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stderr).into_owned()
    };

    let debug = run("debug");
    assert!(debug.contains("DEBUG"), "stderr: {}", debug);
    assert!(debug.contains("throw"), "stderr: {}", debug);
    assert!(!run("warn").contains("DEBUG"));
}
