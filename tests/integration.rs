//! Integration tests for the checkers server binary.
//!
//! Spawns the server, feeds it a session of JSON request lines over stdin,
//! and checks the JSON event lines it writes to stdout.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde_json::{json, Value};

/// Sends all requests, closes stdin, and collects every output line.
fn run_server(requests: &[Value]) -> Vec<Value> {
    let exe = env!("CARGO_BIN_EXE_checkers");
    let mut child = Command::new(exe)
        .args(["--seed", "1"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start checkers");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();

    for request in requests {
        writeln!(stdin, "{}", request).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<Value> = BufReader::new(stdout)
        .lines()
        .map(|l| serde_json::from_str(&l.unwrap()).unwrap())
        .collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

/// A live server session for request/response exchanges.
struct Session {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl Session {
    fn start() -> Self {
        let mut child = Command::new(env!("CARGO_BIN_EXE_checkers"))
            .args(["--seed", "3"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("failed to start checkers");
        let stdin = child.stdin.take().unwrap();
        let stdout = BufReader::new(child.stdout.take().unwrap());
        Session { child, stdin, stdout }
    }

    fn send(&mut self, request: Value) {
        writeln!(self.stdin, "{}", request).unwrap();
        self.stdin.flush().unwrap();
    }

    fn recv(&mut self) -> Value {
        let mut line = String::new();
        self.stdout.read_line(&mut line).unwrap();
        serde_json::from_str(&line).unwrap()
    }

    fn finish(mut self) {
        drop(self.stdin);
        let status = self.child.wait().unwrap();
        assert!(status.success());
    }
}

fn cell(row: u8, col: u8) -> Value {
    json!({ "row": row, "col": col })
}

/// Opens a room for "alice" and seats "bob"; returns (room id, white, black).
fn start_game(session: &mut Session) -> (String, String, String) {
    session.send(json!({"client": "alice", "type": "create_room", "username": "Alice"}));
    let created = session.recv();
    let room_id = created["event"]["roomId"].as_str().unwrap().to_string();

    session.send(json!({"client": "bob", "type": "join_room", "roomId": room_id, "username": "Bob"}));
    let started = session.recv();
    assert_eq!(started["event"]["type"], "game_started");
    let players = started["event"]["players"].as_array().unwrap();
    let of = |color: &str| {
        players
            .iter()
            .find(|p| p["color"] == color)
            .unwrap()["id"]
            .as_str()
            .unwrap()
            .to_string()
    };
    (room_id, of("white"), of("black"))
}

#[test]
fn help_exits_successfully() {
    let status = Command::new(env!("CARGO_BIN_EXE_checkers"))
        .arg("--help")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn unknown_flag_fails() {
    let status = Command::new(env!("CARGO_BIN_EXE_checkers"))
        .arg("--bogus")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn create_room_replies_with_id() {
    let lines = run_server(&[json!({"client": "c1", "type": "create_room", "username": "Alice"})]);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["to"], json!(["c1"]));
    assert_eq!(lines[0]["event"]["type"], "room_created");
    let id = lines[0]["event"]["roomId"].as_str().unwrap();
    assert_eq!(id.len(), 6);
    assert!(id.chars().all(|c| c.is_ascii_uppercase()));
}

#[test]
fn malformed_lines_are_skipped() {
    let lines = run_server(&[
        json!("not an object"),
        json!({"client": "c1", "type": "teleport"}),
        json!({"client": "c1", "type": "create_room", "username": "Alice"}),
    ]);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["event"]["type"], "room_created");
}

#[test]
fn join_unknown_room_reports_join_error() {
    let lines = run_server(&[json!({"client": "c2", "type": "join_room", "roomId": "NOROOM", "username": "Bob"})]);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["to"], json!(["c2"]));
    assert_eq!(lines[0]["event"]["type"], "join_error");
    assert!(lines[0]["event"]["message"].as_str().unwrap().contains("NOROOM"));
}

#[test]
fn game_started_carries_initial_state() {
    let mut session = Session::start();
    session.send(json!({"client": "alice", "type": "create_room", "username": "Alice"}));
    let room_id = session.recv()["event"]["roomId"].as_str().unwrap().to_string();
    session.send(json!({"client": "bob", "type": "join_room", "roomId": room_id, "username": "Bob"}));
    let started = session.recv();

    assert_eq!(started["to"], json!(["alice", "bob"]));
    let event = &started["event"];
    assert_eq!(event["currentRoom"], room_id.as_str());
    let state = &event["gameState"];
    assert_eq!(state["currentPlayer"], "white");
    assert_eq!(state["isGameOver"], false);
    assert!(state["winner"].is_null());
    assert!(state["activePiece"].is_null());
    assert_eq!(state["possibleMoves"], json!([]));

    let board = state["board"].as_array().unwrap();
    assert_eq!(board.len(), 8);
    assert_eq!(board[0][1], json!({"color": "black", "type": "regular"}));
    assert_eq!(board[5][0], json!({"color": "white", "type": "regular"}));
    assert!(board[3][0].is_null());
    session.finish();
}

#[test]
fn select_then_move_updates_both_players() {
    let mut session = Session::start();
    let (room_id, white, black) = start_game(&mut session);

    session.send(json!({"client": white, "type": "select_piece", "roomId": room_id, "cell": cell(5, 2)}));
    let selected = session.recv();
    assert_eq!(selected["event"]["type"], "updated_state");
    assert_eq!(selected["to"].as_array().unwrap().len(), 2);
    assert_eq!(selected["event"]["gameState"]["activePiece"], cell(5, 2));
    assert_eq!(
        selected["event"]["gameState"]["possibleMoves"],
        json!([cell(4, 1), cell(4, 3)])
    );

    session.send(json!({
        "client": white,
        "type": "make_move",
        "roomId": room_id,
        "move": {"from": cell(5, 2), "to": cell(4, 3)}
    }));
    let moved = session.recv();
    let state = &moved["event"]["gameState"];
    assert_eq!(state["currentPlayer"], "black");
    assert!(state["board"][5][2].is_null());
    assert_eq!(state["board"][4][3]["color"], "white");

    // White may not move twice in a row.
    session.send(json!({
        "client": white,
        "type": "make_move",
        "roomId": room_id,
        "move": {"from": cell(5, 0), "to": cell(4, 1)}
    }));
    let rejected = session.recv();
    assert_eq!(rejected["to"], json!([white]));
    assert_eq!(rejected["event"]["type"], "move_error");

    // Black moves without a prior selection.
    session.send(json!({
        "client": black,
        "type": "make_move",
        "roomId": room_id,
        "move": {"from": cell(2, 1), "to": cell(3, 2)}
    }));
    let moved = session.recv();
    assert_eq!(moved["event"]["gameState"]["currentPlayer"], "white");
    session.finish();
}

#[test]
fn illegal_destination_reports_move_error() {
    let mut session = Session::start();
    let (room_id, white, _) = start_game(&mut session);
    session.send(json!({
        "client": white,
        "type": "make_move",
        "roomId": room_id,
        "move": {"from": cell(5, 2), "to": cell(3, 4)}
    }));
    let rejected = session.recv();
    assert_eq!(rejected["event"]["type"], "move_error");
    assert!(rejected["event"]["message"].as_str().unwrap().contains("(3, 4)"));
    session.finish();
}

#[test]
fn third_player_cannot_join() {
    let mut session = Session::start();
    let (room_id, _, _) = start_game(&mut session);
    session.send(json!({"client": "carol", "type": "join_room", "roomId": room_id, "username": "Carol"}));
    let rejected = session.recv();
    assert_eq!(rejected["to"], json!(["carol"]));
    assert_eq!(rejected["event"]["type"], "join_error");
    session.finish();
}

#[test]
fn disconnect_notifies_opponent() {
    let mut session = Session::start();
    let (room_id, white, black) = start_game(&mut session);
    session.send(json!({"client": white, "type": "disconnect"}));
    let left = session.recv();
    assert_eq!(left["to"], json!([black]));
    assert_eq!(left["event"]["type"], "player_left");
    assert_eq!(left["event"]["client"], white.as_str());
    assert_eq!(left["event"]["roomId"], room_id.as_str());
    session.finish();
}
