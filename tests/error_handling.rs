//! Error handling and edge case tests.

use paifu::{
    snapshot, Event, GameLog, MeldKind, Replay, ReplayConfig, ReplayError, Seat, TableSnapshot,
    Tile,
};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn events(lines: &str) -> Vec<Event> {
    GameLog::parse(lines).unwrap().into_events()
}

const DEAL: &str = r#"{"type":"start_kyoku","oya":0,"scores":[25000,25000,25000,25000],"tehais":[["1m","2m","3m"],["4p","5p","6p"],["7s","8s","9s"],["E","S","W"]]}"#;

// --- Load Errors ---

#[test]
fn test_malformed_line_rejects_whole_log() {
    let text = format!("{DEAL}\n{{\"type\":\"tsumo\",\"actor\":0,\"pai\":\"1m\"}}\nnot json\n");
    let result = GameLog::parse(&text);
    assert!(matches!(result, Err(ReplayError::MalformedLine { line: 3, .. })));
}

#[test]
fn test_wrong_field_type_is_structural() {
    let text = format!("{DEAL}\n{{\"type\":\"tsumo\",\"actor\":\"zero\",\"pai\":\"1m\"}}\n");
    assert!(matches!(
        GameLog::parse(&text),
        Err(ReplayError::MalformedLine { line: 2, .. })
    ));

    // Not an object, and an object without a type.
    assert!(GameLog::parse("[1, 2, 3]").is_err());
    assert!(GameLog::parse(r#"{"actor":0}"#).is_err());
}

#[test]
fn test_empty_log() {
    assert!(matches!(GameLog::parse(""), Err(ReplayError::EmptyLog)));
    assert!(matches!(GameLog::parse("\n  \n\n"), Err(ReplayError::EmptyLog)));
}

#[test]
fn test_blank_lines_keep_line_numbers() {
    let text = format!("\n{DEAL}\n\n{{\"type\":\"dahai\"");
    assert!(matches!(
        GameLog::parse(&text),
        Err(ReplayError::MalformedLine { line: 4, .. })
    ));

    let log = GameLog::parse(&format!("\n{DEAL}\n\n{{\"type\":\"end_kyoku\"}}\n")).unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log.line(0), Some(DEAL));
}

#[test]
fn test_unknown_type_is_accepted() {
    let log = GameLog::parse(&format!("{DEAL}\n{{\"type\":\"hello\",\"foo\":1}}\n")).unwrap();
    assert_eq!(log.get(1), Some(&Event::Other));
    let table = snapshot(log.events(), 1);
    assert_eq!(table, snapshot(log.events(), 0));
}

#[test]
fn test_open_file() {
    init_tracing();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{DEAL}").unwrap();
    writeln!(file, r#"{{"type":"tsumo","actor":1,"pai":"7p"}}"#).unwrap();
    file.flush().unwrap();

    let log = GameLog::open(file.path()).unwrap();
    assert_eq!(log.len(), 2);
    let table = snapshot(log.events(), 1);
    assert_eq!(table.players[1].drawn_tile(), Some(&Tile::from("7p")));
}

#[test]
fn test_open_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = GameLog::open(dir.path().join("missing.jsonl"));
    assert!(matches!(result, Err(ReplayError::Io(_))));
}

// --- Index Errors ---

#[test]
fn test_snapshot_out_of_range() {
    let replay = Replay::parse(DEAL).unwrap();
    assert!(replay.snapshot(0).is_ok());
    assert!(matches!(
        replay.snapshot(1),
        Err(ReplayError::IndexOutOfRange { index: 1, len: 1 })
    ));
    assert!(replay.view(7, Seat::default()).is_err());
    assert!(replay.is_tsumo(7, Seat::default()).is_err());
}

#[test]
fn test_seat_out_of_range() {
    assert!(matches!(Seat::new(4), Err(ReplayError::SeatOutOfRange(4))));
}

// --- Semantic Anomalies ---

#[test]
fn test_anomalies_never_error() {
    init_tracing();
    let log = events(&[
        DEAL,
        r#"{"type":"tsumo","actor":9,"pai":"1m"}"#,
        r#"{"type":"tsumo","actor":0}"#,
        r#"{"type":"dahai","actor":0,"pai":"C"}"#,
        r#"{"type":"kakan","actor":1,"pai":"5p","consumed":["5p","5p","5p"]}"#,
        r#"{"type":"pon","actor":2,"target":0,"pai":"9m","consumed":["9m","9m"]}"#,
        r#"{"type":"chi","actor":3,"target":2,"pai":"6s"}"#,
        r#"{"type":"hora","actor":1,"target":1,"deltas":[100]}"#,
    ]
    .join("\n"));

    let table = snapshot(&log, log.len() - 1);

    // Discard of a tile the hand never held is still recorded.
    assert_eq!(table.players[0].hand, vec![Tile::from("1m"), Tile::from("2m"), Tile::from("3m")]);
    assert_eq!(table.players[0].discards.len(), 1);
    // No pon existed: kakan changed nothing.
    assert!(table.players[1].melds.is_empty());
    assert_eq!(table.players[1].hand.len(), 3);
    // Pon of a tile never discarded still creates the meld.
    assert_eq!(table.players[2].melds[0].kind, MeldKind::Pon);
    assert!(!table.players[0].discards[0].is_called);
    // Chi without consumed tiles: empty group, hand untouched.
    assert!(table.players[3].melds[0].tiles.is_empty());
    assert_eq!(table.players[3].hand.len(), 3);
    // Short delta array only touches the seats it covers.
    assert_eq!(table.scores(), [25100, 25000, 25000, 25000]);
}

#[test]
fn test_events_before_first_round() {
    let log = events(
        &[
            r#"{"type":"tsumo","actor":0,"pai":"1m"}"#,
            r#"{"type":"dora","dora_marker":"5s"}"#,
        ]
        .join("\n"),
    );
    let table = snapshot(&log, 1);
    assert_eq!(table.players[0].hand, vec![Tile::from("1m")]);
    assert_eq!(table.dora_markers, vec![Tile::from("5s")]);
    assert_eq!(table.names, TableSnapshot::default().names);
}

#[test]
fn test_disabled_cache_still_answers() {
    let text = format!("{DEAL}\n{{\"type\":\"tsumo\",\"actor\":0,\"pai\":\"C\"}}\n");
    let replay = Replay::new(
        GameLog::parse(&text).unwrap(),
        ReplayConfig::default().with_snapshot_cache_size(0),
    );
    assert_eq!(replay.snapshot(1).unwrap().players[0].hand.len(), 4);
    assert_eq!(replay.cached_snapshots(), 0);
}
