use dupsweep::events::{serve, Connection, JsonLinesSink, ServerEvent};
use dupsweep::session::ScanSession;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;

/// Run `requests` through a JSON-lines connection and parse every output line.
fn run_lines(requests: &[Value]) -> Vec<Value> {
    let input: String = requests.iter().map(|r| format!("{r}\n")).collect();
    let mut connection = Connection::new(ScanSession::default(), JsonLinesSink::new(Vec::new()));

    serve(input.as_bytes(), &mut connection).unwrap();

    let output = String::from_utf8(connection.into_sink().into_inner()).unwrap();
    output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn terminal_events(events: &[Value]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| e["event"].as_str())
        .filter(|name| *name != "scan-progress")
        .collect()
}

#[test]
fn test_full_round_over_json_lines() {
    let base = tempdir().unwrap();
    let compare = tempdir().unwrap();
    fs::write(base.path().join("a.txt"), vec![0u8; 10]).unwrap();
    fs::write(base.path().join("b.txt"), vec![0u8; 20]).unwrap();
    fs::write(compare.path().join("a.txt"), vec![1u8; 10]).unwrap();
    fs::write(compare.path().join("c.txt"), vec![1u8; 10]).unwrap();
    let duplicate = compare.path().join("a.txt");

    let events = run_lines(&[
        json!({"event": "scan-base-folder", "data": {"path": base.path()}}),
        json!({"event": "scan-compare-folder", "data": {"path": compare.path()}}),
        json!({"event": "delete-duplicates", "data": {"duplicates": [
            {"name": "a.txt", "size": 10, "path": duplicate}
        ]}}),
    ]);

    assert_eq!(
        terminal_events(&events),
        vec!["base-scan-complete", "compare-scan-complete", "delete-complete"]
    );

    let base_done = events
        .iter()
        .find(|e| e["event"] == "base-scan-complete")
        .unwrap();
    assert_eq!(base_done["data"]["fileCount"], 2);
    assert_eq!(base_done["data"]["message"], "Base folder scan complete.");

    let compare_done = events
        .iter()
        .find(|e| e["event"] == "compare-scan-complete")
        .unwrap();
    assert_eq!(compare_done["data"]["fileCount"], 2);
    assert_eq!(compare_done["data"]["duplicateCount"], 1);
    assert_eq!(compare_done["data"]["duplicates"][0]["name"], "a.txt");
    assert_eq!(compare_done["data"]["duplicates"][0]["size"], 10);

    let deleted = events.last().unwrap();
    assert_eq!(deleted["data"]["total"], 1);
    assert_eq!(deleted["data"]["success"], 1);
    assert_eq!(deleted["data"]["failed"], 0);
    assert!(!duplicate.exists());
}

#[test]
fn test_progress_events_have_wire_fields() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"x").unwrap();

    let events = run_lines(&[json!({"event": "scan-base-folder", "data": {"path": dir.path()}})]);

    let progress: Vec<_> = events
        .iter()
        .filter(|e| e["event"] == "scan-progress")
        .collect();
    assert!(!progress.is_empty());
    for event in progress {
        let data = &event["data"];
        assert!(data["percent"].as_u64().unwrap() <= 100);
        assert!(data["message"].is_string());
        assert!(data["currentPath"].is_string());
        assert!(data["fileCount"].is_u64());
    }
}

#[test]
fn test_errors_become_events() {
    let dir = tempdir().unwrap();

    let events = run_lines(&[
        json!({"event": "scan-base-folder", "data": {"path": dir.path().join("missing")}}),
        json!({"event": "delete-duplicates", "data": {"duplicates": "nope"}}),
        json!({"event": "unknown-event", "data": {}}),
    ]);

    assert_eq!(
        terminal_events(&events),
        vec!["scan-error", "delete-error", "scan-error"]
    );
    let message = events[0]["data"]["message"].as_str().unwrap();
    assert!(message.starts_with("Error during scan:"), "{message}");
}

#[test]
fn test_compare_before_base_reports_nothing() {
    let compare = tempdir().unwrap();
    fs::write(compare.path().join("a.txt"), b"x").unwrap();

    let events = run_lines(&[json!({
        "event": "scan-compare-folder",
        "data": {"path": compare.path()}
    })]);

    let done = events.last().unwrap();
    assert_eq!(done["event"], "compare-scan-complete");
    assert_eq!(done["data"]["fileCount"], 1);
    assert_eq!(done["data"]["duplicateCount"], 0);
}

#[test]
fn test_channel_sink_receives_typed_events() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"x").unwrap();
    let (tx, rx) = std::sync::mpsc::channel();
    let mut connection = Connection::new(ScanSession::default(), tx);

    let request = json!({"event": "scan-base-folder", "data": {"path": dir.path()}});
    connection.handle_json(&request.to_string());

    let last = rx.try_iter().last().unwrap();
    assert!(matches!(last, ServerEvent::BaseScanComplete { file_count: 1, .. }));
    assert_eq!(connection.session().index().len(), 1);
}
