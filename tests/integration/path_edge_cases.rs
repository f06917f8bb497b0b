use dupsweep::events::{serve, Connection, JsonLinesSink};
use dupsweep::progress::NoProgress;
use dupsweep::scanner::FileRecord;
use dupsweep::session::ScanSession;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

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

fn find_event<'a>(events: &'a [Value], name: &str) -> &'a Value {
    events
        .iter()
        .find(|e| e["event"] == name)
        .unwrap_or_else(|| panic!("no {name} event in {events:?}"))
}

#[test]
fn test_unicode_names_round_trip_through_deletion() {
    let base = tempdir().unwrap();
    let compare = tempdir().unwrap();
    let names = ["café.txt", "日本語 file.txt", "emoji 🎉.bin"];
    for name in names {
        fs::write(base.path().join(name), b"same").unwrap();
        fs::write(compare.path().join(name), b"diff").unwrap();
    }

    let events = run_lines(&[
        json!({"event": "scan-base-folder", "data": {"path": base.path()}}),
        json!({"event": "scan-compare-folder", "data": {"path": compare.path()}}),
    ]);
    let compare_done = find_event(&events, "compare-scan-complete");
    assert_eq!(compare_done["data"]["duplicateCount"], 3);

    // Hand the reported records back exactly as a client would.
    let duplicates = compare_done["data"]["duplicates"].clone();
    for record in duplicates.as_array().unwrap() {
        let name = record["name"].as_str().unwrap();
        assert!(names.contains(&name), "unexpected name {name}");
    }
    let events = run_lines(&[json!({
        "event": "delete-duplicates",
        "data": {"duplicates": duplicates}
    })]);

    let deleted = find_event(&events, "delete-complete");
    assert_eq!(deleted["data"]["success"], 3);
    assert_eq!(deleted["data"]["failed"], 0);
    for name in names {
        assert!(!compare.path().join(name).exists());
        assert!(base.path().join(name).exists());
    }
}

#[test]
fn test_names_with_quotes_and_newlines_match() {
    let base = tempdir().unwrap();
    let compare = tempdir().unwrap();

    // Windows does not allow these characters in file names.
    if cfg!(not(windows)) {
        for name in ["say \"hi\".txt", "two\nlines.txt"] {
            fs::write(base.path().join(name), b"x").unwrap();
            fs::write(compare.path().join(name), b"y").unwrap();
        }

        let mut session = ScanSession::default();
        session.run_base_scan(base.path(), &NoProgress).unwrap();
        let summary = session.run_compare_scan(compare.path(), &NoProgress).unwrap();

        assert_eq!(summary.duplicate_count(), 2);
    }
}

#[cfg(unix)]
mod non_utf8 {
    use super::*;
    use clap::Parser;
    use dupsweep::cli::Cli;
    use dupsweep::error::ExitCode;
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    /// Create `name` under `dir`, or `None` if the filesystem rejects it.
    fn create_raw(dir: &Path, name: &[u8], contents: &[u8]) -> Option<()> {
        let path = dir.join(OsStr::from_bytes(name));
        if let Err(e) = fs::write(&path, contents) {
            eprintln!("Skipping non-UTF-8 name test: failed to create file: {e}");
            return None;
        }
        Some(())
    }

    #[test]
    fn test_distinct_raw_names_are_not_duplicates() {
        let base = tempdir().unwrap();
        let compare = tempdir().unwrap();
        if create_raw(base.path(), b"caf\xe9.txt", b"abcd").is_none()
            || create_raw(compare.path(), b"caf\xe8.txt", b"wxyz").is_none()
        {
            return;
        }

        let mut session = ScanSession::default();
        session.run_base_scan(base.path(), &NoProgress).unwrap();
        let summary = session.run_compare_scan(compare.path(), &NoProgress).unwrap();

        assert_eq!(summary.file_count, 1);
        assert_eq!(summary.duplicate_count(), 0);
    }

    #[test]
    fn test_same_raw_name_is_a_duplicate() {
        let base = tempdir().unwrap();
        let compare = tempdir().unwrap();
        if create_raw(base.path(), b"caf\xe9.txt", b"abcd").is_none()
            || create_raw(compare.path(), b"caf\xe9.txt", b"wxyz").is_none()
        {
            return;
        }

        let mut session = ScanSession::default();
        session.run_base_scan(base.path(), &NoProgress).unwrap();
        let summary = session.run_compare_scan(compare.path(), &NoProgress).unwrap();

        assert_eq!(summary.duplicate_count(), 1);
        let record: &FileRecord = &summary.duplicates[0];
        assert_eq!(record.os_name(), OsStr::from_bytes(b"caf\xe9.txt"));
        assert_eq!(record.name, "caf\u{fffd}.txt");
    }

    #[test]
    fn test_events_still_arrive_for_non_utf8_paths() {
        let base = tempdir().unwrap();
        let compare = tempdir().unwrap();
        if create_raw(base.path(), b"caf\xe9.txt", b"abcd").is_none()
            || create_raw(compare.path(), b"caf\xe9.txt", b"wxyz").is_none()
        {
            return;
        }
        let lossy = compare.path().join("caf\u{fffd}.txt");

        let events = run_lines(&[
            json!({"event": "scan-base-folder", "data": {"path": base.path()}}),
            json!({"event": "scan-compare-folder", "data": {"path": compare.path()}}),
            json!({"event": "delete-duplicates", "data": {"duplicates": [
                {"name": "caf\u{fffd}.txt", "size": 4, "path": lossy}
            ]}}),
        ]);

        let compare_done = find_event(&events, "compare-scan-complete");
        assert_eq!(compare_done["data"]["duplicateCount"], 1);
        assert_eq!(
            compare_done["data"]["duplicates"][0]["path"],
            lossy.to_str().unwrap()
        );

        // The lossy path names no real file, so the request fails per file
        // but still completes.
        let deleted = find_event(&events, "delete-complete");
        assert_eq!(deleted["data"]["total"], 1);
        assert_eq!(deleted["data"]["failed"], 1);
        assert!(compare.path().join(OsStr::from_bytes(b"caf\xe9.txt")).exists());
    }

    #[test]
    fn test_json_output_with_non_utf8_duplicate() {
        let base = tempdir().unwrap();
        let compare = tempdir().unwrap();
        if create_raw(base.path(), b"caf\xe9.txt", b"abcd").is_none()
            || create_raw(compare.path(), b"caf\xe9.txt", b"wxyz").is_none()
        {
            return;
        }

        let cli = Cli::try_parse_from([
            OsStr::new("dupsweep"),
            OsStr::new("-q"),
            OsStr::new("scan"),
            base.path().as_os_str(),
            compare.path().as_os_str(),
            OsStr::new("--output"),
            OsStr::new("json"),
        ])
        .unwrap();

        let code = dupsweep::run_app(cli).unwrap();
        assert_eq!(code, ExitCode::Success);
    }
}
