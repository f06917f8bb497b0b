use clap::Parser;
use dupsweep::cli::Cli;
use dupsweep::error::ExitCode;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn run(args: &[&str]) -> anyhow::Result<ExitCode> {
    let cli = Cli::try_parse_from(args).unwrap();
    dupsweep::run_app(cli)
}

fn write_sized(dir: &Path, name: &str, size: usize) {
    fs::write(dir.join(name), vec![b'q'; size]).unwrap();
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_scan_exit_code_duplicates_found() {
    let base = tempdir().unwrap();
    let compare = tempdir().unwrap();
    write_sized(base.path(), "a.txt", 10);
    write_sized(compare.path(), "a.txt", 10);

    let code = run(&[
        "dupsweep",
        "-q",
        "scan",
        path_str(base.path()),
        path_str(compare.path()),
        "--output",
        "json",
    ])
    .unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(compare.path().join("a.txt").exists());
}

#[test]
fn test_scan_exit_code_no_duplicates() {
    let base = tempdir().unwrap();
    let compare = tempdir().unwrap();
    write_sized(base.path(), "a.txt", 10);
    write_sized(compare.path(), "b.txt", 10);

    let code = run(&[
        "dupsweep",
        "-q",
        "scan",
        path_str(base.path()),
        path_str(compare.path()),
        "--output",
        "csv",
    ])
    .unwrap();

    assert_eq!(code, ExitCode::NoDuplicates);
}

#[test]
fn test_scan_delete_removes_duplicates_only() {
    let base = tempdir().unwrap();
    let compare = tempdir().unwrap();
    write_sized(base.path(), "a.txt", 10);
    write_sized(compare.path(), "a.txt", 10);
    write_sized(compare.path(), "c.txt", 10);

    let code = run(&[
        "dupsweep",
        "-q",
        "--no-color",
        "scan",
        path_str(base.path()),
        path_str(compare.path()),
        "--delete",
        "--yes",
    ])
    .unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(!compare.path().join("a.txt").exists());
    assert!(compare.path().join("c.txt").exists());
    assert!(base.path().join("a.txt").exists());
}

#[test]
fn test_scan_missing_base_is_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let err = run(&[
        "dupsweep",
        "-q",
        "scan",
        path_str(&missing),
        path_str(dir.path()),
        "--output",
        "json",
    ])
    .unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    assert!(format!("{err:#}").contains("Base folder scan failed"));
}

#[test]
fn test_missing_config_file_is_error() {
    let dir = tempdir().unwrap();

    let result = run(&[
        "dupsweep",
        "-q",
        "--config",
        path_str(&dir.path().join("nope.toml")),
        "config",
    ]);

    assert!(result.is_err());
}

#[test]
fn test_config_command_succeeds() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("dupsweep.toml");
    fs::write(&config, "progress_interval = 5\n").unwrap();

    let code = run(&["dupsweep", "-q", "--config", path_str(&config), "config"]).unwrap();

    assert_eq!(code, ExitCode::Success);
}
