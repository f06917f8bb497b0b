use dupsweep::duplicates::DuplicateIndex;
use dupsweep::progress::NoProgress;
use dupsweep::scanner::{ScanError, Walker, WalkerConfig};
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let walker = Walker::new(dir.path(), WalkerConfig::default());

    let files = walker.scan(None, &NoProgress).unwrap();

    assert!(files.is_empty());
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("subdir");
    let deep = sub.join("deeper");
    fs::create_dir_all(&deep).unwrap();

    File::create(dir.path().join("a.txt"))
        .unwrap()
        .write_all(b"top")
        .unwrap();
    File::create(sub.join("b.txt"))
        .unwrap()
        .write_all(b"middle")
        .unwrap();
    File::create(deep.join("c.txt"))
        .unwrap()
        .write_all(b"bottom!")
        .unwrap();

    let walker = Walker::new(dir.path(), WalkerConfig::default());
    let mut files = walker.scan(None, &NoProgress).unwrap();
    files.sort_by(|a, b| a.name.cmp(&b.name));

    assert_eq!(files.len(), 3);
    assert_eq!(files[0].name, "a.txt");
    assert_eq!(files[0].size, 3);
    assert_eq!(files[1].name, "b.txt");
    assert_eq!(files[1].path, sub.join("b.txt"));
    assert_eq!(files[2].name, "c.txt");
    assert_eq!(files[2].size, 7);
}

#[test]
fn test_directories_are_not_records() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("only_a_dir")).unwrap();
    fs::create_dir(dir.path().join("another")).unwrap();

    let walker = Walker::new(dir.path(), WalkerConfig::default());

    assert!(walker.scan(None, &NoProgress).unwrap().is_empty());
    assert_eq!(walker.count_files(&NoProgress).unwrap(), 0);
}

#[test]
fn test_count_matches_scan() {
    let dir = tempdir().unwrap();
    for i in 0..25 {
        let sub = dir.path().join(format!("d{}", i % 4));
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join(format!("f{i}.bin")), vec![0u8; i]).unwrap();
    }

    let walker = Walker::new(dir.path(), WalkerConfig::new(false, 3));

    assert_eq!(walker.count_files(&NoProgress).unwrap(), 25);
    assert_eq!(walker.scan(None, &NoProgress).unwrap().len(), 25);
}

#[test]
fn test_scan_fills_index() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"0123456789").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("a.txt"), b"0123456789").unwrap();
    fs::write(dir.path().join("b.txt"), b"01234").unwrap();

    let mut index = DuplicateIndex::new();
    let files = Walker::new(dir.path(), WalkerConfig::default())
        .scan(Some(&mut index), &NoProgress)
        .unwrap();

    assert_eq!(files.len(), 3);
    // Two a.txt files share one key.
    assert_eq!(index.len(), 2);
}

#[test]
fn test_scan_missing_root() {
    let dir = tempdir().unwrap();
    let walker = Walker::new(&dir.path().join("gone"), WalkerConfig::default());

    let result = walker.scan(None, &NoProgress);

    assert!(matches!(result, Err(ScanError::NotFound(_))));
}

#[test]
fn test_scan_root_is_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, b"x").unwrap();

    let result = Walker::new(&file, WalkerConfig::default()).scan(None, &NoProgress);

    assert!(matches!(result, Err(ScanError::NotADirectory(_))));
}

#[cfg(unix)]
#[test]
fn test_symlinks_not_followed_by_default() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("original.txt");
    fs::write(&original, b"content").unwrap();
    std::os::unix::fs::symlink(&original, dir.path().join("link.txt")).unwrap();

    let files = Walker::new(dir.path(), WalkerConfig::default())
        .scan(None, &NoProgress)
        .unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "original.txt");
}

#[cfg(unix)]
#[test]
fn test_followed_symlink_reports_target_size() {
    let dir = tempdir().unwrap();
    let target_dir = tempdir().unwrap();
    fs::write(target_dir.path().join("inner.txt"), b"12345").unwrap();
    std::os::unix::fs::symlink(target_dir.path(), dir.path().join("linked")).unwrap();

    let files = Walker::new(dir.path(), WalkerConfig::new(true, 100))
        .scan(None, &NoProgress)
        .unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "inner.txt");
    assert_eq!(files[0].size, 5);
    assert_eq!(files[0].path, dir.path().join("linked").join("inner.txt"));
}
