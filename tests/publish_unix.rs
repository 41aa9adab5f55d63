#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};

use fdb_symlink::{
    publish_symlink, publish_symlink_with, AllocLimits, OsLinker, SuffixGenerator, SymlinkError,
    TempSymlinkAllocator,
};
use tempfile::tempdir;

fn leftover_temps(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("symlink."))
        .collect()
}

#[test]
fn publish_creates_new_link() {
    let td = tempdir().unwrap();
    let dest = td.path().join("current");

    let got = publish_symlink("releases/v1", &dest).unwrap();
    assert_eq!(got, dest);
    assert_eq!(fs::read_link(&dest).unwrap(), PathBuf::from("releases/v1"));
    assert!(leftover_temps(td.path()).is_empty());
}

#[test]
fn publish_replaces_existing_link() {
    let td = tempdir().unwrap();
    let dest = td.path().join("current");
    std::os::unix::fs::symlink("v1", &dest).unwrap();

    publish_symlink("v2", &dest).unwrap();
    assert_eq!(fs::read_link(&dest).unwrap(), PathBuf::from("v2"));
    assert!(leftover_temps(td.path()).is_empty());
}

#[test]
fn publish_replaces_regular_file() {
    let td = tempdir().unwrap();
    let dest = td.path().join("current");
    fs::write(&dest, b"old").unwrap();

    publish_symlink("v2", &dest).unwrap();
    assert!(fs::symlink_metadata(&dest).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_link(&dest).unwrap(), PathBuf::from("v2"));
}

#[test]
fn publish_over_non_empty_directory_fails_and_cleans_up() {
    let td = tempdir().unwrap();
    let dest = td.path().join("current");
    fs::create_dir(&dest).unwrap();
    fs::write(dest.join("keep.txt"), b"keep").unwrap();

    let err = publish_symlink("v2", &dest).unwrap_err();
    match &err {
        SymlinkError::Install { temp, dest: d, .. } => {
            assert_eq!(d, &dest);
            assert!(fs::symlink_metadata(temp).is_err(), "temp symlink left behind");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.code(), 6);
    assert!(dest.join("keep.txt").exists());
    assert!(leftover_temps(td.path()).is_empty());
}

#[test]
fn publish_into_missing_parent_is_create_error() {
    let td = tempdir().unwrap();
    let dest = td.path().join("nope").join("current");

    let err = publish_symlink("v1", &dest).unwrap_err();
    match err {
        SymlinkError::Create { dir, source } => {
            assert_eq!(dir, td.path().join("nope"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn publish_reports_exhaustion_when_every_name_is_taken() {
    let td = tempdir().unwrap();
    let reference = SuffixGenerator::with_state(3);
    for _ in 0..3 {
        fs::write(td.path().join(format!("symlink.{}", reference.next_suffix())), b"x").unwrap();
    }

    // Threshold high enough that no reseed happens within the budget.
    let alloc = TempSymlinkAllocator::new(SuffixGenerator::with_state(3), OsLinker)
        .with_limits(AllocLimits { max_attempts: 3, reseed_after: 10 });
    assert_eq!(alloc.limits().max_attempts, 3);
    let dest = td.path().join("current");
    let err = publish_symlink_with(&alloc, Path::new("v1"), &dest).unwrap_err();
    assert!(matches!(err, SymlinkError::Exhausted { .. }), "got {err:?}");
    assert!(!td.path().join("current").exists());
}
