#![cfg(unix)]

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fdb_symlink::{allocate_temp_symlink, SuffixGenerator, TempSymlinkAllocator, OsLinker};
use tempfile::tempdir;

fn is_temp_name(p: &Path) -> bool {
    let name = p.file_name().unwrap().to_str().unwrap();
    match name.strip_prefix("symlink.") {
        Some(digits) => digits.len() == 9 && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

#[test]
fn allocates_in_empty_directory() {
    let td = tempdir().unwrap();
    let dir = td.path().join("fdbtest");
    fs::create_dir(&dir).unwrap();

    let p = allocate_temp_symlink("v3", &dir).expect("allocate should succeed");

    assert_eq!(p.parent(), Some(dir.as_path()));
    assert!(is_temp_name(&p), "unexpected name: {}", p.display());
    let meta = fs::symlink_metadata(&p).unwrap();
    assert!(meta.file_type().is_symlink());
    assert_eq!(fs::read_link(&p).unwrap(), PathBuf::from("v3"));
}

#[test]
fn target_is_stored_verbatim() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let td = tempdir().unwrap();
    let raw: &[u8] = b"../odd dir/\xff\xfe name//.";
    let target = Path::new(OsStr::from_bytes(raw));

    let p = allocate_temp_symlink(target, td.path()).unwrap();
    assert_eq!(fs::read_link(&p).unwrap().as_os_str().as_bytes(), raw);
}

#[test]
fn missing_directory_is_not_retried_or_created() {
    let td = tempdir().unwrap();
    let dir = td.path().join("absent");

    let err = allocate_temp_symlink("v1", &dir).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
    assert!(!dir.exists(), "directory must not be created");
}

#[test]
fn sequential_allocations_are_distinct() {
    let td = tempdir().unwrap();
    let mut seen = HashSet::new();
    for i in 0..100 {
        let p = allocate_temp_symlink(format!("t{i}"), td.path()).unwrap();
        assert!(seen.insert(p));
    }
    assert_eq!(fs::read_dir(td.path()).unwrap().count(), 100);
}

#[test]
fn twin_generators_collide_then_step_past_each_other() {
    // Two allocators on identical LCG trajectories behave like two processes that
    // happened to seed the same way: the second one walks past the first one's names.
    let td = tempdir().unwrap();
    let first = TempSymlinkAllocator::new(SuffixGenerator::with_state(7), OsLinker);
    let second = TempSymlinkAllocator::new(SuffixGenerator::with_state(7), OsLinker);

    let taken: Vec<PathBuf> = (0..5)
        .map(|i| first.allocate(Path::new(&format!("a{i}")), td.path()).unwrap())
        .collect();

    let reference = SuffixGenerator::with_state(7);
    let names: Vec<String> = (0..6).map(|_| reference.next_suffix()).collect();
    for (p, suffix) in taken.iter().zip(&names) {
        assert_eq!(p, &td.path().join(format!("symlink.{suffix}")));
    }

    let got = second.allocate(Path::new("b"), td.path()).unwrap();
    assert_eq!(got, td.path().join(format!("symlink.{}", names[5])));
    assert_eq!(fs::read_link(&got).unwrap(), PathBuf::from("b"));
    for (i, p) in taken.iter().enumerate() {
        assert_eq!(fs::read_link(p).unwrap(), PathBuf::from(format!("a{i}")));
    }
}

#[test]
fn collision_storm_escapes_via_reseed() {
    let td = tempdir().unwrap();

    // Occupy the first 40 names the fixed trajectory would produce.
    let reference = SuffixGenerator::with_state(12345);
    let occupied: HashSet<PathBuf> = (0..40)
        .map(|_| td.path().join(format!("symlink.{}", reference.next_suffix())))
        .collect();
    for p in &occupied {
        fs::write(p, b"squatter").unwrap();
    }

    let alloc = TempSymlinkAllocator::new(SuffixGenerator::with_state(12345), OsLinker);
    let got = alloc.allocate(Path::new("fresh"), td.path()).unwrap();

    assert!(!occupied.contains(&got));
    assert_eq!(fs::read_link(&got).unwrap(), PathBuf::from("fresh"));
    for p in &occupied {
        assert_eq!(fs::read(p).unwrap(), b"squatter", "squatter overwritten: {}", p.display());
    }
}

#[test]
fn read_only_directory_fails_once_with_os_error() {
    use std::os::unix::fs::PermissionsExt;

    let td = tempdir().unwrap();
    let dir = td.path().join("ro");
    fs::create_dir(&dir).unwrap();
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o500)).unwrap();

    // root ignores directory write bits; nothing to assert there.
    let probe = dir.join("probe");
    if fs::write(&probe, b"x").is_ok() {
        let _ = fs::remove_file(&probe);
        eprintln!("Skipping: directory permissions not enforced for this user");
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o700)).unwrap();
        return;
    }

    let err = allocate_temp_symlink("v1", &dir).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o700)).unwrap();
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
}
