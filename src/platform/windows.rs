//! Windows implementations of platform helpers (best-effort).
//!
//! Notes:
//! - Creating symlinks needs SeCreateSymbolicLinkPrivilege or Developer Mode;
//!   without it the OS error is returned as-is.
//! - Windows lacks POSIX mode semantics; we do not attempt ACL management here.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// CreateSymbolicLinkW via std; fails with AlreadyExists if `link` is occupied.
pub fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

/// Directory fsync is not supported through std on Windows.
pub fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

/// Append-open the log file, creating its parent best-effort. No ACL changes.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let _ = std::fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Create `path` (must not exist) and write `contents`. No ACL changes.
pub fn write_file_secure_new_0600(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut f = OpenOptions::new().write(true).create_new(true).open(path)?;
    f.write_all(contents)?;
    f.sync_all()
}

/// No-op on Windows; POSIX-style directory modes are not applicable.
pub fn set_dir_mode_0700(_path: &Path) -> io::Result<()> {
    Ok(())
}
