//! Atomic symlink publish: allocate a temp symlink next to the destination, then
//! rename it over the destination.
//! - Readers of `dest` see either the old entry or the new link, never a gap.
//! - On Unix, best-effort fsync of the destination directory after rename.
//! - If the rename fails the temp link is removed (best-effort).

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::errors::SymlinkError;
use crate::suffix::SuffixSource;

use super::allocate::{LinkCreator, TempSymlinkAllocator};

/// Point `dest` at `target`, replacing whatever `dest` was, using the default allocator.
pub fn publish_symlink(
    target: impl AsRef<Path>,
    dest: impl AsRef<Path>,
) -> Result<PathBuf, SymlinkError> {
    publish_symlink_with(&TempSymlinkAllocator::os_default(), target.as_ref(), dest.as_ref())
}

/// Same as [`publish_symlink`] with an explicit allocator (custom limits or generator).
pub fn publish_symlink_with<S: SuffixSource, L: LinkCreator>(
    allocator: &TempSymlinkAllocator<S, L>,
    target: &Path,
    dest: &Path,
) -> Result<PathBuf, SymlinkError> {
    let dir = link_dir(dest);

    let temp = allocator
        .allocate(target, dir)
        .map_err(|e| SymlinkError::from_allocate(dir, e))?;

    if let Err(source) = fs::rename(&temp, dest) {
        if let Err(e) = fs::remove_file(&temp) {
            warn!(temp = %temp.display(), error = %e, "could not remove temp symlink after failed install");
        }
        return Err(SymlinkError::Install {
            temp,
            dest: dest.to_path_buf(),
            source,
        });
    }

    // Ignore fsync errors to avoid turning a successful rename into a failure.
    let _ = crate::platform::fsync_dir(dir);

    info!(dest = %dest.display(), link_target = %target.display(), "Published symlink");
    Ok(dest.to_path_buf())
}

/// Directory that will hold the temp link for `dest` (its parent, or "." for bare names).
pub fn link_dir(dest: &Path) -> &Path {
    match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_dir_of_nested_path_is_parent() {
        assert_eq!(link_dir(Path::new("a/b/current")), Path::new("a/b"));
    }

    #[test]
    fn link_dir_of_bare_name_is_cwd() {
        assert_eq!(link_dir(Path::new("current")), Path::new("."));
    }
}
