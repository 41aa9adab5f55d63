use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::errors::SymlinkError;

/// Ensure `dir` exists and is a directory (following symlinks). Nothing is created.
///
/// The allocator would surface the same conditions as raw OS errors on its first
/// attempt; this gives the CLI a named error before touching anything.
pub fn ensure_link_dir(dir: &Path) -> Result<(), SymlinkError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {
            debug!(dir = %dir.display(), "link directory ok");
            Ok(())
        }
        Ok(_) => Err(SymlinkError::NotADirectory(dir.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(SymlinkError::DirMissing(dir.to_path_buf()))
        }
        Err(e) => Err(SymlinkError::Create {
            dir: dir.to_path_buf(),
            source: e,
        }),
    }
}
