//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors for safety.
//!
//! Resolution of the config path:
//! - `$FDB_SYMLINK_CONFIG` if set and non-empty. Relative values are joined onto the
//!   current directory; a value naming an existing directory gets `config.xml` appended.
//! - Otherwise `<config_dir>/fdb_symlink/config.xml`, falling back to `$HOME/.config`.
//!
//! The default log file always sits next to the config file.

use anyhow::{anyhow, Context, Result};
use dirs::config_dir;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file (or directory).
pub const CONFIG_ENV: &str = "FDB_SYMLINK_CONFIG";

const APP_DIR: &str = "fdb_symlink";
const CONFIG_FILE: &str = "config.xml";
const LOG_FILE: &str = "fdb_symlink.log";

/// OS-appropriate config path, honouring `$FDB_SYMLINK_CONFIG`.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(raw) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        let mut p = PathBuf::from(raw);
        if p.is_relative() {
            let cwd = env::current_dir()
                .context("resolve current directory for relative config path")?;
            p = cwd.join(p);
        }
        if p.is_dir() {
            p.push(CONFIG_FILE);
        }
        return Ok(p);
    }

    if let Some(mut base) = config_dir() {
        base.push(APP_DIR);
        base.push(CONFIG_FILE);
        return Ok(base);
    }

    env::var_os("HOME")
        .map(|h| PathBuf::from(h).join(".config").join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| anyhow!("cannot determine a config directory (HOME unset)"))
}

/// Default log file path, colocated with the config file.
pub fn default_log_path() -> Result<PathBuf> {
    let cfg = default_config_path()?;
    let dir = cfg
        .parent()
        .ok_or_else(|| anyhow!("config path has no parent: {}", cfg.display()))?;
    Ok(dir.join(LOG_FILE))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.as_os_str().is_empty() {
            break;
        }
        if anc.exists() && fs::symlink_metadata(anc)?.file_type().is_symlink() {
            return Ok(true);
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn detects_symlinked_parent() {
        let td = tempfile::tempdir().unwrap();
        let base = fs::canonicalize(td.path()).unwrap();
        let real = base.join("real");
        fs::create_dir_all(&real).unwrap();
        let alias = base.join("alias");
        std::os::unix::fs::symlink(&real, &alias).unwrap();

        assert!(!path_has_symlink_ancestor(&real.join("x.log")).unwrap());
        assert!(path_has_symlink_ancestor(&alias.join("x.log")).unwrap());
    }

    #[test]
    fn missing_ancestors_are_not_symlinks() {
        let td = tempfile::tempdir().unwrap();
        let base = fs::canonicalize(td.path()).unwrap();
        let deep = base.join("a").join("b").join("c.log");
        assert!(!path_has_symlink_ancestor(&deep).unwrap());
    }
}
