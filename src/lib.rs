//! Core library for `fdb_symlink`.
//!
//! Publishes a symlink under a unique temporary name (`symlink.<9 digits>`) inside a
//! directory, so a caller can rename it over a well-known path afterwards. Concurrent
//! writers (threads or processes) targeting the same directory are handled by retrying
//! on name collisions; the only cross-process synchronization is the atomicity of
//! symlink creation itself.
//!
//! ```no_run
//! use fdb_symlink::{allocate_temp_symlink, publish_symlink};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Two steps, caller-driven:
//! let tmp = allocate_temp_symlink("v3", "/srv/site")?;
//! std::fs::rename(&tmp, "/srv/site/current")?;
//!
//! // Or both at once:
//! publish_symlink("v4", "/srv/site/current")?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod suffix;

pub use config::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use config::{Config, LogLevel};
pub use errors::SymlinkError;
pub use fs_ops::{
    allocate_temp_symlink, ensure_link_dir, link_dir, publish_symlink, publish_symlink_with,
    AllocLimits, LinkCreator, OsLinker, TempSymlinkAllocator, TEMP_PREFIX,
};
pub use suffix::{SuffixGenerator, SuffixSource};
