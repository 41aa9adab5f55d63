//! Filesystem operations: temp symlink allocation and atomic publish.

mod allocate;
mod dir_check;
mod publish;

pub use allocate::{
    allocate_temp_symlink, AllocLimits, LinkCreator, OsLinker, TempSymlinkAllocator,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_RESEED_AFTER, TEMP_PREFIX,
};
pub use dir_check::ensure_link_dir;
pub use publish::{link_dir, publish_symlink, publish_symlink_with};
