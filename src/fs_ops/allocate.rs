//! Temp symlink allocation.
//! - Creates `<dir>/symlink.<9 digits>` pointing at a caller-supplied target.
//! - Collisions (another writer already owns the name) are retried with a fresh suffix.
//! - Any other OS error is returned as-is on the spot.
//!
//! Notes:
//! - The create call itself is the exclusion mechanism: symlink(2) never replaces an
//!   existing entry, so there is no separate exists() probe to race against.
//! - The in-process suffix lock is not held across filesystem calls.
//! - The conflict counter is never reset within a call; once past the threshold,
//!   every further conflict reseeds again.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use crate::platform;
use crate::suffix::{SuffixGenerator, SuffixSource};

/// Fixed file name prefix for every temp symlink.
pub const TEMP_PREFIX: &str = "symlink.";
/// Default attempt budget per call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;
/// Default number of conflicts tolerated before the generator is reseeded.
pub const DEFAULT_RESEED_AFTER: u32 = 10;

/// Bounds for a single allocation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocLimits {
    /// Candidate names tried before giving up.
    pub max_attempts: u32,
    /// Reseed once the conflict count exceeds this.
    pub reseed_after: u32,
}

impl Default for AllocLimits {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            reseed_after: DEFAULT_RESEED_AFTER,
        }
    }
}

/// The filesystem half of an allocation: create a symlink or fail atomically.
pub trait LinkCreator {
    fn create_symlink(&self, target: &Path, link: &Path) -> io::Result<()>;
}

/// Creates real symlinks through the platform layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsLinker;

impl LinkCreator for OsLinker {
    fn create_symlink(&self, target: &Path, link: &Path) -> io::Result<()> {
        platform::create_symlink(target, link)
    }
}

/// Bounded retry loop combining a suffix source with a link creator.
#[derive(Debug, Clone)]
pub struct TempSymlinkAllocator<S, L = OsLinker> {
    suffixes: S,
    linker: L,
    limits: AllocLimits,
}

impl TempSymlinkAllocator<&'static SuffixGenerator, OsLinker> {
    /// Allocator backed by the process-wide generator and real symlinks.
    pub fn os_default() -> Self {
        Self::new(SuffixGenerator::global(), OsLinker)
    }
}

impl<S: SuffixSource, L: LinkCreator> TempSymlinkAllocator<S, L> {
    pub fn new(suffixes: S, linker: L) -> Self {
        Self {
            suffixes,
            linker,
            limits: AllocLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: AllocLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> AllocLimits {
        self.limits
    }

    /// Create a fresh symlink inside `dir` whose content is `target`.
    ///
    /// Returns the new link's path, the first non-collision error verbatim, or the
    /// last `AlreadyExists` error once every attempt has collided.
    pub fn allocate(&self, target: &Path, dir: &Path) -> io::Result<PathBuf> {
        let mut conflicts: u32 = 0;
        let mut last_conflict: Option<io::Error> = None;

        for attempt in 1..=self.limits.max_attempts {
            let candidate = dir.join(format!("{TEMP_PREFIX}{}", self.suffixes.next_suffix()));

            match self.linker.create_symlink(target, &candidate) {
                Ok(()) => {
                    debug!(path = %candidate.display(), link_target = %target.display(), attempt, conflicts, "temp symlink created");
                    return Ok(candidate);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    conflicts += 1;
                    trace!(path = %candidate.display(), attempt, conflicts, "temp symlink name taken");
                    if conflicts > self.limits.reseed_after {
                        self.suffixes.reseed();
                        debug!(dir = %dir.display(), conflicts, "suffix generator reseeded after repeated collisions");
                    }
                    last_conflict = Some(e);
                }
                Err(e) => {
                    debug!(path = %candidate.display(), attempt, error = %e, "temp symlink creation failed");
                    return Err(e);
                }
            }
        }

        warn!(
            dir = %dir.display(),
            attempts = self.limits.max_attempts,
            "gave up allocating temp symlink; every candidate name collided"
        );
        Err(last_conflict.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                "temp symlink allocation made no attempts",
            )
        }))
    }
}

/// Create `<dir>/symlink.<suffix>` pointing at `target`, using the process-wide generator.
///
/// `dir` must already exist; it is never created here. `target` is written verbatim
/// and need not exist. On success the caller owns the returned path and is expected to
/// rename it over its final location (see [`crate::publish_symlink`]) or remove it.
pub fn allocate_temp_symlink(
    target: impl AsRef<Path>,
    dir: impl AsRef<Path>,
) -> io::Result<PathBuf> {
    TempSymlinkAllocator::os_default().allocate(target.as_ref(), dir.as_ref())
}
