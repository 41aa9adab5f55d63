//! Suffix generation for temporary symlink names.
//!
//! A tiny linear congruential generator shared by every allocation in the process.
//! It is not meant to be statistically strong: it only has to produce a different
//! 9-digit suffix from one call to the next, cheaply and without touching the filesystem.
//!
//! Notes:
//! - The lock covers the advance-and-read step only; formatting happens outside it.
//! - A zero state means "not seeded yet" and is seeded lazily on the next advance.
//! - `reseed()` jumps to a fresh trajectory; the allocator uses it to escape collision storms.

use std::sync::{LazyLock, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

/// Numerical Recipes LCG multiplier.
const LCG_MUL: u32 = 1_664_525;
/// Numerical Recipes LCG increment.
const LCG_INC: u32 = 1_013_904_223;
/// Suffixes are the low 9 decimal digits of the state.
const SUFFIX_MODULUS: u32 = 1_000_000_000;

/// Width of every suffix produced by [`SuffixGenerator::next_suffix`].
pub(crate) const SUFFIX_LEN: usize = 9;

/// Source of seed values for a [`SuffixGenerator`].
pub trait SeedSource {
    fn seed(&self) -> u32;
}

/// Default seed: wall-clock nanoseconds plus the process id, truncated to 32 bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockPidSeed;

impl SeedSource for ClockPidSeed {
    fn seed(&self) -> u32 {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as i64)
            .unwrap_or(0);
        nanos.wrapping_add(i64::from(std::process::id())) as u32
    }
}

/// Something that hands out filename suffixes and can be told to start over.
///
/// The allocator only talks to this trait, so its retry policy can be tested
/// with a scripted source instead of the real generator.
pub trait SuffixSource {
    fn next_suffix(&self) -> String;
    fn reseed(&self);
}

impl<T: SuffixSource + ?Sized> SuffixSource for &T {
    fn next_suffix(&self) -> String {
        (**self).next_suffix()
    }

    fn reseed(&self) {
        (**self).reseed()
    }
}

static GLOBAL: LazyLock<SuffixGenerator> = LazyLock::new(SuffixGenerator::new);

/// Mutex-guarded LCG state producing 9-digit decimal suffixes.
#[derive(Debug)]
pub struct SuffixGenerator<S = ClockPidSeed> {
    state: Mutex<u32>,
    seed: S,
}

impl SuffixGenerator<ClockPidSeed> {
    /// Unseeded generator; the first advance seeds it from clock and pid.
    pub fn new() -> Self {
        Self::with_seed_source(ClockPidSeed)
    }

    /// Generator starting from a fixed state. A zero state is seeded lazily as usual.
    pub fn with_state(state: u32) -> Self {
        Self {
            state: Mutex::new(state),
            seed: ClockPidSeed,
        }
    }

    /// Process-wide generator shared by [`crate::allocate_temp_symlink`].
    pub fn global() -> &'static SuffixGenerator {
        &GLOBAL
    }
}

impl Default for SuffixGenerator<ClockPidSeed> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SeedSource> SuffixGenerator<S> {
    /// Unseeded generator drawing seeds from `seed`.
    pub fn with_seed_source(seed: S) -> Self {
        Self {
            state: Mutex::new(0),
            seed,
        }
    }

    /// Step the LCG once and return the new raw state.
    pub fn advance(&self) -> u32 {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut r = *state;
        if r == 0 {
            r = self.seed.seed();
        }
        r = step(r);
        *state = r;
        r
    }

    /// Next 9-digit suffix (leading zeros preserved).
    pub fn next_suffix(&self) -> String {
        format_suffix(self.advance())
    }

    /// Replace the state with a fresh seed.
    pub fn reseed(&self) {
        let fresh = self.seed.seed();
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = fresh;
    }
}

impl<S: SeedSource> SuffixSource for SuffixGenerator<S> {
    fn next_suffix(&self) -> String {
        SuffixGenerator::next_suffix(self)
    }

    fn reseed(&self) {
        SuffixGenerator::reseed(self)
    }
}

#[inline]
fn step(r: u32) -> u32 {
    r.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC)
}

/// Render `r mod 1e9` as exactly nine digits.
///
/// Adds 1e9 and drops the leading '1' rather than zero-padding; the result is the same.
fn format_suffix(r: u32) -> String {
    let widened = (u64::from(SUFFIX_MODULUS) + u64::from(r % SUFFIX_MODULUS)).to_string();
    widened[widened.len() - SUFFIX_LEN..].to_string()
}
