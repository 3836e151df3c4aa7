//! Error types for the allocator's fallible entry points.
//!
//! The allocator surface itself never raises these — `malloc`/`realloc`
//! report failure as `None`, matching the C original's `NULL` returns (see
//! spec §7). `MemError`/`InitError` exist for the two call sites that really
//! do need a `Result`: the simulated heap primitive's `sbrk`, and `init`.

use std::error::Error;
use std::fmt;

/// The simulated heap primitive could not satisfy an `sbrk`-style extend
/// request because it would exceed the arena's fixed capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemError;

impl fmt::Display for MemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "simulated heap arena exhausted")
    }
}

impl Error for MemError {}

/// `init`/`mm_init` failed because the very first heap extension did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitError(pub MemError);

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "allocator initialization failed: {}", self.0)
    }
}

impl Error for InitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl From<MemError> for InitError {
    fn from(e: MemError) -> Self {
        InitError(e)
    }
}
