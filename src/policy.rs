//! The placement policy selector.
//!
//! Replaces the C original's `whichfit` global and its `FIRSTFIT=1` /
//! `NEXTFIT=2` / `BESTFIT=3` constants with an enum — the discriminants are
//! kept numerically identical purely so the values line up with spec §6's
//! external interface table, not because any logic depends on them.

/// Which free block a search should settle for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Fit {
    FirstFit = 1,
    NextFit = 2,
    BestFit = 3,
}

impl Default for Fit {
    fn default() -> Self {
        Fit::FirstFit
    }
}

impl std::str::FromStr for Fit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Fit::FirstFit),
            "next" => Ok(Fit::NextFit),
            "best" => Ok(Fit::BestFit),
            other => Err(format!("unknown fit policy: {other}")),
        }
    }
}
