//! Injectable randomness for loot roll votes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed choices.
pub trait RollSource: Send {
    /// A value in `0..=upper`, uniformly distributed.
    fn roll(&mut self, upper: u32) -> u32;
}

/// OS-seeded generator used in production.
pub struct RandomRolls {
    rng: StdRng,
}

impl RandomRolls {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for RandomRolls {
    fn default() -> Self {
        Self::new()
    }
}

impl RollSource for RandomRolls {
    fn roll(&mut self, upper: u32) -> u32 {
        self.rng.random_range(0..=upper)
    }
}

/// Fixed-seed generator for reproducible runs.
pub struct SeededRolls {
    rng: StdRng,
}

impl SeededRolls {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RollSource for SeededRolls {
    fn roll(&mut self, upper: u32) -> u32 {
        self.rng.random_range(0..=upper)
    }
}
