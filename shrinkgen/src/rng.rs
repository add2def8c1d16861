//! Splittable random stream consumed by generators.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Deterministic pseudorandom stream.
///
/// Generators receive a `&Random` and clone it when they need to draw. Nested
/// generators get their own stream through [`Random::split`], so sibling
/// generators never observe correlated randomness and a fixed root stream always
/// reproduces the same values.
#[derive(Debug, Clone)]
pub struct Random {
    rng: StdRng,
}

impl Random {
    /// Create a stream from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a stream seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Derive an independent stream. Advances `self`, so consecutive splits differ.
    pub fn split(&mut self) -> Random {
        Random::new(self.rng.next_u64())
    }
}

impl RngCore for Random {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}
