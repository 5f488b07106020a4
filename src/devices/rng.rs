//! Random number generator device.
//!
//! A single port whose loads yield uniformly distributed bytes. Stores are
//! ignored. Entropy-seeded by default; tests use [`RandomSource::with_seed`]
//! for reproducible sequences.

use super::PortDevice;
use crate::ExecutionError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::any::Any;

/// One-port random byte source.
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Creates a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a generator with a fixed seed, for deterministic tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PortDevice for RandomSource {
    fn load(&mut self, _offset: u8) -> u8 {
        self.rng.gen()
    }

    fn store(&mut self, _offset: u8, _value: u8) -> Result<(), ExecutionError> {
        // Writes to the RNG are silently discarded.
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
