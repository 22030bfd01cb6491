use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{check_size, Sampler};
use crate::error::Error;

/// Sampler drawing uniformly distributed combinations of `size` indices
/// from `[0, maximum]`.
///
/// Each sample is built in a single pass over the universe with selection
/// sampling (Knuth, TAOCP vol. 2, algorithm S): index `i` is kept with
/// probability `remaining_to_select / remaining_candidates`.
/// The generator is seeded with a fixed value so runs are reproducible.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    size: usize,
    maximum: usize,
    rng: ChaCha8Rng,
}

impl RandomSampler {
    /// Seed used by [`RandomSampler::new`].
    pub const DEFAULT_SEED: u64 = 5489;

    /// Create a sampler seeded with [`RandomSampler::DEFAULT_SEED`].
    ///
    /// Fails if `size > maximum + 1`.
    pub fn new(size: usize, maximum: usize) -> Result<Self, Error> {
        Self::with_seed(size, maximum, Self::DEFAULT_SEED)
    }

    /// Create a sampler with an explicit seed.
    pub fn with_seed(size: usize, maximum: usize, seed: u64) -> Result<Self, Error> {
        check_size(size, maximum)?;
        Ok(Self {
            size,
            maximum,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }
}

impl Sampler for RandomSampler {
    fn size(&self) -> usize {
        self.size
    }

    fn maximum(&self) -> usize {
        self.maximum
    }

    fn sample(&mut self, out: &mut [usize]) {
        let out = &mut out[..self.size];
        let mut selected = 0;
        // Candidates left, including `i`. Never reaches 0 before all are selected.
        let mut candidates = self.maximum as u128 + 1;
        let mut i = 0;
        while selected < self.size {
            let remaining = (self.size - selected) as u128;
            if self.rng.random_range(0..candidates) < remaining {
                out[selected] = i;
                selected += 1;
            }
            candidates -= 1;
            i += 1;
        }
    }
}

// Tests #######################################################################
