//! Random fill strategy
//!
//! Each cell is drawn uniformly from `[1, M]`; a draw that already appears
//! in the grid is rejected and redrawn. There is no retry bound: the value
//! range is always larger than the number of cells in practice.

use crate::search::Generator;
use crate::search::config::Algorithm;
use crate::search::error::FillError;
use crate::search::parallel::channel::SharedState;
use crate::square::Square;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Rejection sampler over `[1, max_value]`
pub struct RandomGenerator {
    rng: ChaCha8Rng,
}

impl RandomGenerator {
    /// Create a generator seeded from `seed`, or from the OS when `None`
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self { rng }
    }

    /// Draw the next value not yet present in `square`
    pub fn gen_value(&mut self, square: &Square) -> u64 {
        loop {
            let value = self.rng.random_range(1..=square.max_value());
            if !square.contains(value) {
                return value;
            }
        }
    }
}

impl Generator for RandomGenerator {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Random
    }

    fn fill(&mut self, square: &mut Square, _shared: &SharedState) -> Result<(), FillError> {
        square.populate(|s| self.gen_value(s));
        Ok(())
    }
}
