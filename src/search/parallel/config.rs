//! Configuration for the worker pool.

/// Workers spawned when none are requested.
pub const DEFAULT_WORKERS: usize = 4;

/// Configuration for parallel search execution.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of worker threads to spawn.
    pub num_workers: usize,
    /// Base random seed (workers get seed + worker_id).
    pub base_seed: Option<u64>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: DEFAULT_WORKERS,
            base_seed: None,
        }
    }
}

impl ParallelConfig {
    /// Set the number of workers (at least one).
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    /// Set the base random seed for reproducibility.
    #[cfg(test)]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }

    /// Set the base random seed from an Option.
    pub fn with_seed_option(mut self, seed: Option<u64>) -> Self {
        self.base_seed = seed;
        self
    }

    /// Seed for a given worker, if a base seed is set.
    pub fn worker_seed(&self, worker_id: usize) -> Option<u64> {
        self.base_seed.map(|seed| seed.wrapping_add(worker_id as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParallelConfig::default();
        assert_eq!(config.num_workers, 4);
        assert!(config.base_seed.is_none());
        assert!(config.worker_seed(0).is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ParallelConfig::default().with_workers(8).with_seed(42);

        assert_eq!(config.num_workers, 8);
        assert_eq!(config.base_seed, Some(42));
    }

    #[test]
    fn test_worker_seeds_differ() {
        let config = ParallelConfig::default().with_seed(u64::MAX);
        assert_eq!(config.worker_seed(0), Some(u64::MAX));
        assert_eq!(config.worker_seed(1), Some(0));
        assert_eq!(config.worker_seed(2), Some(1));
    }

    #[test]
    fn test_minimum_workers() {
        let config = ParallelConfig::default().with_workers(0);
        assert_eq!(config.num_workers, 1);
    }
}
