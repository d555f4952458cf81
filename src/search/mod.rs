//! Search for magic squares of squares
//!
//! This module provides the two generation strategies and the machinery
//! that drives them:
//! - Random: rejection sampling of distinct values in `[1, M]`
//! - Sequence: enumeration of base-M cursor values with distinct nonzero digits
//! - Parallel: a fixed pool of workers sharing an attempt counter

pub mod config;
pub mod error;
pub mod parallel;
pub mod random;
pub mod result;
pub mod sequence;
pub mod validate;
pub mod worker;

pub use config::{Algorithm, SearchConfig};
pub use parallel::{ParallelConfig, run_parallel_search};
pub use result::SearchResult;

use crate::square::Square;
use error::FillError;
use parallel::channel::SharedState;

/// Trait for strategies that fill a square with candidate values
pub trait Generator: Send {
    /// Strategy implemented by this generator
    fn algorithm(&self) -> Algorithm;

    /// Repopulate `square` with the next candidate
    ///
    /// Strategies that may skip many values before producing one must poll
    /// `shared.should_stop()` while skipping.
    ///
    /// # Returns
    /// `Err(FillError::Exhausted)` once the strategy has no candidates left,
    /// `Err(FillError::Stopped)` if the stop flag was raised mid-search
    fn fill(&mut self, square: &mut Square, shared: &SharedState) -> Result<(), FillError>;

    /// Cursor value of the most recent candidate, for resumable strategies
    fn position(&self) -> Option<u64> {
        None
    }
}
