//! Error conditions raised while generating candidate squares

use thiserror::Error;

/// A cursor value whose base-M digits cannot form a valid square.
///
/// Recovered locally by advancing the cursor; never surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("digit {digit} is zero")]
    Zero { digit: usize },
    #[error("digit {digit} repeats value {value}")]
    Duplicate { digit: usize, value: u64 },
}

/// The generator has no candidates left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no more values below cursor limit {limit}")]
pub struct Exhausted {
    pub limit: u64,
}

/// Why `Generator::fill` returned without a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FillError {
    #[error(transparent)]
    Exhausted(#[from] Exhausted),
    /// The shared stop flag was raised while looking for a candidate
    #[error("stopped before a candidate was found")]
    Stopped,
}
