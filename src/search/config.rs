//! Configuration types for the search strategies

use crate::square::MAX_VALUE;

/// Grid generation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Uniform random sampling with rejection of repeated values
    #[default]
    Random,
    /// Deterministic enumeration of base-M cursor values
    Sequence,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Random => write!(f, "random"),
            Algorithm::Sequence => write!(f, "sequence"),
        }
    }
}

/// Main search configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Generation strategy
    pub algorithm: Algorithm,
    /// Largest value a cell may hold before squaring
    pub max_value: u64,
    /// Stop after this many attempts across all workers (None = unlimited)
    pub max_attempts: Option<u64>,
    /// Cursor value the sequence strategy resumes after
    pub start: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            max_value: MAX_VALUE,
            max_attempts: None,
            start: 0,
        }
    }
}

impl SearchConfig {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[cfg(test)]
    pub fn with_max_attempts(mut self, attempts: u64) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn with_max_attempts_option(mut self, attempts: Option<u64>) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_start(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    #[cfg(test)]
    pub fn with_max_value(mut self, max_value: u64) -> Self {
        self.max_value = max_value;
        self
    }
}
