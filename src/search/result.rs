//! Search result types and statistics

use crate::search::config::Algorithm;
use crate::square::Square;
use std::time::Duration;

/// Why a search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A worker found a magic square of squares
    Found,
    /// The process received an interrupt signal
    Interrupted,
    /// Every worker ran out of candidates
    Exhausted,
    /// The attempt limit was reached
    LimitReached,
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchOutcome::Found => write!(f, "found"),
            SearchOutcome::Interrupted => write!(f, "interrupted"),
            SearchOutcome::Exhausted => write!(f, "exhausted"),
            SearchOutcome::LimitReached => write!(f, "limit reached"),
        }
    }
}

/// A square that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Worker that found it
    pub worker_id: usize,
    /// Values before squaring
    pub roots: Square,
    /// Squared values that form the magic square
    pub square: Square,
    /// Common row, column and diagonal sum
    pub magic_sum: u64,
    /// Winning cursor value (sequence strategy only)
    pub cursor: Option<u64>,
}

/// Statistics from a search run
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Strategy used for the search
    pub algorithm: Algorithm,
    /// Number of workers that took part
    pub workers: usize,
    /// Wall-clock time spent searching
    pub elapsed_time: Duration,
    /// Generation attempts across all workers
    pub attempts: u64,
}

impl SearchStatistics {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Default::default()
        }
    }

    /// Attempts per second, rounded to the nearest integer
    pub fn throughput(&self) -> u64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0
        } else {
            (self.attempts as f64 / secs).round() as u64
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Algorithm: {}\n", self.algorithm));
        s.push_str(&format!("Workers: {}\n", self.workers));
        s.push_str(&format!("Attempts: {}\n", self.attempts));
        s.push_str(&format!("Time: {:.2} s\n", self.elapsed_time.as_secs_f64()));
        s.push_str(&format!("Throughput: {} attempts/s\n", self.throughput()));
        s
    }
}

/// Result of a search run
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    /// The solution, when `outcome` is `Found`
    pub solution: Option<Solution>,
    pub statistics: SearchStatistics,
    /// Highest cursor value handed out (sequence strategy only)
    pub resume_cursor: Option<u64>,
}

impl SearchResult {
    pub fn found(solution: Solution, statistics: SearchStatistics) -> Self {
        Self {
            outcome: SearchOutcome::Found,
            resume_cursor: solution.cursor,
            solution: Some(solution),
            statistics,
        }
    }

    pub fn stopped(outcome: SearchOutcome, statistics: SearchStatistics) -> Self {
        Self {
            outcome,
            solution: None,
            statistics,
            resume_cursor: None,
        }
    }

    pub fn with_resume_cursor(mut self, cursor: Option<u64>) -> Self {
        if self.resume_cursor.is_none() {
            self.resume_cursor = cursor;
        }
        self
    }
}

impl std::fmt::Display for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.outcome, &self.solution) {
            (SearchOutcome::Found, Some(solution)) => {
                writeln!(f, "Magic square found!")?;
                writeln!(f, "Worker: {}", solution.worker_id)?;
                writeln!(f, "Roots: {}", solution.roots)?;
                writeln!(f, "Square: {}", solution.square)?;
                writeln!(f, "Magic sum: {}", solution.magic_sum)?;
                if let Some(cursor) = solution.cursor {
                    writeln!(f, "Cursor: {}", cursor)?;
                }
            }
            (SearchOutcome::Interrupted, _) => writeln!(f, "Interrupted.")?,
            (SearchOutcome::Exhausted, _) => writeln!(f, "No more values to try.")?,
            (SearchOutcome::LimitReached, _) => writeln!(f, "Attempt limit reached.")?,
            (SearchOutcome::Found, None) => writeln!(f, "No magic square found.")?,
        }
        if self.outcome != SearchOutcome::Found
            && let Some(cursor) = self.resume_cursor
        {
            writeln!(f, "Resume from: {}", cursor)?;
        }
        write!(f, "{}", self.statistics.format_summary())
    }
}
