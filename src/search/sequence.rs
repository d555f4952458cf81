//! Sequential fill strategy
//!
//! A cursor value is read as N² base-M digits, least significant first.
//! Digit `k` lands at row `k mod N`, column `k / N`. Cursor values with a
//! zero digit or a repeated digit are skipped, so every accepted square
//! holds N² distinct values in `[1, M)`.
//!
//! The cursor is shared between workers and advanced atomically, which
//! hands each worker a disjoint set of cursor values. The last value a
//! worker decoded is its resume point.

use crate::search::Generator;
use crate::search::config::Algorithm;
use crate::search::error::{DecodeError, Exhausted, FillError};
use crate::search::parallel::channel::SharedState;
use crate::square::{CELLS, SIZE, Square};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic, shareable enumeration cursor
#[derive(Debug, Default)]
pub struct SearchCursor {
    position: AtomicU64,
}

impl SearchCursor {
    /// Create a cursor whose first claimed value is `start + 1`
    pub fn new(start: u64) -> Self {
        Self {
            position: AtomicU64::new(start),
        }
    }

    /// Claim the next cursor value, or `None` once the cursor is at `u64::MAX`
    pub fn advance(&self) -> Option<u64> {
        self.position
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |p| p.checked_add(1))
            .ok()
            .map(|previous| previous + 1)
    }

    /// Most recently claimed value (or the start value if none yet)
    pub fn position(&self) -> u64 {
        self.position.load(Ordering::SeqCst)
    }
}

/// Number of distinct cursor values for a grid of the given ceiling, if it
/// fits in a `u64`
pub fn cursor_limit(max_value: u64) -> Option<u64> {
    max_value.checked_pow(CELLS as u32)
}

/// Decode `start` into `square`.
///
/// On failure the square is left partially filled and must not be
/// validated.
pub fn decode_into(square: &mut Square, start: u64) -> Result<(), DecodeError> {
    square.clear();
    let radix = square.max_value();
    let mut rest = start;

    for digit in 0..CELLS {
        let value = rest % radix;
        rest /= radix;

        if value == 0 {
            return Err(DecodeError::Zero { digit });
        }
        if square.contains(value) {
            return Err(DecodeError::Duplicate { digit, value });
        }
        square.set(digit % SIZE, (digit / SIZE) % SIZE, value);
    }

    Ok(())
}

/// Enumerates cursor values until one decodes cleanly
pub struct SequenceGenerator {
    cursor: Arc<SearchCursor>,
    limit: Option<u64>,
    last: Option<u64>,
}

impl SequenceGenerator {
    pub fn new(cursor: Arc<SearchCursor>, max_value: u64) -> Self {
        Self {
            cursor,
            limit: cursor_limit(max_value),
            last: None,
        }
    }
}

impl Generator for SequenceGenerator {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sequence
    }

    fn fill(&mut self, square: &mut Square, shared: &SharedState) -> Result<(), FillError> {
        // From a low start the first legal cursor is ~1e16 values away
        loop {
            if shared.should_stop() {
                return Err(FillError::Stopped);
            }
            let Some(start) = self.cursor.advance() else {
                let limit = self.limit.unwrap_or(u64::MAX);
                return Err(Exhausted { limit }.into());
            };
            if let Some(limit) = self.limit
                && start >= limit
            {
                return Err(Exhausted { limit }.into());
            }
            if decode_into(square, start).is_ok() {
                self.last = Some(start);
                return Ok(());
            }
        }
    }

    fn position(&self) -> Option<u64> {
        self.last
    }
}
