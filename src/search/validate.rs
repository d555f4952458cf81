//! Magic-square predicate
//!
//! Rows and columns are summed together in a single pass over the grid,
//! with both diagonals accumulated along the way. Each (row, column) pair
//! must equal the pair before it, and the last pair must equal both
//! diagonals.

use crate::square::{SIZE, Square};

/// Return the common sum if every row, column and diagonal agrees, `None`
/// if `square` is not magic.
pub fn magic_sum(square: &Square) -> Option<u64> {
    let mut last_total: Option<[u64; 2]> = None;
    let mut diagonals = [0u64; 2];

    for i in 0..SIZE {
        let mut total = [0u64; 2];
        for j in 0..SIZE {
            let value = square.get(i, j);
            total[0] += value;
            total[1] += square.get(j, i);
            if i == j {
                diagonals[0] += value;
            }
            if SIZE - i - 1 == j {
                diagonals[1] += value;
            }
        }
        if last_total.is_some_and(|last| last != total) {
            return None;
        }
        last_total = Some(total);
    }

    let [row, column] = last_total?;
    if row == column && row == diagonals[0] && diagonals[0] == diagonals[1] {
        Some(row)
    } else {
        None
    }
}
