//! Fixed-size grid of candidate values
//!
//! A `Square` is the single data structure of the search: each worker owns
//! one, repopulates it in place on every attempt, squares every cell and
//! hands it to the validator.

/// Grid side length
pub const SIZE: usize = 3;

/// Number of cells in the grid
pub const CELLS: usize = SIZE * SIZE;

/// Largest value a cell may hold before squaring
pub const MAX_VALUE: u64 = 100;

/// An N×N grid of integers with an upper value bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    cells: [[u64; SIZE]; SIZE],
    max_value: u64,
}

impl Square {
    /// Create an empty (all-zero) square with the given value ceiling
    pub fn new(max_value: u64) -> Self {
        Self {
            cells: [[0; SIZE]; SIZE],
            max_value,
        }
    }

    /// Build a square directly from rows
    #[cfg(test)]
    pub fn from_rows(rows: [[u64; SIZE]; SIZE], max_value: u64) -> Self {
        Self {
            cells: rows,
            max_value,
        }
    }

    pub fn max_value(&self) -> u64 {
        self.max_value
    }

    pub fn rows(&self) -> &[[u64; SIZE]; SIZE] {
        &self.cells
    }

    pub fn get(&self, row: usize, column: usize) -> u64 {
        self.cells[row][column]
    }

    pub fn set(&mut self, row: usize, column: usize, value: u64) {
        self.cells[row][column] = value;
    }

    /// Reset every cell to zero
    pub fn clear(&mut self) {
        self.cells = [[0; SIZE]; SIZE];
    }

    /// Reset the grid, then fill it cell by cell in row-major order.
    ///
    /// `fill` sees the partially populated square, so it can reject values
    /// already placed. Uniqueness and range are the fill function's concern.
    pub fn populate<F>(&mut self, mut fill: F)
    where
        F: FnMut(&Square) -> u64,
    {
        self.clear();
        for row in 0..SIZE {
            for column in 0..SIZE {
                let value = fill(self);
                self.cells[row][column] = value;
            }
        }
    }

    /// Whether `value` appears anywhere in the grid
    pub fn contains(&self, value: u64) -> bool {
        self.cells.iter().flatten().any(|&cell| cell == value)
    }

    /// Replace every cell `x` with `x²`
    pub fn square(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            *cell *= *cell;
        }
    }
}

impl Default for Square {
    fn default() -> Self {
        Self::new(MAX_VALUE)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            write!(f, "[{}]", values.join(", "))?;
        }
        write!(f, "]")
    }
}
