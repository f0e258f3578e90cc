//! A single cell of the DTW cost matrix.

/// One cell `(row, col)` of a filled cost matrix.
///
/// `row` indexes the `from` sequence and `col` the `to` sequence. The
/// accumulated distance is the cheapest total cost of any path from `(0, 0)`
/// that ends here, this cell's local distance included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    row: usize,
    col: usize,
    local: f64,
    accumulated: f64,
}

impl Point {
    pub(crate) fn new(row: usize, col: usize, local: f64, accumulated: f64) -> Self {
        Self {
            row,
            col,
            local,
            accumulated,
        }
    }

    /// Index into the `from` sequence.
    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Index into the `to` sequence.
    #[must_use]
    pub fn col(&self) -> usize {
        self.col
    }

    /// `(row, col)` pair.
    #[must_use]
    pub fn coords(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Distance between `from[row]` and `to[col]`.
    #[must_use]
    pub fn local_distance(&self) -> f64 {
        self.local
    }

    /// Minimal cumulative cost of reaching this cell from the origin.
    #[must_use]
    pub fn accumulated_distance(&self) -> f64 {
        self.accumulated
    }
}
